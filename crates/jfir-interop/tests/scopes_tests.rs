use super::*;
use crate::enhancement::{FunctionKind, PropertyKind};
use crate::test_support::*;
use jfir_model::{
    ForeignAnnotation, ForeignClass, ForeignClassKind, ForeignField, ForeignLiteral, ForeignMethod, ForeignType, ForeignTypeParameter,
    ForeignValueParameter, PrimitiveKind, TypeParameterKey,
};
use rayon::prelude::*;

fn void() -> ForeignType {
    ForeignType::primitive(PrimitiveKind::Void)
}

fn string() -> ForeignType {
    ForeignType::class("java/lang/String")
}

fn static_method(name: &str) -> ForeignMethod {
    ForeignMethod::new(name, void()).make_static()
}

fn containing_classes(functions: &[Arc<EnhancedFunction>]) -> Vec<String> {
    functions.iter().map(|function| function.containing_class.as_string()).collect()
}

/// `pkg/Base<T>` with `get(): T`, `put(T)` and a field `value: T`, and
/// `pkg/A extends Base<String>` overriding `put`.
fn generic_hierarchy() -> Vec<ForeignClass> {
    let t = TypeParameterKey::new("pkg/Base", "T");
    vec![
        ForeignClass::new("pkg/Base", ForeignClassKind::Class)
            .with_type_parameter(ForeignTypeParameter::new("pkg/Base", "T"))
            .with_method(ForeignMethod::new("get", ForeignType::type_parameter(&t)))
            .with_method(
                ForeignMethod::new("put", void())
                    .with_parameter(ForeignValueParameter::new("value", ForeignType::type_parameter(&t))),
            )
            .with_field(ForeignField::new("value", ForeignType::type_parameter(&t)))
            .with_field(ForeignField::new("count", ForeignType::primitive(PrimitiveKind::Int))),
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_supertype(ForeignType::class_with_args("pkg/Base", vec![string()]))
            .with_method(ForeignMethod::new("put", void()).with_parameter(ForeignValueParameter::new("value", string())))
            .with_field(ForeignField::new("count", ForeignType::primitive(PrimitiveKind::Long)))
            .with_default_constructor(),
    ]
}

// =============================================================================
// Use-site scope
// =============================================================================

#[test]
fn test_inherited_members_are_substituted() {
    let session = session_with(generic_hierarchy());
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    let get = scope.functions(&session, &name("get")).expect("get");
    assert_eq!(containing_classes(&get), ["pkg/Base"]);
    assert_eq!(
        get[0].return_type.class_id().map(ClassId::as_string).as_deref(),
        Some("kotlin/String")
    );

    let value = scope.properties(&session, &name("value")).expect("value");
    assert_eq!(value.len(), 1);
    assert_eq!(
        value[0].return_type.class_id().map(ClassId::as_string).as_deref(),
        Some("kotlin/String")
    );
}

#[test]
fn test_declared_function_overrides_by_erased_signature() {
    let session = session_with(generic_hierarchy());
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    let put = scope.functions(&session, &name("put")).expect("put");
    assert_eq!(containing_classes(&put), ["pkg/A"]);
}

#[test]
fn test_overloads_with_different_erasure_are_inherited() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Base", ForeignClassKind::Class).with_method(
            ForeignMethod::new("put", void())
                .with_parameter(ForeignValueParameter::new("value", ForeignType::primitive(PrimitiveKind::Int))),
        ),
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/Base"))
            .with_method(ForeignMethod::new("put", void()).with_parameter(ForeignValueParameter::new("value", string()))),
    ]);
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    let put = scope.functions(&session, &name("put")).expect("put");
    assert_eq!(containing_classes(&put), ["pkg/A", "pkg/Base"]);
}

#[test]
fn test_declared_field_hides_inherited_field() {
    let session = session_with(generic_hierarchy());
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    let count = scope.properties(&session, &name("count")).expect("count");
    assert_eq!(count.len(), 1);
    assert_eq!(count[0].containing_class.as_string(), "pkg/A");
    assert_eq!(count[0].return_type.to_string(), "kotlin/Long");
}

#[test]
fn test_use_site_scope_excludes_static_members() {
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_method(static_method("create"))
            .with_method(ForeignMethod::new("run", void())),
    ]);
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    assert!(scope.functions(&session, &name("create")).expect("create").is_empty());
    assert_eq!(scope.functions(&session, &name("run")).expect("run").len(), 1);
    assert_eq!(scope.callable_names(), [name("run")]);
}

#[test]
fn test_use_site_scope_lists_constructors() {
    let session = session_with(generic_hierarchy());
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    let constructors = scope.constructors(&session).expect("constructors");
    assert_eq!(constructors.len(), 1);
    assert_eq!(constructors[0].name, Name::init());
    assert_eq!(constructors[0].kind, FunctionKind::Constructor);
}

#[test]
fn test_supertype_cycle_falls_back_to_any() {
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/B"))
            .with_method(ForeignMethod::new("a", void())),
        ForeignClass::new("pkg/B", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/A"))
            .with_method(ForeignMethod::new("b", void())),
    ]);
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    assert_eq!(scope.functions(&session, &name("a")).expect("a").len(), 1);
    assert!(scope.functions(&session, &name("b")).expect("b").is_empty());
    assert_eq!(scope.callable_names(), [name("a")]);
}

#[test]
fn test_loop_above_class_only_affects_looping_classes() {
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class).with_supertype(ForeignType::class("pkg/B")),
        ForeignClass::new("pkg/B", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/C"))
            .with_method(ForeignMethod::new("b", void())),
        ForeignClass::new("pkg/C", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/B"))
            .with_method(ForeignMethod::new("c", void())),
    ]);
    let class = java_class(&session, "pkg/A");
    let scope = session.use_site_member_scope(&class).expect("scope");

    assert_eq!(containing_classes(&scope.functions(&session, &name("b")).expect("b")), ["pkg/B"]);
    // `B` is in the loop, so it sees only its own members.
    assert!(scope.functions(&session, &name("c")).expect("c").is_empty());
}

#[test]
fn test_annotation_methods_become_properties() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Ann", ForeignClassKind::Annotation)
            .with_method(ForeignMethod::new("value", string()))
            .with_method(ForeignMethod::new("level", ForeignType::primitive(PrimitiveKind::Int))),
    ]);
    let class = java_class(&session, "pkg/Ann");
    let scope = session.use_site_member_scope(&class).expect("scope");

    assert!(scope.functions(&session, &name("value")).expect("functions").is_empty());
    let value = scope.properties(&session, &name("value")).expect("value");
    assert_eq!(value.len(), 1);
    assert_eq!(value[0].kind, PropertyKind::AnnotationMember);
    assert!(!value[0].is_var);
    assert_eq!(value[0].return_type.to_string(), "kotlin/String");
    let level = scope.properties(&session, &name("level")).expect("level");
    assert_eq!(level[0].return_type.to_string(), "kotlin/Int");
}

#[test]
fn test_scopes_are_cached() {
    let session = session_with(generic_hierarchy());
    let class = java_class(&session, "pkg/A");

    let first = session.use_site_member_scope(&class).expect("scope");
    let built = session.scopes().constructed_scopes();
    let second = session.use_site_member_scope(&class).expect("scope");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(session.scopes().constructed_scopes(), built);
}

#[test]
fn test_concurrent_requests_build_scope_once() {
    let session = session_with(generic_hierarchy());
    let class = java_class(&session, "pkg/A");

    let scopes: Vec<Arc<dyn MemberScope>> = (0..32)
        .into_par_iter()
        .map(|_| session.use_site_member_scope(&class).expect("scope"))
        .collect();

    assert!(scopes.iter().all(|scope| Arc::ptr_eq(scope, &scopes[0])));
    // One scope for `A`, one for `Base`.
    assert_eq!(session.scopes().constructed_scopes(), 2);
}

// =============================================================================
// Static scope
// =============================================================================

#[test]
fn test_static_scope_is_absent_without_static_members() {
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class).with_method(ForeignMethod::new("run", void())),
    ]);
    let class = java_class(&session, "pkg/A");
    assert!(session.static_member_scope_for_callables(&class).expect("scope").is_none());
}

#[test]
fn test_static_scope_includes_superclass_functions() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Base", ForeignClassKind::Class).with_method(static_method("util")),
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/Base"))
            .with_method(static_method("create"))
            .with_method(ForeignMethod::new("run", void())),
    ]);
    let class = java_class(&session, "pkg/A");
    let scope = session
        .static_member_scope_for_callables(&class)
        .expect("scope")
        .expect("static members");

    assert_eq!(containing_classes(&scope.functions(&session, &name("util")).expect("util")), ["pkg/Base"]);
    assert_eq!(containing_classes(&scope.functions(&session, &name("create")).expect("create")), ["pkg/A"]);
    assert!(scope.functions(&session, &name("run")).expect("run").is_empty());
}

#[test]
fn test_static_scope_searches_through_kotlin_supertypes() {
    let session = session_with(vec![
        ForeignClass::new("pkg/B", ForeignClassKind::Class).with_method(static_method("util")),
        ForeignClass::new("pkg/K", ForeignClassKind::Class)
            .with_annotation(ForeignAnnotation::new("kotlin/Metadata"))
            .with_supertype(ForeignType::class("pkg/B")),
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/K"))
            .with_method(static_method("create")),
    ]);
    assert!(session.java_class(&ClassId::from_string("pkg/K")).expect("lookup").is_none());

    let class = java_class(&session, "pkg/A");
    let scope = session
        .static_member_scope_for_callables(&class)
        .expect("scope")
        .expect("static members");

    assert_eq!(containing_classes(&scope.functions(&session, &name("util")).expect("util")), ["pkg/B"]);
    assert_eq!(containing_classes(&scope.functions(&session, &name("create")).expect("create")), ["pkg/A"]);
}

#[test]
fn test_static_scope_deduplicates_interface_fields() {
    let session = session_with(vec![
        ForeignClass::new("pkg/I", ForeignClassKind::Interface)
            .with_field(ForeignField::constant(
                "LIMIT",
                ForeignType::primitive(PrimitiveKind::Int),
                ForeignLiteral::Int(1),
            ))
            .with_method(static_method("helper")),
        ForeignClass::new("pkg/Base", ForeignClassKind::Class).with_supertype(ForeignType::class("pkg/I")),
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/Base"))
            .with_supertype(ForeignType::class("pkg/I")),
    ]);
    let class = java_class(&session, "pkg/A");
    let scope = session
        .static_member_scope_for_callables(&class)
        .expect("scope")
        .expect("static members");

    let limit = scope.properties(&session, &name("LIMIT")).expect("LIMIT");
    assert_eq!(limit.len(), 1);
    assert_eq!(limit[0].containing_class.as_string(), "pkg/I");
    // Static interface functions are not inherited.
    assert!(scope.functions(&session, &name("helper")).expect("helper").is_empty());
}

// =============================================================================
// Nested classifiers
// =============================================================================

#[test]
fn test_nested_classifier_scope_materializes_on_lookup() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Outer", ForeignClassKind::Class).with_inner_class("Inner"),
        ForeignClass::new("pkg/Outer.Inner", ForeignClassKind::Class).make_static(),
    ]);
    let outer = java_class(&session, "pkg/Outer");
    let nested = session.nested_classifier_scope(&outer);

    assert_eq!(nested.names(), [name("Inner")]);
    assert!(!session.provider().is_completed(&ClassId::from_string("pkg/Outer.Inner")));

    let inner = nested.classifier(&session, &name("Inner")).expect("lookup").expect("inner");
    assert_eq!(inner.class_id.as_string(), "pkg/Outer.Inner");
    assert!(nested.classifier(&session, &name("Missing")).expect("lookup").is_none());

    let scope = session.use_site_member_scope(&outer).expect("scope");
    assert_eq!(scope.classifier_names(), [name("Inner")]);
}
