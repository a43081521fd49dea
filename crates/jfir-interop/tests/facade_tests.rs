use super::*;
use crate::test_support::*;
use jfir_model::{
    ForeignAnnotation, ForeignAnnotationValue, ForeignLiteral, ForeignTypeParameter, InMemoryClassFinder, PrimitiveKind,
    TypeParameterKey,
};

fn int() -> ForeignType {
    ForeignType::primitive(PrimitiveKind::Int)
}

fn string() -> ForeignType {
    ForeignType::class(standard::JAVA_STRING)
}

fn constructor_parameters(constructor: &JavaConstructor) -> Vec<String> {
    constructor
        .value_parameters
        .iter()
        .map(|parameter| {
            let vararg = if parameter.is_vararg { "vararg " } else { "" };
            format!("{vararg}{}", parameter.name)
        })
        .collect()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn test_find_class_skips_kotlin_classes() {
    let session = session_with(vec![
        ForeignClass::new("pkg/K", ForeignClassKind::Class)
            .with_annotation(ForeignAnnotation::new("kotlin/Metadata")),
        ForeignClass::new("pkg/J", ForeignClassKind::Class),
    ]);
    let facade = session.facade();

    assert!(facade.find_class(&session, &ClassId::from_string("pkg/K"), None).is_none());
    assert!(facade.find_class(&session, &ClassId::from_string("pkg/J"), None).is_some());
    assert!(session.java_class(&ClassId::from_string("pkg/K")).expect("lookup").is_none());
}

#[test]
fn test_top_level_check_uses_package_contents() {
    let session = session_with(vec![ForeignClass::new("pkg/A", ForeignClassKind::Class)]);
    let facade = session.facade();

    assert!(facade.has_top_level_class_of(&session, &ClassId::from_string("pkg/A")));
    assert!(facade.has_top_level_class_of(&session, &ClassId::from_string("pkg/A.Nested")));
    assert!(!facade.has_top_level_class_of(&session, &ClassId::from_string("pkg/B")));
    assert!(facade.has_package(&session, &FqName::new("pkg")));
    assert!(!facade.has_package(&session, &FqName::new("other")));
}

#[test]
fn test_top_level_check_without_enumeration() {
    let finder = InMemoryClassFinder::from_classes(vec![ForeignClass::new("pkg/A", ForeignClassKind::Class)])
        .without_enumeration();
    let session = InteropSession::new(Arc::new(finder));

    assert!(session.facade().has_top_level_class_of(&session, &ClassId::from_string("pkg/Anything")));
    assert!(session.java_class(&ClassId::from_string("pkg/Anything")).expect("lookup").is_none());
    assert!(session.java_class(&ClassId::from_string("pkg/A")).expect("lookup").is_some());
}

#[test]
fn test_create_class_rejects_mismatched_parent() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Outer", ForeignClassKind::Class).with_inner_class("Inner"),
        ForeignClass::new("pkg/Outer.Inner", ForeignClassKind::Class),
    ]);
    let inner_id = ClassId::from_string("pkg/Outer.Inner");
    let foreign = session.facade().find_class(&session, &inner_id, None).expect("foreign class");
    let symbol = session.class_symbol(&inner_id);

    let error = session
        .facade()
        .create_class(&session, &symbol, None, foreign)
        .expect_err("a nested class needs its parent");
    assert!(matches!(error, InteropError::KindMismatch { .. }));
    assert!(!session.symbols().is_bound(&symbol));
}

#[test]
fn test_second_round_bounds_replace_the_whole_list() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Marked", ForeignClassKind::Class)
            .with_annotation(ForeignAnnotation::new("org/jspecify/annotations/NullMarked"))
            .with_type_parameter(ForeignTypeParameter::new("pkg/Marked", "T").with_bound(string())),
    ]);
    let class_id = ClassId::from_string("pkg/Marked");
    let foreign = session.facade().find_class(&session, &class_id, None).expect("foreign class");
    let symbol = session.class_symbol(&class_id);
    let class = session
        .facade()
        .create_class(&session, &symbol, None, foreign)
        .expect("created");

    let first_round = class.type_parameters();
    assert_eq!(first_round[0].symbol().name().to_string(), "T");
    let TypeParameterRef::Own(first) = &first_round[0] else {
        panic!("class parameter must be own");
    };
    assert_eq!(first.resolved_bounds()[0].to_string(), "kotlin/String!");

    session.facade().complete_class(&session, &class).expect("completed");

    let second_round = class.type_parameters();
    assert!(!Arc::ptr_eq(&first_round, &second_round));
    assert_eq!(second_round.len(), 1);
    assert_eq!(second_round[0].symbol(), first_round[0].symbol());
    assert_eq!(class.own_type_parameters()[0].resolved_bounds()[0].to_string(), "kotlin/String");
    // A list taken before completion keeps its own bounds.
    assert_eq!(first.resolved_bounds()[0].to_string(), "kotlin/String!");
}

// =============================================================================
// Class status
// =============================================================================

#[test]
fn test_class_kinds_and_modality() {
    let mut abstract_class = ForeignClass::new("pkg/Base", ForeignClassKind::Class);
    abstract_class.is_abstract = true;
    let session = session_with(vec![
        abstract_class,
        ForeignClass::new("pkg/I", ForeignClassKind::Interface),
        ForeignClass::new("pkg/E", ForeignClassKind::Enum),
        ForeignClass::new("pkg/Ann", ForeignClassKind::Annotation),
    ]);

    let base = java_class(&session, "pkg/Base");
    assert_eq!(base.kind, ClassKind::Class);
    assert_eq!(base.status().modality, Modality::Abstract);

    let interface = java_class(&session, "pkg/I");
    assert_eq!(interface.kind, ClassKind::Interface);
    assert!(interface.status().is_fun());

    let enum_class = java_class(&session, "pkg/E");
    assert_eq!(enum_class.kind, ClassKind::EnumClass);
    assert_eq!(enum_class.status().modality, Modality::Final);

    let annotation = java_class(&session, "pkg/Ann");
    assert_eq!(annotation.kind, ClassKind::AnnotationClass);
    assert_eq!(annotation.status().modality, Modality::Final);
}

#[test]
fn test_java_visibility_mapping() {
    assert_eq!(java_visibility(ForeignVisibility::Public, false), Visibility::Public);
    assert_eq!(java_visibility(ForeignVisibility::Protected, false), Visibility::ProtectedAndPackage);
    assert_eq!(java_visibility(ForeignVisibility::Protected, true), Visibility::ProtectedStatic);
    assert_eq!(java_visibility(ForeignVisibility::PackagePrivate, false), Visibility::PackagePrivate);
    assert_eq!(java_visibility(ForeignVisibility::Private, true), Visibility::Private);
}

#[test]
fn test_effective_visibility_of_nested_classes() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Outer", ForeignClassKind::Class)
            .with_visibility(ForeignVisibility::PackagePrivate)
            .with_inner_class("Open")
            .with_inner_class("Hidden"),
        ForeignClass::new("pkg/Outer.Open", ForeignClassKind::Class).make_static(),
        ForeignClass::new("pkg/Outer.Hidden", ForeignClassKind::Class)
            .with_visibility(ForeignVisibility::Private)
            .make_static(),
        ForeignClass::new("pkg/Public", ForeignClassKind::Class).with_inner_class("Guarded"),
        ForeignClass::new("pkg/Public.Guarded", ForeignClassKind::Class)
            .with_visibility(ForeignVisibility::Protected)
            .make_static(),
    ]);

    let outer = java_class(&session, "pkg/Outer");
    assert_eq!(outer.status().effective_visibility, EffectiveVisibility::PackagePrivate);

    // A public class nested in a package-private one is package-private.
    let open = java_class(&session, "pkg/Outer.Open");
    assert_eq!(open.status().visibility, Visibility::Public);
    assert_eq!(open.status().effective_visibility, EffectiveVisibility::PackagePrivate);

    let hidden = java_class(&session, "pkg/Outer.Hidden");
    assert_eq!(hidden.status().effective_visibility, EffectiveVisibility::PrivateInClass);

    let guarded = java_class(&session, "pkg/Public.Guarded");
    assert_eq!(
        guarded.status().effective_visibility,
        EffectiveVisibility::Protected(ClassId::from_string("pkg/Public"))
    );
}

#[test]
fn test_nested_class_requested_first_still_sees_parent() {
    let key = TypeParameterKey::new("pkg/Outer", "T");
    let session = session_with(vec![
        ForeignClass::new("pkg/Outer", ForeignClassKind::Class)
            .with_type_parameter(ForeignTypeParameter::new("pkg/Outer", "T"))
            .with_inner_class("Inner"),
        ForeignClass::new("pkg/Outer.Inner", ForeignClassKind::Class)
            .with_field(ForeignField::new("value", ForeignType::type_parameter(&key))),
    ]);

    let inner = java_class(&session, "pkg/Outer.Inner");

    assert!(session.provider().is_completed(&ClassId::from_string("pkg/Outer")));
    assert_eq!(inner.type_parameters().len(), 1);
    let field = inner.fields().next().expect("field");
    let converted = field
        .return_type
        .resolve(&TypeConverter::new(&inner.stack, &session, ConversionMode::Default))
        .expect("outer parameter is on the stack");
    assert!(converted.type_parameter_symbol().is_some());
}

// =============================================================================
// Supertypes
// =============================================================================

#[test]
fn test_supertype_fallbacks() {
    let session = session_with(vec![
        ForeignClass::new("pkg/C", ForeignClassKind::Class),
        ForeignClass::new("pkg/E", ForeignClassKind::Enum),
        ForeignClass::new("pkg/Ann", ForeignClassKind::Annotation),
        ForeignClass::new("pkg/R", ForeignClassKind::Record),
    ]);

    let supertypes = |class_id: &str| -> Vec<String> {
        java_class(&session, class_id)
            .supertypes(&session)
            .iter()
            .map(ToString::to_string)
            .collect()
    };
    assert_eq!(supertypes("pkg/C"), ["kotlin/Any"]);
    assert_eq!(supertypes("pkg/E"), ["kotlin/Enum<pkg/E>"]);
    assert_eq!(supertypes("pkg/Ann"), ["kotlin/Annotation"]);
    assert_eq!(supertypes("pkg/R"), ["java/lang/Record"]);
}

#[test]
fn test_declared_supertypes_are_collapsed() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Base", ForeignClassKind::Class),
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_supertype(ForeignType::class("pkg/Base"))
            .with_supertype(ForeignType::class_with_args("java/lang/Comparable", vec![ForeignType::class("pkg/A")])),
    ]);
    let class = java_class(&session, "pkg/A");

    let supertypes: Vec<String> = class.supertypes(&session).iter().map(ToString::to_string).collect();
    assert_eq!(supertypes, ["pkg/Base", "kotlin/Comparable<pkg/A!>"]);
}

// =============================================================================
// Constructors
// =============================================================================

#[test]
fn test_default_constructor_only_for_plain_classes() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Plain", ForeignClassKind::Class).with_default_constructor(),
        ForeignClass::new("pkg/Declared", ForeignClassKind::Class)
            .with_default_constructor()
            .with_constructor(ForeignConstructor::default().with_parameter(ForeignValueParameter::new("x", int()))),
        ForeignClass::new("pkg/NoDefault", ForeignClassKind::Class),
        ForeignClass::new("pkg/I", ForeignClassKind::Interface).with_default_constructor(),
    ]);

    let plain = java_class(&session, "pkg/Plain");
    let constructors: Vec<_> = plain.constructors().collect();
    assert_eq!(constructors.len(), 1);
    assert_eq!(constructors[0].origin, ConstructorOrigin::Default);
    assert!(constructors[0].is_primary);
    assert!(constructors[0].value_parameters.is_empty());
    assert_eq!(constructors[0].status().visibility, Visibility::Public);

    let declared = java_class(&session, "pkg/Declared");
    let constructors: Vec<_> = declared.constructors().collect();
    assert_eq!(constructors.len(), 1);
    assert_eq!(constructors[0].origin, ConstructorOrigin::Declared);
    assert!(!constructors[0].is_primary);

    assert_eq!(java_class(&session, "pkg/NoDefault").constructors().count(), 0);
    assert_eq!(java_class(&session, "pkg/I").constructors().count(), 0);
}

#[test]
fn test_constructors_carry_class_type_parameters() {
    let t = TypeParameterKey::new("pkg/Box", "T");
    let session = session_with(vec![
        ForeignClass::new("pkg/Box", ForeignClassKind::Class)
            .with_type_parameter(ForeignTypeParameter::new("pkg/Box", "T"))
            .with_default_constructor(),
        ForeignClass::new("pkg/Pair", ForeignClassKind::Class)
            .with_type_parameter(ForeignTypeParameter::new("pkg/Pair", "T"))
            .with_constructor(
                ForeignConstructor::default()
                    .with_type_parameter(ForeignTypeParameter::new("pkg/Pair#<init>(1)", "S"))
                    .with_parameter(ForeignValueParameter::new("first", ForeignType::type_parameter(&t))),
            ),
    ]);

    let class = java_class(&session, "pkg/Box");
    let class_t = class.type_parameters()[0].symbol().clone();
    let constructor = class.constructors().next().expect("default constructor");
    assert_eq!(constructor.type_parameters.len(), 1);
    assert!(!constructor.type_parameters[0].is_own());
    assert_eq!(constructor.type_parameters[0].symbol(), &class_t);
    assert!(constructor.own_type_parameters().is_empty());

    let enhanced = session
        .enhancement()
        .enhance_constructor(&session, &class, constructor)
        .expect("constructor");
    assert_eq!(enhanced.type_parameters.len(), 1);
    assert_eq!(enhanced.type_parameters[0].symbol, class_t);
    assert_eq!(enhanced.type_parameters[0].bounds, class.own_type_parameters()[0].resolved_bounds());
    assert!(enhanced.to_string().starts_with("constructor<T : "));

    // Class parameters come first, then the constructor's own.
    let pair = java_class(&session, "pkg/Pair");
    let constructor = pair.constructors().next().expect("declared constructor");
    let names: Vec<String> = constructor
        .type_parameters
        .iter()
        .map(|parameter| parameter.symbol().name().to_string())
        .collect();
    assert_eq!(names, ["T", "S"]);
    assert_eq!(constructor.own_type_parameters().len(), 1);
}

#[test]
fn test_default_constructor_follows_class_visibility() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Hidden", ForeignClassKind::Class)
            .with_visibility(ForeignVisibility::PackagePrivate)
            .with_default_constructor(),
    ]);
    let class = java_class(&session, "pkg/Hidden");
    let constructor = class.constructors().next().expect("default constructor");
    assert_eq!(constructor.status().visibility, Visibility::PackagePrivate);
}

#[test]
fn test_unnamed_parameters_are_numbered() {
    let mut parameter = ForeignValueParameter::new("ignored", int());
    parameter.name = None;
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class).with_method(
            ForeignMethod::new("f", int())
                .with_parameter(ForeignValueParameter::new("first", int()))
                .with_parameter(parameter),
        ),
    ]);
    let class = java_class(&session, "pkg/A");
    let method = class.methods().next().expect("method");
    let names: Vec<String> = method.value_parameters.iter().map(|parameter| parameter.name.to_string()).collect();
    assert_eq!(names, ["first", "p1"]);
}

// =============================================================================
// Enums, annotations and records
// =============================================================================

#[test]
fn test_enum_synthetic_members() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Color", ForeignClassKind::Enum)
            .with_field(ForeignField::enum_entry("RED", "pkg/Color"))
            .with_field(ForeignField::enum_entry("GREEN", "pkg/Color")),
    ]);
    let class = java_class(&session, "pkg/Color");

    let values = class.methods_named("values").next().expect("values");
    assert_eq!(values.origin, MethodOrigin::EnumValues);
    assert!(values.is_static);
    assert!(values.value_parameters.is_empty());

    let value_of = class.methods_named("valueOf").next().expect("valueOf");
    assert_eq!(value_of.origin, MethodOrigin::EnumValueOf);
    assert_eq!(value_of.value_parameters.len(), 1);
    assert_eq!(value_of.value_parameters[0].name.as_str(), "value");

    let entries = class.synthetic_properties().next().expect("entries");
    assert_eq!(entries.name.as_str(), "entries");
    assert!(entries.is_static);

    let red = class.enum_entry(&name("RED")).expect("RED");
    assert!(red.status().is_static());
}

#[test]
fn test_annotation_constructor_puts_value_first() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Ann", ForeignClassKind::Annotation)
            .with_method(ForeignMethod::new("level", int()))
            .with_method(ForeignMethod::new("value", ForeignType::array(string())))
            .with_method(ForeignMethod::new("note", string())),
    ]);
    let class = java_class(&session, "pkg/Ann");

    let constructor = class
        .constructors()
        .find(|constructor| constructor.origin == ConstructorOrigin::Annotation)
        .expect("annotation constructor");
    assert!(constructor.is_primary);
    assert_eq!(constructor_parameters(constructor), ["vararg value", "level", "note"]);
    // Annotation members stay visible as methods.
    assert_eq!(class.methods().count(), 3);
}

#[test]
fn test_array_parameter_not_named_value_is_not_vararg() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Ann", ForeignClassKind::Annotation)
            .with_method(ForeignMethod::new("names", ForeignType::array(string()))),
    ]);
    let class = java_class(&session, "pkg/Ann");
    let constructor = class.constructors().next().expect("annotation constructor");
    assert_eq!(constructor_parameters(constructor), ["names"]);
}

#[test]
fn test_annotation_defaults_are_deferred() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Ann", ForeignClassKind::Annotation).with_method(
            ForeignMethod::new("level", int()).with_default(ForeignAnnotationValue::literal(ForeignLiteral::Int(3))),
        ),
    ]);
    let class = java_class(&session, "pkg/Ann");
    let constructor = class.constructors().next().expect("annotation constructor");
    let parameter = &constructor.value_parameters[0];

    assert!(parameter.has_default_value());
    let default = parameter.default_value.as_ref().expect("default");
    assert!(!default.is_computed());
    let value = default.get(&session).as_ref().expect("evaluated default");
    assert_eq!(value.to_string(), "3");
}

#[test]
fn test_self_referential_annotation_default_is_not_forced() {
    let nested = ForeignAnnotation::new("pkg/Self")
        .with_argument(Some("level"), ForeignAnnotationValue::literal(ForeignLiteral::Int(2)));
    let session = session_with(vec![
        ForeignClass::new("pkg/Self", ForeignClassKind::Annotation)
            .with_method(
                ForeignMethod::new("value", ForeignType::array(ForeignType::class("pkg/Self"))).with_default(
                    ForeignAnnotationValue::Array {
                        elements: vec![ForeignAnnotationValue::Annotation { annotation: nested }],
                    },
                ),
            )
            .with_method(
                ForeignMethod::new("level", int()).with_default(ForeignAnnotationValue::literal(ForeignLiteral::Int(1))),
            ),
    ]);
    let class = java_class(&session, "pkg/Self");
    let constructor = class
        .constructors()
        .find(|constructor| constructor.origin == ConstructorOrigin::Annotation)
        .expect("annotation constructor");
    assert_eq!(constructor_parameters(constructor), ["vararg value", "level"]);

    let default = constructor.value_parameters[0].default_value.as_ref().expect("default");
    assert!(!default.is_computed());
    assert_eq!(class.phase(), ResolvePhase::Completed);

    let value = default.get(&session).as_ref().expect("evaluated default").to_string();
    assert!(value.starts_with("[@pkg/Self("), "{value}");
    assert!(value.contains("level = 2"), "{value}");
}

#[test]
fn test_source_record_members() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Point", ForeignClassKind::Record)
            .with_record_component("x", int())
            .with_record_component("y", int())
            .with_method(ForeignMethod::new("x", int())),
    ]);
    let class = java_class(&session, "pkg/Point");

    assert!(class.is_java_record);
    assert!(class.status().flags.contains(StatusFlags::JAVA_RECORD));
    // The declared accessor is kept; only the missing one is synthesized.
    let x: Vec<_> = class.methods_named("x").collect();
    assert_eq!(x.len(), 1);
    assert_eq!(x[0].origin, MethodOrigin::Declared);
    assert!(x[0].is_record_component());
    let y = class.methods_named("y").next().expect("y");
    assert_eq!(y.origin, MethodOrigin::RecordComponent);

    let canonical = class
        .constructors()
        .find(|constructor| constructor.origin == ConstructorOrigin::Record)
        .expect("canonical constructor");
    assert_eq!(constructor_parameters(canonical), ["x", "y"]);
}

#[test]
fn test_binary_record_gets_no_synthetic_members() {
    let mut record = ForeignClass::new("pkg/Point", ForeignClassKind::Record).with_record_component("x", int());
    record.is_from_source = false;
    let session = session_with(vec![record]);
    let class = java_class(&session, "pkg/Point");

    assert_eq!(class.methods().count(), 0);
    assert_eq!(class.constructors().count(), 0);
}

#[test]
fn test_interfaces_skip_object_methods() {
    let session = session_with(vec![
        ForeignClass::new("pkg/I", ForeignClassKind::Interface)
            .with_method(ForeignMethod::new("hashCode", int()))
            .with_method(ForeignMethod::new("size", int())),
    ]);
    let class = java_class(&session, "pkg/I");
    let names: Vec<String> = class.methods().map(|method| method.name.to_string()).collect();
    assert_eq!(names, ["size"]);
}

// =============================================================================
// Sealed classes
// =============================================================================

#[test]
fn test_sealed_inheritors_follow_permitted_types() {
    let session = session_with(vec![
        ForeignClass::new("pkg/Shape", ForeignClassKind::Interface)
            .make_sealed()
            .with_permitted(ForeignType::class("pkg/Circle"))
            .with_permitted(ForeignType::class(standard::JAVA_STRING))
            .with_permitted(ForeignType::primitive(PrimitiveKind::Int)),
        ForeignClass::new("pkg/Circle", ForeignClassKind::Class).with_supertype(ForeignType::class("pkg/Shape")),
        ForeignClass::new("pkg/Open", ForeignClassKind::Class).with_permitted(ForeignType::class("pkg/Circle")),
    ]);

    let shape = java_class(&session, "pkg/Shape");
    assert_eq!(shape.status().modality, Modality::Sealed);
    let inheritors: Vec<String> = shape.sealed_inheritors().iter().map(ToString::to_string).collect();
    assert_eq!(inheritors, ["pkg/Circle", "kotlin/String"]);

    // Only sealed classes record inheritors.
    assert!(java_class(&session, "pkg/Open").sealed_inheritors().is_empty());
}

// =============================================================================
// Constants and annotations
// =============================================================================

#[test]
fn test_constant_fields_evaluate_lazily() {
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class)
            .with_field(ForeignField::constant("MAX", int(), ForeignLiteral::Int(10)))
            .with_field(ForeignField::new("plain", int())),
    ]);
    let class = java_class(&session, "pkg/A");
    let mut fields = class.fields();

    let max = fields.next().expect("MAX");
    assert!(max.is_final());
    assert!(!max.constant.is_computed());
    assert_eq!(max.constant.get(&session).as_ref().map(ToString::to_string).as_deref(), Some("10"));

    let plain = fields.next().expect("plain");
    assert!(plain.is_var);
    assert!(plain.constant.get(&session).is_none());
}

#[test]
fn test_class_annotations_are_translated_on_demand() {
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class).with_annotation(ForeignAnnotation::new(standard::JAVA_DEPRECATED)),
    ]);
    let class = java_class(&session, "pkg/A");

    assert!(!class.annotations.is_computed());
    let annotations = class.annotations.get(&session);
    assert_eq!(annotations.len(), 1);
    assert!(annotations[0].is(standard::DEPRECATED));
}

#[test]
fn test_member_effective_visibility_is_relative_to_class() {
    let mut method = ForeignMethod::new("hook", int());
    method.visibility = ForeignVisibility::Protected;
    let session = session_with(vec![ForeignClass::new("pkg/A", ForeignClassKind::Class).with_method(method)]);
    let class = java_class(&session, "pkg/A");

    let hook = class.methods().next().expect("hook");
    assert_eq!(hook.status().visibility, Visibility::ProtectedAndPackage);
    assert_eq!(hook.status().effective_visibility, EffectiveVisibility::Protected(class.class_id.clone()));
}
