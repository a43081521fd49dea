use super::*;
use crate::test_support::TestLookup;
use jfir_common::InteropError;
use jfir_model::TypeParameterKey;

fn convert_in(lookup: &TestLookup, stack: &TypeParameterStack, mode: ConversionMode, ty: &ForeignType) -> ConeType {
    TypeConverter::new(stack, lookup, mode).convert(ty).unwrap()
}

fn convert(ty: &ForeignType) -> ConeType {
    convert_in(&TestLookup::new(), &TypeParameterStack::new(), ConversionMode::Default, ty)
}

fn string() -> ForeignType {
    ForeignType::class("java/lang/String")
}

#[test]
fn test_class_type_is_flexible() {
    let ty = convert(&string());
    assert_eq!(ty.lower_bound(), &ConeType::string());
    assert_eq!(ty.upper_bound(), &ConeType::string().with_nullability(true));
    assert_eq!(ty.to_string(), "kotlin/String!");
}

#[test]
fn test_primitives_are_not_flexible() {
    assert_eq!(convert(&ForeignType::primitive(PrimitiveKind::Int)), ConeType::simple(standard::INT));
    assert_eq!(convert(&ForeignType::primitive(PrimitiveKind::Void)), ConeType::unit());
}

#[test]
fn test_flexible_bounds_share_erasure() {
    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let types = [
        string(),
        ForeignType::class("java/lang/Object"),
        ForeignType::class_with_args("java/util/List", vec![string()]),
        ForeignType::class_with_args(
            "java/util/Map",
            vec![string(), ForeignType::extends(ForeignType::class("java/lang/Number"))],
        ),
        ForeignType::class_with_args("java/util/List", vec![ForeignType::super_of(ForeignType::class("java/lang/Integer"))]),
        ForeignType::class_with_args("java/lang/Comparable", vec![ForeignType::star()]),
        ForeignType::class_with_args("java/util/ArrayList", vec![string()]),
        ForeignType::array(string()),
        ForeignType::array(ForeignType::primitive(PrimitiveKind::Long)),
    ];
    for mode in [
        ConversionMode::Default,
        ConversionMode::TypeParameterBoundFirstRound,
        ConversionMode::TypeParameterBoundAfterFirstRound,
    ] {
        for ty in &types {
            let converted = convert_in(&lookup, &stack, mode, ty);
            assert!(!converted.is_raw(), "{ty} converted to raw");
            assert_eq!(
                converted.lower_bound().class_id(),
                converted.upper_bound().class_id(),
                "erasure mismatch for {ty} in {mode:?}: {converted}"
            );
        }
    }
}

#[test]
fn test_raw_list_uses_erased_bound_below_and_star_above() {
    let converted = convert(&ForeignType::raw("java/util/List"));
    let mutable_list = ClassId::from_string(standard::MUTABLE_LIST);
    assert!(converted.is_raw());
    assert_eq!(
        converted.lower_bound(),
        &ConeType::class(
            mutable_list.clone(),
            vec![TypeProjection::invariant(ConeType::nullable_any())],
            false
        )
    );
    assert_eq!(
        converted.upper_bound(),
        &ConeType::class(mutable_list, vec![TypeProjection::Star], true)
    );
}

#[test]
fn test_raw_type_in_first_round_uses_stars_without_lookup() {
    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let converted = convert_in(
        &lookup,
        &stack,
        ConversionMode::TypeParameterBoundFirstRound,
        &ForeignType::raw("java/util/Map"),
    );
    assert_eq!(
        converted.to_string(),
        "raw (kotlin/collections/MutableMap<*, *>..kotlin/collections/MutableMap<*, *>?)"
    );
    assert_eq!(lookup.resolving_queries(), 0);
}

#[test]
fn test_generic_class_without_arguments_is_raw() {
    let mut lookup = TestLookup::new();
    lookup.add_class("p/Box", &["T"]);
    let stack = TypeParameterStack::new();
    let converted = convert_in(&lookup, &stack, ConversionMode::Default, &ForeignType::class("p/Box"));
    assert!(converted.is_raw());
    assert_eq!(converted.upper_bound().arguments(), &[TypeProjection::Star]);
}

#[test]
fn test_super_wildcard_selects_mutable_collection() {
    for mode in [ConversionMode::Default, ConversionMode::TypeParameterBoundFirstRound] {
        let lookup = TestLookup::new();
        let stack = TypeParameterStack::new();
        let ty = ForeignType::class_with_args("java/util/List", vec![ForeignType::super_of(string())]);
        let converted = convert_in(&lookup, &stack, mode, &ty);
        assert_eq!(
            converted.lower_bound().class_id(),
            Some(&ClassId::from_string(standard::MUTABLE_LIST))
        );
        assert_eq!(converted.arguments()[0].variance(), Some(Variance::In));
        assert_eq!(
            converted.to_string(),
            "kotlin/collections/MutableList<in kotlin/String!>!"
        );
    }
}

#[test]
fn test_extends_wildcard_on_covariant_parameter_is_redundant() {
    let ty = ForeignType::class_with_args("java/util/List", vec![ForeignType::extends(string())]);
    assert_eq!(convert(&ty).to_string(), "kotlin/collections/List<kotlin/String!>!");

    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let first_round = convert_in(&lookup, &stack, ConversionMode::TypeParameterBoundFirstRound, &ty);
    assert_eq!(first_round.to_string(), "kotlin/collections/List<out kotlin/String!>!");
}

#[test]
fn test_conflicting_wildcard_becomes_star() {
    let ty = ForeignType::class_with_args("java/lang/Comparable", vec![ForeignType::extends(string())]);
    assert_eq!(convert(&ty).arguments(), &[TypeProjection::Star]);
}

#[test]
fn test_unbounded_wildcard_and_missing_argument_are_stars() {
    let ty = ForeignType::class_with_args("java/util/List", vec![ForeignType::star()]);
    assert_eq!(convert(&ty).arguments(), &[TypeProjection::Star]);

    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let converter = TypeConverter::new(&stack, &lookup, ConversionMode::Default);
    assert_eq!(converter.convert_projection(None, None), Ok(TypeProjection::Star));
}

#[test]
fn test_wildcard_annotations_travel_as_attributes() {
    let nullable = jfir_model::ForeignAnnotation::new("org/jetbrains/annotations/Nullable");
    let wildcard = ForeignType::extends(ForeignType::class("java/lang/Number")).annotated(nullable);
    let ty = ForeignType::class_with_args("java/util/ArrayList", vec![wildcard]);
    let converted = convert(&ty);
    let argument = converted.arguments()[0].ty().unwrap();
    let attributes = argument.attributes().unwrap();
    assert_eq!(
        attributes.wildcard_annotations.as_slice(),
        &[ClassId::from_string("org/jetbrains/annotations/Nullable")]
    );
    assert!(attributes.type_use_annotations.is_empty());
}

#[test]
fn test_type_parameter_is_definitely_not_null_below() {
    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let key = TypeParameterKey::new("p/Box", "T");
    let symbol = lookup.allocator.type_parameter_symbol(jfir_common::Name::new("T"));
    stack.add_parameter(&key, symbol.clone());

    let converted = convert_in(&lookup, &stack, ConversionMode::Default, &ForeignType::type_parameter(&key));
    assert_eq!(
        converted.lower_bound(),
        &ConeType::DefinitelyNotNull(Box::new(ConeType::type_parameter(symbol.clone(), false)))
    );
    assert_eq!(converted.upper_bound(), &ConeType::type_parameter(symbol, true));
    assert_eq!(lookup.resolving_queries(), 0);
}

#[test]
fn test_unknown_type_parameter_is_an_error() {
    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let key = TypeParameterKey::new("p/Box", "T");
    let converter = TypeConverter::new(&stack, &lookup, ConversionMode::Default);
    assert_eq!(
        converter.convert(&ForeignType::type_parameter(&key)),
        Err(InteropError::UnknownTypeParameter {
            parameter: "T@p/Box".to_string()
        })
    );
}

#[test]
fn test_arrays() {
    assert_eq!(
        convert(&ForeignType::array(ForeignType::primitive(PrimitiveKind::Int))).to_string(),
        "kotlin/IntArray!"
    );
    assert_eq!(
        convert(&ForeignType::array(string())).to_string(),
        "(kotlin/Array<kotlin/String!>..kotlin/Array<out kotlin/String!>?)"
    );

    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let annotation_member = convert_in(
        &lookup,
        &stack,
        ConversionMode::AnnotationMember,
        &ForeignType::array(string()),
    );
    assert_eq!(annotation_member.to_string(), "kotlin/Array<kotlin/String>");
}

#[test]
fn test_annotation_member_maps_class_to_kclass() {
    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let ty = ForeignType::class_with_args("java/lang/Class", vec![ForeignType::star()]);
    let converted = convert_in(&lookup, &stack, ConversionMode::AnnotationMember, &ty);
    assert_eq!(converted.to_string(), "kotlin/reflect/KClass<*>");
    assert_eq!(convert(&ty).to_string(), "java/lang/Class<*>!");
}

#[test]
fn test_supertype_mode_collapses_only_the_top_level() {
    let lookup = TestLookup::new();
    let stack = TypeParameterStack::new();
    let ty = ForeignType::class_with_args("java/util/List", vec![string()]);
    let converted = convert_in(&lookup, &stack, ConversionMode::Supertype, &ty);
    assert!(!converted.is_flexible());
    assert_eq!(converted.to_string(), "kotlin/collections/List<kotlin/String!>");
}

#[test]
fn test_unrecognized_nodes_become_error_types() {
    let unknown = convert(&ForeignType::Unknown {
        description: "intersection".to_string(),
    });
    assert!(unknown.is_error());

    let list = convert(&ForeignType::class_with_args(
        "java/util/List",
        vec![ForeignType::unresolved("Missing")],
    ));
    assert!(!list.is_error());
    assert!(list.contains_error());
}

#[test]
fn test_type_use_annotations_are_recorded() {
    let not_null = jfir_model::ForeignAnnotation::new("org/jetbrains/annotations/NotNull");
    let converted = convert(&string().annotated(not_null));
    assert!(
        converted
            .attributes()
            .unwrap()
            .has_annotation(&ClassId::from_string("org/jetbrains/annotations/NotNull"))
    );
}
