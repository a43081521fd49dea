use super::*;
use crate::types::{PrimitiveKind, TypeParameterKey};

#[test]
fn test_object_methods_are_detected_only_in_interfaces() {
    let equals = ForeignMethod::new("equals", ForeignType::primitive(PrimitiveKind::Boolean))
        .with_parameter(ForeignValueParameter::new("other", ForeignType::class("java/lang/Object")));
    let hash_code = ForeignMethod::new("hashCode", ForeignType::primitive(PrimitiveKind::Int));
    let overload = ForeignMethod::new("equals", ForeignType::primitive(PrimitiveKind::Boolean))
        .with_parameter(ForeignValueParameter::new("other", ForeignType::class("java/lang/String")));

    assert!(equals.is_object_method_in_interface(ForeignClassKind::Interface));
    assert!(hash_code.is_object_method_in_interface(ForeignClassKind::Interface));
    assert!(!overload.is_object_method_in_interface(ForeignClassKind::Interface));
    assert!(!equals.is_object_method_in_interface(ForeignClassKind::Class));
}

#[test]
fn test_modality_follows_kind_and_flags() {
    assert_eq!(ForeignClass::new("p/A", ForeignClassKind::Class).modality(), Modality::Open);
    assert_eq!(ForeignClass::new("p/I", ForeignClassKind::Interface).modality(), Modality::Abstract);
    assert_eq!(ForeignClass::new("p/E", ForeignClassKind::Enum).modality(), Modality::Final);
    assert_eq!(ForeignClass::new("p/R", ForeignClassKind::Record).modality(), Modality::Final);
    assert_eq!(
        ForeignClass::new("p/S", ForeignClassKind::Class).make_sealed().modality(),
        Modality::Sealed
    );
}

#[test]
fn test_metadata_annotation_detection() {
    let kotlin_class = ForeignClass::new("p/K", ForeignClassKind::Class)
        .with_annotation(ForeignAnnotation::new(METADATA_CLASS_ID));
    let java_class = ForeignClass::new("p/J", ForeignClassKind::Class);
    assert!(kotlin_class.has_metadata_annotation());
    assert!(!java_class.has_metadata_annotation());
}

#[test]
fn test_nested_class_identity() {
    let nested = ForeignClass::new("p/Outer.Inner", ForeignClassKind::Class);
    assert!(!nested.is_top_level());
    assert_eq!(nested.name().as_str(), "Inner");
    assert_eq!(nested.outer_class_id(), Some(ClassId::from_string("p/Outer")));
}

#[test]
fn test_class_deserializes_from_json() {
    let json = r#"{
        "classId": "p/Box",
        "kind": "class",
        "typeParameters": [{ "key": { "owner": "p/Box", "name": "T" } }],
        "methods": [{
            "name": "get",
            "returnType": { "kind": "classifier", "classifier": { "kind": "typeParameter", "key": { "owner": "p/Box", "name": "T" } } }
        }],
        "fields": [{ "name": "SIZE", "type": { "kind": "primitive", "primitive": "int" }, "isStatic": true, "isFinal": true, "initializer": { "int": 3 } }]
    }"#;
    let class: ForeignClass = serde_json::from_str(json).unwrap();
    assert_eq!(class.class_id, ClassId::from_string("p/Box"));
    assert!(class.is_from_source);
    assert_eq!(class.type_parameters[0].key, TypeParameterKey::new("p/Box", "T"));
    assert_eq!(
        class.methods[0].return_type,
        ForeignType::type_parameter(&TypeParameterKey::new("p/Box", "T"))
    );
    assert_eq!(class.fields[0].initializer, Some(ForeignLiteral::Int(3)));
}
