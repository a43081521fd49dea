use super::*;

#[test]
fn test_class_id_from_string_nested() {
    let id = ClassId::from_string("java/util/Map.Entry");
    assert_eq!(id.package_fq_name().as_str(), "java.util");
    assert_eq!(id.relative_class_name().as_str(), "Map.Entry");
    assert_eq!(id.short_class_name().as_str(), "Entry");
    assert!(id.is_nested());
    assert_eq!(id.as_string(), "java/util/Map.Entry");
    assert_eq!(id.as_fq_name().as_str(), "java.util.Map.Entry");
}

#[test]
fn test_class_id_outer_and_nested() {
    let outer = ClassId::from_string("a/b/Outer");
    let inner = outer.create_nested(&Name::new("Inner"));
    assert_eq!(inner.as_string(), "a/b/Outer.Inner");
    assert_eq!(inner.outer_class_id(), Some(outer.clone()));
    assert_eq!(outer.outer_class_id(), None);
    assert_eq!(inner.create_nested(&Name::new("Deep")).outermost_class_id(), outer);
}

#[test]
fn test_class_id_in_root_package() {
    let id = ClassId::from_string("Foo");
    assert!(id.package_fq_name().is_root());
    assert_eq!(id.as_string(), "Foo");
    assert_eq!(id.as_fq_name().as_str(), "Foo");
}

#[test]
fn test_fq_name_parent_and_child() {
    let fq = FqName::new("java.util.List");
    assert_eq!(fq.parent(), Some(FqName::new("java.util")));
    assert_eq!(fq.short_name().as_str(), "List");
    assert_eq!(FqName::new("java").parent(), Some(FqName::root()));
    assert_eq!(FqName::root().parent(), None);
    assert_eq!(FqName::root().child(&Name::new("kotlin")).as_str(), "kotlin");
    assert_eq!(fq.segments().count(), 3);
}

#[test]
fn test_fq_name_starts_with_respects_segments() {
    let fq = FqName::new("java.util.List");
    assert!(fq.starts_with(&FqName::new("java.util")));
    assert!(fq.starts_with(&FqName::root()));
    assert!(!fq.starts_with(&FqName::new("java.ut")));
}

#[test]
fn test_class_id_serde_uses_string_form() {
    let id = ClassId::from_string("java/lang/String");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"java/lang/String\"");
    let back: ClassId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_callable_id_display() {
    let class_id = ClassId::from_string("pkg/Foo");
    let callable = CallableId::member(&class_id, Name::new("bar"));
    assert_eq!(callable.to_string(), "pkg/Foo.bar");
    assert_eq!(callable.class_id(), Some(class_id));
}

#[test]
fn test_special_names() {
    assert!(Name::init().is_special());
    assert!(!Name::new("value").is_special());
}
