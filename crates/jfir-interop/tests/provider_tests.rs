use super::*;
use crate::test_support::*;
use jfir_model::{ForeignClass, ForeignClassKind, ForeignType, ForeignTypeParameter, InMemoryClassFinder, TypeParameterKey};
use rayon::prelude::*;

#[test]
fn test_missing_class_is_none() {
    let session = session_with(vec![ForeignClass::new("pkg/A", ForeignClassKind::Class)]);
    let missing = ClassId::from_string("pkg/Missing");

    assert!(session.provider().class_by_id(&session, &missing).expect("lookup").is_none());
    assert!(!session.provider().is_completed(&missing));
}

#[test]
fn test_nested_class_without_outer_is_none() {
    let session = session_with(vec![ForeignClass::new("pkg/Outer.Inner", ForeignClassKind::Class).make_static()]);
    let inner = ClassId::from_string("pkg/Outer.Inner");
    assert!(session.provider().class_by_id(&session, &inner).expect("lookup").is_none());
}

#[test]
fn test_lookup_completes_the_class() {
    let session = session_with(vec![ForeignClass::new("pkg/A", ForeignClassKind::Class)]);
    let class_id = ClassId::from_string("pkg/A");

    let first = session.provider().class_by_id(&session, &class_id).expect("lookup").expect("class");
    assert!(session.provider().is_completed(&class_id));
    let second = session.provider().class_by_id(&session, &class_id).expect("lookup").expect("class");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_class_outside_enumerated_package_is_skipped() {
    let finder = InMemoryClassFinder::from_classes(vec![ForeignClass::new("pkg/A", ForeignClassKind::Class)]);
    let session = crate::InteropSession::new(Arc::new(finder));
    let other = ClassId::from_string("other/A");
    assert!(session.provider().class_by_id(&session, &other).expect("lookup").is_none());
}

#[test]
fn test_concurrent_lookups_share_one_class() {
    let t = TypeParameterKey::new("pkg/A", "T");
    let u = TypeParameterKey::new("pkg/B", "U");
    let session = session_with(vec![
        ForeignClass::new("pkg/A", ForeignClassKind::Class).with_type_parameter(
            ForeignTypeParameter::new("pkg/A", "T")
                .with_bound(ForeignType::class_with_args("pkg/B", vec![ForeignType::type_parameter(&t)])),
        ),
        ForeignClass::new("pkg/B", ForeignClassKind::Class).with_type_parameter(
            ForeignTypeParameter::new("pkg/B", "U")
                .with_bound(ForeignType::class_with_args("pkg/A", vec![ForeignType::type_parameter(&u)])),
        ),
    ]);
    let ids = [ClassId::from_string("pkg/A"), ClassId::from_string("pkg/B")];

    let classes: Vec<Arc<JavaClass>> = (0..32)
        .into_par_iter()
        .map(|index| {
            session
                .provider()
                .class_by_id(&session, &ids[index % 2])
                .expect("lookup")
                .expect("class")
        })
        .collect();

    for (index, class) in classes.iter().enumerate() {
        assert!(Arc::ptr_eq(class, &classes[index % 2]));
    }
    assert!(ids.iter().all(|id| session.provider().is_completed(id)));
}
