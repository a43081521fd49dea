//! Shared fixtures for the unit tests of this crate.

use crate::declarations::JavaClass;
use crate::session::InteropSession;
use jfir_common::{ClassId, InteropOptions, Name};
use jfir_model::{ClassModel, ForeignClass, ForeignPackage, InMemoryClassFinder};
use std::sync::Arc;

pub(crate) fn session_with(classes: Vec<ForeignClass>) -> InteropSession {
    InteropSession::new(Arc::new(InMemoryClassFinder::from_classes(classes)))
}

pub(crate) fn session_with_packages(classes: Vec<ForeignClass>, packages: Vec<ForeignPackage>) -> InteropSession {
    let finder = InMemoryClassFinder::new(ClassModel { classes, packages });
    InteropSession::new(Arc::new(finder))
}

pub(crate) fn session_with_options(classes: Vec<ForeignClass>, options: InteropOptions) -> InteropSession {
    InteropSession::builder(Arc::new(InMemoryClassFinder::from_classes(classes)))
        .options(options)
        .build()
}

/// The synthesized class of `class_id`, which must exist.
pub(crate) fn java_class(session: &InteropSession, class_id: &str) -> Arc<JavaClass> {
    session
        .java_class(&ClassId::from_string(class_id))
        .expect("synthesis failed")
        .unwrap_or_else(|| panic!("class {class_id} not found"))
}

pub(crate) fn name(value: &str) -> Name {
    Name::new(value)
}
