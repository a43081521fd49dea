//! Lookup of synthesized classes by dotted name.

use crate::declarations::JavaClass;
use crate::session::InteropSession;
use jfir_common::{ClassId, FqName, Name, Result};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct JavaClassFinder<'a> {
    session: &'a InteropSession,
}

impl<'a> JavaClassFinder<'a> {
    pub fn new(session: &'a InteropSession) -> Self {
        Self { session }
    }

    /// Resolves `a.b.Outer.Inner`: the longest prefix that is a package
    /// with a matching top-level class, then nested classes one segment at
    /// a time. Unresolvable names give `None`.
    pub fn find_class_by_fq_name(&self, fq_name: &str) -> Result<Option<Arc<JavaClass>>> {
        let segments: Vec<&str> = fq_name.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            debug!(fq_name, "JavaClassFinder: malformed name");
            return Ok(None);
        }

        for package_length in (0..segments.len()).rev() {
            let package = FqName::from_segments(segments[..package_length].iter().copied());
            if !package.is_root() && !self.session.facade().has_package(self.session, &package) {
                continue;
            }
            let top_level = ClassId::top_level(package, &Name::new(segments[package_length]));
            let Some(class) = self.session.java_class(&top_level)? else {
                continue;
            };
            trace!(fq_name, class_id = %top_level, "JavaClassFinder: top-level class found");
            return self.find_nested(class, &segments[package_length + 1..]);
        }
        Ok(None)
    }

    fn find_nested(&self, mut class: Arc<JavaClass>, segments: &[&str]) -> Result<Option<Arc<JavaClass>>> {
        for segment in segments {
            let nested = self
                .session
                .nested_classifier_scope(&class)
                .classifier(self.session, &Name::new(segment))?;
            match nested {
                Some(nested) => class = nested,
                None => {
                    debug!(outer = %class.class_id, segment, "JavaClassFinder: nested class not found");
                    return Ok(None);
                }
            }
        }
        Ok(Some(class))
    }
}

#[cfg(test)]
#[path = "../tests/finder_tests.rs"]
mod tests;
