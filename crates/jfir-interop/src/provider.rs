//! Compute-if-absent access to synthesized classes.
//!
//! The provider is the only caller of the facade's synthesis entry points
//! and guarantees one synthesis per class id. A class is published as soon
//! as its structure and first-round bounds exist; the rest of its synthesis
//! runs afterwards on the creating thread. Other threads asking for the
//! class wait only for the structure.

use crate::declarations::JavaClass;
use crate::session::InteropSession;
use jfir_common::limits::MAX_NESTED_CLASS_SEGMENTS;
use jfir_common::{ClassId, PostComputeCache, Result};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct JavaClassProvider {
    classes: PostComputeCache<Option<Arc<JavaClass>>>,
}

impl Default for JavaClassProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaClassProvider {
    pub fn new() -> Self {
        Self {
            classes: PostComputeCache::new(),
        }
    }

    /// The synthesized class of `class_id`, or `None` when no Java class
    /// with that id exists. Nested classes are synthesized after their
    /// outer class.
    pub fn class_by_id(&self, session: &InteropSession, class_id: &ClassId) -> Result<Option<Arc<JavaClass>>> {
        if let Some(class) = self.classes.get(class_id) {
            return Ok(class);
        }
        if class_id.relative_class_name().segments().count() > MAX_NESTED_CLASS_SEGMENTS {
            debug!(class_id = %class_id, "JavaClassProvider: nesting too deep");
            return Ok(None);
        }

        let parent = match class_id.outer_class_id() {
            Some(outer_id) => match self.class_by_id(session, &outer_id)? {
                Some(outer) => Some(outer.symbol.clone()),
                None => return Ok(None),
            },
            None => None,
        };
        if parent.is_none() && !session.facade().has_top_level_class_of(session, class_id) {
            trace!(class_id = %class_id, "JavaClassProvider: not in package");
            return Ok(None);
        }

        self.classes.get_or_compute(
            class_id,
            || {
                let Some(foreign) = session.facade().find_class(session, class_id, None) else {
                    return Ok(None);
                };
                let symbol = session.class_symbol(class_id);
                session
                    .facade()
                    .create_class(session, &symbol, parent.as_ref(), foreign)
                    .map(Some)
            },
            |class| match class {
                Some(class) => session.facade().complete_class(session, class),
                None => Ok(()),
            },
        )
    }

    /// Whether every synthesis step of `class_id` has finished.
    #[cfg(test)]
    pub(crate) fn is_completed(&self, class_id: &ClassId) -> bool {
        self.classes.is_completed(class_id)
    }
}

#[cfg(test)]
#[path = "../tests/provider_tests.rs"]
mod tests;
