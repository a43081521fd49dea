//! Classifier lookup interface consumed by the interop layer.

use crate::class::{ForeignClass, ForeignPackage};
use jfir_common::{ClassId, FqName};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// A request for one foreign class.
#[derive(Clone, Copy, Debug)]
pub struct ClassRequest<'a> {
    pub class_id: &'a ClassId,
    /// Raw content the caller already holds for this class, if any.
    pub known_content: Option<&'a [u8]>,
}

impl<'a> ClassRequest<'a> {
    pub fn new(class_id: &'a ClassId) -> Self {
        Self {
            class_id,
            known_content: None,
        }
    }
}

/// Looks up foreign classes and packages by qualified name.
pub trait ClassFinder: Send + Sync {
    fn find_class(&self, request: ClassRequest<'_>) -> Option<Arc<ForeignClass>>;

    fn find_package(&self, fq_name: &FqName, may_have_annotations: bool) -> Option<Arc<ForeignPackage>>;

    /// Simple names of the top-level classes in a package, or `None` when
    /// they cannot be enumerated cheaply.
    fn known_class_names_in_package(&self, fq_name: &FqName) -> Option<FxHashSet<String>>;
}

/// JSON shape of a class model file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassModel {
    pub classes: Vec<ForeignClass>,
    pub packages: Vec<ForeignPackage>,
}

impl ClassModel {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A `ClassFinder` over an in-memory model.
pub struct InMemoryClassFinder {
    classes: FxHashMap<ClassId, Arc<ForeignClass>>,
    packages: FxHashMap<FqName, Arc<ForeignPackage>>,
    can_enumerate: bool,
}

impl InMemoryClassFinder {
    pub fn new(model: ClassModel) -> Self {
        let mut packages: FxHashMap<FqName, Arc<ForeignPackage>> = FxHashMap::default();
        for package in model.packages {
            packages.insert(package.fq_name.clone(), Arc::new(package));
        }
        let mut classes = FxHashMap::default();
        for class in model.classes {
            let mut package = Some(class.class_id.package_fq_name().clone());
            while let Some(fq_name) = package {
                if fq_name.is_root() {
                    break;
                }
                package = fq_name.parent();
                packages
                    .entry(fq_name.clone())
                    .or_insert_with(|| Arc::new(ForeignPackage {
                        fq_name,
                        annotations: Vec::new(),
                    }));
            }
            classes.insert(class.class_id.clone(), Arc::new(class));
        }
        Self {
            classes,
            packages,
            can_enumerate: true,
        }
    }

    pub fn from_classes(classes: Vec<ForeignClass>) -> Self {
        Self::new(ClassModel {
            classes,
            packages: Vec::new(),
        })
    }

    /// Simulates a backing store that cannot list package contents.
    pub fn without_enumeration(mut self) -> Self {
        self.can_enumerate = false;
        self
    }

    pub fn class_ids(&self) -> impl Iterator<Item = &ClassId> {
        self.classes.keys()
    }
}

impl ClassFinder for InMemoryClassFinder {
    fn find_class(&self, request: ClassRequest<'_>) -> Option<Arc<ForeignClass>> {
        let found = self.classes.get(request.class_id).cloned();
        trace!(class_id = %request.class_id, found = found.is_some(), "InMemoryClassFinder::find_class");
        found
    }

    fn find_package(&self, fq_name: &FqName, _may_have_annotations: bool) -> Option<Arc<ForeignPackage>> {
        if fq_name.is_root() {
            return Some(Arc::new(ForeignPackage {
                fq_name: FqName::root(),
                annotations: Vec::new(),
            }));
        }
        self.packages.get(fq_name).cloned()
    }

    fn known_class_names_in_package(&self, fq_name: &FqName) -> Option<FxHashSet<String>> {
        if !self.can_enumerate {
            return None;
        }
        Some(
            self.classes
                .keys()
                .filter(|class_id| class_id.package_fq_name() == fq_name && !class_id.is_nested())
                .map(|class_id| class_id.short_class_name().to_string())
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "../tests/finder_tests.rs"]
mod tests;
