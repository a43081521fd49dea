//! Shared fixtures for the unit tests of this crate.

use crate::builtins::BuiltinClassifiers;
use crate::cone::ConeType;
use crate::lookup::{ClassifierLookup, TypeParameterInfo};
use crate::symbols::{SymbolAllocator, TypeParameterSymbol};
use jfir_common::{ClassId, Name, Variance};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Built-in classes plus a few test classes, counting every query that
/// could trigger bound resolution in a real session.
pub(crate) struct TestLookup {
    pub allocator: SymbolAllocator,
    pub builtins: BuiltinClassifiers,
    classes: FxHashMap<ClassId, Vec<TypeParameterInfo>>,
    bounds: FxHashMap<TypeParameterSymbol, Vec<ConeType>>,
    resolving_queries: AtomicUsize,
}

impl TestLookup {
    pub fn new() -> Self {
        let allocator = SymbolAllocator::new();
        let builtins = BuiltinClassifiers::new(&allocator);
        Self {
            allocator,
            builtins,
            classes: FxHashMap::default(),
            bounds: FxHashMap::default(),
            resolving_queries: AtomicUsize::new(0),
        }
    }

    /// Adds a class with invariant parameters and returns their symbols.
    pub fn add_class(&mut self, class_id: &str, parameters: &[&str]) -> Vec<TypeParameterSymbol> {
        let symbols: Vec<TypeParameterSymbol> = parameters
            .iter()
            .map(|name| self.allocator.type_parameter_symbol(Name::new(name)))
            .collect();
        self.classes.insert(
            ClassId::from_string(class_id),
            symbols
                .iter()
                .map(|symbol| TypeParameterInfo::new(symbol.clone(), Variance::Invariant))
                .collect(),
        );
        symbols
    }

    pub fn set_bounds(&mut self, symbol: &TypeParameterSymbol, bounds: Vec<ConeType>) {
        self.bounds.insert(symbol.clone(), bounds);
    }

    pub fn resolving_queries(&self) -> usize {
        self.resolving_queries.load(Ordering::SeqCst)
    }
}

impl ClassifierLookup for TestLookup {
    fn class_type_parameters(&self, class_id: &ClassId) -> Option<Vec<TypeParameterInfo>> {
        self.resolving_queries.fetch_add(1, Ordering::SeqCst);
        self.classes
            .get(class_id)
            .cloned()
            .or_else(|| self.builtins.class_type_parameters(class_id))
    }

    fn type_parameter_bounds(&self, symbol: &TypeParameterSymbol) -> Vec<ConeType> {
        self.resolving_queries.fetch_add(1, Ordering::SeqCst);
        self.bounds
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| self.builtins.type_parameter_bounds(symbol))
    }

    fn type_parameter_count(&self, class_id: &ClassId) -> Option<usize> {
        self.classes
            .get(class_id)
            .map(Vec::len)
            .or_else(|| self.builtins.type_parameter_count(class_id))
    }
}
