//! Session-wide symbol table of synthesized declarations.
//!
//! Class symbols are allocated once per class id and never change, so a
//! symbol can be handed out before its class is synthesized. Binding a
//! symbol to its [`JavaClass`] happens as soon as the class structure
//! exists; later lookups through the symbol observe the same object.

use crate::declarations::{JavaClass, JavaTypeParameter};
use dashmap::DashMap;
use jfir_common::limits::CLASS_CACHE_INITIAL_CAPACITY;
use jfir_common::{ClassId, InteropError, Result};
use jfir_types::{ClassSymbol, SymbolAllocator, TypeParameterSymbol};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tracing::trace;

pub struct SymbolStore {
    class_symbols: DashMap<ClassId, ClassSymbol, FxBuildHasher>,
    classes: DashMap<ClassSymbol, Arc<JavaClass>, FxBuildHasher>,
    type_parameters: DashMap<TypeParameterSymbol, Arc<JavaTypeParameter>, FxBuildHasher>,
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolStore {
    pub fn new() -> Self {
        Self {
            class_symbols: DashMap::with_capacity_and_hasher(CLASS_CACHE_INITIAL_CAPACITY, FxBuildHasher),
            classes: DashMap::with_capacity_and_hasher(CLASS_CACHE_INITIAL_CAPACITY, FxBuildHasher),
            type_parameters: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// The symbol of `class_id`, allocated on first request.
    pub fn class_symbol(&self, allocator: &SymbolAllocator, class_id: &ClassId) -> ClassSymbol {
        if let Some(symbol) = self.class_symbols.get(class_id) {
            return symbol.clone();
        }
        self.class_symbols
            .entry(class_id.clone())
            .or_insert_with(|| allocator.class_symbol(class_id.clone()))
            .clone()
    }

    pub(crate) fn bind_class(&self, class: Arc<JavaClass>) {
        trace!(class_id = %class.class_id, "SymbolStore::bind_class");
        self.classes.insert(class.symbol.clone(), class);
    }

    pub(crate) fn unbind_class(&self, symbol: &ClassSymbol) {
        self.classes.remove(symbol);
    }

    pub fn class(&self, symbol: &ClassSymbol) -> Result<Arc<JavaClass>> {
        self.classes
            .get(symbol)
            .map(|class| Arc::clone(&class))
            .ok_or_else(|| InteropError::UnboundClass(symbol.class_id().clone()))
    }

    /// The bound class of `class_id`, if it has been synthesized.
    pub fn class_by_id(&self, class_id: &ClassId) -> Option<Arc<JavaClass>> {
        let symbol = self.class_symbols.get(class_id)?.clone();
        self.classes.get(&symbol).map(|class| Arc::clone(&class))
    }

    pub fn is_bound(&self, symbol: &ClassSymbol) -> bool {
        self.classes.contains_key(symbol)
    }

    /// Registers (or replaces) the declaration behind a type-parameter
    /// symbol.
    pub(crate) fn register_type_parameter(&self, parameter: Arc<JavaTypeParameter>) {
        self.type_parameters.insert(parameter.symbol.clone(), parameter);
    }

    pub fn type_parameter(&self, symbol: &TypeParameterSymbol) -> Option<Arc<JavaTypeParameter>> {
        self.type_parameters.get(symbol).map(|parameter| Arc::clone(&parameter))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
