//! Type Parameter Stack.
//!
//! Maps foreign type-parameter identity to the frontend symbol created for
//! it. A class's stack holds its own parameters plus those of every
//! enclosing class (and, while a method is converted, the method's own
//! parameters), so any type-variable reference inside the class resolves
//! through a single lookup.
//!
//! A miss is an ordering bug and is reported as an error, never papered
//! over with a default.

use crate::symbols::TypeParameterSymbol;
use dashmap::DashMap;
use jfir_common::{InteropError, Result};
use jfir_model::TypeParameterKey;
use rustc_hash::FxBuildHasher;
use std::ptr;
use tracing::trace;

#[derive(Debug, Default)]
pub struct TypeParameterStack {
    entries: DashMap<TypeParameterKey, TypeParameterSymbol, FxBuildHasher>,
}

impl TypeParameterStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one mapping. A later registration of the same key wins.
    pub fn add_parameter(&self, parameter: &TypeParameterKey, symbol: TypeParameterSymbol) {
        trace!(parameter = %parameter, symbol = ?symbol, "TypeParameterStack::add_parameter");
        self.entries.insert(parameter.clone(), symbol);
    }

    /// Imports every entry of `other` whose key is not present yet.
    pub fn add_stack(&self, other: &TypeParameterStack) {
        if ptr::eq(self, other) {
            return;
        }
        for entry in other.entries.iter() {
            self.entries
                .entry(entry.key().clone())
                .or_insert_with(|| entry.value().clone());
        }
    }

    pub fn get(&self, parameter: &TypeParameterKey) -> Result<TypeParameterSymbol> {
        self.entries
            .get(parameter)
            .map(|symbol| symbol.clone())
            .ok_or_else(|| InteropError::UnknownTypeParameter {
                parameter: parameter.to_string(),
            })
    }

    pub fn contains(&self, parameter: &TypeParameterKey) -> bool {
        self.entries.contains_key(parameter)
    }

    /// All `(parameter, symbol)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeParameterKey, TypeParameterSymbol)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
    }

    /// An independent copy of the current entries.
    pub fn snapshot(&self) -> TypeParameterStack {
        let copy = TypeParameterStack::new();
        copy.add_stack(self);
        copy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/stack_tests.rs"]
mod tests;
