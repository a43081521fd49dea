//! Erasure of type parameters to their upper bounds.
//!
//! Raw foreign types use the erased bound of each class type parameter as
//! the lower-bound argument: `E` bounded by `Any?` erases to `Any?`,
//! `T extends Comparable<T>` erases to `Comparable<*>`.

use crate::cone::{ConeType, TypeProjection};
use crate::lookup::ClassifierLookup;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::symbols::{SymbolId, TypeParameterSymbol};
use tracing::trace;

pub fn erase_upper_bound(symbol: &TypeParameterSymbol, lookup: &dyn ClassifierLookup) -> ConeType {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::BoundErasure);
    erase_parameter(symbol, lookup, &mut guard)
}

fn erase_parameter(
    symbol: &TypeParameterSymbol,
    lookup: &dyn ClassifierLookup,
    guard: &mut RecursionGuard<SymbolId>,
) -> ConeType {
    let result = guard.scope(symbol.id(), |guard| {
        let bounds = lookup.type_parameter_bounds(symbol);
        match bounds.first() {
            Some(bound) => erase_type(bound, lookup, guard),
            None => ConeType::nullable_any(),
        }
    });
    result.unwrap_or_else(|denied| {
        trace!(parameter = ?symbol, ?denied, "erase_upper_bound: fallback to Any?");
        ConeType::nullable_any()
    })
}

fn erase_type(ty: &ConeType, lookup: &dyn ClassifierLookup, guard: &mut RecursionGuard<SymbolId>) -> ConeType {
    match ty {
        ConeType::ClassLike(class) => {
            let arguments = class.arguments.iter().map(|_| TypeProjection::Star).collect();
            ConeType::class(class.class_id.clone(), arguments, class.nullable)
        }
        ConeType::Flexible(flexible) => ConeType::flexible(
            erase_type(&flexible.lower, lookup, guard),
            erase_type(&flexible.upper, lookup, guard),
        ),
        ConeType::Raw(_) => ty.clone(),
        ConeType::TypeParameter(parameter) => {
            let erased = erase_parameter(&parameter.symbol, lookup, guard);
            if parameter.nullable {
                erased.with_nullability(true)
            } else {
                erased
            }
        }
        ConeType::DefinitelyNotNull(inner) => erase_type(inner, lookup, guard).with_nullability(false),
        ConeType::Error { .. } => ty.clone(),
    }
}

#[cfg(test)]
#[path = "../tests/erasure_tests.rs"]
mod tests;
