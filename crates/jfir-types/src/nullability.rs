//! Nullability queries and definitely-non-null construction.

use crate::cone::{ConeType, TypeParameterType};
use crate::lookup::ClassifierLookup;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::symbols::SymbolId;

/// Whether a value of `ty` may be `null`.
///
/// A type parameter is nullable when it is marked `?` or any of its
/// resolved bounds is nullable; a parameter without resolved bounds is
/// treated as nullable.
pub fn is_nullable_type(ty: &ConeType, lookup: &dyn ClassifierLookup) -> bool {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::BoundErasure);
    is_nullable_guarded(ty, lookup, &mut guard)
}

fn is_nullable_guarded(ty: &ConeType, lookup: &dyn ClassifierLookup, guard: &mut RecursionGuard<SymbolId>) -> bool {
    match ty {
        ConeType::ClassLike(class) => class.nullable,
        ConeType::Flexible(flexible) | ConeType::Raw(flexible) => {
            is_nullable_guarded(&flexible.upper, lookup, guard)
        }
        ConeType::DefinitelyNotNull(_) | ConeType::Error { .. } => false,
        ConeType::TypeParameter(parameter) => {
            if parameter.nullable {
                return true;
            }
            let symbol = parameter.symbol.clone();
            guard
                .scope(symbol.id(), |guard| {
                    let bounds = lookup.type_parameter_bounds(&symbol);
                    bounds.is_empty() || bounds.iter().any(|bound| is_nullable_guarded(bound, lookup, guard))
                })
                // A bound cycle through parameters only: nothing makes it nullable.
                .unwrap_or(false)
        }
    }
}

/// Makes `ty` non-null, producing `T & Any` for type parameters.
///
/// With a `lookup`, a type parameter whose bounds are all non-null stays a
/// plain `T`. Without one the wrapper is created unconditionally, which is
/// what the converter does for lower bounds: asking for bounds there could
/// force another class's bound resolution.
pub fn make_definitely_not_null(ty: ConeType, lookup: Option<&dyn ClassifierLookup>) -> ConeType {
    match ty {
        ConeType::TypeParameter(parameter) => {
            let plain = ConeType::TypeParameter(TypeParameterType {
                nullable: false,
                ..parameter
            });
            match lookup {
                Some(lookup) if !is_nullable_type(&plain, lookup) => plain,
                _ => ConeType::DefinitelyNotNull(Box::new(plain)),
            }
        }
        ConeType::Flexible(flexible) => make_definitely_not_null(flexible.lower, lookup),
        ConeType::Raw(flexible) => flexible.lower.with_nullability(false),
        ConeType::DefinitelyNotNull(_) | ConeType::Error { .. } => ty,
        other => other.with_nullability(false),
    }
}

#[cfg(test)]
#[path = "../tests/nullability_tests.rs"]
mod tests;
