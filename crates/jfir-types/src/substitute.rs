//! Substitution of type-parameter types.
//!
//! Used when a supertype's member scope is viewed through a subclass:
//! `class A<T> extends B<List<T>>` sees `B`'s members with `B`'s parameter
//! replaced by `List<T>`.

use crate::cone::{ClassLikeType, ConeType, FlexibleType, TypeProjection};
use crate::nullability::make_definitely_not_null;
use crate::symbols::TypeParameterSymbol;
use jfir_common::Variance;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct Substitutor {
    map: FxHashMap<TypeParameterSymbol, TypeProjection>,
}

impl Substitutor {
    pub fn new(parameters: impl IntoIterator<Item = TypeParameterSymbol>, arguments: &[TypeProjection]) -> Self {
        Self {
            map: parameters.into_iter().zip(arguments.iter().cloned()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn substitute(&self, ty: &ConeType) -> ConeType {
        if self.is_empty() {
            return ty.clone();
        }
        match ty {
            ConeType::ClassLike(class) => {
                let arguments = class
                    .arguments
                    .iter()
                    .map(|argument| self.substitute_projection(argument))
                    .collect();
                ConeType::ClassLike(ClassLikeType {
                    arguments,
                    ..class.clone()
                })
            }
            ConeType::TypeParameter(parameter) => match self.map.get(&parameter.symbol) {
                None => ty.clone(),
                Some(TypeProjection::Star) => ConeType::nullable_any(),
                Some(TypeProjection::Projected { ty: replacement, .. }) => {
                    if parameter.nullable {
                        replacement.clone().with_nullability(true)
                    } else {
                        replacement.clone()
                    }
                }
            },
            ConeType::Flexible(flexible) => ConeType::Flexible(Box::new(FlexibleType {
                lower: self.substitute(&flexible.lower).lower_bound_owned(),
                upper: self.substitute(&flexible.upper).upper_bound_owned(),
            })),
            ConeType::Raw(flexible) => ConeType::Raw(Box::new(FlexibleType {
                lower: self.substitute(&flexible.lower).lower_bound_owned(),
                upper: self.substitute(&flexible.upper).upper_bound_owned(),
            })),
            ConeType::DefinitelyNotNull(inner) => make_definitely_not_null(self.substitute(inner), None),
            ConeType::Error { .. } => ty.clone(),
        }
    }

    pub fn substitute_projection(&self, projection: &TypeProjection) -> TypeProjection {
        let TypeProjection::Projected { variance, ty } = projection else {
            return TypeProjection::Star;
        };
        if let ConeType::TypeParameter(parameter) = ty {
            match self.map.get(&parameter.symbol) {
                None => {}
                Some(TypeProjection::Star) => return TypeProjection::Star,
                Some(TypeProjection::Projected {
                    variance: replacement_variance,
                    ty: replacement,
                }) => {
                    let replacement = if parameter.nullable {
                        replacement.clone().with_nullability(true)
                    } else {
                        replacement.clone()
                    };
                    return match combine_variance(*variance, *replacement_variance) {
                        Some(variance) => TypeProjection::Projected {
                            variance,
                            ty: replacement,
                        },
                        None => TypeProjection::Star,
                    };
                }
            }
        }
        TypeProjection::Projected {
            variance: *variance,
            ty: self.substitute(ty),
        }
    }
}

/// `None` when the two projections conflict (`in` applied to `out`).
fn combine_variance(outer: Variance, inner: Variance) -> Option<Variance> {
    match (outer, inner) {
        (Variance::Invariant, other) | (other, Variance::Invariant) => Some(other),
        (a, b) if a == b => Some(a),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/substitute_tests.rs"]
mod tests;
