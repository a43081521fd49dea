//! Classifier queries the converter needs from its surroundings.

use crate::cone::ConeType;
use crate::symbols::TypeParameterSymbol;
use jfir_common::{ClassId, Variance};

/// A type parameter of a frontend class as seen from a use site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameterInfo {
    pub symbol: TypeParameterSymbol,
    pub variance: Variance,
}

impl TypeParameterInfo {
    pub fn new(symbol: TypeParameterSymbol, variance: Variance) -> Self {
        Self { symbol, variance }
    }
}

/// Resolves classifiers referenced by converted types.
///
/// Implementations may synthesize classes on demand, so callers in the
/// first round of bound resolution must not use
/// [`class_type_parameters`](Self::class_type_parameters) or
/// [`type_parameter_bounds`](Self::type_parameter_bounds).
pub trait ClassifierLookup: Send + Sync {
    /// Type parameters of the class (own parameters first), or `None` when
    /// the class is unknown.
    fn class_type_parameters(&self, class_id: &ClassId) -> Option<Vec<TypeParameterInfo>>;

    /// Bounds of a type parameter as far as they are resolved. An unknown
    /// or still unresolved parameter yields an empty list.
    fn type_parameter_bounds(&self, symbol: &TypeParameterSymbol) -> Vec<ConeType>;

    /// Number of type parameters of the class, answered without
    /// synthesizing anything.
    fn type_parameter_count(&self, class_id: &ClassId) -> Option<usize>;
}
