//! Cone types: the frontend's resolved type representation.
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `ClassLike` | `C<args>` or `C<args>?` |
//! | `TypeParameter` | `T` or `T?` |
//! | `Flexible` | `(L..U)`, a foreign type of unknown nullability |
//! | `Raw` | `raw (L..U)`, a generic foreign class used without arguments |
//! | `DefinitelyNotNull` | `T & Any` |
//! | `Error` | an unresolvable foreign reference |
//!
//! Flexible and raw bounds are never themselves flexible.

use crate::class_map::standard;
use crate::symbols::TypeParameterSymbol;
use jfir_common::{ClassId, Variance};
use smallvec::SmallVec;
use std::sync::Arc;

// =============================================================================
// Attributes
// =============================================================================

/// Annotation evidence carried by a type until enhancement consumes it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeAttributes {
    /// Type-use annotations written on the foreign type node.
    pub type_use_annotations: SmallVec<[ClassId; 2]>,
    /// Annotations written on the wildcard this type was the bound of.
    pub wildcard_annotations: SmallVec<[ClassId; 2]>,
    /// Set once signature enhancement changed the type.
    pub enhanced: bool,
}

impl TypeAttributes {
    pub fn is_empty(&self) -> bool {
        self.type_use_annotations.is_empty() && self.wildcard_annotations.is_empty() && !self.enhanced
    }

    pub fn with_type_use(annotations: impl IntoIterator<Item = ClassId>) -> Self {
        Self {
            type_use_annotations: annotations.into_iter().collect(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub(crate) fn has_annotation(&self, class_id: &ClassId) -> bool {
        self.type_use_annotations.contains(class_id) || self.wildcard_annotations.contains(class_id)
    }
}

// =============================================================================
// ConeType
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassLikeType {
    pub class_id: ClassId,
    pub arguments: Vec<TypeProjection>,
    pub nullable: bool,
    pub attributes: TypeAttributes,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameterType {
    pub symbol: TypeParameterSymbol,
    pub nullable: bool,
    pub attributes: TypeAttributes,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlexibleType {
    pub lower: ConeType,
    pub upper: ConeType,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConeType {
    ClassLike(ClassLikeType),
    TypeParameter(TypeParameterType),
    Flexible(Box<FlexibleType>),
    Raw(Box<FlexibleType>),
    DefinitelyNotNull(Box<ConeType>),
    Error { reason: Arc<str> },
}

impl ConeType {
    pub fn class(class_id: ClassId, arguments: Vec<TypeProjection>, nullable: bool) -> Self {
        Self::ClassLike(ClassLikeType {
            class_id,
            arguments,
            nullable,
            attributes: TypeAttributes::default(),
        })
    }

    /// A non-null class type without arguments.
    pub fn simple(class_id: &str) -> Self {
        Self::class(ClassId::from_string(class_id), Vec::new(), false)
    }

    pub fn any() -> Self {
        Self::simple(standard::ANY)
    }

    pub fn nullable_any() -> Self {
        Self::any().with_nullability(true)
    }

    pub fn unit() -> Self {
        Self::simple(standard::UNIT)
    }

    pub fn string() -> Self {
        Self::simple(standard::STRING)
    }

    /// `(Any..Any?)`, the bound of an unbounded foreign type parameter.
    pub fn flexible_any() -> Self {
        Self::flexible(Self::any(), Self::nullable_any())
    }

    pub fn type_parameter(symbol: TypeParameterSymbol, nullable: bool) -> Self {
        Self::TypeParameter(TypeParameterType {
            symbol,
            nullable,
            attributes: TypeAttributes::default(),
        })
    }

    pub fn flexible(lower: ConeType, upper: ConeType) -> Self {
        Self::Flexible(Box::new(FlexibleType {
            lower: lower.lower_bound_owned(),
            upper: upper.upper_bound_owned(),
        }))
    }

    pub fn raw(lower: ConeType, upper: ConeType) -> Self {
        Self::Raw(Box::new(FlexibleType {
            lower: lower.lower_bound_owned(),
            upper: upper.upper_bound_owned(),
        }))
    }

    pub fn error(reason: impl Into<Arc<str>>) -> Self {
        Self::Error { reason: reason.into() }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Whether the type carries an explicit `?`.
    ///
    /// For flexible types this answers for the lower bound.
    pub fn is_marked_nullable(&self) -> bool {
        match self {
            Self::ClassLike(ty) => ty.nullable,
            Self::TypeParameter(ty) => ty.nullable,
            Self::Flexible(flexible) | Self::Raw(flexible) => flexible.lower.is_marked_nullable(),
            Self::DefinitelyNotNull(_) | Self::Error { .. } => false,
        }
    }

    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::Flexible(_) | Self::Raw(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn contains_error(&self) -> bool {
        match self {
            Self::Error { .. } => true,
            Self::ClassLike(ty) => ty
                .arguments
                .iter()
                .any(|argument| argument.ty().is_some_and(ConeType::contains_error)),
            Self::TypeParameter(_) => false,
            Self::Flexible(flexible) | Self::Raw(flexible) => {
                flexible.lower.contains_error() || flexible.upper.contains_error()
            }
            Self::DefinitelyNotNull(inner) => inner.contains_error(),
        }
    }

    pub fn lower_bound(&self) -> &ConeType {
        match self {
            Self::Flexible(flexible) | Self::Raw(flexible) => &flexible.lower,
            _ => self,
        }
    }

    pub fn upper_bound(&self) -> &ConeType {
        match self {
            Self::Flexible(flexible) | Self::Raw(flexible) => &flexible.upper,
            _ => self,
        }
    }

    pub fn lower_bound_owned(self) -> ConeType {
        match self {
            Self::Flexible(flexible) | Self::Raw(flexible) => flexible.lower,
            other => other,
        }
    }

    pub fn upper_bound_owned(self) -> ConeType {
        match self {
            Self::Flexible(flexible) | Self::Raw(flexible) => flexible.upper,
            other => other,
        }
    }

    /// The classifier of a class-like type, looking through flexibility and
    /// definitely-non-null wrappers.
    pub fn class_id(&self) -> Option<&ClassId> {
        match self {
            Self::ClassLike(ty) => Some(&ty.class_id),
            Self::Flexible(flexible) | Self::Raw(flexible) => flexible.lower.class_id(),
            Self::DefinitelyNotNull(inner) => inner.class_id(),
            Self::TypeParameter(_) | Self::Error { .. } => None,
        }
    }

    pub fn type_parameter_symbol(&self) -> Option<&TypeParameterSymbol> {
        match self {
            Self::TypeParameter(ty) => Some(&ty.symbol),
            Self::Flexible(flexible) | Self::Raw(flexible) => flexible.lower.type_parameter_symbol(),
            Self::DefinitelyNotNull(inner) => inner.type_parameter_symbol(),
            Self::ClassLike(_) | Self::Error { .. } => None,
        }
    }

    pub fn arguments(&self) -> &[TypeProjection] {
        match self.lower_bound() {
            Self::ClassLike(ty) => &ty.arguments,
            _ => &[],
        }
    }

    pub fn attributes(&self) -> Option<&TypeAttributes> {
        match self {
            Self::ClassLike(ty) => Some(&ty.attributes),
            Self::TypeParameter(ty) => Some(&ty.attributes),
            Self::Flexible(flexible) | Self::Raw(flexible) => flexible.lower.attributes(),
            Self::DefinitelyNotNull(inner) => inner.attributes(),
            Self::Error { .. } => None,
        }
    }

    // -------------------------------------------------------------------------
    // Rewrites
    // -------------------------------------------------------------------------

    pub fn with_nullability(self, nullable: bool) -> ConeType {
        match self {
            Self::ClassLike(mut ty) => {
                ty.nullable = nullable;
                Self::ClassLike(ty)
            }
            Self::TypeParameter(mut ty) => {
                ty.nullable = nullable;
                Self::TypeParameter(ty)
            }
            Self::Flexible(flexible) => Self::flexible(
                flexible.lower.with_nullability(nullable),
                flexible.upper.with_nullability(nullable),
            ),
            Self::Raw(flexible) => Self::raw(
                flexible.lower.with_nullability(nullable),
                flexible.upper.with_nullability(nullable),
            ),
            Self::DefinitelyNotNull(inner) if nullable => inner.with_nullability(true),
            other => other,
        }
    }

    /// Replaces the attributes of every bound.
    pub fn with_attributes(self, attributes: TypeAttributes) -> ConeType {
        match self {
            Self::ClassLike(mut ty) => {
                ty.attributes = attributes;
                Self::ClassLike(ty)
            }
            Self::TypeParameter(mut ty) => {
                ty.attributes = attributes;
                Self::TypeParameter(ty)
            }
            Self::Flexible(flexible) => Self::Flexible(Box::new(FlexibleType {
                lower: flexible.lower.with_attributes(attributes.clone()),
                upper: flexible.upper.with_attributes(attributes),
            })),
            Self::Raw(flexible) => Self::Raw(Box::new(FlexibleType {
                lower: flexible.lower.with_attributes(attributes.clone()),
                upper: flexible.upper.with_attributes(attributes),
            })),
            Self::DefinitelyNotNull(inner) => Self::DefinitelyNotNull(Box::new(inner.with_attributes(attributes))),
            other => other,
        }
    }

    pub fn with_arguments(self, arguments: Vec<TypeProjection>) -> ConeType {
        match self {
            Self::ClassLike(mut ty) => {
                ty.arguments = arguments;
                Self::ClassLike(ty)
            }
            other => other,
        }
    }

    pub fn with_class_id(self, class_id: ClassId) -> ConeType {
        match self {
            Self::ClassLike(mut ty) => {
                ty.class_id = class_id;
                Self::ClassLike(ty)
            }
            other => other,
        }
    }
}

// =============================================================================
// TypeProjection
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeProjection {
    Star,
    Projected { variance: Variance, ty: ConeType },
}

impl TypeProjection {
    pub fn invariant(ty: ConeType) -> Self {
        Self::Projected {
            variance: Variance::Invariant,
            ty,
        }
    }

    pub fn out(ty: ConeType) -> Self {
        Self::Projected {
            variance: Variance::Out,
            ty,
        }
    }

    pub fn contravariant(ty: ConeType) -> Self {
        Self::Projected {
            variance: Variance::In,
            ty,
        }
    }

    pub fn ty(&self) -> Option<&ConeType> {
        match self {
            Self::Star => None,
            Self::Projected { ty, .. } => Some(ty),
        }
    }

    pub fn variance(&self) -> Option<Variance> {
        match self {
            Self::Star => None,
            Self::Projected { variance, .. } => Some(*variance),
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star)
    }

    pub fn map_type(self, f: impl FnOnce(ConeType) -> ConeType) -> Self {
        match self {
            Self::Star => Self::Star,
            Self::Projected { variance, ty } => Self::Projected { variance, ty: f(ty) },
        }
    }
}

#[cfg(test)]
#[path = "../tests/cone_tests.rs"]
mod tests;
