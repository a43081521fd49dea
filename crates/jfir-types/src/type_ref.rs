//! Type references of synthesized declarations.

use crate::convert::TypeConverter;
use crate::cone::ConeType;
use jfir_common::Result;
use jfir_model::ForeignType;
use std::sync::Arc;

/// A declaration's type: the foreign type it was written as until it is
/// converted, the cone type afterwards.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    Java(Arc<ForeignType>),
    Resolved(ConeType),
}

impl TypeRef {
    pub fn java(ty: ForeignType) -> Self {
        Self::Java(Arc::new(ty))
    }

    pub fn resolved(ty: ConeType) -> Self {
        Self::Resolved(ty)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn cone_type(&self) -> Option<&ConeType> {
        match self {
            Self::Resolved(ty) => Some(ty),
            Self::Java(_) => None,
        }
    }

    pub fn foreign_type(&self) -> Option<&ForeignType> {
        match self {
            Self::Java(ty) => Some(ty),
            Self::Resolved(_) => None,
        }
    }

    /// Converts a foreign reference; a resolved reference is returned as is.
    pub fn resolve(&self, converter: &TypeConverter<'_>) -> Result<ConeType> {
        match self {
            Self::Java(ty) => converter.convert(ty),
            Self::Resolved(ty) => Ok(ty.clone()),
        }
    }
}
