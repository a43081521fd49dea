//! Declaration-level enums shared by the foreign model and the frontend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a frontend classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
}

impl ClassKind {
    pub fn is_interface(self) -> bool {
        matches!(self, Self::Interface | Self::AnnotationClass)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::EnumClass => "enum class",
            Self::EnumEntry => "enum entry",
            Self::AnnotationClass => "annotation class",
            Self::Object => "object",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Final,
    Sealed,
    Open,
    Abstract,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Final => "final",
            Self::Sealed => "sealed",
            Self::Open => "open",
            Self::Abstract => "abstract",
        })
    }
}

/// Declared visibility of a frontend declaration.
///
/// The Java-specific variants keep the distinctions the frontend needs:
/// package-private members, `protected` instance members (visible to the
/// package and subclasses), and `protected static` members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
    Local,
    PackagePrivate,
    ProtectedAndPackage,
    ProtectedStatic,
}

impl Visibility {
    pub fn is_public_api(self) -> bool {
        matches!(
            self,
            Self::Public | Self::Protected | Self::ProtectedAndPackage | Self::ProtectedStatic
        )
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Private => "private",
            Self::Local => "local",
            Self::PackagePrivate => "public/*package*/",
            Self::ProtectedAndPackage => "protected/*protected and package*/",
            Self::ProtectedStatic => "protected/*protected static*/",
        })
    }
}

/// Declaration-site or use-site variance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

impl Variance {
    pub fn label(self) -> &'static str {
        match self {
            Self::Invariant => "",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// Whether a use-site `projection` can be expressed on a parameter
    /// declared with `declared` variance.
    pub fn allows_projection(declared: Variance, projection: Variance) -> bool {
        declared == Variance::Invariant || projection == Variance::Invariant || declared == projection
    }
}
