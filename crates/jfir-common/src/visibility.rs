//! Effective visibility lattice.
//!
//! The effective visibility of a declaration is the most restrictive
//! visibility reachable by combining its own visibility with the effective
//! visibility of every enclosing declaration. Combining is done with
//! [`EffectiveVisibility::lower_bound`], the meet of the lattice below:
//!
//! ```text
//!                          Public
//!              /             |              \
//!     Protected(C)        Internal           |
//!          |             /       \           |
//!    ProtectedBound   InternalProtected(C)   |
//!           \             |                  |
//!            InternalProtectedBound          |
//!                     \                     /
//!                        PackagePrivate
//!                              |
//!                   PrivateInClass == Local
//! ```
//!
//! Java `protected` also grants package access, which is why
//! `PackagePrivate` sits below every protected element.

use crate::declarations::Visibility;
use crate::names::ClassId;
use std::fmt;

/// Result of comparing two effective visibilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permissiveness {
    Less,
    Same,
    More,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EffectiveVisibility {
    Public,
    Protected(ClassId),
    /// Protected in two unrelated containers.
    ProtectedBound,
    Internal,
    InternalProtected(ClassId),
    InternalProtectedBound,
    PackagePrivate,
    PrivateInClass,
    Local,
}

impl EffectiveVisibility {
    /// Effective visibility implied by a declared visibility alone.
    pub fn from_visibility(visibility: Visibility, container: Option<&ClassId>) -> Self {
        match visibility {
            Visibility::Public => Self::Public,
            Visibility::Protected | Visibility::ProtectedAndPackage | Visibility::ProtectedStatic => {
                match container {
                    Some(container) => Self::Protected(container.clone()),
                    None => Self::PackagePrivate,
                }
            }
            Visibility::Internal => Self::Internal,
            Visibility::PackagePrivate => Self::PackagePrivate,
            Visibility::Private => Self::PrivateInClass,
            Visibility::Local => Self::Local,
        }
    }

    fn is_private_group(&self) -> bool {
        matches!(self, Self::PrivateInClass | Self::Local)
    }

    /// How `self` compares to `other`: `More` means `self` is visible in
    /// strictly more places.
    pub fn relation(&self, other: &Self) -> Permissiveness {
        use EffectiveVisibility::*;
        if self == other || (self.is_private_group() && other.is_private_group()) {
            return Permissiveness::Same;
        }
        match (self, other) {
            (Public, _) => Permissiveness::More,
            (_, Public) => Permissiveness::Less,
            (a, _) if a.is_private_group() => Permissiveness::Less,
            (_, b) if b.is_private_group() => Permissiveness::More,
            (PackagePrivate, _) => Permissiveness::Less,
            (_, PackagePrivate) => Permissiveness::More,
            (InternalProtectedBound, _) => Permissiveness::Less,
            (_, InternalProtectedBound) => Permissiveness::More,

            (Protected(a), InternalProtected(b)) if a == b => Permissiveness::More,
            (InternalProtected(a), Protected(b)) if a == b => Permissiveness::Less,
            (Protected(_), ProtectedBound) => Permissiveness::More,
            (ProtectedBound, Protected(_)) => Permissiveness::Less,
            (Internal, InternalProtected(_)) => Permissiveness::More,
            (InternalProtected(_), Internal) => Permissiveness::Less,
            _ => Permissiveness::Unknown,
        }
    }

    /// The meet of `self` and `other`: the most permissive visibility that
    /// is at most as permissive as both.
    pub fn lower_bound(&self, other: &Self) -> Self {
        use EffectiveVisibility::*;
        match self.relation(other) {
            Permissiveness::Same if self != other => PrivateInClass,
            Permissiveness::Same | Permissiveness::Less => self.clone(),
            Permissiveness::More => other.clone(),
            Permissiveness::Unknown => match (self, other) {
                (Protected(_), Protected(_)) => ProtectedBound,
                (Protected(container), Internal) | (Internal, Protected(container)) => {
                    InternalProtected(container.clone())
                }
                _ => InternalProtectedBound,
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn is_at_most_as_permissive_as(&self, other: &Self) -> bool {
        matches!(self.relation(other), Permissiveness::Less | Permissiveness::Same)
    }
}

impl fmt::Display for EffectiveVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Protected(container) => write!(f, "protected in {container}"),
            Self::ProtectedBound => f.write_str("protected (in different classes)"),
            Self::Internal => f.write_str("internal"),
            Self::InternalProtected(container) => write!(f, "internal & protected in {container}"),
            Self::InternalProtectedBound => f.write_str("internal & protected (in different classes)"),
            Self::PackagePrivate => f.write_str("package-private"),
            Self::PrivateInClass => f.write_str("private-in-class"),
            Self::Local => f.write_str("local"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/visibility_tests.rs"]
mod tests;
