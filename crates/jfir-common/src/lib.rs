//! Common types and utilities for the jfir crates.
//!
//! This crate provides the foundational vocabulary shared by the foreign
//! class model, the cone type solver and the interop layer:
//! - Names and identifiers (`Name`, `FqName`, `ClassId`, `CallableId`)
//! - Declaration enums (`ClassKind`, `Modality`, `Visibility`, `Variance`)
//! - The effective-visibility lattice
//! - Centralized limits
//! - Session options (nullability annotation settings)
//! - The internal-consistency error type
//! - Compute-once caches used by the session

// Names and qualified identifiers
pub mod names;
pub use names::{CallableId, ClassId, FqName, Name};

// Declaration-level enums
pub mod declarations;
pub use declarations::{ClassKind, Modality, Variance, Visibility};

// Effective visibility lattice
pub mod visibility;
pub use visibility::{EffectiveVisibility, Permissiveness};

// Centralized limits and thresholds
pub mod limits;

// Session options
pub mod options;
pub use options::{DefaultNullabilityTarget, InteropOptions, NullabilitySettings};

// Error type for internal-consistency violations
pub mod error;
pub use error::{InteropError, Result};

// Compute-once caches
pub mod caches;
pub use caches::{PostComputeCache, SessionCache};
