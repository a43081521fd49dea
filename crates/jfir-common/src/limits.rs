//! Centralized limits and thresholds.
//!
//! Recursion limits for type traversals live in
//! `jfir_types::recursion::RecursionProfile`; the constants here cover the
//! interop layer's own walks.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of annotation arguments (`@A(@B(@C(...)))`).
///
/// Self-referential annotation defaults can only recurse through lazily
/// computed values, but a hand-written model can still nest arbitrarily.
/// Deeper arguments are replaced with an error expression.
pub const MAX_ANNOTATION_ARGUMENT_DEPTH: u32 = 64;

/// Maximum depth of a supertype loop check.
///
/// Supertype hierarchies deeper than this are treated as looping.
pub const MAX_SUPERTYPE_DEPTH: u32 = 256;

/// Maximum depth when walking nested class segments of a dotted name.
pub const MAX_NESTED_CLASS_SEGMENTS: usize = 64;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Initial capacity of per-session class caches.
pub const CLASS_CACHE_INITIAL_CAPACITY: usize = 256;

/// Initial capacity of per-class member name indexes.
pub const MEMBER_INDEX_INITIAL_CAPACITY: usize = 16;
