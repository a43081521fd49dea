//! Cone types and foreign type conversion.
//!
//! This crate owns the frontend's view of types:
//!
//! - **Symbols**: session-unique identities for classes, type parameters
//!   and callables, allocated from an atomic counter
//! - **Cone types**: class-like, type-parameter, flexible, raw,
//!   definitely-non-null and error types
//! - **Type Parameter Stack**: foreign type-parameter identity to symbol
//! - **Converter**: foreign types to cone types, parameterized by a
//!   [`ConversionMode`]
//!
//! # Module Organization
//!
//! | Module | Contents |
//! |--------|----------|
//! | `symbols` | `SymbolId`, `SymbolAllocator`, symbol kinds |
//! | `cone` | `ConeType`, `TypeProjection`, `TypeAttributes` |
//! | `format` | `Display` for cone types |
//! | `class_map` | Java-to-Kotlin class mapping, well-known ids |
//! | `builtins` | type parameters and annotation shapes of built-in classes |
//! | `lookup` | `ClassifierLookup`, the converter's window on other classes |
//! | `stack` | `TypeParameterStack` |
//! | `convert` | `TypeConverter`, `ConversionMode` |
//! | `nullability` | nullability queries, definitely-non-null construction |
//! | `erasure` | erasure of type parameters to their bounds |
//! | `substitute` | `Substitutor` |
//! | `type_ref` | `TypeRef` of synthesized declarations |
//! | `recursion` | `RecursionGuard` for bound and supertype walks |

pub mod symbols;
pub use symbols::{CallableSymbol, ClassSymbol, SymbolAllocator, SymbolId, TypeParameterSymbol};

pub mod cone;
pub use cone::{ClassLikeType, ConeType, FlexibleType, TypeAttributes, TypeParameterType, TypeProjection};

mod format;

pub mod class_map;
pub use class_map::standard;

pub mod builtins;
pub use builtins::{BuiltinClass, BuiltinClassifiers, BuiltinParameter};

pub mod lookup;
pub use lookup::{ClassifierLookup, TypeParameterInfo};

pub mod stack;
pub use stack::TypeParameterStack;

pub mod convert;
pub use convert::{ConversionMode, TypeConverter, primitive_type};

pub mod nullability;
pub use nullability::{is_nullable_type, make_definitely_not_null};

pub mod erasure;
pub use erasure::erase_upper_bound;

pub mod substitute;
pub use substitute::Substitutor;

pub mod type_ref;
pub use type_ref::TypeRef;

pub mod recursion;
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};

#[cfg(test)]
#[path = "../tests/support.rs"]
mod test_support;
