//! Foreign (Java) class model.
//!
//! The types in this crate are immutable views of the foreign language's
//! class model. They are produced by an external collaborator (a source
//! parser or a class-file reader) and are never mutated by the interop
//! layer. Every type is `serde`-(de)serializable so a model can be loaded
//! from JSON.
//!
//! # Module Organization
//!
//! | Module | Contents |
//! |--------|----------|
//! | `types` | `ForeignType` and its node kinds, type-parameter identity |
//! | `annotations` | `ForeignAnnotation`, argument values, literals |
//! | `class` | `ForeignClass`, its members, `ForeignPackage` |
//! | `finder` | the consumed `ClassFinder` interface and an in-memory finder |

pub mod types;
pub use types::{
    ForeignArrayType, ForeignClassifier, ForeignClassifierType, ForeignPrimitiveType,
    ForeignType, ForeignTypeParameter, ForeignWildcardType, PrimitiveKind, TypeParameterKey,
};

pub mod annotations;
pub use annotations::{ForeignAnnotation, ForeignAnnotationArgument, ForeignAnnotationValue, ForeignLiteral};

pub mod class;
pub use class::{
    ForeignClass, ForeignClassKind, ForeignConstructor, ForeignField, ForeignMethod,
    ForeignPackage, ForeignRecordComponent, ForeignValueParameter, ForeignVisibility,
};

pub mod finder;
pub use finder::{ClassFinder, ClassModel, ClassRequest, InMemoryClassFinder};
