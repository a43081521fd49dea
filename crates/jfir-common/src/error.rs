//! Internal-consistency errors.
//!
//! Unresolvable foreign references never produce an `InteropError`; they
//! become error types or unresolved markers. The variants below indicate a
//! resolution-ordering bug and abort the current class's synthesis.

use crate::names::{CallableId, ClassId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteropError {
    #[error("type parameter `{parameter}` is not registered in the type parameter stack")]
    UnknownTypeParameter { parameter: String },

    #[error("declaration kind mismatch for {declaration}: expected {expected}, found {found}")]
    KindMismatch {
        declaration: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("class symbol {0} is not bound to a synthesized class")]
    UnboundClass(ClassId),

    #[error("callable {0} is not bound to a declaration")]
    UnboundCallable(CallableId),

    #[error("class {0} was requested while its own structure was being built")]
    ReentrantStructure(ClassId),

    #[error("synthesis of class {class_id} failed earlier: {reason}")]
    Poisoned { class_id: ClassId, reason: String },
}

pub type Result<T> = std::result::Result<T, InteropError>;
