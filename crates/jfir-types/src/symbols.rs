//! Symbols: stable identities for frontend declarations.
//!
//! A symbol is a small, cloneable handle. Declarations are looked up by
//! symbol in the session's stores; the symbol itself never owns the
//! declaration, so symbols can be embedded in cone types and caches
//! without creating reference cycles.

use jfir_common::{CallableId, ClassId, Name};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

// =============================================================================
// SymbolId
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Sentinel value for an invalid symbol.
    pub const INVALID: SymbolId = SymbolId(0);

    /// First valid id.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out session-unique symbol ids.
pub struct SymbolAllocator {
    next_id: AtomicU32,
}

impl Default for SymbolAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolAllocator {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU32::new(SymbolId::FIRST_VALID),
        }
    }

    pub fn allocate(&self) -> SymbolId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        trace!(allocated_symbol_id = id, "SymbolAllocator::allocate");
        SymbolId(id)
    }

    pub fn class_symbol(&self, class_id: ClassId) -> ClassSymbol {
        ClassSymbol {
            id: self.allocate(),
            class_id,
        }
    }

    pub fn type_parameter_symbol(&self, name: Name) -> TypeParameterSymbol {
        TypeParameterSymbol {
            id: self.allocate(),
            name,
        }
    }

    pub fn callable_symbol(&self, callable_id: CallableId) -> CallableSymbol {
        CallableSymbol {
            id: self.allocate(),
            callable_id,
        }
    }
}

// =============================================================================
// Symbol kinds
// =============================================================================

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClassSymbol {
    id: SymbolId,
    class_id: ClassId,
}

impl ClassSymbol {
    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }
}

impl fmt::Debug for ClassSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassSymbol({}{})", self.class_id, self.id)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeParameterSymbol {
    id: SymbolId,
    name: Name,
}

impl TypeParameterSymbol {
    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }
}

impl fmt::Debug for TypeParameterSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeParameterSymbol({}{})", self.name, self.id)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CallableSymbol {
    id: SymbolId,
    callable_id: CallableId,
}

impl CallableSymbol {
    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn callable_id(&self) -> &CallableId {
        &self.callable_id
    }

    pub fn name(&self) -> &Name {
        &self.callable_id.callable_name
    }
}

impl fmt::Debug for CallableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallableSymbol({}{})", self.callable_id, self.id)
    }
}
