//! Java interop for the jfir frontend.
//!
//! Foreign (Java) classes are turned into frontend declarations on demand,
//! their member signatures are enhanced with nullability information, and
//! their members are exposed through cached scopes.
//!
//! # Module Organization
//!
//! | Module | Contents |
//! |--------|----------|
//! | `expression` | constant expressions and annotation calls |
//! | `deferred` | computations forced on first access |
//! | `collaborators` | constant evaluation, module resolution, status transformers |
//! | `declarations` | `JavaClass` and its members |
//! | `store` | symbol-to-declaration table |
//! | `annotations` | `AnnotationTranslator` |
//! | `facade` | `JavaFacade`, the declaration synthesizer |
//! | `enhancement` | `SignatureEnhancement`, enhanced members |
//! | `scopes` | `MemberScope` and `MemberScopeProvider` |
//! | `provider` | `JavaClassProvider`, one synthesis per class |
//! | `finder` | `JavaClassFinder`, lookup by dotted name |
//! | `render` | text and JSON views |
//! | `session` | `InteropSession`, which wires the services together |

pub mod expression;
pub use expression::{AnnotationCall, Expression};

pub mod deferred;
pub use deferred::Deferred;

pub mod collaborators;
pub use collaborators::{
    ConstantEvaluator, LiteralEvaluator, ModuleData, ModuleResolver, SourceAndLibraryModules, StatusTransformer,
    TransformTarget,
};

pub mod declarations;
pub use declarations::{
    ConstructorOrigin, Declaration, DeclarationStatus, JavaClass, JavaConstructor, JavaEnumEntry, JavaField,
    JavaMethod, JavaTypeParameter, JavaValueParameter, MethodOrigin, ResolvePhase, StatusFlags, SyntheticProperty,
    TypeParameterRef,
};

pub mod store;
pub use store::SymbolStore;

pub mod annotations;
pub use annotations::AnnotationTranslator;

pub mod facade;
pub use facade::JavaFacade;

pub mod enhancement;
pub use enhancement::{
    EnhancedFunction, EnhancedProperty, EnhancedTypeParameter, EnhancedValueParameter, FunctionKind, PropertyKind,
    SignatureEnhancement,
};

pub mod scopes;
pub use scopes::{MemberScope, MemberScopeProvider, NestedClassifierScope, ScopeKind};

pub mod provider;
pub use provider::JavaClassProvider;

pub mod finder;
pub use finder::JavaClassFinder;

pub mod render;
pub use render::{ClassView, ScopeView};

pub mod session;
pub use session::{InteropSession, InteropSessionBuilder};

#[cfg(test)]
#[path = "../tests/support.rs"]
mod test_support;
