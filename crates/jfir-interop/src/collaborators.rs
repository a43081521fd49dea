//! Collaborators the interop layer consumes but does not implement.
//!
//! | Trait | Used for |
//! |-------|----------|
//! | [`ConstantEvaluator`] | literal annotation arguments and constant field initializers |
//! | [`ModuleResolver`] | the module that owns a synthesized class |
//! | [`StatusTransformer`] | pluggable rewriting of declaration statuses |
//!
//! The classifier lookup collaborator is `jfir_model::ClassFinder`.

use crate::declarations::{DeclarationStatus, JavaClass, JavaConstructor, JavaField, JavaMethod};
use crate::expression::Expression;
use jfir_common::Name;
use jfir_model::{ForeignClass, ForeignLiteral};
use jfir_types::{ClassSymbol, ConeType, standard};
use std::fmt;

// =============================================================================
// Constant evaluation
// =============================================================================

/// Turns a foreign literal into a frontend expression.
pub trait ConstantEvaluator: Send + Sync {
    /// `expected` is the type of the parameter or field the literal is
    /// assigned to, when known.
    fn evaluate(&self, literal: &ForeignLiteral, expected: Option<&ConeType>) -> Expression;
}

/// Evaluator that types a literal by its own kind, narrowed to the expected
/// primitive type for integral literals.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiteralEvaluator;

impl ConstantEvaluator for LiteralEvaluator {
    fn evaluate(&self, literal: &ForeignLiteral, expected: Option<&ConeType>) -> Expression {
        let own = literal_type(literal);
        let ty = match (literal, expected.map(ConeType::lower_bound)) {
            (
                ForeignLiteral::Byte(_) | ForeignLiteral::Short(_) | ForeignLiteral::Int(_) | ForeignLiteral::Long(_),
                Some(expected),
            ) if expected
                .class_id()
                .is_some_and(|class_id| jfir_types::class_map::is_primitive_class(class_id)) =>
            {
                expected.clone().with_nullability(false)
            }
            _ => own,
        };
        Expression::Const {
            value: literal.clone(),
            ty,
        }
    }
}

fn literal_type(literal: &ForeignLiteral) -> ConeType {
    match literal {
        ForeignLiteral::Null => ConeType::simple(standard::NOTHING).with_nullability(true),
        ForeignLiteral::Boolean(_) => ConeType::simple(standard::BOOLEAN),
        ForeignLiteral::Char(_) => ConeType::simple(standard::CHAR),
        ForeignLiteral::Byte(_) => ConeType::simple(standard::BYTE),
        ForeignLiteral::Short(_) => ConeType::simple(standard::SHORT),
        ForeignLiteral::Int(_) => ConeType::simple(standard::INT),
        ForeignLiteral::Long(_) => ConeType::simple(standard::LONG),
        ForeignLiteral::Float(_) => ConeType::simple(standard::FLOAT),
        ForeignLiteral::Double(_) => ConeType::simple(standard::DOUBLE),
        ForeignLiteral::String(_) => ConeType::string(),
    }
}

// =============================================================================
// Modules
// =============================================================================

/// A compilation unit that owns synthesized classes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleData {
    pub name: Name,
    pub is_source: bool,
}

impl ModuleData {
    pub fn new(name: &str, is_source: bool) -> Self {
        Self {
            name: Name::special(&format!("<{name}>")),
            is_source,
        }
    }
}

impl fmt::Display for ModuleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub trait ModuleResolver: Send + Sync {
    fn module_for(&self, class: &ForeignClass) -> ModuleData;
}

/// Source classes belong to the module under compilation, everything else
/// to its dependencies.
#[derive(Clone, Debug)]
pub struct SourceAndLibraryModules {
    pub source: ModuleData,
    pub libraries: ModuleData,
}

impl Default for SourceAndLibraryModules {
    fn default() -> Self {
        Self {
            source: ModuleData::new("main", true),
            libraries: ModuleData::new("dependencies", false),
        }
    }
}

impl ModuleResolver for SourceAndLibraryModules {
    fn module_for(&self, class: &ForeignClass) -> ModuleData {
        if class.is_from_source {
            self.source.clone()
        } else {
            self.libraries.clone()
        }
    }
}

// =============================================================================
// Status transformers
// =============================================================================

/// A declaration whose status a [`StatusTransformer`] may rewrite.
#[derive(Clone, Copy)]
pub enum TransformTarget<'a> {
    Class(&'a JavaClass),
    Function(&'a JavaMethod),
    Field(&'a JavaField),
    Constructor(&'a JavaConstructor),
}

impl TransformTarget<'_> {
    pub fn name(&self) -> Name {
        match self {
            Self::Class(class) => class.class_id.short_class_name(),
            Self::Function(method) => method.name.clone(),
            Self::Field(field) => field.name.clone(),
            Self::Constructor(_) => Name::init(),
        }
    }
}

/// Extension point that rewrites visibility, modality and flags.
///
/// Transformers run once per declaration, after the class is otherwise
/// complete. `container` is the enclosing class (the outer class for a
/// class, the declaring class for a member).
pub trait StatusTransformer: Send + Sync {
    fn needs_transform(&self, _target: TransformTarget<'_>) -> bool {
        true
    }

    fn transform_status(
        &self,
        status: DeclarationStatus,
        target: TransformTarget<'_>,
        container: Option<&ClassSymbol>,
    ) -> DeclarationStatus;
}

#[cfg(test)]
#[path = "../tests/collaborators_tests.rs"]
mod tests;
