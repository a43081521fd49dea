//! Frontend expressions produced for annotation arguments, annotation
//! defaults and constant field initializers.

use indexmap::IndexMap;
use jfir_common::{ClassId, Name};
use jfir_model::ForeignLiteral;
use jfir_types::{CallableSymbol, ConeType};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// A literal constant with its frontend type.
    Const { value: ForeignLiteral, ty: ConeType },
    Array {
        elements: Vec<Expression>,
        /// Expected array type, when the parameter it is passed to is known.
        ty: Option<ConeType>,
    },
    /// A resolved enum entry.
    EnumEntry { enum_class: ClassId, entry: CallableSymbol },
    /// An enum entry whose enum class or entry could not be resolved. The
    /// name is kept so later phases can still match on it.
    UnresolvedEnumEntry { enum_class: Option<ClassId>, name: Name },
    /// `T::class`; `ty` is `KClass<T>`.
    GetClass { argument: ConeType, ty: ConeType },
    Annotation(Box<AnnotationCall>),
    Error { reason: String },
}

impl Expression {
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error { reason: reason.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Names of the enum entries referenced by this expression or the
    /// elements of an array expression, resolved or not.
    pub fn enum_entry_names(&self) -> Vec<Name> {
        match self {
            Self::EnumEntry { entry, .. } => vec![entry.name().clone()],
            Self::UnresolvedEnumEntry { name, .. } => vec![name.clone()],
            Self::Array { elements, .. } => elements.iter().flat_map(Expression::enum_entry_names).collect(),
            _ => Vec::new(),
        }
    }
}

/// A frontend annotation instance.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationCall {
    /// `None` when the foreign annotation class could not be resolved.
    pub class_id: Option<ClassId>,
    /// The annotation's class type, or an error type for unresolved ones.
    pub ty: ConeType,
    pub arguments: IndexMap<Name, Expression>,
}

impl AnnotationCall {
    pub fn new(class_id: ClassId) -> Self {
        let ty = ConeType::class(class_id.clone(), Vec::new(), false);
        Self {
            class_id: Some(class_id),
            ty,
            arguments: IndexMap::new(),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            class_id: None,
            ty: ConeType::error("unresolved annotation class"),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_argument(mut self, name: Name, value: Expression) -> Self {
        self.arguments.insert(name, value);
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Expression> {
        self.arguments.get(&Name::new(name))
    }

    pub fn is(&self, class_id: &str) -> bool {
        self.class_id
            .as_ref()
            .is_some_and(|id| id.as_string() == class_id)
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const { value, .. } => match value {
                ForeignLiteral::Null => f.write_str("null"),
                ForeignLiteral::Boolean(value) => write!(f, "{value}"),
                ForeignLiteral::Char(value) => write!(f, "'{value}'"),
                ForeignLiteral::Byte(value) => write!(f, "{value}"),
                ForeignLiteral::Short(value) => write!(f, "{value}"),
                ForeignLiteral::Int(value) => write!(f, "{value}"),
                ForeignLiteral::Long(value) => write!(f, "{value}L"),
                ForeignLiteral::Float(value) => write!(f, "{value}f"),
                ForeignLiteral::Double(value) => write!(f, "{value}"),
                ForeignLiteral::String(value) => write!(f, "{value:?}"),
            },
            Self::Array { elements, .. } => {
                f.write_str("[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Self::EnumEntry { enum_class, entry } => write!(f, "{}.{}", enum_class, entry.name()),
            Self::UnresolvedEnumEntry { enum_class, name } => match enum_class {
                Some(enum_class) => write!(f, "<unresolved {enum_class}.{name}>"),
                None => write!(f, "<unresolved {name}>"),
            },
            Self::GetClass { argument, .. } => write!(f, "{argument}::class"),
            Self::Annotation(call) => write!(f, "{call}"),
            Self::Error { reason } => write!(f, "ERROR({reason})"),
        }
    }
}

impl fmt::Display for AnnotationCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class_id {
            Some(class_id) => write!(f, "@{class_id}")?,
            None => f.write_str("@<unresolved>")?,
        }
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (index, (name, value)) in self.arguments.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        f.write_str(")")
    }
}
