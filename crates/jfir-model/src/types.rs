//! Foreign type nodes.

use crate::annotations::ForeignAnnotation;
use jfir_common::{ClassId, Name};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identity of a foreign type parameter: the declaring element plus the
/// parameter's name.
///
/// `owner` is any string that is unique per declaring element, e.g.
/// `java/util/Map` for a class or `java/util/Collections#sort(1)` for a
/// method.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeParameterKey {
    pub owner: Arc<str>,
    pub name: Name,
}

impl TypeParameterKey {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: Arc::from(owner),
            name: Name::new(name),
        }
    }
}

impl fmt::Display for TypeParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.owner)
    }
}

impl fmt::Debug for TypeParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeParameterKey({self})")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignTypeParameter {
    pub key: TypeParameterKey,
    #[serde(default)]
    pub upper_bounds: Vec<ForeignType>,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

impl ForeignTypeParameter {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            key: TypeParameterKey::new(owner, name),
            upper_bounds: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: ForeignType) -> Self {
        self.upper_bounds.push(bound);
        self
    }

    pub fn name(&self) -> &Name {
        &self.key.name
    }
}

// =============================================================================
// ForeignType
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Float,
    Long,
    Double,
    Void,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ForeignClassifier {
    Class { class_id: ClassId },
    TypeParameter { key: TypeParameterKey },
    /// The classifier could not be resolved by the model's producer.
    Unresolved { name: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignClassifierType {
    pub classifier: ForeignClassifier,
    #[serde(default)]
    pub arguments: Vec<ForeignType>,
    /// A generic class used without arguments.
    #[serde(default)]
    pub is_raw: bool,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignPrimitiveType {
    pub primitive: PrimitiveKind,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignArrayType {
    pub component: Box<ForeignType>,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignWildcardType {
    pub bound: Option<Box<ForeignType>>,
    /// `? extends B` when true, `? super B` otherwise.
    #[serde(default = "default_true")]
    pub is_extends: bool,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ForeignType {
    Classifier(ForeignClassifierType),
    Primitive(ForeignPrimitiveType),
    Array(ForeignArrayType),
    Wildcard(ForeignWildcardType),
    /// A node the producer could not classify.
    Unknown { description: String },
}

impl ForeignType {
    pub fn class(class_id: &str) -> Self {
        Self::class_with_args(class_id, Vec::new())
    }

    pub fn class_with_args(class_id: &str, arguments: Vec<ForeignType>) -> Self {
        Self::Classifier(ForeignClassifierType {
            classifier: ForeignClassifier::Class {
                class_id: ClassId::from_string(class_id),
            },
            arguments,
            is_raw: false,
            annotations: Vec::new(),
        })
    }

    pub fn raw(class_id: &str) -> Self {
        Self::Classifier(ForeignClassifierType {
            classifier: ForeignClassifier::Class {
                class_id: ClassId::from_string(class_id),
            },
            arguments: Vec::new(),
            is_raw: true,
            annotations: Vec::new(),
        })
    }

    pub fn type_parameter(key: &TypeParameterKey) -> Self {
        Self::Classifier(ForeignClassifierType {
            classifier: ForeignClassifier::TypeParameter { key: key.clone() },
            arguments: Vec::new(),
            is_raw: false,
            annotations: Vec::new(),
        })
    }

    pub fn unresolved(name: &str) -> Self {
        Self::Classifier(ForeignClassifierType {
            classifier: ForeignClassifier::Unresolved {
                name: name.to_string(),
            },
            arguments: Vec::new(),
            is_raw: false,
            annotations: Vec::new(),
        })
    }

    pub fn primitive(primitive: PrimitiveKind) -> Self {
        Self::Primitive(ForeignPrimitiveType {
            primitive,
            annotations: Vec::new(),
        })
    }

    pub fn array(component: ForeignType) -> Self {
        Self::Array(ForeignArrayType {
            component: Box::new(component),
            annotations: Vec::new(),
        })
    }

    pub fn star() -> Self {
        Self::Wildcard(ForeignWildcardType {
            bound: None,
            is_extends: true,
            annotations: Vec::new(),
        })
    }

    pub fn extends(bound: ForeignType) -> Self {
        Self::Wildcard(ForeignWildcardType {
            bound: Some(Box::new(bound)),
            is_extends: true,
            annotations: Vec::new(),
        })
    }

    pub fn super_of(bound: ForeignType) -> Self {
        Self::Wildcard(ForeignWildcardType {
            bound: Some(Box::new(bound)),
            is_extends: false,
            annotations: Vec::new(),
        })
    }

    /// Attaches a type-use annotation.
    pub fn annotated(mut self, annotation: ForeignAnnotation) -> Self {
        match &mut self {
            Self::Classifier(ty) => ty.annotations.push(annotation),
            Self::Primitive(ty) => ty.annotations.push(annotation),
            Self::Array(ty) => ty.annotations.push(annotation),
            Self::Wildcard(ty) => ty.annotations.push(annotation),
            Self::Unknown { .. } => {}
        }
        self
    }

    pub fn annotations(&self) -> &[ForeignAnnotation] {
        match self {
            Self::Classifier(ty) => &ty.annotations,
            Self::Primitive(ty) => &ty.annotations,
            Self::Array(ty) => &ty.annotations,
            Self::Wildcard(ty) => &ty.annotations,
            Self::Unknown { .. } => &[],
        }
    }

    /// Class id of a class-typed node.
    pub fn class_id(&self) -> Option<&ClassId> {
        match self {
            Self::Classifier(ForeignClassifierType {
                classifier: ForeignClassifier::Class { class_id },
                ..
            }) => Some(class_id),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl fmt::Display for ForeignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classifier(ty) => {
                match &ty.classifier {
                    ForeignClassifier::Class { class_id } => write!(f, "{}", class_id.as_fq_name())?,
                    ForeignClassifier::TypeParameter { key } => write!(f, "{}", key.name)?,
                    ForeignClassifier::Unresolved { name } => write!(f, "{name}")?,
                }
                if !ty.arguments.is_empty() {
                    f.write_str("<")?;
                    for (index, argument) in ty.arguments.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Primitive(ty) => write!(f, "{}", format!("{:?}", ty.primitive).to_lowercase()),
            Self::Array(ty) => write!(f, "{}[]", ty.component),
            Self::Wildcard(ty) => match &ty.bound {
                None => f.write_str("?"),
                Some(bound) if ty.is_extends => write!(f, "? extends {bound}"),
                Some(bound) => write!(f, "? super {bound}"),
            },
            Self::Unknown { description } => write!(f, "<unknown: {description}>"),
        }
    }
}
