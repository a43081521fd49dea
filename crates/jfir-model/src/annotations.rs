//! Foreign annotation instances.

use crate::types::ForeignType;
use jfir_common::{ClassId, Name};
use serde::{Deserialize, Serialize};

/// A literal constant as written in the foreign model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForeignLiteral {
    Null,
    Boolean(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ForeignAnnotationValue {
    Literal {
        value: ForeignLiteral,
    },
    Array {
        elements: Vec<ForeignAnnotationValue>,
    },
    /// `SomeEnum.ENTRY`; `enum_class` is absent when the enum could not be
    /// resolved by the model's producer.
    EnumValue {
        enum_class: Option<ClassId>,
        entry: Name,
    },
    ClassLiteral {
        #[serde(rename = "type")]
        ty: ForeignType,
    },
    Annotation {
        annotation: ForeignAnnotation,
    },
}

impl ForeignAnnotationValue {
    pub fn literal(value: ForeignLiteral) -> Self {
        Self::Literal { value }
    }

    pub fn string(value: &str) -> Self {
        Self::Literal {
            value: ForeignLiteral::String(value.to_string()),
        }
    }

    pub fn enum_value(enum_class: &str, entry: &str) -> Self {
        Self::EnumValue {
            enum_class: Some(ClassId::from_string(enum_class)),
            entry: Name::new(entry),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignAnnotationArgument {
    /// `None` for the single unnamed argument (`@A(42)`).
    pub name: Option<Name>,
    pub value: ForeignAnnotationValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignAnnotation {
    /// `None` when the annotation class could not be resolved.
    pub class_id: Option<ClassId>,
    #[serde(default)]
    pub arguments: Vec<ForeignAnnotationArgument>,
}

impl ForeignAnnotation {
    pub fn new(class_id: &str) -> Self {
        Self {
            class_id: Some(ClassId::from_string(class_id)),
            arguments: Vec::new(),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            class_id: None,
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: Option<&str>, value: ForeignAnnotationValue) -> Self {
        self.arguments.push(ForeignAnnotationArgument {
            name: name.map(Name::new),
            value,
        });
        self
    }

    pub fn is(&self, class_id: &ClassId) -> bool {
        self.class_id.as_ref() == Some(class_id)
    }
}
