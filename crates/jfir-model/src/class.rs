//! Foreign classes, their members and packages.

use crate::annotations::{ForeignAnnotation, ForeignAnnotationValue, ForeignLiteral};
use crate::types::{ForeignType, ForeignTypeParameter};
use jfir_common::{ClassId, FqName, Modality, Name};
use serde::{Deserialize, Serialize};

/// Fq-name of the annotation that tags classes compiled from Kotlin.
pub const METADATA_CLASS_ID: &str = "kotlin/Metadata";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForeignClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForeignVisibility {
    #[default]
    Public,
    Protected,
    PackagePrivate,
    Private,
}

// =============================================================================
// Members
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignValueParameter {
    pub name: Option<Name>,
    #[serde(rename = "type")]
    pub ty: ForeignType,
    #[serde(default)]
    pub is_vararg: bool,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

impl ForeignValueParameter {
    pub fn new(name: &str, ty: ForeignType) -> Self {
        Self {
            name: Some(Name::new(name)),
            ty,
            is_vararg: false,
            annotations: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: ForeignAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignMethod {
    pub name: Name,
    pub return_type: ForeignType,
    #[serde(default)]
    pub value_parameters: Vec<ForeignValueParameter>,
    #[serde(default)]
    pub type_parameters: Vec<ForeignTypeParameter>,
    #[serde(default)]
    pub visibility: ForeignVisibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
    /// Default value of an annotation-class element.
    #[serde(default)]
    pub annotation_default: Option<ForeignAnnotationValue>,
}

impl ForeignMethod {
    pub fn new(name: &str, return_type: ForeignType) -> Self {
        Self {
            name: Name::new(name),
            return_type,
            value_parameters: Vec::new(),
            type_parameters: Vec::new(),
            visibility: ForeignVisibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            annotations: Vec::new(),
            annotation_default: None,
        }
    }

    pub fn with_parameter(mut self, parameter: ForeignValueParameter) -> Self {
        self.value_parameters.push(parameter);
        self
    }

    pub fn with_type_parameter(mut self, parameter: ForeignTypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_annotation(mut self, annotation: ForeignAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_default(mut self, value: ForeignAnnotationValue) -> Self {
        self.annotation_default = Some(value);
        self
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// `equals(Object)`, `hashCode()` and `toString()` redeclared in an
    /// interface. These come from `java.lang.Object` and are not members of
    /// the interface's frontend view.
    pub fn is_object_method_in_interface(&self, owner_kind: ForeignClassKind) -> bool {
        if owner_kind != ForeignClassKind::Interface || self.is_static {
            return false;
        }
        match (self.name.as_str(), self.value_parameters.as_slice()) {
            ("hashCode", []) | ("toString", []) => true,
            ("equals", [parameter]) => {
                parameter.ty.class_id().map(ClassId::as_string).as_deref() == Some("java/lang/Object")
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignField {
    pub name: Name,
    #[serde(rename = "type")]
    pub ty: ForeignType,
    #[serde(default)]
    pub visibility: ForeignVisibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_enum_entry: bool,
    #[serde(default)]
    pub initializer: Option<ForeignLiteral>,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

impl ForeignField {
    pub fn new(name: &str, ty: ForeignType) -> Self {
        Self {
            name: Name::new(name),
            ty,
            visibility: ForeignVisibility::Public,
            is_static: false,
            is_final: false,
            is_enum_entry: false,
            initializer: None,
            annotations: Vec::new(),
        }
    }

    pub fn constant(name: &str, ty: ForeignType, value: ForeignLiteral) -> Self {
        Self {
            is_static: true,
            is_final: true,
            initializer: Some(value),
            ..Self::new(name, ty)
        }
    }

    pub fn enum_entry(name: &str, enum_class: &str) -> Self {
        Self {
            is_static: true,
            is_final: true,
            is_enum_entry: true,
            ..Self::new(name, ForeignType::class(enum_class))
        }
    }

    pub fn annotated(mut self, annotation: ForeignAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignConstructor {
    #[serde(default)]
    pub visibility: ForeignVisibility,
    #[serde(default)]
    pub type_parameters: Vec<ForeignTypeParameter>,
    #[serde(default)]
    pub value_parameters: Vec<ForeignValueParameter>,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

impl ForeignConstructor {
    pub fn with_type_parameter(mut self, parameter: ForeignTypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_parameter(mut self, parameter: ForeignValueParameter) -> Self {
        self.value_parameters.push(parameter);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignRecordComponent {
    pub name: Name,
    #[serde(rename = "type")]
    pub ty: ForeignType,
    #[serde(default)]
    pub is_vararg: bool,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

// =============================================================================
// ForeignClass
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignClass {
    pub class_id: ClassId,
    pub kind: ForeignClassKind,
    #[serde(default)]
    pub visibility: ForeignVisibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default = "default_from_source")]
    pub is_from_source: bool,
    #[serde(default)]
    pub type_parameters: Vec<ForeignTypeParameter>,
    #[serde(default)]
    pub supertypes: Vec<ForeignType>,
    #[serde(default)]
    pub fields: Vec<ForeignField>,
    #[serde(default)]
    pub methods: Vec<ForeignMethod>,
    #[serde(default)]
    pub constructors: Vec<ForeignConstructor>,
    #[serde(default)]
    pub record_components: Vec<ForeignRecordComponent>,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
    #[serde(default)]
    pub inner_class_names: Vec<Name>,
    /// `permits` list of a sealed class.
    #[serde(default)]
    pub permitted_types: Vec<ForeignType>,
    /// The class gets an implicit no-argument constructor.
    #[serde(default)]
    pub has_default_constructor: bool,
}

fn default_from_source() -> bool {
    true
}

impl ForeignClass {
    pub fn new(class_id: &str, kind: ForeignClassKind) -> Self {
        Self {
            class_id: ClassId::from_string(class_id),
            kind,
            visibility: ForeignVisibility::Public,
            is_abstract: false,
            is_final: false,
            is_sealed: false,
            is_static: false,
            is_from_source: true,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            record_components: Vec::new(),
            annotations: Vec::new(),
            inner_class_names: Vec::new(),
            permitted_types: Vec::new(),
            has_default_constructor: false,
        }
    }

    pub fn with_type_parameter(mut self, parameter: ForeignTypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_supertype(mut self, supertype: ForeignType) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_field(mut self, field: ForeignField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: ForeignMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: ForeignConstructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_record_component(mut self, name: &str, ty: ForeignType) -> Self {
        self.record_components.push(ForeignRecordComponent {
            name: Name::new(name),
            ty,
            is_vararg: false,
            annotations: Vec::new(),
        });
        self
    }

    pub fn with_annotation(mut self, annotation: ForeignAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_inner_class(mut self, name: &str) -> Self {
        self.inner_class_names.push(Name::new(name));
        self
    }

    pub fn with_permitted(mut self, subtype: ForeignType) -> Self {
        self.permitted_types.push(subtype);
        self
    }

    pub fn with_visibility(mut self, visibility: ForeignVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_default_constructor(mut self) -> Self {
        self.has_default_constructor = true;
        self
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn make_sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn name(&self) -> Name {
        self.class_id.short_class_name()
    }

    pub fn outer_class_id(&self) -> Option<ClassId> {
        self.class_id.outer_class_id()
    }

    pub fn is_top_level(&self) -> bool {
        !self.class_id.is_nested()
    }

    pub fn is_record(&self) -> bool {
        self.kind == ForeignClassKind::Record
    }

    pub fn modality(&self) -> Modality {
        if self.is_sealed {
            Modality::Sealed
        } else if self.is_abstract
            || matches!(self.kind, ForeignClassKind::Interface | ForeignClassKind::Annotation)
        {
            Modality::Abstract
        } else if self.is_final || matches!(self.kind, ForeignClassKind::Enum | ForeignClassKind::Record) {
            Modality::Final
        } else {
            Modality::Open
        }
    }

    /// Classes compiled from Kotlin carry `@kotlin.Metadata` and are read
    /// through their own metadata instead of the foreign model.
    pub fn has_metadata_annotation(&self) -> bool {
        let metadata = ClassId::from_string(METADATA_CLASS_ID);
        self.annotations.iter().any(|annotation| annotation.is(&metadata))
    }

    pub fn method_by_name(&self, name: &str) -> Option<&ForeignMethod> {
        self.methods.iter().find(|method| method.name.as_str() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignPackage {
    pub fq_name: FqName,
    #[serde(default)]
    pub annotations: Vec<ForeignAnnotation>,
}

impl ForeignPackage {
    pub fn new(fq_name: &str) -> Self {
        Self {
            fq_name: FqName::new(fq_name),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: ForeignAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[cfg(test)]
#[path = "../tests/class_tests.rs"]
mod tests;
