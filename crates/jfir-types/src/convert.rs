//! Foreign-type-to-cone-type conversion.
//!
//! A foreign type of unknown nullability becomes a flexible type whose
//! lower bound is the non-null instantiation and whose upper bound is the
//! nullable one:
//!
//! | Foreign | Cone |
//! |---------|------|
//! | `String` | `(String..String?)` |
//! | `List<String>` | `(List<String!>..List<String!>?)` |
//! | `List<? super String>` | `(MutableList<in String!>..MutableList<in String!>?)` |
//! | `List` (raw) | `raw (MutableList<Any?>..MutableList<*>?)` |
//! | `T` | `(T & Any..T?)` |
//! | `int[]` | `(IntArray..IntArray?)` |
//! | `String[]` | `(Array<String!>..Array<out String!>?)` |
//!
//! # Modes
//!
//! The mode decides how much of the surrounding world the converter may
//! consult. In the first round of type-parameter bound resolution it must
//! not ask the [`ClassifierLookup`] for type parameters or bounds of other
//! classes: that would trigger their bound resolution, which may lead
//! straight back to the class being built. Only the cheap
//! [`ClassifierLookup::type_parameter_count`] is used there.
//!
//! First-round results skip variance-aware projection and use star
//! projections for raw lower bounds. The second round recomputes them.

use crate::class_map::{self, standard};
use crate::cone::{ConeType, TypeAttributes, TypeProjection};
use crate::erasure::erase_upper_bound;
use crate::lookup::{ClassifierLookup, TypeParameterInfo};
use crate::nullability::make_definitely_not_null;
use crate::stack::TypeParameterStack;
use jfir_common::{ClassId, Result, Variance};
use jfir_model::{
    ForeignAnnotation, ForeignArrayType, ForeignClassifier, ForeignClassifierType, ForeignType,
    ForeignWildcardType, PrimitiveKind,
};
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    Default,
    /// Annotation member types: never flexible, arrays stay invariant.
    AnnotationMember,
    /// Supertypes: collapsed to the lower bound.
    Supertype,
    TypeParameterBoundFirstRound,
    TypeParameterBoundAfterFirstRound,
}

impl ConversionMode {
    pub fn is_first_round(self) -> bool {
        self == Self::TypeParameterBoundFirstRound
    }

    /// Mode used for type arguments of a type converted in this mode.
    pub fn for_arguments(self) -> Self {
        match self {
            Self::Supertype => Self::Default,
            other => other,
        }
    }

    fn collapses_to_lower_bound(self) -> bool {
        matches!(self, Self::AnnotationMember | Self::Supertype)
    }
}

#[derive(Clone, Copy)]
pub struct TypeConverter<'a> {
    stack: &'a TypeParameterStack,
    lookup: &'a dyn ClassifierLookup,
    mode: ConversionMode,
}

impl<'a> TypeConverter<'a> {
    pub fn new(stack: &'a TypeParameterStack, lookup: &'a dyn ClassifierLookup, mode: ConversionMode) -> Self {
        Self { stack, lookup, mode }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn with_mode(&self, mode: ConversionMode) -> TypeConverter<'a> {
        TypeConverter { mode, ..*self }
    }

    pub fn convert(&self, ty: &ForeignType) -> Result<ConeType> {
        let converted = match ty {
            ForeignType::Classifier(classifier) => self.convert_classifier(classifier)?,
            ForeignType::Primitive(primitive) => {
                primitive_type(primitive.primitive).with_attributes(annotation_attributes(&primitive.annotations))
            }
            ForeignType::Array(array) => self.convert_array(array)?,
            ForeignType::Wildcard(wildcard) => match &wildcard.bound {
                Some(bound) => self.convert(bound)?,
                None => ConeType::flexible_any(),
            },
            ForeignType::Unknown { description } => {
                debug!(description = %description, "TypeConverter::convert: unknown foreign type");
                ConeType::error(format!("unknown foreign type `{description}`"))
            }
        };
        Ok(if self.mode.collapses_to_lower_bound() {
            converted.lower_bound_owned()
        } else {
            converted
        })
    }

    /// Converts a type argument. A missing type is a star projection.
    pub fn convert_projection(
        &self,
        ty: Option<&ForeignType>,
        parameter: Option<&TypeParameterInfo>,
    ) -> Result<TypeProjection> {
        let Some(ty) = ty else {
            return Ok(TypeProjection::Star);
        };
        match ty {
            ForeignType::Wildcard(wildcard) => self.convert_wildcard(wildcard, parameter),
            other => Ok(TypeProjection::invariant(self.convert(other)?)),
        }
    }

    // -------------------------------------------------------------------------
    // Node kinds
    // -------------------------------------------------------------------------

    fn convert_classifier(&self, ty: &ForeignClassifierType) -> Result<ConeType> {
        let attributes = annotation_attributes(&ty.annotations);
        match &ty.classifier {
            ForeignClassifier::TypeParameter { key } => {
                let symbol = self.stack.get(key)?;
                let lower = make_definitely_not_null(ConeType::type_parameter(symbol.clone(), false), None);
                let upper = ConeType::type_parameter(symbol, true);
                Ok(ConeType::flexible(lower, upper).with_attributes(attributes))
            }
            ForeignClassifier::Unresolved { name } => {
                debug!(name = %name, "TypeConverter::convert: unresolved classifier");
                Ok(ConeType::error(format!("unresolved classifier `{name}`")))
            }
            ForeignClassifier::Class { class_id } => self.convert_class_type(class_id, ty, attributes),
        }
    }

    fn convert_class_type(
        &self,
        java_id: &ClassId,
        ty: &ForeignClassifierType,
        attributes: TypeAttributes,
    ) -> Result<ConeType> {
        let mut class_id = self.map_class_id(java_id);

        if has_super_wildcard_last(&ty.arguments) {
            if let Some(mutable) = class_map::read_only_to_mutable(&class_id) {
                trace!(from = %class_id, to = %mutable, "TypeConverter: super wildcard selects mutable");
                class_id = mutable;
            }
        }

        let parameter_count = self.lookup.type_parameter_count(&class_id).unwrap_or(0);
        if ty.is_raw || (ty.arguments.is_empty() && parameter_count > 0) {
            return Ok(self.convert_raw(class_id).with_attributes(attributes));
        }

        let parameters = if self.mode.is_first_round() {
            None
        } else {
            self.lookup.class_type_parameters(&class_id)
        };
        let argument_converter = self.with_mode(self.mode.for_arguments());
        let mut arguments = Vec::with_capacity(ty.arguments.len());
        for (index, argument) in ty.arguments.iter().enumerate() {
            let parameter = parameters.as_ref().and_then(|parameters| parameters.get(index));
            arguments.push(argument_converter.convert_projection(Some(argument), parameter)?);
        }

        let lower = ConeType::class(class_id.clone(), arguments.clone(), false);
        let upper = ConeType::class(class_id, arguments, true);
        Ok(ConeType::flexible(lower, upper).with_attributes(attributes))
    }

    /// A generic class used without arguments.
    ///
    /// Raw read-only collections are seen as their mutable counterparts in
    /// both bounds.
    fn convert_raw(&self, class_id: ClassId) -> ConeType {
        let class_id = class_map::read_only_to_mutable(&class_id).unwrap_or(class_id);
        let count = self.lookup.type_parameter_count(&class_id).unwrap_or(0);
        let stars = vec![TypeProjection::Star; count];

        let lower_arguments = match self.raw_parameters(&class_id) {
            Some(parameters) if parameters.len() >= count => parameters
                .iter()
                .take(count)
                .map(|parameter| TypeProjection::invariant(erase_upper_bound(&parameter.symbol, self.lookup)))
                .collect(),
            _ => stars.clone(),
        };
        ConeType::raw(
            ConeType::class(class_id.clone(), lower_arguments, false),
            ConeType::class(class_id, stars, true),
        )
    }

    fn raw_parameters(&self, class_id: &ClassId) -> Option<Vec<TypeParameterInfo>> {
        if self.mode.is_first_round() {
            return None;
        }
        self.lookup.class_type_parameters(class_id)
    }

    fn convert_array(&self, array: &ForeignArrayType) -> Result<ConeType> {
        let attributes = annotation_attributes(&array.annotations);
        if let ForeignType::Primitive(primitive) = array.component.as_ref() {
            if let Some(class_id) = class_map::primitive_array_class_id(primitive.primitive) {
                let lower = ConeType::class(class_id.clone(), Vec::new(), false);
                let upper = ConeType::class(class_id, Vec::new(), true);
                return Ok(ConeType::flexible(lower, upper).with_attributes(attributes));
            }
        }

        let element = self.with_mode(self.mode.for_arguments()).convert(&array.component)?;
        let array_id = ClassId::from_string(standard::ARRAY);
        let lower = ConeType::class(array_id.clone(), vec![TypeProjection::invariant(element.clone())], false);
        let upper_argument = if self.mode == ConversionMode::AnnotationMember {
            TypeProjection::invariant(element)
        } else {
            TypeProjection::out(element)
        };
        let upper = ConeType::class(array_id, vec![upper_argument], true);
        Ok(ConeType::flexible(lower, upper).with_attributes(attributes))
    }

    fn convert_wildcard(
        &self,
        wildcard: &ForeignWildcardType,
        parameter: Option<&TypeParameterInfo>,
    ) -> Result<TypeProjection> {
        let Some(bound) = &wildcard.bound else {
            return Ok(TypeProjection::Star);
        };
        let projection = if wildcard.is_extends { Variance::Out } else { Variance::In };
        let declared = parameter.map_or(Variance::Invariant, |parameter| parameter.variance);
        if !Variance::allows_projection(declared, projection) {
            return Ok(TypeProjection::Star);
        }

        let mut bound_type = self.convert(bound)?;
        if !wildcard.annotations.is_empty() {
            let mut attributes = bound_type.attributes().cloned().unwrap_or_default();
            attributes
                .wildcard_annotations
                .extend(wildcard.annotations.iter().filter_map(|annotation| annotation.class_id.clone()));
            bound_type = bound_type.with_attributes(attributes);
        }
        let variance = if declared == projection {
            Variance::Invariant
        } else {
            projection
        };
        Ok(TypeProjection::Projected {
            variance,
            ty: bound_type,
        })
    }

    fn map_class_id(&self, java_id: &ClassId) -> ClassId {
        if self.mode == ConversionMode::AnnotationMember && java_id.as_string() == standard::JAVA_CLASS {
            return ClassId::from_string(standard::KCLASS);
        }
        class_map::map_java_to_kotlin(java_id).unwrap_or_else(|| java_id.clone())
    }
}

fn has_super_wildcard_last(arguments: &[ForeignType]) -> bool {
    matches!(
        arguments.last(),
        Some(ForeignType::Wildcard(ForeignWildcardType {
            bound: Some(_),
            is_extends: false,
            ..
        }))
    )
}

fn annotation_attributes(annotations: &[ForeignAnnotation]) -> TypeAttributes {
    TypeAttributes::with_type_use(annotations.iter().filter_map(|annotation| annotation.class_id.clone()))
}

/// The cone type of a foreign primitive, e.g. for constant initializers.
pub fn primitive_type(primitive: PrimitiveKind) -> ConeType {
    ConeType::class(class_map::primitive_class_id(primitive), Vec::new(), false)
}

#[cfg(test)]
#[path = "../tests/convert_tests.rs"]
mod tests;
