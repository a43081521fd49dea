//! Translation of foreign annotations into frontend annotation calls.
//!
//! Java meta-annotations are replaced by their Kotlin counterparts:
//!
//! | Java | Kotlin |
//! |------|--------|
//! | `java.lang.annotation.Target` | `kotlin.annotation.Target(allowedTargets)` |
//! | `java.lang.annotation.Retention` | `kotlin.annotation.Retention(value)` |
//! | `java.lang.annotation.Documented` | `kotlin.annotation.MustBeDocumented` |
//! | `java.lang.Deprecated` | `kotlin.Deprecated(message)` |
//!
//! Every other annotation keeps its class id; its arguments are matched
//! against the annotation class's constructor parameters to find their
//! expected types. Nothing here fails: unresolvable classes and enum
//! entries become unresolved markers.

use crate::declarations::{ConstructorOrigin, JavaClass};
use crate::expression::{AnnotationCall, Expression};
use crate::session::InteropSession;
use jfir_common::limits::MAX_ANNOTATION_ARGUMENT_DEPTH;
use jfir_common::{ClassId, Name};
use jfir_model::{ForeignAnnotation, ForeignAnnotationValue, ForeignType};
use jfir_types::{ConeType, ConversionMode, TypeConverter, TypeParameterStack, TypeProjection, standard};
use std::sync::Arc;
use tracing::{debug, trace};

/// Java `ElementType` constants and the Kotlin `AnnotationTarget` entries
/// they stand for.
const TARGET_MAPPING: &[(&str, &[&str])] = &[
    ("PACKAGE", &[]),
    ("TYPE", &["CLASS", "FILE"]),
    ("ANNOTATION_TYPE", &["ANNOTATION_CLASS"]),
    ("TYPE_PARAMETER", &["TYPE_PARAMETER"]),
    ("FIELD", &["FIELD"]),
    ("LOCAL_VARIABLE", &["LOCAL_VARIABLE"]),
    ("PARAMETER", &["VALUE_PARAMETER"]),
    ("CONSTRUCTOR", &["CONSTRUCTOR"]),
    ("METHOD", &["FUNCTION", "PROPERTY_GETTER", "PROPERTY_SETTER"]),
    ("TYPE_USE", &["TYPE"]),
];

const RETENTION_MAPPING: &[(&str, &str)] = &[("RUNTIME", "RUNTIME"), ("CLASS", "BINARY"), ("SOURCE", "SOURCE")];

/// Kotlin targets for a Java `ElementType` constant; empty when unknown.
pub fn map_java_target(element_type: &str) -> &'static [&'static str] {
    TARGET_MAPPING
        .iter()
        .find(|(java, _)| *java == element_type)
        .map_or(&[], |(_, kotlin)| kotlin)
}

pub fn map_java_retention(policy: &str) -> Option<&'static str> {
    RETENTION_MAPPING
        .iter()
        .find(|(java, _)| *java == policy)
        .map(|(_, kotlin)| *kotlin)
}

/// The constructor parameters of an annotation class as the translator
/// needs them.
struct ParameterShape {
    name: Name,
    ty: Option<ConeType>,
}

pub struct AnnotationTranslator<'a> {
    session: &'a InteropSession,
    /// Resolves type parameters referenced by class literals.
    stack: Option<&'a TypeParameterStack>,
}

impl<'a> AnnotationTranslator<'a> {
    pub fn new(session: &'a InteropSession, stack: Option<&'a TypeParameterStack>) -> Self {
        Self { session, stack }
    }

    pub fn translate_all(&self, annotations: &[ForeignAnnotation]) -> Vec<AnnotationCall> {
        annotations.iter().map(|annotation| self.translate(annotation)).collect()
    }

    pub fn translate(&self, annotation: &ForeignAnnotation) -> AnnotationCall {
        self.translate_at_depth(annotation, 0)
    }

    /// Translates a free-standing value, such as an annotation parameter's
    /// default.
    pub fn translate_value(&self, value: &ForeignAnnotationValue, expected: Option<&ConeType>) -> Expression {
        self.value(value, expected, 0)
    }

    fn translate_at_depth(&self, annotation: &ForeignAnnotation, depth: u32) -> AnnotationCall {
        let Some(class_id) = &annotation.class_id else {
            debug!("AnnotationTranslator::translate: annotation class is unresolved");
            let mut call = AnnotationCall::unresolved();
            for argument in &annotation.arguments {
                let name = argument.name.clone().unwrap_or_else(value_name);
                call.arguments.insert(name, self.value(&argument.value, None, depth + 1));
            }
            return call;
        };
        match class_id.as_string().as_str() {
            standard::JAVA_TARGET => self.target(annotation),
            standard::JAVA_RETENTION => self.retention(annotation),
            standard::JAVA_DOCUMENTED => AnnotationCall::new(ClassId::from_string(standard::MUST_BE_DOCUMENTED)),
            standard::JAVA_DEPRECATED => self.deprecated(),
            _ => self.generic(class_id, annotation, depth),
        }
    }

    // -------------------------------------------------------------------------
    // Meta-annotations
    // -------------------------------------------------------------------------

    fn target(&self, annotation: &ForeignAnnotation) -> AnnotationCall {
        let target_class = ClassId::from_string(standard::ANNOTATION_TARGET);
        let mut names: Vec<&'static str> = Vec::new();
        for argument in &annotation.arguments {
            for element_type in enum_value_names(&argument.value) {
                for target in map_java_target(element_type.as_str()) {
                    if !names.contains(target) {
                        names.push(target);
                    }
                }
            }
        }
        let elements = names
            .into_iter()
            .map(|name| self.builtin_enum_entry(&target_class, &Name::new(name)))
            .collect();
        let array_type = ConeType::class(
            ClassId::from_string(standard::ARRAY),
            vec![TypeProjection::out(ConeType::class(target_class, Vec::new(), false))],
            false,
        );
        AnnotationCall::new(ClassId::from_string(standard::TARGET)).with_argument(
            Name::new("allowedTargets"),
            Expression::Array {
                elements,
                ty: Some(array_type),
            },
        )
    }

    fn retention(&self, annotation: &ForeignAnnotation) -> AnnotationCall {
        let call = AnnotationCall::new(ClassId::from_string(standard::RETENTION));
        let retention_class = ClassId::from_string(standard::ANNOTATION_RETENTION);
        let mapped = annotation
            .arguments
            .iter()
            .flat_map(|argument| enum_value_names(&argument.value))
            .find_map(|policy| map_java_retention(policy.as_str()));
        match mapped {
            Some(retention) => call.with_argument(
                value_name(),
                self.builtin_enum_entry(&retention_class, &Name::new(retention)),
            ),
            None => call,
        }
    }

    fn deprecated(&self) -> AnnotationCall {
        let message = jfir_model::ForeignLiteral::String(self.session.options().deprecated_message.clone());
        AnnotationCall::new(ClassId::from_string(standard::DEPRECATED)).with_argument(
            Name::new("message"),
            Expression::Const {
                value: message,
                ty: ConeType::string(),
            },
        )
    }

    fn builtin_enum_entry(&self, enum_class: &ClassId, name: &Name) -> Expression {
        match self.session.builtins().enum_entry(enum_class, name) {
            Some(entry) => Expression::EnumEntry {
                enum_class: enum_class.clone(),
                entry: entry.clone(),
            },
            None => Expression::UnresolvedEnumEntry {
                enum_class: Some(enum_class.clone()),
                name: name.clone(),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Generic annotations
    // -------------------------------------------------------------------------

    fn generic(&self, class_id: &ClassId, annotation: &ForeignAnnotation, depth: u32) -> AnnotationCall {
        let parameters = self.parameters_of(class_id);
        let mut call = AnnotationCall::new(class_id.clone());
        for argument in &annotation.arguments {
            let name = argument.name.clone().unwrap_or_else(value_name);
            let expected = match &parameters {
                Some(parameters) => match parameters.iter().find(|parameter| parameter.name == name) {
                    Some(parameter) => parameter.ty.as_ref(),
                    None => {
                        trace!(class_id = %class_id, argument = %name, "AnnotationTranslator: no such parameter");
                        continue;
                    }
                },
                None => None,
            };
            call.arguments.insert(name, self.value(&argument.value, expected, depth + 1));
        }
        call
    }

    /// Constructor parameters of an annotation class, or `None` when the
    /// class is unknown.
    fn parameters_of(&self, class_id: &ClassId) -> Option<Vec<ParameterShape>> {
        if let Some(parameters) = self.session.builtins().constructor_parameters(class_id) {
            return Some(
                parameters
                    .iter()
                    .map(|parameter| ParameterShape {
                        name: parameter.name.clone(),
                        ty: Some(if parameter.is_vararg {
                            array_of(parameter.ty.clone())
                        } else {
                            parameter.ty.clone()
                        }),
                    })
                    .collect(),
            );
        }
        let class = self.java_class(class_id)?;
        let constructor = class
            .constructors()
            .find(|constructor| constructor.origin == ConstructorOrigin::Annotation)?;
        let converter = TypeConverter::new(&class.stack, self.session, ConversionMode::AnnotationMember);
        Some(
            constructor
                .value_parameters
                .iter()
                .map(|parameter| ParameterShape {
                    name: parameter.name.clone(),
                    ty: parameter.ty.resolve(&converter).ok(),
                })
                .collect(),
        )
    }

    fn java_class(&self, class_id: &ClassId) -> Option<Arc<JavaClass>> {
        match self.session.provider().class_by_id(self.session, class_id) {
            Ok(class) => class,
            Err(error) => {
                debug!(class_id = %class_id, error = %error, "AnnotationTranslator: class lookup failed");
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Argument values
    // -------------------------------------------------------------------------

    fn value(&self, value: &ForeignAnnotationValue, expected: Option<&ConeType>, depth: u32) -> Expression {
        if depth > MAX_ANNOTATION_ARGUMENT_DEPTH {
            return Expression::error("annotation arguments nested too deeply");
        }
        match value {
            ForeignAnnotationValue::Literal { value } => {
                if let Some(expected) = expected.filter(|expected| is_array_type(expected)) {
                    let element = self.session.evaluator().evaluate(value, element_type(expected).as_ref());
                    return Expression::Array {
                        elements: vec![element],
                        ty: Some(expected.clone()),
                    };
                }
                self.session.evaluator().evaluate(value, expected)
            }
            ForeignAnnotationValue::Array { elements } => {
                let element_expected = expected.and_then(element_type);
                Expression::Array {
                    elements: elements
                        .iter()
                        .map(|element| self.value(element, element_expected.as_ref(), depth + 1))
                        .collect(),
                    ty: expected.cloned(),
                }
            }
            ForeignAnnotationValue::EnumValue { enum_class, entry } => {
                let resolved = self.enum_entry(enum_class.as_ref(), entry);
                match expected.filter(|expected| is_array_type(expected)) {
                    Some(expected) => Expression::Array {
                        elements: vec![resolved],
                        ty: Some(expected.clone()),
                    },
                    None => resolved,
                }
            }
            ForeignAnnotationValue::ClassLiteral { ty } => self.class_literal(ty),
            ForeignAnnotationValue::Annotation { annotation } => {
                Expression::Annotation(Box::new(self.translate_at_depth(annotation, depth + 1)))
            }
        }
    }

    fn enum_entry(&self, enum_class: Option<&ClassId>, name: &Name) -> Expression {
        let unresolved = || Expression::UnresolvedEnumEntry {
            enum_class: enum_class.cloned(),
            name: name.clone(),
        };
        let Some(enum_class) = enum_class else {
            return unresolved();
        };
        if let Some(entry) = self.session.builtins().enum_entry(enum_class, name) {
            return Expression::EnumEntry {
                enum_class: enum_class.clone(),
                entry: entry.clone(),
            };
        }
        match self.java_class(enum_class) {
            Some(class) => match class.enum_entry(name) {
                Some(entry) => Expression::EnumEntry {
                    enum_class: enum_class.clone(),
                    entry: entry.symbol.clone(),
                },
                None => unresolved(),
            },
            None => unresolved(),
        }
    }

    fn class_literal(&self, ty: &ForeignType) -> Expression {
        let empty = TypeParameterStack::new();
        let stack = self.stack.unwrap_or(&empty);
        let converter = TypeConverter::new(stack, self.session, ConversionMode::Default);
        match converter.convert(ty) {
            Ok(converted) => {
                let argument = converted.lower_bound_owned();
                let ty = ConeType::class(
                    ClassId::from_string(standard::KCLASS),
                    vec![TypeProjection::invariant(argument.clone())],
                    false,
                );
                Expression::GetClass { argument, ty }
            }
            Err(error) => Expression::error(error.to_string()),
        }
    }
}

fn value_name() -> Name {
    Name::new("value")
}

/// Entry names of an enum value or an array of enum values.
fn enum_value_names(value: &ForeignAnnotationValue) -> Vec<Name> {
    match value {
        ForeignAnnotationValue::EnumValue { entry, .. } => vec![entry.clone()],
        ForeignAnnotationValue::Array { elements } => elements.iter().flat_map(enum_value_names).collect(),
        _ => Vec::new(),
    }
}

fn array_of(element: ConeType) -> ConeType {
    ConeType::class(
        ClassId::from_string(standard::ARRAY),
        vec![TypeProjection::out(element)],
        false,
    )
}

fn is_array_type(ty: &ConeType) -> bool {
    ty.class_id().is_some_and(|class_id| {
        class_id.package_fq_name().as_str() == "kotlin" && class_id.short_class_name().as_str().ends_with("Array")
    })
}

/// Element type of `Array<E>` or of a primitive array class.
fn element_type(array: &ConeType) -> Option<ConeType> {
    let class_id = array.class_id()?;
    if class_id.as_string() == standard::ARRAY {
        return array.arguments().first().and_then(TypeProjection::ty).cloned();
    }
    let name = class_id.short_class_name();
    let element = name.as_str().strip_suffix("Array")?;
    if element.is_empty() {
        return None;
    }
    Some(ConeType::simple(&format!("kotlin/{element}")))
}

#[cfg(test)]
#[path = "../tests/annotations_tests.rs"]
mod tests;
