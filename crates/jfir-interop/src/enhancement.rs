//! Signature enhancement: nullability and mutability of Java member types.
//!
//! Converted foreign types are flexible, `(T..T?)`. Enhancement narrows
//! them where annotations give evidence:
//!
//! | Qualifier | Result |
//! |-----------|--------|
//! | `Nullable` | upper bound, `T?` |
//! | `NotNull` | lower bound, `T` (type parameters with a nullable bound become `T & Any`) |
//! | none | unchanged, `(T..T?)` |
//! | `ReadOnly` / `Mutable` | collection class swapped for its read-only / mutable counterpart |
//!
//! Qualifiers come from annotations on the member or parameter, from
//! type-use annotations recorded in the type's attributes, and from
//! default-nullability annotations on the package, the enclosing classes
//! and the member itself. A default-reset annotation drops everything
//! inherited from further out.
//!
//! Each member is enhanced at most once per session; results are cached by
//! callable symbol. Type-parameter bounds go through the same two rounds as
//! class type parameters: a first round that never looks at other classes'
//! type parameters, then a second round that is enhanced head-only before it
//! is enhanced fully, so bounds that refer to each other see a resolved head
//! while their own arguments are being enhanced.

use crate::declarations::{
    DeclarationStatus, JavaClass, JavaConstructor, JavaEnumEntry, JavaField, JavaMethod, JavaTypeParameter,
    JavaValueParameter, SyntheticProperty, TypeParameterRef,
};
use crate::session::InteropSession;
use jfir_common::{
    CallableId, ClassId, ClassKind, DefaultNullabilityTarget, FqName, Name, NullabilitySettings, Result,
    SessionCache,
};
use jfir_model::{ForeignAnnotation, ForeignType};
use jfir_types::{
    CallableSymbol, ClassLikeType, ClassSymbol, ClassifierLookup, ConeType, ConversionMode, Substitutor,
    TypeConverter, TypeParameterStack, TypeParameterSymbol, TypeRef, class_map,
    erase_upper_bound, make_definitely_not_null, standard,
};
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace, warn};

// =============================================================================
// Qualifiers
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NullabilityQualifier {
    Nullable,
    NotNull,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MutabilityQualifier {
    ReadOnly,
    Mutable,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeQualifiers {
    pub nullability: NullabilityQualifier,
    pub mutability: MutabilityQualifier,
}

impl TypeQualifiers {
    /// Qualifiers named by a set of annotation classes. Contradicting
    /// annotations cancel out.
    pub fn from_annotations<'a>(
        annotations: impl IntoIterator<Item = &'a ClassId>,
        settings: &NullabilitySettings,
    ) -> Self {
        let (mut nullable, mut not_null, mut read_only, mut mutable) = (false, false, false, false);
        for class_id in annotations {
            let fq_name = class_id.as_fq_name();
            nullable |= settings.is_nullable(&fq_name);
            not_null |= settings.is_not_null(&fq_name);
            read_only |= settings.is_read_only(&fq_name);
            mutable |= settings.is_mutable(&fq_name);
        }
        Self {
            nullability: match (nullable, not_null) {
                (true, false) => NullabilityQualifier::Nullable,
                (false, true) => NullabilityQualifier::NotNull,
                _ => NullabilityQualifier::Unknown,
            },
            mutability: match (read_only, mutable) {
                (true, false) => MutabilityQualifier::ReadOnly,
                (false, true) => MutabilityQualifier::Mutable,
                _ => MutabilityQualifier::Unknown,
            },
        }
    }
}

/// Positions for which a default-not-null annotation is in effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultQualifiers {
    not_null: SmallVec<[DefaultNullabilityTarget; 5]>,
}

impl DefaultQualifiers {
    pub fn applies_to(&self, target: DefaultNullabilityTarget) -> bool {
        self.not_null.contains(&target)
    }

    pub fn is_empty(&self) -> bool {
        self.not_null.is_empty()
    }

    /// Defaults in effect inside a declaration carrying `annotations`.
    pub fn with_annotations(&self, annotations: &[ForeignAnnotation], settings: &NullabilitySettings) -> Self {
        let fq_names: Vec<FqName> = annotations
            .iter()
            .filter_map(|annotation| annotation.class_id.as_ref())
            .map(ClassId::as_fq_name)
            .collect();
        let mut result = if fq_names.iter().any(|fq_name| settings.is_default_reset(fq_name)) {
            Self::default()
        } else {
            self.clone()
        };
        for fq_name in &fq_names {
            for target in settings.default_targets(fq_name).unwrap_or_default() {
                if !result.not_null.contains(target) {
                    result.not_null.push(*target);
                }
            }
        }
        result
    }
}

/// Where an enhanced type occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    ValueParameter,
    ReturnType,
    Field,
    TypeParameterBound,
    TypeArgument,
    Supertype,
}

impl Position {
    fn default_target(self) -> Option<DefaultNullabilityTarget> {
        match self {
            Self::ValueParameter => Some(DefaultNullabilityTarget::ValueParameter),
            Self::ReturnType => Some(DefaultNullabilityTarget::ReturnType),
            Self::Field => Some(DefaultNullabilityTarget::Field),
            Self::TypeParameterBound => Some(DefaultNullabilityTarget::TypeParameterBound),
            Self::TypeArgument => Some(DefaultNullabilityTarget::TypeUse),
            Self::Supertype => None,
        }
    }
}

// =============================================================================
// Enhanced members
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct EnhancedTypeParameter {
    pub symbol: TypeParameterSymbol,
    pub bounds: Vec<ConeType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnhancedValueParameter {
    pub name: Name,
    pub ty: ConeType,
    pub is_vararg: bool,
    pub has_default_value: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Method,
    Constructor,
}

/// A method or constructor with resolved, enhanced types.
#[derive(Clone, Debug, PartialEq)]
pub struct EnhancedFunction {
    pub symbol: CallableSymbol,
    pub name: Name,
    pub kind: FunctionKind,
    pub containing_class: ClassId,
    pub dispatch_receiver: Option<ConeType>,
    pub type_parameters: Vec<EnhancedTypeParameter>,
    pub value_parameters: Vec<EnhancedValueParameter>,
    pub return_type: ConeType,
    pub status: DeclarationStatus,
    pub is_static: bool,
}

impl EnhancedFunction {
    pub fn callable_id(&self) -> &CallableId {
        self.symbol.callable_id()
    }

    /// The function as seen through a subclass that instantiates the
    /// containing class's type parameters.
    pub fn substitute(&self, substitutor: &Substitutor) -> Self {
        if substitutor.is_empty() {
            return self.clone();
        }
        Self {
            type_parameters: self
                .type_parameters
                .iter()
                .map(|parameter| EnhancedTypeParameter {
                    symbol: parameter.symbol.clone(),
                    bounds: parameter.bounds.iter().map(|bound| substitutor.substitute(bound)).collect(),
                })
                .collect(),
            value_parameters: self
                .value_parameters
                .iter()
                .map(|parameter| EnhancedValueParameter {
                    ty: substitutor.substitute(&parameter.ty),
                    ..parameter.clone()
                })
                .collect(),
            return_type: substitutor.substitute(&self.return_type),
            ..self.clone()
        }
    }

    /// Name and erased parameter classifiers. Functions with equal erased
    /// signatures override one another.
    pub fn erased_signature(&self, lookup: &dyn ClassifierLookup) -> String {
        let mut signature = format!("{}(", self.name);
        for (index, parameter) in self.value_parameters.iter().enumerate() {
            if index > 0 {
                signature.push(',');
            }
            signature.push_str(&erased_classifier(&parameter.ty, lookup));
        }
        signature.push(')');
        signature
    }
}

fn erased_classifier(ty: &ConeType, lookup: &dyn ClassifierLookup) -> String {
    match ty.lower_bound() {
        ConeType::ClassLike(class) => class.class_id.as_string(),
        ConeType::TypeParameter(parameter) => erased_classifier(&erase_upper_bound(&parameter.symbol, lookup), lookup),
        ConeType::DefinitelyNotNull(inner) => erased_classifier(inner, lookup),
        ConeType::Flexible(_) | ConeType::Raw(_) | ConeType::Error { .. } => standard::ANY.to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Field,
    EnumEntry,
    /// A property with no foreign counterpart, such as `entries`.
    Synthetic,
    /// A method of an annotation class seen as a property.
    AnnotationMember,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnhancedProperty {
    pub symbol: CallableSymbol,
    pub name: Name,
    pub kind: PropertyKind,
    pub containing_class: ClassId,
    pub dispatch_receiver: Option<ConeType>,
    pub return_type: ConeType,
    pub is_var: bool,
    pub is_static: bool,
    pub status: DeclarationStatus,
}

impl EnhancedProperty {
    pub fn substitute(&self, substitutor: &Substitutor) -> Self {
        Self {
            return_type: substitutor.substitute(&self.return_type),
            ..self.clone()
        }
    }
}

// =============================================================================
// SignatureEnhancement
// =============================================================================

pub struct SignatureEnhancement {
    functions: SessionCache<CallableSymbol, Result<Arc<EnhancedFunction>>>,
    properties: SessionCache<CallableSymbol, Result<Arc<EnhancedProperty>>>,
    class_defaults: SessionCache<ClassSymbol, DefaultQualifiers>,
    package_defaults: SessionCache<FqName, DefaultQualifiers>,
    enhanced_members: AtomicUsize,
}

impl Default for SignatureEnhancement {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureEnhancement {
    pub fn new() -> Self {
        Self {
            functions: SessionCache::new("enhanced_functions"),
            properties: SessionCache::new("enhanced_properties"),
            class_defaults: SessionCache::new("class_default_qualifiers"),
            package_defaults: SessionCache::new("package_default_qualifiers"),
            enhanced_members: AtomicUsize::new(0),
        }
    }

    /// Number of members enhanced so far.
    #[cfg(test)]
    pub(crate) fn enhanced_member_count(&self) -> usize {
        self.enhanced_members.load(Ordering::Relaxed)
    }

    fn count_member(&self, symbol: &CallableSymbol) {
        let enhanced = self.enhanced_members.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(callable = %symbol.callable_id(), enhanced, "SignatureEnhancement: enhancing member");
    }

    // -------------------------------------------------------------------------
    // Default qualifiers
    // -------------------------------------------------------------------------

    pub fn package_default_qualifiers(&self, session: &InteropSession, package: &FqName) -> DefaultQualifiers {
        if session.options().ignore_nullability_annotations {
            return DefaultQualifiers::default();
        }
        self.package_defaults.get_or_compute(package, || {
            let annotations = session
                .facade()
                .package(session, package)
                .map(|package| package.annotations.clone())
                .unwrap_or_default();
            DefaultQualifiers::default().with_annotations(&annotations, &session.options().nullability)
        })
    }

    /// Defaults in effect inside `class`: package, then every enclosing
    /// class from the outermost in, then the class itself.
    pub fn class_default_qualifiers(&self, session: &InteropSession, class: &JavaClass) -> DefaultQualifiers {
        if session.options().ignore_nullability_annotations {
            return DefaultQualifiers::default();
        }
        self.class_defaults.get_or_compute(&class.symbol, || {
            let outer = class
                .parent
                .as_ref()
                .and_then(|parent| session.symbols().class(parent).ok())
                .map(|parent| self.class_default_qualifiers(session, &parent));
            let base = match outer {
                Some(outer) => outer,
                None => self.package_default_qualifiers(session, class.class_id.package_fq_name()),
            };
            base.with_annotations(&class.origin.annotations, &session.options().nullability)
        })
    }

    fn member_defaults(
        &self,
        session: &InteropSession,
        class: &JavaClass,
        annotations: &[ForeignAnnotation],
    ) -> DefaultQualifiers {
        let class_defaults = self.class_default_qualifiers(session, class);
        if session.options().ignore_nullability_annotations {
            return class_defaults;
        }
        class_defaults.with_annotations(annotations, &session.options().nullability)
    }

    // -------------------------------------------------------------------------
    // Type-parameter bounds
    // -------------------------------------------------------------------------

    /// First round: copies of `parameters` with bounds converted without
    /// consulting other classes' type parameters. The copies replace the
    /// originals in the symbol store.
    pub fn resolve_bounds_first_round(
        &self,
        session: &InteropSession,
        stack: &TypeParameterStack,
        parameters: &[Arc<JavaTypeParameter>],
    ) -> Result<Vec<Arc<JavaTypeParameter>>> {
        let converter = TypeConverter::new(stack, session, ConversionMode::TypeParameterBoundFirstRound);
        parameters
            .iter()
            .map(|parameter| {
                let bounds = parameter
                    .bounds()
                    .iter()
                    .map(|bound| bound.resolve(&converter).map(TypeRef::resolved))
                    .collect::<Result<Vec<_>>>()?;
                let copy = Arc::new(parameter.with_bounds(bounds));
                session.symbols().register_type_parameter(Arc::clone(&copy));
                Ok(copy)
            })
            .collect()
    }

    /// Second round for a class: its own parameters' bounds are reconverted
    /// from the foreign declaration and enhanced. Returns the new parameter
    /// copies; the class keeps its first-round list until the caller
    /// replaces it.
    pub fn enhance_class_bounds(
        &self,
        session: &InteropSession,
        class: &JavaClass,
    ) -> Result<Vec<Arc<JavaTypeParameter>>> {
        let parameters = class.own_type_parameters();
        if parameters.is_empty() {
            return Ok(Vec::new());
        }
        debug!(class_id = %class.class_id, parameters = parameters.len(), "SignatureEnhancement::enhance_class_bounds");
        let initial: Vec<Vec<TypeRef>> = class
            .origin
            .type_parameters
            .iter()
            .map(|parameter| initial_bounds(&parameter.upper_bounds))
            .collect();
        let defaults = self.class_default_qualifiers(session, class);
        self.bounds_after_first_round(session, &class.stack, &parameters, &initial, &defaults)
    }

    /// Reconverts `initial` and enhances it twice, head-only first. Each
    /// pass registers fresh copies of `parameters`, so the full pass sees
    /// the head-only bounds of sibling parameters.
    fn bounds_after_first_round(
        &self,
        session: &InteropSession,
        stack: &TypeParameterStack,
        parameters: &[Arc<JavaTypeParameter>],
        initial: &[Vec<TypeRef>],
        defaults: &DefaultQualifiers,
    ) -> Result<Vec<Arc<JavaTypeParameter>>> {
        let converter = TypeConverter::new(stack, session, ConversionMode::TypeParameterBoundAfterFirstRound);
        let converted = initial
            .iter()
            .map(|bounds| bounds.iter().map(|bound| bound.resolve(&converter)).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;

        let enhancer = TypeEnhancer::new(session, defaults);
        let mut current = parameters.to_vec();
        for head_only in [true, false] {
            current = current
                .iter()
                .zip(&converted)
                .map(|(parameter, bounds)| {
                    let enhanced = bounds
                        .iter()
                        .map(|bound| {
                            TypeRef::resolved(enhancer.enhance(
                                bound.clone(),
                                &[],
                                Position::TypeParameterBound,
                                head_only,
                                None,
                            ))
                        })
                        .collect();
                    let copy = Arc::new(parameter.with_bounds(enhanced));
                    session.symbols().register_type_parameter(Arc::clone(&copy));
                    copy
                })
                .collect();
        }
        Ok(current)
    }

    /// Both rounds for the type parameters of a method or constructor. The
    /// member's own parameter objects keep their foreign bounds.
    fn enhance_member_type_parameters(
        &self,
        session: &InteropSession,
        stack: &TypeParameterStack,
        parameters: &[Arc<JavaTypeParameter>],
        defaults: &DefaultQualifiers,
    ) -> Result<Vec<EnhancedTypeParameter>> {
        if parameters.is_empty() {
            return Ok(Vec::new());
        }
        let initial: Vec<Vec<TypeRef>> = parameters.iter().map(|parameter| parameter.bounds()).collect();
        let first_round = self.resolve_bounds_first_round(session, stack, parameters)?;
        let second_round = self.bounds_after_first_round(session, stack, &first_round, &initial, defaults)?;
        Ok(second_round
            .iter()
            .map(|parameter| EnhancedTypeParameter {
                symbol: parameter.symbol.clone(),
                bounds: parameter.resolved_bounds(),
            })
            .collect())
    }

    // -------------------------------------------------------------------------
    // Supertypes
    // -------------------------------------------------------------------------

    /// Supertypes of `class` converted in supertype mode. Their arguments
    /// are enhanced as type uses; a supertype that cannot be converted
    /// becomes an error type.
    pub fn resolve_supertypes(&self, session: &InteropSession, class: &JavaClass) -> Vec<ConeType> {
        let converter = TypeConverter::new(&class.stack, session, ConversionMode::Supertype);
        let defaults = self.class_default_qualifiers(session, class);
        let enhancer = TypeEnhancer::new(session, &defaults);
        class
            .supertype_refs()
            .iter()
            .map(|supertype| match supertype.resolve(&converter) {
                Ok(ty) => enhancer.enhance(ty, &[], Position::Supertype, false, None),
                Err(error) => {
                    warn!(class_id = %class.class_id, error = %error, "SignatureEnhancement: supertype unresolved");
                    ConeType::error(error.to_string())
                }
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Members
    // -------------------------------------------------------------------------

    pub fn enhance_method(
        &self,
        session: &InteropSession,
        class: &JavaClass,
        method: &JavaMethod,
    ) -> Result<Arc<EnhancedFunction>> {
        self.functions.get_or_compute(&method.symbol, || {
            self.count_member(&method.symbol);
            let defaults = self.member_defaults(session, class, &method.foreign_annotations);
            let type_parameters =
                self.enhance_member_type_parameters(session, &method.stack, &method.type_parameters, &defaults)?;
            let converter = TypeConverter::new(&method.stack, session, member_mode(class));
            let enhancer = TypeEnhancer::new(session, &defaults);
            let value_parameters = enhance_value_parameters(&enhancer, &converter, &method.value_parameters)?;
            let return_type = enhancer.enhance(
                method.return_type.resolve(&converter)?,
                &method.foreign_annotations,
                Position::ReturnType,
                false,
                None,
            );
            Ok(Arc::new(EnhancedFunction {
                symbol: method.symbol.clone(),
                name: method.name.clone(),
                kind: FunctionKind::Method,
                containing_class: method.containing_class.clone(),
                dispatch_receiver: method.dispatch_receiver.clone(),
                type_parameters,
                value_parameters,
                return_type,
                status: method.status(),
                is_static: method.is_static,
            }))
        })
    }

    pub fn enhance_constructor(
        &self,
        session: &InteropSession,
        class: &JavaClass,
        constructor: &JavaConstructor,
    ) -> Result<Arc<EnhancedFunction>> {
        self.functions.get_or_compute(&constructor.symbol, || {
            self.count_member(&constructor.symbol);
            let defaults = self.member_defaults(session, class, &constructor.foreign_annotations);
            let mut type_parameters: Vec<EnhancedTypeParameter> = constructor
                .type_parameters
                .iter()
                .filter_map(|parameter| match parameter {
                    TypeParameterRef::Outer(symbol) => Some(EnhancedTypeParameter {
                        symbol: symbol.clone(),
                        bounds: session.type_parameter_bounds(symbol),
                    }),
                    TypeParameterRef::Own(_) => None,
                })
                .collect();
            type_parameters.extend(self.enhance_member_type_parameters(
                session,
                &constructor.stack,
                &constructor.own_type_parameters(),
                &defaults,
            )?);
            let converter = TypeConverter::new(&constructor.stack, session, member_mode(class));
            let enhancer = TypeEnhancer::new(session, &defaults);
            let value_parameters = enhance_value_parameters(&enhancer, &converter, &constructor.value_parameters)?;
            Ok(Arc::new(EnhancedFunction {
                symbol: constructor.symbol.clone(),
                name: Name::init(),
                kind: FunctionKind::Constructor,
                containing_class: constructor.containing_class.clone(),
                dispatch_receiver: constructor.dispatch_receiver.clone(),
                type_parameters,
                value_parameters,
                return_type: constructor.return_type.clone(),
                status: constructor.status(),
                is_static: false,
            }))
        })
    }

    pub fn enhance_field(
        &self,
        session: &InteropSession,
        class: &JavaClass,
        field: &JavaField,
    ) -> Result<Arc<EnhancedProperty>> {
        self.properties.get_or_compute(&field.symbol, || {
            self.count_member(&field.symbol);
            let defaults = self.member_defaults(session, class, &field.foreign_annotations);
            let converter = TypeConverter::new(&class.stack, session, ConversionMode::Default);
            let enhancer = TypeEnhancer::new(session, &defaults);
            let is_constant = field.is_static
                && field.is_final()
                && field.initializer.is_some()
                && field.return_type.foreign_type().is_some_and(is_constant_type);
            let return_type = enhancer.enhance(
                field.return_type.resolve(&converter)?,
                &field.foreign_annotations,
                Position::Field,
                false,
                is_constant.then_some(NullabilityQualifier::NotNull),
            );
            Ok(Arc::new(EnhancedProperty {
                symbol: field.symbol.clone(),
                name: field.name.clone(),
                kind: PropertyKind::Field,
                containing_class: field.containing_class.clone(),
                dispatch_receiver: field.dispatch_receiver.clone(),
                return_type,
                is_var: field.is_var,
                is_static: field.is_static,
                status: field.status(),
            }))
        })
    }

    pub fn enhance_enum_entry(
        &self,
        session: &InteropSession,
        class: &JavaClass,
        entry: &JavaEnumEntry,
    ) -> Result<Arc<EnhancedProperty>> {
        self.properties.get_or_compute(&entry.symbol, || {
            self.count_member(&entry.symbol);
            let converter = TypeConverter::new(&class.stack, session, ConversionMode::Default);
            let defaults = DefaultQualifiers::default();
            let return_type = TypeEnhancer::new(session, &defaults).enhance(
                entry.return_type.resolve(&converter)?,
                &[],
                Position::Field,
                false,
                Some(NullabilityQualifier::NotNull),
            );
            Ok(Arc::new(EnhancedProperty {
                symbol: entry.symbol.clone(),
                name: entry.name.clone(),
                kind: PropertyKind::EnumEntry,
                containing_class: entry.containing_class.clone(),
                dispatch_receiver: None,
                return_type,
                is_var: false,
                is_static: true,
                status: entry.status(),
            }))
        })
    }

    pub fn enhance_synthetic_property(
        &self,
        session: &InteropSession,
        class: &JavaClass,
        property: &SyntheticProperty,
    ) -> Result<Arc<EnhancedProperty>> {
        self.properties.get_or_compute(&property.symbol, || {
            self.count_member(&property.symbol);
            let converter = TypeConverter::new(&class.stack, session, ConversionMode::Default);
            Ok(Arc::new(EnhancedProperty {
                symbol: property.symbol.clone(),
                name: property.name.clone(),
                kind: PropertyKind::Synthetic,
                containing_class: property.containing_class.clone(),
                dispatch_receiver: None,
                return_type: property.return_type.resolve(&converter)?,
                is_var: false,
                is_static: property.is_static,
                status: property.status(),
            }))
        })
    }

    /// A method of an annotation class seen as a read-only property.
    pub fn enhance_annotation_property(
        &self,
        session: &InteropSession,
        class: &JavaClass,
        method: &JavaMethod,
    ) -> Result<Arc<EnhancedProperty>> {
        self.properties.get_or_compute(&method.symbol, || {
            self.count_member(&method.symbol);
            let converter = TypeConverter::new(&method.stack, session, ConversionMode::AnnotationMember);
            Ok(Arc::new(EnhancedProperty {
                symbol: method.symbol.clone(),
                name: method.name.clone(),
                kind: PropertyKind::AnnotationMember,
                containing_class: class.class_id.clone(),
                dispatch_receiver: method.dispatch_receiver.clone(),
                return_type: method.return_type.resolve(&converter)?,
                is_var: false,
                is_static: false,
                status: method.status(),
            }))
        })
    }
}

fn member_mode(class: &JavaClass) -> ConversionMode {
    if class.kind == ClassKind::AnnotationClass {
        ConversionMode::AnnotationMember
    } else {
        ConversionMode::Default
    }
}

fn initial_bounds(upper_bounds: &[ForeignType]) -> Vec<TypeRef> {
    if upper_bounds.is_empty() {
        vec![TypeRef::resolved(ConeType::flexible_any())]
    } else {
        upper_bounds.iter().cloned().map(TypeRef::java).collect()
    }
}

/// `String` and primitives: the types a compile-time constant can have.
fn is_constant_type(ty: &ForeignType) -> bool {
    match ty {
        ForeignType::Primitive(_) => true,
        ForeignType::Classifier(_) => ty.class_id().is_some_and(|id| id.as_string() == standard::JAVA_STRING),
        _ => false,
    }
}

fn enhance_value_parameters(
    enhancer: &TypeEnhancer<'_>,
    converter: &TypeConverter<'_>,
    parameters: &[JavaValueParameter],
) -> Result<Vec<EnhancedValueParameter>> {
    parameters
        .iter()
        .map(|parameter| {
            let ty = enhancer.enhance(
                parameter.ty.resolve(converter)?,
                &parameter.annotations,
                Position::ValueParameter,
                false,
                None,
            );
            Ok(EnhancedValueParameter {
                name: parameter.name.clone(),
                ty,
                is_vararg: parameter.is_vararg,
                has_default_value: parameter.has_default_value(),
            })
        })
        .collect()
}

// =============================================================================
// Type enhancement
// =============================================================================

struct TypeEnhancer<'a> {
    session: &'a InteropSession,
    defaults: &'a DefaultQualifiers,
    ignore_annotations: bool,
}

impl<'a> TypeEnhancer<'a> {
    fn new(session: &'a InteropSession, defaults: &'a DefaultQualifiers) -> Self {
        Self {
            session,
            defaults,
            ignore_annotations: session.options().ignore_nullability_annotations,
        }
    }

    /// Enhances `ty` at `position`. `declaration` holds the annotations of
    /// the member or parameter owning the type; `forced` overrides the
    /// nullability evidence.
    fn enhance(
        &self,
        ty: ConeType,
        declaration: &[ForeignAnnotation],
        position: Position,
        head_only: bool,
        forced: Option<NullabilityQualifier>,
    ) -> ConeType {
        let qualifiers = self.qualifiers(&ty, declaration, position, forced);
        let ty = if head_only { ty } else { self.enhance_arguments(ty) };
        self.apply(ty, qualifiers)
    }

    fn qualifiers(
        &self,
        ty: &ConeType,
        declaration: &[ForeignAnnotation],
        position: Position,
        forced: Option<NullabilityQualifier>,
    ) -> TypeQualifiers {
        let mut qualifiers = if self.ignore_annotations {
            TypeQualifiers::default()
        } else {
            let type_use = ty
                .attributes()
                .map(|attributes| attributes.type_use_annotations.iter().chain(&attributes.wildcard_annotations));
            let declared = declaration.iter().filter_map(|annotation| annotation.class_id.as_ref());
            TypeQualifiers::from_annotations(
                declared.chain(type_use.into_iter().flatten()),
                &self.session.options().nullability,
            )
        };
        if qualifiers.nullability == NullabilityQualifier::Unknown
            && position
                .default_target()
                .is_some_and(|target| self.defaults.applies_to(target))
        {
            qualifiers.nullability = NullabilityQualifier::NotNull;
        }
        if let Some(forced) = forced {
            qualifiers.nullability = forced;
        }
        qualifiers
    }

    /// Pre-order walk into type arguments; raw types keep their arguments.
    fn enhance_arguments(&self, ty: ConeType) -> ConeType {
        match ty {
            ConeType::ClassLike(class) if !class.arguments.is_empty() => {
                let arguments = class
                    .arguments
                    .iter()
                    .cloned()
                    .map(|argument| {
                        argument.map_type(|argument| self.enhance(argument, &[], Position::TypeArgument, false, None))
                    })
                    .collect();
                ConeType::ClassLike(ClassLikeType { arguments, ..class })
            }
            ConeType::Flexible(flexible) => {
                let flexible = *flexible;
                ConeType::flexible(self.enhance_arguments(flexible.lower), self.enhance_arguments(flexible.upper))
            }
            other => other,
        }
    }

    fn apply(&self, ty: ConeType, qualifiers: TypeQualifiers) -> ConeType {
        let ty = match qualifiers.mutability {
            MutabilityQualifier::ReadOnly => remap_collection(ty, class_map::mutable_to_read_only),
            MutabilityQualifier::Mutable => remap_collection(ty, class_map::read_only_to_mutable),
            MutabilityQualifier::Unknown => ty,
        };
        let enhanced = match qualifiers.nullability {
            NullabilityQualifier::Unknown => return ty,
            NullabilityQualifier::Nullable => match ty {
                ConeType::Flexible(_) | ConeType::Raw(_) => ty.upper_bound_owned(),
                other => return other,
            },
            NullabilityQualifier::NotNull => match ty {
                ConeType::Flexible(_) | ConeType::Raw(_) => self.not_null(ty.lower_bound_owned()),
                other => return other,
            },
        };
        mark_enhanced(enhanced)
    }

    /// The non-null form of a lower bound. Type parameters lose their
    /// unconditional `& Any` and get it back only when a bound is nullable.
    fn not_null(&self, lower: ConeType) -> ConeType {
        let lower = match lower {
            ConeType::DefinitelyNotNull(inner) => *inner,
            other => other,
        };
        make_definitely_not_null(lower, Some(self.session as &dyn ClassifierLookup))
    }
}

fn remap_collection(ty: ConeType, remap: fn(&ClassId) -> Option<ClassId>) -> ConeType {
    match ty {
        ConeType::ClassLike(class) => match remap(&class.class_id) {
            Some(class_id) => {
                trace!(from = %class.class_id, to = %class_id, "SignatureEnhancement: mutability remap");
                ConeType::ClassLike(ClassLikeType { class_id, ..class })
            }
            None => ConeType::ClassLike(class),
        },
        ConeType::Flexible(flexible) => {
            let flexible = *flexible;
            ConeType::flexible(remap_collection(flexible.lower, remap), remap_collection(flexible.upper, remap))
        }
        other => other,
    }
}

fn mark_enhanced(ty: ConeType) -> ConeType {
    let mut attributes = ty.attributes().cloned().unwrap_or_default();
    if attributes.enhanced {
        return ty;
    }
    attributes.enhanced = true;
    ty.with_attributes(attributes)
}

/// Maps the type parameters of `class` to the arguments of `supertype`.
pub(crate) fn supertype_substitutor(class: &JavaClass, supertype: &ConeType) -> Substitutor {
    let parameters = class.type_parameters();
    Substitutor::new(
        parameters.iter().map(|parameter| parameter.symbol().clone()),
        supertype.lower_bound().arguments(),
    )
}

#[cfg(test)]
#[path = "../tests/enhancement_tests.rs"]
mod tests;
