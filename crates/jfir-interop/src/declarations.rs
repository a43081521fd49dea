//! Synthesized frontend declarations for foreign classes.
//!
//! A [`JavaClass`] is created once per class symbol by the facade and then
//! lives for the whole session. Everything that may still change after
//! creation sits behind interior mutability:
//!
//! | Field | Written by |
//! |-------|------------|
//! | type-parameter list | facade: first-round list at creation, swapped for the second-round list on completion |
//! | statuses | facade (effective visibility, status transformers) |
//! | supertypes | computed lazily on first access |
//! | sealed inheritors | facade, once |
//! | annotations, defaults, constants | [`Deferred`] computations |

use crate::collaborators::ModuleData;
use crate::deferred::Deferred;
use crate::expression::{AnnotationCall, Expression};
use crate::session::InteropSession;
use bitflags::bitflags;
use jfir_common::{ClassId, ClassKind, EffectiveVisibility, Modality, Name, Variance, Visibility};
use jfir_model::{ForeignAnnotation, ForeignClass, ForeignLiteral, TypeParameterKey};
use jfir_types::{
    CallableSymbol, ClassSymbol, ConeType, TypeParameterInfo, TypeParameterStack, TypeParameterSymbol,
    TypeProjection, TypeRef,
};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

// =============================================================================
// Status
// =============================================================================

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u16 {
        const STATIC = 1 << 0;
        const INNER = 1 << 1;
        const FUN = 1 << 2;
        const PRIMARY = 1 << 3;
        const FROM_SOURCE = 1 << 4;
        const JAVA_RECORD = 1 << 5;
        const RECORD_COMPONENT = 1 << 6;
        const VAR = 1 << 7;
    }
}

/// Resolved status of a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationStatus {
    pub visibility: Visibility,
    pub modality: Modality,
    pub effective_visibility: EffectiveVisibility,
    pub flags: StatusFlags,
}

impl DeclarationStatus {
    pub fn new(visibility: Visibility, modality: Modality, effective_visibility: EffectiveVisibility) -> Self {
        Self {
            visibility,
            modality,
            effective_visibility,
            flags: StatusFlags::empty(),
        }
    }

    pub fn with_flag(mut self, flag: StatusFlags, value: bool) -> Self {
        self.flags.set(flag, value);
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(StatusFlags::STATIC)
    }

    pub fn is_inner(&self) -> bool {
        self.flags.contains(StatusFlags::INNER)
    }

    pub fn is_fun(&self) -> bool {
        self.flags.contains(StatusFlags::FUN)
    }
}

/// A status that may be rewritten after the declaration is built.
pub(crate) struct StatusCell(RwLock<DeclarationStatus>);

impl StatusCell {
    pub(crate) fn new(status: DeclarationStatus) -> Self {
        Self(RwLock::new(status))
    }

    pub(crate) fn get(&self) -> DeclarationStatus {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn set(&self, status: DeclarationStatus) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

impl fmt::Debug for StatusCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}

/// How far a class's synthesis has progressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ResolvePhase {
    /// Structure built, bounds are still foreign references.
    Raw = 0,
    /// First-round bounds published.
    BoundsFirstRound = 1,
    /// Every synthesis step finished.
    Completed = 2,
}

impl ResolvePhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Raw,
            1 => Self::BoundsFirstRound,
            _ => Self::Completed,
        }
    }
}

// =============================================================================
// Type parameters
// =============================================================================

pub struct JavaTypeParameter {
    pub symbol: TypeParameterSymbol,
    pub key: TypeParameterKey,
    pub variance: Variance,
    pub annotations: Vec<ForeignAnnotation>,
    bounds: Vec<TypeRef>,
}

impl JavaTypeParameter {
    pub fn new(
        symbol: TypeParameterSymbol,
        key: TypeParameterKey,
        bounds: Vec<TypeRef>,
        annotations: Vec<ForeignAnnotation>,
    ) -> Self {
        Self {
            symbol,
            key,
            variance: Variance::Invariant,
            annotations,
            bounds,
        }
    }

    pub fn name(&self) -> &Name {
        self.symbol.name()
    }

    pub fn bounds(&self) -> Vec<TypeRef> {
        self.bounds.clone()
    }

    /// Bounds that are already cone types.
    pub fn resolved_bounds(&self) -> Vec<ConeType> {
        self.bounds
            .iter()
            .filter_map(TypeRef::cone_type)
            .cloned()
            .collect()
    }

    /// A copy with new bounds and the same identity.
    pub(crate) fn with_bounds(&self, bounds: Vec<TypeRef>) -> Self {
        Self::new(self.symbol.clone(), self.key.clone(), bounds, self.annotations.clone())
    }
}

impl fmt::Debug for JavaTypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JavaTypeParameter")
            .field("symbol", &self.symbol)
            .field("bounds", &self.bounds())
            .finish()
    }
}

/// An entry of a class's type-parameter list.
#[derive(Clone, Debug)]
pub enum TypeParameterRef {
    Own(Arc<JavaTypeParameter>),
    /// A parameter declared by an enclosing declaration: an outer class's
    /// parameter in an inner class, or the class's own parameter on one of
    /// its constructors.
    Outer(TypeParameterSymbol),
}

impl TypeParameterRef {
    pub fn symbol(&self) -> &TypeParameterSymbol {
        match self {
            Self::Own(parameter) => &parameter.symbol,
            Self::Outer(symbol) => symbol,
        }
    }

    pub fn is_own(&self) -> bool {
        matches!(self, Self::Own(_))
    }
}

// =============================================================================
// Members
// =============================================================================

#[derive(Debug)]
pub struct JavaValueParameter {
    pub name: Name,
    pub ty: TypeRef,
    pub is_vararg: bool,
    pub annotations: Vec<ForeignAnnotation>,
    /// Default value of an annotation constructor parameter.
    pub default_value: Option<Deferred<Option<Expression>>>,
}

impl JavaValueParameter {
    pub fn new(name: Name, ty: TypeRef, is_vararg: bool, annotations: Vec<ForeignAnnotation>) -> Self {
        Self {
            name,
            ty,
            is_vararg,
            annotations,
            default_value: None,
        }
    }

    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }
}

#[derive(Debug)]
pub struct JavaField {
    pub symbol: CallableSymbol,
    pub name: Name,
    pub return_type: TypeRef,
    pub is_var: bool,
    pub is_static: bool,
    /// The declaring class; for static fields this is the only link to it.
    pub containing_class: ClassId,
    pub dispatch_receiver: Option<ConeType>,
    pub initializer: Option<ForeignLiteral>,
    pub foreign_annotations: Vec<ForeignAnnotation>,
    pub annotations: Deferred<Vec<AnnotationCall>>,
    /// Evaluated initializer of a final field.
    pub constant: Deferred<Option<Expression>>,
    pub(crate) status: StatusCell,
}

impl JavaField {
    pub fn status(&self) -> DeclarationStatus {
        self.status.get()
    }

    pub fn is_final(&self) -> bool {
        !self.is_var
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodOrigin {
    Declared,
    EnumValues,
    EnumValueOf,
    /// Accessor synthesized for a record component.
    RecordComponent,
}

#[derive(Debug)]
pub struct JavaMethod {
    pub symbol: CallableSymbol,
    pub name: Name,
    pub return_type: TypeRef,
    pub value_parameters: Vec<JavaValueParameter>,
    pub type_parameters: Vec<Arc<JavaTypeParameter>>,
    /// The class stack plus this method's own parameters.
    pub stack: Arc<TypeParameterStack>,
    pub is_static: bool,
    pub containing_class: ClassId,
    pub dispatch_receiver: Option<ConeType>,
    pub origin: MethodOrigin,
    pub foreign_annotations: Vec<ForeignAnnotation>,
    pub annotations: Deferred<Vec<AnnotationCall>>,
    pub(crate) status: StatusCell,
}

impl JavaMethod {
    pub fn status(&self) -> DeclarationStatus {
        self.status.get()
    }

    pub fn is_record_component(&self) -> bool {
        self.origin == MethodOrigin::RecordComponent
            || self.status.get().flags.contains(StatusFlags::RECORD_COMPONENT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructorOrigin {
    Declared,
    /// Implicit no-argument constructor.
    Default,
    /// Constructor of an annotation class built from its methods.
    Annotation,
    /// Canonical constructor of a record.
    Record,
}

#[derive(Debug)]
pub struct JavaConstructor {
    pub symbol: CallableSymbol,
    pub is_primary: bool,
    pub is_inner: bool,
    pub value_parameters: Vec<JavaValueParameter>,
    /// References to every class type parameter, then the constructor's
    /// own type parameters.
    pub type_parameters: Vec<TypeParameterRef>,
    pub stack: Arc<TypeParameterStack>,
    /// The class type built from every class type parameter.
    pub return_type: ConeType,
    /// The outer class type for constructors of inner classes.
    pub dispatch_receiver: Option<ConeType>,
    pub containing_class: ClassId,
    pub origin: ConstructorOrigin,
    pub foreign_annotations: Vec<ForeignAnnotation>,
    pub annotations: Deferred<Vec<AnnotationCall>>,
    pub(crate) status: StatusCell,
}

impl JavaConstructor {
    pub fn status(&self) -> DeclarationStatus {
        self.status.get()
    }

    pub fn own_type_parameters(&self) -> Vec<Arc<JavaTypeParameter>> {
        self.type_parameters
            .iter()
            .filter_map(|parameter| match parameter {
                TypeParameterRef::Own(parameter) => Some(Arc::clone(parameter)),
                TypeParameterRef::Outer(_) => None,
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct JavaEnumEntry {
    pub symbol: CallableSymbol,
    pub name: Name,
    pub return_type: TypeRef,
    pub containing_class: ClassId,
    pub foreign_annotations: Vec<ForeignAnnotation>,
    pub annotations: Deferred<Vec<AnnotationCall>>,
    pub(crate) status: StatusCell,
}

impl JavaEnumEntry {
    pub fn status(&self) -> DeclarationStatus {
        self.status.get()
    }
}

/// A property with no foreign counterpart, such as an enum's `entries`.
#[derive(Debug)]
pub struct SyntheticProperty {
    pub symbol: CallableSymbol,
    pub name: Name,
    pub return_type: TypeRef,
    pub is_static: bool,
    pub containing_class: ClassId,
    pub(crate) status: StatusCell,
}

impl SyntheticProperty {
    pub fn status(&self) -> DeclarationStatus {
        self.status.get()
    }
}

#[derive(Clone, Debug)]
pub enum Declaration {
    Field(Arc<JavaField>),
    Method(Arc<JavaMethod>),
    Constructor(Arc<JavaConstructor>),
    EnumEntry(Arc<JavaEnumEntry>),
    Property(Arc<SyntheticProperty>),
}

impl Declaration {
    pub fn name(&self) -> Name {
        match self {
            Self::Field(field) => field.name.clone(),
            Self::Method(method) => method.name.clone(),
            Self::Constructor(_) => Name::init(),
            Self::EnumEntry(entry) => entry.name.clone(),
            Self::Property(property) => property.name.clone(),
        }
    }

    pub fn symbol(&self) -> &CallableSymbol {
        match self {
            Self::Field(field) => &field.symbol,
            Self::Method(method) => &method.symbol,
            Self::Constructor(constructor) => &constructor.symbol,
            Self::EnumEntry(entry) => &entry.symbol,
            Self::Property(property) => &property.symbol,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Self::Field(field) => field.is_static,
            Self::Method(method) => method.is_static,
            Self::Constructor(_) => false,
            Self::EnumEntry(_) => true,
            Self::Property(property) => property.is_static,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Field(_) => "field",
            Self::Method(_) => "method",
            Self::Constructor(_) => "constructor",
            Self::EnumEntry(_) => "enum entry",
            Self::Property(_) => "property",
        }
    }
}

// =============================================================================
// JavaClass
// =============================================================================

pub struct JavaClass {
    pub symbol: ClassSymbol,
    pub class_id: ClassId,
    pub kind: ClassKind,
    pub module: ModuleData,
    /// The foreign class this was synthesized from.
    pub origin: Arc<ForeignClass>,
    /// The enclosing class, for nested classes.
    pub parent: Option<ClassSymbol>,
    /// Own parameters plus those of every enclosing class.
    pub stack: Arc<TypeParameterStack>,
    pub existing_nested_classifier_names: Vec<Name>,
    pub declarations: Vec<Declaration>,
    pub annotations: Deferred<Vec<AnnotationCall>>,
    pub is_java_record: bool,
    pub(crate) supertype_refs: Vec<TypeRef>,
    pub(crate) status: StatusCell,
    type_parameters: RwLock<Arc<[TypeParameterRef]>>,
    supertypes: OnceLock<Vec<ConeType>>,
    sealed_inheritors: OnceLock<Vec<ClassId>>,
    phase: AtomicU8,
}

/// Everything the facade computes before the class object exists.
pub(crate) struct JavaClassParts {
    pub symbol: ClassSymbol,
    pub kind: ClassKind,
    pub module: ModuleData,
    pub origin: Arc<ForeignClass>,
    pub parent: Option<ClassSymbol>,
    pub stack: Arc<TypeParameterStack>,
    pub status: DeclarationStatus,
    pub type_parameters: Vec<TypeParameterRef>,
    pub supertype_refs: Vec<TypeRef>,
    pub declarations: Vec<Declaration>,
    pub annotations: Deferred<Vec<AnnotationCall>>,
}

impl JavaClass {
    pub(crate) fn from_parts(parts: JavaClassParts) -> Self {
        let class_id = parts.symbol.class_id().clone();
        Self {
            class_id,
            kind: parts.kind,
            module: parts.module,
            existing_nested_classifier_names: parts.origin.inner_class_names.clone(),
            is_java_record: parts.origin.is_record(),
            origin: parts.origin,
            parent: parts.parent,
            stack: parts.stack,
            declarations: parts.declarations,
            annotations: parts.annotations,
            supertype_refs: parts.supertype_refs,
            status: StatusCell::new(parts.status),
            type_parameters: RwLock::new(parts.type_parameters.into()),
            supertypes: OnceLock::new(),
            sealed_inheritors: OnceLock::new(),
            phase: AtomicU8::new(ResolvePhase::Raw as u8),
            symbol: parts.symbol,
        }
    }

    pub fn status(&self) -> DeclarationStatus {
        self.status.get()
    }

    pub fn name(&self) -> Name {
        self.class_id.short_class_name()
    }

    pub fn phase(&self) -> ResolvePhase {
        ResolvePhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub(crate) fn set_phase(&self, phase: ResolvePhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    // -------------------------------------------------------------------------
    // Type parameters
    // -------------------------------------------------------------------------

    /// Own parameters followed by outer references.
    pub fn type_parameters(&self) -> Arc<[TypeParameterRef]> {
        Arc::clone(&self.type_parameters.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn own_type_parameters(&self) -> Vec<Arc<JavaTypeParameter>> {
        self.type_parameters()
            .iter()
            .filter_map(|parameter| match parameter {
                TypeParameterRef::Own(parameter) => Some(Arc::clone(parameter)),
                TypeParameterRef::Outer(_) => None,
            })
            .collect()
    }

    pub(crate) fn replace_type_parameters(&self, parameters: Vec<TypeParameterRef>) {
        *self.type_parameters.write().unwrap_or_else(PoisonError::into_inner) = parameters.into();
    }

    pub fn type_parameter_infos(&self) -> Vec<TypeParameterInfo> {
        self.type_parameters()
            .iter()
            .map(|parameter| TypeParameterInfo::new(parameter.symbol().clone(), Variance::Invariant))
            .collect()
    }

    /// `C<T1, .., Tn>` over every type parameter, outer references
    /// included.
    pub fn default_type(&self) -> ConeType {
        let arguments = self
            .type_parameters()
            .iter()
            .map(|parameter| TypeProjection::invariant(ConeType::type_parameter(parameter.symbol().clone(), false)))
            .collect();
        ConeType::class(self.class_id.clone(), arguments, false)
    }

    /// Dispatch receiver of non-static members: the class type over its own
    /// type parameters only.
    pub fn dispatch_receiver_type(&self) -> ConeType {
        own_parameter_type(&self.class_id, &self.own_type_parameters())
    }

    // -------------------------------------------------------------------------
    // Supertypes and inheritors
    // -------------------------------------------------------------------------

    /// Supertypes as written, before resolution.
    pub fn supertype_refs(&self) -> &[TypeRef] {
        &self.supertype_refs
    }

    /// Resolved supertypes, computed on first access.
    pub fn supertypes(&self, session: &InteropSession) -> &[ConeType] {
        self.supertypes
            .get_or_init(|| session.enhancement().resolve_supertypes(session, self))
    }

    pub fn sealed_inheritors(&self) -> &[ClassId] {
        self.sealed_inheritors.get().map_or(&[], Vec::as_slice)
    }

    pub(crate) fn set_sealed_inheritors(&self, inheritors: Vec<ClassId>) {
        let _ = self.sealed_inheritors.set(inheritors);
    }

    // -------------------------------------------------------------------------
    // Members
    // -------------------------------------------------------------------------

    pub fn methods(&self) -> impl Iterator<Item = &Arc<JavaMethod>> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &Arc<JavaField>> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Arc<JavaConstructor>> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Constructor(constructor) => Some(constructor),
            _ => None,
        })
    }

    pub fn enum_entries(&self) -> impl Iterator<Item = &Arc<JavaEnumEntry>> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::EnumEntry(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn synthetic_properties(&self) -> impl Iterator<Item = &Arc<SyntheticProperty>> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Property(property) => Some(property),
            _ => None,
        })
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Arc<JavaMethod>> + 'a {
        self.methods().filter(move |method| method.name.as_str() == name)
    }

    pub fn enum_entry(&self, name: &Name) -> Option<&Arc<JavaEnumEntry>> {
        self.enum_entries().find(|entry| &entry.name == name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }
}

impl fmt::Debug for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JavaClass")
            .field("symbol", &self.symbol)
            .field("kind", &self.kind)
            .field("phase", &self.phase())
            .field("declarations", &self.declarations.len())
            .finish()
    }
}

/// `C<T1, .., Tn>` over the given parameters.
pub(crate) fn own_parameter_type(class_id: &ClassId, parameters: &[Arc<JavaTypeParameter>]) -> ConeType {
    let arguments = parameters
        .iter()
        .map(|parameter| TypeProjection::invariant(ConeType::type_parameter(parameter.symbol.clone(), false)))
        .collect();
    ConeType::class(class_id.clone(), arguments, false)
}

#[cfg(test)]
#[path = "../tests/declarations_tests.rs"]
mod tests;
