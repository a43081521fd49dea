//! Declaration synthesizer: foreign classes to [`JavaClass`] declarations.
//!
//! Synthesis of one class runs in two phases so that mutually recursive
//! classes can observe each other without deadlocking:
//!
//! | Phase | Steps | Visible to other lookups |
//! |-------|-------|--------------------------|
//! | [`JavaFacade::create_class`] | clone parent stack, register in-flight state, build structure, first bound round, publish parameters | yes, once it returns |
//! | [`JavaFacade::complete_class`] | second bound round, drop in-flight state, effective visibility, status transformers, sealed inheritors, annotation defaults | after it returns |
//!
//! The in-flight caches hold the stack and effective visibility of classes
//! whose structure is being built, so a nested class converted from inside
//! its parent's synthesis still sees the parent's type parameters. Entries
//! are removed before synthesis returns, on success and on failure.
//!
//! The facade also owns the classifier lookup services the rest of the
//! layer goes through: class and package lookup with their caches.

use crate::annotations::AnnotationTranslator;
use crate::collaborators::TransformTarget;
use crate::declarations::{
    ConstructorOrigin, Declaration, DeclarationStatus, JavaClass, JavaClassParts, JavaConstructor, JavaEnumEntry,
    JavaField, JavaMethod, JavaTypeParameter, JavaValueParameter, MethodOrigin, ResolvePhase, StatusCell,
    StatusFlags, SyntheticProperty, TypeParameterRef, own_parameter_type,
};
use crate::deferred::Deferred;
use crate::expression::AnnotationCall;
use crate::session::InteropSession;
use dashmap::DashMap;
use jfir_common::{
    CallableId, ClassId, ClassKind, EffectiveVisibility, FqName, InteropError, Modality, Name, Result,
    SessionCache, Visibility,
};
use jfir_model::{
    ClassRequest, ForeignAnnotation, ForeignClass, ForeignClassKind, ForeignConstructor, ForeignField,
    ForeignMethod, ForeignPackage, ForeignType, ForeignTypeParameter, ForeignValueParameter, ForeignVisibility,
};
use jfir_types::{
    CallableSymbol, ClassSymbol, ConeType, ConversionMode, TypeConverter, TypeParameterStack, TypeParameterSymbol,
    TypeProjection, TypeRef, class_map, primitive_type, standard,
};
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::sync::Arc;
use tracing::{debug, trace, warn};

const VALUE_METHOD_NAME: &str = "value";
const PACKAGE_INFO_CLASS_NAME: &str = "package-info";

pub struct JavaFacade {
    in_flight_stacks: DashMap<ClassSymbol, Arc<TypeParameterStack>, FxBuildHasher>,
    in_flight_visibility: DashMap<ClassSymbol, EffectiveVisibility, FxBuildHasher>,
    packages: SessionCache<FqName, Option<Arc<ForeignPackage>>>,
    known_class_names: SessionCache<FqName, Option<Arc<FxHashSet<String>>>>,
}

impl Default for JavaFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaFacade {
    pub fn new() -> Self {
        Self {
            in_flight_stacks: DashMap::with_hasher(FxBuildHasher),
            in_flight_visibility: DashMap::with_hasher(FxBuildHasher),
            packages: SessionCache::new("packages"),
            known_class_names: SessionCache::new("known_class_names"),
        }
    }

    // =========================================================================
    // Lookup services
    // =========================================================================

    /// The foreign class of `class_id`.
    ///
    /// Classes tagged with `kotlin.Metadata` are compiled from Kotlin and are
    /// never synthesized here; a finder answering with a different class is
    /// ignored as well.
    pub fn find_class(
        &self,
        session: &InteropSession,
        class_id: &ClassId,
        known_content: Option<&[u8]>,
    ) -> Option<Arc<ForeignClass>> {
        let request = ClassRequest {
            class_id,
            known_content,
        };
        let class = session.class_finder().find_class(request)?;
        if &class.class_id != class_id {
            debug!(requested = %class_id, found = %class.class_id, "JavaFacade::find_class: id mismatch");
            return None;
        }
        if class.has_metadata_annotation() {
            trace!(class_id = %class_id, "JavaFacade::find_class: skipping Kotlin class");
            return None;
        }
        Some(class)
    }

    pub fn package(&self, session: &InteropSession, fq_name: &FqName) -> Option<Arc<ForeignPackage>> {
        self.packages.get_or_compute(fq_name, || {
            let may_have_annotations = self
                .known_class_names_in_package(session, fq_name)
                .is_none_or(|names| names.contains(PACKAGE_INFO_CLASS_NAME));
            session.class_finder().find_package(fq_name, may_have_annotations)
        })
    }

    pub fn has_package(&self, session: &InteropSession, fq_name: &FqName) -> bool {
        self.package(session, fq_name).is_some()
    }

    pub fn known_class_names_in_package(
        &self,
        session: &InteropSession,
        fq_name: &FqName,
    ) -> Option<Arc<FxHashSet<String>>> {
        self.known_class_names.get_or_compute(fq_name, || {
            session.class_finder().known_class_names_in_package(fq_name).map(Arc::new)
        })
    }

    /// Whether the package of `class_id` may contain its outermost class.
    /// Answers `true` when the package contents cannot be enumerated.
    pub fn has_top_level_class_of(&self, session: &InteropSession, class_id: &ClassId) -> bool {
        let Some(names) = self.known_class_names_in_package(session, class_id.package_fq_name()) else {
            return true;
        };
        let top_level = class_id.relative_class_name().segments().next().unwrap_or_default();
        names.contains(top_level)
    }

    // =========================================================================
    // Synthesis
    // =========================================================================

    /// Runs every synthesis step for one class.
    pub fn convert_class(
        &self,
        session: &InteropSession,
        symbol: &ClassSymbol,
        parent: Option<&ClassSymbol>,
        foreign: Arc<ForeignClass>,
    ) -> Result<Arc<JavaClass>> {
        let class = self.create_class(session, symbol, parent, foreign)?;
        self.complete_class(session, &class)?;
        Ok(class)
    }

    /// Builds the class structure and resolves the first round of type
    /// parameter bounds. The returned class is bound to its symbol.
    pub fn create_class(
        &self,
        session: &InteropSession,
        symbol: &ClassSymbol,
        parent: Option<&ClassSymbol>,
        foreign: Arc<ForeignClass>,
    ) -> Result<Arc<JavaClass>> {
        check_identity(symbol, parent, &foreign)?;
        debug!(class_id = %symbol.class_id(), "JavaFacade::create_class");

        let stack = Arc::new(TypeParameterStack::new());
        if let Some(parent) = parent {
            match self.parent_stack(session, parent) {
                Some(parent_stack) => stack.add_stack(&parent_stack),
                None => debug!(parent = %parent.class_id(), "JavaFacade: parent stack unavailable"),
            }
        }
        self.in_flight_stacks.insert(symbol.clone(), Arc::clone(&stack));

        let result = self.build_structure(session, symbol, parent, foreign, stack);
        if result.is_err() {
            self.forget_in_flight(symbol);
        }
        result
    }

    /// Finishes a class returned by [`create_class`](Self::create_class).
    pub fn complete_class(&self, session: &InteropSession, class: &Arc<JavaClass>) -> Result<()> {
        let result = self.complete_inner(session, class);
        self.forget_in_flight(&class.symbol);
        match result {
            Ok(()) => {
                class.set_phase(ResolvePhase::Completed);
                debug!(class_id = %class.class_id, "JavaFacade::complete_class: done");
                Ok(())
            }
            Err(error) => {
                warn!(class_id = %class.class_id, error = %error, "JavaFacade::complete_class: failed");
                session.symbols().unbind_class(&class.symbol);
                Err(error)
            }
        }
    }

    fn complete_inner(&self, session: &InteropSession, class: &Arc<JavaClass>) -> Result<()> {
        // Step 6: bounds of the second round, enhanced, swapped in as a
        // whole list.
        let second_round = session.enhancement().enhance_class_bounds(session, class)?;
        if !second_round.is_empty() {
            let mut type_parameters: Vec<TypeParameterRef> =
                second_round.into_iter().map(TypeParameterRef::Own).collect();
            type_parameters.extend(class.type_parameters().iter().filter(|parameter| !parameter.is_own()).cloned());
            class.replace_type_parameters(type_parameters);
        }

        // Step 7.
        self.forget_in_flight(&class.symbol);

        // Step 8.
        let status = class.status();
        let effective_visibility = self.class_effective_visibility(
            session,
            status.visibility,
            class.parent.as_ref(),
        );
        class.status.set(DeclarationStatus {
            effective_visibility,
            ..status
        });

        // Step 9.
        self.apply_status_transformers(session, class);

        // Step 10.
        if class.status().modality == Modality::Sealed {
            let inheritors: Vec<ClassId> = class
                .origin
                .permitted_types
                .iter()
                .filter_map(ForeignType::class_id)
                .map(|class_id| class_map::map_java_to_kotlin(class_id).unwrap_or_else(|| class_id.clone()))
                .collect();
            trace!(class_id = %class.class_id, inheritors = inheritors.len(), "JavaFacade: sealed inheritors");
            class.set_sealed_inheritors(inheritors);
        }

        // Step 11: annotation defaults were attached as deferred values when
        // the constructor was built; they can only be evaluated now that the
        // class is bound.
        Ok(())
    }

    fn forget_in_flight(&self, symbol: &ClassSymbol) {
        self.in_flight_stacks.remove(symbol);
        self.in_flight_visibility.remove(symbol);
    }

    fn parent_stack(&self, session: &InteropSession, parent: &ClassSymbol) -> Option<Arc<TypeParameterStack>> {
        if let Some(stack) = self.in_flight_stacks.get(parent) {
            return Some(Arc::clone(&stack));
        }
        session.symbols().class(parent).ok().map(|class| Arc::clone(&class.stack))
    }

    fn parent_effective_visibility(&self, session: &InteropSession, parent: &ClassSymbol) -> EffectiveVisibility {
        if let Some(visibility) = self.in_flight_visibility.get(parent) {
            return visibility.clone();
        }
        session
            .symbols()
            .class(parent)
            .map(|class| class.status().effective_visibility)
            .unwrap_or(EffectiveVisibility::Public)
    }

    fn class_effective_visibility(
        &self,
        session: &InteropSession,
        visibility: Visibility,
        parent: Option<&ClassSymbol>,
    ) -> EffectiveVisibility {
        let own = EffectiveVisibility::from_visibility(visibility, parent.map(ClassSymbol::class_id));
        match parent {
            Some(parent) => self.parent_effective_visibility(session, parent).lower_bound(&own),
            None => own,
        }
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    fn build_structure(
        &self,
        session: &InteropSession,
        symbol: &ClassSymbol,
        parent: Option<&ClassSymbol>,
        foreign: Arc<ForeignClass>,
        stack: Arc<TypeParameterStack>,
    ) -> Result<Arc<JavaClass>> {
        let class_id = symbol.class_id().clone();
        let visibility = java_visibility(foreign.visibility, foreign.is_static);
        let effective_visibility = self.class_effective_visibility(session, visibility, parent);
        self.in_flight_visibility.insert(symbol.clone(), effective_visibility.clone());

        let kind = class_kind(foreign.kind);
        let modality = match foreign.kind {
            ForeignClassKind::Annotation | ForeignClassKind::Enum => Modality::Final,
            _ => foreign.modality(),
        };
        let is_inner = !foreign.is_top_level() && !foreign.is_static;
        let status = DeclarationStatus::new(visibility, modality, effective_visibility)
            .with_flag(StatusFlags::STATIC, foreign.is_static)
            .with_flag(StatusFlags::INNER, is_inner)
            .with_flag(StatusFlags::FUN, foreign.kind == ForeignClassKind::Interface)
            .with_flag(StatusFlags::FROM_SOURCE, foreign.is_from_source)
            .with_flag(StatusFlags::JAVA_RECORD, foreign.is_record());

        let own_parameters = convert_type_parameters(session, &stack, &foreign.type_parameters);
        let outer_parameters = match parent {
            Some(parent) if !foreign.is_static => outer_type_parameters(session, parent),
            _ => Vec::new(),
        };

        let builder = ClassBuilder {
            session,
            class_id: class_id.clone(),
            foreign: &foreign,
            stack: Arc::clone(&stack),
            visibility,
            dispatch_receiver: own_parameter_type(&class_id, &own_parameters),
            self_type: self_type(&class_id, &own_parameters, &outer_parameters),
            class_type_parameters: own_parameters
                .iter()
                .map(|parameter| parameter.symbol.clone())
                .chain(outer_parameters.iter().cloned())
                .collect(),
            outer_type: if is_inner {
                parent.and_then(|parent| session.symbols().class(parent).ok().map(|class| class.default_type()))
            } else {
                None
            },
            is_inner,
        };
        let supertype_refs = builder.supertype_refs();
        let declarations = builder.declarations();

        // Step 4: first round of bound resolution.
        let first_round = session
            .enhancement()
            .resolve_bounds_first_round(session, &stack, &own_parameters)?;

        let mut type_parameters: Vec<TypeParameterRef> =
            first_round.into_iter().map(TypeParameterRef::Own).collect();
        type_parameters.extend(outer_parameters.into_iter().map(TypeParameterRef::Outer));

        let annotations = deferred_annotations(&foreign.annotations, &stack);
        let class = Arc::new(JavaClass::from_parts(JavaClassParts {
            symbol: symbol.clone(),
            kind,
            module: session.modules().module_for(&foreign),
            origin: Arc::clone(&foreign),
            parent: parent.cloned(),
            stack,
            status,
            type_parameters,
            supertype_refs,
            declarations,
            annotations,
        }));

        // Step 5: the first-round parameter list is published with the class.
        class.set_phase(ResolvePhase::BoundsFirstRound);
        session.symbols().bind_class(Arc::clone(&class));
        trace!(
            class_id = %class.class_id,
            declarations = class.declarations.len(),
            type_parameters = class.type_parameters().len(),
            "JavaFacade::create_class: structure published"
        );
        Ok(class)
    }

    // -------------------------------------------------------------------------
    // Status transformers
    // -------------------------------------------------------------------------

    fn apply_status_transformers(&self, session: &InteropSession, class: &JavaClass) {
        if session.status_transformers().is_empty() {
            return;
        }
        transform_status(session, &class.status, TransformTarget::Class(class), class.parent.as_ref());
        let container = Some(&class.symbol);
        for declaration in &class.declarations {
            match declaration {
                Declaration::Method(method) => {
                    transform_status(session, &method.status, TransformTarget::Function(method), container);
                }
                Declaration::Field(field) => {
                    transform_status(session, &field.status, TransformTarget::Field(field), container);
                }
                Declaration::Constructor(constructor) => {
                    transform_status(session, &constructor.status, TransformTarget::Constructor(constructor), container);
                }
                Declaration::EnumEntry(_) | Declaration::Property(_) => {}
            }
        }
    }
}

/// Folds the registered transformers over one status. The effective
/// visibility computed before the fold is kept.
fn transform_status(
    session: &InteropSession,
    cell: &StatusCell,
    target: TransformTarget<'_>,
    container: Option<&ClassSymbol>,
) {
    let old = cell.get();
    let new = session
        .status_transformers()
        .iter()
        .fold(old.clone(), |status, transformer| {
            if transformer.needs_transform(target) {
                transformer.transform_status(status, target, container)
            } else {
                status
            }
        });
    if new == old {
        return;
    }
    trace!(declaration = %target.name(), "JavaFacade: status transformed");
    cell.set(DeclarationStatus {
        effective_visibility: old.effective_visibility,
        ..new
    });
}

fn check_identity(symbol: &ClassSymbol, parent: Option<&ClassSymbol>, foreign: &ForeignClass) -> Result<()> {
    if symbol.class_id() != &foreign.class_id {
        return Err(InteropError::KindMismatch {
            declaration: format!("{} (foreign {})", symbol.class_id(), foreign.class_id),
            expected: "class with the symbol's id",
            found: "class with another id",
        });
    }
    let expected_parent = foreign.outer_class_id();
    if parent.map(ClassSymbol::class_id) != expected_parent.as_ref() {
        return Err(InteropError::KindMismatch {
            declaration: foreign.class_id.to_string(),
            expected: if expected_parent.is_some() { "nested class" } else { "top-level class" },
            found: if parent.is_some() { "nested class" } else { "top-level class" },
        });
    }
    Ok(())
}

// =============================================================================
// Member construction
// =============================================================================

/// Shared state for building the members of one class.
struct ClassBuilder<'a> {
    session: &'a InteropSession,
    class_id: ClassId,
    foreign: &'a ForeignClass,
    stack: Arc<TypeParameterStack>,
    visibility: Visibility,
    /// Class type over own parameters.
    dispatch_receiver: ConeType,
    /// Class type over every parameter, outer ones included.
    self_type: ConeType,
    /// Every class type parameter, listed first on each constructor.
    class_type_parameters: Vec<TypeParameterSymbol>,
    /// Default type of the outer class, for inner classes.
    outer_type: Option<ConeType>,
    is_inner: bool,
}

impl ClassBuilder<'_> {
    fn supertype_refs(&self) -> Vec<TypeRef> {
        if !self.foreign.supertypes.is_empty() {
            return self.foreign.supertypes.iter().cloned().map(TypeRef::java).collect();
        }
        let fallback = match self.foreign.kind {
            ForeignClassKind::Enum => ConeType::class(
                ClassId::from_string(standard::ENUM),
                vec![TypeProjection::invariant(self.self_type.clone())],
                false,
            ),
            ForeignClassKind::Annotation => ConeType::simple(standard::ANNOTATION),
            ForeignClassKind::Record => ConeType::simple(standard::JAVA_RECORD),
            ForeignClassKind::Class | ForeignClassKind::Interface => ConeType::any(),
        };
        vec![TypeRef::resolved(fallback)]
    }

    fn declarations(&self) -> Vec<Declaration> {
        let foreign = self.foreign;
        let mut declarations = Vec::new();

        for field in &foreign.fields {
            declarations.push(self.field(field));
        }

        let mut annotation_parameters: Vec<JavaValueParameter> = Vec::new();
        for method in &foreign.methods {
            if method.is_object_method_in_interface(foreign.kind) {
                continue;
            }
            declarations.push(Declaration::Method(Arc::new(self.method(method))));
            if foreign.kind == ForeignClassKind::Annotation {
                let parameter = self.annotation_parameter(method);
                if method.name.as_str() == VALUE_METHOD_NAME {
                    annotation_parameters.insert(0, parameter);
                } else {
                    annotation_parameters.push(parameter);
                }
            }
        }

        if foreign.constructors.is_empty()
            && foreign.kind == ForeignClassKind::Class
            && foreign.has_default_constructor
        {
            declarations.push(Declaration::Constructor(Arc::new(self.constructor(None))));
        }
        for constructor in &foreign.constructors {
            declarations.push(Declaration::Constructor(Arc::new(self.constructor(Some(constructor)))));
        }

        if foreign.kind == ForeignClassKind::Enum {
            declarations.extend(self.enum_members());
        }
        if foreign.kind == ForeignClassKind::Annotation {
            declarations.push(Declaration::Constructor(Arc::new(
                self.annotation_constructor(annotation_parameters),
            )));
        }
        if foreign.is_record() && foreign.is_from_source {
            self.record_members(&mut declarations);
        }
        declarations
    }

    fn callable_symbol(&self, name: Name) -> CallableSymbol {
        self.session
            .allocator()
            .callable_symbol(CallableId::member(&self.class_id, name))
    }

    fn member_status(&self, visibility: Visibility, modality: Modality) -> DeclarationStatus {
        DeclarationStatus::new(
            visibility,
            modality,
            EffectiveVisibility::from_visibility(visibility, Some(&self.class_id)),
        )
    }

    fn field(&self, field: &ForeignField) -> Declaration {
        let visibility = java_visibility(field.visibility, field.is_static);
        let status = self
            .member_status(visibility, Modality::Final)
            .with_flag(StatusFlags::STATIC, field.is_static);
        let annotations = deferred_annotations(&field.annotations, &self.stack);

        if field.is_enum_entry {
            return Declaration::EnumEntry(Arc::new(JavaEnumEntry {
                symbol: self.callable_symbol(field.name.clone()),
                name: field.name.clone(),
                return_type: TypeRef::java(field.ty.clone()),
                containing_class: self.class_id.clone(),
                foreign_annotations: field.annotations.clone(),
                annotations,
                status: StatusCell::new(status.with_flag(StatusFlags::STATIC, true)),
            }));
        }

        let constant = match (&field.initializer, field.is_final) {
            (Some(literal), true) => {
                let literal = literal.clone();
                let expected = constant_type(&field.ty);
                Deferred::new(move |session: &InteropSession| {
                    Some(session.evaluator().evaluate(&literal, expected.as_ref()))
                })
            }
            _ => Deferred::ready(None),
        };
        Declaration::Field(Arc::new(JavaField {
            symbol: self.callable_symbol(field.name.clone()),
            name: field.name.clone(),
            return_type: TypeRef::java(field.ty.clone()),
            is_var: !field.is_final,
            is_static: field.is_static,
            containing_class: self.class_id.clone(),
            dispatch_receiver: (!field.is_static).then(|| self.dispatch_receiver.clone()),
            initializer: field.initializer.clone(),
            foreign_annotations: field.annotations.clone(),
            annotations,
            constant,
            status: StatusCell::new(status.with_flag(StatusFlags::VAR, !field.is_final)),
        }))
    }

    fn method(&self, method: &ForeignMethod) -> JavaMethod {
        let stack = Arc::new(self.stack.snapshot());
        let type_parameters = convert_type_parameters(self.session, &stack, &method.type_parameters);
        let visibility = java_visibility(method.visibility, method.is_static);
        let modality = if method.is_abstract {
            Modality::Abstract
        } else if method.is_final || method.is_static {
            Modality::Final
        } else {
            Modality::Open
        };
        let is_record_component = self.foreign.is_record()
            && method.value_parameters.is_empty()
            && self
                .foreign
                .record_components
                .iter()
                .any(|component| component.name == method.name);
        let status = self
            .member_status(visibility, modality)
            .with_flag(StatusFlags::STATIC, method.is_static)
            .with_flag(StatusFlags::RECORD_COMPONENT, is_record_component);

        JavaMethod {
            symbol: self.callable_symbol(method.name.clone()),
            name: method.name.clone(),
            return_type: TypeRef::java(method.return_type.clone()),
            value_parameters: value_parameters(&method.value_parameters),
            type_parameters,
            annotations: deferred_annotations(&method.annotations, &stack),
            stack,
            is_static: method.is_static,
            containing_class: self.class_id.clone(),
            dispatch_receiver: (!method.is_static).then(|| self.dispatch_receiver.clone()),
            origin: MethodOrigin::Declared,
            foreign_annotations: method.annotations.clone(),
            status: StatusCell::new(status),
        }
    }

    /// The constructor parameter an annotation method stands for.
    fn annotation_parameter(&self, method: &ForeignMethod) -> JavaValueParameter {
        let mut parameter = JavaValueParameter::new(
            method.name.clone(),
            TypeRef::java(method.return_type.clone()),
            method.return_type.is_array() && method.name.as_str() == VALUE_METHOD_NAME,
            Vec::new(),
        );
        if let Some(default) = &method.annotation_default {
            let default = default.clone();
            let return_type = method.return_type.clone();
            let stack = Arc::clone(&self.stack);
            parameter.default_value = Some(Deferred::new(move |session: &InteropSession| {
                let expected = TypeConverter::new(&stack, session, ConversionMode::AnnotationMember)
                    .convert(&return_type)
                    .ok();
                let value = AnnotationTranslator::new(session, Some(&stack)).translate_value(&default, expected.as_ref());
                Some(value)
            }));
        }
        parameter
    }

    /// A declared constructor, or the implicit one when `constructor` is
    /// `None`.
    fn constructor(&self, constructor: Option<&ForeignConstructor>) -> JavaConstructor {
        let stack = Arc::new(self.stack.snapshot());
        let (visibility, type_parameters, value_parameters, foreign_annotations) = match constructor {
            Some(constructor) => (
                java_visibility(constructor.visibility, false),
                convert_type_parameters(self.session, &stack, &constructor.type_parameters),
                value_parameters(&constructor.value_parameters),
                constructor.annotations.clone(),
            ),
            None => (self.visibility, Vec::new(), Vec::new(), Vec::new()),
        };
        let mut type_parameters_with_class = self.class_type_parameter_refs();
        type_parameters_with_class.extend(type_parameters.into_iter().map(TypeParameterRef::Own));
        let status = self
            .member_status(visibility, Modality::Final)
            .with_flag(StatusFlags::INNER, self.is_inner)
            .with_flag(StatusFlags::PRIMARY, constructor.is_none());

        JavaConstructor {
            symbol: self.callable_symbol(Name::init()),
            is_primary: constructor.is_none(),
            is_inner: self.is_inner,
            value_parameters,
            type_parameters: type_parameters_with_class,
            annotations: deferred_annotations(&foreign_annotations, &stack),
            stack,
            return_type: self.self_type.clone(),
            dispatch_receiver: self.outer_type.clone(),
            containing_class: self.class_id.clone(),
            origin: if constructor.is_some() {
                ConstructorOrigin::Declared
            } else {
                ConstructorOrigin::Default
            },
            foreign_annotations,
            status: StatusCell::new(status),
        }
    }

    fn class_type_parameter_refs(&self) -> Vec<TypeParameterRef> {
        self.class_type_parameters
            .iter()
            .cloned()
            .map(TypeParameterRef::Outer)
            .collect()
    }

    fn annotation_constructor(&self, value_parameters: Vec<JavaValueParameter>) -> JavaConstructor {
        let status = DeclarationStatus::new(Visibility::Public, Modality::Final, EffectiveVisibility::Public)
            .with_flag(StatusFlags::PRIMARY, true);
        JavaConstructor {
            symbol: self.callable_symbol(Name::init()),
            is_primary: true,
            is_inner: false,
            value_parameters,
            type_parameters: self.class_type_parameter_refs(),
            stack: Arc::clone(&self.stack),
            return_type: self.self_type.clone(),
            dispatch_receiver: None,
            containing_class: self.class_id.clone(),
            origin: ConstructorOrigin::Annotation,
            foreign_annotations: Vec::new(),
            annotations: Deferred::default(),
            status: StatusCell::new(status),
        }
    }

    /// `values()`, `valueOf(String)` and `entries`.
    fn enum_members(&self) -> Vec<Declaration> {
        let public_static = || {
            StatusCell::new(
                DeclarationStatus::new(Visibility::Public, Modality::Final, EffectiveVisibility::Public)
                    .with_flag(StatusFlags::STATIC, true),
            )
        };
        let synthetic_method = |name: &str, return_type: ConeType, parameters, origin| {
            Declaration::Method(Arc::new(JavaMethod {
                symbol: self.callable_symbol(Name::new(name)),
                name: Name::new(name),
                return_type: TypeRef::resolved(return_type),
                value_parameters: parameters,
                type_parameters: Vec::new(),
                stack: Arc::clone(&self.stack),
                is_static: true,
                containing_class: self.class_id.clone(),
                dispatch_receiver: None,
                origin,
                foreign_annotations: Vec::new(),
                annotations: Deferred::default(),
                status: public_static(),
            }))
        };

        let values_type = ConeType::class(
            ClassId::from_string(standard::ARRAY),
            vec![TypeProjection::invariant(self.self_type.clone())],
            false,
        );
        let value_parameter = JavaValueParameter::new(
            Name::new(VALUE_METHOD_NAME),
            TypeRef::resolved(ConeType::string()),
            false,
            Vec::new(),
        );
        let entries_type = ConeType::class(
            ClassId::from_string(standard::ENUM_ENTRIES),
            vec![TypeProjection::invariant(self.self_type.clone())],
            false,
        );
        vec![
            synthetic_method("values", values_type, Vec::new(), MethodOrigin::EnumValues),
            synthetic_method(
                "valueOf",
                self.self_type.clone(),
                vec![value_parameter],
                MethodOrigin::EnumValueOf,
            ),
            Declaration::Property(Arc::new(SyntheticProperty {
                symbol: self.callable_symbol(Name::new("entries")),
                name: Name::new("entries"),
                return_type: TypeRef::resolved(entries_type),
                is_static: true,
                containing_class: self.class_id.clone(),
                status: public_static(),
            })),
        ]
    }

    /// Component accessors and the canonical constructor of a source
    /// record. Binary records already declare both.
    fn record_members(&self, declarations: &mut Vec<Declaration>) {
        let public_final = || DeclarationStatus::new(Visibility::Public, Modality::Final, EffectiveVisibility::Public);

        for component in &self.foreign.record_components {
            let declared = declarations.iter().any(|declaration| match declaration {
                Declaration::Method(method) => method.name == component.name && method.value_parameters.is_empty(),
                _ => false,
            });
            if declared {
                continue;
            }
            declarations.push(Declaration::Method(Arc::new(JavaMethod {
                symbol: self.callable_symbol(component.name.clone()),
                name: component.name.clone(),
                return_type: TypeRef::java(component.ty.clone()),
                value_parameters: Vec::new(),
                type_parameters: Vec::new(),
                stack: Arc::clone(&self.stack),
                is_static: false,
                containing_class: self.class_id.clone(),
                dispatch_receiver: Some(self.dispatch_receiver.clone()),
                origin: MethodOrigin::RecordComponent,
                foreign_annotations: Vec::new(),
                annotations: Deferred::default(),
                status: StatusCell::new(public_final().with_flag(StatusFlags::RECORD_COMPONENT, true)),
            })));
        }

        let value_parameters = self
            .foreign
            .record_components
            .iter()
            .map(|component| {
                JavaValueParameter::new(
                    component.name.clone(),
                    TypeRef::java(component.ty.clone()),
                    component.is_vararg,
                    Vec::new(),
                )
            })
            .collect();
        declarations.push(Declaration::Constructor(Arc::new(JavaConstructor {
            symbol: self.callable_symbol(Name::init()),
            is_primary: true,
            is_inner: false,
            value_parameters,
            type_parameters: self.class_type_parameter_refs(),
            stack: Arc::clone(&self.stack),
            return_type: self.self_type.clone(),
            dispatch_receiver: None,
            containing_class: self.class_id.clone(),
            origin: ConstructorOrigin::Record,
            foreign_annotations: Vec::new(),
            annotations: Deferred::default(),
            status: StatusCell::new(public_final().with_flag(StatusFlags::PRIMARY, true)),
        })));
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Creates type parameters and registers them on `stack` and in the symbol
/// store. Every parameter is registered before any bound is looked at, so
/// bounds may refer to later parameters.
fn convert_type_parameters(
    session: &InteropSession,
    stack: &TypeParameterStack,
    parameters: &[ForeignTypeParameter],
) -> Vec<Arc<JavaTypeParameter>> {
    let symbols: Vec<_> = parameters
        .iter()
        .map(|parameter| {
            let symbol = session.allocator().type_parameter_symbol(parameter.name().clone());
            stack.add_parameter(&parameter.key, symbol.clone());
            symbol
        })
        .collect();
    parameters
        .iter()
        .zip(symbols)
        .map(|(parameter, symbol)| {
            let bounds = if parameter.upper_bounds.is_empty() {
                vec![TypeRef::resolved(ConeType::flexible_any())]
            } else {
                parameter.upper_bounds.iter().cloned().map(TypeRef::java).collect()
            };
            let parameter = Arc::new(JavaTypeParameter::new(
                symbol,
                parameter.key.clone(),
                bounds,
                parameter.annotations.clone(),
            ));
            session.symbols().register_type_parameter(Arc::clone(&parameter));
            parameter
        })
        .collect()
}

fn outer_type_parameters(session: &InteropSession, parent: &ClassSymbol) -> Vec<TypeParameterSymbol> {
    match session.symbols().class(parent) {
        Ok(parent) => parent
            .type_parameters()
            .iter()
            .map(|parameter| parameter.symbol().clone())
            .collect(),
        Err(error) => {
            debug!(error = %error, "JavaFacade: outer type parameters unavailable");
            Vec::new()
        }
    }
}

fn self_type(
    class_id: &ClassId,
    own: &[Arc<JavaTypeParameter>],
    outer: &[TypeParameterSymbol],
) -> ConeType {
    let arguments = own
        .iter()
        .map(|parameter| parameter.symbol.clone())
        .chain(outer.iter().cloned())
        .map(|symbol| TypeProjection::invariant(ConeType::type_parameter(symbol, false)))
        .collect();
    ConeType::class(class_id.clone(), arguments, false)
}

fn value_parameters(parameters: &[ForeignValueParameter]) -> Vec<JavaValueParameter> {
    parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| {
            let name = parameter
                .name
                .clone()
                .unwrap_or_else(|| Name::new(&format!("p{index}")));
            JavaValueParameter::new(
                name,
                TypeRef::java(parameter.ty.clone()),
                parameter.is_vararg,
                parameter.annotations.clone(),
            )
        })
        .collect()
}

fn deferred_annotations(
    annotations: &[ForeignAnnotation],
    stack: &Arc<TypeParameterStack>,
) -> Deferred<Vec<AnnotationCall>> {
    if annotations.is_empty() {
        return Deferred::default();
    }
    let annotations = annotations.to_vec();
    let stack = Arc::clone(stack);
    Deferred::new(move |session: &InteropSession| {
        AnnotationTranslator::new(session, Some(&stack)).translate_all(&annotations)
    })
}

/// Expected type of a constant initializer: primitives and `String` only.
fn constant_type(ty: &ForeignType) -> Option<ConeType> {
    match ty {
        ForeignType::Primitive(primitive) => Some(primitive_type(primitive.primitive)),
        ForeignType::Classifier(_) if ty.class_id().is_some_and(|id| id.as_string() == standard::JAVA_STRING) => {
            Some(ConeType::string())
        }
        _ => None,
    }
}

pub fn java_visibility(visibility: ForeignVisibility, is_static: bool) -> Visibility {
    match visibility {
        ForeignVisibility::Public => Visibility::Public,
        ForeignVisibility::Protected if is_static => Visibility::ProtectedStatic,
        ForeignVisibility::Protected => Visibility::ProtectedAndPackage,
        ForeignVisibility::PackagePrivate => Visibility::PackagePrivate,
        ForeignVisibility::Private => Visibility::Private,
    }
}

fn class_kind(kind: ForeignClassKind) -> ClassKind {
    match kind {
        ForeignClassKind::Class | ForeignClassKind::Record => ClassKind::Class,
        ForeignClassKind::Interface => ClassKind::Interface,
        ForeignClassKind::Enum => ClassKind::EnumClass,
        ForeignClassKind::Annotation => ClassKind::AnnotationClass,
    }
}

#[cfg(test)]
#[path = "../tests/facade_tests.rs"]
mod tests;
