//! Member scopes of synthesized classes.
//!
//! Scopes are built on demand and cached per `(class symbol, scope kind)`;
//! each key is constructed at most once per session, even when several
//! threads ask for it first at the same time. Members are enhanced lazily,
//! on the first lookup of their name.
//!
//! | Scope | Contents |
//! |-------|----------|
//! | [`EnhancementScope`] | declared members of one class, enhanced |
//! | [`SubstitutedScope`] | a supertype's scope seen through the subclass's type arguments |
//! | [`JavaUseSiteScope`] | declared instance members plus inherited ones; overrides by erased signature |
//! | [`AnnotationPropertyScope`] | annotation methods exposed as properties |
//! | [`StaticMemberScope`] | static members plus those of the closest Java supertypes |
//! | [`NestedClassifierScope`] | nested classes, materialized on lookup |
//!
//! A class that reaches itself through its supertypes gets `Any` as its
//! only supertype for scope purposes, so composition never recurses into a
//! scope that is still being built.

use crate::declarations::{Declaration, JavaClass};
use crate::enhancement::{EnhancedFunction, EnhancedProperty, supertype_substitutor};
use crate::session::InteropSession;
use indexmap::{IndexMap, IndexSet};
use jfir_common::limits::MEMBER_INDEX_INITIAL_CAPACITY;
use jfir_common::{ClassId, ClassKind, InteropError, Name, Result, SessionCache};
use jfir_model::ClassRequest;
use jfir_types::{
    CallableSymbol, ClassSymbol, ConeType, RecursionGuard, RecursionProfile, RecursionResult, Substitutor,
};
use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace, warn};

// =============================================================================
// MemberScope
// =============================================================================

/// Name-based lookup of the members visible in a class.
pub trait MemberScope: Send + Sync + fmt::Debug {
    fn functions(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedFunction>>>;

    fn properties(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedProperty>>>;

    fn constructors(&self, _session: &InteropSession) -> Result<Vec<Arc<EnhancedFunction>>> {
        Ok(Vec::new())
    }

    fn classifier(&self, _session: &InteropSession, _name: &Name) -> Result<Option<Arc<JavaClass>>> {
        Ok(None)
    }

    /// Names of every function and property in the scope.
    fn callable_names(&self) -> Vec<Name>;

    fn classifier_names(&self) -> Vec<Name> {
        Vec::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    UseSite,
    Static,
}

// =============================================================================
// Declared members
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MemberFilter {
    NonStatic,
    StaticOnly,
}

impl MemberFilter {
    fn accepts(self, declaration: &Declaration) -> bool {
        match self {
            Self::NonStatic => !declaration.is_static(),
            Self::StaticOnly => declaration.is_static(),
        }
    }
}

/// Declarations of one class indexed by name.
struct DeclaredMembers {
    index: IndexMap<Name, SmallVec<[Declaration; 2]>, FxBuildHasher>,
}

impl DeclaredMembers {
    fn new(class: &JavaClass, filter: MemberFilter) -> Self {
        let mut index: IndexMap<Name, SmallVec<[Declaration; 2]>, FxBuildHasher> =
            IndexMap::with_capacity_and_hasher(MEMBER_INDEX_INITIAL_CAPACITY, FxBuildHasher);
        for declaration in &class.declarations {
            if matches!(declaration, Declaration::Constructor(_)) || !filter.accepts(declaration) {
                continue;
            }
            index.entry(declaration.name()).or_default().push(declaration.clone());
        }
        Self { index }
    }

    fn named(&self, name: &Name) -> &[Declaration] {
        self.index.get(name).map_or(&[], |declarations| declarations.as_slice())
    }
}

/// Declared members of one class, enhanced on lookup.
pub struct EnhancementScope {
    class: Arc<JavaClass>,
    filter: MemberFilter,
    members: DeclaredMembers,
}

impl EnhancementScope {
    fn new(class: Arc<JavaClass>, filter: MemberFilter) -> Self {
        let members = DeclaredMembers::new(&class, filter);
        Self { class, filter, members }
    }

    fn has_functions(&self) -> bool {
        self.members
            .index
            .values()
            .flatten()
            .any(|declaration| matches!(declaration, Declaration::Method(_)))
    }
}

impl fmt::Debug for EnhancementScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhancementScope")
            .field("class_id", &self.class.class_id)
            .field("filter", &self.filter)
            .field("names", &self.members.index.len())
            .finish()
    }
}

impl MemberScope for EnhancementScope {
    fn functions(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedFunction>>> {
        self.members
            .named(name)
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Method(method) => {
                    Some(session.enhancement().enhance_method(session, &self.class, method))
                }
                _ => None,
            })
            .collect()
    }

    fn properties(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedProperty>>> {
        let enhancement = session.enhancement();
        self.members
            .named(name)
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Field(field) => Some(enhancement.enhance_field(session, &self.class, field)),
                Declaration::EnumEntry(entry) => Some(enhancement.enhance_enum_entry(session, &self.class, entry)),
                Declaration::Property(property) => {
                    Some(enhancement.enhance_synthetic_property(session, &self.class, property))
                }
                Declaration::Method(_) | Declaration::Constructor(_) => None,
            })
            .collect()
    }

    fn constructors(&self, session: &InteropSession) -> Result<Vec<Arc<EnhancedFunction>>> {
        if self.filter == MemberFilter::StaticOnly {
            return Ok(Vec::new());
        }
        self.class
            .constructors()
            .map(|constructor| session.enhancement().enhance_constructor(session, &self.class, constructor))
            .collect()
    }

    fn classifier(&self, session: &InteropSession, name: &Name) -> Result<Option<Arc<JavaClass>>> {
        session.nested_classifier_scope(&self.class).classifier(session, name)
    }

    fn callable_names(&self) -> Vec<Name> {
        self.members.index.keys().cloned().collect()
    }

    fn classifier_names(&self) -> Vec<Name> {
        self.class.existing_nested_classifier_names.clone()
    }
}

// =============================================================================
// Substitution
// =============================================================================

/// A supertype's scope with the supertype's type parameters replaced by
/// the arguments the subclass passes.
pub struct SubstitutedScope {
    inner: Arc<dyn MemberScope>,
    substitutor: Substitutor,
}

impl SubstitutedScope {
    pub fn new(inner: Arc<dyn MemberScope>, substitutor: Substitutor) -> Self {
        Self { inner, substitutor }
    }
}

impl fmt::Debug for SubstitutedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutedScope").field("inner", &self.inner).finish()
    }
}

impl MemberScope for SubstitutedScope {
    fn functions(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedFunction>>> {
        let functions = self.inner.functions(session, name)?;
        Ok(functions
            .into_iter()
            .map(|function| Arc::new(function.substitute(&self.substitutor)))
            .collect())
    }

    fn properties(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedProperty>>> {
        let properties = self.inner.properties(session, name)?;
        Ok(properties
            .into_iter()
            .map(|property| Arc::new(property.substitute(&self.substitutor)))
            .collect())
    }

    fn callable_names(&self) -> Vec<Name> {
        self.inner.callable_names()
    }
}

// =============================================================================
// Use-site scope
// =============================================================================

/// Declared instance members of a class merged with the members of its
/// supertypes. A declared function hides every inherited function with
/// the same erased signature; a declared field hides inherited fields of
/// the same name.
pub struct JavaUseSiteScope {
    class_id: ClassId,
    declared: EnhancementScope,
    supertypes: Vec<Arc<dyn MemberScope>>,
}

impl fmt::Debug for JavaUseSiteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JavaUseSiteScope")
            .field("class_id", &self.class_id)
            .field("supertypes", &self.supertypes.len())
            .finish()
    }
}

impl MemberScope for JavaUseSiteScope {
    fn functions(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedFunction>>> {
        let mut result = self.declared.functions(session, name)?;
        let mut signatures: FxHashSet<String> =
            result.iter().map(|function| function.erased_signature(session)).collect();
        let mut seen: FxHashSet<CallableSymbol> = result.iter().map(|function| function.symbol.clone()).collect();
        for supertype in &self.supertypes {
            let mut added = Vec::new();
            for function in supertype.functions(session, name)? {
                if seen.contains(&function.symbol) {
                    continue;
                }
                let signature = function.erased_signature(session);
                if signatures.contains(&signature) {
                    trace!(class_id = %self.class_id, signature = %signature, "JavaUseSiteScope: overridden");
                    continue;
                }
                seen.insert(function.symbol.clone());
                added.push((signature, function));
            }
            // Functions of one supertype never hide each other.
            for (signature, function) in added {
                signatures.insert(signature);
                result.push(function);
            }
        }
        Ok(result)
    }

    fn properties(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedProperty>>> {
        let declared = self.declared.properties(session, name)?;
        if !declared.is_empty() {
            return Ok(declared);
        }
        let mut result: Vec<Arc<EnhancedProperty>> = Vec::new();
        for supertype in &self.supertypes {
            for property in supertype.properties(session, name)? {
                if result.iter().all(|existing| existing.symbol != property.symbol) {
                    result.push(property);
                }
            }
        }
        Ok(result)
    }

    fn constructors(&self, session: &InteropSession) -> Result<Vec<Arc<EnhancedFunction>>> {
        self.declared.constructors(session)
    }

    fn classifier(&self, session: &InteropSession, name: &Name) -> Result<Option<Arc<JavaClass>>> {
        self.declared.classifier(session, name)
    }

    fn callable_names(&self) -> Vec<Name> {
        let mut names: IndexSet<Name, FxBuildHasher> = self.declared.callable_names().into_iter().collect();
        for supertype in &self.supertypes {
            names.extend(supertype.callable_names());
        }
        names.into_iter().collect()
    }

    fn classifier_names(&self) -> Vec<Name> {
        self.declared.classifier_names()
    }
}

// =============================================================================
// Annotation properties
// =============================================================================

/// Exposes the parameters of an annotation class as read-only properties.
/// The methods they come from are no longer visible as functions.
pub struct AnnotationPropertyScope {
    class: Arc<JavaClass>,
    inner: Arc<dyn MemberScope>,
}

impl fmt::Debug for AnnotationPropertyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationPropertyScope")
            .field("class_id", &self.class.class_id)
            .field("inner", &self.inner)
            .finish()
    }
}

impl MemberScope for AnnotationPropertyScope {
    fn functions(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedFunction>>> {
        let mut functions = self.inner.functions(session, name)?;
        functions.retain(|function| function.containing_class != self.class.class_id || function.is_static);
        Ok(functions)
    }

    fn properties(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedProperty>>> {
        let mut properties = self
            .class
            .methods_named(name.as_str())
            .filter(|method| !method.is_static)
            .map(|method| session.enhancement().enhance_annotation_property(session, &self.class, method))
            .collect::<Result<Vec<_>>>()?;
        properties.extend(self.inner.properties(session, name)?);
        Ok(properties)
    }

    fn constructors(&self, session: &InteropSession) -> Result<Vec<Arc<EnhancedFunction>>> {
        self.inner.constructors(session)
    }

    fn classifier(&self, session: &InteropSession, name: &Name) -> Result<Option<Arc<JavaClass>>> {
        self.inner.classifier(session, name)
    }

    fn callable_names(&self) -> Vec<Name> {
        self.inner.callable_names()
    }

    fn classifier_names(&self) -> Vec<Name> {
        self.inner.classifier_names()
    }
}

// =============================================================================
// Static scope
// =============================================================================

/// Static members of a class plus those of its closest Java supertypes.
/// Functions come from the superclass chain only; properties also come
/// from interfaces.
pub struct StaticMemberScope {
    class_id: ClassId,
    declared: EnhancementScope,
    superclass: Option<Arc<dyn MemberScope>>,
    interfaces: Vec<Arc<dyn MemberScope>>,
}

impl fmt::Debug for StaticMemberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMemberScope")
            .field("class_id", &self.class_id)
            .field("superclass", &self.superclass.is_some())
            .field("interfaces", &self.interfaces.len())
            .finish()
    }
}

impl MemberScope for StaticMemberScope {
    fn functions(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedFunction>>> {
        let mut result = self.declared.functions(session, name)?;
        if let Some(superclass) = &self.superclass {
            let signatures: FxHashSet<String> =
                result.iter().map(|function| function.erased_signature(session)).collect();
            for function in superclass.functions(session, name)? {
                if !signatures.contains(&function.erased_signature(session))
                    && result.iter().all(|existing| existing.symbol != function.symbol)
                {
                    result.push(function);
                }
            }
        }
        Ok(result)
    }

    fn properties(&self, session: &InteropSession, name: &Name) -> Result<Vec<Arc<EnhancedProperty>>> {
        let declared = self.declared.properties(session, name)?;
        if !declared.is_empty() {
            return Ok(declared);
        }
        let mut result: Vec<Arc<EnhancedProperty>> = Vec::new();
        for scope in self.superclass.iter().chain(&self.interfaces) {
            for property in scope.properties(session, name)? {
                if result.iter().all(|existing| existing.symbol != property.symbol) {
                    result.push(property);
                }
            }
        }
        Ok(result)
    }

    fn classifier(&self, session: &InteropSession, name: &Name) -> Result<Option<Arc<JavaClass>>> {
        self.declared.classifier(session, name)
    }

    fn callable_names(&self) -> Vec<Name> {
        let mut names: IndexSet<Name, FxBuildHasher> = self.declared.callable_names().into_iter().collect();
        for scope in self.superclass.iter().chain(&self.interfaces) {
            names.extend(scope.callable_names());
        }
        names.into_iter().collect()
    }

    fn classifier_names(&self) -> Vec<Name> {
        self.declared.classifier_names()
    }
}

// =============================================================================
// Nested classifiers
// =============================================================================

/// Nested classes of a class. Names are known up front; a class is only
/// synthesized when it is looked up.
#[derive(Debug)]
pub struct NestedClassifierScope {
    class_id: ClassId,
    names: Vec<Name>,
}

impl NestedClassifierScope {
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn classifier(&self, session: &InteropSession, name: &Name) -> Result<Option<Arc<JavaClass>>> {
        if !self.names.contains(name) {
            return Ok(None);
        }
        session.java_class(&self.class_id.create_nested(name))
    }
}

// =============================================================================
// MemberScopeProvider
// =============================================================================

pub struct MemberScopeProvider {
    scopes: SessionCache<(ClassSymbol, ScopeKind), Result<Option<Arc<dyn MemberScope>>>>,
    nested: SessionCache<ClassSymbol, Arc<NestedClassifierScope>>,
    constructed: AtomicUsize,
}

impl Default for MemberScopeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberScopeProvider {
    pub fn new() -> Self {
        Self {
            scopes: SessionCache::new("member_scopes"),
            nested: SessionCache::new("nested_classifier_scopes"),
            constructed: AtomicUsize::new(0),
        }
    }

    /// Number of member scopes built so far.
    #[cfg(test)]
    pub(crate) fn constructed_scopes(&self) -> usize {
        self.constructed.load(Ordering::Relaxed)
    }

    pub fn use_site_member_scope(
        &self,
        session: &InteropSession,
        class: &Arc<JavaClass>,
    ) -> Result<Arc<dyn MemberScope>> {
        let scope = self
            .scopes
            .get_or_compute(&(class.symbol.clone(), ScopeKind::UseSite), || {
                self.build_use_site_scope(session, class).map(Some)
            })?;
        scope.ok_or_else(|| InteropError::UnboundClass(class.class_id.clone()))
    }

    /// The static scope of `class`, or `None` when neither the class nor
    /// any of its Java supertypes declares a static member.
    pub fn static_member_scope_for_callables(
        &self,
        session: &InteropSession,
        class: &Arc<JavaClass>,
    ) -> Result<Option<Arc<dyn MemberScope>>> {
        self.scopes
            .get_or_compute(&(class.symbol.clone(), ScopeKind::Static), || {
                self.build_static_scope(session, class)
            })
    }

    pub fn nested_classifier_scope(&self, class: &Arc<JavaClass>) -> Arc<NestedClassifierScope> {
        self.nested.get_or_compute(&class.symbol, || {
            Arc::new(NestedClassifierScope {
                class_id: class.class_id.clone(),
                names: class.existing_nested_classifier_names.clone(),
            })
        })
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    fn build_use_site_scope(&self, session: &InteropSession, class: &Arc<JavaClass>) -> Result<Arc<dyn MemberScope>> {
        let built = self.constructed.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(class_id = %class.class_id, built, "MemberScopeProvider: building use-site scope");

        let mut supertypes: Vec<Arc<dyn MemberScope>> = Vec::new();
        if has_supertype_cycle(session, class) {
            warn!(class_id = %class.class_id, "MemberScopeProvider: supertype cycle, using Any");
        } else {
            for supertype in class.supertypes(session) {
                let Some(super_class) = java_class_of(session, supertype) else {
                    continue;
                };
                let scope = self.use_site_member_scope(session, &super_class)?;
                let substitutor = supertype_substitutor(&super_class, supertype);
                supertypes.push(if substitutor.is_empty() {
                    scope
                } else {
                    Arc::new(SubstitutedScope::new(scope, substitutor))
                });
            }
        }

        let use_site: Arc<dyn MemberScope> = Arc::new(JavaUseSiteScope {
            class_id: class.class_id.clone(),
            declared: EnhancementScope::new(Arc::clone(class), MemberFilter::NonStatic),
            supertypes,
        });
        if class.kind == ClassKind::AnnotationClass {
            return Ok(Arc::new(AnnotationPropertyScope {
                class: Arc::clone(class),
                inner: use_site,
            }));
        }
        Ok(use_site)
    }

    fn build_static_scope(
        &self,
        session: &InteropSession,
        class: &Arc<JavaClass>,
    ) -> Result<Option<Arc<dyn MemberScope>>> {
        let built = self.constructed.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(class_id = %class.class_id, built, "MemberScopeProvider: building static scope");

        let declared = EnhancementScope::new(Arc::clone(class), MemberFilter::StaticOnly);
        let mut superclass = None;
        let mut interfaces = Vec::new();
        if !has_supertype_cycle(session, class) {
            let mut visited: FxHashSet<ClassSymbol> = FxHashSet::default();
            visited.insert(class.symbol.clone());
            for super_class in closest_java_supertypes(session, class, &mut visited) {
                let Some(scope) = self.static_member_scope_for_callables(session, &super_class)? else {
                    continue;
                };
                if !super_class.is_interface() && superclass.is_none() {
                    superclass = Some(scope);
                } else {
                    interfaces.push(scope);
                }
            }
        }

        if declared.members.index.is_empty() && superclass.is_none() && interfaces.is_empty() {
            return Ok(None);
        }
        trace!(
            class_id = %class.class_id,
            declared_functions = declared.has_functions(),
            interfaces = interfaces.len(),
            "MemberScopeProvider: static scope"
        );
        Ok(Some(Arc::new(StaticMemberScope {
            class_id: class.class_id.clone(),
            declared,
            superclass,
            interfaces,
        })))
    }
}

/// The synthesized class behind a supertype, if it is a Java class.
fn java_class_of(session: &InteropSession, supertype: &ConeType) -> Option<Arc<JavaClass>> {
    java_class_by_id(session, supertype.class_id()?)
}

fn java_class_by_id(session: &InteropSession, class_id: &ClassId) -> Option<Arc<JavaClass>> {
    match session.java_class(class_id) {
        Ok(class) => class,
        Err(error) => {
            warn!(class_id = %class_id, error = %error, "MemberScopeProvider: supertype unavailable");
            None
        }
    }
}

/// The nearest Java classes among the supertypes of `class`, each at most
/// once. Supertypes that are classes of the model but not Java classes
/// (Kotlin classes) are searched through depth-first; anything else ends
/// its branch.
fn closest_java_supertypes(
    session: &InteropSession,
    class: &JavaClass,
    visited: &mut FxHashSet<ClassSymbol>,
) -> Vec<Arc<JavaClass>> {
    let mut result = Vec::new();
    let mut seen: FxHashSet<ClassId> = FxHashSet::default();
    let mut pending: Vec<ClassId> = class
        .supertypes(session)
        .iter()
        .rev()
        .filter_map(|supertype| supertype.class_id().cloned())
        .collect();
    while let Some(class_id) = pending.pop() {
        if !seen.insert(class_id.clone()) {
            continue;
        }
        if let Some(super_class) = java_class_by_id(session, &class_id) {
            if visited.insert(super_class.symbol.clone()) {
                result.push(super_class);
            }
            continue;
        }
        let Some(foreign) = session.class_finder().find_class(ClassRequest::new(&class_id)) else {
            continue;
        };
        trace!(class_id = %class_id, "MemberScopeProvider: searching through non-Java supertype");
        pending.extend(foreign.supertypes.iter().rev().filter_map(|supertype| supertype.class_id().cloned()));
    }
    result
}

/// Whether `class` reaches itself through its supertypes. Hierarchies too
/// deep for the supertype walk count as loops.
fn has_supertype_cycle(session: &InteropSession, class: &JavaClass) -> bool {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::SupertypeWalk);
    let mut finished: FxHashSet<ClassSymbol> = FxHashSet::default();
    reaches(session, class, &class.symbol, &mut guard, &mut finished)
}

fn reaches(
    session: &InteropSession,
    class: &JavaClass,
    target: &ClassSymbol,
    guard: &mut RecursionGuard<ClassSymbol>,
    finished: &mut FxHashSet<ClassSymbol>,
) -> bool {
    if finished.contains(&class.symbol) {
        return false;
    }
    let outcome = guard.scope(class.symbol.clone(), |guard| {
        class
            .supertypes(session)
            .iter()
            .filter_map(|supertype| java_class_of(session, supertype))
            .any(|super_class| reaches(session, &super_class, target, guard, finished))
    });
    match outcome {
        Ok(found) => {
            if !found {
                finished.insert(class.symbol.clone());
            }
            found
        }
        // A loop that does not pass through `target` is the other class's problem.
        Err(RecursionResult::Cycle) => class.symbol == *target,
        Err(_) => true,
    }
}

#[cfg(test)]
#[path = "../tests/scopes_tests.rs"]
mod tests;
