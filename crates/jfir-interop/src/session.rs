//! The interop session: collaborators, caches and services of one
//! compilation.
//!
//! A session is shared by reference across worker threads. All of its
//! services are `Sync` and keep their state in concurrent caches, so
//! different classes can be synthesized and enhanced in parallel.

use crate::collaborators::{
    ConstantEvaluator, LiteralEvaluator, ModuleResolver, SourceAndLibraryModules, StatusTransformer,
};
use crate::declarations::JavaClass;
use crate::enhancement::SignatureEnhancement;
use crate::facade::JavaFacade;
use crate::finder::JavaClassFinder;
use crate::provider::JavaClassProvider;
use crate::scopes::{MemberScope, MemberScopeProvider, NestedClassifierScope};
use crate::store::SymbolStore;
use jfir_common::{ClassId, InteropOptions, Result};
use jfir_model::ClassFinder;
use jfir_types::{
    BuiltinClassifiers, ClassSymbol, ClassifierLookup, ConeType, SymbolAllocator, TypeParameterInfo,
    TypeParameterSymbol,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct InteropSession {
    options: InteropOptions,
    finder: Arc<dyn ClassFinder>,
    evaluator: Arc<dyn ConstantEvaluator>,
    modules: Arc<dyn ModuleResolver>,
    status_transformers: Vec<Arc<dyn StatusTransformer>>,
    allocator: SymbolAllocator,
    builtins: BuiltinClassifiers,
    symbols: SymbolStore,
    facade: JavaFacade,
    provider: JavaClassProvider,
    scopes: MemberScopeProvider,
    enhancement: SignatureEnhancement,
}

impl InteropSession {
    pub fn builder(finder: Arc<dyn ClassFinder>) -> InteropSessionBuilder {
        InteropSessionBuilder::new(finder)
    }

    /// A session with default options and collaborators.
    pub fn new(finder: Arc<dyn ClassFinder>) -> Self {
        Self::builder(finder).build()
    }

    // -------------------------------------------------------------------------
    // Collaborators and services
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &InteropOptions {
        &self.options
    }

    pub fn class_finder(&self) -> &dyn ClassFinder {
        self.finder.as_ref()
    }

    pub fn evaluator(&self) -> &dyn ConstantEvaluator {
        self.evaluator.as_ref()
    }

    pub fn modules(&self) -> &dyn ModuleResolver {
        self.modules.as_ref()
    }

    pub fn status_transformers(&self) -> &[Arc<dyn StatusTransformer>] {
        &self.status_transformers
    }

    pub fn allocator(&self) -> &SymbolAllocator {
        &self.allocator
    }

    pub fn builtins(&self) -> &BuiltinClassifiers {
        &self.builtins
    }

    pub fn symbols(&self) -> &SymbolStore {
        &self.symbols
    }

    pub fn facade(&self) -> &JavaFacade {
        &self.facade
    }

    pub fn provider(&self) -> &JavaClassProvider {
        &self.provider
    }

    pub fn scopes(&self) -> &MemberScopeProvider {
        &self.scopes
    }

    pub fn enhancement(&self) -> &SignatureEnhancement {
        &self.enhancement
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// The session-stable symbol of `class_id`.
    pub fn class_symbol(&self, class_id: &ClassId) -> ClassSymbol {
        self.symbols.class_symbol(&self.allocator, class_id)
    }

    /// The synthesized class of `class_id`, materialized on first request.
    pub fn java_class(&self, class_id: &ClassId) -> Result<Option<Arc<JavaClass>>> {
        self.provider.class_by_id(self, class_id)
    }

    /// Resolves a dotted name such as `a.b.Outer.Inner`.
    pub fn find_class_by_fq_name(&self, fq_name: &str) -> Result<Option<Arc<JavaClass>>> {
        JavaClassFinder::new(self).find_class_by_fq_name(fq_name)
    }

    pub fn use_site_member_scope(&self, class: &Arc<JavaClass>) -> Result<Arc<dyn MemberScope>> {
        self.scopes.use_site_member_scope(self, class)
    }

    pub fn static_member_scope_for_callables(&self, class: &Arc<JavaClass>) -> Result<Option<Arc<dyn MemberScope>>> {
        self.scopes.static_member_scope_for_callables(self, class)
    }

    pub fn nested_classifier_scope(&self, class: &Arc<JavaClass>) -> Arc<NestedClassifierScope> {
        self.scopes.nested_classifier_scope(class)
    }
}

// =============================================================================
// Classifier lookup
// =============================================================================

impl ClassifierLookup for InteropSession {
    fn class_type_parameters(&self, class_id: &ClassId) -> Option<Vec<TypeParameterInfo>> {
        if let Some(parameters) = self.builtins.class_type_parameters(class_id) {
            return Some(parameters);
        }
        if let Some(class) = self.symbols.class_by_id(class_id) {
            return Some(class.type_parameter_infos());
        }
        match self.provider.class_by_id(self, class_id) {
            Ok(class) => class.map(|class| class.type_parameter_infos()),
            Err(error) => {
                warn!(class_id = %class_id, error = %error, "InteropSession::class_type_parameters: lookup failed");
                None
            }
        }
    }

    fn type_parameter_bounds(&self, symbol: &TypeParameterSymbol) -> Vec<ConeType> {
        if let Some(bounds) = self.builtins.bounds(symbol) {
            return bounds.to_vec();
        }
        self.symbols
            .type_parameter(symbol)
            .map(|parameter| parameter.resolved_bounds())
            .unwrap_or_default()
    }

    fn type_parameter_count(&self, class_id: &ClassId) -> Option<usize> {
        if let Some(count) = self.builtins.type_parameter_count(class_id) {
            return Some(count);
        }
        if let Some(class) = self.symbols.class_by_id(class_id) {
            return Some(class.origin.type_parameters.len());
        }
        self.facade
            .find_class(self, class_id, None)
            .map(|class| class.type_parameters.len())
    }
}

// =============================================================================
// Builder
// =============================================================================

pub struct InteropSessionBuilder {
    finder: Arc<dyn ClassFinder>,
    options: InteropOptions,
    evaluator: Arc<dyn ConstantEvaluator>,
    modules: Arc<dyn ModuleResolver>,
    status_transformers: Vec<Arc<dyn StatusTransformer>>,
}

impl InteropSessionBuilder {
    fn new(finder: Arc<dyn ClassFinder>) -> Self {
        Self {
            finder,
            options: InteropOptions::default(),
            evaluator: Arc::new(LiteralEvaluator),
            modules: Arc::new(SourceAndLibraryModules::default()),
            status_transformers: Vec::new(),
        }
    }

    pub fn options(mut self, options: InteropOptions) -> Self {
        self.options = options;
        self
    }

    pub fn evaluator(mut self, evaluator: Arc<dyn ConstantEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn modules(mut self, modules: Arc<dyn ModuleResolver>) -> Self {
        self.modules = modules;
        self
    }

    /// Registers a status transformer. Transformers run in registration
    /// order.
    pub fn status_transformer(mut self, transformer: Arc<dyn StatusTransformer>) -> Self {
        self.status_transformers.push(transformer);
        self
    }

    pub fn build(self) -> InteropSession {
        let allocator = SymbolAllocator::new();
        let builtins = BuiltinClassifiers::new(&allocator);
        debug!(
            status_transformers = self.status_transformers.len(),
            ignore_nullability_annotations = self.options.ignore_nullability_annotations,
            "InteropSessionBuilder::build"
        );
        InteropSession {
            options: self.options,
            finder: self.finder,
            evaluator: self.evaluator,
            modules: self.modules,
            status_transformers: self.status_transformers,
            allocator,
            builtins,
            symbols: SymbolStore::new(),
            facade: JavaFacade::new(),
            provider: JavaClassProvider::new(),
            scopes: MemberScopeProvider::new(),
            enhancement: SignatureEnhancement::new(),
        }
    }
}
