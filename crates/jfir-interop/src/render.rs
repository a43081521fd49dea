//! Text and serializable views of synthesized classes and their scopes.
//!
//! Views are plain data: building one forces the lazy parts of a class
//! (supertypes, annotations, enhanced members), rendering it does not
//! touch the session again.

use crate::declarations::{Declaration, JavaClass};
use crate::enhancement::{EnhancedFunction, EnhancedProperty, FunctionKind};
use crate::scopes::{MemberScope, ScopeKind};
use crate::session::InteropSession;
use jfir_common::Result;
use jfir_types::TypeRef;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, Serialize)]
pub struct ClassView {
    pub class_id: String,
    pub kind: &'static str,
    pub visibility: String,
    pub modality: String,
    pub effective_visibility: String,
    pub flags: Vec<String>,
    pub module: String,
    pub type_parameters: Vec<TypeParameterView>,
    pub supertypes: Vec<String>,
    pub annotations: Vec<String>,
    pub members: Vec<MemberView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sealed_inheritors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested_classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<ScopeView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeParameterView {
    pub name: String,
    pub bounds: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberView {
    pub kind: &'static str,
    pub name: String,
    pub signature: String,
    pub visibility: String,
    pub is_static: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScopeView {
    pub kind: &'static str,
    pub constructors: Vec<String>,
    pub functions: Vec<String>,
    pub properties: Vec<String>,
}

impl ClassView {
    pub fn new(session: &InteropSession, class: &JavaClass) -> Self {
        let status = class.status();
        Self {
            class_id: class.class_id.to_string(),
            kind: class.kind.keyword(),
            visibility: status.visibility.to_string(),
            modality: status.modality.to_string(),
            effective_visibility: status.effective_visibility.to_string(),
            flags: status
                .flags
                .iter_names()
                .map(|(name, _)| name.to_ascii_lowercase())
                .collect(),
            module: class.module.to_string(),
            type_parameters: class
                .type_parameters()
                .iter()
                .map(|parameter| TypeParameterView {
                    name: parameter.symbol().name().to_string(),
                    bounds: session
                        .symbols()
                        .type_parameter(parameter.symbol())
                        .map(|parameter| parameter.bounds().iter().map(type_ref_text).collect())
                        .unwrap_or_default(),
                })
                .collect(),
            supertypes: class.supertypes(session).iter().map(ToString::to_string).collect(),
            annotations: class.annotations.get(session).iter().map(ToString::to_string).collect(),
            members: class.declarations.iter().map(MemberView::new).collect(),
            sealed_inheritors: class.sealed_inheritors().iter().map(ToString::to_string).collect(),
            nested_classes: class
                .existing_nested_classifier_names
                .iter()
                .map(ToString::to_string)
                .collect(),
            scopes: Vec::new(),
        }
    }

    /// Adds the use-site scope and, when there is one, the static scope.
    pub fn with_scopes(mut self, session: &InteropSession, class: &Arc<JavaClass>) -> Result<Self> {
        let use_site = session.use_site_member_scope(class)?;
        self.scopes.push(ScopeView::new(session, ScopeKind::UseSite, use_site.as_ref())?);
        if let Some(statics) = session.static_member_scope_for_callables(class)? {
            self.scopes.push(ScopeView::new(session, ScopeKind::Static, statics.as_ref())?);
        }
        Ok(self)
    }
}

impl MemberView {
    fn new(declaration: &Declaration) -> Self {
        let (signature, visibility) = match declaration {
            Declaration::Field(field) => (
                format!("{} {}: {}", if field.is_var { "var" } else { "val" }, field.name, type_ref_text(&field.return_type)),
                field.status().visibility,
            ),
            Declaration::Method(method) => {
                let parameters: Vec<String> = method
                    .value_parameters
                    .iter()
                    .map(|parameter| format!("{}: {}", parameter.name, type_ref_text(&parameter.ty)))
                    .collect();
                (
                    format!(
                        "fun {}({}): {}",
                        method.name,
                        parameters.join(", "),
                        type_ref_text(&method.return_type)
                    ),
                    method.status().visibility,
                )
            }
            Declaration::Constructor(constructor) => {
                let parameters: Vec<String> = constructor
                    .value_parameters
                    .iter()
                    .map(|parameter| format!("{}: {}", parameter.name, type_ref_text(&parameter.ty)))
                    .collect();
                (
                    format!("constructor({}): {}", parameters.join(", "), constructor.return_type),
                    constructor.status().visibility,
                )
            }
            Declaration::EnumEntry(entry) => (
                format!("entry {}: {}", entry.name, type_ref_text(&entry.return_type)),
                entry.status().visibility,
            ),
            Declaration::Property(property) => (
                format!("val {}: {}", property.name, type_ref_text(&property.return_type)),
                property.status().visibility,
            ),
        };
        Self {
            kind: declaration.kind_name(),
            name: declaration.name().to_string(),
            signature,
            visibility: visibility.to_string(),
            is_static: declaration.is_static(),
        }
    }
}

impl ScopeView {
    pub fn new(session: &InteropSession, kind: ScopeKind, scope: &dyn MemberScope) -> Result<Self> {
        let mut view = Self {
            kind: match kind {
                ScopeKind::UseSite => "use-site",
                ScopeKind::Static => "static",
            },
            constructors: scope
                .constructors(session)?
                .iter()
                .map(|constructor| constructor.to_string())
                .collect(),
            functions: Vec::new(),
            properties: Vec::new(),
        };
        for name in scope.callable_names() {
            view.functions
                .extend(scope.functions(session, &name)?.iter().map(|function| function.to_string()));
            view.properties
                .extend(scope.properties(session, &name)?.iter().map(|property| property.to_string()));
        }
        Ok(view)
    }
}

fn type_ref_text(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Java(foreign) => format!("java {foreign}"),
        TypeRef::Resolved(cone) => cone.to_string(),
    }
}

// =============================================================================
// Text rendering
// =============================================================================

impl fmt::Display for EnhancedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            f.write_str("static ")?;
        }
        match self.kind {
            FunctionKind::Method => write!(f, "fun ")?,
            FunctionKind::Constructor => write!(f, "constructor")?,
        }
        if !self.type_parameters.is_empty() {
            f.write_str("<")?;
            for (index, parameter) in self.type_parameters.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", parameter.symbol.name())?;
                for (bound_index, bound) in parameter.bounds.iter().enumerate() {
                    write!(f, "{}{bound}", if bound_index == 0 { " : " } else { " & " })?;
                }
            }
            f.write_str("> ")?;
        }
        if self.kind == FunctionKind::Method {
            write!(f, "{}", self.name)?;
        }
        f.write_str("(")?;
        for (index, parameter) in self.value_parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            if parameter.is_vararg {
                f.write_str("vararg ")?;
            }
            write!(f, "{}: {}", parameter.name, parameter.ty)?;
            if parameter.has_default_value {
                f.write_str(" = ...")?;
            }
        }
        write!(f, "): {}", self.return_type)
    }
}

impl fmt::Display for EnhancedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            f.write_str("static ")?;
        }
        let keyword = if self.is_var { "var" } else { "val" };
        write!(f, "{keyword} {}: {}", self.name, self.return_type)
    }
}

impl fmt::Display for ClassView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            writeln!(f, "{annotation}")?;
        }
        write!(f, "{} {} {} {}", self.visibility, self.modality, self.kind, self.class_id)?;
        if !self.type_parameters.is_empty() {
            let parameters: Vec<String> = self
                .type_parameters
                .iter()
                .map(|parameter| {
                    if parameter.bounds.is_empty() {
                        parameter.name.clone()
                    } else {
                        format!("{} : {}", parameter.name, parameter.bounds.join(" & "))
                    }
                })
                .collect();
            write!(f, "<{}>", parameters.join(", "))?;
        }
        if !self.supertypes.is_empty() {
            write!(f, " : {}", self.supertypes.join(", "))?;
        }
        writeln!(f, " {{")?;
        writeln!(f, "    // effective visibility: {}", self.effective_visibility)?;
        if !self.flags.is_empty() {
            writeln!(f, "    // flags: {}", self.flags.join(", "))?;
        }
        if !self.sealed_inheritors.is_empty() {
            writeln!(f, "    // permits: {}", self.sealed_inheritors.join(", "))?;
        }
        for member in &self.members {
            let prefix = if member.is_static { "static " } else { "" };
            writeln!(f, "    {} {prefix}{}", member.visibility, member.signature)?;
        }
        for nested in &self.nested_classes {
            writeln!(f, "    nested {nested}")?;
        }
        for scope in &self.scopes {
            writeln!(f, "    scope {}:", scope.kind)?;
            for line in scope.constructors.iter().chain(&scope.functions).chain(&scope.properties) {
                writeln!(f, "        {line}")?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
