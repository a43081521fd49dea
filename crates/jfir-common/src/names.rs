//! Names and qualified identifiers.
//!
//! All names are reference-counted strings so they can be cloned freely
//! across threads. A `ClassId` uses the slash/dot notation of the frontend:
//! `java/util/Map.Entry` is the nested class `Entry` of `Map` in package
//! `java.util`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Name
// =============================================================================

/// A simple (unqualified) identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Special names are wrapped in angle brackets and never clash with
    /// identifiers from source.
    pub fn special(name: &str) -> Self {
        debug_assert!(name.starts_with('<') && name.ends_with('>'));
        Self(Arc::from(name))
    }

    /// The name used for constructors.
    pub fn init() -> Self {
        Self::special("<init>")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_special(&self) -> bool {
        self.0.starts_with('<')
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// FqName
// =============================================================================

/// A dot-separated qualified name. The empty string is the root package.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FqName(Arc<str>);

impl FqName {
    pub fn new(fq_name: &str) -> Self {
        Self(Arc::from(fq_name))
    }

    pub fn root() -> Self {
        Self(Arc::from(""))
    }

    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let joined: Vec<&str> = segments.into_iter().collect();
        Self::new(&joined.join("."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|segment| !segment.is_empty())
    }

    pub fn path_segments(&self) -> Vec<Name> {
        self.segments().map(Name::new).collect()
    }

    pub fn child(&self, name: &Name) -> Self {
        if self.is_root() {
            Self::new(name.as_str())
        } else {
            Self::new(&format!("{}.{}", self.0, name))
        }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind('.') {
            Some(index) => Self::new(&self.0[..index]),
            None => Self::root(),
        })
    }

    pub fn short_name(&self) -> Name {
        match self.0.rfind('.') {
            Some(index) => Name::new(&self.0[index + 1..]),
            None => Name::new(&self.0),
        }
    }

    pub fn starts_with(&self, other: &FqName) -> bool {
        other.is_root()
            || self.0.as_ref() == other.as_str()
            || (self.0.starts_with(other.as_str())
                && self.0.as_bytes().get(other.0.len()) == Some(&b'.'))
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FqName({})", self.0)
    }
}

// =============================================================================
// ClassId
// =============================================================================

/// Identity of a classifier: its package plus its (possibly nested)
/// relative name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId {
    package: FqName,
    relative: FqName,
}

impl ClassId {
    pub fn new(package: FqName, relative: FqName) -> Self {
        Self { package, relative }
    }

    pub fn top_level(package: FqName, name: &Name) -> Self {
        Self::new(package, FqName::new(name.as_str()))
    }

    /// Parses the `package/path/Outer.Inner` notation.
    pub fn from_string(value: &str) -> Self {
        match value.rfind('/') {
            Some(index) => Self::new(
                FqName::new(&value[..index].replace('/', ".")),
                FqName::new(&value[index + 1..]),
            ),
            None => Self::new(FqName::root(), FqName::new(value)),
        }
    }

    pub fn package_fq_name(&self) -> &FqName {
        &self.package
    }

    pub fn relative_class_name(&self) -> &FqName {
        &self.relative
    }

    pub fn short_class_name(&self) -> Name {
        self.relative.short_name()
    }

    pub fn is_nested(&self) -> bool {
        self.relative.parent().is_some_and(|parent| !parent.is_root())
    }

    pub fn outer_class_id(&self) -> Option<ClassId> {
        let parent = self.relative.parent()?;
        if parent.is_root() {
            return None;
        }
        Some(Self::new(self.package.clone(), parent))
    }

    pub fn outermost_class_id(&self) -> ClassId {
        let first = self.relative.segments().next().unwrap_or_default();
        Self::new(self.package.clone(), FqName::new(first))
    }

    pub fn create_nested(&self, name: &Name) -> ClassId {
        Self::new(self.package.clone(), self.relative.child(name))
    }

    /// Dotted, fully qualified name (`java.util.Map.Entry`).
    pub fn as_fq_name(&self) -> FqName {
        if self.package.is_root() {
            self.relative.clone()
        } else {
            FqName::new(&format!("{}.{}", self.package, self.relative))
        }
    }

    pub fn as_string(&self) -> String {
        if self.package.is_root() {
            self.relative.to_string()
        } else {
            format!("{}/{}", self.package.as_str().replace('.', "/"), self.relative)
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.as_string())
    }
}

impl Serialize for ClassId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for ClassId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_string(&value))
    }
}

// =============================================================================
// CallableId
// =============================================================================

/// Identity of a function, property, constructor or enum entry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CallableId {
    pub package: FqName,
    pub class_name: Option<FqName>,
    pub callable_name: Name,
}

impl CallableId {
    pub fn member(class_id: &ClassId, callable_name: Name) -> Self {
        Self {
            package: class_id.package_fq_name().clone(),
            class_name: Some(class_id.relative_class_name().clone()),
            callable_name,
        }
    }

    pub fn class_id(&self) -> Option<ClassId> {
        self.class_name
            .as_ref()
            .map(|relative| ClassId::new(self.package.clone(), relative.clone()))
    }
}

impl fmt::Display for CallableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class_id() {
            Some(class_id) => write!(f, "{}.{}", class_id, self.callable_name),
            None if self.package.is_root() => write!(f, "{}", self.callable_name),
            None => write!(f, "{}/{}", self.package.as_str().replace('.', "/"), self.callable_name),
        }
    }
}

impl fmt::Debug for CallableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallableId({self})")
    }
}

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod tests;
