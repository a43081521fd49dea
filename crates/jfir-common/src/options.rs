//! Session options.
//!
//! Options are read from a JSON file by the CLI and passed to the session
//! unchanged. Every field has a default, so `{}` is a valid options file.
//!
//! ```json
//! {
//!   "ignoreNullabilityAnnotations": false,
//!   "nullability": {
//!     "nullableAnnotations": ["org.jetbrains.annotations.Nullable"],
//!     "defaultNotNull": [
//!       { "fqName": "javax.annotation.ParametersAreNonnullByDefault", "targets": ["valueParameter"] }
//!     ]
//!   }
//! }
//! ```

use crate::names::FqName;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteropOptions {
    pub nullability: NullabilitySettings,
    /// When set, nullability annotations are ignored and every foreign type
    /// stays flexible.
    pub ignore_nullability_annotations: bool,
    /// Message of the `kotlin.Deprecated` annotation synthesized for
    /// `java.lang.Deprecated`.
    pub deprecated_message: String,
}

impl Default for InteropOptions {
    fn default() -> Self {
        Self {
            nullability: NullabilitySettings::default(),
            ignore_nullability_annotations: false,
            deprecated_message: "Deprecated in Java".to_string(),
        }
    }
}

impl InteropOptions {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Positions a default-nullability annotation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultNullabilityTarget {
    ValueParameter,
    ReturnType,
    Field,
    TypeUse,
    TypeParameterBound,
}

impl DefaultNullabilityTarget {
    pub const ALL: [DefaultNullabilityTarget; 5] = [
        Self::ValueParameter,
        Self::ReturnType,
        Self::Field,
        Self::TypeUse,
        Self::TypeParameterBound,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultNullabilityAnnotation {
    pub fq_name: FqName,
    pub targets: Vec<DefaultNullabilityTarget>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NullabilitySettings {
    pub nullable_annotations: Vec<FqName>,
    pub not_null_annotations: Vec<FqName>,
    pub default_not_null: Vec<DefaultNullabilityAnnotation>,
    /// Annotations that cancel every default established further out.
    pub default_reset: Vec<FqName>,
    pub read_only_annotations: Vec<FqName>,
    pub mutable_annotations: Vec<FqName>,
}

fn fq_names(names: &[&str]) -> Vec<FqName> {
    names.iter().map(|name| FqName::new(name)).collect()
}

impl Default for NullabilitySettings {
    fn default() -> Self {
        let everywhere = DefaultNullabilityTarget::ALL.to_vec();
        Self {
            nullable_annotations: fq_names(&[
                "org.jetbrains.annotations.Nullable",
                "androidx.annotation.Nullable",
                "android.support.annotation.Nullable",
                "android.annotation.Nullable",
                "com.android.annotations.Nullable",
                "org.eclipse.jdt.annotation.Nullable",
                "org.checkerframework.checker.nullness.qual.Nullable",
                "javax.annotation.Nullable",
                "javax.annotation.CheckForNull",
                "edu.umd.cs.findbugs.annotations.Nullable",
                "edu.umd.cs.findbugs.annotations.CheckForNull",
                "io.reactivex.annotations.Nullable",
                "org.jspecify.annotations.Nullable",
            ]),
            not_null_annotations: fq_names(&[
                "org.jetbrains.annotations.NotNull",
                "edu.umd.cs.findbugs.annotations.NonNull",
                "androidx.annotation.NonNull",
                "android.support.annotation.NonNull",
                "android.annotation.NonNull",
                "com.android.annotations.NonNull",
                "org.eclipse.jdt.annotation.NonNull",
                "org.checkerframework.checker.nullness.qual.NonNull",
                "lombok.NonNull",
                "io.reactivex.annotations.NonNull",
                "javax.annotation.Nonnull",
                "org.jspecify.annotations.NonNull",
            ]),
            default_not_null: vec![
                DefaultNullabilityAnnotation {
                    fq_name: FqName::new("org.jspecify.annotations.NullMarked"),
                    targets: everywhere.clone(),
                },
                DefaultNullabilityAnnotation {
                    fq_name: FqName::new("org.eclipse.jdt.annotation.NonNullByDefault"),
                    targets: everywhere,
                },
                DefaultNullabilityAnnotation {
                    fq_name: FqName::new("javax.annotation.ParametersAreNonnullByDefault"),
                    targets: vec![DefaultNullabilityTarget::ValueParameter],
                },
                DefaultNullabilityAnnotation {
                    fq_name: FqName::new("org.springframework.lang.NonNullApi"),
                    targets: vec![
                        DefaultNullabilityTarget::ValueParameter,
                        DefaultNullabilityTarget::ReturnType,
                    ],
                },
                DefaultNullabilityAnnotation {
                    fq_name: FqName::new("org.springframework.lang.NonNullFields"),
                    targets: vec![DefaultNullabilityTarget::Field],
                },
            ],
            default_reset: fq_names(&["org.jspecify.annotations.NullUnmarked"]),
            read_only_annotations: fq_names(&["kotlin.annotations.jvm.ReadOnly"]),
            mutable_annotations: fq_names(&["kotlin.annotations.jvm.Mutable"]),
        }
    }
}

impl NullabilitySettings {
    pub fn is_nullable(&self, fq_name: &FqName) -> bool {
        self.nullable_annotations.contains(fq_name)
    }

    pub fn is_not_null(&self, fq_name: &FqName) -> bool {
        self.not_null_annotations.contains(fq_name)
    }

    pub fn default_targets(&self, fq_name: &FqName) -> Option<&[DefaultNullabilityTarget]> {
        self.default_not_null
            .iter()
            .find(|annotation| &annotation.fq_name == fq_name)
            .map(|annotation| annotation.targets.as_slice())
    }

    pub fn is_default_reset(&self, fq_name: &FqName) -> bool {
        self.default_reset.contains(fq_name)
    }

    pub fn is_read_only(&self, fq_name: &FqName) -> bool {
        self.read_only_annotations.contains(fq_name)
    }

    pub fn is_mutable(&self, fq_name: &FqName) -> bool {
        self.mutable_annotations.contains(fq_name)
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
