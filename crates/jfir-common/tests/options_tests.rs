use super::*;

#[test]
fn test_empty_json_gives_defaults() {
    let options = InteropOptions::from_json("{}").unwrap();
    assert_eq!(options, InteropOptions::default());
    assert_eq!(options.deprecated_message, "Deprecated in Java");
    assert!(!options.ignore_nullability_annotations);
}

#[test]
fn test_default_settings_recognize_common_annotations() {
    let settings = NullabilitySettings::default();
    assert!(settings.is_nullable(&FqName::new("org.jetbrains.annotations.Nullable")));
    assert!(settings.is_not_null(&FqName::new("javax.annotation.Nonnull")));
    assert!(!settings.is_nullable(&FqName::new("javax.annotation.Nonnull")));
    assert_eq!(
        settings.default_targets(&FqName::new("javax.annotation.ParametersAreNonnullByDefault")),
        Some(&[DefaultNullabilityTarget::ValueParameter][..])
    );
    assert!(settings.is_default_reset(&FqName::new("org.jspecify.annotations.NullUnmarked")));
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let json = r#"{
        "ignoreNullabilityAnnotations": true,
        "nullability": { "nullableAnnotations": ["my.Nullable"] }
    }"#;
    let options = InteropOptions::from_json(json).unwrap();
    assert!(options.ignore_nullability_annotations);
    assert!(options.nullability.is_nullable(&FqName::new("my.Nullable")));
    assert!(!options.nullability.is_nullable(&FqName::new("org.jetbrains.annotations.Nullable")));
    assert!(options.nullability.is_not_null(&FqName::new("org.jetbrains.annotations.NotNull")));
}

#[test]
fn test_default_not_null_targets_parse() {
    let json = r#"{
        "nullability": {
            "defaultNotNull": [{ "fqName": "my.NonNullFields", "targets": ["field", "typeUse"] }]
        }
    }"#;
    let options = InteropOptions::from_json(json).unwrap();
    assert_eq!(
        options.nullability.default_targets(&FqName::new("my.NonNullFields")),
        Some(&[DefaultNullabilityTarget::Field, DefaultNullabilityTarget::TypeUse][..])
    );
}
