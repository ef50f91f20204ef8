mod common;

use schemaform::config::{ConfigError, GeneratorConfig, LoggingConfig};
use schemaform::udf::{RenderBackend, UdfManifest};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_config_file() {
    common::init_test_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("schemaform.toml");
    fs::write(
        &path,
        r#"
pretty_headings = true
max_depth = 32
output_schema_name = "Result"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = GeneratorConfig::from_file(&path).unwrap();
    assert!(config.pretty_headings);
    assert_eq!(config.max_depth, 32);
    assert_eq!(config.input_schema_name, "Apply_InputSchema");
    assert_eq!(config.output_schema_name, "Result");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.normalize_options().max_depth, 32);
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = GeneratorConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn clashing_schema_names_are_rejected() {
    let err = GeneratorConfig::from_toml_str(
        "input_schema_name = \"Same\"\noutput_schema_name = \"Same\"\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn manifest_format_follows_extension() {
    let dir = tempdir().unwrap();

    let json_path = dir.path().join("udfs.json");
    fs::write(
        &json_path,
        r#"{"functions": [{"name": "mesh", "backend": "pyvista", "parameters": [{"name": "output_schema"}]}]}"#,
    )
    .unwrap();
    let manifest = UdfManifest::from_file(&json_path).unwrap();
    assert_eq!(manifest.functions[0].backend, RenderBackend::Pyvista);

    let toml_path = dir.path().join("udfs.toml");
    fs::write(
        &toml_path,
        "[[functions]]\nname = \"a\"\nparameters = [{ name = \"input_schema\" }]\n\n[[functions]]\nname = \"b\"\n",
    )
    .unwrap();
    let manifest = UdfManifest::from_file(&toml_path).unwrap();
    let names: Vec<&str> = manifest.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(manifest.functions[1].parameters.is_empty());
}

#[test]
fn malformed_manifest_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("udfs.json");
    fs::write(&path, "{\"functions\": [").unwrap();
    assert!(matches!(UdfManifest::from_file(&path), Err(ConfigError::Json(_))));
}

#[test]
fn logging_init_rejects_unknown_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
    };
    assert!(matches!(
        schemaform::logging::init(&config),
        Err(ConfigError::InvalidLevel(_))
    ));
}
