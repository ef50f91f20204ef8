//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use schemaform::udf::{ManifestFunction, RenderBackend, UdfParameter, UserFunction};
use serde_json::{json, Value};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}

/// OpenAPI document of a small vector-addition endpoint.
pub fn vectoradd_document() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {"title": "vectoradd", "version": "0.1.0"},
        "paths": {"/apply": {"post": {"description": "Adds two vectors."}}},
        "components": {"schemas": {
            "Vector": {
                "type": "object",
                "properties": {
                    "v": {"type": "array", "items": {"type": "number"}},
                    "s": {"type": "number", "default": 1.0}
                },
                "required": ["v"]
            },
            "Apply_InputSchema": {
                "type": "object",
                "properties": {
                    "a": {"$ref": "#/components/schemas/Vector", "description": "First vector"},
                    "b": {"$ref": "#/components/schemas/Vector"},
                    "normalize": {"type": "boolean", "default": false},
                    "label": {"anyOf": [{"type": "string"}, {"type": "null"}]},
                    "mesh": {"type": "string", "format": "binary"}
                },
                "required": ["a", "b"]
            },
            "Apply_OutputSchema": {
                "type": "object",
                "properties": {
                    "result": {"$ref": "#/components/schemas/Vector"},
                    "norm": {"type": "number", "minimum": 0}
                },
                "required": ["result"]
            }
        }}
    })
}

/// A documented user function reading the given parameter names.
pub fn function(name: &str, parameters: &[&str]) -> Arc<dyn UserFunction> {
    Arc::new(ManifestFunction {
        name: name.to_string(),
        doc: Some(format!("This function is {}.\nThis is some documentation.\nOh my.", name)),
        parameters: parameters.iter().map(|p| UdfParameter::new(*p)).collect(),
        backend: RenderBackend::Builtin,
    })
}

/// A user function whose parameters carry explicit schema paths.
pub fn annotated_function(name: &str, parameters: &[(&str, &str)]) -> Arc<dyn UserFunction> {
    Arc::new(ManifestFunction {
        name: name.to_string(),
        doc: None,
        parameters: parameters
            .iter()
            .map(|(param, path)| UdfParameter::with_path(*param, *path))
            .collect(),
        backend: RenderBackend::Pyvista,
    })
}
