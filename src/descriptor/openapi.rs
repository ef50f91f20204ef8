//! Reading the served endpoint's OpenAPI document.

use serde::Serialize;
use serde_json::Value;

use crate::schema::types::SchemaError;

/// Background information about the served endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointMetadata {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl EndpointMetadata {
    /// Reads `info.title` and `info.version`. The description comes from
    /// `info.description`, falling back to the `/apply` operation's.
    pub fn from_document(document: &Value) -> Result<Self, SchemaError> {
        let info_str = |key: &str| document.pointer(&format!("/info/{key}")).and_then(Value::as_str);
        let required = |key: &str| {
            info_str(key).map(str::to_string).ok_or_else(|| {
                SchemaError::InvalidDocument(format!("document has no 'info.{}'", key))
            })
        };

        let description = info_str("description")
            .or_else(|| {
                document
                    .pointer("/paths/~1apply/post/description")
                    .and_then(Value::as_str)
            })
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            title: required("title")?,
            version: required("version")?,
            description,
        })
    }
}

/// Locates the named input and output schemas under `components.schemas`.
pub fn extract_schemas<'a>(
    document: &'a Value,
    input_name: &str,
    output_name: &str,
) -> Result<(&'a Value, &'a Value), SchemaError> {
    let schemas = document
        .pointer("/components/schemas")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            SchemaError::InvalidDocument("document has no 'components.schemas'".to_string())
        })?;
    let named = |name: &str| {
        schemas.get(name).ok_or_else(|| {
            SchemaError::InvalidDocument(format!("schema '{}' not found in 'components.schemas'", name))
        })
    };
    Ok((named(input_name)?, named(output_name)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn description_falls_back_to_apply_operation() {
        let document = json!({
            "info": {"title": "vectoradd", "version": "1.0"},
            "paths": {"/apply": {"post": {"description": "Adds two vectors."}}}
        });
        let metadata = EndpointMetadata::from_document(&document).unwrap();
        assert_eq!(metadata.title, "vectoradd");
        assert_eq!(metadata.description, "Adds two vectors.");
    }

    #[test]
    fn missing_info_is_invalid() {
        let err = EndpointMetadata::from_document(&json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDocument(_)));
    }

    #[test]
    fn extracts_named_schemas() {
        let document = json!({"components": {"schemas": {
            "In": {"type": "string"},
            "Out": {"type": "integer"}
        }}});
        let (input, output) = extract_schemas(&document, "In", "Out").unwrap();
        assert_eq!(input["type"], "string");
        assert_eq!(output["type"], "integer");
        assert!(extract_schemas(&document, "In", "Missing").is_err());
    }
}
