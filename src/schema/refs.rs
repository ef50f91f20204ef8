//! `$ref` expansion against the source document.
//!
//! A node carrying `$ref` is read through a layered view: keys of the
//! referenced schema take precedence, sibling keywords of the `$ref` fill in
//! whatever the target does not define. Nothing is copied.

use log::debug;
use serde_json::{Map, Value};

use crate::schema::types::{SchemaError, SchemaPath};

/// Read-only view over one schema node after `$ref` expansion.
#[derive(Debug, Clone)]
pub(crate) struct SchemaView<'a> {
    layers: Vec<&'a Map<String, Value>>,
}

impl<'a> SchemaView<'a> {
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// Expands `raw` into a [`SchemaView`], following chained references.
///
/// `ancestors` holds every reference already entered on the way from the
/// tree root to this node; re-entering one of them is a cycle. The returned
/// list extends it with the references this node followed.
pub(crate) fn expand<'a>(
    raw: &'a Value,
    document: Option<&'a Value>,
    path: &SchemaPath,
    mut ancestors: Vec<String>,
) -> Result<(SchemaView<'a>, Vec<String>), SchemaError> {
    let mut current = as_mapping(raw, path)?;
    let mut layers = vec![current];

    while let Some(reference) = current.get("$ref") {
        let reference = reference.as_str().ok_or_else(|| {
            SchemaError::InvalidDocument(format!("'$ref' at '{}' must be a string", path))
        })?;
        if ancestors.iter().any(|seen| seen == reference) {
            return Err(SchemaError::CyclicRef(format!(
                "'{}' re-enters itself at '{}'",
                reference, path
            )));
        }
        debug!("🔗 Following {} at '{}'", reference, path);
        ancestors.push(reference.to_string());
        current = as_mapping(lookup(reference, document, path)?, path)?;
        layers.insert(0, current);
    }

    Ok((SchemaView { layers }, ancestors))
}

fn lookup<'a>(
    reference: &str,
    document: Option<&'a Value>,
    path: &SchemaPath,
) -> Result<&'a Value, SchemaError> {
    let document = document.ok_or_else(|| {
        SchemaError::UnresolvedRef(format!(
            "'{}' at '{}' but no source document was supplied",
            reference, path
        ))
    })?;
    let pointer = reference.strip_prefix('#').ok_or_else(|| {
        SchemaError::UnresolvedRef(format!(
            "'{}' at '{}' is not a local reference",
            reference, path
        ))
    })?;
    document.pointer(pointer).ok_or_else(|| {
        SchemaError::UnresolvedRef(format!("'{}' at '{}' points nowhere", reference, path))
    })
}

fn as_mapping<'a>(value: &'a Value, path: &SchemaPath) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| {
        SchemaError::InvalidDocument(format!("schema at '{}' is not a mapping", path))
    })
}
