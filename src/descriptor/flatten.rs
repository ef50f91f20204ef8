//! Flat field list for template-driven form generation.
//!
//! Object nesting becomes a chain of named containers; every property,
//! at any depth, turns into one [`FlatField`]. Arrays and unions are single
//! fields: their item template and candidates stay inside `kind`. Encoded
//! n-d array objects are single fields too, reported as `array` (or
//! `scalar-number` when their shape is zero-dimensional).

use serde::Serialize;
use serde_json::Value;

use crate::schema::types::{
    EncodedArray, FieldHints, FieldKind, NumberConstraints, SchemaNode, SchemaTree,
};

/// Name of the outermost container every top-level field lives in.
pub const ROOT_CONTAINER: &str = "st";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatField {
    /// Underscore-joined key path
    pub uid: String,
    /// Dot-joined key path, as used in the request payload
    pub key: String,
    /// Last key of the path
    pub stem: String,
    pub container: String,
    pub parent_container: String,
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_constraints: Option<NumberConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    pub hints: FieldHints,
}

impl FlatField {
    fn from_node(node: &SchemaNode) -> Self {
        let uid = node.path.uid();
        let parent_container = match node.path.parent() {
            Some(parent) if !parent.is_root() => format!("container_{}", parent.uid()),
            _ => ROOT_CONTAINER.to_string(),
        };
        let stem = node
            .path
            .last()
            .map(|segment| segment.label())
            .unwrap_or_default();
        let (number_constraints, options) = match &node.kind {
            FieldKind::Number(constraints) | FieldKind::Integer(constraints) => (Some(constraints.clone()), None),
            FieldKind::Enum(values) => (None, Some(values.clone())),
            _ => (None, None),
        };

        Self {
            container: format!("container_{}", uid),
            key: node.path.to_string(),
            uid,
            stem,
            parent_container,
            kind: match node.hints.encoded_array {
                Some(EncodedArray { scalar: true }) => "scalar-number",
                Some(EncodedArray { scalar: false }) => "array",
                None => node.kind.name(),
            },
            title: node.title.clone(),
            description: node.description.clone(),
            default: node.default.clone(),
            required: node.required,
            number_constraints,
            options,
            hints: node.hints.clone(),
        }
    }
}

/// Depth-first list of every property reachable through objects, root
/// excluded. A tree whose root is not an object yields no fields.
pub fn flatten(tree: &SchemaTree) -> Vec<FlatField> {
    let mut fields = Vec::new();
    let mut stack: Vec<&SchemaNode> = match &tree.root.kind {
        FieldKind::Object(properties) => properties.iter().rev().collect(),
        _ => Vec::new(),
    };

    while let Some(node) = stack.pop() {
        fields.push(FlatField::from_node(node));
        if node.hints.encoded_array.is_some() {
            continue;
        }
        if let FieldKind::Object(properties) = &node.kind {
            stack.extend(properties.iter().rev());
        }
    }
    fields
}
