//! Field Resolver: fills defaults and derived hints on a normalized tree.

use log::{debug, info};
use serde_json::Value;

use super::defaults;
use crate::schema::types::{
    EncodedArray, FieldHints, FieldKind, SchemaError, SchemaNode, SchemaTree,
};

/// Property names of the endpoint's encoded n-d array objects.
const ENCODED_ARRAY_PROPERTIES: [&str; 3] = ["dtype", "shape", "data"];

/// Walks every node depth-first and fills in what rendering needs.
///
/// Declared defaults are kept; missing ones get a kind-appropriate
/// placeholder (binary payloads stay unset). Union candidates are each
/// resolved on their own and none is preferred: the union itself only
/// defaults to `null` when one of its candidates is the null kind.
///
/// Running it again on its own output changes nothing.
pub fn resolve(mut tree: SchemaTree) -> Result<SchemaTree, SchemaError> {
    let mut visited = 0usize;
    let mut synthesized = 0usize;

    let mut stack: Vec<&mut SchemaNode> = vec![&mut tree.root];
    while let Some(node) = stack.pop() {
        visited += 1;
        if fill(node)? {
            synthesized += 1;
        }
        stack.extend(node.children_mut().iter_mut());
    }

    info!(
        "✅ Resolved {} tree: {} nodes, {} placeholder defaults",
        tree.direction, visited, synthesized
    );
    Ok(tree)
}

/// Returns whether a placeholder default was written.
fn fill(node: &mut SchemaNode) -> Result<bool, SchemaError> {
    node.hints = hints_for(node);
    if node.default.is_some() {
        return Ok(false);
    }

    let placeholder = match &node.kind {
        FieldKind::Enum(values) if values.is_empty() => {
            return Err(SchemaError::EmptyEnum(format!("'{}' lists no values", node.path)));
        }
        FieldKind::Union(_) if node.hints.nullable => Some(Value::Null),
        kind => defaults::placeholder(kind),
    };

    match placeholder {
        Some(value) => {
            debug!("📊 Placeholder default for '{}': {}", node.path, value);
            node.default = Some(value);
            Ok(true)
        }
        None => Ok(false),
    }
}

fn hints_for(node: &SchemaNode) -> FieldHints {
    match &node.kind {
        FieldKind::Union(union) => {
            let has = |predicate: fn(&FieldKind) -> bool| {
                union.members.iter().any(|member| predicate(&member.kind))
            };
            FieldHints {
                nullable: has(|kind| matches!(kind, FieldKind::Null)),
                could_be_number: has(FieldKind::is_numeric)
                    && has(|kind| matches!(kind, FieldKind::String)),
                encoded_array: None,
            }
        }
        FieldKind::Object(_) => FieldHints {
            encoded_array: encoded_array(node),
            ..Default::default()
        },
        _ => FieldHints::default(),
    }
}

fn encoded_array(node: &SchemaNode) -> Option<EncodedArray> {
    if !ENCODED_ARRAY_PROPERTIES
        .iter()
        .all(|name| node.property(name).is_some())
    {
        return None;
    }
    let scalar = match node.property("shape").map(|shape| &shape.kind) {
        Some(FieldKind::Array(shape)) => shape.min_items == Some(0) && shape.max_items == Some(0),
        _ => false,
    };
    Some(EncodedArray { scalar })
}
