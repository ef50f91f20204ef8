use serde::Serialize;
use serde_json::Value;

use super::path::{Direction, PathSegment, SchemaPath};

/// Numeric range and step declared on a number or integer field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumberConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// `min` itself is outside the range
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exclusive_min: bool,
    /// `max` itself is outside the range
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exclusive_max: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl NumberConstraints {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.step.is_none()
    }

    /// Whether `value` lies inside the declared range.
    pub fn admits(&self, value: f64) -> bool {
        let above = self.min.map_or(true, |min| {
            if self.exclusive_min {
                value > min
            } else {
                value >= min
            }
        });
        let below = self.max.map_or(true, |max| {
            if self.exclusive_max {
                value < max
            } else {
                value <= max
            }
        });
        above && below
    }
}

/// Item template and length bounds of an array field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayConstraints {
    pub item: Box<SchemaNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
}

impl ArrayConstraints {
    pub fn new(item: SchemaNode) -> Self {
        Self {
            item: Box::new(item),
            min_items: None,
            max_items: None,
        }
    }
}

/// Keyword a union was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnionMode {
    #[serde(rename = "oneOf")]
    OneOf,
    #[serde(rename = "anyOf")]
    AnyOf,
}

/// Ordered union candidates. None of them is preferred; which one is active
/// is decided by whoever renders the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionMembers {
    pub mode: UnionMode,
    pub members: Vec<SchemaNode>,
}

/// Closed set of node kinds, each carrying its own constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "constraints")]
pub enum FieldKind {
    #[serde(rename = "scalar-string")]
    String,
    #[serde(rename = "scalar-number")]
    Number(NumberConstraints),
    #[serde(rename = "scalar-integer")]
    Integer(NumberConstraints),
    #[serde(rename = "scalar-boolean")]
    Boolean,
    #[serde(rename = "enum")]
    Enum(Vec<Value>),
    #[serde(rename = "array")]
    Array(ArrayConstraints),
    #[serde(rename = "object")]
    Object(Vec<SchemaNode>),
    #[serde(rename = "binary")]
    Binary,
    #[serde(rename = "union")]
    Union(UnionMembers),
    #[serde(rename = "null")]
    Null,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "scalar-string",
            FieldKind::Number(_) => "scalar-number",
            FieldKind::Integer(_) => "scalar-integer",
            FieldKind::Boolean => "scalar-boolean",
            FieldKind::Enum(_) => "enum",
            FieldKind::Array(_) => "array",
            FieldKind::Object(_) => "object",
            FieldKind::Binary => "binary",
            FieldKind::Union(_) => "union",
            FieldKind::Null => "null",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number(_) | FieldKind::Integer(_))
    }
}

/// Marks an object following the endpoint's encoded n-d array layout
/// (`dtype`, `shape` and `data` properties).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodedArray {
    /// The declared shape is zero-dimensional
    pub scalar: bool,
}

/// Neutral facts derived by the resolver. They describe the schema, not a
/// widget choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldHints {
    /// A union with a null candidate
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    /// A union mixing numeric and string candidates
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub could_be_number: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_array: Option<EncodedArray>,
}

/// One point in an input or output schema tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    pub path: SchemaPath,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub required: bool,
    #[serde(skip_serializing_if = "is_default_hints")]
    pub hints: FieldHints,
}

fn is_default_hints(hints: &FieldHints) -> bool {
    *hints == FieldHints::default()
}

impl SchemaNode {
    pub fn new(path: SchemaPath, kind: FieldKind, title: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            title: title.into(),
            description: String::new(),
            default: None,
            required: false,
            hints: FieldHints::default(),
        }
    }

    /// Direct children in declaration order: object properties, the array
    /// item template, or union candidates.
    pub fn children(&self) -> &[SchemaNode] {
        match &self.kind {
            FieldKind::Object(properties) => properties,
            FieldKind::Array(array) => std::slice::from_ref(array.item.as_ref()),
            FieldKind::Union(union) => &union.members,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [SchemaNode] {
        match &mut self.kind {
            FieldKind::Object(properties) => properties,
            FieldKind::Array(array) => std::slice::from_mut(array.item.as_mut()),
            FieldKind::Union(union) => &mut union.members,
            _ => &mut [],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Looks up a property of an object node by name.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match &self.kind {
            FieldKind::Object(properties) => properties
                .iter()
                .find(|child| matches!(child.path.last(), Some(PathSegment::Key(key)) if key == name)),
            _ => None,
        }
    }

    fn step(&self, segment: &PathSegment) -> Option<&SchemaNode> {
        match (segment, &self.kind) {
            (PathSegment::Key(name), FieldKind::Object(_)) => self.property(name),
            (PathSegment::Item, FieldKind::Array(array)) => Some(array.item.as_ref()),
            (PathSegment::Variant(n), FieldKind::Union(union)) => union.members.get(*n),
            _ => None,
        }
    }

    /// Follows `relative` downwards from this node.
    pub fn descendant(&self, relative: &[PathSegment]) -> Option<&SchemaNode> {
        relative
            .iter()
            .try_fold(self, |node, segment| node.step(segment))
    }
}

/// Root container for one direction. Created fresh per generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaTree {
    pub direction: Direction,
    pub root: SchemaNode,
}

impl SchemaTree {
    pub fn new(direction: Direction, root: SchemaNode) -> Self {
        Self { direction, root }
    }

    /// Node at `path`, if the path is reachable from the root.
    pub fn find(&self, path: &SchemaPath) -> Option<&SchemaNode> {
        self.root.descendant(path.segments())
    }

    /// Depth-first, pre-order walk over every node including the root.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![&self.root],
        }
    }

    pub fn leaves(&self) -> impl Iterator<Item = &SchemaNode> {
        self.nodes().filter(|node| node.is_leaf())
    }
}

/// Iterator returned by [`SchemaTree::nodes`].
pub struct Nodes<'a> {
    stack: Vec<&'a SchemaNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a SchemaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
