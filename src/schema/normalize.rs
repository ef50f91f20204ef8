//! Schema Model: turns a raw JSON-Schema-like document into a typed
//! [`SchemaTree`].
//!
//! Node kinds are decided once, here, in a fixed order:
//!
//! 1. `enum` (or `const`) → enum
//! 2. `oneOf` / `anyOf`, or a `type` list → union
//! 3. `type: object` or `properties` → object
//! 4. `type: array`, `items` or `prefixItems` → array
//! 5. a binary `format` / `contentEncoding` → binary
//! 6. `string`, `number`, `integer`, `boolean`, `null` → the matching scalar
//!
//! Anything else is a [`SchemaError`]. Traversal runs on an explicit
//! work-list so deep documents cannot exhaust the stack.

use log::{debug, info};
use serde_json::{Map, Value};

use super::refs::{self, SchemaView};
use crate::schema::types::{
    ArrayConstraints, Direction, FieldKind, NumberConstraints, PathSegment, SchemaError,
    SchemaNode, SchemaPath, SchemaTree, UnionMembers, UnionMode,
};

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

const BINARY_FORMATS: &[&str] = &["binary", "byte", "base64"];

/// Options controlling normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Reformat key-derived titles: `leg_lengths` → `Leg Lengths`
    pub pretty_headings: bool,
    /// Deepest path length accepted before failing
    pub max_depth: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            pretty_headings: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Normalizes `raw` with default options and no `$ref` support.
pub fn normalize(raw: &Value, direction: Direction) -> Result<SchemaTree, SchemaError> {
    Normalizer::new(NormalizeOptions::default()).normalize(raw, direction)
}

/// Schema normalizer, optionally bound to the document `$ref`s point into.
#[derive(Debug, Clone)]
pub struct Normalizer<'d> {
    options: NormalizeOptions,
    document: Option<&'d Value>,
}

enum Source<'a> {
    Schema(&'a Value),
    /// One entry of a `type` list, read against the node that declared it
    Typed(SchemaView<'a>, &'a str),
    /// Heterogeneous tuple items gathered into an anonymous union
    Candidates(Vec<&'a Value>),
}

struct Task<'a> {
    source: Source<'a>,
    path: SchemaPath,
    required: bool,
    ref_chain: Vec<String>,
    parent: Option<usize>,
}

enum Shell {
    Leaf(FieldKind),
    Object,
    Array {
        min_items: Option<u64>,
        max_items: Option<u64>,
    },
    Union(UnionMode),
}

struct Pending {
    path: SchemaPath,
    shell: Shell,
    title: String,
    description: String,
    default: Option<Value>,
    required: bool,
    children: Vec<usize>,
}

enum Inferred<'a> {
    Leaf(FieldKind),
    Object(Vec<(&'a str, &'a Value, bool)>),
    Array {
        item: Source<'a>,
        min_items: Option<u64>,
        max_items: Option<u64>,
    },
    Union(UnionMode, Vec<Source<'a>>),
}

impl<'d> Normalizer<'d> {
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            document: None,
        }
    }

    /// Resolves `$ref`s against `document` (usually the full OpenAPI file).
    #[must_use]
    pub fn with_document(mut self, document: &'d Value) -> Self {
        self.document = Some(document);
        self
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn normalize(&self, raw: &'d Value, direction: Direction) -> Result<SchemaTree, SchemaError> {
        let mut arena: Vec<Pending> = Vec::new();
        let mut work = vec![Task {
            source: Source::Schema(raw),
            path: SchemaPath::root(),
            required: true,
            ref_chain: Vec::new(),
            parent: None,
        }];

        while let Some(task) = work.pop() {
            if task.path.len() > self.options.max_depth {
                return Err(SchemaError::DepthExceeded(format!(
                    "'{}' is deeper than {} levels",
                    task.path, self.options.max_depth
                )));
            }

            let index = arena.len();
            if let Some(parent) = task.parent {
                arena[parent].children.push(index);
            }

            let (pending, children) = self.visit(task, direction, index)?;
            arena.push(pending);
            // Reversed so children pop in declaration order
            work.extend(children.into_iter().rev());
        }

        let count = arena.len();
        let root = assemble(arena)?;
        info!(
            "📋 Normalized {} schema into {} nodes",
            direction, count
        );
        Ok(SchemaTree::new(direction, root))
    }

    fn visit(
        &self,
        task: Task<'d>,
        direction: Direction,
        index: usize,
    ) -> Result<(Pending, Vec<Task<'d>>), SchemaError> {
        let Task {
            source,
            path,
            required,
            ref_chain,
            ..
        } = task;
        let fallback_title = self.fallback_title(&path, direction);

        let (view, ref_chain, type_override) = match source {
            Source::Candidates(candidates) => {
                let children = candidates
                    .into_iter()
                    .enumerate()
                    .map(|(n, candidate)| Task {
                        source: Source::Schema(candidate),
                        path: path.child(PathSegment::Variant(n)),
                        required: false,
                        ref_chain: ref_chain.clone(),
                        parent: Some(index),
                    })
                    .collect();
                let pending = Pending {
                    path,
                    shell: Shell::Union(UnionMode::AnyOf),
                    title: fallback_title,
                    description: String::new(),
                    default: None,
                    required,
                    children: Vec::new(),
                };
                return Ok((pending, children));
            }
            Source::Schema(raw) => {
                let (view, ref_chain) = refs::expand(raw, self.document, &path, ref_chain)?;
                (view, ref_chain, None)
            }
            Source::Typed(view, type_name) => (view, ref_chain, Some(type_name)),
        };

        let inferred = infer(&view, type_override, &path)?;
        debug!("🔍 '{}' inferred at depth {}", path, path.len());

        let (title, description, default) = match type_override {
            // A `type` list member shares its keywords with the declaring
            // node; only the type itself belongs to the member.
            Some(type_name) => (type_name.to_string(), String::new(), None),
            None => (
                view.get_str("title")
                    .map(str::to_string)
                    .unwrap_or(fallback_title),
                view.get_str("description").unwrap_or_default().to_string(),
                view.get("default").cloned(),
            ),
        };

        let child = |source: Source<'d>, path: SchemaPath, required: bool| Task {
            source,
            path,
            required,
            ref_chain: ref_chain.clone(),
            parent: Some(index),
        };

        let (shell, children) = match inferred {
            Inferred::Leaf(kind) => (Shell::Leaf(kind), Vec::new()),
            Inferred::Object(properties) => {
                let children = properties
                    .into_iter()
                    .map(|(name, schema, is_required)| {
                        child(Source::Schema(schema), path.key(name), is_required)
                    })
                    .collect();
                (Shell::Object, children)
            }
            Inferred::Array {
                item,
                min_items,
                max_items,
            } => (
                Shell::Array {
                    min_items,
                    max_items,
                },
                vec![child(item, path.child(PathSegment::Item), true)],
            ),
            Inferred::Union(mode, members) => {
                let children = members
                    .into_iter()
                    .enumerate()
                    .map(|(n, member)| child(member, path.child(PathSegment::Variant(n)), false))
                    .collect();
                (Shell::Union(mode), children)
            }
        };

        let pending = Pending {
            path,
            shell,
            title,
            description,
            default,
            required,
            children: Vec::new(),
        };
        Ok((pending, children))
    }

    fn fallback_title(&self, path: &SchemaPath, direction: Direction) -> String {
        match path.last() {
            None => direction.as_str().to_string(),
            Some(PathSegment::Key(key)) if self.options.pretty_headings => key_to_title(key),
            Some(segment) => segment.label(),
        }
    }
}

fn infer<'a>(
    view: &SchemaView<'a>,
    type_override: Option<&'a str>,
    path: &SchemaPath,
) -> Result<Inferred<'a>, SchemaError> {
    // 1. enum / const
    if let Some(values) = view.get("enum") {
        let values = values.as_array().ok_or_else(|| {
            SchemaError::InvalidDocument(format!("'enum' at '{}' must be a list", path))
        })?;
        if values.is_empty() {
            return Err(SchemaError::EmptyEnum(format!("'{}' lists no values", path)));
        }
        return Ok(Inferred::Leaf(FieldKind::Enum(values.clone())));
    }
    if let Some(value) = view.get("const") {
        return Ok(Inferred::Leaf(FieldKind::Enum(vec![value.clone()])));
    }

    // 2. unions; skipped for `type` list members, which are already one arm
    if type_override.is_none() {
        for (keyword, mode) in [("oneOf", UnionMode::OneOf), ("anyOf", UnionMode::AnyOf)] {
            if let Some(members) = view.get(keyword) {
                let members = members.as_array().ok_or_else(|| {
                    SchemaError::InvalidDocument(format!("'{}' at '{}' must be a list", keyword, path))
                })?;
                if members.is_empty() {
                    return Err(SchemaError::InvalidDocument(format!(
                        "'{}' at '{}' has no candidates",
                        keyword, path
                    )));
                }
                return Ok(Inferred::Union(mode, members.iter().map(Source::Schema).collect()));
            }
        }
    }

    let type_name = match (type_override, view.get("type")) {
        (Some(type_name), _) => Some(type_name),
        (None, None) => None,
        (None, Some(Value::String(type_name))) => Some(type_name.as_str()),
        (None, Some(Value::Array(types))) => {
            let mut names: Vec<&'a str> = Vec::new();
            for entry in types {
                let name = entry.as_str().ok_or_else(|| {
                    SchemaError::InvalidDocument(format!("'type' list at '{}' must hold strings", path))
                })?;
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            match names.len() {
                0 => None,
                1 => Some(names[0]),
                _ => {
                    return Ok(Inferred::Union(
                        UnionMode::AnyOf,
                        names
                            .into_iter()
                            .map(|name| Source::Typed(view.clone(), name))
                            .collect(),
                    ));
                }
            }
        }
        (None, Some(_)) => {
            return Err(SchemaError::InvalidDocument(format!(
                "'type' at '{}' must be a string or a list of strings",
                path
            )))
        }
    };

    // A `type` list member shares the declaring node's keywords, so sibling
    // signals only count for the member whose type they belong to.
    let typed = type_override.is_some();

    // 3. object
    if type_name == Some("object") || (!typed && view.contains("properties")) {
        return object(view, path);
    }

    // 4. array
    if type_name == Some("array")
        || (!typed && (view.contains("items") || view.contains("prefixItems")))
    {
        return array(view, path);
    }

    // 5. binary payloads
    let binary_format = view
        .get_str("format")
        .map_or(false, |format| BINARY_FORMATS.contains(&format));
    let binary = binary_format || view.get_str("contentEncoding") == Some("base64");
    if binary && (!typed || type_name == Some("string")) {
        return Ok(Inferred::Leaf(FieldKind::Binary));
    }

    // 6. primitives
    let kind = match type_name {
        Some("string") => FieldKind::String,
        Some("number") => FieldKind::Number(number_constraints(view)),
        Some("integer") => FieldKind::Integer(number_constraints(view)),
        Some("boolean") => FieldKind::Boolean,
        Some("null") => FieldKind::Null,
        Some(other) => {
            return Err(SchemaError::UnknownType(format!("'{}' at '{}'", other, path)));
        }
        None => {
            return Err(SchemaError::MissingType(format!(
                "'{}' has no type keyword and none can be inferred",
                path
            )));
        }
    };
    Ok(Inferred::Leaf(kind))
}

fn object<'a>(view: &SchemaView<'a>, path: &SchemaPath) -> Result<Inferred<'a>, SchemaError> {
    let properties: Option<&'a Map<String, Value>> = match view.get("properties") {
        None => None,
        Some(Value::Object(properties)) => Some(properties),
        Some(_) => {
            return Err(SchemaError::InvalidDocument(format!(
                "'properties' at '{}' must be a mapping",
                path
            )))
        }
    };
    let declared = |name: &str| properties.map_or(false, |properties| properties.contains_key(name));

    let mut required: Vec<&str> = Vec::new();
    if let Some(list) = view.get("required") {
        let list = list.as_array().ok_or_else(|| {
            SchemaError::InvalidDocument(format!("'required' at '{}' must be a list", path))
        })?;
        for entry in list {
            let name = entry.as_str().ok_or_else(|| {
                SchemaError::InvalidDocument(format!("'required' at '{}' must hold strings", path))
            })?;
            if !declared(name) {
                return Err(SchemaError::UnknownRequired(format!(
                    "'{}' is required at '{}' but not declared",
                    name, path
                )));
            }
            required.push(name);
        }
    }

    Ok(Inferred::Object(
        properties
            .into_iter()
            .flat_map(|properties| properties.iter())
            .map(|(name, schema)| (name.as_str(), schema, required.contains(&name.as_str())))
            .collect(),
    ))
}

fn array<'a>(view: &SchemaView<'a>, path: &SchemaPath) -> Result<Inferred<'a>, SchemaError> {
    let prefix = |value: &'a Value| value.as_array().filter(|items| !items.is_empty());

    let item = match view.get("items") {
        Some(items @ Value::Object(_)) => Some(Source::Schema(items)),
        Some(Value::Array(tuple)) if !tuple.is_empty() => Some(tuple_item(tuple)),
        _ => view.get("prefixItems").and_then(prefix).map(|tuple| tuple_item(tuple)),
    };
    let item = item.ok_or_else(|| SchemaError::MissingItems(format!("'{}' declares no item schema", path)))?;

    Ok(Inferred::Array {
        item,
        min_items: view.get("minItems").and_then(Value::as_u64),
        max_items: view.get("maxItems").and_then(Value::as_u64),
    })
}

/// One template for every tuple position: the shared schema when all
/// positions agree, otherwise a union of the distinct ones.
fn tuple_item(tuple: &[Value]) -> Source<'_> {
    let mut distinct: Vec<&Value> = Vec::new();
    for schema in tuple {
        if !distinct.contains(&schema) {
            distinct.push(schema);
        }
    }
    if distinct.len() == 1 {
        Source::Schema(distinct[0])
    } else {
        Source::Candidates(distinct)
    }
}

fn number_constraints(view: &SchemaView<'_>) -> NumberConstraints {
    let (min, exclusive_min) = bound(view, "minimum", "exclusiveMinimum");
    let (max, exclusive_max) = bound(view, "maximum", "exclusiveMaximum");
    NumberConstraints {
        min,
        max,
        exclusive_min,
        exclusive_max,
        step: view.get("multipleOf").and_then(Value::as_f64),
    }
}

/// One side of a numeric range. Accepts both the numeric exclusive form
/// (`exclusiveMinimum: 0`) and the boolean one (`minimum: 0` plus
/// `exclusiveMinimum: true`).
fn bound(view: &SchemaView<'_>, inclusive: &str, exclusive: &str) -> (Option<f64>, bool) {
    match (view.get(inclusive).and_then(Value::as_f64), view.get(exclusive)) {
        (Some(value), Some(Value::Bool(flag))) => (Some(value), *flag),
        (Some(value), _) => (Some(value), false),
        (None, Some(limit)) => match limit.as_f64() {
            Some(value) => (Some(value), true),
            None => (None, false),
        },
        (None, None) => (None, false),
    }
}

/// `leg_lengths` → `Leg Lengths`.
pub fn key_to_title(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn assemble(arena: Vec<Pending>) -> Result<SchemaNode, SchemaError> {
    let mut built: Vec<Option<SchemaNode>> = (0..arena.len()).map(|_| None).collect();

    // Children always sit after their parent in the arena.
    for (index, pending) in arena.into_iter().enumerate().rev() {
        let mut children: Vec<SchemaNode> = pending
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();

        let kind = match pending.shell {
            Shell::Leaf(kind) => kind,
            Shell::Object => FieldKind::Object(children),
            Shell::Array {
                min_items,
                max_items,
            } => {
                let item = children.pop().ok_or_else(|| {
                    SchemaError::MissingItems(format!("'{}' lost its item schema", pending.path))
                })?;
                FieldKind::Array(ArrayConstraints {
                    item: Box::new(item),
                    min_items,
                    max_items,
                })
            }
            Shell::Union(mode) => FieldKind::Union(UnionMembers {
                mode,
                members: children,
            }),
        };

        built[index] = Some(SchemaNode {
            path: pending.path,
            kind,
            title: pending.title,
            description: pending.description,
            default: pending.default,
            required: pending.required,
            hints: Default::default(),
        });
    }

    built
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| SchemaError::InvalidDocument("schema produced no nodes".to_string()))
}
