mod common;

use schemaform::schema::types::{FieldKind, PathSegment, UnionMode};
use schemaform::{normalize, Direction, NormalizeOptions, Normalizer, SchemaError, SchemaPath, SchemaTree};
use serde_json::{json, Value};
use std::collections::HashSet;

fn child_paths(tree: &SchemaTree) -> Vec<String> {
    tree.root.children().iter().map(|c| c.path.to_string()).collect()
}

#[test]
fn object_with_required_list() {
    common::init_test_logging();
    let schema = json!({
        "type": "object",
        "properties": {"a": {"type": "number", "default": 3}, "b": {"type": "string"}},
        "required": ["a"]
    });
    let tree = normalize(&schema, Direction::Input).unwrap();

    assert_eq!(tree.direction, Direction::Input);
    assert!(tree.root.path.is_root());
    assert_eq!(tree.root.title, "input");
    assert_eq!(child_paths(&tree), vec!["a", "b"]);

    let a = tree.find(&"a".parse().unwrap()).unwrap();
    assert_eq!(a.kind.name(), "scalar-number");
    assert_eq!(a.default, Some(json!(3)));
    assert!(a.required);
    assert_eq!(a.title, "a");

    let b = tree.find(&"b".parse().unwrap()).unwrap();
    assert_eq!(b.kind, FieldKind::String);
    assert_eq!(b.default, None);
    assert!(!b.required);
}

#[test]
fn array_has_single_item_template() {
    let tree = normalize(&json!({"type": "array", "items": {"type": "integer"}}), Direction::Output).unwrap();
    match &tree.root.kind {
        FieldKind::Array(array) => {
            assert_eq!(array.item.kind.name(), "scalar-integer");
            assert_eq!(array.item.path.segments(), &[PathSegment::Item]);
            assert_eq!(array.item.title, "item");
            assert!(array.item.required);
        }
        other => panic!("expected array, got {:?}", other),
    }
    assert_eq!(tree.root.children().len(), 1);
}

#[test]
fn array_without_items_is_rejected() {
    let err = normalize(&json!({"type": "array"}), Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::MissingItems(_)));
    assert!(err.to_string().contains("Items missing"));
}

#[test]
fn nested_array_without_items_is_rejected() {
    let schema = json!({"type": "object", "properties": {"xs": {"type": "array", "minItems": 1}}});
    assert!(matches!(
        normalize(&schema, Direction::Input),
        Err(SchemaError::MissingItems(_))
    ));
}

#[test]
fn enum_is_inferred_without_type() {
    let tree = normalize(&json!({"enum": ["red", "green"]}), Direction::Input).unwrap();
    assert_eq!(tree.root.kind, FieldKind::Enum(vec![json!("red"), json!("green")]));

    let tree = normalize(&json!({"const": 7}), Direction::Input).unwrap();
    assert_eq!(tree.root.kind, FieldKind::Enum(vec![json!(7)]));
}

#[test]
fn empty_enum_is_rejected() {
    let err = normalize(&json!({"enum": []}), Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::EmptyEnum(_)));
}

#[test]
fn properties_imply_object_and_empty_object_is_valid() {
    let tree = normalize(&json!({"properties": {"x": {"type": "boolean"}}}), Direction::Input).unwrap();
    assert_eq!(child_paths(&tree), vec!["x"]);

    let tree = normalize(&json!({"type": "object"}), Direction::Input).unwrap();
    assert_eq!(tree.root.kind, FieldKind::Object(Vec::new()));
    assert!(tree.root.is_leaf());
}

#[test]
fn unknown_required_property_is_rejected() {
    let schema = json!({"type": "object", "properties": {"a": {"type": "string"}}, "required": ["z"]});
    let err = normalize(&schema, Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownRequired(msg) if msg.contains("'z'")));
}

#[test]
fn missing_and_unknown_types_are_rejected() {
    let err = normalize(&json!({"description": "nothing to go on"}), Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::MissingType(_)));

    let err = normalize(&json!({"type": "float"}), Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType(msg) if msg.contains("float")));

    let err = normalize(&json!([1, 2]), Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDocument(_)));
}

#[test]
fn binary_formats_win_over_string() {
    for schema in [
        json!({"type": "string", "format": "binary"}),
        json!({"type": "string", "format": "byte"}),
        json!({"type": "string", "contentEncoding": "base64"}),
    ] {
        let tree = normalize(&schema, Direction::Input).unwrap();
        assert_eq!(tree.root.kind, FieldKind::Binary, "{}", schema);
    }
    let tree = normalize(&json!({"type": "string", "format": "date"}), Direction::Input).unwrap();
    assert_eq!(tree.root.kind, FieldKind::String);
}

#[test]
fn unions_keep_candidate_order() {
    let schema = json!({"oneOf": [{"type": "integer"}, {"type": "string", "title": "Text"}]});
    let tree = normalize(&schema, Direction::Input).unwrap();
    match &tree.root.kind {
        FieldKind::Union(union) => {
            assert_eq!(union.mode, UnionMode::OneOf);
            let kinds: Vec<&str> = union.members.iter().map(|m| m.kind.name()).collect();
            assert_eq!(kinds, vec!["scalar-integer", "scalar-string"]);
            assert_eq!(union.members[0].title, "variant 0");
            assert_eq!(union.members[1].title, "Text");
            assert_eq!(union.members[1].path.to_string(), "<1>");
            assert!(union.members.iter().all(|m| !m.required));
        }
        other => panic!("expected union, got {:?}", other),
    }
}

#[test]
fn type_list_becomes_union() {
    let schema = json!({"type": ["string", "null"], "description": "optional label"});
    let tree = normalize(&schema, Direction::Input).unwrap();
    assert_eq!(tree.root.description, "optional label");
    match &tree.root.kind {
        FieldKind::Union(union) => {
            assert_eq!(union.mode, UnionMode::AnyOf);
            assert_eq!(union.members[0].kind, FieldKind::String);
            assert_eq!(union.members[1].kind, FieldKind::Null);
            assert_eq!(union.members[1].title, "null");
        }
        other => panic!("expected union, got {:?}", other),
    }

    let tree = normalize(&json!({"type": ["integer"]}), Direction::Input).unwrap();
    assert_eq!(tree.root.kind.name(), "scalar-integer");

    let member_kinds = |schema: Value| -> Vec<&'static str> {
        let tree = normalize(&schema, Direction::Input).unwrap();
        tree.root.children().iter().map(|m| m.kind.name()).collect()
    };
    assert_eq!(
        member_kinds(json!({"type": ["array", "null"], "items": {"type": "integer"}})),
        vec!["array", "null"]
    );
    assert_eq!(
        member_kinds(json!({"type": ["object", "null"], "properties": {"x": {"type": "string"}}})),
        vec!["object", "null"]
    );
    assert_eq!(
        member_kinds(json!({"type": ["string", "null"], "format": "binary"})),
        vec!["binary", "null"]
    );
}

#[test]
fn nullable_type_list_resolves_to_null() {
    let schema = json!({"type": ["array", "null"], "items": {"type": "integer"}});
    let tree = schemaform::resolve(normalize(&schema, Direction::Input).unwrap()).unwrap();
    assert!(tree.root.hints.nullable);
    assert_eq!(tree.root.default, Some(Value::Null));
    let item = tree.find(&"<0>[]".parse().unwrap()).unwrap();
    assert_eq!(item.kind.name(), "scalar-integer");
}

#[test]
fn number_constraints_are_collected() {
    let schema = json!({"type": "number", "minimum": -1.5, "exclusiveMaximum": 10, "multipleOf": 0.5});
    let tree = normalize(&schema, Direction::Input).unwrap();
    match tree.root.kind {
        FieldKind::Number(constraints) => {
            assert_eq!(constraints.min, Some(-1.5));
            assert!(!constraints.exclusive_min);
            assert_eq!(constraints.max, Some(10.0));
            assert!(constraints.exclusive_max);
            assert_eq!(constraints.step, Some(0.5));
            assert!(!constraints.admits(10.0));
            assert!(constraints.admits(-1.5));
        }
        other => panic!("expected number, got {:?}", other),
    }
}

#[test]
fn boolean_exclusive_flags_are_understood() {
    let schema = json!({"type": "integer", "minimum": 0, "exclusiveMinimum": true});
    let tree = schemaform::resolve(normalize(&schema, Direction::Input).unwrap()).unwrap();
    match &tree.root.kind {
        FieldKind::Integer(constraints) => {
            assert_eq!(constraints.min, Some(0.0));
            assert!(constraints.exclusive_min);
        }
        other => panic!("expected integer, got {:?}", other),
    }
    assert_eq!(tree.root.default, Some(json!(1)));

    let schema = json!({"type": "integer", "exclusiveMinimum": 0});
    let tree = schemaform::resolve(normalize(&schema, Direction::Input).unwrap()).unwrap();
    assert_eq!(tree.root.default, Some(json!(1)));
}

#[test]
fn heterogeneous_prefix_items_become_a_union_item() {
    let schema = json!({"type": "array", "prefixItems": [{"type": "string"}, {"type": "integer"}]});
    let tree = normalize(&schema, Direction::Input).unwrap();
    let item = tree.find(&"[]".parse().unwrap()).unwrap();
    assert_eq!(item.kind.name(), "union");
    assert_eq!(item.children().len(), 2);

    let schema = json!({"type": "array", "items": [{"type": "number"}, {"type": "number"}]});
    let tree = normalize(&schema, Direction::Input).unwrap();
    assert_eq!(tree.find(&"[]".parse().unwrap()).unwrap().kind.name(), "scalar-number");
}

#[test]
fn refs_resolve_against_document() {
    let document = common::vectoradd_document();
    let raw = &document["components"]["schemas"]["Apply_InputSchema"];
    let tree = Normalizer::new(NormalizeOptions::default())
        .with_document(&document)
        .normalize(raw, Direction::Input)
        .unwrap();

    let a = tree.find(&"a".parse().unwrap()).unwrap();
    assert_eq!(a.description, "First vector");
    assert!(a.required);
    let v = tree.find(&"a.v".parse().unwrap()).unwrap();
    assert!(v.required);
    assert_eq!(tree.find(&"b.s".parse().unwrap()).unwrap().default, Some(json!(1.0)));
}

#[test]
fn refs_without_document_are_unresolved() {
    let document = common::vectoradd_document();
    let raw = &document["components"]["schemas"]["Apply_InputSchema"];
    let err = normalize(raw, Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::UnresolvedRef(_)));
}

#[test]
fn self_referencing_schema_is_a_cycle() {
    let document = json!({"defs": {"Node": {
        "type": "object",
        "properties": {"children": {"type": "array", "items": {"$ref": "#/defs/Node"}}}
    }}});
    let err = Normalizer::new(NormalizeOptions::default())
        .with_document(&document)
        .normalize(&document["defs"]["Node"], Direction::Input)
        .unwrap_err();
    assert!(matches!(err, SchemaError::CyclicRef(_)));
}

#[test]
fn shared_refs_in_sibling_branches_are_not_cycles() {
    let document = common::vectoradd_document();
    let raw = &document["components"]["schemas"]["Apply_InputSchema"];
    let tree = Normalizer::new(NormalizeOptions::default())
        .with_document(&document)
        .normalize(raw, Direction::Input)
        .unwrap();
    assert_eq!(child_paths(&tree), vec!["a", "b", "normalize", "label", "mesh"]);
    assert_eq!(tree.find(&"b.v[]".parse().unwrap()).unwrap().kind.name(), "scalar-number");
}

fn nested(depth: usize) -> Value {
    let mut schema = json!({"type": "string"});
    for _ in 0..depth {
        schema = json!({"type": "object", "properties": {"n": schema}});
    }
    schema
}

#[test]
fn deep_nesting_is_bounded() {
    let schema = nested(300);
    let err = normalize(&schema, Direction::Input).unwrap_err();
    assert!(matches!(err, SchemaError::DepthExceeded(_)));

    let options = NormalizeOptions {
        max_depth: 1000,
        ..Default::default()
    };
    let tree = Normalizer::new(options).normalize(&schema, Direction::Input).unwrap();
    assert_eq!(tree.nodes().count(), 301);
    assert_eq!(tree.leaves().next().unwrap().path.len(), 300);
}

#[test]
fn pretty_headings_reformat_key_titles() {
    let schema = json!({"type": "object", "properties": {
        "leg_lengths": {"type": "array", "items": {"type": "number"}},
        "mass": {"type": "number", "title": "Mass (kg)"}
    }});
    let options = NormalizeOptions {
        pretty_headings: true,
        ..Default::default()
    };
    let tree = Normalizer::new(options).normalize(&schema, Direction::Input).unwrap();
    assert_eq!(tree.find(&"leg_lengths".parse().unwrap()).unwrap().title, "Leg Lengths");
    assert_eq!(tree.find(&"mass".parse().unwrap()).unwrap().title, "Mass (kg)");
    assert_eq!(tree.find(&"leg_lengths[]".parse().unwrap()).unwrap().title, "item");
}

#[test]
fn paths_are_unique_and_extend_their_parent() {
    let document = common::vectoradd_document();
    let raw = &document["components"]["schemas"]["Apply_InputSchema"];
    let tree = Normalizer::new(NormalizeOptions::default())
        .with_document(&document)
        .normalize(raw, Direction::Input)
        .unwrap();

    let mut seen: HashSet<SchemaPath> = HashSet::new();
    for node in tree.nodes() {
        assert!(seen.insert(node.path.clone()), "duplicate path {}", node.path);
        if let FieldKind::Object(properties) = &node.kind {
            for child in properties {
                match child.path.last() {
                    Some(PathSegment::Key(key)) => assert_eq!(child.path, node.path.key(key)),
                    other => panic!("object child with segment {:?}", other),
                }
            }
        }
        if let FieldKind::Array(array) = &node.kind {
            assert_eq!(array.item.path, node.path.child(PathSegment::Item));
        }
    }
}
