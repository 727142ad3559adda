#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use crate::ast::factory::{self, FACTORY_TABLE, create_from_json};
use crate::ast::{AstError, AstTree, NodeKind, NodePayload};

#[test]
fn test_factory_table_is_a_bijection_with_the_kinds() {
    assert_eq!(FACTORY_TABLE.len(), NodeKind::ALL.len());
    for (&kind, (table_kind, _, _)) in NodeKind::ALL.iter().zip(FACTORY_TABLE) {
        assert_eq!(kind, *table_kind, "table order drifted from the enumeration");
    }
}

#[test]
fn test_create_and_predicate_agree_for_every_kind() {
    let mut tree = AstTree::new();
    let created: Vec<_> = FACTORY_TABLE
        .iter()
        .map(|(kind, create, _)| (*kind, create(&mut tree)))
        .collect();
    for ((kind, id), (_, _, predicate)) in created.iter().zip(FACTORY_TABLE) {
        assert!(predicate(&tree, *id));
        assert_eq!(tree.kind(*id).unwrap(), *kind);
    }
    // Each predicate holds for exactly one of the created nodes.
    for (_, _, predicate) in FACTORY_TABLE {
        assert_eq!(created.iter().filter(|(_, id)| predicate(&tree, *id)).count(), 1);
    }
}

#[test]
fn test_predicate_is_false_for_freed_nodes() {
    let mut tree = AstTree::new();
    let root = factory::create_source_file(&mut tree);
    tree.set_root(root).unwrap();
    let service = tree.create_with_payload(NodePayload::ServiceDefinition {
        service_name: smol_str::SmolStr::new("s"),
    });
    tree.append_child(root, service, "Add").unwrap();
    tree.remove_child(root, service, "Remove").unwrap();
    assert!(!factory::is_service_definition(&tree, service));
}

#[test]
fn test_hydrate_a_small_document() {
    let mut tree = AstTree::new();
    let document = json!({
        "type": "source_file",
        "children": [
            {
                "type": "service_definition",
                "service_name": "orders",
                "line_number": 1,
                "whitespace_descriptor": {
                    "regions": {"0": "", "1": " ", "2": " ", "3": "", "4": "\n", "5": "\n"},
                    "use_default": false
                },
                "children": [
                    {
                        "type": "resource_definition",
                        "resource_name": "place",
                        "line_number": 2,
                        "children": [
                            {"type": "break_statement", "line_number": 3}
                        ]
                    }
                ]
            }
        ]
    });

    let root = create_from_json(&mut tree, &document).unwrap();
    tree.set_root(root).unwrap();

    assert_eq!(tree.kind(root).unwrap(), NodeKind::SourceFile);
    let service = tree.children(root).unwrap()[0];
    assert_eq!(tree.kind(service).unwrap(), NodeKind::ServiceDefinition);
    assert_eq!(
        tree.node(service).unwrap().payload,
        NodePayload::ServiceDefinition {
            service_name: smol_str::SmolStr::new("orders")
        }
    );
    assert!(!tree.node(service).unwrap().whitespace.use_default);
    assert_eq!(tree.node(service).unwrap().whitespace.region(4), "\n");

    let resource = tree.children(service).unwrap()[0];
    assert_eq!(tree.node(resource).unwrap().line_number.get(), 2);
    // No descriptor on the wire record means synthesized formatting.
    assert!(tree.node(resource).unwrap().whitespace.use_default);
    assert_eq!(tree.parent(resource).unwrap(), Some(service));
    assert!(tree.is_consistent());
}

#[test]
fn test_descriptor_without_use_default_is_captured() {
    let mut tree = AstTree::new();
    // Producers only send a descriptor for parsed nodes; the flag itself is
    // optional on the wire.
    let statement = create_from_json(
        &mut tree,
        &json!({
            "type": "break_statement",
            "whitespace_descriptor": {
                "regions": {"0": "\n    ", "1": "", "2": ""}
            }
        }),
    )
    .unwrap();

    let whitespace = &tree.node(statement).unwrap().whitespace;
    assert!(!whitespace.use_default);
    assert_eq!(whitespace.region(0), "\n    ");
}

#[test]
fn test_hydration_is_silent() {
    let mut tree = AstTree::new();
    let log = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&log);
    tree.subscribe(move |_| *sink.borrow_mut() += 1);

    let document = json!({
        "type": "function_definition",
        "function_name": "main",
        "children": [
            {"type": "return_statement"}
        ]
    });
    create_from_json(&mut tree, &document).unwrap();
    assert_eq!(*log.borrow(), 0);
}

#[test]
fn test_unknown_tag_fails_hydration() {
    let mut tree = AstTree::new();
    let err = create_from_json(&mut tree, &json!({"type": "not_a_real_kind"})).unwrap_err();
    assert!(matches!(err, AstError::UnknownNodeKind { tag } if tag == "not_a_real_kind"));

    let err = create_from_json(&mut tree, &json!({"children": []})).unwrap_err();
    assert!(matches!(err, AstError::UnknownNodeKind { .. }));
}

#[test]
fn test_missing_required_attribute_fails_hydration() {
    let mut tree = AstTree::new();
    let err = create_from_json(&mut tree, &json!({"type": "service_definition"})).unwrap_err();
    assert!(
        matches!(err, AstError::MalformedPayload { kind: NodeKind::ServiceDefinition, ref detail }
            if detail.contains("service_name"))
    );
}

#[test]
fn test_identifier_literal_flag_is_hydrated() {
    let mut tree = AstTree::new();
    let id = create_from_json(
        &mut tree,
        &json!({
            "type": "variable_reference_expression",
            "variable_name": "first name",
            "is_identifier_literal": true
        }),
    )
    .unwrap();
    assert!(tree.node(id).unwrap().is_identifier_literal);
}

#[test]
fn test_task_destination_resolves_forward_references() {
    let mut tree = AstTree::new();
    // The invocation precedes the declaration it names; the resolution pass
    // over the finished scope still finds it.
    let function = create_from_json(
        &mut tree,
        &json!({
            "type": "function_definition",
            "function_name": "main",
            "children": [
                {"type": "task_invocation_statement", "task_name": "logger"},
                {"type": "task_declaration", "task_name": "logger"}
            ]
        }),
    )
    .unwrap();

    let invocation = tree.children(function).unwrap()[0];
    let declaration = tree.children(function).unwrap()[1];
    match &tree.node(invocation).unwrap().payload {
        NodePayload::TaskInvocationStatement { destination, .. } => {
            assert_eq!(*destination, Some(declaration));
        }
        other => panic!("unexpected payload {other:?}"),
    }
}
