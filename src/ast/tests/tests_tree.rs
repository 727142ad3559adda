#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::ast::{AstError, AstTree, NodeKind, NodePayload, TreeEvent, TreeEventKind};

fn service_tree() -> (AstTree, crate::base::NodeId) {
    let mut tree = AstTree::new();
    let service = tree.create_with_payload(NodePayload::ServiceDefinition {
        service_name: SmolStr::new("echo"),
    });
    tree.set_root(service).unwrap();
    (tree, service)
}

fn record_events(tree: &mut AstTree) -> Rc<RefCell<Vec<TreeEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    tree.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

#[test]
fn test_append_child_fires_one_child_added() {
    let (mut tree, service) = service_tree();
    let log = record_events(&mut tree);

    let resource = tree.create(NodeKind::ResourceDefinition);
    tree.append_child(service, resource, "Add Resource").unwrap();

    assert_eq!(tree.children(service).unwrap(), &[resource]);
    assert_eq!(tree.parent(resource).unwrap(), Some(service));
    let events = log.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, TreeEventKind::ChildAdded);
    assert_eq!(events[0].origin, service);
    assert_eq!(events[0].title, "Add Resource");
}

#[test]
fn test_illegal_attach_leaves_tree_untouched() {
    let (mut tree, service) = service_tree();
    let log = record_events(&mut tree);
    let version = tree.node(service).unwrap().version();

    let nested = tree.create(NodeKind::ServiceDefinition);
    let err = tree.append_child(service, nested, "Add Service").unwrap_err();

    assert!(matches!(
        err,
        AstError::StructuralViolation {
            parent: NodeKind::ServiceDefinition,
            child: NodeKind::ServiceDefinition,
        }
    ));
    assert!(tree.children(service).unwrap().is_empty());
    assert_eq!(tree.node(service).unwrap().version(), version);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_duplicate_identifier_rejected_before_mutation() {
    let (mut tree, service) = service_tree();
    let first = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("ping"),
    });
    tree.append_child(service, first, "Add Resource").unwrap();

    let log = record_events(&mut tree);
    let twin = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("ping"),
    });
    let err = tree.append_child(service, twin, "Add Resource").unwrap_err();

    assert!(matches!(err, AstError::DuplicateIdentifier { identifier } if identifier == "ping"));
    assert_eq!(tree.children(service).unwrap().len(), 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_attached_node_cannot_be_attached_again() {
    let (mut tree, service) = service_tree();
    let resource = tree.create(NodeKind::ResourceDefinition);
    tree.append_child(service, resource, "Add Resource").unwrap();

    let other = tree.create_with_payload(NodePayload::ServiceDefinition {
        service_name: SmolStr::new("other"),
    });
    assert!(tree.append_child(other, resource, "Move Resource").is_err());
    assert_eq!(tree.parent(resource).unwrap(), Some(service));
}

#[test]
fn test_remove_child_tombstones_the_subtree() {
    let (mut tree, service) = service_tree();
    let resource = tree.create(NodeKind::ResourceDefinition);
    tree.append_child(service, resource, "Add Resource").unwrap();
    let statement = tree.create(NodeKind::BreakStatement);
    tree.append_child(resource, statement, "Add Break").unwrap();

    let log = record_events(&mut tree);
    tree.remove_child(service, resource, "Remove Resource").unwrap();

    assert!(!tree.contains(resource));
    assert!(!tree.contains(statement));
    assert!(matches!(tree.kind(statement), Err(AstError::NodeNotFound(_))));
    assert!(tree.children(service).unwrap().is_empty());
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].kind, TreeEventKind::ChildRemoved);
    assert!(tree.is_consistent());
}

#[test]
fn test_replace_child_keeps_the_slot() {
    let (mut tree, service) = service_tree();
    let first = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("a"),
    });
    let second = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("b"),
    });
    tree.append_child(service, first, "Add").unwrap();
    tree.append_child(service, second, "Add").unwrap();

    let replacement = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("c"),
    });
    tree.replace_child(service, first, replacement, "Replace Resource")
        .unwrap();

    assert_eq!(tree.children(service).unwrap(), &[replacement, second]);
    assert!(!tree.contains(first));
    assert!(tree.is_consistent());
}

#[test]
fn test_replace_child_rejects_an_attached_replacement() {
    let mut tree = AstTree::new();
    let root = tree.create(NodeKind::SourceFile);
    tree.set_root(root).unwrap();
    let svc_a = tree.create_with_payload(NodePayload::ServiceDefinition {
        service_name: SmolStr::new("a"),
    });
    let svc_b = tree.create_with_payload(NodePayload::ServiceDefinition {
        service_name: SmolStr::new("b"),
    });
    tree.append_child(root, svc_a, "Add").unwrap();
    tree.append_child(root, svc_b, "Add").unwrap();
    let taken = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("ping"),
    });
    tree.append_child(svc_a, taken, "Add").unwrap();
    let old = tree.create(NodeKind::ResourceDefinition);
    tree.append_child(svc_b, old, "Add").unwrap();

    // `taken` still hangs under svc_a; swapping it into svc_b would put it
    // in two child lists at once.
    let err = tree.replace_child(svc_b, old, taken, "Replace").unwrap_err();
    assert!(matches!(err, AstError::MalformedPayload { .. }));
    assert_eq!(tree.parent(taken).unwrap(), Some(svc_a));
    assert_eq!(tree.children(svc_b).unwrap(), &[old]);
    assert!(tree.is_consistent());
}

#[test]
fn test_replace_child_rejects_a_colliding_identifier() {
    let (mut tree, service) = service_tree();
    let kept = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("ping"),
    });
    let old = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("pong"),
    });
    tree.append_child(service, kept, "Add").unwrap();
    tree.append_child(service, old, "Add").unwrap();

    let twin = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("ping"),
    });
    let err = tree.replace_child(service, old, twin, "Replace").unwrap_err();
    assert!(matches!(err, AstError::DuplicateIdentifier { identifier } if identifier == "ping"));
    assert_eq!(tree.children(service).unwrap(), &[kept, old]);

    // Replacing a node with its own namesake stays legal.
    let renamed = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("pong"),
    });
    tree.replace_child(service, old, renamed, "Replace").unwrap();
    assert!(tree.is_consistent());
}

#[test]
fn test_update_payload_failure_changes_nothing() {
    let (mut tree, service) = service_tree();
    let log = record_events(&mut tree);

    let err = tree
        .update_payload(service, "Rename", |payload| {
            if let NodePayload::ServiceDefinition { service_name } = payload {
                *service_name = SmolStr::new("mutated");
            }
            Err(AstError::InvalidAttributeValue {
                attribute: "service_name",
                value: String::new(),
            })
        })
        .unwrap_err();

    assert!(matches!(err, AstError::InvalidAttributeValue { .. }));
    assert_eq!(
        tree.node(service).unwrap().payload,
        NodePayload::ServiceDefinition {
            service_name: SmolStr::new("echo")
        }
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn test_update_payload_rejects_a_variant_swap() {
    let (mut tree, service) = service_tree();
    let log = record_events(&mut tree);

    let err = tree
        .update_payload(service, "Rename", |payload| {
            *payload = NodePayload::ResourceDefinition {
                resource_name: SmolStr::new("sneaky"),
            };
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(
        err,
        AstError::MalformedPayload {
            kind: NodeKind::ResourceDefinition,
            ..
        }
    ));
    assert_eq!(
        tree.node(service).unwrap().payload,
        NodePayload::ServiceDefinition {
            service_name: SmolStr::new("echo")
        }
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn test_ancestors_walk_to_the_root() {
    let (mut tree, service) = service_tree();
    let resource = tree.create(NodeKind::ResourceDefinition);
    tree.append_child(service, resource, "Add").unwrap();
    let statement = tree.create(NodeKind::WhileStatement);
    tree.append_child(resource, statement, "Add").unwrap();

    let chain: Vec<_> = tree.ancestors(statement).collect();
    assert_eq!(chain, vec![resource, service]);
    assert!(tree.ancestors(service).next().is_none());
}

#[test]
fn test_version_bumps_on_every_mutation() {
    let (mut tree, service) = service_tree();
    let before = tree.node(service).unwrap().version();

    let resource = tree.create(NodeKind::ResourceDefinition);
    tree.append_child(service, resource, "Add").unwrap();
    let after_add = tree.node(service).unwrap().version();
    assert!(after_add > before);

    tree.remove_child(service, resource, "Remove").unwrap();
    assert!(tree.node(service).unwrap().version() > after_add);
}

#[test]
fn test_listener_survives_emission() {
    let (mut tree, service) = service_tree();
    let log = record_events(&mut tree);

    for _ in 0..3 {
        let resource = tree.create(NodeKind::ResourceDefinition);
        tree.append_child(service, resource, "Add").unwrap();
        tree.remove_child(service, resource, "Remove").unwrap();
    }
    // The listener stayed subscribed across take-and-restore emissions.
    assert_eq!(log.borrow().len(), 6);
}
