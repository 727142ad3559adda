#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::ast::{AstError, AstTree, NodeKind, NodePayload, TreeEvent, TreeEventKind, edits};

fn service_tree() -> (AstTree, crate::base::NodeId) {
    let mut tree = AstTree::new();
    let service = tree.create_with_payload(NodePayload::ServiceDefinition {
        service_name: SmolStr::new("orders"),
    });
    tree.set_root(service).unwrap();
    (tree, service)
}

fn function_tree() -> (AstTree, crate::base::NodeId) {
    let mut tree = AstTree::new();
    let function = tree.create_with_payload(NodePayload::FunctionDefinition {
        function_name: SmolStr::new("main"),
        is_public: false,
    });
    tree.set_root(function).unwrap();
    (tree, function)
}

fn record_events(tree: &mut AstTree) -> Rc<RefCell<Vec<TreeEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    tree.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

// ============================================================================
// RESOURCES
// ============================================================================

#[test]
fn test_add_resource_names_deterministically() {
    let (mut tree, service) = service_tree();
    let first = edits::add_resource(&mut tree, service).unwrap();
    let second = edits::add_resource(&mut tree, service).unwrap();
    let third = edits::add_resource(&mut tree, service).unwrap();

    let name = |id| {
        tree.node(id)
            .unwrap()
            .payload
            .identifier()
            .unwrap()
            .to_owned()
    };
    assert_eq!(name(first), "newResource");
    assert_eq!(name(second), "newResource2");
    assert_eq!(name(third), "newResource3");
}

#[test]
fn test_add_resource_attaches_a_default_method_annotation() {
    let (mut tree, service) = service_tree();
    let log = record_events(&mut tree);

    let resource = edits::add_resource(&mut tree, service).unwrap();

    let annotation = tree.children(resource).unwrap()[0];
    assert_eq!(
        tree.node(annotation).unwrap().payload,
        NodePayload::AnnotationAttachment {
            annotation_name: SmolStr::new("http:GET"),
            value: None,
        }
    );
    // The synthesized annotation renders with canonical formatting.
    assert!(tree.node(annotation).unwrap().whitespace.use_default);
    // One compound notification for the whole edit.
    let events = log.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, TreeEventKind::ChildAdded);
    assert_eq!(events[0].title, "Add Resource");
}

#[test]
fn test_existing_method_annotation_is_kept() {
    let (mut tree, service) = service_tree();
    let resource = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: SmolStr::new("fetch"),
    });
    let post = tree.create_with_payload(NodePayload::AnnotationAttachment {
        annotation_name: SmolStr::new("http:POST"),
        value: None,
    });
    tree.append_child(resource, post, "Add Annotation").unwrap();
    tree.append_child(service, resource, "Add Resource").unwrap();

    edits::ensure_default_method_annotation(&mut tree, resource).unwrap();
    let annotations: Vec<_> = tree
        .children(resource)
        .unwrap()
        .iter()
        .filter(|&&child| tree.kind(child).unwrap() == NodeKind::AnnotationAttachment)
        .collect();
    assert_eq!(annotations.len(), 1);
}

// ============================================================================
// PARAMETERS
// ============================================================================

#[test]
fn test_add_parameter_creates_the_list_on_demand() {
    let (mut tree, function) = function_tree();
    assert!(edits::parameters(&tree, function).unwrap().is_empty());

    let parameter = edits::add_parameter(&mut tree, function, "string", "name").unwrap();

    let list = tree.children(function).unwrap()[0];
    assert_eq!(tree.kind(list).unwrap(), NodeKind::ArgumentParameterList);
    assert_eq!(edits::parameters(&tree, function).unwrap(), vec![parameter]);
}

#[test]
fn test_add_parameter_rejects_blank_and_duplicate_names() {
    let (mut tree, function) = function_tree();
    edits::add_parameter(&mut tree, function, "string", "name").unwrap();

    let err = edits::add_parameter(&mut tree, function, "string", "  ").unwrap_err();
    assert!(matches!(
        err,
        AstError::InvalidAttributeValue {
            attribute: "parameter_name",
            ..
        }
    ));

    let err = edits::add_parameter(&mut tree, function, "int", "name").unwrap_err();
    assert!(matches!(err, AstError::DuplicateIdentifier { .. }));

    assert_eq!(edits::parameters(&tree, function).unwrap().len(), 1);
}

#[test]
fn test_remove_parameter_by_name() {
    let (mut tree, function) = function_tree();
    edits::add_parameter(&mut tree, function, "string", "a").unwrap();
    let kept = edits::add_parameter(&mut tree, function, "int", "b").unwrap();

    edits::remove_parameter(&mut tree, function, "a").unwrap();
    assert_eq!(edits::parameters(&tree, function).unwrap(), vec![kept]);

    // Removing a name that is not there is a no-op.
    edits::remove_parameter(&mut tree, function, "zzz").unwrap();
    assert_eq!(edits::parameters(&tree, function).unwrap().len(), 1);
}

// ============================================================================
// VARIABLE DEFINITIONS
// ============================================================================

#[test]
fn test_variable_definitions_stay_grouped() {
    let (mut tree, function) = function_tree();
    edits::add_parameter(&mut tree, function, "string", "input").unwrap();
    let statement = tree.create(NodeKind::BreakStatement);
    tree.append_child(function, statement, "Add Break").unwrap();

    let first = edits::add_variable_definition(&mut tree, function, "int", "count").unwrap();
    let second = edits::add_variable_definition(&mut tree, function, "string", "label").unwrap();

    let children = tree.children(function).unwrap();
    // Parameter list first, then both definitions, then the break.
    assert_eq!(tree.kind(children[0]).unwrap(), NodeKind::ArgumentParameterList);
    assert_eq!(children[1], first);
    assert_eq!(children[2], second);
    assert_eq!(children[3], statement);
}

#[test]
fn test_remove_variable_definition_by_name() {
    let (mut tree, function) = function_tree();
    edits::add_variable_definition(&mut tree, function, "int", "count").unwrap();
    edits::remove_variable_definition(&mut tree, function, "count").unwrap();
    assert!(tree.children(function).unwrap().is_empty());
}

// ============================================================================
// TASK RESOLUTION
// ============================================================================

#[test]
fn test_destination_resolves_when_the_task_appears() {
    let (mut tree, function) = function_tree();
    let invocation = tree.create_with_payload(NodePayload::TaskInvocationStatement {
        task_name: SmolStr::new("logger"),
        source: None,
        destination: None,
    });
    tree.append_child(function, invocation, "Add Invocation").unwrap();

    edits::resolve_task_destinations(&mut tree, function).unwrap();
    let destination = |tree: &AstTree| match &tree.node(invocation).unwrap().payload {
        NodePayload::TaskInvocationStatement { destination, .. } => *destination,
        _ => unreachable!(),
    };
    assert_eq!(destination(&tree), None);

    let task = tree.create_with_payload(NodePayload::TaskDeclaration {
        task_name: SmolStr::new("logger"),
        is_default: false,
    });
    tree.append_child(function, task, "Add Task").unwrap();
    edits::resolve_task_destinations(&mut tree, function).unwrap();
    assert_eq!(destination(&tree), Some(task));
}

#[test]
fn test_default_task_is_never_a_destination() {
    let (mut tree, function) = function_tree();
    let task = tree.create_with_payload(NodePayload::TaskDeclaration {
        task_name: SmolStr::new("logger"),
        is_default: true,
    });
    tree.append_child(function, task, "Add Task").unwrap();
    assert!(edits::is_default_task(&tree, task));

    let invocation = tree.create_with_payload(NodePayload::TaskInvocationStatement {
        task_name: SmolStr::new("logger"),
        source: None,
        destination: None,
    });
    tree.append_child(function, invocation, "Add Invocation").unwrap();
    edits::resolve_task_destinations(&mut tree, function).unwrap();

    match &tree.node(invocation).unwrap().payload {
        NodePayload::TaskInvocationStatement { destination, .. } => {
            assert_eq!(*destination, None);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_resolution_does_not_bump_versions() {
    let (mut tree, function) = function_tree();
    let invocation = tree.create_with_payload(NodePayload::TaskInvocationStatement {
        task_name: SmolStr::new("logger"),
        source: None,
        destination: None,
    });
    tree.append_child(function, invocation, "Add Invocation").unwrap();
    let task = tree.create_with_payload(NodePayload::TaskDeclaration {
        task_name: SmolStr::new("logger"),
        is_default: false,
    });
    tree.append_child(function, task, "Add Task").unwrap();

    let version = tree.node(invocation).unwrap().version();
    let log = record_events(&mut tree);
    edits::resolve_task_destinations(&mut tree, function).unwrap();
    assert_eq!(tree.node(invocation).unwrap().version(), version);
    assert!(log.borrow().is_empty());
}

// ============================================================================
// RENAMES
// ============================================================================

#[test]
fn test_rename_service_rejects_blank_names() {
    let (mut tree, service) = service_tree();
    let err = edits::set_service_name(&mut tree, service, "   ").unwrap_err();
    assert!(matches!(
        err,
        AstError::InvalidAttributeValue {
            attribute: "service_name",
            ..
        }
    ));
    assert_eq!(
        tree.node(service).unwrap().payload.identifier(),
        Some("orders")
    );

    edits::set_service_name(&mut tree, service, "billing").unwrap();
    assert_eq!(
        tree.node(service).unwrap().payload.identifier(),
        Some("billing")
    );
}

#[test]
fn test_rename_fires_attribute_changed() {
    let (mut tree, service) = service_tree();
    let log = record_events(&mut tree);
    edits::set_service_name(&mut tree, service, "billing").unwrap();
    let events = log.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, TreeEventKind::AttributeChanged);
    assert_eq!(events[0].origin, service);
}
