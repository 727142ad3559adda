//! Kind-specific structural edits.
//!
//! These are the operations the diagram layer invokes: add/remove a
//! parameter, add a resource, append to a task invocation's expression
//! list. Each validates through the legality predicates and the sibling
//! identifier check before mutating, then fires exactly one notification.

use smol_str::SmolStr;
use tracing::warn;

use crate::base::NodeId;
use crate::unique_identifier;

use super::error::AstError;
use super::kind::NodeKind;
use super::node::AstTree;
use super::payload::NodePayload;

fn non_blank(attribute: &'static str, value: &str) -> Result<SmolStr, AstError> {
    if value.trim().is_empty() {
        return Err(AstError::InvalidAttributeValue {
            attribute,
            value: value.to_string(),
        });
    }
    Ok(SmolStr::new(value))
}

// ============================================================================
// SERVICES
// ============================================================================

/// Append a resource with a deterministic fresh name (`newResource`,
/// `newResource2`, ...) and a default `http:GET` method annotation.
pub fn add_resource(tree: &mut AstTree, service: NodeId) -> Result<NodeId, AstError> {
    let taken: Vec<String> = tree
        .children(service)?
        .iter()
        .filter_map(|&child| {
            let node = tree.node(child).ok()?;
            (node.kind() == NodeKind::ResourceDefinition)
                .then(|| node.payload.identifier().map(str::to_owned))
                .flatten()
        })
        .collect();
    let name = unique_identifier("newResource", taken.iter().map(String::as_str));

    let resource = tree.create_with_payload(NodePayload::ResourceDefinition {
        resource_name: name,
    });
    ensure_default_method_annotation(tree, resource)?;
    tree.append_child(service, resource, "Add Resource")?;
    Ok(resource)
}

/// Materialize a default HTTP-method annotation when the resource has none.
/// Synthesized, so the visitor renders it with canonical formatting.
pub fn ensure_default_method_annotation(
    tree: &mut AstTree,
    resource: NodeId,
) -> Result<(), AstError> {
    let has_method = tree
        .find_child(resource, |node| {
            matches!(
                &node.payload,
                NodePayload::AnnotationAttachment { annotation_name, .. }
                    if annotation_name.starts_with("http:")
            )
        })?
        .is_some();
    if has_method {
        return Ok(());
    }
    let annotation = tree.create_with_payload(NodePayload::AnnotationAttachment {
        annotation_name: SmolStr::new("http:GET"),
        value: None,
    });
    tree.attach(resource, 0, annotation)?;
    Ok(())
}

// ============================================================================
// CALLABLES (resource / function / connector action)
// ============================================================================

/// The callable's parameter nodes, in declaration order.
pub fn parameters(tree: &AstTree, callable: NodeId) -> Result<Vec<NodeId>, AstError> {
    match argument_list(tree, callable)? {
        Some(list) => Ok(tree.children(list)?.to_vec()),
        None => Ok(Vec::new()),
    }
}

fn argument_list(tree: &AstTree, callable: NodeId) -> Result<Option<NodeId>, AstError> {
    tree.find_child(callable, |node| {
        node.kind() == NodeKind::ArgumentParameterList
    })
}

/// Append a parameter. Rejects a blank name and a name colliding with an
/// existing parameter; on rejection the parameter count is unchanged.
pub fn add_parameter(
    tree: &mut AstTree,
    callable: NodeId,
    type_name: &str,
    name: &str,
) -> Result<NodeId, AstError> {
    let type_name = non_blank("type_name", type_name)?;
    let name = non_blank("parameter_name", name)?;

    let list = match argument_list(tree, callable)? {
        Some(list) => list,
        None => {
            let list = tree.create(NodeKind::ArgumentParameterList);
            tree.attach(callable, 0, list)?;
            list
        }
    };
    let parameter = tree.create_with_payload(NodePayload::ParameterDefinition {
        type_name,
        parameter_name: name,
    });
    tree.append_child(list, parameter, "Add Parameter")?;
    Ok(parameter)
}

/// Remove the parameter named `name`, if present.
pub fn remove_parameter(
    tree: &mut AstTree,
    callable: NodeId,
    name: &str,
) -> Result<(), AstError> {
    let Some(list) = argument_list(tree, callable)? else {
        return Ok(());
    };
    let found = tree.find_child(list, |node| node.payload.identifier() == Some(name))?;
    if let Some(parameter) = found {
        tree.remove_child(list, parameter, "Remove Parameter")?;
    }
    Ok(())
}

/// Insert a variable definition statement after the last existing one, so
/// declarations stay grouped ahead of executable statements.
pub fn add_variable_definition(
    tree: &mut AstTree,
    container: NodeId,
    type_name: &str,
    name: &str,
) -> Result<NodeId, AstError> {
    let type_name = non_blank("type_name", type_name)?;
    let name = non_blank("variable_name", name)?;

    let children = tree.children(container)?;
    let mut index = children
        .iter()
        .rposition(|&child| {
            tree.kind(child)
                .is_ok_and(|k| k == NodeKind::VariableDefinitionStatement)
        })
        .map(|position| position + 1);
    if index.is_none() {
        // No variable definitions yet: slot in after the connector
        // declarations instead.
        index = children
            .iter()
            .rposition(|&child| {
                tree.kind(child)
                    .is_ok_and(|k| k == NodeKind::ConnectorDeclaration)
            })
            .map(|position| position + 1);
    }
    let index = index.unwrap_or_else(|| {
        // Keep declarations behind parameter lists and annotations.
        tree.node(container)
            .map(|node| {
                node.children()
                    .iter()
                    .take_while(|&&child| {
                        tree.kind(child).is_ok_and(|k| {
                            matches!(
                                k,
                                NodeKind::AnnotationAttachment
                                    | NodeKind::ArgumentParameterList
                                    | NodeKind::ReturnParameterList
                            )
                        })
                    })
                    .count()
            })
            .unwrap_or(0)
    });

    let statement = tree.create_with_payload(NodePayload::VariableDefinitionStatement {
        type_name,
        variable_name: name,
    });
    tree.insert_child(container, index, statement, "Add Variable Definition")?;
    Ok(statement)
}

/// Remove the variable definition statement whose identifier is `name`.
pub fn remove_variable_definition(
    tree: &mut AstTree,
    container: NodeId,
    name: &str,
) -> Result<(), AstError> {
    let found = tree.find_child(container, |node| {
        node.kind() == NodeKind::VariableDefinitionStatement
            && node.payload.identifier() == Some(name)
    })?;
    if let Some(statement) = found {
        tree.remove_child(container, statement, "Remove Variable Definition")?;
    }
    Ok(())
}

// ============================================================================
// TASKS
// ============================================================================

/// Is this node the implicit default task (never a message destination)?
pub fn is_default_task(tree: &AstTree, id: NodeId) -> bool {
    matches!(
        tree.node(id).map(|node| &node.payload),
        Ok(NodePayload::TaskDeclaration { is_default: true, .. })
    )
}

/// Append an expression to a task invocation/reply statement's expression
/// list. Append order is transmit order.
pub fn add_to_expression_list(
    tree: &mut AstTree,
    statement: NodeId,
    expression: NodeId,
) -> Result<(), AstError> {
    tree.append_child(statement, expression, "Add To Expression List")
}

/// Resolve the `destination` of every task invocation directly under
/// `container` against its sibling task declarations.
///
/// Forward references stay unresolved (`None`) — never an error; this pass
/// re-runs whenever a task declaration is added to the scope.
pub fn resolve_task_destinations(tree: &mut AstTree, container: NodeId) -> Result<(), AstError> {
    let children: Vec<NodeId> = tree.children(container)?.to_vec();
    let tasks: Vec<(NodeId, SmolStr)> = children
        .iter()
        .filter_map(|&child| match &tree.node(child).ok()?.payload {
            NodePayload::TaskDeclaration {
                task_name,
                is_default: false,
            } => Some((child, task_name.clone())),
            _ => None,
        })
        .collect();

    for child in children {
        let NodePayload::TaskInvocationStatement { task_name, .. } =
            &tree.node(child)?.payload
        else {
            continue;
        };
        let wanted = task_name.clone();
        let resolved = tasks
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|&(id, _)| id);
        if resolved.is_none() {
            warn!(task = %wanted, "task destination unresolved in scope");
        }
        // Derived state: no version bump, no notification.
        if let NodePayload::TaskInvocationStatement { destination, .. } =
            &mut tree.node_mut(child)?.payload
        {
            *destination = resolved;
        }
    }
    Ok(())
}

/// Record the originating endpoint of a drawn message.
pub fn set_task_invocation_source(
    tree: &mut AstTree,
    statement: NodeId,
    origin: NodeId,
) -> Result<(), AstError> {
    tree.update_payload(statement, "Set Message Source", |payload| match payload {
        NodePayload::TaskInvocationStatement { source, .. }
        | NodePayload::TaskReplyStatement { source, .. } => {
            *source = Some(origin);
            Ok(())
        }
        other => Err(AstError::MalformedPayload {
            kind: other.kind(),
            detail: "not a task messaging statement".into(),
        }),
    })
}

// ============================================================================
// NAMED-NODE ATTRIBUTE SETTERS
// ============================================================================

/// Rename a service. Blank names are rejected with the tree unchanged.
pub fn set_service_name(tree: &mut AstTree, service: NodeId, name: &str) -> Result<(), AstError> {
    let name = non_blank("service_name", name)?;
    tree.update_payload(service, "Rename Service", |payload| match payload {
        NodePayload::ServiceDefinition { service_name } => {
            *service_name = name;
            Ok(())
        }
        other => Err(AstError::MalformedPayload {
            kind: other.kind(),
            detail: "not a service definition".into(),
        }),
    })
}

/// Rename a resource.
pub fn set_resource_name(tree: &mut AstTree, resource: NodeId, name: &str) -> Result<(), AstError> {
    let name = non_blank("resource_name", name)?;
    tree.update_payload(resource, "Rename Resource", |payload| match payload {
        NodePayload::ResourceDefinition { resource_name } => {
            *resource_name = name;
            Ok(())
        }
        other => Err(AstError::MalformedPayload {
            kind: other.kind(),
            detail: "not a resource definition".into(),
        }),
    })
}

/// Rename a function.
pub fn set_function_name(tree: &mut AstTree, function: NodeId, name: &str) -> Result<(), AstError> {
    let name = non_blank("function_name", name)?;
    tree.update_payload(function, "Rename Function", |payload| match payload {
        NodePayload::FunctionDefinition { function_name, .. } => {
            *function_name = name;
            Ok(())
        }
        other => Err(AstError::MalformedPayload {
            kind: other.kind(),
            detail: "not a function definition".into(),
        }),
    })
}
