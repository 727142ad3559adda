//! The node factory: wire-format hydration and per-kind constructors.
//!
//! [`create_from_json`] is the single entry point for turning the external
//! parser's tagged JSON tree into typed nodes. It dispatches on the `type`
//! tag, decodes kind-specific attributes, and recursively hydrates
//! children in order. Hydration is silent — no change notifications fire —
//! and stateless: independent subtrees can be hydrated independently.
//!
//! Every kind also gets a `create_*` constructor and an `is_*` predicate,
//! kept in 1:1 sync with the tag enumeration (the bijection is tested
//! against [`NodeKind::ALL`]).

use serde_json::Value;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::{LineNumber, NodeId};

use super::edits;
use super::error::AstError;
use super::kind::NodeKind;
use super::node::AstTree;
use super::payload::NodePayload;
use super::whitespace::WhitespaceDescriptor;

// ============================================================================
// HYDRATION
// ============================================================================

/// Hydrate one tagged wire-format record (and its children) into `tree`.
///
/// Fails with [`AstError::UnknownNodeKind`] on an unrecognized tag; the
/// caller decides whether to abort the whole document or substitute a
/// placeholder.
pub fn create_from_json(tree: &mut AstTree, value: &Value) -> Result<NodeId, AstError> {
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AstError::UnknownNodeKind {
            tag: "<missing type>".to_string(),
        })?;
    let kind = NodeKind::from_tag(tag).ok_or_else(|| AstError::UnknownNodeKind {
        tag: tag.to_string(),
    })?;
    debug!(%kind, "hydrating node");

    let id = tree.create(kind);
    apply_metadata(tree, id, value)?;
    init_from_json(tree, id, kind, value)?;
    hydrate_children(tree, id, value)?;
    edits::resolve_task_destinations(tree, id)?;
    Ok(id)
}

/// Line number, identifier-literal flag, whitespace descriptor. All silent:
/// hydration is not an edit.
fn apply_metadata(tree: &mut AstTree, id: NodeId, value: &Value) -> Result<(), AstError> {
    if let Some(line) = value.get("line_number").and_then(Value::as_u64) {
        tree.set_line_number_silent(id, LineNumber::new(line as usize))?;
    }
    let node = tree.node_mut(id)?;
    if let Some(flag) = value.get("is_identifier_literal").and_then(Value::as_bool) {
        node.is_identifier_literal = flag;
    }
    node.whitespace = match value.get("whitespace_descriptor") {
        Some(descriptor) => serde_json::from_value(descriptor.clone()).map_err(|err| {
            AstError::MalformedPayload {
                kind: node.kind(),
                detail: format!("bad whitespace descriptor: {err}"),
            }
        })?,
        None => WhitespaceDescriptor::synthesized(),
    };
    Ok(())
}

fn hydrate_children(tree: &mut AstTree, id: NodeId, value: &Value) -> Result<(), AstError> {
    let Some(children) = value.get("children").and_then(Value::as_array) else {
        return Ok(());
    };
    for child_value in children {
        let child = create_from_json(tree, child_value)?;
        let index = tree.children(id)?.len();
        tree.attach(id, index, child)?;
    }
    Ok(())
}

// ============================================================================
// KIND-SPECIFIC ATTRIBUTE DECODING
// ============================================================================

fn required(value: &Value, kind: NodeKind, field: &str) -> Result<SmolStr, AstError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(SmolStr::new)
        .ok_or_else(|| AstError::MalformedPayload {
            kind,
            detail: format!("missing field `{field}`"),
        })
}

fn optional(value: &Value, field: &str) -> Option<SmolStr> {
    value.get(field).and_then(Value::as_str).map(SmolStr::new)
}

/// Decode the kind-specific attributes of `value` into the node's payload.
fn init_from_json(
    tree: &mut AstTree,
    id: NodeId,
    kind: NodeKind,
    value: &Value,
) -> Result<(), AstError> {
    let payload = match kind {
        NodeKind::PackageDeclaration => NodePayload::PackageDeclaration {
            package_name: required(value, kind, "package_name")?,
        },
        NodeKind::ImportDeclaration => NodePayload::ImportDeclaration {
            package_path: required(value, kind, "package_path")?,
            as_name: optional(value, "as_name"),
        },
        NodeKind::ServiceDefinition => NodePayload::ServiceDefinition {
            service_name: required(value, kind, "service_name")?,
        },
        NodeKind::ResourceDefinition => NodePayload::ResourceDefinition {
            resource_name: required(value, kind, "resource_name")?,
        },
        NodeKind::FunctionDefinition => NodePayload::FunctionDefinition {
            function_name: required(value, kind, "function_name")?,
            is_public: value
                .get("is_public")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        NodeKind::ConnectorDefinition => NodePayload::ConnectorDefinition {
            connector_name: required(value, kind, "connector_name")?,
        },
        NodeKind::ConnectorAction => NodePayload::ConnectorAction {
            action_name: required(value, kind, "action_name")?,
        },
        NodeKind::ConnectorDeclaration => NodePayload::ConnectorDeclaration {
            connector_type: required(value, kind, "connector_type")?,
            variable_name: required(value, kind, "variable_name")?,
        },
        NodeKind::TaskDeclaration => NodePayload::TaskDeclaration {
            task_name: required(value, kind, "task_name")?,
            is_default: value
                .get("is_default")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        NodeKind::StructDefinition => NodePayload::StructDefinition {
            struct_name: required(value, kind, "struct_name")?,
        },
        NodeKind::ConstantDefinition => NodePayload::ConstantDefinition {
            value_type: required(value, kind, "value_type")?,
            constant_name: required(value, kind, "constant_name")?,
            value: required(value, kind, "value")?,
        },
        NodeKind::GlobalVariableDefinition => NodePayload::GlobalVariableDefinition {
            value_type: required(value, kind, "value_type")?,
            variable_name: required(value, kind, "variable_name")?,
        },
        NodeKind::ParameterDefinition => NodePayload::ParameterDefinition {
            type_name: required(value, kind, "type_name")?,
            parameter_name: required(value, kind, "parameter_name")?,
        },
        NodeKind::AnnotationAttachment => NodePayload::AnnotationAttachment {
            annotation_name: required(value, kind, "annotation_name")?,
            value: optional(value, "value"),
        },
        NodeKind::VariableDeclaration => NodePayload::VariableDeclaration {
            type_name: required(value, kind, "type_name")?,
            identifier: required(value, kind, "identifier")?,
        },
        NodeKind::VariableDefinitionStatement => NodePayload::VariableDefinitionStatement {
            type_name: required(value, kind, "type_name")?,
            variable_name: required(value, kind, "variable_name")?,
        },
        NodeKind::CatchStatement => NodePayload::CatchStatement {
            error_type: required(value, kind, "error_type")?,
            error_name: required(value, kind, "error_name")?,
        },
        NodeKind::TaskInvocationStatement => NodePayload::TaskInvocationStatement {
            task_name: required(value, kind, "task_name")?,
            source: None,
            destination: None,
        },
        NodeKind::TaskReplyStatement => NodePayload::TaskReplyStatement {
            task_name: required(value, kind, "task_name")?,
            source: None,
        },
        NodeKind::CommentStatement => NodePayload::CommentStatement {
            comment: required(value, kind, "comment")?,
        },
        NodeKind::LiteralExpression => NodePayload::LiteralExpression {
            literal_type: required(value, kind, "literal_type")?,
            lexeme: required(value, kind, "lexeme")?,
        },
        NodeKind::VariableReferenceExpression => NodePayload::VariableReferenceExpression {
            variable_name: required(value, kind, "variable_name")?,
        },
        NodeKind::BinaryExpression => NodePayload::BinaryExpression {
            operator: required(value, kind, "operator")?,
        },
        NodeKind::UnaryExpression => NodePayload::UnaryExpression {
            operator: required(value, kind, "operator")?,
        },
        NodeKind::FunctionInvocationExpression => NodePayload::FunctionInvocationExpression {
            package_name: optional(value, "package_name"),
            function_name: required(value, kind, "function_name")?,
        },
        NodeKind::ActionInvocationExpression => NodePayload::ActionInvocationExpression {
            connector_name: required(value, kind, "connector_name")?,
            action_name: required(value, kind, "action_name")?,
        },
        NodeKind::FieldAccessExpression => NodePayload::FieldAccessExpression {
            field_name: required(value, kind, "field_name")?,
        },
        NodeKind::KeyValueExpression => NodePayload::KeyValueExpression {
            key: required(value, kind, "key")?,
        },
        NodeKind::TypeCastExpression => NodePayload::TypeCastExpression {
            target_type: required(value, kind, "target_type")?,
        },
        NodeKind::ConnectorInitExpression => NodePayload::ConnectorInitExpression {
            connector_type: required(value, kind, "connector_type")?,
        },
        // Structure-only kinds carry no attributes.
        _ => NodePayload::empty(kind),
    };
    tree.node_mut(id)?.payload = payload;
    Ok(())
}

// ============================================================================
// PER-KIND CONSTRUCTORS AND PREDICATES
// ============================================================================

fn is_kind(tree: &AstTree, id: NodeId, kind: NodeKind) -> bool {
    tree.kind(id).is_ok_and(|k| k == kind)
}

macro_rules! factory_pairs {
    ($(($create:ident, $is:ident, $kind:ident)),+ $(,)?) => {
        $(
            #[doc = concat!("Create a detached `", stringify!($kind), "` node.")]
            pub fn $create(tree: &mut AstTree) -> NodeId {
                tree.create(NodeKind::$kind)
            }

            #[doc = concat!("Is `id` a `", stringify!($kind), "` node?")]
            pub fn $is(tree: &AstTree, id: NodeId) -> bool {
                is_kind(tree, id, NodeKind::$kind)
            }
        )+

        #[cfg(test)]
        pub(crate) const FACTORY_TABLE: &[(
            NodeKind,
            fn(&mut AstTree) -> NodeId,
            fn(&AstTree, NodeId) -> bool,
        )] = &[
            $((NodeKind::$kind, $create, $is),)+
        ];
    };
}

factory_pairs![
    (create_source_file, is_source_file, SourceFile),
    (create_package_declaration, is_package_declaration, PackageDeclaration),
    (create_import_declaration, is_import_declaration, ImportDeclaration),
    (create_service_definition, is_service_definition, ServiceDefinition),
    (create_resource_definition, is_resource_definition, ResourceDefinition),
    (create_function_definition, is_function_definition, FunctionDefinition),
    (create_connector_definition, is_connector_definition, ConnectorDefinition),
    (create_connector_action, is_connector_action, ConnectorAction),
    (create_connector_declaration, is_connector_declaration, ConnectorDeclaration),
    (create_task_declaration, is_task_declaration, TaskDeclaration),
    (create_struct_definition, is_struct_definition, StructDefinition),
    (create_constant_definition, is_constant_definition, ConstantDefinition),
    (create_global_variable_definition, is_global_variable_definition, GlobalVariableDefinition),
    (create_parameter_definition, is_parameter_definition, ParameterDefinition),
    (create_argument_parameter_list, is_argument_parameter_list, ArgumentParameterList),
    (create_return_parameter_list, is_return_parameter_list, ReturnParameterList),
    (create_annotation_attachment, is_annotation_attachment, AnnotationAttachment),
    (create_variable_declaration, is_variable_declaration, VariableDeclaration),
    (create_variable_definition_statement, is_variable_definition_statement, VariableDefinitionStatement),
    (create_assignment_statement, is_assignment_statement, AssignmentStatement),
    (create_if_else_statement, is_if_else_statement, IfElseStatement),
    (create_if_statement, is_if_statement, IfStatement),
    (create_else_if_statement, is_else_if_statement, ElseIfStatement),
    (create_else_statement, is_else_statement, ElseStatement),
    (create_while_statement, is_while_statement, WhileStatement),
    (create_break_statement, is_break_statement, BreakStatement),
    (create_continue_statement, is_continue_statement, ContinueStatement),
    (create_return_statement, is_return_statement, ReturnStatement),
    (create_reply_statement, is_reply_statement, ReplyStatement),
    (create_throw_statement, is_throw_statement, ThrowStatement),
    (create_try_catch_statement, is_try_catch_statement, TryCatchStatement),
    (create_try_statement, is_try_statement, TryStatement),
    (create_catch_statement, is_catch_statement, CatchStatement),
    (create_finally_statement, is_finally_statement, FinallyStatement),
    (create_task_invocation_statement, is_task_invocation_statement, TaskInvocationStatement),
    (create_task_reply_statement, is_task_reply_statement, TaskReplyStatement),
    (create_expression_statement, is_expression_statement, ExpressionStatement),
    (create_comment_statement, is_comment_statement, CommentStatement),
    (create_literal_expression, is_literal_expression, LiteralExpression),
    (create_variable_reference_expression, is_variable_reference_expression, VariableReferenceExpression),
    (create_binary_expression, is_binary_expression, BinaryExpression),
    (create_unary_expression, is_unary_expression, UnaryExpression),
    (create_function_invocation_expression, is_function_invocation_expression, FunctionInvocationExpression),
    (create_action_invocation_expression, is_action_invocation_expression, ActionInvocationExpression),
    (create_field_access_expression, is_field_access_expression, FieldAccessExpression),
    (create_index_access_expression, is_index_access_expression, IndexAccessExpression),
    (create_array_init_expression, is_array_init_expression, ArrayInitExpression),
    (create_key_value_expression, is_key_value_expression, KeyValueExpression),
    (create_map_init_expression, is_map_init_expression, MapInitExpression),
    (create_type_cast_expression, is_type_cast_expression, TypeCastExpression),
    (create_connector_init_expression, is_connector_init_expression, ConnectorInitExpression),
];
