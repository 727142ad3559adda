//! Per-kind node attributes.
//!
//! Structure (children) lives on the tree; everything scalar a construct
//! carries — names, operators, literal lexemes — lives here. Kind and
//! payload always agree; the tree asserts it on insertion.

use smol_str::SmolStr;

use crate::base::NodeId;

use super::kind::NodeKind;

/// Attribute record for one node, one variant per [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePayload {
    SourceFile,
    PackageDeclaration {
        package_name: SmolStr,
    },
    ImportDeclaration {
        package_path: SmolStr,
        as_name: Option<SmolStr>,
    },
    ServiceDefinition {
        service_name: SmolStr,
    },
    ResourceDefinition {
        resource_name: SmolStr,
    },
    FunctionDefinition {
        function_name: SmolStr,
        is_public: bool,
    },
    ConnectorDefinition {
        connector_name: SmolStr,
    },
    ConnectorAction {
        action_name: SmolStr,
    },
    ConnectorDeclaration {
        connector_type: SmolStr,
        variable_name: SmolStr,
    },
    TaskDeclaration {
        task_name: SmolStr,
        is_default: bool,
    },
    StructDefinition {
        struct_name: SmolStr,
    },
    ConstantDefinition {
        value_type: SmolStr,
        constant_name: SmolStr,
        value: SmolStr,
    },
    GlobalVariableDefinition {
        value_type: SmolStr,
        variable_name: SmolStr,
    },
    ParameterDefinition {
        type_name: SmolStr,
        parameter_name: SmolStr,
    },
    ArgumentParameterList,
    ReturnParameterList,
    AnnotationAttachment {
        annotation_name: SmolStr,
        value: Option<SmolStr>,
    },
    VariableDeclaration {
        type_name: SmolStr,
        identifier: SmolStr,
    },
    VariableDefinitionStatement {
        type_name: SmolStr,
        variable_name: SmolStr,
    },
    AssignmentStatement,
    IfElseStatement,
    IfStatement,
    ElseIfStatement,
    ElseStatement,
    WhileStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    ReplyStatement,
    ThrowStatement,
    TryCatchStatement,
    TryStatement,
    CatchStatement {
        error_type: SmolStr,
        error_name: SmolStr,
    },
    FinallyStatement,
    /// Sends the child expression list to a named concurrent task.
    ///
    /// `destination` is resolved lazily against sibling task declarations;
    /// it stays `None` for forward references until a later resolution pass.
    TaskInvocationStatement {
        task_name: SmolStr,
        source: Option<NodeId>,
        destination: Option<NodeId>,
    },
    TaskReplyStatement {
        task_name: SmolStr,
        source: Option<NodeId>,
    },
    ExpressionStatement,
    CommentStatement {
        comment: SmolStr,
    },
    LiteralExpression {
        literal_type: SmolStr,
        /// Exact source lexeme, quotes and escapes included.
        lexeme: SmolStr,
    },
    VariableReferenceExpression {
        variable_name: SmolStr,
    },
    BinaryExpression {
        operator: SmolStr,
    },
    UnaryExpression {
        operator: SmolStr,
    },
    FunctionInvocationExpression {
        package_name: Option<SmolStr>,
        function_name: SmolStr,
    },
    ActionInvocationExpression {
        connector_name: SmolStr,
        action_name: SmolStr,
    },
    FieldAccessExpression {
        field_name: SmolStr,
    },
    IndexAccessExpression,
    ArrayInitExpression,
    KeyValueExpression {
        key: SmolStr,
    },
    MapInitExpression,
    TypeCastExpression {
        target_type: SmolStr,
    },
    ConnectorInitExpression {
        connector_type: SmolStr,
    },
}

impl NodePayload {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::SourceFile => NodeKind::SourceFile,
            NodePayload::PackageDeclaration { .. } => NodeKind::PackageDeclaration,
            NodePayload::ImportDeclaration { .. } => NodeKind::ImportDeclaration,
            NodePayload::ServiceDefinition { .. } => NodeKind::ServiceDefinition,
            NodePayload::ResourceDefinition { .. } => NodeKind::ResourceDefinition,
            NodePayload::FunctionDefinition { .. } => NodeKind::FunctionDefinition,
            NodePayload::ConnectorDefinition { .. } => NodeKind::ConnectorDefinition,
            NodePayload::ConnectorAction { .. } => NodeKind::ConnectorAction,
            NodePayload::ConnectorDeclaration { .. } => NodeKind::ConnectorDeclaration,
            NodePayload::TaskDeclaration { .. } => NodeKind::TaskDeclaration,
            NodePayload::StructDefinition { .. } => NodeKind::StructDefinition,
            NodePayload::ConstantDefinition { .. } => NodeKind::ConstantDefinition,
            NodePayload::GlobalVariableDefinition { .. } => NodeKind::GlobalVariableDefinition,
            NodePayload::ParameterDefinition { .. } => NodeKind::ParameterDefinition,
            NodePayload::ArgumentParameterList => NodeKind::ArgumentParameterList,
            NodePayload::ReturnParameterList => NodeKind::ReturnParameterList,
            NodePayload::AnnotationAttachment { .. } => NodeKind::AnnotationAttachment,
            NodePayload::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            NodePayload::VariableDefinitionStatement { .. } => {
                NodeKind::VariableDefinitionStatement
            }
            NodePayload::AssignmentStatement => NodeKind::AssignmentStatement,
            NodePayload::IfElseStatement => NodeKind::IfElseStatement,
            NodePayload::IfStatement => NodeKind::IfStatement,
            NodePayload::ElseIfStatement => NodeKind::ElseIfStatement,
            NodePayload::ElseStatement => NodeKind::ElseStatement,
            NodePayload::WhileStatement => NodeKind::WhileStatement,
            NodePayload::BreakStatement => NodeKind::BreakStatement,
            NodePayload::ContinueStatement => NodeKind::ContinueStatement,
            NodePayload::ReturnStatement => NodeKind::ReturnStatement,
            NodePayload::ReplyStatement => NodeKind::ReplyStatement,
            NodePayload::ThrowStatement => NodeKind::ThrowStatement,
            NodePayload::TryCatchStatement => NodeKind::TryCatchStatement,
            NodePayload::TryStatement => NodeKind::TryStatement,
            NodePayload::CatchStatement { .. } => NodeKind::CatchStatement,
            NodePayload::FinallyStatement => NodeKind::FinallyStatement,
            NodePayload::TaskInvocationStatement { .. } => NodeKind::TaskInvocationStatement,
            NodePayload::TaskReplyStatement { .. } => NodeKind::TaskReplyStatement,
            NodePayload::ExpressionStatement => NodeKind::ExpressionStatement,
            NodePayload::CommentStatement { .. } => NodeKind::CommentStatement,
            NodePayload::LiteralExpression { .. } => NodeKind::LiteralExpression,
            NodePayload::VariableReferenceExpression { .. } => {
                NodeKind::VariableReferenceExpression
            }
            NodePayload::BinaryExpression { .. } => NodeKind::BinaryExpression,
            NodePayload::UnaryExpression { .. } => NodeKind::UnaryExpression,
            NodePayload::FunctionInvocationExpression { .. } => {
                NodeKind::FunctionInvocationExpression
            }
            NodePayload::ActionInvocationExpression { .. } => NodeKind::ActionInvocationExpression,
            NodePayload::FieldAccessExpression { .. } => NodeKind::FieldAccessExpression,
            NodePayload::IndexAccessExpression => NodeKind::IndexAccessExpression,
            NodePayload::ArrayInitExpression => NodeKind::ArrayInitExpression,
            NodePayload::KeyValueExpression { .. } => NodeKind::KeyValueExpression,
            NodePayload::MapInitExpression => NodeKind::MapInitExpression,
            NodePayload::TypeCastExpression { .. } => NodeKind::TypeCastExpression,
            NodePayload::ConnectorInitExpression { .. } => NodeKind::ConnectorInitExpression,
        }
    }

    /// Empty payload of the given kind, with placeholder names where a name
    /// is required. Used by the factory before `init_from_json` fills it in.
    pub fn empty(kind: NodeKind) -> NodePayload {
        match kind {
            NodeKind::SourceFile => NodePayload::SourceFile,
            NodeKind::PackageDeclaration => NodePayload::PackageDeclaration {
                package_name: SmolStr::default(),
            },
            NodeKind::ImportDeclaration => NodePayload::ImportDeclaration {
                package_path: SmolStr::default(),
                as_name: None,
            },
            NodeKind::ServiceDefinition => NodePayload::ServiceDefinition {
                service_name: SmolStr::new("newService"),
            },
            NodeKind::ResourceDefinition => NodePayload::ResourceDefinition {
                resource_name: SmolStr::new("newResource"),
            },
            NodeKind::FunctionDefinition => NodePayload::FunctionDefinition {
                function_name: SmolStr::new("newFunction"),
                is_public: false,
            },
            NodeKind::ConnectorDefinition => NodePayload::ConnectorDefinition {
                connector_name: SmolStr::new("newConnector"),
            },
            NodeKind::ConnectorAction => NodePayload::ConnectorAction {
                action_name: SmolStr::new("newAction"),
            },
            NodeKind::ConnectorDeclaration => NodePayload::ConnectorDeclaration {
                connector_type: SmolStr::default(),
                variable_name: SmolStr::default(),
            },
            NodeKind::TaskDeclaration => NodePayload::TaskDeclaration {
                task_name: SmolStr::new("newTask"),
                is_default: false,
            },
            NodeKind::StructDefinition => NodePayload::StructDefinition {
                struct_name: SmolStr::new("NewStruct"),
            },
            NodeKind::ConstantDefinition => NodePayload::ConstantDefinition {
                value_type: SmolStr::default(),
                constant_name: SmolStr::default(),
                value: SmolStr::default(),
            },
            NodeKind::GlobalVariableDefinition => NodePayload::GlobalVariableDefinition {
                value_type: SmolStr::default(),
                variable_name: SmolStr::default(),
            },
            NodeKind::ParameterDefinition => NodePayload::ParameterDefinition {
                type_name: SmolStr::new("string"),
                parameter_name: SmolStr::default(),
            },
            NodeKind::ArgumentParameterList => NodePayload::ArgumentParameterList,
            NodeKind::ReturnParameterList => NodePayload::ReturnParameterList,
            NodeKind::AnnotationAttachment => NodePayload::AnnotationAttachment {
                annotation_name: SmolStr::default(),
                value: None,
            },
            NodeKind::VariableDeclaration => NodePayload::VariableDeclaration {
                type_name: SmolStr::default(),
                identifier: SmolStr::default(),
            },
            NodeKind::VariableDefinitionStatement => NodePayload::VariableDefinitionStatement {
                type_name: SmolStr::default(),
                variable_name: SmolStr::default(),
            },
            NodeKind::AssignmentStatement => NodePayload::AssignmentStatement,
            NodeKind::IfElseStatement => NodePayload::IfElseStatement,
            NodeKind::IfStatement => NodePayload::IfStatement,
            NodeKind::ElseIfStatement => NodePayload::ElseIfStatement,
            NodeKind::ElseStatement => NodePayload::ElseStatement,
            NodeKind::WhileStatement => NodePayload::WhileStatement,
            NodeKind::BreakStatement => NodePayload::BreakStatement,
            NodeKind::ContinueStatement => NodePayload::ContinueStatement,
            NodeKind::ReturnStatement => NodePayload::ReturnStatement,
            NodeKind::ReplyStatement => NodePayload::ReplyStatement,
            NodeKind::ThrowStatement => NodePayload::ThrowStatement,
            NodeKind::TryCatchStatement => NodePayload::TryCatchStatement,
            NodeKind::TryStatement => NodePayload::TryStatement,
            NodeKind::CatchStatement => NodePayload::CatchStatement {
                error_type: SmolStr::new("error"),
                error_name: SmolStr::new("e"),
            },
            NodeKind::FinallyStatement => NodePayload::FinallyStatement,
            NodeKind::TaskInvocationStatement => NodePayload::TaskInvocationStatement {
                task_name: SmolStr::default(),
                source: None,
                destination: None,
            },
            NodeKind::TaskReplyStatement => NodePayload::TaskReplyStatement {
                task_name: SmolStr::default(),
                source: None,
            },
            NodeKind::ExpressionStatement => NodePayload::ExpressionStatement,
            NodeKind::CommentStatement => NodePayload::CommentStatement {
                comment: SmolStr::default(),
            },
            NodeKind::LiteralExpression => NodePayload::LiteralExpression {
                literal_type: SmolStr::default(),
                lexeme: SmolStr::default(),
            },
            NodeKind::VariableReferenceExpression => NodePayload::VariableReferenceExpression {
                variable_name: SmolStr::default(),
            },
            NodeKind::BinaryExpression => NodePayload::BinaryExpression {
                operator: SmolStr::new("+"),
            },
            NodeKind::UnaryExpression => NodePayload::UnaryExpression {
                operator: SmolStr::new("-"),
            },
            NodeKind::FunctionInvocationExpression => NodePayload::FunctionInvocationExpression {
                package_name: None,
                function_name: SmolStr::default(),
            },
            NodeKind::ActionInvocationExpression => NodePayload::ActionInvocationExpression {
                connector_name: SmolStr::default(),
                action_name: SmolStr::default(),
            },
            NodeKind::FieldAccessExpression => NodePayload::FieldAccessExpression {
                field_name: SmolStr::default(),
            },
            NodeKind::IndexAccessExpression => NodePayload::IndexAccessExpression,
            NodeKind::ArrayInitExpression => NodePayload::ArrayInitExpression,
            NodeKind::KeyValueExpression => NodePayload::KeyValueExpression {
                key: SmolStr::default(),
            },
            NodeKind::MapInitExpression => NodePayload::MapInitExpression,
            NodeKind::TypeCastExpression => NodePayload::TypeCastExpression {
                target_type: SmolStr::default(),
            },
            NodeKind::ConnectorInitExpression => NodePayload::ConnectorInitExpression {
                connector_type: SmolStr::default(),
            },
        }
    }

    /// The identifier this node contributes to its enclosing scope, if any.
    ///
    /// Siblings with the same identifier are rejected as
    /// [`DuplicateIdentifier`](super::error::AstError::DuplicateIdentifier).
    pub fn identifier(&self) -> Option<&str> {
        match self {
            NodePayload::ServiceDefinition { service_name } => Some(service_name),
            NodePayload::ResourceDefinition { resource_name } => Some(resource_name),
            NodePayload::FunctionDefinition { function_name, .. } => Some(function_name),
            NodePayload::ConnectorDefinition { connector_name } => Some(connector_name),
            NodePayload::ConnectorAction { action_name } => Some(action_name),
            NodePayload::ConnectorDeclaration { variable_name, .. } => Some(variable_name),
            NodePayload::TaskDeclaration { task_name, .. } => Some(task_name),
            NodePayload::StructDefinition { struct_name } => Some(struct_name),
            NodePayload::ConstantDefinition { constant_name, .. } => Some(constant_name),
            NodePayload::GlobalVariableDefinition { variable_name, .. } => Some(variable_name),
            NodePayload::ParameterDefinition { parameter_name, .. } => Some(parameter_name),
            NodePayload::VariableDeclaration { identifier, .. } => Some(identifier),
            NodePayload::VariableDefinitionStatement { variable_name, .. } => Some(variable_name),
            _ => None,
        }
    }
}
