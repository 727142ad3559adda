//! The parent/child legality matrix.
//!
//! One table is the single source of truth: [`can_be_parent_of`] encodes
//! which kinds a parent accepts, and [`can_be_a_child_of`] is its exact
//! transpose, so the two directions can never drift apart. Attaching a
//! disallowed pair is a programming error surfaced as
//! [`StructuralViolation`](super::AstError::StructuralViolation) before any
//! mutation happens.

use super::kind::NodeKind;

/// Statements that may appear directly in a statement body. The clause
/// kinds (`if`/`else`/`try`/`catch`/`finally` pieces) only ever live under
/// their composite statement.
fn is_free_statement(kind: NodeKind) -> bool {
    kind.is_statement()
        && !matches!(
            kind,
            NodeKind::IfStatement
                | NodeKind::ElseIfStatement
                | NodeKind::ElseStatement
                | NodeKind::TryStatement
                | NodeKind::CatchStatement
                | NodeKind::FinallyStatement
        )
}

/// May `parent` accept a child of kind `child`?
pub fn can_be_parent_of(parent: NodeKind, child: NodeKind) -> bool {
    use NodeKind::*;
    match parent {
        SourceFile => matches!(
            child,
            PackageDeclaration
                | ImportDeclaration
                | ServiceDefinition
                | FunctionDefinition
                | ConnectorDefinition
                | StructDefinition
                | ConstantDefinition
                | GlobalVariableDefinition
                | CommentStatement
        ),
        ServiceDefinition => matches!(
            child,
            ResourceDefinition
                | VariableDefinitionStatement
                | ConnectorDeclaration
                | AnnotationAttachment
                | CommentStatement
        ),
        ResourceDefinition => {
            matches!(
                child,
                ArgumentParameterList | AnnotationAttachment | TaskDeclaration | ConnectorDeclaration
            ) || is_free_statement(child)
        }
        FunctionDefinition | ConnectorAction => {
            matches!(
                child,
                ArgumentParameterList
                    | ReturnParameterList
                    | AnnotationAttachment
                    | TaskDeclaration
                    | ConnectorDeclaration
            ) || is_free_statement(child)
        }
        ConnectorDefinition => matches!(
            child,
            ArgumentParameterList
                | AnnotationAttachment
                | ConnectorAction
                | VariableDeclaration
                | ConnectorDeclaration
        ),
        TaskDeclaration => is_free_statement(child),
        StructDefinition => matches!(child, VariableDefinitionStatement),
        ArgumentParameterList | ReturnParameterList => matches!(child, ParameterDefinition),
        ConnectorDeclaration => matches!(child, ConnectorInitExpression),
        GlobalVariableDefinition | VariableDefinitionStatement => child.is_expression(),
        PackageDeclaration | ImportDeclaration | ConstantDefinition | ParameterDefinition
        | AnnotationAttachment | VariableDeclaration => false,
        AssignmentStatement => child.is_expression(),
        IfElseStatement => matches!(child, IfStatement | ElseIfStatement | ElseStatement),
        IfStatement | ElseIfStatement | WhileStatement => {
            child.is_expression() || is_free_statement(child)
        }
        ElseStatement | TryStatement | CatchStatement | FinallyStatement => {
            is_free_statement(child)
        }
        TryCatchStatement => matches!(child, TryStatement | CatchStatement | FinallyStatement),
        BreakStatement | ContinueStatement | CommentStatement => false,
        ReturnStatement | ReplyStatement | ThrowStatement | TaskInvocationStatement
        | TaskReplyStatement | ExpressionStatement => child.is_expression(),
        BinaryExpression | UnaryExpression | FunctionInvocationExpression
        | ActionInvocationExpression | ConnectorInitExpression | ArrayInitExpression
        | FieldAccessExpression | IndexAccessExpression | KeyValueExpression
        | TypeCastExpression => child.is_expression(),
        MapInitExpression => matches!(child, KeyValueExpression),
        LiteralExpression | VariableReferenceExpression => false,
    }
}

/// May `child` be attached under a parent of kind `parent`?
///
/// Transpose of [`can_be_parent_of`] by construction.
pub fn can_be_a_child_of(child: NodeKind, parent: NodeKind) -> bool {
    can_be_parent_of(parent, child)
}

/// Targets a message drawn from a task invocation statement may land on:
/// task declarations, resources, functions, and connector actions. The
/// diagram layer validates a user-drawn connection against this before
/// committing it.
pub fn message_draw_target_allowed(target: NodeKind) -> bool {
    target.is_message_endpoint()
}
