//! The closed set of AST node kinds and their wire-format tags.
//!
//! Every concrete syntactic construct is one `NodeKind` variant with a 1:1
//! snake_case tag. Adding a construct means adding exactly one variant, one
//! tag arm, and one payload variant; the factory and visitor dispatch tables
//! are driven off [`NodeKind::ALL`], so the bijection is testable.

/// Discriminant for every concrete AST node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------
    SourceFile,
    PackageDeclaration,
    ImportDeclaration,
    ServiceDefinition,
    ResourceDefinition,
    FunctionDefinition,
    ConnectorDefinition,
    ConnectorAction,
    ConnectorDeclaration,
    TaskDeclaration,
    StructDefinition,
    ConstantDefinition,
    GlobalVariableDefinition,
    ParameterDefinition,
    ArgumentParameterList,
    ReturnParameterList,
    AnnotationAttachment,
    VariableDeclaration,
    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------
    VariableDefinitionStatement,
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
    CatchStatement,
    FinallyStatement,
    TaskInvocationStatement,
    TaskReplyStatement,
    ExpressionStatement,
    CommentStatement,
    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------
    LiteralExpression,
    VariableReferenceExpression,
    BinaryExpression,
    UnaryExpression,
    FunctionInvocationExpression,
    ActionInvocationExpression,
    FieldAccessExpression,
    IndexAccessExpression,
    ArrayInitExpression,
    KeyValueExpression,
    MapInitExpression,
    TypeCastExpression,
    ConnectorInitExpression,
}

impl NodeKind {
    /// Every kind, in declaration order. Dispatch tables and the factory
    /// bijection tests iterate this.
    pub const ALL: &'static [NodeKind] = &[
        NodeKind::SourceFile,
        NodeKind::PackageDeclaration,
        NodeKind::ImportDeclaration,
        NodeKind::ServiceDefinition,
        NodeKind::ResourceDefinition,
        NodeKind::FunctionDefinition,
        NodeKind::ConnectorDefinition,
        NodeKind::ConnectorAction,
        NodeKind::ConnectorDeclaration,
        NodeKind::TaskDeclaration,
        NodeKind::StructDefinition,
        NodeKind::ConstantDefinition,
        NodeKind::GlobalVariableDefinition,
        NodeKind::ParameterDefinition,
        NodeKind::ArgumentParameterList,
        NodeKind::ReturnParameterList,
        NodeKind::AnnotationAttachment,
        NodeKind::VariableDeclaration,
        NodeKind::VariableDefinitionStatement,
        NodeKind::AssignmentStatement,
        NodeKind::IfElseStatement,
        NodeKind::IfStatement,
        NodeKind::ElseIfStatement,
        NodeKind::ElseStatement,
        NodeKind::WhileStatement,
        NodeKind::BreakStatement,
        NodeKind::ContinueStatement,
        NodeKind::ReturnStatement,
        NodeKind::ReplyStatement,
        NodeKind::ThrowStatement,
        NodeKind::TryCatchStatement,
        NodeKind::TryStatement,
        NodeKind::CatchStatement,
        NodeKind::FinallyStatement,
        NodeKind::TaskInvocationStatement,
        NodeKind::TaskReplyStatement,
        NodeKind::ExpressionStatement,
        NodeKind::CommentStatement,
        NodeKind::LiteralExpression,
        NodeKind::VariableReferenceExpression,
        NodeKind::BinaryExpression,
        NodeKind::UnaryExpression,
        NodeKind::FunctionInvocationExpression,
        NodeKind::ActionInvocationExpression,
        NodeKind::FieldAccessExpression,
        NodeKind::IndexAccessExpression,
        NodeKind::ArrayInitExpression,
        NodeKind::KeyValueExpression,
        NodeKind::MapInitExpression,
        NodeKind::TypeCastExpression,
        NodeKind::ConnectorInitExpression,
    ];

    /// Wire-format tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",
            NodeKind::PackageDeclaration => "package_declaration",
            NodeKind::ImportDeclaration => "import_declaration",
            NodeKind::ServiceDefinition => "service_definition",
            NodeKind::ResourceDefinition => "resource_definition",
            NodeKind::FunctionDefinition => "function_definition",
            NodeKind::ConnectorDefinition => "connector_definition",
            NodeKind::ConnectorAction => "connector_action",
            NodeKind::ConnectorDeclaration => "connector_declaration",
            NodeKind::TaskDeclaration => "task_declaration",
            NodeKind::StructDefinition => "struct_definition",
            NodeKind::ConstantDefinition => "constant_definition",
            NodeKind::GlobalVariableDefinition => "global_variable_definition",
            NodeKind::ParameterDefinition => "parameter_definition",
            NodeKind::ArgumentParameterList => "argument_parameter_list",
            NodeKind::ReturnParameterList => "return_parameter_list",
            NodeKind::AnnotationAttachment => "annotation_attachment",
            NodeKind::VariableDeclaration => "variable_declaration",
            NodeKind::VariableDefinitionStatement => "variable_definition_statement",
            NodeKind::AssignmentStatement => "assignment_statement",
            NodeKind::IfElseStatement => "if_else_statement",
            NodeKind::IfStatement => "if_statement",
            NodeKind::ElseIfStatement => "else_if_statement",
            NodeKind::ElseStatement => "else_statement",
            NodeKind::WhileStatement => "while_statement",
            NodeKind::BreakStatement => "break_statement",
            NodeKind::ContinueStatement => "continue_statement",
            NodeKind::ReturnStatement => "return_statement",
            NodeKind::ReplyStatement => "reply_statement",
            NodeKind::ThrowStatement => "throw_statement",
            NodeKind::TryCatchStatement => "try_catch_statement",
            NodeKind::TryStatement => "try_statement",
            NodeKind::CatchStatement => "catch_statement",
            NodeKind::FinallyStatement => "finally_statement",
            NodeKind::TaskInvocationStatement => "task_invocation_statement",
            NodeKind::TaskReplyStatement => "task_reply_statement",
            NodeKind::ExpressionStatement => "expression_statement",
            NodeKind::CommentStatement => "comment_statement",
            NodeKind::LiteralExpression => "literal_expression",
            NodeKind::VariableReferenceExpression => "variable_reference_expression",
            NodeKind::BinaryExpression => "binary_expression",
            NodeKind::UnaryExpression => "unary_expression",
            NodeKind::FunctionInvocationExpression => "function_invocation_expression",
            NodeKind::ActionInvocationExpression => "action_invocation_expression",
            NodeKind::FieldAccessExpression => "field_access_expression",
            NodeKind::IndexAccessExpression => "index_access_expression",
            NodeKind::ArrayInitExpression => "array_init_expression",
            NodeKind::KeyValueExpression => "key_value_expression",
            NodeKind::MapInitExpression => "map_init_expression",
            NodeKind::TypeCastExpression => "type_cast_expression",
            NodeKind::ConnectorInitExpression => "connector_init_expression",
        }
    }

    /// Resolve a wire-format tag. `None` means the tag is unknown to this
    /// build of the core (a parser/core version mismatch).
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        NodeKind::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::VariableDefinitionStatement
                | NodeKind::AssignmentStatement
                | NodeKind::IfElseStatement
                | NodeKind::IfStatement
                | NodeKind::ElseIfStatement
                | NodeKind::ElseStatement
                | NodeKind::WhileStatement
                | NodeKind::BreakStatement
                | NodeKind::ContinueStatement
                | NodeKind::ReturnStatement
                | NodeKind::ReplyStatement
                | NodeKind::ThrowStatement
                | NodeKind::TryCatchStatement
                | NodeKind::TryStatement
                | NodeKind::CatchStatement
                | NodeKind::FinallyStatement
                | NodeKind::TaskInvocationStatement
                | NodeKind::TaskReplyStatement
                | NodeKind::ExpressionStatement
                | NodeKind::CommentStatement
        )
    }

    pub fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::LiteralExpression
                | NodeKind::VariableReferenceExpression
                | NodeKind::BinaryExpression
                | NodeKind::UnaryExpression
                | NodeKind::FunctionInvocationExpression
                | NodeKind::ActionInvocationExpression
                | NodeKind::FieldAccessExpression
                | NodeKind::IndexAccessExpression
                | NodeKind::ArrayInitExpression
                | NodeKind::KeyValueExpression
                | NodeKind::MapInitExpression
                | NodeKind::TypeCastExpression
                | NodeKind::ConnectorInitExpression
        )
    }

    pub fn is_declaration(self) -> bool {
        !self.is_statement() && !self.is_expression()
    }

    /// Kinds that own an ordered sequence of statements (a statement body).
    pub fn is_statement_container(self) -> bool {
        matches!(
            self,
            NodeKind::ResourceDefinition
                | NodeKind::FunctionDefinition
                | NodeKind::ConnectorAction
                | NodeKind::TaskDeclaration
                | NodeKind::IfStatement
                | NodeKind::ElseIfStatement
                | NodeKind::ElseStatement
                | NodeKind::WhileStatement
                | NodeKind::TryStatement
                | NodeKind::CatchStatement
                | NodeKind::FinallyStatement
        )
    }

    /// Kinds that may enclose a task invocation / reply statement and act as
    /// the near end of a message drawn on the diagram.
    pub fn is_message_endpoint(self) -> bool {
        matches!(
            self,
            NodeKind::TaskDeclaration
                | NodeKind::ResourceDefinition
                | NodeKind::FunctionDefinition
                | NodeKind::ConnectorAction
        )
    }

    /// Canonical whitespace-region table applied when a node is synthesized
    /// rather than parsed (`use_default = true`).
    ///
    /// Region meaning is a per-kind contract shared with the source-gen
    /// visitors; index 0 is always the preceding gap and the last index the
    /// trailing gap for kinds that own their own line.
    pub fn default_regions(self) -> &'static [&'static str] {
        match self {
            NodeKind::SourceFile => &[],
            // 0 pre, 1 after keyword, 2 before `;`, 3 trailing
            NodeKind::PackageDeclaration => &["", " ", "", "\n"],
            // 0 pre, 1 after keyword, 2 before `as`, 3 after `as`,
            // 4 before `;`, 5 trailing
            NodeKind::ImportDeclaration => &["", " ", " ", " ", "", "\n"],
            // Block declarations: 0 pre, 1 after keyword, 2 before `{`,
            // 3 after `{`, 4 before `}`, 5 trailing
            NodeKind::ServiceDefinition => &["\n", " ", " ", "", "\n", "\n"],
            NodeKind::TaskDeclaration | NodeKind::StructDefinition => {
                &["\n", " ", " ", "", "\n", "\n"]
            }
            // Callables share one scheme: 0 pre, 1 after visibility,
            // 2 after keyword, 3 before parens, 4 before body, 5 after `{`,
            // 6 before `}`, 7 trailing
            NodeKind::ResourceDefinition
            | NodeKind::FunctionDefinition
            | NodeKind::ConnectorDefinition
            | NodeKind::ConnectorAction => &["\n", " ", " ", "", " ", "", "\n", "\n"],
            // 0 pre, 1 after type, 2 before `=`, 3 before `;`, 4 trailing
            NodeKind::ConnectorDeclaration => &["\n", " ", " ", "", ""],
            // 0 pre, 1 after `const`, 2 after type, 3 before `=`,
            // 4 after `=`, 5 before `;`, 6 trailing
            NodeKind::ConstantDefinition => &["", " ", " ", " ", " ", "", "\n"],
            // 0 pre, 1 after type, 2 before `=`, 3 before `;`, 4 trailing
            NodeKind::GlobalVariableDefinition => &["", " ", " ", "", "\n"],
            // 0 pre, 1 between type and name
            NodeKind::ParameterDefinition => &["", " "],
            NodeKind::ArgumentParameterList => &[],
            // 0 pre, 1 before `)`
            NodeKind::ReturnParameterList => &[" ", ""],
            // 0 pre, 1 before value parens
            NodeKind::AnnotationAttachment => &["\n", ""],
            // 0 pre, 1 after type, 2 before `;`, 3 trailing
            NodeKind::VariableDeclaration => &["\n", " ", "", ""],
            // 0 pre, 1 after type, 2 before `=`, 3 after `=`, 4 before `;`,
            // 5 trailing
            NodeKind::VariableDefinitionStatement => &["\n", " ", " ", " ", "", ""],
            // 0 pre, 1 before `=`, 2 after `=`, 3 before `;`, 4 trailing
            NodeKind::AssignmentStatement => &["\n", " ", " ", "", ""],
            NodeKind::IfElseStatement => &["\n", ""],
            // 0 pre, 1 after keyword, 2 before `{`, 3 after `{`, 4 before `}`
            NodeKind::IfStatement => &["", " ", " ", "", "\n"],
            // 0 pre, 1 after `else`, 2 after `if`, 3 before `{`, 4 after `{`,
            // 5 before `}`
            NodeKind::ElseIfStatement => &[" ", " ", " ", " ", "", "\n"],
            // 0 pre, 1 before `{`, 2 after `{`, 3 before `}`
            NodeKind::ElseStatement => &[" ", " ", "", "\n"],
            // 0 pre, 1 after keyword, 2 before `{`, 3 after `{`, 4 before `}`,
            // 5 trailing
            NodeKind::WhileStatement => &["\n", " ", " ", "", "\n", ""],
            // 0 pre, 1 before `;`, 2 trailing
            NodeKind::BreakStatement | NodeKind::ContinueStatement => &["\n", "", ""],
            NodeKind::ReturnStatement | NodeKind::ReplyStatement | NodeKind::ThrowStatement => {
                &["\n", "", ""]
            }
            NodeKind::TryCatchStatement => &["\n", ""],
            // 0 pre, 1 before `{`, 2 after `{`, 3 before `}`
            NodeKind::TryStatement => &["", " ", "", "\n"],
            // 0 pre, 1 before `(`, 2 between type and name, 3 before `)`,
            // 4 before `{`, 5 after `{`, 6 before `}`
            NodeKind::CatchStatement => &[" ", " ", " ", "", " ", "", "\n"],
            NodeKind::FinallyStatement => &[" ", " ", "", "\n"],
            // Matches the captured scheme of the original statement:
            // 0 before list, 1 before arrow, 2 after arrow, 3 after name,
            // 4 trailing
            NodeKind::TaskInvocationStatement | NodeKind::TaskReplyStatement => {
                &["\n", " ", " ", "", ""]
            }
            // 0 pre, 1 before `;`, 2 trailing
            NodeKind::ExpressionStatement => &["\n", "", ""],
            NodeKind::CommentStatement => &["\n", ""],
            // Expressions: 0 pre; the rest are kind-specific token gaps
            NodeKind::LiteralExpression | NodeKind::VariableReferenceExpression => &[""],
            NodeKind::BinaryExpression => &["", " "],
            NodeKind::UnaryExpression => &["", ""],
            NodeKind::FunctionInvocationExpression => &["", "", ""],
            NodeKind::ActionInvocationExpression => &["", "", ""],
            NodeKind::FieldAccessExpression => &["", ""],
            NodeKind::IndexAccessExpression => &["", ""],
            NodeKind::ArrayInitExpression => &["", ""],
            NodeKind::KeyValueExpression => &["", ""],
            NodeKind::MapInitExpression => &["", ""],
            NodeKind::TypeCastExpression => &["", ""],
            NodeKind::ConnectorInitExpression => &[" ", " ", "", ""],
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
