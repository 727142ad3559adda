//! Source generation: walking the typed tree and emitting source text.
//!
//! One visitor per node kind, dispatched through [`visitor_for`] — a table
//! lookup on [`NodeKind`], never a conditional chain at a call site. Each
//! visitor interleaves its literal tokens with recursively generated child
//! text, placing the node's captured whitespace regions when
//! `use_default = false` and canonical separators otherwise. Whitespace is
//! data, not derived: regenerating an unedited subtree is byte-identical
//! to the parsed original.
//!
//! Formatting state is an explicit context (the [`Generator`] plus the
//! nesting depth argument), not shared mutable state toggled around calls.
//! Line numbers are recomputed on every pass and written back silently.

mod declarations;
mod expressions;
mod options;
mod statements;

pub use options::FormatOptions;

use tracing::debug;

use crate::ast::{AstError, AstTree, NodeKind};
use crate::base::{LineNumber, NodeId};

use declarations::*;
use expressions::*;
use statements::*;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Regenerate the complete source text from the tree's root.
pub fn generate_source(tree: &mut AstTree) -> Result<String, AstError> {
    generate_source_with(tree, &FormatOptions::default())
}

/// Regenerate with explicit formatting options (used for synthesized nodes
/// only; captured whitespace always wins).
pub fn generate_source_with(
    tree: &mut AstTree,
    options: &FormatOptions,
) -> Result<String, AstError> {
    let Some(root) = tree.root() else {
        return Ok(String::new());
    };
    let mut generator = Generator::new(tree, options.clone(), true);
    let mut out = String::new();
    emit_node(&mut generator, root, 0, &mut out)?;
    debug!(lines = generator.line.get(), "regenerated source");
    Ok(out)
}

/// Textual form of a single expression, without its preceding whitespace.
/// This is what the text view shows inside an edit box.
pub fn expression_text(tree: &mut AstTree, id: NodeId) -> Result<String, AstError> {
    let kind = tree.kind(id)?;
    if !kind.is_expression() {
        return Err(AstError::MalformedPayload {
            kind,
            detail: "not an expression".into(),
        });
    }
    let mut generator = Generator::new(tree, FormatOptions::default(), false);
    let mut out = String::new();
    emit_node(&mut generator, id, 0, &mut out)?;
    Ok(out.trim_start().to_string())
}

/// Textual form of a single statement for the text view: no preceding
/// indentation, no terminating `;`.
pub fn statement_text(tree: &mut AstTree, id: NodeId) -> Result<String, AstError> {
    let kind = tree.kind(id)?;
    match kind {
        NodeKind::TaskInvocationStatement => task_message_text(tree, id, "->"),
        NodeKind::TaskReplyStatement => task_message_text(tree, id, "<-"),
        kind if kind.is_statement() => {
            let mut generator = Generator::new(tree, FormatOptions::default(), false);
            let mut out = String::new();
            emit_node(&mut generator, id, 0, &mut out)?;
            let trimmed = out.trim();
            Ok(trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end().to_string())
        }
        kind => Err(AstError::MalformedPayload {
            kind,
            detail: "not a statement".into(),
        }),
    }
}

/// `expr[,expr...] arrow taskName` honoring the statement's captured
/// regions: expressions joined with a canonical `,`, the gap before the
/// arrow replayed only when the newest expression is synthesized.
fn task_message_text(tree: &mut AstTree, id: NodeId, arrow: &str) -> Result<String, AstError> {
    use crate::ast::NodePayload;

    let children: Vec<NodeId> = tree.children(id)?.to_vec();
    let mut text = String::new();
    for (position, &child) in children.iter().enumerate() {
        if position > 0 {
            text.push(',');
        }
        text.push_str(&expression_text(tree, child)?);
    }

    let last_is_synthesized = match children.last() {
        Some(&child) => tree.node(child)?.whitespace.use_default,
        None => false,
    };
    if last_is_synthesized {
        text.push_str(&effective_region(tree, id, 1)?);
    }

    let task_name = match &tree.node(id)?.payload {
        NodePayload::TaskInvocationStatement { task_name, .. }
        | NodePayload::TaskReplyStatement { task_name, .. } => task_name.clone(),
        other => {
            return Err(AstError::MalformedPayload {
                kind: other.kind(),
                detail: "not a task messaging statement".into(),
            });
        }
    };
    text.push_str(arrow);
    text.push_str(&effective_region(tree, id, 2)?);
    text.push_str(task_name.as_str());
    text.push_str(&effective_region(tree, id, 3)?);
    Ok(text)
}

fn effective_region(tree: &AstTree, id: NodeId, index: u32) -> Result<String, AstError> {
    let node = tree.node(id)?;
    if node.whitespace.use_default {
        Ok(node
            .kind()
            .default_regions()
            .get(index as usize)
            .copied()
            .unwrap_or("")
            .to_string())
    } else {
        Ok(node.whitespace.region(index).to_string())
    }
}

// ============================================================================
// GENERATOR (explicit formatting context)
// ============================================================================

/// Mutable emission state threaded through the visitor recursion: the tree
/// (for payload reads and line-number writeback), formatting options, and
/// the running line count.
pub(crate) struct Generator<'t> {
    pub(crate) tree: &'t mut AstTree,
    pub(crate) options: FormatOptions,
    line: LineNumber,
    assign_lines: bool,
}

impl<'t> Generator<'t> {
    fn new(tree: &'t mut AstTree, options: FormatOptions, assign_lines: bool) -> Self {
        Self {
            tree,
            options,
            line: LineNumber::default(),
            assign_lines,
        }
    }

    /// Append literal text, keeping the line count current.
    pub(crate) fn push(&mut self, out: &mut String, text: &str) {
        self.line = self.line.advance(text);
        out.push_str(text);
    }

    /// Record the node's position in the source being built. Silent; edits
    /// shift line numbers, so they are recomputed every pass.
    pub(crate) fn mark_line(&mut self, id: NodeId) -> Result<(), AstError> {
        if self.assign_lines {
            self.tree.set_line_number_silent(id, self.line)?;
        }
        Ok(())
    }

    /// Effective region text: captured region when the node replays parsed
    /// whitespace, canonical default otherwise.
    pub(crate) fn ws(&self, id: NodeId, index: u32) -> Result<String, AstError> {
        effective_region(self.tree, id, index)
    }

    /// Like [`ws`](Self::ws), but a canonical region ending in a newline
    /// gets the indentation for `depth` appended. Captured regions are
    /// replayed untouched.
    pub(crate) fn ws_indent(
        &self,
        id: NodeId,
        index: u32,
        depth: usize,
    ) -> Result<String, AstError> {
        let node = self.tree.node(id)?;
        if node.whitespace.use_default {
            let canonical = node
                .kind()
                .default_regions()
                .get(index as usize)
                .copied()
                .unwrap_or("");
            if canonical.ends_with('\n') {
                return Ok(format!("{canonical}{}", self.options.indent(depth)));
            }
            return Ok(canonical.to_string());
        }
        Ok(node.whitespace.region(index).to_string())
    }

    /// Render an identifier, quoting it when the node carries the
    /// identifier-literal flag.
    pub(crate) fn ident(&self, id: NodeId, name: &str) -> Result<String, AstError> {
        if self.tree.node(id)?.is_identifier_literal {
            Ok(format!("\"{name}\""))
        } else {
            Ok(name.to_string())
        }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// A per-kind source emitter. `emit` is begin-visit, child dispatch, and
/// end-visit in one: it appends the node's full text to `out`.
pub(crate) trait SourceGenVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError>;
}

/// Emit one node by looking up its visitor.
pub(crate) fn emit_node(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
) -> Result<(), AstError> {
    let kind = generator.tree.kind(id)?;
    visitor_for(kind).emit(generator, id, depth, out)
}

/// The visitor factory: kind → visitor, one entry per kind.
pub(crate) fn visitor_for(kind: NodeKind) -> &'static dyn SourceGenVisitor {
    match kind {
        NodeKind::SourceFile => &SourceFileVisitor,
        NodeKind::PackageDeclaration => &PackageDeclarationVisitor,
        NodeKind::ImportDeclaration => &ImportDeclarationVisitor,
        NodeKind::ServiceDefinition => &ServiceDefinitionVisitor,
        NodeKind::ResourceDefinition => &ResourceDefinitionVisitor,
        NodeKind::FunctionDefinition => &FunctionDefinitionVisitor,
        NodeKind::ConnectorDefinition => &ConnectorDefinitionVisitor,
        NodeKind::ConnectorAction => &ConnectorActionVisitor,
        NodeKind::ConnectorDeclaration => &ConnectorDeclarationVisitor,
        NodeKind::TaskDeclaration => &TaskDeclarationVisitor,
        NodeKind::StructDefinition => &StructDefinitionVisitor,
        NodeKind::ConstantDefinition => &ConstantDefinitionVisitor,
        NodeKind::GlobalVariableDefinition => &GlobalVariableDefinitionVisitor,
        NodeKind::ParameterDefinition => &ParameterDefinitionVisitor,
        NodeKind::ArgumentParameterList => &ArgumentParameterListVisitor,
        NodeKind::ReturnParameterList => &ReturnParameterListVisitor,
        NodeKind::AnnotationAttachment => &AnnotationAttachmentVisitor,
        NodeKind::VariableDeclaration => &VariableDeclarationVisitor,
        NodeKind::VariableDefinitionStatement => &VariableDefinitionStatementVisitor,
        NodeKind::AssignmentStatement => &AssignmentStatementVisitor,
        NodeKind::IfElseStatement => &IfElseStatementVisitor,
        NodeKind::IfStatement => &IfStatementVisitor,
        NodeKind::ElseIfStatement => &ElseIfStatementVisitor,
        NodeKind::ElseStatement => &ElseStatementVisitor,
        NodeKind::WhileStatement => &WhileStatementVisitor,
        NodeKind::BreakStatement => &BreakStatementVisitor,
        NodeKind::ContinueStatement => &ContinueStatementVisitor,
        NodeKind::ReturnStatement => &ReturnStatementVisitor,
        NodeKind::ReplyStatement => &ReplyStatementVisitor,
        NodeKind::ThrowStatement => &ThrowStatementVisitor,
        NodeKind::TryCatchStatement => &TryCatchStatementVisitor,
        NodeKind::TryStatement => &TryStatementVisitor,
        NodeKind::CatchStatement => &CatchStatementVisitor,
        NodeKind::FinallyStatement => &FinallyStatementVisitor,
        NodeKind::TaskInvocationStatement => &TaskInvocationStatementVisitor,
        NodeKind::TaskReplyStatement => &TaskReplyStatementVisitor,
        NodeKind::ExpressionStatement => &ExpressionStatementVisitor,
        NodeKind::CommentStatement => &CommentStatementVisitor,
        NodeKind::LiteralExpression => &LiteralExpressionVisitor,
        NodeKind::VariableReferenceExpression => &VariableReferenceExpressionVisitor,
        NodeKind::BinaryExpression => &BinaryExpressionVisitor,
        NodeKind::UnaryExpression => &UnaryExpressionVisitor,
        NodeKind::FunctionInvocationExpression => &FunctionInvocationExpressionVisitor,
        NodeKind::ActionInvocationExpression => &ActionInvocationExpressionVisitor,
        NodeKind::FieldAccessExpression => &FieldAccessExpressionVisitor,
        NodeKind::IndexAccessExpression => &IndexAccessExpressionVisitor,
        NodeKind::ArrayInitExpression => &ArrayInitExpressionVisitor,
        NodeKind::KeyValueExpression => &KeyValueExpressionVisitor,
        NodeKind::MapInitExpression => &MapInitExpressionVisitor,
        NodeKind::TypeCastExpression => &TypeCastExpressionVisitor,
        NodeKind::ConnectorInitExpression => &ConnectorInitExpressionVisitor,
    }
}

// ============================================================================
// SHARED EMISSION HELPERS
// ============================================================================

/// Emit every child for which `include` holds, in child order.
pub(crate) fn emit_children_where(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
    include: impl Fn(NodeKind) -> bool,
) -> Result<(), AstError> {
    let children: Vec<NodeId> = generator.tree.children(id)?.to_vec();
    for child in children {
        if include(generator.tree.kind(child)?) {
            emit_node(generator, child, depth, out)?;
        }
    }
    Ok(())
}

/// Kinds a block construct emits in its header rather than its body.
pub(crate) fn is_header_kind(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::AnnotationAttachment
            | NodeKind::ArgumentParameterList
            | NodeKind::ReturnParameterList
    )
}

/// Emit the body members of a block construct: every child that is not a
/// header child and not an expression (conditions are emitted by the
/// header).
pub(crate) fn emit_body(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
) -> Result<(), AstError> {
    emit_children_where(generator, id, depth, out, |kind| {
        !is_header_kind(kind) && !kind.is_expression()
    })
}

/// First expression child, if any (the condition slot of `if` / `while`).
pub(crate) fn first_expression(
    generator: &Generator<'_>,
    id: NodeId,
) -> Result<Option<NodeId>, AstError> {
    for &child in generator.tree.children(id)? {
        if generator.tree.kind(child)?.is_expression() {
            return Ok(Some(child));
        }
    }
    Ok(None)
}

/// All expression children, in order.
pub(crate) fn expression_children(
    generator: &Generator<'_>,
    id: NodeId,
) -> Result<Vec<NodeId>, AstError> {
    let mut expressions = Vec::new();
    for &child in generator.tree.children(id)? {
        if generator.tree.kind(child)?.is_expression() {
            expressions.push(child);
        }
    }
    Ok(expressions)
}

/// Emit a list of nodes joined with a literal `,`. Each node carries its
/// own preceding region; a synthesized node would otherwise fuse against
/// the preceding token, so it gets `lead_gap` in first position and
/// `sep_gap` after a comma.
pub(crate) fn emit_separated(
    generator: &mut Generator<'_>,
    children: &[NodeId],
    depth: usize,
    out: &mut String,
    lead_gap: &str,
    sep_gap: &str,
) -> Result<(), AstError> {
    for (position, &child) in children.iter().enumerate() {
        let gap = if position > 0 {
            generator.push(out, ",");
            sep_gap
        } else {
            lead_gap
        };
        if !gap.is_empty() && generator.tree.node(child)?.whitespace.use_default {
            generator.push(out, gap);
        }
        emit_node(generator, child, depth, out)?;
    }
    Ok(())
}

/// Error for a payload that does not match its node's kind; the tree
/// enforces agreement on insertion, so reaching this means memory was
/// corrupted through a non-API path.
pub(crate) fn payload_mismatch(payload: &crate::ast::NodePayload) -> AstError {
    AstError::MalformedPayload {
        kind: payload.kind(),
        detail: "payload does not match node kind".into(),
    }
}
