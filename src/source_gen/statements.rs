//! Visitors for statement-level constructs.

use crate::ast::{AstError, NodeKind, NodePayload};
use crate::base::NodeId;

use super::{
    Generator, SourceGenVisitor, emit_body, emit_children_where, emit_node, emit_separated,
    first_expression, expression_children, payload_mismatch,
};

// ============================================================================
// SIMPLE STATEMENTS
// ============================================================================

pub(crate) struct VariableDefinitionStatementVisitor;

impl SourceGenVisitor for VariableDefinitionStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::VariableDefinitionStatement {
            type_name,
            variable_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, type_name.as_str());
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        let rendered = generator.ident(id, variable_name.as_str())?;
        generator.push(out, &rendered);
        if let Some(value) = first_expression(generator, id)? {
            let before_eq = generator.ws(id, 2)?;
            generator.push(out, &before_eq);
            generator.push(out, "=");
            let after_eq = generator.ws(id, 3)?;
            generator.push(out, &after_eq);
            emit_node(generator, value, depth, out)?;
        }
        let before_semi = generator.ws(id, 4)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 5)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct AssignmentStatementVisitor;

impl SourceGenVisitor for AssignmentStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let expressions = expression_children(generator, id)?;
        let (target, value) = match expressions.as_slice() {
            [target, value] => (*target, *value),
            _ => {
                return Err(AstError::MalformedPayload {
                    kind: NodeKind::AssignmentStatement,
                    detail: "expected a target and a value expression".into(),
                });
            }
        };
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        emit_node(generator, target, depth, out)?;
        let before_eq = generator.ws(id, 1)?;
        generator.push(out, &before_eq);
        generator.push(out, "=");
        let after_eq = generator.ws(id, 2)?;
        generator.push(out, &after_eq);
        emit_node(generator, value, depth, out)?;
        let before_semi = generator.ws(id, 3)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 4)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct ExpressionStatementVisitor;

impl SourceGenVisitor for ExpressionStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        if let Some(expression) = first_expression(generator, id)? {
            emit_node(generator, expression, depth, out)?;
        }
        let before_semi = generator.ws(id, 1)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 2)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct CommentStatementVisitor;

impl SourceGenVisitor for CommentStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::CommentStatement { comment } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, comment.as_str());
        let trailing = generator.ws(id, 1)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

/// `break` / `continue`: bare keyword, regions 0 pre, 1 before `;`,
/// 2 trailing.
fn emit_keyword_statement(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
    keyword: &str,
) -> Result<(), AstError> {
    let pre = generator.ws_indent(id, 0, depth)?;
    generator.push(out, &pre);
    generator.mark_line(id)?;
    generator.push(out, keyword);
    let expressions = expression_children(generator, id)?;
    emit_separated(generator, &expressions, depth, out, " ", " ")?;
    let before_semi = generator.ws(id, 1)?;
    generator.push(out, &before_semi);
    generator.push(out, ";");
    let trailing = generator.ws(id, 2)?;
    generator.push(out, &trailing);
    Ok(())
}

pub(crate) struct BreakStatementVisitor;

impl SourceGenVisitor for BreakStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        emit_keyword_statement(generator, id, depth, out, "break")
    }
}

pub(crate) struct ContinueStatementVisitor;

impl SourceGenVisitor for ContinueStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        emit_keyword_statement(generator, id, depth, out, "continue")
    }
}

pub(crate) struct ReturnStatementVisitor;

impl SourceGenVisitor for ReturnStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        emit_keyword_statement(generator, id, depth, out, "return")
    }
}

pub(crate) struct ReplyStatementVisitor;

impl SourceGenVisitor for ReplyStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        emit_keyword_statement(generator, id, depth, out, "reply")
    }
}

pub(crate) struct ThrowStatementVisitor;

impl SourceGenVisitor for ThrowStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        emit_keyword_statement(generator, id, depth, out, "throw")
    }
}

// ============================================================================
// BRANCHING
// ============================================================================

pub(crate) struct IfElseStatementVisitor;

impl SourceGenVisitor for IfElseStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        emit_children_where(generator, id, depth, out, |_| true)?;
        let trailing = generator.ws(id, 1)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

/// A braced clause body shared by the `if` family, `while`, and the `try`
/// family: `{` + after-brace region + statements + before-close region
/// (indented) + `}`.
fn emit_clause_body(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
    after_brace: u32,
    before_close: u32,
) -> Result<(), AstError> {
    generator.push(out, "{");
    let gap = generator.ws(id, after_brace)?;
    generator.push(out, &gap);
    emit_body(generator, id, depth + 1, out)?;
    let gap = generator.ws_indent(id, before_close, depth)?;
    generator.push(out, &gap);
    generator.push(out, "}");
    Ok(())
}

pub(crate) struct IfStatementVisitor;

impl SourceGenVisitor for IfStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "if");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, "(");
        if let Some(condition) = first_expression(generator, id)? {
            emit_node(generator, condition, depth, out)?;
        }
        generator.push(out, ")");
        let before_brace = generator.ws(id, 2)?;
        generator.push(out, &before_brace);
        emit_clause_body(generator, id, depth, out, 3, 4)
    }
}

pub(crate) struct ElseIfStatementVisitor;

impl SourceGenVisitor for ElseIfStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "else");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, "if");
        let gap = generator.ws(id, 2)?;
        generator.push(out, &gap);
        generator.push(out, "(");
        if let Some(condition) = first_expression(generator, id)? {
            emit_node(generator, condition, depth, out)?;
        }
        generator.push(out, ")");
        let before_brace = generator.ws(id, 3)?;
        generator.push(out, &before_brace);
        emit_clause_body(generator, id, depth, out, 4, 5)
    }
}

pub(crate) struct ElseStatementVisitor;

impl SourceGenVisitor for ElseStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "else");
        let before_brace = generator.ws(id, 1)?;
        generator.push(out, &before_brace);
        emit_clause_body(generator, id, depth, out, 2, 3)
    }
}

pub(crate) struct WhileStatementVisitor;

impl SourceGenVisitor for WhileStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "while");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, "(");
        if let Some(condition) = first_expression(generator, id)? {
            emit_node(generator, condition, depth, out)?;
        }
        generator.push(out, ")");
        let before_brace = generator.ws(id, 2)?;
        generator.push(out, &before_brace);
        emit_clause_body(generator, id, depth, out, 3, 4)?;
        let trailing = generator.ws(id, 5)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

pub(crate) struct TryCatchStatementVisitor;

impl SourceGenVisitor for TryCatchStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        emit_children_where(generator, id, depth, out, |_| true)?;
        let trailing = generator.ws(id, 1)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct TryStatementVisitor;

impl SourceGenVisitor for TryStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "try");
        let before_brace = generator.ws(id, 1)?;
        generator.push(out, &before_brace);
        emit_clause_body(generator, id, depth, out, 2, 3)
    }
}

pub(crate) struct CatchStatementVisitor;

impl SourceGenVisitor for CatchStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::CatchStatement {
            error_type,
            error_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "catch");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, "(");
        generator.push(out, error_type.as_str());
        let gap = generator.ws(id, 2)?;
        generator.push(out, &gap);
        generator.push(out, error_name.as_str());
        let before_close = generator.ws(id, 3)?;
        generator.push(out, &before_close);
        generator.push(out, ")");
        let before_brace = generator.ws(id, 4)?;
        generator.push(out, &before_brace);
        emit_clause_body(generator, id, depth, out, 5, 6)
    }
}

pub(crate) struct FinallyStatementVisitor;

impl SourceGenVisitor for FinallyStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "finally");
        let before_brace = generator.ws(id, 1)?;
        generator.push(out, &before_brace);
        emit_clause_body(generator, id, depth, out, 2, 3)
    }
}

// ============================================================================
// TASK MESSAGING
// ============================================================================

/// `expr[,expr...] -> name;` and its `<-` mirror. Regions 0 pre, 1 before
/// the arrow, 2 after the arrow, 3 after the name, 4 trailing.
fn emit_task_message(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
    arrow: &str,
    task_name: &str,
) -> Result<(), AstError> {
    let pre = generator.ws_indent(id, 0, depth)?;
    generator.push(out, &pre);
    generator.mark_line(id)?;
    let expressions = expression_children(generator, id)?;
    emit_separated(generator, &expressions, depth, out, "", "")?;
    let before_arrow = generator.ws(id, 1)?;
    generator.push(out, &before_arrow);
    generator.push(out, arrow);
    let after_arrow = generator.ws(id, 2)?;
    generator.push(out, &after_arrow);
    generator.push(out, task_name);
    let before_semi = generator.ws(id, 3)?;
    generator.push(out, &before_semi);
    generator.push(out, ";");
    let trailing = generator.ws(id, 4)?;
    generator.push(out, &trailing);
    Ok(())
}

pub(crate) struct TaskInvocationStatementVisitor;

impl SourceGenVisitor for TaskInvocationStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::TaskInvocationStatement { task_name, .. } = payload else {
            return Err(payload_mismatch(&payload));
        };
        emit_task_message(generator, id, depth, out, "->", task_name.as_str())
    }
}

pub(crate) struct TaskReplyStatementVisitor;

impl SourceGenVisitor for TaskReplyStatementVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::TaskReplyStatement { task_name, .. } = payload else {
            return Err(payload_mismatch(&payload));
        };
        emit_task_message(generator, id, depth, out, "<-", task_name.as_str())
    }
}
