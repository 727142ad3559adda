//! Visitors for expression constructs.
//!
//! Expressions never indent; region 0 is the gap before the expression's
//! first token and the remaining regions are kind-specific token gaps.

use crate::ast::{AstError, NodeKind, NodePayload};
use crate::base::NodeId;

use super::{
    Generator, SourceGenVisitor, emit_node, emit_separated, expression_children, payload_mismatch,
};

fn operands(generator: &Generator<'_>, id: NodeId, expected: usize) -> Result<Vec<NodeId>, AstError> {
    let expressions = expression_children(generator, id)?;
    if expressions.len() != expected {
        return Err(AstError::MalformedPayload {
            kind: generator.tree.kind(id)?,
            detail: format!("expected {expected} operand(s), found {}", expressions.len()),
        });
    }
    Ok(expressions)
}

pub(crate) struct LiteralExpressionVisitor;

impl SourceGenVisitor for LiteralExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        _depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::LiteralExpression { lexeme, .. } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, lexeme.as_str());
        Ok(())
    }
}

pub(crate) struct VariableReferenceExpressionVisitor;

impl SourceGenVisitor for VariableReferenceExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        _depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::VariableReferenceExpression { variable_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        let rendered = generator.ident(id, variable_name.as_str())?;
        generator.push(out, &rendered);
        Ok(())
    }
}

pub(crate) struct BinaryExpressionVisitor;

impl SourceGenVisitor for BinaryExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::BinaryExpression { operator } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let sides = operands(generator, id, 2)?;
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        emit_node(generator, sides[0], depth, out)?;
        let before_op = generator.ws(id, 1)?;
        generator.push(out, &before_op);
        generator.push(out, operator.as_str());
        emit_separated(generator, &sides[1..], depth, out, " ", " ")?;
        Ok(())
    }
}

pub(crate) struct UnaryExpressionVisitor;

impl SourceGenVisitor for UnaryExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::UnaryExpression { operator } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let operand = operands(generator, id, 1)?;
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, operator.as_str());
        let after_op = generator.ws(id, 1)?;
        generator.push(out, &after_op);
        emit_node(generator, operand[0], depth, out)
    }
}

pub(crate) struct FunctionInvocationExpressionVisitor;

impl SourceGenVisitor for FunctionInvocationExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::FunctionInvocationExpression {
            package_name,
            function_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        if let Some(package) = package_name {
            generator.push(out, package.as_str());
            generator.push(out, ":");
        }
        generator.push(out, function_name.as_str());
        let before_parens = generator.ws(id, 1)?;
        generator.push(out, &before_parens);
        generator.push(out, "(");
        let arguments = expression_children(generator, id)?;
        emit_separated(generator, &arguments, depth, out, "", " ")?;
        let before_close = generator.ws(id, 2)?;
        generator.push(out, &before_close);
        generator.push(out, ")");
        Ok(())
    }
}

pub(crate) struct ActionInvocationExpressionVisitor;

impl SourceGenVisitor for ActionInvocationExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ActionInvocationExpression {
            connector_name,
            action_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, connector_name.as_str());
        generator.push(out, ".");
        generator.push(out, action_name.as_str());
        let before_parens = generator.ws(id, 1)?;
        generator.push(out, &before_parens);
        generator.push(out, "(");
        let arguments = expression_children(generator, id)?;
        emit_separated(generator, &arguments, depth, out, "", " ")?;
        let before_close = generator.ws(id, 2)?;
        generator.push(out, &before_close);
        generator.push(out, ")");
        Ok(())
    }
}

pub(crate) struct FieldAccessExpressionVisitor;

impl SourceGenVisitor for FieldAccessExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::FieldAccessExpression { field_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let base = operands(generator, id, 1)?;
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        emit_node(generator, base[0], depth, out)?;
        let before_dot = generator.ws(id, 1)?;
        generator.push(out, &before_dot);
        generator.push(out, ".");
        generator.push(out, field_name.as_str());
        Ok(())
    }
}

pub(crate) struct IndexAccessExpressionVisitor;

impl SourceGenVisitor for IndexAccessExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let parts = operands(generator, id, 2)?;
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        emit_node(generator, parts[0], depth, out)?;
        let before_bracket = generator.ws(id, 1)?;
        generator.push(out, &before_bracket);
        generator.push(out, "[");
        emit_node(generator, parts[1], depth, out)?;
        generator.push(out, "]");
        Ok(())
    }
}

pub(crate) struct ArrayInitExpressionVisitor;

impl SourceGenVisitor for ArrayInitExpressionVisitor {
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
        generator.push(out, "[");
        let elements = expression_children(generator, id)?;
        emit_separated(generator, &elements, depth, out, "", " ")?;
        let before_close = generator.ws(id, 1)?;
        generator.push(out, &before_close);
        generator.push(out, "]");
        Ok(())
    }
}

pub(crate) struct KeyValueExpressionVisitor;

impl SourceGenVisitor for KeyValueExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::KeyValueExpression { key } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let value = operands(generator, id, 1)?;
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, key.as_str());
        let before_colon = generator.ws(id, 1)?;
        generator.push(out, &before_colon);
        generator.push(out, ":");
        emit_separated(generator, &value, depth, out, " ", " ")?;
        Ok(())
    }
}

pub(crate) struct MapInitExpressionVisitor;

impl SourceGenVisitor for MapInitExpressionVisitor {
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
        generator.push(out, "{");
        let entries: Vec<NodeId> = generator
            .tree
            .children(id)?
            .iter()
            .copied()
            .filter(|&child| {
                generator
                    .tree
                    .kind(child)
                    .is_ok_and(|kind| kind == NodeKind::KeyValueExpression)
            })
            .collect();
        emit_separated(generator, &entries, depth, out, "", " ")?;
        let before_close = generator.ws(id, 1)?;
        generator.push(out, &before_close);
        generator.push(out, "}");
        Ok(())
    }
}

pub(crate) struct TypeCastExpressionVisitor;

impl SourceGenVisitor for TypeCastExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::TypeCastExpression { target_type } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let operand = operands(generator, id, 1)?;
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "(");
        generator.push(out, target_type.as_str());
        generator.push(out, ")");
        let after_cast = generator.ws(id, 1)?;
        generator.push(out, &after_cast);
        emit_node(generator, operand[0], depth, out)
    }
}

pub(crate) struct ConnectorInitExpressionVisitor;

impl SourceGenVisitor for ConnectorInitExpressionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ConnectorInitExpression { connector_type } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "create");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, connector_type.as_str());
        let before_parens = generator.ws(id, 2)?;
        generator.push(out, &before_parens);
        generator.push(out, "(");
        let arguments = expression_children(generator, id)?;
        emit_separated(generator, &arguments, depth, out, "", " ")?;
        let before_close = generator.ws(id, 3)?;
        generator.push(out, &before_close);
        generator.push(out, ")");
        Ok(())
    }
}
