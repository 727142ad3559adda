//! Visitors for declaration-level constructs.

use crate::ast::{AstError, NodeKind, NodePayload};
use crate::base::NodeId;

use super::{
    Generator, SourceGenVisitor, emit_body, emit_children_where, emit_node, emit_separated,
    expression_children, payload_mismatch,
};

// ============================================================================
// FILE LEVEL
// ============================================================================

pub(crate) struct SourceFileVisitor;

impl SourceGenVisitor for SourceFileVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        generator.mark_line(id)?;
        emit_children_where(generator, id, depth, out, |_| true)
    }
}

pub(crate) struct PackageDeclarationVisitor;

impl SourceGenVisitor for PackageDeclarationVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        _depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::PackageDeclaration { package_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "package");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, package_name.as_str());
        let before_semi = generator.ws(id, 2)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 3)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct ImportDeclarationVisitor;

impl SourceGenVisitor for ImportDeclarationVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        _depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ImportDeclaration {
            package_path,
            as_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "import");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, package_path.as_str());
        if let Some(alias) = as_name {
            let before_as = generator.ws(id, 2)?;
            generator.push(out, &before_as);
            generator.push(out, "as");
            let after_as = generator.ws(id, 3)?;
            generator.push(out, &after_as);
            generator.push(out, alias.as_str());
        }
        let before_semi = generator.ws(id, 4)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 5)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

// ============================================================================
// BLOCK DECLARATIONS (keyword name { ... })
// ============================================================================

/// Shared shape for `service` / `task` / `struct`: annotations, then
/// `keyword name {`, body members, `}`. Regions 0 pre, 1 after keyword,
/// 2 before `{`, 3 after `{`, 4 before `}`, 5 trailing.
fn emit_block_declaration(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
    keyword: &str,
    name: &str,
) -> Result<(), AstError> {
    emit_children_where(generator, id, depth, out, |kind| {
        kind == NodeKind::AnnotationAttachment
    })?;
    let pre = generator.ws_indent(id, 0, depth)?;
    generator.push(out, &pre);
    generator.mark_line(id)?;
    generator.push(out, keyword);
    let gap = generator.ws(id, 1)?;
    generator.push(out, &gap);
    let rendered = generator.ident(id, name)?;
    generator.push(out, &rendered);
    let before_brace = generator.ws(id, 2)?;
    generator.push(out, &before_brace);
    generator.push(out, "{");
    let after_brace = generator.ws(id, 3)?;
    generator.push(out, &after_brace);
    emit_body(generator, id, depth + 1, out)?;
    let before_close = generator.ws_indent(id, 4, depth)?;
    generator.push(out, &before_close);
    generator.push(out, "}");
    let trailing = generator.ws(id, 5)?;
    generator.push(out, &trailing);
    Ok(())
}

pub(crate) struct ServiceDefinitionVisitor;

impl SourceGenVisitor for ServiceDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ServiceDefinition { service_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        emit_block_declaration(generator, id, depth, out, "service", service_name.as_str())
    }
}

pub(crate) struct TaskDeclarationVisitor;

impl SourceGenVisitor for TaskDeclarationVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::TaskDeclaration {
            task_name,
            is_default,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        // The default task is the enclosing callable's own execution line;
        // its statements print inline, with no wrapper of their own.
        if is_default {
            generator.mark_line(id)?;
            return emit_body(generator, id, depth, out);
        }
        emit_block_declaration(generator, id, depth, out, "task", task_name.as_str())
    }
}

pub(crate) struct StructDefinitionVisitor;

impl SourceGenVisitor for StructDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::StructDefinition { struct_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        emit_block_declaration(generator, id, depth, out, "struct", struct_name.as_str())
    }
}

// ============================================================================
// CALLABLES (keyword name(params)(returns) { ... })
// ============================================================================

/// Shared shape for `resource` / `function` / `connector` / `action`.
/// Regions 0 pre, 1 after visibility, 2 after keyword, 3 before parens,
/// 4 before body, 5 after `{`, 6 before `}`, 7 trailing.
fn emit_callable(
    generator: &mut Generator<'_>,
    id: NodeId,
    depth: usize,
    out: &mut String,
    visibility: Option<&str>,
    keyword: &str,
    name: &str,
) -> Result<(), AstError> {
    emit_children_where(generator, id, depth, out, |kind| {
        kind == NodeKind::AnnotationAttachment
    })?;
    let pre = generator.ws_indent(id, 0, depth)?;
    generator.push(out, &pre);
    generator.mark_line(id)?;
    if let Some(modifier) = visibility {
        generator.push(out, modifier);
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
    }
    generator.push(out, keyword);
    let gap = generator.ws(id, 2)?;
    generator.push(out, &gap);
    let rendered = generator.ident(id, name)?;
    generator.push(out, &rendered);
    let before_parens = generator.ws(id, 3)?;
    generator.push(out, &before_parens);
    generator.push(out, "(");
    let arguments = generator
        .tree
        .find_child(id, |node| node.kind() == NodeKind::ArgumentParameterList)?;
    if let Some(arguments) = arguments {
        emit_node(generator, arguments, depth, out)?;
    }
    generator.push(out, ")");
    let returns = generator
        .tree
        .find_child(id, |node| node.kind() == NodeKind::ReturnParameterList)?;
    if let Some(returns) = returns {
        emit_node(generator, returns, depth, out)?;
    }
    let before_body = generator.ws(id, 4)?;
    generator.push(out, &before_body);
    generator.push(out, "{");
    let after_brace = generator.ws(id, 5)?;
    generator.push(out, &after_brace);
    emit_body(generator, id, depth + 1, out)?;
    let before_close = generator.ws_indent(id, 6, depth)?;
    generator.push(out, &before_close);
    generator.push(out, "}");
    let trailing = generator.ws(id, 7)?;
    generator.push(out, &trailing);
    Ok(())
}

pub(crate) struct ResourceDefinitionVisitor;

impl SourceGenVisitor for ResourceDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ResourceDefinition { resource_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        emit_callable(
            generator,
            id,
            depth,
            out,
            None,
            "resource",
            resource_name.as_str(),
        )
    }
}

pub(crate) struct FunctionDefinitionVisitor;

impl SourceGenVisitor for FunctionDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::FunctionDefinition {
            function_name,
            is_public,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let visibility = if is_public { Some("public") } else { None };
        emit_callable(
            generator,
            id,
            depth,
            out,
            visibility,
            "function",
            function_name.as_str(),
        )
    }
}

pub(crate) struct ConnectorDefinitionVisitor;

impl SourceGenVisitor for ConnectorDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ConnectorDefinition { connector_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        emit_callable(
            generator,
            id,
            depth,
            out,
            None,
            "connector",
            connector_name.as_str(),
        )
    }
}

pub(crate) struct ConnectorActionVisitor;

impl SourceGenVisitor for ConnectorActionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ConnectorAction { action_name } = payload else {
            return Err(payload_mismatch(&payload));
        };
        emit_callable(generator, id, depth, out, None, "action", action_name.as_str())
    }
}

// ============================================================================
// MEMBER DECLARATIONS
// ============================================================================

pub(crate) struct ConnectorDeclarationVisitor;

impl SourceGenVisitor for ConnectorDeclarationVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ConnectorDeclaration {
            connector_type,
            variable_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, connector_type.as_str());
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, variable_name.as_str());
        let init = expression_children(generator, id)?;
        if let Some(&init) = init.first() {
            let before_eq = generator.ws(id, 2)?;
            generator.push(out, &before_eq);
            generator.push(out, "=");
            emit_node(generator, init, depth, out)?;
        }
        let before_semi = generator.ws(id, 3)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 4)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct ConstantDefinitionVisitor;

impl SourceGenVisitor for ConstantDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        _depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ConstantDefinition {
            value_type,
            constant_name,
            value,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "const");
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, value_type.as_str());
        let gap = generator.ws(id, 2)?;
        generator.push(out, &gap);
        generator.push(out, constant_name.as_str());
        let before_eq = generator.ws(id, 3)?;
        generator.push(out, &before_eq);
        generator.push(out, "=");
        let after_eq = generator.ws(id, 4)?;
        generator.push(out, &after_eq);
        generator.push(out, value.as_str());
        let before_semi = generator.ws(id, 5)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 6)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct GlobalVariableDefinitionVisitor;

impl SourceGenVisitor for GlobalVariableDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::GlobalVariableDefinition {
            value_type,
            variable_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, value_type.as_str());
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, variable_name.as_str());
        let init = expression_children(generator, id)?;
        if let Some(&init) = init.first() {
            let before_eq = generator.ws(id, 2)?;
            generator.push(out, &before_eq);
            generator.push(out, "=");
            emit_separated(generator, &[init], depth, out, " ", " ")?;
        }
        let before_semi = generator.ws(id, 3)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 4)?;
        generator.push(out, &trailing);
        Ok(())
    }
}

pub(crate) struct ParameterDefinitionVisitor;

impl SourceGenVisitor for ParameterDefinitionVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        _depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::ParameterDefinition {
            type_name,
            parameter_name,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.push(out, type_name.as_str());
        let gap = generator.ws(id, 1)?;
        generator.push(out, &gap);
        generator.push(out, parameter_name.as_str());
        Ok(())
    }
}

pub(crate) struct ArgumentParameterListVisitor;

impl SourceGenVisitor for ArgumentParameterListVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let parameters: Vec<NodeId> = generator.tree.children(id)?.to_vec();
        emit_separated(generator, &parameters, depth, out, "", " ")
    }
}

pub(crate) struct ReturnParameterListVisitor;

impl SourceGenVisitor for ReturnParameterListVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let pre = generator.ws(id, 0)?;
        generator.push(out, &pre);
        generator.push(out, "(");
        let parameters: Vec<NodeId> = generator.tree.children(id)?.to_vec();
        emit_separated(generator, &parameters, depth, out, "", " ")?;
        let before_close = generator.ws(id, 1)?;
        generator.push(out, &before_close);
        generator.push(out, ")");
        Ok(())
    }
}

pub(crate) struct AnnotationAttachmentVisitor;

impl SourceGenVisitor for AnnotationAttachmentVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::AnnotationAttachment {
            annotation_name,
            value,
        } = payload
        else {
            return Err(payload_mismatch(&payload));
        };
        let pre = generator.ws_indent(id, 0, depth)?;
        generator.push(out, &pre);
        generator.mark_line(id)?;
        generator.push(out, "@");
        generator.push(out, annotation_name.as_str());
        if let Some(value) = value {
            let before_parens = generator.ws(id, 1)?;
            generator.push(out, &before_parens);
            generator.push(out, "(");
            generator.push(out, value.as_str());
            generator.push(out, ")");
        }
        Ok(())
    }
}

pub(crate) struct VariableDeclarationVisitor;

impl SourceGenVisitor for VariableDeclarationVisitor {
    fn emit(
        &self,
        generator: &mut Generator<'_>,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) -> Result<(), AstError> {
        let payload = generator.tree.node(id)?.payload.clone();
        let NodePayload::VariableDeclaration {
            type_name,
            identifier,
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
        let rendered = generator.ident(id, identifier.as_str())?;
        generator.push(out, &rendered);
        let before_semi = generator.ws(id, 2)?;
        generator.push(out, &before_semi);
        generator.push(out, ";");
        let trailing = generator.ws(id, 3)?;
        generator.push(out, &trailing);
        Ok(())
    }
}
