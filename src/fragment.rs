//! Free-text edit bridge.
//!
//! The text view lets a user retype a statement as free-form source. The
//! external fragment parser re-derives a tagged payload from that text;
//! this module applies it back to the node **atomically**: either the node
//! is fully re-hydrated in place (keeping its identity, so diagram
//! references survive) and one `CustomEdit` notification fires, or nothing
//! changes and the diagnostics are returned.
//!
//! Parsing is asynchronous from the editor's point of view. A caller takes
//! an [`EditTicket`] before dispatching the parse; a completion that
//! arrives after the node changed or was removed is rejected as
//! [`AstError::StaleEdit`] rather than applied out of order. A newer edit
//! supersedes an older in-flight one by construction: the older ticket's
//! version no longer matches.

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ast::{
    AstError, AstTree, Diagnostic, NodePayload, TreeEvent, TreeEventKind, edits, factory,
};
use crate::base::NodeId;

/// Result of the external fragment parser.
#[derive(Debug, Clone)]
pub enum FragmentOutcome {
    /// A tagged wire-format payload for the re-parsed statement.
    Parsed(Value),
    /// The text did not parse; no payload is available.
    Failed(Vec<Diagnostic>),
}

/// External collaborator that turns free-form statement text back into the
/// tagged wire format. Production wires this to the parser process; tests
/// use an in-crate fake.
pub trait FragmentParser {
    fn parse_statement(&self, text: &str) -> FragmentOutcome;
}

/// Capture of a node's identity and version at the moment an edit was
/// requested. Applying a parsed fragment requires a live, unmoved ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTicket {
    node: NodeId,
    identity: Uuid,
    version: u64,
}

impl EditTicket {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Issue a ticket for a pending free-text edit of `node`.
pub fn edit_ticket(tree: &AstTree, node: NodeId) -> Result<EditTicket, AstError> {
    let data = tree.node(node)?;
    Ok(EditTicket {
        node,
        identity: data.id,
        version: data.version(),
    })
}

/// Synchronous convenience path: parse `text` and apply it to `node` in one
/// call. Equivalent to taking a ticket and applying the outcome
/// immediately.
pub fn set_statement_from_string(
    tree: &mut AstTree,
    node: NodeId,
    text: &str,
    parser: &dyn FragmentParser,
) -> Result<(), AstError> {
    let ticket = edit_ticket(tree, node)?;
    match parser.parse_statement(text) {
        FragmentOutcome::Parsed(payload) => apply_parsed_fragment(tree, ticket, &payload),
        FragmentOutcome::Failed(diagnostics) => {
            warn!(count = diagnostics.len(), "fragment parse rejected edit");
            Err(AstError::FragmentParse { diagnostics })
        }
    }
}

/// Apply a parsed fragment to the node captured by `ticket`.
///
/// Replace-or-reject semantics: the payload is first hydrated into a
/// detached scratch subtree, so any hydration error (unknown tag, wrong
/// statement kind, malformed attributes) aborts with the original node
/// byte-for-byte intact.
pub fn apply_parsed_fragment(
    tree: &mut AstTree,
    ticket: EditTicket,
    payload: &Value,
) -> Result<(), AstError> {
    // Stale-completion guard: the node must still exist, be the same node,
    // and not have been edited since the ticket was issued.
    if !tree.contains(ticket.node) {
        return Err(AstError::StaleEdit);
    }
    let current = tree.node(ticket.node)?;
    if current.id != ticket.identity || current.version() != ticket.version {
        return Err(AstError::StaleEdit);
    }
    let expected_kind = current.kind();

    // Validate by hydrating into scratch; roll the arena back on failure.
    let watermark = tree.watermark();
    let scratch = match factory::create_from_json(tree, payload) {
        Ok(scratch) => scratch,
        Err(err) => {
            tree.rollback_to(watermark);
            return Err(err);
        }
    };
    if tree.kind(scratch)? != expected_kind {
        let tag = tree.kind(scratch)?.tag().to_string();
        tree.rollback_to(watermark);
        return Err(AstError::UnknownNodeKind { tag });
    }

    // Commit: move the scratch node's state onto the live node, keeping the
    // live node's identity.
    tree.clear_children(ticket.node)?;

    let scratch_node = tree.node_mut(scratch)?;
    let payload_value = std::mem::replace(
        &mut scratch_node.payload,
        NodePayload::empty(expected_kind),
    );
    let whitespace = std::mem::take(&mut scratch_node.whitespace);
    let line_number = scratch_node.line_number;
    let is_identifier_literal = scratch_node.is_identifier_literal;
    let children = std::mem::take(scratch_node.children_mut());

    let node = tree.node_mut(ticket.node)?;
    node.payload = payload_value;
    node.whitespace = whitespace;
    node.line_number = line_number;
    node.is_identifier_literal = is_identifier_literal;

    for child in &children {
        tree.node_mut(*child)?.set_parent(Some(ticket.node));
    }
    tree.node_mut(ticket.node)?.children_mut().extend(children);
    tree.free(scratch);

    if let Some(parent) = tree.parent(ticket.node)? {
        edits::resolve_task_destinations(tree, parent)?;
    }

    debug!(node = %ticket.node, "applied free-text fragment");
    tree.touch(ticket.node);
    tree.emit(TreeEvent {
        origin: ticket.node,
        kind: TreeEventKind::CustomEdit,
        title: "Modify Statement From Source".to_string(),
    });
    Ok(())
}
