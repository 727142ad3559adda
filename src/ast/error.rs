//! Error types for hydration, structural edits, and free-text edits.

use thiserror::Error;

use crate::base::NodeId;

use super::kind::NodeKind;

/// A diagnostic reported by the external fragment parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Errors raised by the AST core.
///
/// Validation errors (`InvalidAttributeValue`, `DuplicateIdentifier`,
/// `StructuralViolation`) are checked *before* any mutation is applied;
/// when one is returned, the tree is exactly as it was before the call.
#[derive(Debug, Error)]
pub enum AstError {
    /// A wire-format tag this build does not know. Fatal for the subtree:
    /// indicates a core/parser version mismatch.
    #[error("unknown node kind `{tag}`")]
    UnknownNodeKind { tag: String },

    /// A required attribute was given an empty or malformed value.
    #[error("invalid value `{value}` for attribute `{attribute}`")]
    InvalidAttributeValue { attribute: &'static str, value: String },

    /// A sibling with the same identifier already exists in the scope.
    #[error("duplicate identifier `{identifier}`")]
    DuplicateIdentifier { identifier: String },

    /// The parent kind does not accept the child kind.
    #[error("{parent} cannot be the parent of {child}")]
    StructuralViolation { parent: NodeKind, child: NodeKind },

    /// The external fragment parser rejected edited text. No mutation was
    /// applied.
    #[error("fragment parse failed with {} diagnostic(s)", diagnostics.len())]
    FragmentParse { diagnostics: Vec<Diagnostic> },

    /// An asynchronous fragment completion arrived after the node changed
    /// or was removed; the completion must be discarded.
    #[error("stale edit: node version moved since the ticket was issued")]
    StaleEdit,

    /// A `NodeId` referred to a removed or never-allocated slot.
    #[error("node {0} not found in tree")]
    NodeNotFound(NodeId),

    /// Malformed wire payload (missing or mistyped field).
    #[error("malformed payload for {kind}: {detail}")]
    MalformedPayload { kind: NodeKind, detail: String },
}
