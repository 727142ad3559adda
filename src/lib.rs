//! # flowlab-base
//!
//! Core library for the FlowLab visual editor: typed AST, wire-format
//! hydration, and lossless source generation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! source_gen  → per-kind visitors, lossless source regeneration
//!   ↓
//! fragment    → free-text edit bridge to the external fragment parser
//!   ↓
//! ast         → node model, factory, legality matrix, structural edits
//!   ↓
//! base        → primitives (NodeId, LineNumber, identifier generation)
//! ```
//!
//! The editor front end (diagram canvas, text editor bindings) and the
//! parser that turns raw source into the tagged wire format are external
//! collaborators; this crate owns everything between the wire format and
//! the regenerated source text.

// ============================================================================
// MODULES (dependency order: base → ast → fragment → source_gen)
// ============================================================================

/// Foundation types: NodeId, LineNumber, deterministic identifier generation
pub mod base;

/// AST: node kinds, payloads, the arena tree, factory, legality, edits
pub mod ast;

/// Free-text edit bridge: fragment parser boundary, stale-edit guard
pub mod fragment;

/// Source generation: per-kind visitors, whitespace replay, line renumbering
pub mod source_gen;

// Re-export foundation types
pub use base::{LineNumber, NodeId, unique_identifier};

// Re-export the working set most callers need
pub use ast::{
    AstError, AstTree, NodeKind, NodePayload, TreeEvent, TreeEventKind, WhitespaceDescriptor,
};
pub use source_gen::{FormatOptions, generate_source};
