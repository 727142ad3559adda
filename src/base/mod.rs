//! Foundation types for the FlowLab AST core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`NodeId`] - Arena handles for AST nodes
//! - [`LineNumber`] - 1-based source line positions
//! - [`unique_identifier`] - Deterministic sibling-unique name generation
//!
//! This module has NO dependencies on other flowlab modules.

mod ids;
mod naming;

pub use ids::{LineNumber, NodeId};
pub use naming::unique_identifier;
