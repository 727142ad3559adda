//! The typed AST: kinds, payloads, the arena tree, factory, legality
//! matrix, structural edits, and change notifications.
//!
//! Data flow: the external parser's tagged JSON tree is hydrated by
//! [`factory::create_from_json`] into an [`AstTree`]; the diagram and text
//! views mutate it through the structural-edit API; every completed
//! mutation fires a synchronous [`TreeEvent`]; the
//! [`source_gen`](crate::source_gen) visitors then regenerate source text
//! from the (possibly dirty) tree.

pub mod edits;
mod error;
mod events;
pub mod factory;
mod kind;
pub mod legality;
mod node;
mod payload;
mod whitespace;

#[cfg(test)]
mod tests;

pub use error::{AstError, Diagnostic};
pub use events::{EventEmitter, TreeEvent, TreeEventKind};
pub use kind::NodeKind;
pub use node::{AstTree, NodeData};
pub use payload::NodePayload;
pub use whitespace::WhitespaceDescriptor;
