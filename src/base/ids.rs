//! Arena handles and source line positions.

use std::fmt;

/// Handle to a node inside one [`AstTree`](crate::ast::AstTree) arena.
///
/// Slots are never reused within a tree's lifetime: removing a subtree
/// tombstones its slots, so a stale `NodeId` can be detected rather than
/// silently aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A 1-based line number in generated or parsed source text.
///
/// Line numbers are set once during hydration and recomputed on every
/// regeneration pass; they are never authoritative between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineNumber(usize);

impl LineNumber {
    pub fn new(line: usize) -> Self {
        debug_assert!(line >= 1, "line numbers are 1-based");
        Self(line.max(1))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Advance by the number of newlines in `text`.
    pub fn advance(self, text: &str) -> Self {
        Self(self.0 + text.matches('\n').count())
    }
}

impl Default for LineNumber {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
