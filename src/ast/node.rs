//! The arena-backed AST.
//!
//! [`AstTree`] owns every node. Parent→children is the owning relationship
//! (ordered, render order == child order); the child→parent back-reference
//! is a plain [`NodeId`] and never participates in lifetime decisions.
//! Removing a node from its parent tombstones the whole subtree's slots, so
//! stale handles surface as [`AstError::NodeNotFound`] instead of aliasing.

use tracing::debug;
use uuid::Uuid;

use crate::base::{LineNumber, NodeId};

use super::error::AstError;
use super::events::{EventEmitter, TreeEvent, TreeEventKind};
use super::kind::NodeKind;
use super::legality;
use super::payload::NodePayload;
use super::whitespace::WhitespaceDescriptor;

/// One AST node: identity, kind-specific attributes, structure metadata.
#[derive(Debug)]
pub struct NodeData {
    /// Stable identity surfaced to the diagram layer; survives re-hydration
    /// of the node in place.
    pub id: Uuid,
    kind: NodeKind,
    pub payload: NodePayload,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub line_number: LineNumber,
    pub whitespace: WhitespaceDescriptor,
    /// Quoted identifier rather than a bare one; affects rendering only.
    pub is_identifier_literal: bool,
    /// Bumped on every mutation of this node. Free-text edit tickets compare
    /// against it to detect stale completions.
    version: u64,
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
}

/// The tree arena plus its change-notification channel.
#[derive(Debug, Default)]
pub struct AstTree {
    nodes: Vec<Option<NodeData>>,
    root: Option<NodeId>,
    events: EventEmitter,
}

impl AstTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    /// Allocate a detached node of `kind` with an empty payload. Silent: no
    /// notification fires until the node is attached by a structural edit.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        self.create_with_payload(NodePayload::empty(kind))
    }

    /// Allocate a detached node carrying `payload`.
    pub fn create_with_payload(&mut self, payload: NodePayload) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Some(NodeData {
            id: Uuid::new_v4(),
            kind: payload.kind(),
            payload,
            parent: None,
            children: Vec::new(),
            line_number: LineNumber::default(),
            whitespace: WhitespaceDescriptor::synthesized(),
            is_identifier_literal: false,
            version: 0,
        }));
        id
    }

    // ------------------------------------------------------------------
    // Read API
    // ------------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Result<&NodeData, AstError> {
        self.nodes
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(AstError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, AstError> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(AstError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.index()).is_some_and(Option::is_some)
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind, AstError> {
        Ok(self.node(id)?.kind())
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], AstError> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, AstError> {
        Ok(self.node(id)?.parent())
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Mark `id` as the document root. The root is not owned by any parent.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), AstError> {
        self.node(id)?;
        self.root = Some(id);
        Ok(())
    }

    /// Walk parent links from `id` upwards (excluding `id` itself). Used
    /// for scope lookups, e.g. resolving a variable reference.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.node(id).ok().and_then(NodeData::parent);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.node(next).ok().and_then(NodeData::parent);
            Some(next)
        })
    }

    /// Preorder walk of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Ok(node) = self.node(next) {
                out.push(next);
                stack.extend(node.children().iter().rev().copied());
            }
        }
        out
    }

    /// First child of `parent` matching `predicate`.
    pub fn find_child(
        &self,
        parent: NodeId,
        predicate: impl Fn(&NodeData) -> bool,
    ) -> Result<Option<NodeId>, AstError> {
        for &child in self.node(parent)?.children() {
            if predicate(self.node(child)?) {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Per top-level construct, its current line number. Regeneration keeps
    /// this fresh; the diagram layer uses it to map elements back to text.
    pub fn line_number_map(&self) -> Vec<(NodeId, LineNumber)> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        let Ok(node) = self.node(root) else {
            return Vec::new();
        };
        node.children()
            .iter()
            .filter_map(|&child| Some((child, self.node(child).ok()?.line_number)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Structural mutation
    // ------------------------------------------------------------------

    /// Append `child` to `parent`'s child sequence.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        title: &str,
    ) -> Result<(), AstError> {
        let index = self.node(parent)?.children().len();
        self.insert_child(parent, index, child, title)
    }

    /// Insert `child` at `index` in `parent`'s child sequence.
    ///
    /// Checks run before any mutation: legality both ways, sibling
    /// identifier uniqueness, and that `child` is currently detached. On
    /// success a `ChildAdded` notification fires.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
        title: &str,
    ) -> Result<(), AstError> {
        self.attach(parent, index, child)?;
        self.touch(parent);
        self.emit(TreeEvent {
            origin: parent,
            kind: TreeEventKind::ChildAdded,
            title: title.to_string(),
        });
        Ok(())
    }

    /// Attach without firing a notification. Hydration uses this; the same
    /// validity checks apply.
    pub(crate) fn attach(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), AstError> {
        let parent_kind = self.kind(parent)?;
        let child_node = self.node(child)?;
        let child_kind = child_node.kind();

        if !legality::can_be_parent_of(parent_kind, child_kind) {
            return Err(AstError::StructuralViolation {
                parent: parent_kind,
                child: child_kind,
            });
        }
        debug_assert!(legality::can_be_a_child_of(child_kind, parent_kind));

        if child_node.parent().is_some() {
            return Err(AstError::MalformedPayload {
                kind: child_kind,
                detail: "node is already attached to a parent".into(),
            });
        }

        if let Some(identifier) = self.node(child)?.payload.identifier() {
            let identifier = identifier.to_owned();
            for &sibling in self.node(parent)?.children() {
                if self.node(sibling)?.payload.identifier() == Some(identifier.as_str()) {
                    return Err(AstError::DuplicateIdentifier { identifier });
                }
            }
        }

        let index = index.min(self.node(parent)?.children().len());
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove `child` from `parent` and tombstone the detached subtree.
    pub fn remove_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        title: &str,
    ) -> Result<(), AstError> {
        self.detach_and_free(parent, child)?;
        self.touch(parent);
        self.emit(TreeEvent {
            origin: parent,
            kind: TreeEventKind::ChildRemoved,
            title: title.to_string(),
        });
        Ok(())
    }

    pub(crate) fn detach_and_free(&mut self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        let position = self
            .node(parent)?
            .children()
            .iter()
            .position(|&c| c == child)
            .ok_or(AstError::NodeNotFound(child))?;
        self.node_mut(parent)?.children.remove(position);
        self.node_mut(child)?.parent = None;
        self.free_subtree(child);
        Ok(())
    }

    /// Swap `old` for `new` at the same position. The same checks run as
    /// for an attach: `new` must be legal here, detached, and must not
    /// collide with a surviving sibling's identifier.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
        title: &str,
    ) -> Result<(), AstError> {
        let position = self
            .node(parent)?
            .children()
            .iter()
            .position(|&c| c == old)
            .ok_or(AstError::NodeNotFound(old))?;

        // Validate the incoming child before touching anything: legality,
        // detachment, and identifier uniqueness against the surviving
        // siblings, same as attach.
        let parent_kind = self.kind(parent)?;
        let new_node = self.node(new)?;
        let new_kind = new_node.kind();
        if !legality::can_be_parent_of(parent_kind, new_kind) {
            return Err(AstError::StructuralViolation {
                parent: parent_kind,
                child: new_kind,
            });
        }
        if new_node.parent().is_some() {
            return Err(AstError::MalformedPayload {
                kind: new_kind,
                detail: "node is already attached to a parent".into(),
            });
        }
        if let Some(identifier) = self.node(new)?.payload.identifier() {
            let identifier = identifier.to_owned();
            for &sibling in self.node(parent)?.children() {
                if sibling == old {
                    continue;
                }
                if self.node(sibling)?.payload.identifier() == Some(identifier.as_str()) {
                    return Err(AstError::DuplicateIdentifier { identifier });
                }
            }
        }

        self.node_mut(parent)?.children[position] = new;
        self.node_mut(new)?.parent = Some(parent);
        self.node_mut(old)?.parent = None;
        self.free_subtree(old);
        self.touch(parent);
        self.emit(TreeEvent {
            origin: parent,
            kind: TreeEventKind::NodeReplaced,
            title: title.to_string(),
        });
        Ok(())
    }

    /// Remove every child of `id`, tombstoning their subtrees. Silent;
    /// callers re-populating a node in place fire one compound event.
    pub(crate) fn clear_children(&mut self, id: NodeId) -> Result<(), AstError> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in children {
            if let Ok(node) = self.node_mut(child) {
                node.parent = None;
            }
            self.free_subtree(child);
        }
        Ok(())
    }

    /// Arena high-water mark. Paired with [`rollback_to`](Self::rollback_to)
    /// to discard scratch nodes allocated by a failed hydration.
    pub(crate) fn watermark(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node allocated at or after `watermark`. Callers must
    /// guarantee those nodes are reachable only from each other (true for
    /// an aborted hydration, which never attaches into the older tree).
    pub(crate) fn rollback_to(&mut self, watermark: usize) {
        self.nodes.truncate(watermark);
    }

    pub(crate) fn free(&mut self, id: NodeId) {
        self.nodes[id.index()] = None;
    }

    fn free_subtree(&mut self, id: NodeId) {
        for node_id in self.descendants(id) {
            debug!(node = %node_id, "freeing tombstoned node");
            self.nodes[node_id.index()] = None;
        }
    }

    // ------------------------------------------------------------------
    // Attribute mutation
    // ------------------------------------------------------------------

    /// Apply `mutate` to the node's payload, bump its version, and fire an
    /// `AttributeChanged` notification. If `mutate` errors, nothing changes.
    pub fn update_payload(
        &mut self,
        id: NodeId,
        title: &str,
        mutate: impl FnOnce(&mut NodePayload) -> Result<(), AstError>,
    ) -> Result<(), AstError> {
        // Stage on a clone so a failed validation leaves the node intact.
        let mut staged = self.node(id)?.payload.clone();
        mutate(&mut staged)?;
        let node = self.node_mut(id)?;
        // Kind and payload agree for every live node; a mutation may not
        // swap the payload variant out from under the kind.
        if staged.kind() != node.kind() {
            return Err(AstError::MalformedPayload {
                kind: staged.kind(),
                detail: "payload does not match node kind".into(),
            });
        }
        node.payload = staged;
        self.touch(id);
        self.emit(TreeEvent {
            origin: id,
            kind: TreeEventKind::AttributeChanged,
            title: title.to_string(),
        });
        Ok(())
    }

    /// Set a line number without firing notifications. Hydration and
    /// regeneration both use this; neither is an edit.
    pub fn set_line_number_silent(&mut self, id: NodeId, line: LineNumber) -> Result<(), AstError> {
        self.node_mut(id)?.line_number = line;
        Ok(())
    }

    pub(crate) fn touch(&mut self, id: NodeId) {
        if let Ok(node) = self.node_mut(id) {
            node.version += 1;
        }
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Register a change listener. Listeners run synchronously after each
    /// completed mutation, in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&TreeEvent) + 'static) {
        self.events.subscribe(listener);
    }

    pub(crate) fn emit(&mut self, event: TreeEvent) {
        // Listeners run against the emitter taken out of the tree so they
        // can never re-enter a half-applied mutation.
        let mut events = std::mem::take(&mut self.events);
        events.emit(&event);
        self.events = events;
    }

    // ------------------------------------------------------------------
    // Consistency checks (test support)
    // ------------------------------------------------------------------

    /// Verify the parent/children invariant over every live node. Cheap
    /// enough to call from listeners in tests.
    pub fn is_consistent(&self) -> bool {
        for slot in self.nodes.iter().flatten() {
            for &child in slot.children() {
                let Ok(child_node) = self.node(child) else {
                    return false;
                };
                let Some(parent) = child_node.parent() else {
                    return false;
                };
                let Ok(parent_node) = self.node(parent) else {
                    return false;
                };
                if parent_node.id != slot.id {
                    return false;
                }
            }
        }
        true
    }
}
