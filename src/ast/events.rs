//! Synchronous change notifications.
//!
//! Events fire after each discrete mutation completes, never mid-mutation;
//! the tree invariants hold at the moment a listener runs. Hydration is
//! silent. Listeners observe the event only — they cannot re-enter the
//! tree, which keeps notification free of re-entrant mutation.

use crate::base::NodeId;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEventKind {
    ChildAdded,
    ChildRemoved,
    NodeReplaced,
    AttributeChanged,
    /// A compound edit applied as one unit (e.g. a free-text re-derivation).
    CustomEdit,
}

/// One completed mutation, as seen by observers (diagram re-render,
/// dirty-state tracking, undo bookkeeping).
#[derive(Debug, Clone)]
pub struct TreeEvent {
    /// The node the mutation was applied to (the parent, for child ops).
    pub origin: NodeId,
    pub kind: TreeEventKind,
    /// Human-readable edit title, surfaced by undo/redo UIs.
    pub title: String,
}

type Listener = Box<dyn FnMut(&TreeEvent)>;

/// Listener registry. Taken out of the tree during emission so a listener
/// can never observe a half-applied mutation through re-entrancy.
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<Listener>,
}

impl EventEmitter {
    pub fn subscribe(&mut self, listener: impl FnMut(&TreeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: &TreeEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listener_sees_every_event() {
        let mut emitter = EventEmitter::default();
        let counts = std::rc::Rc::new(std::cell::RefCell::new([0usize; 2]));
        for slot in 0..2 {
            let sink = std::rc::Rc::clone(&counts);
            emitter.subscribe(move |_| sink.borrow_mut()[slot] += 1);
        }
        assert_eq!(emitter.listener_count(), 2);

        let event = TreeEvent {
            origin: NodeId::new(0),
            kind: TreeEventKind::ChildAdded,
            title: "Add".to_string(),
        };
        emitter.emit(&event);
        emitter.emit(&event);
        assert_eq!(*counts.borrow(), [2, 2]);
    }
}
