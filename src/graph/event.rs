//! Graph events and the synchronous event bus
//!
//! Every successful structural operation emits exactly one event. Listeners
//! run inline on the calling thread, in registration order; a listener panic
//! is caught and logged, never propagated, so a misbehaving subscriber
//! cannot abort a mutation already committed to the store.

use super::batch::Mutation;
use super::edge::Edge;
use super::node::Node;
use super::store::GraphError;
use super::types::{EdgeId, NodeId};
use rustc_hash::FxHashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A state change notification
#[derive(Debug, Clone)]
pub enum GraphEvent {
    NodeAdded(Node),
    NodeUpdated(Node),
    NodeRemoved(Node),
    NodeRestored(Node),
    NodeDestroyed(NodeId),
    NodeMoved { node: Node, parent: Option<NodeId> },
    EdgeAdded(Edge),
    EdgeRemoved(Edge),
    EdgeRestored(Edge),
    EdgeDestroyed(EdgeId),
    EdgeMoved(Edge),
    TransactionCommit {
        mutations: usize,
    },
    /// Rollback carries the failed transaction's original mutation list
    TransactionRollback {
        error: GraphError,
        mutations: Vec<Mutation>,
    },
}

impl GraphEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GraphEvent::NodeAdded(_) => EventKind::NodeAdded,
            GraphEvent::NodeUpdated(_) => EventKind::NodeUpdated,
            GraphEvent::NodeRemoved(_) => EventKind::NodeRemoved,
            GraphEvent::NodeRestored(_) => EventKind::NodeRestored,
            GraphEvent::NodeDestroyed(_) => EventKind::NodeDestroyed,
            GraphEvent::NodeMoved { .. } => EventKind::NodeMoved,
            GraphEvent::EdgeAdded(_) => EventKind::EdgeAdded,
            GraphEvent::EdgeRemoved(_) => EventKind::EdgeRemoved,
            GraphEvent::EdgeRestored(_) => EventKind::EdgeRestored,
            GraphEvent::EdgeDestroyed(_) => EventKind::EdgeDestroyed,
            GraphEvent::EdgeMoved(_) => EventKind::EdgeMoved,
            GraphEvent::TransactionCommit { .. } => EventKind::TransactionCommit,
            GraphEvent::TransactionRollback { .. } => EventKind::TransactionRollback,
        }
    }
}

/// Subscription key for the event bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NodeAdded,
    NodeUpdated,
    NodeRemoved,
    NodeRestored,
    NodeDestroyed,
    NodeMoved,
    EdgeAdded,
    EdgeRemoved,
    EdgeRestored,
    EdgeDestroyed,
    EdgeMoved,
    TransactionCommit,
    TransactionRollback,
}

/// Handle returned by [`EventBus::on`], used to deregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&GraphEvent)>;

/// Synchronous publish/subscribe dispatcher
#[derive(Default)]
pub struct EventBus {
    listeners: FxHashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event kind
    pub fn on(&mut self, kind: EventKind, listener: impl Fn(&GraphEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Deregister a listener; true if it was registered
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        match self.listeners.get_mut(&kind) {
            Some(list) => {
                let before = list.len();
                list.retain(|(lid, _)| *lid != id);
                before != list.len()
            }
            None => false,
        }
    }

    /// Invoke all listeners for the event's kind, in registration order.
    /// Listener panics are caught and logged.
    pub fn emit(&self, event: &GraphEvent) {
        let Some(list) = self.listeners.get(&event.kind()) else {
            return;
        };
        for (id, listener) in list {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                tracing::warn!(listener = id.0, event = ?event.kind(), "event listener panicked");
            }
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, |list| list.len())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("kinds", &self.listeners.len())
            .field(
                "listeners",
                &self.listeners.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
