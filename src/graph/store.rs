//! Element store: canonical ownership of nodes, edges, and hyperedges
//!
//! The store keeps two tiers per element class: the active maps and the
//! "limbo" maps holding soft-deleted elements awaiting restore or destroy.
//! An identifier is a member of exactly one tier at a time. All other
//! components hold identifiers only, never element data.

use super::edge::{Edge, HyperEdge};
use super::node::Node;
use super::types::{EdgeId, NodeId};
use indexmap::IndexMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("edge {0} already exists")]
    EdgeAlreadyExists(EdgeId),

    #[error("parent node {0} is not active")]
    InvalidParent(NodeId),

    #[error("node {0} already has a parent")]
    ParentConflict(NodeId),

    #[error("hierarchy edge from node {0} to itself")]
    SelfReference(NodeId),

    #[error("operation would make node {0} its own ancestor")]
    CycleDetected(NodeId),

    #[error("node {0} still has children")]
    HasChildren(NodeId),

    #[error("node {0} is already active")]
    NodeAlreadyActive(NodeId),

    #[error("edge {0} is already active")]
    EdgeAlreadyActive(EdgeId),

    #[error("endpoint node {0} is not active")]
    EndpointInactive(NodeId),

    #[error("requested {requested} clusters but only {available} nodes are available")]
    InsufficientNodes { requested: usize, available: usize },

    #[error("a hyperedge requires at least two nodes, got {0}")]
    TooFewHyperNodes(usize),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Which tier an element currently occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Active,
    Limbo,
}

/// Canonical node/edge/hyperedge maps
///
/// Insertion-ordered maps so iteration, serialization, and query results are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    active_nodes: IndexMap<NodeId, Node>,
    limbo_nodes: IndexMap<NodeId, Node>,
    active_edges: IndexMap<EdgeId, Edge>,
    limbo_edges: IndexMap<EdgeId, Edge>,
    hyper_edges: IndexMap<EdgeId, HyperEdge>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- lookups ----

    /// Look up a node, active tier first, then limbo
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.active_nodes.get(&id).or_else(|| self.limbo_nodes.get(&id))
    }

    /// Look up an edge, active tier first, then limbo
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.active_edges.get(&id).or_else(|| self.limbo_edges.get(&id))
    }

    pub fn get_hyper_edge(&self, id: EdgeId) -> Option<&HyperEdge> {
        self.hyper_edges.get(&id)
    }

    pub fn node_state(&self, id: NodeId) -> Option<ElementState> {
        if self.active_nodes.contains_key(&id) {
            Some(ElementState::Active)
        } else if self.limbo_nodes.contains_key(&id) {
            Some(ElementState::Limbo)
        } else {
            None
        }
    }

    pub fn edge_state(&self, id: EdgeId) -> Option<ElementState> {
        if self.active_edges.contains_key(&id) {
            Some(ElementState::Active)
        } else if self.limbo_edges.contains_key(&id) {
            Some(ElementState::Limbo)
        } else {
            None
        }
    }

    /// True if the identifier is in use by any node, active or limbo
    pub fn contains_node_id(&self, id: NodeId) -> bool {
        self.node_state(id).is_some()
    }

    /// True if the identifier is in use by any edge or hyperedge
    pub fn contains_edge_id(&self, id: EdgeId) -> bool {
        self.edge_state(id).is_some() || self.hyper_edges.contains_key(&id)
    }

    pub fn active_node(&self, id: NodeId) -> Option<&Node> {
        self.active_nodes.get(&id)
    }

    pub fn active_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.active_nodes.get_mut(&id)
    }

    pub fn limbo_node(&self, id: NodeId) -> Option<&Node> {
        self.limbo_nodes.get(&id)
    }

    pub fn active_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.active_edges.get(&id)
    }

    pub fn active_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.active_edges.get_mut(&id)
    }

    pub fn limbo_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.limbo_edges.get(&id)
    }

    // ---- insertion ----

    pub fn insert_active_node(&mut self, node: Node) {
        self.active_nodes.insert(node.id, node);
    }

    pub fn insert_limbo_node(&mut self, node: Node) {
        self.limbo_nodes.insert(node.id, node);
    }

    pub fn insert_active_edge(&mut self, edge: Edge) {
        self.active_edges.insert(edge.id, edge);
    }

    pub fn insert_limbo_edge(&mut self, edge: Edge) {
        self.limbo_edges.insert(edge.id, edge);
    }

    pub fn insert_hyper_edge(&mut self, hyper: HyperEdge) {
        self.hyper_edges.insert(hyper.id, hyper);
    }

    // ---- tier transitions ----

    /// Move an active node to limbo. Returns the node's new (limbo) slot.
    pub fn park_node(&mut self, id: NodeId) -> Option<&Node> {
        let node = self.active_nodes.shift_remove(&id)?;
        Some(self.limbo_nodes.entry(id).or_insert(node))
    }

    /// Move a limbo node back to the active tier
    pub fn revive_node(&mut self, id: NodeId) -> Option<&Node> {
        let node = self.limbo_nodes.shift_remove(&id)?;
        Some(self.active_nodes.entry(id).or_insert(node))
    }

    /// Move an active edge to limbo
    pub fn park_edge(&mut self, id: EdgeId) -> Option<&Edge> {
        let edge = self.active_edges.shift_remove(&id)?;
        Some(self.limbo_edges.entry(id).or_insert(edge))
    }

    /// Move a limbo edge back to the active tier
    pub fn revive_edge(&mut self, id: EdgeId) -> Option<&Edge> {
        let edge = self.limbo_edges.shift_remove(&id)?;
        Some(self.active_edges.entry(id).or_insert(edge))
    }

    // ---- permanent removal ----

    /// Erase a node from whichever tier it occupies
    pub fn erase_node(&mut self, id: NodeId) -> Option<Node> {
        self.active_nodes
            .shift_remove(&id)
            .or_else(|| self.limbo_nodes.shift_remove(&id))
    }

    /// Erase an edge from whichever tier it occupies
    pub fn erase_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.active_edges
            .shift_remove(&id)
            .or_else(|| self.limbo_edges.shift_remove(&id))
    }

    pub fn erase_hyper_edge(&mut self, id: EdgeId) -> Option<HyperEdge> {
        self.hyper_edges.shift_remove(&id)
    }

    // ---- iteration and counts ----

    pub fn active_nodes(&self) -> impl Iterator<Item = &Node> {
        self.active_nodes.values()
    }

    pub fn active_edges(&self) -> impl Iterator<Item = &Edge> {
        self.active_edges.values()
    }

    pub fn limbo_nodes(&self) -> impl Iterator<Item = &Node> {
        self.limbo_nodes.values()
    }

    pub fn limbo_edges(&self) -> impl Iterator<Item = &Edge> {
        self.limbo_edges.values()
    }

    pub fn hyper_edges(&self) -> impl Iterator<Item = &HyperEdge> {
        self.hyper_edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.active_nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.active_edges.len()
    }

    pub fn limbo_node_count(&self) -> usize {
        self.limbo_nodes.len()
    }

    pub fn limbo_edge_count(&self) -> usize {
        self.limbo_edges.len()
    }

    pub fn hyper_edge_count(&self) -> usize {
        self.hyper_edges.len()
    }

    /// Drop all elements in both tiers
    pub fn clear(&mut self) {
        self.active_nodes.clear();
        self.limbo_nodes.clear();
        self.active_edges.clear();
        self.limbo_edges.clear();
        self.hyper_edges.clear();
    }
}
