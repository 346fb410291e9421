//! Adjacency indexes: incident edge sets per node
//!
//! `AdjacencyIndex` covers ordinary edges (one incident set per node, both
//! directions), `HyperIndex` covers hyperedge membership. Both hold edge
//! identifiers only and are updated synchronously on every edge mutation.

use super::edge::{Edge, HyperEdge};
use super::types::{EdgeId, NodeId};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    incident: FxHashMap<NodeId, IndexSet<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, edge: &Edge) {
        self.incident.entry(edge.from).or_default().insert(edge.id);
        self.incident.entry(edge.to).or_default().insert(edge.id);
    }

    pub(crate) fn remove(&mut self, edge: &Edge) {
        for endpoint in [edge.from, edge.to] {
            if let Some(set) = self.incident.get_mut(&endpoint) {
                set.shift_remove(&edge.id);
                if set.is_empty() {
                    self.incident.remove(&endpoint);
                }
            }
        }
    }

    /// Incident edge identifiers in discovery order, both directions
    pub fn incident_edges(&self, id: NodeId) -> Vec<EdgeId> {
        self.incident
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.incident.get(&id).map_or(0, |set| set.len())
    }

    pub(crate) fn clear(&mut self) {
        self.incident.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct HyperIndex {
    membership: FxHashMap<NodeId, IndexSet<EdgeId>>,
}

impl HyperIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, hyper: &HyperEdge) {
        for &node in &hyper.nodes {
            self.membership.entry(node).or_default().insert(hyper.id);
        }
    }

    pub(crate) fn remove(&mut self, hyper: &HyperEdge) {
        for &node in &hyper.nodes {
            if let Some(set) = self.membership.get_mut(&node) {
                set.shift_remove(&hyper.id);
                if set.is_empty() {
                    self.membership.remove(&node);
                }
            }
        }
    }

    /// Hyperedges this node participates in
    pub fn edges_of(&self, id: NodeId) -> Vec<EdgeId> {
        self.membership
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        self.membership.clear();
    }
}
