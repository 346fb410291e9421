//! Whole-graph serialization
//!
//! A snapshot is a plain data view of the graph: element lists only, no
//! index state. Loading rebuilds every index from scratch and validates
//! referential and hierarchy integrity, so a snapshot edited by hand (or a
//! partially written file) is rejected with [`GraphError::CorruptSnapshot`]
//! instead of producing a graph that violates its own invariants.

use super::edge::{Edge, HyperEdge};
use super::engine::GraphEngine;
use super::node::Node;
use super::store::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Serializable view of the full graph state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hyper_edges: Vec<HyperEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_edges: Option<Vec<Edge>>,
}

impl GraphEngine {
    /// Capture the current state as plain element lists, in insertion order.
    /// Limbo tiers are included only when `include_limbo` is set; a snapshot
    /// without limbo also omits hyperedges with a parked member, since those
    /// would dangle in the serialized document.
    pub fn snapshot(&self, include_limbo: bool) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.store.active_nodes().cloned().collect(),
            edges: self.store.active_edges().cloned().collect(),
            hyper_edges: self
                .store
                .hyper_edges()
                .filter(|hyper| {
                    include_limbo
                        || hyper
                            .nodes
                            .iter()
                            .all(|&node| self.store.active_node(node).is_some())
                })
                .cloned()
                .collect(),
            removed_nodes: include_limbo
                .then(|| self.store.limbo_nodes().cloned().collect()),
            removed_edges: include_limbo
                .then(|| self.store.limbo_edges().cloned().collect()),
        }
    }

    /// Rebuild an engine from a snapshot, re-deriving every index.
    ///
    /// Identifiers, timestamps, and tier membership are preserved exactly.
    /// No events are emitted.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> GraphResult<GraphEngine> {
        let mut engine = GraphEngine::new();

        for node in snapshot.nodes {
            if engine.store.contains_node_id(node.id) {
                return Err(GraphError::CorruptSnapshot(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
            engine.properties.index_node(&node);
            engine.store.insert_active_node(node);
        }
        for node in snapshot.removed_nodes.unwrap_or_default() {
            if engine.store.contains_node_id(node.id) {
                return Err(GraphError::CorruptSnapshot(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
            engine.store.insert_limbo_node(node);
        }

        for edge in snapshot.edges {
            Self::check_edge_slot(&engine, &edge)?;
            for endpoint in [edge.from, edge.to] {
                if engine.store.active_node(endpoint).is_none() {
                    return Err(GraphError::CorruptSnapshot(format!(
                        "edge {} references inactive or missing node {endpoint}",
                        edge.id
                    )));
                }
            }
            if edge.is_hierarchy() {
                if edge.from == edge.to {
                    return Err(GraphError::CorruptSnapshot(format!(
                        "hierarchy edge {} is a self-loop",
                        edge.id
                    )));
                }
                if engine.hierarchy.parent_of(edge.to).is_some() {
                    return Err(GraphError::CorruptSnapshot(format!(
                        "node {} has more than one parent",
                        edge.to
                    )));
                }
                // each attach keeps the forest acyclic, so checking
                // incrementally is sound in any edge order
                if engine.hierarchy.is_ancestor(edge.to, edge.from) {
                    return Err(GraphError::CorruptSnapshot(format!(
                        "hierarchy edge {} closes a cycle",
                        edge.id
                    )));
                }
                engine.hierarchy.attach(edge.from, edge.to);
            }
            engine.adjacency.add(&edge);
            engine.store.insert_active_edge(edge);
        }
        for edge in snapshot.removed_edges.unwrap_or_default() {
            Self::check_edge_slot(&engine, &edge)?;
            for endpoint in [edge.from, edge.to] {
                if !engine.store.contains_node_id(endpoint) {
                    return Err(GraphError::CorruptSnapshot(format!(
                        "removed edge {} references missing node {endpoint}",
                        edge.id
                    )));
                }
            }
            engine.store.insert_limbo_edge(edge);
        }

        for hyper in snapshot.hyper_edges {
            if engine.store.contains_edge_id(hyper.id) {
                return Err(GraphError::CorruptSnapshot(format!(
                    "duplicate edge id {}",
                    hyper.id
                )));
            }
            if hyper.nodes.len() < 2 {
                return Err(GraphError::CorruptSnapshot(format!(
                    "hyperedge {} has fewer than two nodes",
                    hyper.id
                )));
            }
            for &node in &hyper.nodes {
                if !engine.store.contains_node_id(node) {
                    return Err(GraphError::CorruptSnapshot(format!(
                        "hyperedge {} references missing node {node}",
                        hyper.id
                    )));
                }
            }
            engine.hyper.add(&hyper);
            engine.store.insert_hyper_edge(hyper);
        }

        Ok(engine)
    }

    fn check_edge_slot(engine: &GraphEngine, edge: &Edge) -> GraphResult<()> {
        if engine.store.contains_edge_id(edge.id) {
            return Err(GraphError::CorruptSnapshot(format!(
                "duplicate edge id {}",
                edge.id
            )));
        }
        Ok(())
    }

    /// Serialize the graph to a JSON string
    pub fn to_json_string(&self, include_limbo: bool) -> GraphResult<String> {
        serde_json::to_string(&self.snapshot(include_limbo))
            .map_err(|e| GraphError::CorruptSnapshot(e.to_string()))
    }

    /// Rebuild an engine from a JSON snapshot string
    pub fn from_json_str(json: &str) -> GraphResult<GraphEngine> {
        let snapshot: GraphSnapshot = serde_json::from_str(json)
            .map_err(|e| GraphError::CorruptSnapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}
