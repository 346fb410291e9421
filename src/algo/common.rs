//! Shared utilities for graph algorithms
//!
//! Provides a dense, read-only projection of the active graph topology.

use crate::graph::{EdgeKind, GraphEngine, NodeId};
use rustc_hash::FxHashMap;

/// A dense, integer-indexed view of the active graph.
///
/// The engine's maps are good for random access by identifier but slow for
/// the tight iteration loops analytics need. The view maps node identifiers
/// to dense indices `0..N` and stores adjacency as index lists.
pub struct GraphView {
    /// Number of projected nodes
    pub node_count: usize,
    /// Dense index back to node identifier
    pub index_to_node: Vec<NodeId>,
    /// Node identifier to dense index
    pub node_to_index: FxHashMap<NodeId, usize>,
    /// Outgoing neighbors per index
    pub outgoing: Vec<Vec<usize>>,
    /// Incoming neighbors per index
    pub incoming: Vec<Vec<usize>>,
}

impl GraphView {
    /// Project the active node and edge sets, optionally keeping only edges
    /// of the given kinds.
    pub fn new(engine: &GraphEngine, edge_kinds: Option<&[EdgeKind]>) -> Self {
        let mut index_to_node = Vec::with_capacity(engine.node_count());
        let mut node_to_index = FxHashMap::default();
        for (idx, node) in engine.nodes().enumerate() {
            index_to_node.push(node.id);
            node_to_index.insert(node.id, idx);
        }

        let node_count = index_to_node.len();
        let mut outgoing = vec![Vec::new(); node_count];
        let mut incoming = vec![Vec::new(); node_count];

        for edge in engine.edges() {
            if let Some(kinds) = edge_kinds {
                if !kinds.contains(&edge.kind) {
                    continue;
                }
            }
            if let (Some(&u), Some(&v)) =
                (node_to_index.get(&edge.from), node_to_index.get(&edge.to))
            {
                outgoing[u].push(v);
                incoming[v].push(u);
            }
        }

        Self {
            node_count,
            index_to_node,
            node_to_index,
            outgoing,
            incoming,
        }
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.incoming[idx].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeKind, PropertyMap};

    #[test]
    fn test_view_projection() {
        let mut engine = GraphEngine::new();
        let a = engine.add_node(NodeKind::Note, PropertyMap::new(), None, None).unwrap();
        let b = engine.add_node(NodeKind::Note, PropertyMap::new(), None, None).unwrap();
        let c = engine.add_node(NodeKind::Note, PropertyMap::new(), None, None).unwrap();

        engine.add_edge(EdgeKind::LinksTo, a.id, b.id, PropertyMap::new()).unwrap();
        engine.add_edge(EdgeKind::LinksTo, b.id, c.id, PropertyMap::new()).unwrap();

        let view = GraphView::new(&engine, None);
        assert_eq!(view.node_count, 3);

        let ai = view.node_to_index[&a.id];
        let bi = view.node_to_index[&b.id];
        assert!(view.outgoing[ai].contains(&bi));
        assert_eq!(view.out_degree(ai), 1);
        assert_eq!(view.in_degree(bi), 1);
    }

    #[test]
    fn test_view_edge_kind_filter() {
        let mut engine = GraphEngine::new();
        let a = engine.add_node(NodeKind::Note, PropertyMap::new(), None, None).unwrap();
        let b = engine.add_node(NodeKind::Note, PropertyMap::new(), None, None).unwrap();
        engine.add_edge(EdgeKind::LinksTo, a.id, b.id, PropertyMap::new()).unwrap();
        engine.add_edge(EdgeKind::Mentions, b.id, a.id, PropertyMap::new()).unwrap();

        let view = GraphView::new(&engine, Some(&[EdgeKind::LinksTo]));
        let ai = view.node_to_index[&a.id];
        assert_eq!(view.out_degree(ai), 1);
        assert_eq!(view.in_degree(ai), 0);
    }
}
