//! Edge and hyperedge implementations for the compound graph

use super::property::PropertyMap;
use super::types::{EdgeId, EdgeKind, NodeId};
use serde::{Deserialize, Serialize};

/// A typed, directed, optionally property-bearing connection between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Kind of relationship
    pub kind: EdgeKind,

    /// Source node (edge goes FROM this node)
    pub from: NodeId,

    /// Target node (edge goes TO this node)
    pub to: NodeId,

    /// Properties associated with this edge
    pub props: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, kind: EdgeKind, from: NodeId, to: NodeId, props: PropertyMap) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Edge {
            id,
            kind,
            from,
            to,
            props,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_hierarchy(&self) -> bool {
        self.kind.is_hierarchy()
    }

    /// The endpoint on the far side of `node`, if `node` is an endpoint.
    /// For self-loops the node itself is returned.
    pub fn other_endpoint(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// True if `node` is either endpoint
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An edge connecting two or more nodes at once.
///
/// Hyperedges live in their own index and are not subject to hierarchy
/// constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HyperEdge {
    /// Unique identifier for this hyperedge
    pub id: EdgeId,

    /// Member nodes, at least two
    pub nodes: Vec<NodeId>,

    /// Properties associated with this hyperedge
    pub props: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl HyperEdge {
    pub fn new(id: EdgeId, nodes: Vec<NodeId>, props: PropertyMap) -> Self {
        HyperEdge {
            id,
            nodes,
            props,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}

impl PartialEq for HyperEdge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HyperEdge {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_endpoints() {
        let a = NodeId::new();
        let b = NodeId::new();
        let c = NodeId::new();
        let edge = Edge::new(EdgeId::new(), EdgeKind::LinksTo, a, b, PropertyMap::new());

        assert_eq!(edge.other_endpoint(a), Some(b));
        assert_eq!(edge.other_endpoint(b), Some(a));
        assert_eq!(edge.other_endpoint(c), None);
        assert!(edge.touches(a));
        assert!(!edge.touches(c));
    }

    #[test]
    fn test_self_loop_endpoint() {
        let a = NodeId::new();
        let edge = Edge::new(EdgeId::new(), EdgeKind::Semantic, a, a, PropertyMap::new());
        assert_eq!(edge.other_endpoint(a), Some(a));
    }

    #[test]
    fn test_hyper_edge_membership() {
        let nodes = vec![NodeId::new(), NodeId::new(), NodeId::new()];
        let hyper = HyperEdge::new(EdgeId::new(), nodes.clone(), PropertyMap::new());
        assert!(hyper.contains(nodes[1]));
        assert!(!hyper.contains(NodeId::new()));
    }
}
