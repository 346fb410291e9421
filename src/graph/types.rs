//! Core type definitions for the graph engine

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Allocate a fresh identifier, unique for the lifetime of the engine
    pub fn new() -> Self {
        NodeId(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        NodeId(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NodeId {
    fn from(id: Uuid) -> Self {
        NodeId(id)
    }
}

/// Unique identifier for an edge (including hyperedges)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    pub fn new() -> Self {
        EdgeId(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        EdgeId(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EdgeId {
    fn from(id: Uuid) -> Self {
        EdgeId(id)
    }
}

/// Kind of a node. A closed enumeration covering the note-taking domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Root,
    Container,
    Nest,
    SubNest,
    Folder,
    Note,
    Tag,
    Entity,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Container => "container",
            NodeKind::Nest => "nest",
            NodeKind::SubNest => "sub-nest",
            NodeKind::Folder => "folder",
            NodeKind::Note => "note",
            NodeKind::Tag => "tag",
            NodeKind::Entity => "entity",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of an edge.
///
/// `Hierarchy` edges additionally establish the parent/child relation and are
/// subject to the single-parent and acyclicity invariants. `Predicate` carries
/// a caller-defined relationship name for entity triples.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Hierarchy,
    LinksTo,
    HasTag,
    Mentions,
    Semantic,
    Predicate(String),
}

impl EdgeKind {
    pub fn predicate(name: impl Into<String>) -> Self {
        EdgeKind::Predicate(name.into())
    }

    pub fn is_hierarchy(&self) -> bool {
        matches!(self, EdgeKind::Hierarchy)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Hierarchy => write!(f, "hierarchy"),
            EdgeKind::LinksTo => write!(f, "links-to"),
            EdgeKind::HasTag => write!(f, "has-tag"),
            EdgeKind::Mentions => write!(f, "mentions"),
            EdgeKind::Semantic => write!(f, "semantic"),
            EdgeKind::Predicate(p) => write!(f, "{}", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_uniqueness() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_round_trip() {
        let id = NodeId::new();
        let id2 = NodeId::from_uuid(id.as_uuid());
        assert_eq!(id, id2);

        let eid = EdgeId::new();
        assert_eq!(eid, EdgeId::from_uuid(eid.as_uuid()));
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::SubNest.as_str(), "sub-nest");
        assert_eq!(format!("{}", NodeKind::Note), "note");
    }

    #[test]
    fn test_edge_kind() {
        assert!(EdgeKind::Hierarchy.is_hierarchy());
        assert!(!EdgeKind::LinksTo.is_hierarchy());
        assert_eq!(format!("{}", EdgeKind::predicate("wrote")), "wrote");
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&NodeKind::SubNest).unwrap();
        assert_eq!(json, "\"sub-nest\"");
        let back: NodeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeKind::SubNest);
    }
}
