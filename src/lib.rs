//! notegraph
//!
//! An embedded, in-memory compound graph engine for hierarchical note data:
//! typed nodes and edges with open property bags, a single-parent acyclic
//! hierarchy layered over a general directed graph, soft-delete with
//! restore, property indexing for equality search, a synchronous event bus,
//! batch and transactional mutation, and a small analytics suite
//! (BFS/DFS traversal, Dijkstra/A*, PageRank, k-means).
//!
//! The engine is a library consumed in-process. It is single-writer and
//! synchronous: callers issue one operation at a time and listeners run
//! inline within the emitting call.
//!
//! ## Example Usage
//!
//! ```rust
//! use notegraph::{EdgeKind, GraphEngine, NodeKind, NodeQuery, PropertyMap, props};
//!
//! let mut engine = GraphEngine::new();
//!
//! // Build a small hierarchy
//! let folder = engine
//!     .add_node(NodeKind::Folder, props([("name", "inbox")]), None, None)
//!     .unwrap();
//! let note = engine
//!     .add_node(NodeKind::Note, props([("title", "groceries")]), Some(folder.id), None)
//!     .unwrap();
//!
//! // Cross-reference notes with typed edges
//! let other = engine
//!     .add_node(NodeKind::Note, props([("title", "recipes")]), None, None)
//!     .unwrap();
//! engine
//!     .add_edge(EdgeKind::LinksTo, note.id, other.id, PropertyMap::new())
//!     .unwrap();
//!
//! // Indexed equality search
//! let hits = engine.find_nodes(&NodeQuery::new().kind(NodeKind::Note).prop("title", "groceries"));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(engine.parent_of(note.id), Some(folder.id));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod index;

// Re-export main types for convenience
pub use graph::{
    props, Edge, EdgeId, EdgeKind, ElementState, EventKind, GraphEngine, GraphError, GraphEvent,
    GraphResult, GraphSnapshot, HyperEdge, ListenerId, Mutation, MutationOutcome, Node, NodeId,
    NodeKind, PropertyMap, PropertyValue,
};

pub use index::NodeQuery;

pub use algo::{
    a_star, dijkstra, k_means, neighbors, page_rank, traverse, Direction, KMeansConfig,
    PageRankConfig, PathOptions, PathStep, TraversalOrder,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the library
pub fn version() -> &'static str {
    VERSION
}
