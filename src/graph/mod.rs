//! Core graph model: elements, the two-tier store, derived indexes,
//! the event bus, and the mutation engine

pub mod adjacency;
pub mod batch;
pub mod edge;
pub mod engine;
pub mod event;
pub mod hierarchy;
pub mod node;
pub mod property;
pub mod snapshot;
pub mod store;
pub mod types;

pub use adjacency::{AdjacencyIndex, HyperIndex};
pub use batch::{Mutation, MutationOutcome};
pub use edge::{Edge, HyperEdge};
pub use engine::GraphEngine;
pub use event::{EventBus, EventKind, GraphEvent, ListenerId};
pub use hierarchy::HierarchyIndex;
pub use node::Node;
pub use property::{props, IndexKey, PropertyMap, PropertyValue};
pub use snapshot::GraphSnapshot;
pub use store::{ElementState, ElementStore, GraphError, GraphResult};
pub use types::{EdgeId, EdgeKind, NodeId, NodeKind};
