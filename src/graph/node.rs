//! Node implementation for the compound graph
//!
//! Nodes are owned exclusively by the element store; every other component
//! refers to them by `NodeId` only.

use super::property::{PropertyMap, PropertyValue};
use super::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// A typed, property-bearing vertex in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Kind of this node (note, folder, nest, ...)
    pub kind: NodeKind,

    /// Open, caller-defined property bag
    pub props: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Node {
    /// Create a new node
    pub fn new(id: NodeId, kind: NodeKind, props: PropertyMap) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Node {
            id,
            kind,
            props,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get a property value
    pub fn get_prop(&self, key: &str) -> Option<&PropertyValue> {
        self.props.get(key)
    }

    /// Set a property value, returning the previous one
    pub fn set_prop(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let old = self.props.insert(key.into(), value.into());
        self.touch();
        old
    }

    /// Shallow-merge `partial` into the props: keys in `partial` overwrite,
    /// all other keys are untouched.
    pub fn merge_props(&mut self, partial: PropertyMap) {
        for (key, value) in partial {
            self.props.insert(key, value);
        }
        self.touch();
    }

    /// Check if property exists
    pub fn has_prop(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Get number of properties
    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
