//! Secondary index over node properties
//!
//! Two-level map: property key -> scalar value -> set of active node ids
//! holding exactly that value, plus a kind index (the reserved `type` key).
//! Only scalar values are indexed; queries over complex values fall back to
//! a full scan in the engine.

use crate::graph::{IndexKey, Node, NodeId, NodeKind, PropertyMap, PropertyValue};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, Default)]
pub struct PropertyIndex {
    by_value: FxHashMap<String, FxHashMap<IndexKey, FxHashSet<NodeId>>>,
    by_kind: FxHashMap<NodeKind, FxHashSet<NodeId>>,
}

impl PropertyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a node's kind and every scalar property. Called on creation and
    /// restoration.
    pub(crate) fn index_node(&mut self, node: &Node) {
        self.by_kind.entry(node.kind).or_default().insert(node.id);
        for (key, value) in &node.props {
            if let Some(ik) = value.index_key() {
                self.by_value
                    .entry(key.clone())
                    .or_default()
                    .entry(ik)
                    .or_default()
                    .insert(node.id);
            }
        }
    }

    /// Remove every index entry for a node. Called on removal and before a
    /// props update (update = deindex old, mutate, reindex new).
    pub(crate) fn deindex_node(&mut self, node: &Node) {
        if let Some(set) = self.by_kind.get_mut(&node.kind) {
            set.remove(&node.id);
            if set.is_empty() {
                self.by_kind.remove(&node.kind);
            }
        }
        for (key, value) in &node.props {
            if let Some(ik) = value.index_key() {
                if let Some(values) = self.by_value.get_mut(key) {
                    if let Some(set) = values.get_mut(&ik) {
                        set.remove(&node.id);
                        if set.is_empty() {
                            values.remove(&ik);
                        }
                    }
                    if values.is_empty() {
                        self.by_value.remove(key);
                    }
                }
            }
        }
    }

    /// Nodes whose `key` property equals the given scalar value
    pub fn nodes_with(&self, key: &str, value: &IndexKey) -> Option<&FxHashSet<NodeId>> {
        self.by_value.get(key).and_then(|values| values.get(value))
    }

    /// Nodes of the given kind
    pub fn kind_set(&self, kind: NodeKind) -> Option<&FxHashSet<NodeId>> {
        self.by_kind.get(&kind)
    }

    pub(crate) fn clear(&mut self) {
        self.by_value.clear();
        self.by_kind.clear();
    }
}

/// Equality query over the active node set.
///
/// All supplied filters are intersected; an empty query matches every active
/// node. Scalar-valued filters use the property index, complex values are
/// matched by comparing against the node's props directly.
#[derive(Debug, Clone, Default)]
pub struct NodeQuery {
    pub kind: Option<NodeKind>,
    pub props: PropertyMap,
}

impl NodeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.props.is_empty()
    }
}
