//! Hierarchy index: the single-parent overlay derived from hierarchy edges
//!
//! Tracks, per active node, its parent (at most one) and its ordered child
//! set. Mutated only by the engine as a side effect of hierarchy-edge
//! attach/detach/move; it never accepts direct external mutation.

use super::types::NodeId;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    parent: FxHashMap<NodeId, NodeId>,
    children: FxHashMap<NodeId, IndexSet<NodeId>>,
}

impl HierarchyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `child` under `parent`. The engine validates the single-parent
    /// and acyclicity invariants before calling this.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.parent.insert(child, parent);
        self.children.entry(parent).or_default().insert(child);
    }

    /// Detach `child` from its parent, returning the former parent
    pub(crate) fn detach(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.parent.remove(&child)?;
        if let Some(set) = self.children.get_mut(&parent) {
            set.shift_remove(&child);
            if set.is_empty() {
                self.children.remove(&parent);
            }
        }
        Some(parent)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(&id).copied()
    }

    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.children
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.children.get(&id).is_some_and(|set| !set.is_empty())
    }

    /// Walk the parent chain from `node` upward; true if `candidate` is
    /// encountered. A node is never its own ancestor.
    pub fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = self.parent_of(node);
        while let Some(p) = current {
            if p == candidate {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Parent chain from `id` to the root, nearest ancestor first
    pub fn ancestors_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            out.push(p);
            current = self.parent_of(p);
        }
        out
    }

    /// Breadth-first walk of the children relation, each node visited once.
    /// `id` itself is not included.
    pub fn descendants_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut queue: VecDeque<NodeId> = self.children_of(id).into();
        while let Some(n) = queue.pop_front() {
            out.push(n);
            queue.extend(self.children_of(n));
        }
        out
    }

    pub(crate) fn clear(&mut self) {
        self.parent.clear();
        self.children.clear();
    }
}
