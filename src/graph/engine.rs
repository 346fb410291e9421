//! The compound graph engine: public CRUD surface and invariant enforcement
//!
//! Every operation validates before mutating, so a rejected call leaves the
//! engine unchanged. Each successful structural operation updates the
//! element store and all derived indexes synchronously and emits exactly one
//! event.
//!
//! The engine is single-writer and synchronous: operations run to completion
//! on the calling thread, and event listeners run inline within the emitting
//! call. Concurrent callers must serialize access externally.

use super::adjacency::{AdjacencyIndex, HyperIndex};
use super::edge::{Edge, HyperEdge};
use super::event::{EventBus, EventKind, GraphEvent, ListenerId};
use super::hierarchy::HierarchyIndex;
use super::node::Node;
use super::property::PropertyMap;
use super::store::{ElementState, ElementStore, GraphError, GraphResult};
use super::types::{EdgeId, EdgeKind, NodeId, NodeKind};
use crate::index::{NodeQuery, PropertyIndex};
use rustc_hash::FxHashSet;

/// In-memory, mutable, typed compound graph
#[derive(Debug, Default)]
pub struct GraphEngine {
    pub(crate) store: ElementStore,
    pub(crate) hierarchy: HierarchyIndex,
    pub(crate) adjacency: AdjacencyIndex,
    pub(crate) hyper: HyperIndex,
    pub(crate) properties: PropertyIndex,
    pub(crate) bus: EventBus,
}

/// Full copy of the engine state (listeners excluded), used by `transact`
/// for wholesale rollback.
#[derive(Debug, Clone)]
pub(crate) struct StateSnapshot {
    store: ElementStore,
    hierarchy: HierarchyIndex,
    adjacency: AdjacencyIndex,
    hyper: HyperIndex,
    properties: PropertyIndex,
}

impl GraphEngine {
    /// Create a new empty engine
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Node operations
    // ============================================================

    /// Create a node, optionally under a parent.
    ///
    /// Atomic: if `parent` is given and the hierarchy edge cannot be
    /// established, the whole call fails and no node is created.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        props: PropertyMap,
        parent: Option<NodeId>,
        explicit_id: Option<NodeId>,
    ) -> GraphResult<Node> {
        let id = explicit_id.unwrap_or_else(NodeId::new);
        if self.store.contains_node_id(id) {
            return Err(GraphError::NodeAlreadyExists(id));
        }
        if let Some(p) = parent {
            if self.store.active_node(p).is_none() {
                return Err(GraphError::InvalidParent(p));
            }
        }

        let node = Node::new(id, kind, props);
        self.properties.index_node(&node);
        self.store.insert_active_node(node.clone());
        if let Some(p) = parent {
            self.insert_hierarchy_edge(p, id);
        }

        self.bus.emit(&GraphEvent::NodeAdded(node.clone()));
        Ok(node)
    }

    /// Shallow-merge `partial` into an active node's props and re-index
    pub fn update_node_props(&mut self, id: NodeId, partial: PropertyMap) -> GraphResult<Node> {
        let before = self
            .store
            .active_node(id)
            .cloned()
            .ok_or(GraphError::NodeNotFound(id))?;

        self.properties.deindex_node(&before);
        if let Some(node) = self.store.active_node_mut(id) {
            node.merge_props(partial);
        }
        let after = self
            .store
            .active_node(id)
            .cloned()
            .ok_or(GraphError::NodeNotFound(id))?;
        self.properties.index_node(&after);

        self.bus.emit(&GraphEvent::NodeUpdated(after.clone()));
        Ok(after)
    }

    /// Soft-delete a node: every incident edge is removed first, then the
    /// node moves to limbo and its index entries are cleared.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let node = self
            .store
            .active_node(id)
            .cloned()
            .ok_or(GraphError::NodeNotFound(id))?;
        if self.hierarchy.has_children(id) {
            return Err(GraphError::HasChildren(id));
        }

        for edge_id in self.adjacency.incident_edges(id) {
            self.remove_edge(edge_id)?;
        }
        self.properties.deindex_node(&node);
        self.store.park_node(id);

        self.bus.emit(&GraphEvent::NodeRemoved(node.clone()));
        Ok(node)
    }

    /// Post-order soft-delete of the subtree rooted at `id`
    pub fn remove_node_and_descendants(&mut self, id: NodeId) -> GraphResult<Vec<Node>> {
        if self.store.active_node(id).is_none() {
            return Err(GraphError::NodeNotFound(id));
        }
        let mut removed = Vec::new();
        self.remove_subtree(id, &mut removed)?;
        Ok(removed)
    }

    fn remove_subtree(&mut self, id: NodeId, removed: &mut Vec<Node>) -> GraphResult<()> {
        for child in self.hierarchy.children_of(id) {
            self.remove_subtree(child, removed)?;
        }
        removed.push(self.remove_node(id)?);
        Ok(())
    }

    /// Move a limbo node back to the active tier, re-establish its index
    /// entries, and opportunistically restore any limbo edge touching it
    /// whose other endpoint is active.
    pub fn restore_node(&mut self, id: NodeId) -> GraphResult<Node> {
        match self.store.node_state(id) {
            Some(ElementState::Active) => return Err(GraphError::NodeAlreadyActive(id)),
            Some(ElementState::Limbo) => {}
            None => return Err(GraphError::NodeNotFound(id)),
        }

        let node = self
            .store
            .revive_node(id)
            .cloned()
            .ok_or(GraphError::NodeNotFound(id))?;
        self.properties.index_node(&node);
        self.bus.emit(&GraphEvent::NodeRestored(node.clone()));

        let candidates: Vec<EdgeId> = self
            .store
            .limbo_edges()
            .filter(|e| e.touches(id))
            .map(|e| e.id)
            .collect();
        for edge_id in candidates {
            // best effort: skip edges whose other endpoint is still in limbo
            // or whose hierarchy invariants no longer hold
            let _ = self.restore_edge(edge_id);
        }
        Ok(node)
    }

    /// Permanently erase a node from whichever tier it occupies, destroying
    /// every connected edge and hyperedge first. Irreversible.
    pub fn destroy_node(&mut self, id: NodeId, recursive: bool) -> GraphResult<()> {
        if self.store.node_state(id).is_none() {
            return Err(GraphError::NodeNotFound(id));
        }
        if self.hierarchy.has_children(id) {
            if !recursive {
                return Err(GraphError::HasChildren(id));
            }
            for child in self.hierarchy.children_of(id) {
                self.destroy_node(child, true)?;
            }
        }

        let mut edge_ids = self.adjacency.incident_edges(id);
        edge_ids.extend(self.store.limbo_edges().filter(|e| e.touches(id)).map(|e| e.id));
        for edge_id in edge_ids {
            self.destroy_edge(edge_id)?;
        }
        for hyper_id in self.hyper.edges_of(id) {
            self.destroy_hyper_edge(hyper_id)?;
        }

        if let Some(node) = self.store.active_node(id).cloned() {
            self.properties.deindex_node(&node);
        }
        self.store.erase_node(id);

        self.bus.emit(&GraphEvent::NodeDestroyed(id));
        Ok(())
    }

    /// Re-parent an active node (`None` detaches it to the top level).
    /// The node's previous hierarchy edge is replaced, not parked.
    pub fn move_node(&mut self, id: NodeId, new_parent: Option<NodeId>) -> GraphResult<Node> {
        let node = self
            .store
            .active_node(id)
            .cloned()
            .ok_or(GraphError::NodeNotFound(id))?;
        if let Some(p) = new_parent {
            if self.store.active_node(p).is_none() {
                return Err(GraphError::InvalidParent(p));
            }
            if p == id {
                return Err(GraphError::SelfReference(id));
            }
            if self.hierarchy.is_ancestor(id, p) {
                return Err(GraphError::CycleDetected(id));
            }
        }

        self.drop_parent_edge(id);
        if let Some(p) = new_parent {
            self.insert_hierarchy_edge(p, id);
        }

        self.bus.emit(&GraphEvent::NodeMoved {
            node: node.clone(),
            parent: new_parent,
        });
        Ok(node)
    }

    /// Deep copy of a node's kind and props under a fresh identifier.
    /// The clone is not inserted; the caller must add it explicitly.
    pub fn clone_node(&self, id: NodeId) -> GraphResult<Node> {
        let node = self.store.get_node(id).ok_or(GraphError::NodeNotFound(id))?;
        Ok(Node::new(NodeId::new(), node.kind, node.props.clone()))
    }

    // ============================================================
    // Edge operations
    // ============================================================

    /// Create a directed edge between two active nodes
    pub fn add_edge(
        &mut self,
        kind: EdgeKind,
        from: NodeId,
        to: NodeId,
        props: PropertyMap,
    ) -> GraphResult<Edge> {
        self.add_edge_with_id(kind, from, to, props, None)
    }

    /// Create an edge under a caller-supplied identifier
    pub fn add_edge_with_id(
        &mut self,
        kind: EdgeKind,
        from: NodeId,
        to: NodeId,
        props: PropertyMap,
        explicit_id: Option<EdgeId>,
    ) -> GraphResult<Edge> {
        let id = explicit_id.unwrap_or_else(EdgeId::new);
        if self.store.contains_edge_id(id) {
            return Err(GraphError::EdgeAlreadyExists(id));
        }
        self.require_active_node(from)?;
        self.require_active_node(to)?;
        if kind.is_hierarchy() {
            self.validate_hierarchy_link(from, to)?;
        }

        let edge = Edge::new(id, kind, from, to, props);
        self.adjacency.add(&edge);
        if edge.is_hierarchy() {
            self.hierarchy.attach(from, to);
        }
        self.store.insert_active_edge(edge.clone());

        self.bus.emit(&GraphEvent::EdgeAdded(edge.clone()));
        Ok(edge)
    }

    /// Soft-delete an edge; hierarchy edges detach the parent/child relation
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self
            .store
            .active_edge(id)
            .cloned()
            .ok_or(GraphError::EdgeNotFound(id))?;

        self.adjacency.remove(&edge);
        if edge.is_hierarchy() {
            self.hierarchy.detach(edge.to);
        }
        self.store.park_edge(id);

        self.bus.emit(&GraphEvent::EdgeRemoved(edge.clone()));
        Ok(edge)
    }

    /// Move a limbo edge back to the active tier under its original
    /// identifier. Hierarchy invariants are re-validated before attaching.
    pub fn restore_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        match self.store.edge_state(id) {
            Some(ElementState::Active) => return Err(GraphError::EdgeAlreadyActive(id)),
            Some(ElementState::Limbo) => {}
            None => return Err(GraphError::EdgeNotFound(id)),
        }
        let edge = self
            .store
            .limbo_edge(id)
            .cloned()
            .ok_or(GraphError::EdgeNotFound(id))?;
        for endpoint in [edge.from, edge.to] {
            if self.store.active_node(endpoint).is_none() {
                return Err(GraphError::EndpointInactive(endpoint));
            }
        }
        if edge.is_hierarchy() {
            self.validate_hierarchy_link(edge.from, edge.to)?;
        }

        self.store.revive_edge(id);
        self.adjacency.add(&edge);
        if edge.is_hierarchy() {
            self.hierarchy.attach(edge.from, edge.to);
        }

        self.bus.emit(&GraphEvent::EdgeRestored(edge.clone()));
        Ok(edge)
    }

    /// Permanently erase an edge from whichever tier it occupies
    pub fn destroy_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        match self.store.edge_state(id) {
            Some(ElementState::Active) => {
                let edge = self
                    .store
                    .active_edge(id)
                    .cloned()
                    .ok_or(GraphError::EdgeNotFound(id))?;
                self.adjacency.remove(&edge);
                if edge.is_hierarchy() {
                    self.hierarchy.detach(edge.to);
                }
            }
            Some(ElementState::Limbo) => {}
            None => return Err(GraphError::EdgeNotFound(id)),
        }
        self.store.erase_edge(id);

        self.bus.emit(&GraphEvent::EdgeDestroyed(id));
        Ok(())
    }

    /// Retarget an active edge's endpoints; `None` keeps the current one.
    /// Hierarchy edges re-validate the single-parent and acyclicity
    /// invariants against the new endpoints.
    pub fn move_edge(
        &mut self,
        id: EdgeId,
        new_from: Option<NodeId>,
        new_to: Option<NodeId>,
    ) -> GraphResult<Edge> {
        let edge = self
            .store
            .active_edge(id)
            .cloned()
            .ok_or(GraphError::EdgeNotFound(id))?;
        let from = new_from.unwrap_or(edge.from);
        let to = new_to.unwrap_or(edge.to);
        self.require_active_node(from)?;
        self.require_active_node(to)?;
        if edge.is_hierarchy() {
            if from == to {
                return Err(GraphError::SelfReference(from));
            }
            if to != edge.to && self.hierarchy.parent_of(to).is_some() {
                return Err(GraphError::ParentConflict(to));
            }
            // ancestry is judged with this edge out of the forest: the
            // retarget replaces its parent link, so a path through it
            // cannot make the result cyclic
            self.hierarchy.detach(edge.to);
            let cyclic = self.hierarchy.is_ancestor(to, from);
            self.hierarchy.attach(edge.from, edge.to);
            if cyclic {
                return Err(GraphError::CycleDetected(to));
            }
        }

        self.adjacency.remove(&edge);
        if edge.is_hierarchy() {
            self.hierarchy.detach(edge.to);
        }
        if let Some(e) = self.store.active_edge_mut(id) {
            e.from = from;
            e.to = to;
            e.updated_at = chrono::Utc::now().timestamp_millis();
        }
        let updated = self
            .store
            .active_edge(id)
            .cloned()
            .ok_or(GraphError::EdgeNotFound(id))?;
        self.adjacency.add(&updated);
        if updated.is_hierarchy() {
            self.hierarchy.attach(from, to);
        }

        self.bus.emit(&GraphEvent::EdgeMoved(updated.clone()));
        Ok(updated)
    }

    // ============================================================
    // Hyperedge operations
    // ============================================================

    /// Create a hyperedge over two or more active nodes
    pub fn add_hyper_edge(
        &mut self,
        nodes: Vec<NodeId>,
        props: PropertyMap,
    ) -> GraphResult<HyperEdge> {
        if nodes.len() < 2 {
            return Err(GraphError::TooFewHyperNodes(nodes.len()));
        }
        for &node in &nodes {
            self.require_active_node(node)?;
        }

        let hyper = HyperEdge::new(EdgeId::new(), nodes, props);
        self.hyper.add(&hyper);
        self.store.insert_hyper_edge(hyper.clone());
        Ok(hyper)
    }

    /// Permanently erase a hyperedge
    pub fn destroy_hyper_edge(&mut self, id: EdgeId) -> GraphResult<HyperEdge> {
        let hyper = self
            .store
            .get_hyper_edge(id)
            .cloned()
            .ok_or(GraphError::EdgeNotFound(id))?;
        self.hyper.remove(&hyper);
        self.store.erase_hyper_edge(id);
        Ok(hyper)
    }

    pub fn get_hyper_edge(&self, id: EdgeId) -> Option<&HyperEdge> {
        self.store.get_hyper_edge(id)
    }

    /// Hyperedges an active node participates in
    pub fn hyper_edges_of(&self, id: NodeId) -> Vec<&HyperEdge> {
        self.hyper
            .edges_of(id)
            .into_iter()
            .filter_map(|hid| self.store.get_hyper_edge(hid))
            .collect()
    }

    // ============================================================
    // Queries
    // ============================================================

    /// Look up a node, active tier first, then limbo
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.store.get_node(id)
    }

    /// Look up an edge, active tier first, then limbo
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.store.get_edge(id)
    }

    pub fn node_state(&self, id: NodeId) -> Option<ElementState> {
        self.store.node_state(id)
    }

    pub fn edge_state(&self, id: EdgeId) -> Option<ElementState> {
        self.store.edge_state(id)
    }

    /// Equality search over the active node set, in insertion order.
    ///
    /// Scalar filters intersect property-index candidate sets; complex
    /// values fall back to comparing against the node's props directly.
    pub fn find_nodes(&self, query: &NodeQuery) -> Vec<&Node> {
        let mut candidates: Option<FxHashSet<NodeId>> = None;
        let mut intersect = |set: &FxHashSet<NodeId>, candidates: &mut Option<FxHashSet<NodeId>>| {
            *candidates = Some(match candidates.take() {
                Some(current) => current.intersection(set).copied().collect(),
                None => set.clone(),
            });
        };

        if let Some(kind) = query.kind {
            match self.properties.kind_set(kind) {
                Some(set) => intersect(set, &mut candidates),
                None => return Vec::new(),
            }
        }

        let mut scan_filters = Vec::new();
        for (key, value) in &query.props {
            match value.index_key() {
                Some(ik) => match self.properties.nodes_with(key, &ik) {
                    Some(set) => intersect(set, &mut candidates),
                    None => return Vec::new(),
                },
                None => scan_filters.push((key, value)),
            }
        }

        self.store
            .active_nodes()
            .filter(|node| {
                candidates
                    .as_ref()
                    .is_none_or(|set| set.contains(&node.id))
                    && scan_filters
                        .iter()
                        .all(|(key, value)| node.props.get(*key) == Some(*value))
            })
            .collect()
    }

    /// All active nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.store.active_nodes()
    }

    /// All active edges, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.store.active_edges()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.hierarchy.parent_of(id)
    }

    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.hierarchy.children_of(id)
    }

    pub fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        self.hierarchy.is_ancestor(candidate, node)
    }

    pub fn ancestors_of(&self, id: NodeId) -> Vec<NodeId> {
        self.hierarchy.ancestors_of(id)
    }

    pub fn descendants_of(&self, id: NodeId) -> Vec<NodeId> {
        self.hierarchy.descendants_of(id)
    }

    /// Incident active edge identifiers, both directions
    pub fn incident_edges(&self, id: NodeId) -> Vec<EdgeId> {
        self.adjacency.incident_edges(id)
    }

    /// Number of active nodes
    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    /// Number of active edges
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Number of active nodes of a given kind
    pub fn count_by_kind(&self, kind: NodeKind) -> usize {
        self.properties.kind_set(kind).map_or(0, |set| set.len())
    }

    /// Drop all elements and index state. Listeners stay registered.
    pub fn clear(&mut self) {
        self.store.clear();
        self.hierarchy.clear();
        self.adjacency.clear();
        self.hyper.clear();
        self.properties.clear();
    }

    // ============================================================
    // Events
    // ============================================================

    /// Register a listener for an event kind
    pub fn on(&mut self, kind: EventKind, listener: impl Fn(&GraphEvent) + 'static) -> ListenerId {
        self.bus.on(kind, listener)
    }

    /// Deregister a listener
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.bus.off(kind, id)
    }

    // ============================================================
    // Internal helpers
    // ============================================================

    fn require_active_node(&self, id: NodeId) -> GraphResult<()> {
        match self.store.node_state(id) {
            Some(ElementState::Active) => Ok(()),
            Some(ElementState::Limbo) => Err(GraphError::EndpointInactive(id)),
            None => Err(GraphError::NodeNotFound(id)),
        }
    }

    fn validate_hierarchy_link(&self, parent: NodeId, child: NodeId) -> GraphResult<()> {
        if parent == child {
            return Err(GraphError::SelfReference(parent));
        }
        if self.hierarchy.parent_of(child).is_some() {
            return Err(GraphError::ParentConflict(child));
        }
        if self.hierarchy.is_ancestor(child, parent) {
            return Err(GraphError::CycleDetected(child));
        }
        Ok(())
    }

    /// Insert a hierarchy edge without emitting; callers already validated
    fn insert_hierarchy_edge(&mut self, parent: NodeId, child: NodeId) -> EdgeId {
        let edge = Edge::new(
            EdgeId::new(),
            EdgeKind::Hierarchy,
            parent,
            child,
            PropertyMap::new(),
        );
        let id = edge.id;
        self.adjacency.add(&edge);
        self.hierarchy.attach(parent, child);
        self.store.insert_active_edge(edge);
        id
    }

    /// Erase the active hierarchy edge pointing at `child`, if any, without
    /// emitting and without leaving a limbo copy
    fn drop_parent_edge(&mut self, child: NodeId) {
        let existing = self.adjacency.incident_edges(child).into_iter().find(|eid| {
            self.store
                .active_edge(*eid)
                .is_some_and(|e| e.is_hierarchy() && e.to == child)
        });
        if let Some(edge_id) = existing {
            if let Some(edge) = self.store.active_edge(edge_id).cloned() {
                self.adjacency.remove(&edge);
                self.hierarchy.detach(child);
                self.store.erase_edge(edge_id);
            }
        }
    }

    pub(crate) fn capture_state(&self) -> StateSnapshot {
        StateSnapshot {
            store: self.store.clone(),
            hierarchy: self.hierarchy.clone(),
            adjacency: self.adjacency.clone(),
            hyper: self.hyper.clone(),
            properties: self.properties.clone(),
        }
    }

    pub(crate) fn restore_state(&mut self, snapshot: StateSnapshot) {
        self.store = snapshot.store;
        self.hierarchy = snapshot.hierarchy;
        self.adjacency = snapshot.adjacency;
        self.hyper = snapshot.hyper;
        self.properties = snapshot.properties;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::property::props;

    fn engine_with_note() -> (GraphEngine, NodeId) {
        let mut engine = GraphEngine::new();
        let node = engine
            .add_node(NodeKind::Note, props([("title", "a")]), None, None)
            .unwrap();
        (engine, node.id)
    }

    #[test]
    fn test_add_node_under_parent() {
        let mut engine = GraphEngine::new();
        let folder = engine
            .add_node(NodeKind::Folder, PropertyMap::new(), None, None)
            .unwrap();
        let note = engine
            .add_node(NodeKind::Note, PropertyMap::new(), Some(folder.id), None)
            .unwrap();

        assert_eq!(engine.parent_of(note.id), Some(folder.id));
        assert_eq!(engine.children_of(folder.id), vec![note.id]);
        assert_eq!(engine.edge_count(), 1);
    }

    #[test]
    fn test_add_node_invalid_parent_is_atomic() {
        let mut engine = GraphEngine::new();
        let ghost = NodeId::new();
        let err = engine
            .add_node(NodeKind::Note, PropertyMap::new(), Some(ghost), None)
            .unwrap_err();

        assert_eq!(err, GraphError::InvalidParent(ghost));
        assert_eq!(engine.node_count(), 0);
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let (mut engine, id) = engine_with_note();
        let err = engine
            .add_node(NodeKind::Note, PropertyMap::new(), None, Some(id))
            .unwrap_err();
        assert_eq!(err, GraphError::NodeAlreadyExists(id));
    }

    #[test]
    fn test_second_parent_rejected() {
        let mut engine = GraphEngine::new();
        let p1 = engine.add_node(NodeKind::Folder, PropertyMap::new(), None, None).unwrap();
        let p2 = engine.add_node(NodeKind::Folder, PropertyMap::new(), None, None).unwrap();
        let child = engine
            .add_node(NodeKind::Note, PropertyMap::new(), Some(p1.id), None)
            .unwrap();

        let err = engine
            .add_edge(EdgeKind::Hierarchy, p2.id, child.id, PropertyMap::new())
            .unwrap_err();
        assert_eq!(err, GraphError::ParentConflict(child.id));
        assert_eq!(engine.parent_of(child.id), Some(p1.id));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut engine = GraphEngine::new();
        let a = engine.add_node(NodeKind::Folder, PropertyMap::new(), None, None).unwrap();
        let b = engine
            .add_node(NodeKind::Folder, PropertyMap::new(), Some(a.id), None)
            .unwrap();

        let err = engine
            .add_edge(EdgeKind::Hierarchy, b.id, a.id, PropertyMap::new())
            .unwrap_err();
        assert_eq!(err, GraphError::CycleDetected(a.id));

        let err = engine
            .add_edge(EdgeKind::Hierarchy, a.id, a.id, PropertyMap::new())
            .unwrap_err();
        assert_eq!(err, GraphError::SelfReference(a.id));
    }

    #[test]
    fn test_update_reindexes() {
        let (mut engine, id) = engine_with_note();
        engine.update_node_props(id, props([("title", "b")])).unwrap();

        let hits = engine.find_nodes(&NodeQuery::new().prop("title", "b"));
        assert_eq!(hits.len(), 1);
        assert!(engine.find_nodes(&NodeQuery::new().prop("title", "a")).is_empty());
    }

    #[test]
    fn test_move_node_cycle_guard() {
        let mut engine = GraphEngine::new();
        let a = engine.add_node(NodeKind::Folder, PropertyMap::new(), None, None).unwrap();
        let b = engine
            .add_node(NodeKind::Folder, PropertyMap::new(), Some(a.id), None)
            .unwrap();
        let c = engine
            .add_node(NodeKind::Folder, PropertyMap::new(), Some(b.id), None)
            .unwrap();

        let err = engine.move_node(a.id, Some(c.id)).unwrap_err();
        assert_eq!(err, GraphError::CycleDetected(a.id));

        engine.move_node(c.id, Some(a.id)).unwrap();
        assert_eq!(engine.parent_of(c.id), Some(a.id));
        assert_eq!(engine.children_of(b.id), Vec::new());
    }

    #[test]
    fn test_clone_node_is_detached() {
        let (engine, id) = engine_with_note();
        let copy = engine.clone_node(id).unwrap();

        assert_ne!(copy.id, id);
        assert_eq!(copy.get_prop("title").unwrap().as_string(), Some("a"));
        assert!(engine.get_node(copy.id).is_none());
    }
}
