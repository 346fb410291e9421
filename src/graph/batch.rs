//! Batched mutations and snapshot-rollback transactions
//!
//! A batch is an ordered list of mutation descriptions applied through the
//! normal engine operations: later mutations see the effects of earlier
//! ones, and application stops at the first error. `apply_batch` leaves the
//! partial prefix in place; `transact` captures a full state snapshot up
//! front and restores it wholesale if any mutation fails.

use super::edge::Edge;
use super::engine::GraphEngine;
use super::event::GraphEvent;
use super::node::Node;
use super::property::PropertyMap;
use super::store::{GraphError, GraphResult};
use super::types::{EdgeId, EdgeKind, NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// A single mutation description, the unit of a batch.
///
/// Serializable so batches can be shipped or persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Mutation {
    AddNode {
        kind: NodeKind,
        #[serde(default)]
        props: PropertyMap,
        #[serde(default)]
        parent: Option<NodeId>,
        #[serde(default)]
        id: Option<NodeId>,
    },
    UpdateNodeProps {
        id: NodeId,
        props: PropertyMap,
    },
    AddEdge {
        kind: EdgeKind,
        from: NodeId,
        to: NodeId,
        #[serde(default)]
        props: PropertyMap,
        #[serde(default)]
        id: Option<EdgeId>,
    },
    RemoveNode {
        id: NodeId,
    },
    RemoveNodeAndDescendants {
        id: NodeId,
    },
    RemoveEdge {
        id: EdgeId,
    },
    RestoreNode {
        id: NodeId,
    },
    RestoreEdge {
        id: EdgeId,
    },
    DestroyNode {
        id: NodeId,
        #[serde(default)]
        recursive: bool,
    },
    DestroyEdge {
        id: EdgeId,
    },
    MoveNode {
        id: NodeId,
        parent: Option<NodeId>,
    },
    MoveEdge {
        id: EdgeId,
        #[serde(default)]
        from: Option<NodeId>,
        #[serde(default)]
        to: Option<NodeId>,
    },
}

/// What a successfully applied mutation produced
#[derive(Debug, Clone)]
pub enum MutationOutcome {
    Node(Node),
    Nodes(Vec<Node>),
    Edge(Edge),
    Done,
}

impl GraphEngine {
    fn apply_mutation(&mut self, mutation: Mutation) -> GraphResult<MutationOutcome> {
        match mutation {
            Mutation::AddNode {
                kind,
                props,
                parent,
                id,
            } => self
                .add_node(kind, props, parent, id)
                .map(MutationOutcome::Node),
            Mutation::UpdateNodeProps { id, props } => self
                .update_node_props(id, props)
                .map(MutationOutcome::Node),
            Mutation::AddEdge {
                kind,
                from,
                to,
                props,
                id,
            } => self
                .add_edge_with_id(kind, from, to, props, id)
                .map(MutationOutcome::Edge),
            Mutation::RemoveNode { id } => self.remove_node(id).map(MutationOutcome::Node),
            Mutation::RemoveNodeAndDescendants { id } => self
                .remove_node_and_descendants(id)
                .map(MutationOutcome::Nodes),
            Mutation::RemoveEdge { id } => self.remove_edge(id).map(MutationOutcome::Edge),
            Mutation::RestoreNode { id } => self.restore_node(id).map(MutationOutcome::Node),
            Mutation::RestoreEdge { id } => self.restore_edge(id).map(MutationOutcome::Edge),
            Mutation::DestroyNode { id, recursive } => self
                .destroy_node(id, recursive)
                .map(|_| MutationOutcome::Done),
            Mutation::DestroyEdge { id } => self.destroy_edge(id).map(|_| MutationOutcome::Done),
            Mutation::MoveNode { id, parent } => {
                self.move_node(id, parent).map(MutationOutcome::Node)
            }
            Mutation::MoveEdge { id, from, to } => {
                self.move_edge(id, from, to).map(MutationOutcome::Edge)
            }
        }
    }

    /// Apply mutations in order, stopping at the first error.
    ///
    /// Not atomic: on error the successfully applied prefix stays in place
    /// and the error names the failing mutation's position.
    pub fn apply_batch(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<Vec<MutationOutcome>, (usize, GraphError)> {
        let mut outcomes = Vec::new();
        for (position, mutation) in mutations.into_iter().enumerate() {
            match self.apply_mutation(mutation) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => return Err((position, err)),
            }
        }
        Ok(outcomes)
    }

    /// Apply mutations atomically: all succeed or the engine state is
    /// restored to its pre-transaction snapshot.
    ///
    /// Per-mutation events fire as mutations apply; on rollback they are not
    /// retracted, so listeners observing a `TransactionRollback` must treat
    /// the events since the transaction began as void.
    pub fn transact(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<Vec<MutationOutcome>, GraphError> {
        let snapshot = self.capture_state();
        let mutations: Vec<Mutation> = mutations.into_iter().collect();
        let total = mutations.len();

        match self.apply_batch(mutations.clone()) {
            Ok(outcomes) => {
                self.bus
                    .emit(&GraphEvent::TransactionCommit { mutations: total });
                Ok(outcomes)
            }
            Err((position, error)) => {
                tracing::debug!(%error, position, total, "transaction rolled back");
                self.restore_state(snapshot);
                self.bus.emit(&GraphEvent::TransactionRollback {
                    error: error.clone(),
                    mutations,
                });
                Err(error)
            }
        }
    }
}
