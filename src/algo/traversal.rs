//! Neighborhood expansion and whole-graph traversal
//!
//! BFS and DFS share one neighbor-expansion step and differ only in queue
//! discipline, so the reachable set is identical for both; only the visit
//! order changes.

use crate::graph::{Edge, EdgeId, EdgeKind, GraphEngine, GraphError, GraphResult, Node, NodeId};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Which incident edges count as traversable from a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
    Any,
}

impl Direction {
    fn admits(self, edge: &Edge, at: NodeId) -> bool {
        match self {
            Direction::Outgoing => edge.from == at,
            Direction::Incoming => edge.to == at,
            Direction::Any => true,
        }
    }
}

/// Queue discipline for [`traverse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// FIFO expansion, level by level
    Bfs,
    /// LIFO expansion, depth first
    Dfs,
}

fn admitted(kinds: Option<&[EdgeKind]>, edge: &Edge) -> bool {
    kinds.is_none_or(|kinds| kinds.contains(&edge.kind))
}

/// Active neighbors of a node, deduplicated, in edge discovery order
pub fn neighbors<'a>(
    engine: &'a GraphEngine,
    id: NodeId,
    direction: Direction,
    edge_kinds: Option<&[EdgeKind]>,
) -> GraphResult<Vec<&'a Node>> {
    if engine.get_node(id).is_none() {
        return Err(GraphError::NodeNotFound(id));
    }

    let mut seen: IndexSet<NodeId> = IndexSet::new();
    for edge_id in engine.incident_edges(id) {
        // identifiers from the adjacency index always resolve to active edges
        if let Some(edge) = engine.get_edge(edge_id) {
            if direction.admits(edge, id) && admitted(edge_kinds, edge) {
                if let Some(other) = edge.other_endpoint(id) {
                    seen.insert(other);
                }
            }
        }
    }

    Ok(seen
        .into_iter()
        .filter_map(|nid| engine.get_node(nid))
        .collect())
}

/// Visit every node reachable from `root` exactly once.
///
/// The visitor receives each node together with the edge path that first
/// reached it from the root (empty for the root itself). Returns the number
/// of nodes visited.
pub fn traverse(
    engine: &GraphEngine,
    root: NodeId,
    order: TraversalOrder,
    direction: Direction,
    edge_kinds: Option<&[EdgeKind]>,
    mut visitor: impl FnMut(&Node, &[EdgeId]),
) -> GraphResult<usize> {
    if engine.get_node(root).is_none() {
        return Err(GraphError::NodeNotFound(root));
    }

    let mut queue: VecDeque<(NodeId, Vec<EdgeId>)> = VecDeque::new();
    let mut discovered: FxHashSet<NodeId> = FxHashSet::default();
    queue.push_back((root, Vec::new()));
    discovered.insert(root);
    let mut visited = 0;

    while let Some((id, path)) = match order {
        TraversalOrder::Bfs => queue.pop_front(),
        TraversalOrder::Dfs => queue.pop_back(),
    } {
        if let Some(node) = engine.get_node(id) {
            visitor(node, &path);
            visited += 1;
        }

        for edge_id in engine.incident_edges(id) {
            let Some(edge) = engine.get_edge(edge_id) else {
                continue;
            };
            if !direction.admits(edge, id) || !admitted(edge_kinds, edge) {
                continue;
            }
            let Some(next) = edge.other_endpoint(id) else {
                continue;
            };
            if discovered.insert(next) {
                let mut next_path = path.clone();
                next_path.push(edge_id);
                queue.push_back((next, next_path));
            }
        }
    }

    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeKind, PropertyMap};

    fn chain(engine: &mut GraphEngine, len: usize) -> Vec<NodeId> {
        let ids: Vec<NodeId> = (0..len)
            .map(|_| {
                engine
                    .add_node(NodeKind::Note, PropertyMap::new(), None, None)
                    .unwrap()
                    .id
            })
            .collect();
        for pair in ids.windows(2) {
            engine
                .add_edge(EdgeKind::LinksTo, pair[0], pair[1], PropertyMap::new())
                .unwrap();
        }
        ids
    }

    #[test]
    fn test_neighbors_directional() {
        let mut engine = GraphEngine::new();
        let ids = chain(&mut engine, 3);

        let out = neighbors(&engine, ids[1], Direction::Outgoing, None).unwrap();
        assert_eq!(out.iter().map(|n| n.id).collect::<Vec<_>>(), vec![ids[2]]);

        let inc = neighbors(&engine, ids[1], Direction::Incoming, None).unwrap();
        assert_eq!(inc.iter().map(|n| n.id).collect::<Vec<_>>(), vec![ids[0]]);

        let any = neighbors(&engine, ids[1], Direction::Any, None).unwrap();
        assert_eq!(any.len(), 2);
    }

    #[test]
    fn test_neighbors_deduplicates_parallel_edges() {
        let mut engine = GraphEngine::new();
        let a = engine.add_node(NodeKind::Note, PropertyMap::new(), None, None).unwrap();
        let b = engine.add_node(NodeKind::Note, PropertyMap::new(), None, None).unwrap();
        engine.add_edge(EdgeKind::LinksTo, a.id, b.id, PropertyMap::new()).unwrap();
        engine.add_edge(EdgeKind::Mentions, a.id, b.id, PropertyMap::new()).unwrap();

        let out = neighbors(&engine, a.id, Direction::Outgoing, None).unwrap();
        assert_eq!(out.len(), 1);

        let filtered =
            neighbors(&engine, a.id, Direction::Outgoing, Some(&[EdgeKind::HasTag])).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_bfs_and_dfs_reach_the_same_set() {
        let mut engine = GraphEngine::new();
        let ids = chain(&mut engine, 5);

        let mut bfs_seen = Vec::new();
        let bfs = traverse(
            &engine,
            ids[0],
            TraversalOrder::Bfs,
            Direction::Outgoing,
            None,
            |node, _| bfs_seen.push(node.id),
        )
        .unwrap();

        let mut dfs_seen = Vec::new();
        let dfs = traverse(
            &engine,
            ids[0],
            TraversalOrder::Dfs,
            Direction::Outgoing,
            None,
            |node, _| dfs_seen.push(node.id),
        )
        .unwrap();

        assert_eq!(bfs, 5);
        assert_eq!(dfs, 5);
        let mut b = bfs_seen.clone();
        let mut d = dfs_seen.clone();
        b.sort();
        d.sort();
        assert_eq!(b, d);
    }

    #[test]
    fn test_visitor_receives_edge_path() {
        let mut engine = GraphEngine::new();
        let ids = chain(&mut engine, 3);

        let mut depths = Vec::new();
        traverse(
            &engine,
            ids[0],
            TraversalOrder::Bfs,
            Direction::Outgoing,
            None,
            |_, path| depths.push(path.len()),
        )
        .unwrap();

        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_root_fails() {
        let engine = GraphEngine::new();
        let ghost = NodeId::new();
        let err = traverse(
            &engine,
            ghost,
            TraversalOrder::Bfs,
            Direction::Any,
            None,
            |_, _| {},
        )
        .unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound(ghost));
    }
}
