//! Shortest paths: Dijkstra and A*
//!
//! Dijkstra is A* with a zero heuristic; both share one search core over a
//! min-heap keyed by estimated total cost. Ties break toward the state
//! discovered first, so among equal-cost paths the first-found one wins.

use crate::graph::{Edge, EdgeId, GraphEngine, GraphResult, NodeId};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Search options shared by [`dijkstra`] and [`a_star`]
pub struct PathOptions<'a> {
    /// Follow edges only from `from` to `to` when set (the default);
    /// otherwise edges are traversable in either direction
    pub directed: bool,
    /// Per-edge cost; defaults to uniform cost 1. Edges with a negative or
    /// non-finite cost are skipped.
    pub weight: Option<&'a dyn Fn(&Edge) -> f64>,
}

impl Default for PathOptions<'_> {
    fn default() -> Self {
        Self {
            directed: true,
            weight: None,
        }
    }
}

/// One element of a reconstructed path, alternating node, edge, node, …
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    Node(NodeId),
    Edge(EdgeId),
}

/// Outcome of a shortest-path search
#[derive(Debug, Clone)]
pub struct PathResult {
    pub found: bool,
    /// Total path cost; infinity when no path exists
    pub distance: f64,
    /// Root to goal inclusive; empty when no path exists
    pub path: Vec<PathStep>,
}

impl PathResult {
    fn not_found() -> Self {
        Self {
            found: false,
            distance: f64::INFINITY,
            path: Vec::new(),
        }
    }
}

struct State {
    estimate: f64,
    cost: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    // reversed so the BinaryHeap pops the smallest estimate; equal
    // estimates pop in discovery order
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .partial_cmp(&self.estimate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `root` to `goal` under non-negative edge costs
pub fn dijkstra(
    engine: &GraphEngine,
    root: NodeId,
    goal: NodeId,
    options: PathOptions<'_>,
) -> GraphResult<PathResult> {
    a_star(engine, root, goal, options, |_| 0.0)
}

/// A* search guided by an admissible cost-to-goal estimate.
///
/// An inadmissible heuristic (one that overestimates) can return a
/// suboptimal path; with the zero heuristic this is exactly Dijkstra.
pub fn a_star(
    engine: &GraphEngine,
    root: NodeId,
    goal: NodeId,
    options: PathOptions<'_>,
    heuristic: impl Fn(NodeId) -> f64,
) -> GraphResult<PathResult> {
    if engine.get_node(root).is_none() || engine.get_node(goal).is_none() {
        return Ok(PathResult::not_found());
    }

    let mut dist: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeId, (NodeId, EdgeId)> = FxHashMap::default();
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist.insert(root, 0.0);
    heap.push(State {
        estimate: heuristic(root),
        cost: 0.0,
        seq,
        node: root,
    });

    while let Some(State { cost, node, .. }) = heap.pop() {
        if node == goal {
            return Ok(reconstruct(root, goal, cost, &prev));
        }
        if dist.get(&node).is_some_and(|&d| cost > d) {
            continue;
        }

        for edge_id in engine.incident_edges(node) {
            let Some(edge) = engine.get_edge(edge_id) else {
                continue;
            };
            if options.directed && edge.from != node {
                continue;
            }
            let Some(next) = edge.other_endpoint(node) else {
                continue;
            };
            let weight = options.weight.map_or(1.0, |w| w(edge));
            if !weight.is_finite() || weight < 0.0 {
                continue;
            }

            let candidate = cost + weight;
            let better = dist.get(&next).is_none_or(|&d| candidate < d);
            if better {
                dist.insert(next, candidate);
                prev.insert(next, (node, edge_id));
                seq += 1;
                heap.push(State {
                    estimate: candidate + heuristic(next),
                    cost: candidate,
                    seq,
                    node: next,
                });
            }
        }
    }

    Ok(PathResult::not_found())
}

fn reconstruct(
    root: NodeId,
    goal: NodeId,
    distance: f64,
    prev: &FxHashMap<NodeId, (NodeId, EdgeId)>,
) -> PathResult {
    let mut path = vec![PathStep::Node(goal)];
    let mut at = goal;
    while at != root {
        let Some(&(parent, edge)) = prev.get(&at) else {
            return PathResult::not_found();
        };
        path.push(PathStep::Edge(edge));
        path.push(PathStep::Node(parent));
        at = parent;
    }
    path.reverse();
    PathResult {
        found: true,
        distance,
        path,
    }
}
