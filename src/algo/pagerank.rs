//! PageRank over the active edge set

use super::common::GraphView;
use crate::graph::{GraphEngine, NodeId};
use rustc_hash::FxHashMap;

/// Power-iteration parameters
pub struct PageRankConfig {
    /// Damping factor, usually 0.85
    pub damping: f64,
    /// Convergence threshold, scaled by node count
    pub precision: f64,
    /// Iteration cap
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            precision: 1e-4,
            max_iterations: 100,
        }
    }
}

/// Final ranks, normalized to sum to 1
#[derive(Debug, Clone)]
pub struct PageRankResult {
    pub ranks: FxHashMap<NodeId, f64>,
    /// Iterations actually run
    pub iterations: usize,
}

impl PageRankResult {
    /// Rank of a node; 0 for nodes absent from the run
    pub fn rank(&self, id: NodeId) -> f64 {
        self.ranks.get(&id).copied().unwrap_or(0.0)
    }
}

/// Classic power-iteration PageRank over all active nodes and edges.
///
/// Dangling nodes (out-degree 0) distribute their rank uniformly across the
/// whole graph each iteration. Terminates when the total absolute rank
/// change falls below `precision × nodeCount` or the iteration cap is hit.
pub fn page_rank(engine: &GraphEngine, config: PageRankConfig) -> PageRankResult {
    let view = GraphView::new(engine, None);
    let n = view.node_count;
    if n == 0 {
        return PageRankResult {
            ranks: FxHashMap::default(),
            iterations: 0,
        };
    }

    let nf = n as f64;
    let d = config.damping;
    let base = (1.0 - d) / nf;

    let mut scores = vec![1.0 / nf; n];
    let mut next_scores = vec![0.0; n];
    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        iterations += 1;

        let dangling_mass: f64 = (0..n)
            .filter(|&i| view.out_degree(i) == 0)
            .map(|i| scores[i])
            .sum();

        let mut total_diff = 0.0;
        for i in 0..n {
            let mut sum_incoming = 0.0;
            for &source in &view.incoming[i] {
                sum_incoming += scores[source] / view.out_degree(source) as f64;
            }
            next_scores[i] = base + d * (sum_incoming + dangling_mass / nf);
            total_diff += (next_scores[i] - scores[i]).abs();
        }

        scores.copy_from_slice(&next_scores);
        if total_diff < config.precision * nf {
            break;
        }
    }

    // normalize so ranks always sum to 1 even when stopped at the cap
    let total: f64 = scores.iter().sum();
    let mut ranks = FxHashMap::default();
    for (idx, score) in scores.into_iter().enumerate() {
        ranks.insert(view.index_to_node[idx], score / total);
    }

    PageRankResult { ranks, iterations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, NodeKind, PropertyMap};

    fn note(engine: &mut GraphEngine) -> NodeId {
        engine
            .add_node(NodeKind::Note, PropertyMap::new(), None, None)
            .unwrap()
            .id
    }

    fn link(engine: &mut GraphEngine, from: NodeId, to: NodeId) {
        engine
            .add_edge(EdgeKind::LinksTo, from, to, PropertyMap::new())
            .unwrap();
    }

    #[test]
    fn test_cycle_ranks_are_equal() {
        let mut engine = GraphEngine::new();
        let a = note(&mut engine);
        let b = note(&mut engine);
        let c = note(&mut engine);
        link(&mut engine, a, b);
        link(&mut engine, b, c);
        link(&mut engine, c, a);

        let result = page_rank(&engine, PageRankConfig::default());

        let sum: f64 = result.ranks.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((result.rank(a) - result.rank(b)).abs() < 1e-4);
        assert!((result.rank(b) - result.rank(c)).abs() < 1e-4);
    }

    #[test]
    fn test_hub_outranks_leaves() {
        let mut engine = GraphEngine::new();
        let hub = note(&mut engine);
        let leaves: Vec<NodeId> = (0..3).map(|_| note(&mut engine)).collect();
        for &leaf in &leaves {
            link(&mut engine, hub, leaf);
            link(&mut engine, leaf, hub);
        }

        let result = page_rank(&engine, PageRankConfig::default());
        assert!(result.rank(hub) > result.rank(leaves[0]));
    }

    #[test]
    fn test_empty_graph() {
        let engine = GraphEngine::new();
        let result = page_rank(&engine, PageRankConfig::default());
        assert!(result.ranks.is_empty());
        assert_eq!(result.iterations, 0);
    }
}
