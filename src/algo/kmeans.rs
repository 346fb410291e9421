//! Lloyd's-algorithm k-means over caller-supplied feature vectors
//!
//! The engine knows nothing about feature extraction: the caller maps each
//! node to a numeric vector and the algorithm clusters those vectors.

use crate::graph::{GraphEngine, GraphError, GraphResult, Node, NodeId};
use rand::seq::index::sample;

pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,
    /// Iteration cap
    pub max_iterations: usize,
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Member node identifiers per cluster; clusters can be empty
    pub clusters: Vec<Vec<NodeId>>,
    pub centroids: Vec<Vec<f64>>,
    /// Iterations actually run
    pub iterations: usize,
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Cluster nodes by feature vector.
///
/// Candidates are the supplied identifiers, or every active node when
/// `node_ids` is `None`. Initial centroids are `k` randomly chosen member
/// vectors; convergence is assignment stability. Fails with
/// [`GraphError::InsufficientNodes`] when `k` exceeds the candidate count.
pub fn k_means(
    engine: &GraphEngine,
    node_ids: Option<&[NodeId]>,
    config: KMeansConfig,
    attributes: impl Fn(&Node) -> Vec<f64>,
) -> GraphResult<KMeansResult> {
    let members: Vec<(NodeId, Vec<f64>)> = match node_ids {
        Some(ids) => ids
            .iter()
            .map(|&id| {
                engine
                    .get_node(id)
                    .map(|node| (id, attributes(node)))
                    .ok_or(GraphError::NodeNotFound(id))
            })
            .collect::<GraphResult<_>>()?,
        None => engine
            .nodes()
            .map(|node| (node.id, attributes(node)))
            .collect(),
    };

    let k = config.k;
    if k == 0 || k > members.len() {
        return Err(GraphError::InsufficientNodes {
            requested: k,
            available: members.len(),
        });
    }

    let mut rng = rand::thread_rng();
    let mut centroids: Vec<Vec<f64>> = sample(&mut rng, members.len(), k)
        .into_iter()
        .map(|idx| members[idx].1.clone())
        .collect();

    let mut assignments = vec![usize::MAX; members.len()];
    let mut iterations = 0;

    // the assignment pass always runs at least once so every member ends
    // up in a cluster even under a zero iteration cap
    for _ in 0..config.max_iterations.max(1) {
        iterations += 1;

        // ties break toward the lower cluster index
        let mut changed = false;
        for (point, slot) in members.iter().zip(assignments.iter_mut()) {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (idx, centroid) in centroids.iter().enumerate() {
                let dist = squared_distance(&point.1, centroid);
                if dist < best_dist {
                    best = idx;
                    best_dist = dist;
                }
            }
            if *slot != best {
                *slot = best;
                changed = true;
            }
        }

        // a cluster left empty is re-seeded from a member of a cluster
        // that can spare one; with none to spare it keeps its centroid
        let mut sizes = vec![0usize; k];
        for &slot in &assignments {
            sizes[slot] += 1;
        }
        for idx in 0..k {
            if sizes[idx] > 0 {
                continue;
            }
            if let Some(donor) = assignments.iter().position(|&slot| sizes[slot] > 1) {
                sizes[assignments[donor]] -= 1;
                assignments[donor] = idx;
                sizes[idx] = 1;
                centroids[idx] = members[donor].1.clone();
                changed = true;
            }
        }

        if !changed {
            break;
        }

        for (idx, centroid) in centroids.iter_mut().enumerate() {
            let cluster: Vec<&Vec<f64>> = members
                .iter()
                .zip(&assignments)
                .filter(|(_, &slot)| slot == idx)
                .map(|((_, vector), _)| vector)
                .collect();
            // empty clusters keep their previous centroid
            if cluster.is_empty() {
                continue;
            }
            let dims = centroid.len();
            let mut mean = vec![0.0; dims];
            for vector in &cluster {
                for (d, value) in vector.iter().take(dims).enumerate() {
                    mean[d] += value;
                }
            }
            for value in &mut mean {
                *value /= cluster.len() as f64;
            }
            *centroid = mean;
        }
    }

    let mut clusters = vec![Vec::new(); k];
    for ((id, _), &slot) in members.iter().zip(&assignments) {
        clusters[slot].push(*id);
    }

    Ok(KMeansResult {
        clusters,
        centroids,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{props, NodeKind, PropertyValue};

    fn point(engine: &mut GraphEngine, x: i64) -> NodeId {
        engine
            .add_node(NodeKind::Note, props([("x", PropertyValue::Integer(x))]), None, None)
            .unwrap()
            .id
    }

    fn x_of(node: &Node) -> Vec<f64> {
        vec![node
            .get_prop("x")
            .and_then(PropertyValue::as_number)
            .unwrap_or(0.0)]
    }

    #[test]
    fn test_near_pairs_cluster_together() {
        let mut engine = GraphEngine::new();
        let a = point(&mut engine, 0);
        let b = point(&mut engine, 1);
        let c = point(&mut engine, 10);
        let d = point(&mut engine, 11);

        let result = k_means(&engine, None, KMeansConfig::new(2), x_of).unwrap();

        let cluster_of = |id: NodeId| {
            result
                .clusters
                .iter()
                .position(|cluster| cluster.contains(&id))
                .unwrap()
        };
        assert_eq!(cluster_of(a), cluster_of(b));
        assert_eq!(cluster_of(c), cluster_of(d));
        assert_ne!(cluster_of(a), cluster_of(c));
        assert!(result.clusters.iter().all(|cluster| cluster.len() == 2));
    }

    #[test]
    fn test_duplicate_points_fill_every_cluster() {
        let mut engine = GraphEngine::new();
        point(&mut engine, 5);
        point(&mut engine, 5);

        let result = k_means(&engine, None, KMeansConfig::new(2), x_of).unwrap();

        // identical vectors collapse onto one centroid; re-seeding still
        // leaves no cluster empty
        assert!(result.clusters.iter().all(|cluster| cluster.len() == 1));
    }

    #[test]
    fn test_zero_iteration_cap_still_assigns() {
        let mut engine = GraphEngine::new();
        point(&mut engine, 0);
        point(&mut engine, 1);
        point(&mut engine, 10);

        let config = KMeansConfig {
            k: 2,
            max_iterations: 0,
        };
        let result = k_means(&engine, None, config, x_of).unwrap();

        assert_eq!(result.iterations, 1);
        let total: usize = result.clusters.iter().map(Vec::len).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_k_exceeding_candidates_fails() {
        let mut engine = GraphEngine::new();
        point(&mut engine, 0);

        let err = k_means(&engine, None, KMeansConfig::new(2), x_of).unwrap_err();
        assert_eq!(
            err,
            GraphError::InsufficientNodes {
                requested: 2,
                available: 1,
            }
        );
    }

    #[test]
    fn test_explicit_candidate_subset() {
        let mut engine = GraphEngine::new();
        let a = point(&mut engine, 0);
        let b = point(&mut engine, 100);
        point(&mut engine, 50);

        let result = k_means(&engine, Some(&[a, b]), KMeansConfig::new(2), x_of).unwrap();
        let total: usize = result.clusters.iter().map(Vec::len).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_unknown_candidate_fails() {
        let engine = GraphEngine::new();
        let ghost = NodeId::new();
        let err = k_means(&engine, Some(&[ghost]), KMeansConfig::new(1), x_of).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound(ghost));
    }
}
