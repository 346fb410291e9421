//! Graph algorithms: traversal, shortest paths, and analytics

pub mod common;
pub mod kmeans;
pub mod pagerank;
pub mod pathfinding;
pub mod traversal;

pub use common::GraphView;
pub use kmeans::{k_means, KMeansConfig, KMeansResult};
pub use pagerank::{page_rank, PageRankConfig, PageRankResult};
pub use pathfinding::{a_star, dijkstra, PathOptions, PathResult, PathStep};
pub use traversal::{neighbors, traverse, Direction, TraversalOrder};
