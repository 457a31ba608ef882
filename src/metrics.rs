//! Summary metrics for a decoded path set.
//!
//! ### Example
//! ```rust
//! use edspaths::{max_scoring_paths, PathMetrics, PathParams};
//! let found = max_scoring_paths("_GGG{CCG,AGGGA}A_", &PathParams::default()).unwrap();
//! let m = PathMetrics::compute(&found.graph, &found.paths);
//! assert_eq!(m.path_count, 2);
//! assert_eq!(m.covered_vertices, 9);
//! ```
//!
use crate::common::{EdsError, Score};
use crate::decoder::Path;
use crate::graph::{BubbleGraph, Vertex};

/// Coverage figures for a set of paths.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMetrics {
    /// Number of paths.
    pub path_count: usize,
    /// Vertices lying on some path.
    pub covered_vertices: usize,
    /// Vertices in the graph.
    pub total_vertices: usize,
    /// `covered_vertices / total_vertices` as a percentage (0 for an empty graph).
    pub coverage: f64,
    /// Mean number of vertices per path (0 when there are no paths).
    pub average_length: f64,
}

impl PathMetrics {
    /// Paths are assumed vertex-disjoint, as returned by [`crate::decode_paths`].
    pub fn compute(graph: &BubbleGraph, paths: &[Path]) -> Self {
        let path_count = paths.len();
        let covered_vertices: usize = paths.iter().map(Vec::len).sum();
        let total_vertices = graph.vertex_count();
        let coverage = if total_vertices == 0 {
            0.0
        } else {
            covered_vertices as f64 * 100.0 / total_vertices as f64
        };
        let average_length = if path_count == 0 { 0.0 } else { covered_vertices as f64 / path_count as f64 };
        Self { path_count, covered_vertices, total_vertices, coverage, average_length }
    }
}

/// Sum of the vertex weights along `path`.
pub fn path_weight(graph: &BubbleGraph, path: &[Vertex]) -> Result<Score, EdsError> {
    path.iter().map(|&v| graph.weight(v)).sum()
}

/// Characters spelled by `path`.
pub fn path_text(graph: &BubbleGraph, path: &[Vertex]) -> Result<String, EdsError> {
    path.iter().map(|&v| graph.symbol(v)).collect()
}
