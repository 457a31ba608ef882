//! # edspaths
//!
//! Maximum-scoring vertex-disjoint paths through the bubble graph of an
//! elastic-degenerate string (EDS).
//!
//! An EDS such as `_GGG{CCG,AGGGA}A_` describes a set of related sequences:
//! deterministic runs are shared, `{...}` lists alternative substrings. Each
//! character is a weighted vertex; the alternatives of one `{...}` are parallel
//! *layers* of a bubble that open after the bubble's entry vertex and close at
//! the first vertex after it (the J vertex). The crate selects a set of
//! vertex-disjoint paths maximising
//!
//! ```text
//! Σ over paths (Σ vertex weights − penalty)
//! ```
//!
//! in two linear passes: [`fill_scores`] propagates scores forward and records
//! the winning branch of every cell, [`decode_paths`] follows those choices
//! back from the last vertex.
//!
//! With the default [`WeightScheme`], G and C weigh 1, other bases −1 and the
//! sentinel `_` 0, so the paths are GC-rich stretches of the pangenome.
//!
//! ### Example
//! ```
//! use edspaths::{max_scoring_paths, PathParams, Vertex};
//! let found = max_scoring_paths("_GGG{ATT,ATA}AGCGC_", &PathParams::default()).unwrap();
//! assert_eq!(found.score, 3);
//! assert_eq!(found.paths.len(), 2);
//! assert_eq!(found.paths[0][0], Vertex::new(0, 0, 1));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod common;
pub mod decoder;
pub mod eds;
pub mod engine;
pub mod graph;
pub mod metrics;

pub use common::{EdsError, PathParams, Score, WeightScheme};
pub use decoder::{decode_paths, Path};
pub use eds::{parse_eds, weight_matrix, EdsMatrix, WeightMatrix};
pub use engine::{fill_scores, Continuation, Entry, ScoreTable};
pub use graph::{BubbleGraph, Vertex, VertexKind};
pub use metrics::{path_text, path_weight, PathMetrics};

/// Result of [`max_scoring_paths`].
#[derive(Clone, Debug)]
pub struct PathSearch {
    /// Graph built from the input text.
    pub graph: BubbleGraph,
    /// Total score of the selected paths.
    pub score: Score,
    /// Selected paths, sorted by first vertex.
    pub paths: Vec<Path>,
}

/// Parse `eds_text`, weight it, and find its maximum-scoring path set.
pub fn max_scoring_paths(eds_text: &str, params: &PathParams) -> Result<PathSearch, EdsError> {
    let matrix = parse_eds(eds_text, params.weights.sentinel)?;
    let weights = weight_matrix(&matrix, &params.weights);
    let graph = BubbleGraph::new(&matrix, &weights)?;
    let table = fill_scores(&graph, params.penalty)?;
    let paths = decode_paths(&graph, &table)?;
    let score = table.best_score();
    log::info!("{} paths, score {}", paths.len(), score);
    Ok(PathSearch { graph, score, paths })
}
