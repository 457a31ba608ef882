//! Common types shared by the parser, the graph model and the DP passes:
//! the error enum, the score type and the parameter structs.
//!
//! ## Scoring
//! Every character of an EDS becomes a vertex with an integer weight. The
//! [`WeightScheme`] maps *target* bases (G and C by default) to `match_score`,
//! the sentinel to 0 and everything else to `non_match`. [`PathParams`] adds
//! the gap-open `penalty` charged once per selected path.
//!
//! ## Examples
//! ```rust
//! use edspaths::{PathParams, WeightScheme};
//! let params = PathParams { penalty: 3, ..Default::default() };
//! assert_eq!(params.weights.weight_of('G'), 1);
//! assert_eq!(params.weights.weight_of('_'), 0);
//! assert_eq!(WeightScheme::default().weight_of('a'), -1);
//! ```
//!
use crate::graph::Vertex;

/// Integer score used for vertex weights and DP cells.
pub type Score = i64;

/// Errors that can be returned by the algorithms in this crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EdsError {
    /// Returned when the EDS text contains no characters.
    #[error("empty EDS input")]
    EmptyInput,
    /// Returned if a comma appears outside a `{...}` segment.
    #[error("comma outside a non-deterministic segment at byte {position}")]
    CommaOutsideSegment { position: usize },
    /// Returned if `{` appears inside an already open segment.
    #[error("nested '{{' at byte {position}")]
    NestedOpen { position: usize },
    /// Returned if `}` appears without a matching `{`.
    #[error("unmatched '}}' at byte {position}")]
    UnexpectedClose { position: usize },
    /// Returned if the text ends inside a `{...}` segment.
    #[error("non-deterministic segment is not closed")]
    UnterminatedSegment,
    /// Returned if the segment matrix has no segments.
    #[error("graph has no segments")]
    EmptyGraph,
    /// Returned if a layer holds no characters.
    #[error("segment {segment}, layer {layer} is empty")]
    EmptyLayer { segment: usize, layer: usize },
    /// Returned if the first or the final segment is a bubble.
    #[error("segment {segment} is a bubble at the graph boundary")]
    BubbleAtBoundary { segment: usize },
    /// Returned if two bubbles follow each other without a separator.
    #[error("segment {segment} is a bubble directly after another bubble")]
    AdjacentBubbles { segment: usize },
    /// Returned if the weight matrix does not have the EDS matrix's shape.
    #[error("weight matrix shape differs from the EDS matrix at segment {segment}")]
    ShapeMismatch { segment: usize },
    /// Returned when a vertex does not address a character of the graph.
    #[error("vertex {vertex} is outside the graph")]
    VertexOutOfRange { vertex: Vertex },
    /// Returned when asking for the predecessor of the graph's first vertex.
    #[error("vertex {vertex} has no predecessor")]
    NoPredecessor { vertex: Vertex },
    /// Returned for a negative gap-open penalty.
    #[error("gap-open penalty must be >= 0 (got {penalty})")]
    InvalidPenalty { penalty: Score },
    /// The score table disagrees with the graph it was computed for.
    #[error("inconsistent score table at {vertex}: {reason}")]
    ModelInvariant { vertex: Vertex, reason: &'static str },
}

/// Per-character weighting of an EDS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightScheme {
    /// Weight of a target base.
    pub match_score: Score,
    /// Weight of every other non-sentinel character.
    pub non_match: Score,
    /// Sentinel character; bounds the text and stands in for empty variants. Weight 0.
    pub sentinel: char,
    /// Bases scored with `match_score` (compared case-insensitively).
    pub targets: String,
}

impl Default for WeightScheme {
    fn default() -> Self {
        Self { match_score: 1, non_match: -1, sentinel: '_', targets: "GC".to_string() }
    }
}

impl WeightScheme {
    /// Weight of a single character under this scheme.
    pub fn weight_of(&self, c: char) -> Score {
        if c == self.sentinel {
            0
        } else if self.targets.chars().any(|t| t.eq_ignore_ascii_case(&c)) {
            self.match_score
        } else {
            self.non_match
        }
    }
}

/// Parameters for [`max_scoring_paths`](crate::max_scoring_paths).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathParams {
    /// Gap-open penalty charged once for every selected path (must be >= 0).
    pub penalty: Score,
    /// Vertex weighting.
    pub weights: WeightScheme,
}

impl Default for PathParams {
    fn default() -> Self {
        Self { penalty: 2, weights: WeightScheme::default() }
    }
}
