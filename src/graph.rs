//! The n-layered bubble graph implied by an EDS.
//!
//! Every character is a vertex addressed by `(segment, layer, index)`.
//! Deterministic segments have one layer; a *bubble* has two or more
//! parallel layers that share the last vertex of the previous segment
//! (the entry) and the first vertex of the next segment (the J vertex).
//!
//! Vertices live in one flat arena in `(segment, layer, index)` order, so a
//! vertex's flat id is its layer's start offset plus its index. The DP
//! tables in [`crate::engine`] are indexed by the same ids.
//!
//! ### Example
//! ```rust
//! use edspaths::{parse_eds, weight_matrix, BubbleGraph, Vertex, VertexKind, WeightScheme};
//! let m = parse_eds("_G{A,CC}T_", '_').unwrap();
//! let g = BubbleGraph::new(&m, &weight_matrix(&m, &WeightScheme::default())).unwrap();
//! assert_eq!(g.classify(Vertex::new(2, 0, 0)).unwrap(), VertexKind::Junction);
//! assert_eq!(g.predecessor(Vertex::new(2, 0, 0), 1).unwrap(), Vertex::new(1, 1, 1));
//! assert_eq!(g.last_vertex(), Vertex::new(2, 0, 1));
//! ```
use std::fmt;

use crate::common::{EdsError, Score};
use crate::eds::{EdsMatrix, WeightMatrix};

/// Coordinates of one character of the EDS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex {
    pub segment: usize,
    pub layer: usize,
    pub index: usize,
}

impl Vertex {
    pub const fn new(segment: usize, layer: usize, index: usize) -> Self {
        Self { segment, layer, index }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.segment, self.layer, self.index)
    }
}

/// Role of a vertex in the recurrences, derived from its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexKind {
    /// Deterministic vertex with at most one predecessor (an N vertex).
    Plain,
    /// First vertex of a deterministic segment right after a bubble.
    Junction,
    /// Vertex inside a bubble.
    Layer {
        /// On layer 0, the layer whose first vertex reads the entry's scores.
        first_layer: bool,
        /// At index 0 of its layer.
        first_on_layer: bool,
    },
}

#[derive(Clone, Debug)]
struct Layer {
    start: usize,
    len: usize,
}

#[derive(Clone, Debug)]
struct Segment {
    layers: Vec<Layer>,
}

impl Segment {
    fn is_bubble(&self) -> bool {
        self.layers.len() > 1
    }
}

/// Read-only bubble graph over a validated segment/layer matrix.
#[derive(Clone, Debug)]
pub struct BubbleGraph {
    segments: Vec<Segment>,
    symbols: Vec<char>,
    weights: Vec<Score>,
}

impl BubbleGraph {
    /// Build the graph, checking the shape the DP relies on: at least one
    /// segment, deterministic first and last segments, no empty layers, no
    /// adjacent bubbles, and a weight matrix shaped like `eds`.
    pub fn new(eds: &EdsMatrix, weights: &WeightMatrix) -> Result<Self, EdsError> {
        if eds.is_empty() {
            return Err(EdsError::EmptyGraph);
        }
        if weights.len() != eds.len() {
            return Err(EdsError::ShapeMismatch { segment: eds.len().min(weights.len()) });
        }
        let mut segments = Vec::with_capacity(eds.len());
        let mut symbols = Vec::new();
        let mut flat_weights = Vec::new();
        for (s, (layers, layer_weights)) in eds.iter().zip(weights).enumerate() {
            if layers.is_empty() {
                return Err(EdsError::EmptyLayer { segment: s, layer: 0 });
            }
            if layer_weights.len() != layers.len() {
                return Err(EdsError::ShapeMismatch { segment: s });
            }
            let mut seg = Segment { layers: Vec::with_capacity(layers.len()) };
            for (l, (text, w)) in layers.iter().zip(layer_weights).enumerate() {
                let start = symbols.len();
                symbols.extend(text.chars());
                let len = symbols.len() - start;
                if len == 0 {
                    return Err(EdsError::EmptyLayer { segment: s, layer: l });
                }
                if w.len() != len {
                    return Err(EdsError::ShapeMismatch { segment: s });
                }
                flat_weights.extend_from_slice(w);
                seg.layers.push(Layer { start, len });
            }
            if seg.is_bubble() {
                if s == 0 || s + 1 == eds.len() {
                    return Err(EdsError::BubbleAtBoundary { segment: s });
                }
                if segments.last().is_some_and(Segment::is_bubble) {
                    return Err(EdsError::AdjacentBubbles { segment: s });
                }
            }
            segments.push(seg);
        }
        log::debug!("bubble graph: {} segments, {} vertices", segments.len(), symbols.len());
        Ok(Self { segments, symbols, weights: flat_weights })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.symbols.len()
    }

    /// Number of layers of `segment` (1 for deterministic segments), 0 if out of range.
    pub fn layer_count(&self, segment: usize) -> usize {
        self.segments.get(segment).map_or(0, |s| s.layers.len())
    }

    /// Number of characters on a layer, 0 if out of range.
    pub fn layer_len(&self, segment: usize, layer: usize) -> usize {
        self.segments
            .get(segment)
            .and_then(|s| s.layers.get(layer))
            .map_or(0, |l| l.len)
    }

    pub fn is_bubble(&self, segment: usize) -> bool {
        self.segments.get(segment).is_some_and(Segment::is_bubble)
    }

    /// Flat arena id of `v`.
    pub fn id(&self, v: Vertex) -> Result<usize, EdsError> {
        self.segments
            .get(v.segment)
            .and_then(|s| s.layers.get(v.layer))
            .filter(|l| v.index < l.len)
            .map(|l| l.start + v.index)
            .ok_or(EdsError::VertexOutOfRange { vertex: v })
    }

    pub fn weight(&self, v: Vertex) -> Result<Score, EdsError> {
        Ok(self.weights[self.id(v)?])
    }

    pub fn symbol(&self, v: Vertex) -> Result<char, EdsError> {
        Ok(self.symbols[self.id(v)?])
    }

    pub fn classify(&self, v: Vertex) -> Result<VertexKind, EdsError> {
        self.id(v)?;
        if self.segments[v.segment].is_bubble() {
            return Ok(VertexKind::Layer { first_layer: v.layer == 0, first_on_layer: v.index == 0 });
        }
        if v.index == 0 && v.segment > 0 && self.segments[v.segment - 1].is_bubble() {
            Ok(VertexKind::Junction)
        } else {
            Ok(VertexKind::Plain)
        }
    }

    /// False only for the graph's first vertex.
    pub fn has_predecessor(&self, v: Vertex) -> bool {
        v.segment != 0 || v.index != 0
    }

    /// Every vertex with an edge into `v`: one per layer of the bubble for a
    /// J vertex, none for the first vertex, otherwise exactly one.
    pub fn predecessors(&self, v: Vertex) -> Result<Vec<Vertex>, EdsError> {
        if !self.has_predecessor(v) {
            self.id(v)?;
            return Ok(Vec::new());
        }
        match self.classify(v)? {
            VertexKind::Junction => {
                (0..self.layer_count(v.segment - 1)).map(|l| self.predecessor(v, l)).collect()
            }
            _ => Ok(vec![self.predecessor(v, 0)?]),
        }
    }

    /// Predecessor of `v`: the previous character on the same layer, or the
    /// last vertex of `predecessor_layer` in the previous segment when `v` is
    /// first on its layer. For a bubble's layer vertices the predecessor is the
    /// bubble's entry (layer 0 of the previous segment).
    pub fn predecessor(&self, v: Vertex, predecessor_layer: usize) -> Result<Vertex, EdsError> {
        self.id(v)?;
        if v.index > 0 {
            return Ok(Vertex::new(v.segment, v.layer, v.index - 1));
        }
        if v.segment == 0 {
            return Err(EdsError::NoPredecessor { vertex: v });
        }
        let len = self.layer_len(v.segment - 1, predecessor_layer);
        if len == 0 {
            return Err(EdsError::VertexOutOfRange { vertex: Vertex::new(v.segment - 1, predecessor_layer, 0) });
        }
        Ok(Vertex::new(v.segment - 1, predecessor_layer, len - 1))
    }

    /// Last vertex of a layer.
    pub fn layer_end(&self, segment: usize, layer: usize) -> Result<Vertex, EdsError> {
        match self.layer_len(segment, layer) {
            0 => Err(EdsError::VertexOutOfRange { vertex: Vertex::new(segment, layer, 0) }),
            len => Ok(Vertex::new(segment, layer, len - 1)),
        }
    }

    /// The final vertex of the graph (the closing sentinel for well-formed input).
    pub fn last_vertex(&self) -> Vertex {
        let s = self.segments.len() - 1;
        Vertex::new(s, 0, self.segments[s].layers[0].len - 1)
    }

    /// All vertices in flat-id order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.segments.iter().enumerate().flat_map(|(s, seg)| {
            seg.layers
                .iter()
                .enumerate()
                .flat_map(move |(l, layer)| (0..layer.len).map(move |i| Vertex::new(s, l, i)))
        })
    }
}
