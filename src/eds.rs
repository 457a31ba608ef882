//! Elastic-degenerate string (EDS) parsing and vertex weighting.
//!
//! An EDS is a run of deterministic strings and brace-delimited sets of
//! alternatives, e.g. `_GG{AGAA,GGGA,,ACCCCC}{AG,G}AGG_`. Parsing turns it into
//! a segment → layer → text matrix:
//!
//! - a deterministic run becomes a single-layer segment;
//! - `{v1,...,vn}` becomes an `n`-layer segment (a *bubble*);
//! - an empty variant becomes the single sentinel character;
//! - `}{` gets a single-sentinel segment inserted so bubbles never touch.
//!
//! ### Example
//! ```rust
//! use edspaths::parse_eds;
//! let m = parse_eds("_A{C,,GT}{A,G}_", '_').unwrap();
//! assert_eq!(m, vec![
//!     vec!["_A".to_string()],
//!     vec!["C".to_string(), "_".to_string(), "GT".to_string()],
//!     vec!["_".to_string()],
//!     vec!["A".to_string(), "G".to_string()],
//!     vec!["_".to_string()],
//! ]);
//! ```
use crate::common::{EdsError, Score, WeightScheme};

/// Segment → layer → text of a parsed EDS.
pub type EdsMatrix = Vec<Vec<String>>;

/// Segment → layer → per-character weight, shaped like an [`EdsMatrix`].
pub type WeightMatrix = Vec<Vec<Vec<Score>>>;

/// Parse an EDS into its segment/layer matrix.
///
/// The text is taken verbatim (callers trim surrounding whitespace).
pub fn parse_eds(text: &str, sentinel: char) -> Result<EdsMatrix, EdsError> {
    if text.is_empty() {
        return Err(EdsError::EmptyInput);
    }
    let mut segments: EdsMatrix = Vec::new();
    let mut variants: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_bubble = false;
    let mut closed_bubble = false;

    for (position, c) in text.char_indices() {
        match c {
            '{' => {
                if in_bubble {
                    return Err(EdsError::NestedOpen { position });
                }
                if !current.is_empty() {
                    segments.push(vec![std::mem::take(&mut current)]);
                } else if closed_bubble {
                    segments.push(vec![sentinel.to_string()]);
                }
                in_bubble = true;
            }
            '}' => {
                if !in_bubble {
                    return Err(EdsError::UnexpectedClose { position });
                }
                variants.push(variant(std::mem::take(&mut current), sentinel));
                segments.push(std::mem::take(&mut variants));
                in_bubble = false;
                closed_bubble = true;
                continue;
            }
            ',' => {
                if !in_bubble {
                    return Err(EdsError::CommaOutsideSegment { position });
                }
                variants.push(variant(std::mem::take(&mut current), sentinel));
            }
            _ => current.push(c),
        }
        closed_bubble = false;
    }

    if in_bubble {
        return Err(EdsError::UnterminatedSegment);
    }
    if !current.is_empty() {
        segments.push(vec![current]);
    }
    Ok(segments)
}

fn variant(text: String, sentinel: char) -> String {
    if text.is_empty() { sentinel.to_string() } else { text }
}

/// Assign a weight to every character of `segments` under `scheme`.
pub fn weight_matrix(segments: &EdsMatrix, scheme: &WeightScheme) -> WeightMatrix {
    segments
        .iter()
        .map(|layers| {
            layers
                .iter()
                .map(|text| text.chars().map(|c| scheme.weight_of(c)).collect())
                .collect()
        })
        .collect()
}
