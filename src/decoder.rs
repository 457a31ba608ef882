//! Backward pass: turn a filled [`ScoreTable`] into the optimal set of
//! vertex-disjoint paths.
//!
//! The walk starts at the graph's last vertex in the unselected state and
//! follows the recorded choices toward the first vertex. The run being built
//! (kept in reverse) is closed whenever a choice opens a new path or leaves a
//! vertex out. At a J vertex the whole bubble is decoded at once: the J choice
//! says which layer receives the run leaving J and which layer carries the run
//! arriving from the entry vertex, every layer is walked with the matching
//! continuation, and the entry is selected exactly when a layer's run attaches
//! to it.
use std::collections::HashMap;

use crate::common::EdsError;
use crate::engine::{Bypass, Continuation, Entry, Join, Junction, Link, Pick, ScoreTable, Track};
use crate::graph::{BubbleGraph, Vertex};

/// A selected path: consecutive vertices in graph order.
pub type Path = Vec<Vertex>;

/// Where the run leaving a J vertex goes inside its bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Crossing {
    /// No run continues backward from J.
    Closed,
    /// The run continues on this layer.
    Into(usize),
}

/// Outcome of walking one bubble layer back to its first vertex.
#[derive(Debug)]
enum Attachment {
    Detached,
    /// The layer's run continues into the entry vertex.
    Attached(Vec<Vertex>),
}

/// Recover the selected paths, each in forward order, sorted by first vertex.
pub fn decode_paths(graph: &BubbleGraph, table: &ScoreTable) -> Result<Vec<Path>, EdsError> {
    if table.len() != graph.vertex_count() {
        return Err(EdsError::ModelInvariant {
            vertex: graph.last_vertex(),
            reason: "score table was filled for a different graph",
        });
    }
    let mut paths: Vec<Path> = Vec::new();
    let mut run: Vec<Vertex> = Vec::new();
    let mut selected = false;
    let mut cursor = Some(graph.last_vertex());

    while let Some(v) = cursor {
        match table.entry(graph, v)? {
            Entry::Plain(track) => {
                match visit(track, v, selected, &mut run) {
                    Some(Link::Extend) => selected = true,
                    Some(Link::Enter) => {
                        return Err(EdsError::ModelInvariant { vertex: v, reason: "entered outside a bubble" })
                    }
                    Some(Link::Open) | None => {
                        close(&mut run, &mut paths);
                        selected = false;
                    }
                }
                cursor = if graph.has_predecessor(v) { Some(graph.predecessor(v, 0)?) } else { None };
            }
            Entry::Junction(junction) => {
                let (entry, attached) = cross_bubble(graph, table, v, junction, selected, &mut run, &mut paths)?;
                selected = attached;
                cursor = Some(entry);
            }
            Entry::Layer { .. } => {
                return Err(EdsError::ModelInvariant { vertex: v, reason: "bubble layer reached outside its junction" })
            }
        }
    }
    close(&mut run, &mut paths);

    paths.sort_by_key(|p| p.first().copied());
    let paths = join_touching_runs(graph, paths)?;
    log::debug!("decoded {} paths", paths.len());
    Ok(paths)
}

/// Concatenate runs where one ends on a predecessor of another's first
/// vertex. Only a zero penalty leaves such pairs (opening wins ties), and
/// joining them keeps the score while making every path maximal.
///
/// `paths` must be sorted by first vertex; the result is too.
fn join_touching_runs(graph: &BubbleGraph, paths: Vec<Path>) -> Result<Vec<Path>, EdsError> {
    let mut joined: Vec<Path> = Vec::with_capacity(paths.len());
    // Last vertex of each joined path -> its index.
    let mut ends: HashMap<Vertex, usize> = HashMap::new();
    for path in paths {
        let (Some(&first), Some(&last)) = (path.first(), path.last()) else { continue };
        let mut target = None;
        for p in graph.predecessors(first)? {
            if let Some(i) = ends.remove(&p) {
                target = Some(i);
                break;
            }
        }
        match target {
            Some(i) => {
                log::trace!("joining run at {first} onto path {i}");
                joined[i].extend(path);
                ends.insert(last, i);
            }
            None => {
                ends.insert(last, joined.len());
                joined.push(path);
            }
        }
    }
    Ok(joined)
}

/// Decode one track cell. Pushes `v` and returns its link when the vertex is
/// selected, `None` when it is left out.
fn visit(track: &Track, v: Vertex, selected: bool, run: &mut Vec<Vertex>) -> Option<Link> {
    if !selected && track.unselected.choice == Pick::Skip {
        return None;
    }
    run.push(v);
    Some(track.selected.choice)
}

fn close(run: &mut Vec<Vertex>, paths: &mut Vec<Path>) {
    if !run.is_empty() {
        let mut path = std::mem::take(run);
        path.reverse();
        paths.push(path);
    }
}

/// Decode the J vertex `j` and the bubble before it. Returns the bubble's
/// entry vertex and whether it is selected; an attached run is left in `run`.
fn cross_bubble(
    graph: &BubbleGraph,
    table: &ScoreTable,
    j: Vertex,
    junction: &Junction,
    selected: bool,
    run: &mut Vec<Vertex>,
    paths: &mut Vec<Path>,
) -> Result<(Vertex, bool), EdsError> {
    let bubble = j.segment - 1;
    let (crossing, line) = match (selected, junction.unselected.choice) {
        (false, Bypass::Skip { line }) => {
            close(run, paths);
            (Crossing::Closed, line)
        }
        _ => {
            run.push(j);
            match junction.selected.choice {
                Join::Open { line } => {
                    close(run, paths);
                    (Crossing::Closed, line)
                }
                Join::Extend { line } => (Crossing::Into(line), line),
                Join::Transfer { from, line } => (Crossing::Into(from), line),
            }
        }
    };
    log::trace!("bubble {bubble}: {crossing:?}, entry continues on layer {line}");

    let mut carried: Option<Vec<Vertex>> = None;
    for layer in 0..graph.layer_count(bubble) {
        let continuation = if layer == line { Continuation::Inner } else { Continuation::Outer };
        let receives = crossing == Crossing::Into(layer);
        let layer_run = if receives { std::mem::take(run) } else { Vec::new() };
        let end = graph.layer_end(bubble, layer)?;
        match walk_layer(graph, table, end, continuation, receives, layer_run, paths)? {
            Attachment::Detached => {}
            Attachment::Attached(r) if carried.is_none() => carried = Some(r),
            Attachment::Attached(_) => {
                return Err(EdsError::ModelInvariant { vertex: end, reason: "two layers continue into one entry" })
            }
        }
    }

    let entry = graph.predecessor(Vertex::new(bubble, 0, 0), 0)?;
    match carried {
        Some(r) => {
            *run = r;
            Ok((entry, true))
        }
        None => Ok((entry, false)),
    }
}

/// Walk one layer backward from its last vertex `end`.
fn walk_layer(
    graph: &BubbleGraph,
    table: &ScoreTable,
    end: Vertex,
    continuation: Continuation,
    mut selected: bool,
    mut run: Vec<Vertex>,
    paths: &mut Vec<Path>,
) -> Result<Attachment, EdsError> {
    let mut v = end;
    loop {
        let track = match (table.entry(graph, v)?, continuation) {
            (Entry::Layer { inner, .. }, Continuation::Inner) => inner,
            (Entry::Layer { outer, .. }, Continuation::Outer) => outer,
            _ => return Err(EdsError::ModelInvariant { vertex: v, reason: "expected a bubble layer vertex" }),
        };
        let link = visit(track, v, selected, &mut run);
        if v.index == 0 {
            // Extend (layer 0) and Enter (other layers) both reach back to the entry.
            return Ok(match link {
                Some(Link::Extend | Link::Enter) => Attachment::Attached(run),
                Some(Link::Open) | None => {
                    close(&mut run, paths);
                    Attachment::Detached
                }
            });
        }
        match link {
            Some(Link::Extend) => selected = true,
            Some(Link::Enter) => {
                return Err(EdsError::ModelInvariant { vertex: v, reason: "entered inside a layer" })
            }
            Some(Link::Open) | None => {
                close(&mut run, paths);
                selected = false;
            }
        }
        v = Vertex::new(v.segment, v.layer, v.index - 1);
    }
}
