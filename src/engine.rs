//! Forward pass: score propagation over the bubble graph.
//!
//! For every vertex the engine stores a small table of DP cells. A cell is
//! either *selected* (best score assuming the vertex is on a path) or
//! *unselected* (best score overall), and for bubble vertices each exists
//! twice: the `I` continuation (the run entering the bubble through its entry
//! vertex continues on this layer) and the `E` continuation (runs on this
//! layer start fresh). Each cell also records which branch of its `max` won,
//! as a typed choice, so [`crate::decoder`] can retrace the optimum exactly.
//!
//! The J vertex closing a bubble with `b` layers combines its predecessors in
//! O(b): the best `(i, j)` pair for "layer `i` ends in a fresh run reaching J
//! while layer `j` carries the entry's run" comes from the top two candidates
//! of each side instead of all `b²` pairs.
//!
//! ### Ties
//! A selected cell opens a new run when that scores exactly as well as
//! extending one, so zero-weight vertices before a run (sentinels) stay out of
//! it. An unselected cell takes its vertex on a tie, except at J vertices,
//! which are only taken when strictly better than bypassing them.
//!
//! ### Example
//! ```rust
//! use edspaths::{fill_scores, parse_eds, weight_matrix, BubbleGraph, WeightScheme};
//! let m = parse_eds("_GGG{CCG,AGGGA}A_", '_').unwrap();
//! let g = BubbleGraph::new(&m, &weight_matrix(&m, &WeightScheme::default())).unwrap();
//! let table = fill_scores(&g, 2).unwrap();
//! assert_eq!(table.best_score(), 5);
//! ```
use crate::common::{EdsError, Score};
use crate::graph::{BubbleGraph, Vertex, VertexKind};

/// Which run a bubble-layer cell describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// `I`: the run through the bubble's entry vertex continues on this layer.
    Inner,
    /// `E`: runs on this layer are not connected to the entry vertex.
    Outer,
}

/// Winning branch of a selected cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    /// The predecessor is selected and the run continues through it.
    Extend,
    /// A new run starts here; the penalty was paid.
    Open,
    /// First vertex of a non-principal layer continuing the entry's run.
    Enter,
}

/// Winning branch of an unselected cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    /// The vertex is left out.
    Skip,
    /// Selecting the vertex is best.
    Take,
}

/// Winning branch of a J vertex's selected cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Join {
    /// J opens a new run; layer `line` carries the entry's run.
    Open { line: usize },
    /// J extends the run of layer `line`, which also carries the entry's run.
    Extend { line: usize },
    /// J extends a fresh run ending on layer `from`; layer `line` carries the entry's run.
    Transfer { from: usize, line: usize },
}

/// Winning branch of a J vertex's unselected cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bypass {
    /// J is left out; layer `line` carries the entry's run.
    Skip { line: usize },
    /// Selecting J is best.
    Take,
}

/// A DP cell: its score and the branch that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell<C> {
    pub score: Score,
    pub choice: C,
}

/// Selected and unselected cells of one continuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track {
    pub selected: Cell<Link>,
    pub unselected: Cell<Pick>,
}

/// Cells of a J vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Junction {
    pub selected: Cell<Join>,
    pub unselected: Cell<Bypass>,
}

/// DP record of one vertex, by vertex kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    Plain(Track),
    Layer { inner: Track, outer: Track },
    Junction(Junction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pair {
    selected: Score,
    unselected: Score,
}

impl Track {
    fn pair(&self) -> Pair {
        Pair { selected: self.selected.score, unselected: self.unselected.score }
    }
}

impl Entry {
    fn pair(&self, continuation: Continuation) -> Pair {
        match (self, continuation) {
            (Entry::Plain(track), _) => track.pair(),
            (Entry::Layer { inner, .. }, Continuation::Inner) => inner.pair(),
            (Entry::Layer { outer, .. }, Continuation::Outer) => outer.pair(),
            (Entry::Junction(j), _) => Pair { selected: j.selected.score, unselected: j.unselected.score },
        }
    }

    /// Score of one cell. Deterministic vertices answer both continuations
    /// from their single track.
    pub fn score(&self, selected: bool, continuation: Continuation) -> Score {
        let pair = self.pair(continuation);
        if selected { pair.selected } else { pair.unselected }
    }
}

/// Score and choice table of a whole graph, indexed by flat vertex id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreTable {
    entries: Vec<Entry>,
    penalty: Score,
}

impl ScoreTable {
    /// Gap-open penalty the table was computed with.
    pub fn penalty(&self) -> Score {
        self.penalty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record of `v`.
    pub fn entry(&self, graph: &BubbleGraph, v: Vertex) -> Result<&Entry, EdsError> {
        let id = graph.id(v)?;
        self.entries
            .get(id)
            .ok_or(EdsError::ModelInvariant { vertex: v, reason: "vertex has no score entry" })
    }

    /// `W(v, selected, continuation)`.
    pub fn score(
        &self,
        graph: &BubbleGraph,
        v: Vertex,
        selected: bool,
        continuation: Continuation,
    ) -> Result<Score, EdsError> {
        Ok(self.entry(graph, v)?.score(selected, continuation))
    }

    /// Total score of the optimal path set: the better unselected cell of
    /// the graph's last vertex.
    pub fn best_score(&self) -> Score {
        self.entries.last().map_or(0, |e| {
            e.score(false, Continuation::Inner).max(e.score(false, Continuation::Outer))
        })
    }

    fn pair(&self, graph: &BubbleGraph, v: Vertex, continuation: Continuation) -> Result<Pair, EdsError> {
        Ok(self.entry(graph, v)?.pair(continuation))
    }
}

/// Fill the score/choice table for `graph` with gap-open cost `penalty`.
///
/// Vertices are visited once, in flat-id order, so every predecessor (and
/// every layer of a bubble) is final before its successor is scored.
pub fn fill_scores(graph: &BubbleGraph, penalty: Score) -> Result<ScoreTable, EdsError> {
    if penalty < 0 {
        return Err(EdsError::InvalidPenalty { penalty });
    }
    let mut table = ScoreTable { entries: Vec::with_capacity(graph.vertex_count()), penalty };

    for v in graph.vertices() {
        let w = graph.weight(v)?;
        let entry = match graph.classify(v)? {
            VertexKind::Plain if !graph.has_predecessor(v) => Entry::Plain(first_track(w, penalty)),
            VertexKind::Plain => {
                let p = graph.predecessor(v, 0)?;
                Entry::Plain(linear_track(w, table.pair(graph, p, Continuation::Inner)?, penalty))
            }
            VertexKind::Layer { first_on_layer: false, .. } => {
                let p = graph.predecessor(v, 0)?;
                Entry::Layer {
                    inner: linear_track(w, table.pair(graph, p, Continuation::Inner)?, penalty),
                    outer: linear_track(w, table.pair(graph, p, Continuation::Outer)?, penalty),
                }
            }
            VertexKind::Layer { first_layer: true, first_on_layer: true } => {
                let entry = table.pair(graph, graph.predecessor(v, 0)?, Continuation::Inner)?;
                let outer = Cell { score: w + entry.selected - penalty, choice: Link::Open };
                Entry::Layer {
                    inner: linear_track(w, entry, penalty),
                    outer: Track { selected: outer, unselected: skip_or_take(entry.selected, outer.score) },
                }
            }
            VertexKind::Layer { first_layer: false, first_on_layer: true } => Entry::Layer {
                inner: Track {
                    selected: Cell { score: w, choice: Link::Enter },
                    unselected: Cell { score: w, choice: Pick::Take },
                },
                outer: first_track(w, penalty),
            },
            VertexKind::Junction => {
                let bubble = v.segment - 1;
                let mut preds = Vec::with_capacity(graph.layer_count(bubble));
                for layer in 0..graph.layer_count(bubble) {
                    let p = graph.predecessor(v, layer)?;
                    preds.push((table.pair(graph, p, Continuation::Inner)?, table.pair(graph, p, Continuation::Outer)?));
                }
                let junction = junction(w, &preds, penalty);
                log::trace!("junction {v}: {:?}", junction);
                Entry::Junction(junction)
            }
        };
        table.entries.push(entry);
    }

    log::debug!(
        "scored {} vertices with penalty {}; best score {}",
        table.entries.len(),
        penalty,
        table.best_score()
    );
    Ok(table)
}

/// Cells of a vertex without a scored predecessor: a run can only open here.
fn first_track(w: Score, penalty: Score) -> Track {
    let selected = Cell { score: w - penalty, choice: Link::Open };
    Track { selected, unselected: skip_or_take(0, selected.score) }
}

/// Local-alignment recurrence against a single predecessor.
fn linear_track(w: Score, pred: Pair, penalty: Score) -> Track {
    let open = pred.unselected - penalty;
    let selected = if pred.selected > open {
        Cell { score: w + pred.selected, choice: Link::Extend }
    } else {
        Cell { score: w + open, choice: Link::Open }
    };
    Track { selected, unselected: skip_or_take(pred.unselected, selected.score) }
}

fn skip_or_take(skip: Score, take: Score) -> Cell<Pick> {
    if take >= skip {
        Cell { score: take, choice: Pick::Take }
    } else {
        Cell { score: skip, choice: Pick::Skip }
    }
}

/// Best two `(value, layer)` candidates seen so far; the earlier layer wins ties.
#[derive(Clone, Copy, Debug, Default)]
struct TopTwo {
    first: Option<(Score, usize)>,
    second: Option<(Score, usize)>,
}

impl TopTwo {
    fn offer(&mut self, value: Score, layer: usize) {
        match self.first {
            Some((best, _)) if value <= best => {
                if self.second.map_or(true, |(s, _)| value > s) {
                    self.second = Some((value, layer));
                }
            }
            _ => {
                self.second = self.first;
                self.first = Some((value, layer));
            }
        }
    }
}

/// Best `out[i] + inn[j]` with `i != j`, as `(sum, i, j)`.
fn best_distinct_pair(out: &TopTwo, inn: &TopTwo) -> Option<(Score, usize, usize)> {
    let (o1, i1) = out.first?;
    let (n1, j1) = inn.first?;
    if i1 != j1 {
        return Some((o1 + n1, i1, j1));
    }
    let keep_out = inn.second.map(|(n2, j2)| (o1 + n2, i1, j2));
    let keep_inn = out.second.map(|(o2, i2)| (o2 + n1, i2, j1));
    match (keep_out, keep_inn) {
        (Some(a), Some(b)) => Some(if b.0 > a.0 { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// Cells of a J vertex from its predecessors' `(I, E)` score pairs, one per
/// bubble layer. All candidates are relative to `base = Σ W(p_i, ¬sel, E)`.
fn junction(w: Score, preds: &[(Pair, Pair)], penalty: Score) -> Junction {
    let base: Score = preds.iter().map(|(_, e)| e.unselected).sum();
    // Best layer to carry the entry's run, and best layer to also end in J.
    let mut carry: Option<(Score, usize)> = None;
    let mut through: Option<(Score, usize)> = None;
    let mut fresh_end = TopTwo::default();
    let mut carry_top = TopTwo::default();

    for (layer, (i, e)) in preds.iter().enumerate() {
        let d = i.unselected - e.unselected;
        let t = i.selected - e.unselected;
        if carry.map_or(true, |(best, _)| d > best) {
            carry = Some((d, layer));
        }
        if through.map_or(true, |(best, _)| t > best) {
            through = Some((t, layer));
        }
        carry_top.offer(d, layer);
        fresh_end.offer(e.selected - e.unselected, layer);
    }

    let (d, line) = carry.unwrap_or((0, 0));
    let mut best = Cell { score: base + d - penalty, choice: Join::Open { line } };
    if let Some((t, line)) = through {
        if base + t > best.score {
            best = Cell { score: base + t, choice: Join::Extend { line } };
        }
    }
    if let Some((sum, from, line)) = best_distinct_pair(&fresh_end, &carry_top) {
        if base + sum > best.score {
            best = Cell { score: base + sum, choice: Join::Transfer { from, line } };
        }
    }
    let selected = Cell { score: w + best.score, choice: best.choice };

    let bypass = base + d;
    let unselected = if selected.score > bypass {
        Cell { score: selected.score, choice: Bypass::Take }
    } else {
        Cell { score: bypass, choice: Bypass::Skip { line } }
    };
    Junction { selected, unselected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::WeightScheme;
    use crate::eds::{parse_eds, weight_matrix, EdsMatrix};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn graph(text: &str) -> BubbleGraph {
        let m = parse_eds(text, '_').unwrap();
        BubbleGraph::new(&m, &weight_matrix(&m, &WeightScheme::default())).unwrap()
    }

    fn best(text: &str) -> Score {
        fill_scores(&graph(text), 2).unwrap().best_score()
    }

    fn cells(table: &ScoreTable, g: &BubbleGraph, v: Vertex, c: Continuation) -> (Score, Score) {
        (table.score(g, v, true, c).unwrap(), table.score(g, v, false, c).unwrap())
    }

    #[test]
    fn linear_recurrence() {
        // _ G G A : first vertex opens, then classic local-alignment cells.
        let g = graph("_GGA");
        let t = fill_scores(&g, 2).unwrap();
        assert_eq!(cells(&t, &g, Vertex::new(0, 0, 0), Continuation::Inner), (-2, 0));
        assert_eq!(cells(&t, &g, Vertex::new(0, 0, 1), Continuation::Inner), (-1, 0));
        assert_eq!(cells(&t, &g, Vertex::new(0, 0, 2), Continuation::Inner), (0, 0));
        assert_eq!(cells(&t, &g, Vertex::new(0, 0, 3), Continuation::Inner), (-1, 0));
        match t.entry(&g, Vertex::new(0, 0, 1)).unwrap() {
            Entry::Plain(track) => {
                assert_eq!(track.selected.choice, Link::Open);
                assert_eq!(track.unselected.choice, Pick::Skip);
            }
            other => panic!("unexpected entry {other:?}"),
        }
        match t.entry(&g, Vertex::new(0, 0, 2)).unwrap() {
            Entry::Plain(track) => {
                assert_eq!(track.selected.choice, Link::Extend);
                assert_eq!(track.unselected.choice, Pick::Take);
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn bubble_first_vertices() {
        let g = graph("_GGG{CCG,AGGGA}A_");
        let t = fill_scores(&g, 2).unwrap();
        // Entry (0,0,3) has W(sel) = W(unsel) = 1.
        assert_eq!(cells(&t, &g, Vertex::new(0, 0, 3), Continuation::Inner), (1, 1));
        // Layer 0, first: I extends the entry, E opens behind a selected entry.
        assert_eq!(cells(&t, &g, Vertex::new(1, 0, 0), Continuation::Inner), (2, 2));
        assert_eq!(cells(&t, &g, Vertex::new(1, 0, 0), Continuation::Outer), (0, 1));
        // Other layer, first: I is forced, E starts fresh.
        assert_eq!(cells(&t, &g, Vertex::new(1, 1, 0), Continuation::Inner), (-1, -1));
        assert_eq!(cells(&t, &g, Vertex::new(1, 1, 0), Continuation::Outer), (-3, 0));
        // Later on a layer, both continuations evolve independently.
        assert_eq!(cells(&t, &g, Vertex::new(1, 1, 4), Continuation::Inner), (1, 2));
        assert_eq!(cells(&t, &g, Vertex::new(1, 1, 4), Continuation::Outer), (0, 1));
        match t.entry(&g, Vertex::new(1, 1, 0)).unwrap() {
            Entry::Layer { inner, outer } => {
                assert_eq!(inner.selected.choice, Link::Enter);
                assert_eq!(inner.unselected.choice, Pick::Take);
                assert_eq!(outer.selected.choice, Link::Open);
                assert_eq!(outer.unselected.choice, Pick::Skip);
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn junction_extends_best_layer() {
        let g = graph("_GGG{CCG,AGGGA}A_");
        let t = fill_scores(&g, 2).unwrap();
        match t.entry(&g, Vertex::new(2, 0, 0)).unwrap() {
            Entry::Junction(j) => {
                assert_eq!(j.selected, Cell { score: 4, choice: Join::Extend { line: 0 } });
                assert_eq!(j.unselected, Cell { score: 5, choice: Bypass::Skip { line: 0 } });
            }
            other => panic!("unexpected entry {other:?}"),
        }
        assert_eq!(t.best_score(), 5);
    }

    #[test]
    fn junction_through_empty_variant() {
        let g = graph("_GGG{ATT,ATA,}AGCGC_");
        let t = fill_scores(&g, 2).unwrap();
        match t.entry(&g, Vertex::new(2, 0, 0)).unwrap() {
            Entry::Junction(j) => {
                assert_eq!(j.selected, Cell { score: 0, choice: Join::Extend { line: 2 } });
                assert_eq!(j.unselected, Cell { score: 1, choice: Bypass::Skip { line: 0 } });
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn reference_scores() {
        assert_eq!(best("_GGG{CCG,AGGGA}A_"), 5);
        assert_eq!(best("_GGG{ATT,ATA}AGCGC_"), 3);
        assert_eq!(best("_GGG{ATT,ATA,}AGCGC_"), 4);
        assert_eq!(best("_AG{GGG,,CCC}{AG,GCGG,AA}A{A,G}{G,CC}{AAAA,}_"), 9);
        assert_eq!(best("_GG{AGAA,GGGA,,ACCCCC}{AG,G}AGG{A,G}{C,}{A,AG}G{A,GA,CCC}{,A}_"), 14);
    }

    #[test]
    fn linear_scores() {
        assert_eq!(best("_GGCAGGGAAGAAGGA_"), 3);
        assert_eq!(best("_GGCGAAAGGGA_"), 3);
        assert_eq!(best("_AAAA_"), 0);
        assert_eq!(best("_"), 0);
    }

    #[test]
    fn continuation_scores() {
        assert_eq!(best("_GG{GA,AAGG,TTAACAG,,ACTCCTT}_"), 1);
        assert_eq!(best("_GG{GGCA,AAGG,CATT,TATTTA,,GATTGTTG}_"), 3);
        assert_eq!(best("_GG{GGCAAAGGGAGG,AAGG,TTACTTACTTCT,}_"), 5);
        assert_eq!(best("_GG{GGCAAAGGGAAACGCAAAA,AAGG,GTTGTGT,TGGTGGCAATG,,ATGTGGC}_"), 8);
        assert_eq!(best("_GG{GGCAAAGGGAAACGCAAAA,AAGGAGGG,GTTGTGT,TGGTGGCAATG,,ATGTGGC,AAGG}_"), 10);
        assert_eq!(
            best("_GG{GGCAAAGGGAAACGCAAAA,AAGGAGGGAAAGGG,GTTGTGT,TGGTGGCAATGCGT,,ATGTGGC,AAGGAGCAATGGGGG}_"),
            16
        );
        assert_eq!(best("_GG{GA,GGAA,TTAACAG,,ACTCCTT}_"), 2);
        assert_eq!(best("_GG{GA,AAGG,TTAACAG,,ACTCCTT,GGAG}_"), 2);
        assert_eq!(
            best("_GG{TCTAAAGGGAAACGCAAAA,AAGGAGGGAAAGGG,GTTGTGT,TGGTGGCAATGCGT,GGCAAAGGGAAACGCAAAA,ATGTGGC,AAGGAGCAATGGGGG,}_"),
            18
        );
        assert_eq!(best("_GG{GTGAAAGGGAAACGCAAAA,GGGCT,AAGG,GTTGTGT,TGGTGGCAATG,,ATGTGGC}_"), 9);
    }

    #[test]
    fn junction_scores() {
        assert_eq!(best("_TGGTG{GA,TACTCT,TC,GAG,TCTT}CG"), 3);
        assert_eq!(best("_TGGTG{GGCATT,TACTCT,TC,GAAGG,TCTT}CG"), 5);
        assert_eq!(best("_TGATA{GGCATT,TACTCTC,TC,GAAGG,TCTC,}CG"), 3);
        assert_eq!(best("_GG{AAGG,GGA}_"), 2);
        assert_eq!(best("_GG{AGAA,GGGA,,ACCCCC}{AG,G}AGG{C,A,GT}{C,}{A,AG,TA}G{A,GA,CCC,TTTAGTG}{,A}_"), 14);
        assert_eq!(best("_GGAG{CCAAA,AGGGA,TATGC,ATGAC,GAC}CAGTTT{TC,GC,TT,GAC}CAGG_"), 6);
    }

    #[test]
    fn zero_penalty_and_negative_penalty() {
        let g = graph("_GAG_");
        assert_eq!(fill_scores(&g, 0).unwrap().best_score(), 2);
        assert_eq!(fill_scores(&g, -1), Err(EdsError::InvalidPenalty { penalty: -1 }));
    }

    #[test]
    fn table_covers_every_vertex() {
        let g = graph("_AG{GGG,,CCC}{AG,GCGG,AA}A_");
        let t = fill_scores(&g, 2).unwrap();
        assert_eq!(t.len(), g.vertex_count());
        assert_eq!(t.penalty(), 2);
        assert!(!t.is_empty());
    }

    #[test]
    fn top_two_keeps_earliest_on_ties() {
        let mut top = TopTwo::default();
        for (layer, v) in [3, 5, 5, 1].into_iter().enumerate() {
            top.offer(v, layer);
        }
        assert_eq!(top.first, Some((5, 1)));
        assert_eq!(top.second, Some((5, 2)));
    }

    fn naive_junction_best(preds: &[(Pair, Pair)], penalty: Score) -> (Score, Score) {
        let base: Score = preds.iter().map(|(_, e)| e.unselected).sum();
        let mut sel = Score::MIN;
        let mut bypass = Score::MIN;
        for (i, (pi, pe)) in preds.iter().enumerate() {
            sel = sel.max(base - pe.unselected + pi.unselected - penalty);
            sel = sel.max(base - pe.unselected + pi.selected);
            bypass = bypass.max(base - pe.unselected + pi.unselected);
            for (j, (qi, qe)) in preds.iter().enumerate() {
                if i != j {
                    sel = sel.max(base - pe.unselected + pe.selected - qe.unselected + qi.unselected);
                }
            }
        }
        (sel, bypass)
    }

    #[test]
    fn junction_matches_quadratic_search() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let b = rng.gen_range(2..7);
            let preds: Vec<(Pair, Pair)> = (0..b)
                .map(|_| {
                    let pair = |rng: &mut StdRng| {
                        let selected = rng.gen_range(-8..8);
                        Pair { selected, unselected: selected.max(rng.gen_range(-8..8)) }
                    };
                    (pair(&mut rng), pair(&mut rng))
                })
                .collect();
            let penalty = rng.gen_range(0..4);
            let w = rng.gen_range(-2..3);
            let j = junction(w, &preds, penalty);
            let (sel, bypass) = naive_junction_best(&preds, penalty);
            assert_eq!(j.selected.score, w + sel);
            assert_eq!(j.unselected.score, (w + sel).max(bypass));
        }
    }

    #[test]
    fn junction_choice_reproduces_its_score() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let b = rng.gen_range(2..6);
            let preds: Vec<(Pair, Pair)> = (0..b)
                .map(|_| {
                    let s = rng.gen_range(-6..6);
                    let t = rng.gen_range(-6..6);
                    (Pair { selected: s, unselected: s.max(rng.gen_range(-6..6)) }, Pair { selected: t, unselected: t.max(0) })
                })
                .collect();
            let j = junction(0, &preds, 2);
            let base: Score = preds.iter().map(|(_, e)| e.unselected).sum();
            let rebuilt = match j.selected.choice {
                Join::Open { line } => base - preds[line].1.unselected + preds[line].0.unselected - 2,
                Join::Extend { line } => base - preds[line].1.unselected + preds[line].0.selected,
                Join::Transfer { from, line } => {
                    assert_ne!(from, line);
                    base - preds[from].1.unselected + preds[from].1.selected - preds[line].1.unselected
                        + preds[line].0.unselected
                }
            };
            assert_eq!(rebuilt, j.selected.score);
        }
    }

    #[test]
    fn scores_are_read_through_vertices() {
        let m: EdsMatrix = vec![vec!["_G".into()], vec!["A".into(), "C".into()], vec!["_".into()]];
        let g = BubbleGraph::new(&m, &weight_matrix(&m, &WeightScheme::default())).unwrap();
        let t = fill_scores(&g, 1).unwrap();
        assert!(matches!(
            t.score(&g, Vertex::new(3, 0, 0), false, Continuation::Inner),
            Err(EdsError::VertexOutOfRange { .. })
        ));
        // Plain vertices answer both continuations identically.
        let v = Vertex::new(0, 0, 1);
        assert_eq!(
            t.score(&g, v, true, Continuation::Inner).unwrap(),
            t.score(&g, v, true, Continuation::Outer).unwrap()
        );
        assert_eq!(t.best_score(), 1);
    }
}
