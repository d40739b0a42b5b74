//! Peeling by eigensign-consistency degree.
//!
//! Given a reference labeling from the spectral seed, an edge (v, u) is
//! **consistent** when it agrees with the bipartition (positive between
//! like labels, negative between unlike labels) and **inconsistent**
//! otherwise. Each node's marginal value is its consistent minus
//! inconsistent degree over the still-active nodes; the peel repeatedly
//! deletes a minimum-marginal node and keeps the densest state seen.
//!
//! The density is maintained incrementally: removing `v` subtracts twice
//! its marginal from the running total (its own contribution plus the
//! mirrored contribution its neighbors lose), and each surviving neighbor's
//! marginal shifts by ±1 per connecting edge. The invariant that this
//! running total, divided by the active count, equals the polarity density
//! recomputed from scratch is exercised by the property tests below.

use crate::error::{Error, Result};
use crate::graph::SignedGraph;
use crate::objective::improves;
use crate::peel::buckets::BucketQueue;
use crate::peel::Bipartition;

/// Single-pass consistency peel (seeded by a binary eigensign labeling).
///
/// Nodes the seed already excludes (label 0) never enter the active set;
/// the boosted variant deliberately does the opposite.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyPeeling;

/// Outcome of a consistency peel.
#[derive(Debug, Clone, PartialEq)]
pub struct PeelReport {
    /// Best state seen across the whole peel.
    pub partition: Bipartition,
    /// Largest inconsistent degree any node had at the moment of its
    /// removal.
    pub max_inconsistent_degree: usize,
}

impl ConsistencyPeeling {
    /// Create the algorithm with default settings.
    pub fn new() -> Self {
        Self
    }

    /// Peel `graph` against the seed labeling `x0` (values in {-1, 0, +1};
    /// zeros are excluded from the start).
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for a node-less graph;
    /// [`Error::LengthMismatch`] if `x0` does not cover every node.
    pub fn run(&self, graph: &SignedGraph, x0: &[i8]) -> Result<PeelReport> {
        if graph.node_count() == 0 {
            return Err(Error::EmptyInput);
        }
        if x0.len() != graph.node_count() {
            return Err(Error::LengthMismatch {
                expected: graph.node_count(),
                found: x0.len(),
            });
        }
        let outcome = peel_pass(graph, x0, false, None);
        Ok(PeelReport {
            partition: outcome.best,
            max_inconsistent_degree: outcome.max_inconsistent_degree,
        })
    }
}

pub(crate) struct PassOutcome {
    pub(crate) best: Bipartition,
    pub(crate) max_inconsistent_degree: usize,
}

/// One full peel. `reference` drives the consistency classification and
/// never changes; `include_all` admits reference-excluded nodes into the
/// active set (boosted variant), where they are peeled like anyone else but
/// never scored; the tracked density always equals the polarity density of
/// the current labeling, whose support is the ±1-labeled active nodes. When
/// `potential` is given, each node's bucket key additionally carries its
/// potential, and the key it holds at removal time is written back.
pub(crate) fn peel_pass(
    graph: &SignedGraph,
    reference: &[i8],
    include_all: bool,
    mut potential: Option<&mut [i64]>,
) -> PassOutcome {
    let n = graph.node_count();
    let is_member = |node: usize| include_all || reference[node] != 0;

    let mut queue = BucketQueue::new(n);
    // Marginal without the potential term, counted over all active
    // neighbors: orders the peel.
    let mut marginal = vec![0i64; n];
    // Marginal counted over ±1-labeled active neighbors only: summed over
    // ±1-labeled active nodes it is the density numerator. Identical to
    // `marginal` unless the reference contains zeros.
    let mut scored_marginal = vec![0i64; n];
    let mut inconsistent = vec![0i64; n];
    let mut total: i64 = 0;
    let mut scored_active = 0usize;

    for node in 0..n {
        if !is_member(node) {
            continue;
        }
        let mut consistent = 0i64;
        let mut scored = 0i64;
        let both_scored =
            |a: usize, b: usize| reference[a] != 0 && reference[b] != 0;
        for &neighbor in graph.positive_neighbors(node) {
            if !is_member(neighbor) {
                continue;
            }
            if reference[node] == reference[neighbor] {
                consistent += 1;
                if both_scored(node, neighbor) {
                    scored += 1;
                }
            } else {
                inconsistent[node] += 1;
                if both_scored(node, neighbor) {
                    scored -= 1;
                }
            }
        }
        for &neighbor in graph.negative_neighbors(node) {
            if !is_member(neighbor) {
                continue;
            }
            if reference[node] == reference[neighbor] {
                inconsistent[node] += 1;
                if both_scored(node, neighbor) {
                    scored -= 1;
                }
            } else {
                consistent += 1;
                if both_scored(node, neighbor) {
                    scored += 1;
                }
            }
        }
        marginal[node] = consistent - inconsistent[node];
        scored_marginal[node] = scored;
        if reference[node] != 0 {
            total += scored;
            scored_active += 1;
        }

        let key = marginal[node] + potential.as_deref().map_or(0, |p| p[node]);
        queue.insert(node, key);
    }

    let mut x = reference.to_vec();
    let density_of = |total: i64, scored_active: usize| {
        (scored_active > 0).then(|| total as f64 / scored_active as f64)
    };

    let mut best = Bipartition {
        labeling: x.clone(),
        density: density_of(total, scored_active),
    };
    let mut max_inconsistent = 0i64;

    while let Some((node, key)) = queue.pop_min() {
        if let Some(p) = potential.as_deref_mut() {
            p[node] = key;
        }
        x[node] = 0;
        if reference[node] != 0 {
            // Own contribution plus the mirrored one its neighbors lose.
            total -= 2 * scored_marginal[node];
            scored_active -= 1;
        }
        max_inconsistent = max_inconsistent.max(inconsistent[node]);

        for &neighbor in graph.positive_neighbors(node) {
            if !queue.contains(neighbor) {
                continue;
            }
            let delta = if reference[node] == reference[neighbor] {
                -1
            } else {
                inconsistent[neighbor] -= 1;
                1
            };
            marginal[neighbor] += delta;
            if reference[node] != 0 && reference[neighbor] != 0 {
                scored_marginal[neighbor] += delta;
            }
            queue.update(neighbor, queue.value(neighbor) + delta);
        }
        for &neighbor in graph.negative_neighbors(node) {
            if !queue.contains(neighbor) {
                continue;
            }
            let delta = if reference[node] == reference[neighbor] {
                inconsistent[neighbor] -= 1;
                1
            } else {
                -1
            };
            marginal[neighbor] += delta;
            if reference[node] != 0 && reference[neighbor] != 0 {
                scored_marginal[neighbor] += delta;
            }
            queue.update(neighbor, queue.value(neighbor) + delta);
        }

        let density = density_of(total, scored_active);
        if improves(density, best.density) {
            best = Bipartition {
                labeling: x.clone(),
                density,
            };
        }
    }

    PassOutcome {
        best,
        max_inconsistent_degree: max_inconsistent as usize,
    }
}
