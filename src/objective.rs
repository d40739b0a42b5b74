//! Polarity objective and edge-agreement statistics.
//!
//! The objective every algorithm in this crate maximizes is the **polarity
//! density** of a labeling `x` over {-1, 0, +1}:
//!
//! ```text
//! f(x) = xᵀAx / xᵀx
//! ```
//!
//! where `A` is the signed adjacency matrix. The numerator rewards positive
//! edges inside a community and negative edges across the two communities,
//! and penalizes the opposite; the denominator normalizes by the number of
//! assigned nodes, so small dense cores can beat large diluted ones.
//!
//! `f` is undefined for the all-zero labeling (`xᵀx = 0`). That case is
//! modeled as `None`, and [`improves`] orders it strictly below every
//! defined value, so a peel can never prefer an empty solution over the
//! full graph.

use crate::graph::SignedGraph;

/// Polarity density `xᵀAx / xᵀx` of a labeling, or `None` when no node is
/// assigned to either community.
///
/// Computed over the adjacency lists in O(E); on a simple graph this equals
/// the quadratic form over [`SignedGraph::adjacency_matrix`]. Parallel
/// edges each contribute separately.
///
/// # Panics
///
/// If `labeling` is not exactly `node_count` long (broken caller invariant).
pub fn polarity_density(graph: &SignedGraph, labeling: &[i8]) -> Option<f64> {
    assert_eq!(
        labeling.len(),
        graph.node_count(),
        "labeling length must equal node count"
    );

    let support = labeling.iter().filter(|&&label| label != 0).count();
    if support == 0 {
        return None;
    }

    // Both directions of every edge are visited, so this sums to x'Ax.
    let mut quadratic: i64 = 0;
    for node in 0..graph.node_count() {
        let label = labeling[node] as i64;
        if label == 0 {
            continue;
        }
        for &neighbor in graph.positive_neighbors(node) {
            quadratic += label * labeling[neighbor] as i64;
        }
        for &neighbor in graph.negative_neighbors(node) {
            quadratic -= label * labeling[neighbor] as i64;
        }
    }
    Some(quadratic as f64 / support as f64)
}

/// Whether `candidate` strictly beats `incumbent`.
///
/// An undefined objective (`None`) never beats anything and is beaten by
/// every defined value; equal values keep the incumbent, so best-tracking
/// retains the earliest optimum found.
pub fn improves(candidate: Option<f64>, incumbent: Option<f64>) -> bool {
    match (candidate, incumbent) {
        (Some(c), Some(i)) => c > i,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Classification of every edge whose endpoints are both labeled ±1.
///
/// S1 denotes the larger of the two communities: when the -1 side
/// outnumbers the +1 side, the two same-sign categories are swapped so
/// reports read symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeClassCounts {
    /// Positive edges inside the larger community.
    pub intra_s1_positive: usize,
    /// Positive edges inside the smaller community.
    pub intra_s2_positive: usize,
    /// Negative edges inside the larger community.
    pub intra_s1_negative: usize,
    /// Negative edges inside the smaller community.
    pub intra_s2_negative: usize,
    /// Positive edges between the communities.
    pub inter_positive: usize,
    /// Negative edges between the communities.
    pub inter_negative: usize,
}

impl EdgeClassCounts {
    /// Classify the edges of `graph` under `labeling`.
    pub fn classify(graph: &SignedGraph, labeling: &[i8]) -> Self {
        assert_eq!(
            labeling.len(),
            graph.node_count(),
            "labeling length must equal node count"
        );

        let mut counts = Self::default();
        for node in 0..graph.node_count() {
            let label = labeling[node];
            for &neighbor in graph.positive_neighbors(node) {
                if neighbor > node {
                    counts.tally(label, labeling[neighbor], true);
                }
            }
            for &neighbor in graph.negative_neighbors(node) {
                if neighbor > node {
                    counts.tally(label, labeling[neighbor], false);
                }
            }
        }

        let s1_size = labeling.iter().filter(|&&l| l == 1).count();
        let s2_size = labeling.iter().filter(|&&l| l == -1).count();
        if s2_size > s1_size {
            std::mem::swap(&mut counts.intra_s1_positive, &mut counts.intra_s2_positive);
            std::mem::swap(&mut counts.intra_s1_negative, &mut counts.intra_s2_negative);
        }
        counts
    }

    fn tally(&mut self, a: i8, b: i8, positive: bool) {
        if a == 0 || b == 0 {
            return;
        }
        match (a == b, a == 1, positive) {
            (true, true, true) => self.intra_s1_positive += 1,
            (true, true, false) => self.intra_s1_negative += 1,
            (true, false, true) => self.intra_s2_positive += 1,
            (true, false, false) => self.intra_s2_negative += 1,
            (false, _, true) => self.inter_positive += 1,
            (false, _, false) => self.inter_negative += 1,
        }
    }

    /// Total number of classified edges.
    pub fn classified(&self) -> usize {
        self.intra_s1_positive
            + self.intra_s2_positive
            + self.intra_s1_negative
            + self.intra_s2_negative
            + self.inter_positive
            + self.inter_negative
    }

    /// Fraction of classified edges that agree with the bipartition:
    /// intra-community positive plus inter-community negative. 0 when no
    /// edge classifies.
    pub fn ratio(&self) -> f64 {
        let classified = self.classified();
        if classified == 0 {
            return 0.0;
        }
        (self.intra_s1_positive + self.intra_s2_positive + self.inter_negative) as f64
            / classified as f64
    }
}

/// Agreement ratio of a labeling: see [`EdgeClassCounts::ratio`].
pub fn agreement_ratio(graph: &SignedGraph, labeling: &[i8]) -> f64 {
    EdgeClassCounts::classify(graph, labeling).ratio()
}
