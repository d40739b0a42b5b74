//! Spectral seeding for the peeling algorithms.
//!
//! The consistency-peeling algorithms start from a labeling derived from the
//! dominant eigenvector of the signed adjacency matrix: components of like
//! sign tend to sit in the same community, components of opposite sign in
//! antagonistic ones.
//!
//! The eigenvector itself is an opaque, replaceable input: any
//! `Array1<f64>` seeds the labeling builders below. [`dominant_eigenvector`]
//! is the built-in oracle: power iteration on the diagonally shifted
//! operator `A + σI` with σ the maximum unsigned degree, which turns the
//! largest *algebraic* eigenvalue of `A` into the largest-magnitude one
//! (Gershgorin bound) so the iteration converges to the right vector.
//! Matrix-vector products run over the adjacency lists in O(E) per step;
//! the dense matrix is never materialized.
//!
//! ## Seeding variants
//!
//! - [`eigensign`]: tries every distinct quantized magnitude of the
//!   eigenvector as an inclusion threshold and keeps the labeling with the
//!   best polarity density. Nodes below the threshold are excluded (0).
//! - [`eigensign_binary`]: signs only, no exclusion; every node joins a
//!   community. This is the seed for the consistency-peeling algorithms.
//! - [`sign_labeling`]: plain signum (exact zeros stay excluded); the seed
//!   used by degree peeling.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::graph::{Labeling, SignedGraph};
use crate::objective::{improves, polarity_density};

/// Configuration for the power-iteration eigensolver.
#[derive(Debug, Clone)]
pub struct PowerIteration {
    /// Maximum number of iterations.
    max_iter: usize,
    /// Convergence tolerance on the change of the iterate (max norm).
    tol: f64,
    /// Random seed for the start vector.
    seed: Option<u64>,
}

impl PowerIteration {
    /// Create a solver configuration with default settings.
    pub fn new() -> Self {
        Self {
            max_iter: 1000,
            tol: 1e-9,
            seed: None,
        }
    }

    /// Set the iteration limit.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed for the start vector.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self::new()
    }
}

/// Eigenvector for the largest algebraic eigenvalue of the signed adjacency
/// matrix, unit-normalized.
///
/// Returns the zero vector for an edgeless graph (the adjacency operator is
/// zero and has no dominant direction). The overall sign of the result is
/// arbitrary, as for any eigensolver; both signs describe the same
/// bipartition with the community roles exchanged.
pub fn dominant_eigenvector(graph: &SignedGraph, config: &PowerIteration) -> Array1<f64> {
    let n = graph.node_count();
    if n == 0 || graph.edge_count() == 0 {
        return Array1::zeros(n);
    }

    let shift = (0..n).map(|node| graph.degree(node)).max().unwrap_or(0) as f64;

    let mut rng: Box<dyn RngCore> = match config.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };
    let mut v = Array1::from_shape_fn(n, |_| rng.random::<f64>() - 0.5);
    normalize(&mut v);

    for _ in 0..config.max_iter {
        // w = (A + shift I) v, with A applied over the adjacency lists.
        let mut w = Array1::zeros(n);
        for node in 0..n {
            let mut acc = shift * v[node];
            for &neighbor in graph.positive_neighbors(node) {
                acc += v[neighbor];
            }
            for &neighbor in graph.negative_neighbors(node) {
                acc -= v[neighbor];
            }
            w[node] = acc;
        }

        if !normalize(&mut w) {
            // Start vector fell in the operator's null space; reseed.
            v = Array1::from_shape_fn(n, |_| rng.random::<f64>() - 0.5);
            normalize(&mut v);
            continue;
        }

        let delta = w
            .iter()
            .zip(v.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        v = w;
        if delta < config.tol {
            break;
        }
    }
    v
}

fn normalize(v: &mut Array1<f64>) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm <= f64::EPSILON {
        return false;
    }
    v.mapv_inplace(|x| x / norm);
    true
}

/// Result of threshold-swept eigensign seeding.
#[derive(Debug, Clone, PartialEq)]
pub struct EigensignSolution {
    /// Best labeling found across all thresholds.
    pub labeling: Labeling,
    /// Its polarity density (`None` only when every component is zero).
    pub density: Option<f64>,
    /// The inclusion threshold that produced it.
    pub threshold: f64,
}

/// Sweep inclusion thresholds over the eigenvector magnitudes and keep the
/// best-scoring labeling.
///
/// Candidate thresholds are the distinct absolute component values
/// truncated to three decimals; for each threshold τ, node v gets
/// `sign(e[v])` when `|e[v]| ≥ τ` and 0 otherwise. The truncation is a
/// deliberate quantization of "try all distinct magnitudes" and is kept at
/// this granularity for compatibility with results produced at it.
pub fn eigensign(graph: &SignedGraph, eigenvector: &Array1<f64>) -> EigensignSolution {
    assert_eq!(
        eigenvector.len(),
        graph.node_count(),
        "eigenvector length must equal node count"
    );

    let mut thresholds: Vec<f64> = eigenvector
        .iter()
        .map(|component| (component.abs() * 1000.0).trunc() / 1000.0)
        .collect();
    thresholds.sort_by(|a, b| a.partial_cmp(b).expect("thresholds are finite"));
    thresholds.dedup();

    let mut best = EigensignSolution {
        labeling: vec![0; graph.node_count()],
        density: None,
        threshold: 0.0,
    };
    for &threshold in &thresholds {
        let labeling: Labeling = eigenvector
            .iter()
            .map(|&component| {
                if component.abs() >= threshold {
                    signum(component)
                } else {
                    0
                }
            })
            .collect();
        let density = polarity_density(graph, &labeling);
        if improves(density, best.density) {
            best = EigensignSolution {
                labeling,
                density,
                threshold,
            };
        }
    }
    best
}

/// Binary eigensign labeling: +1 where the component is non-negative, -1
/// elsewhere. No node is excluded.
pub fn eigensign_binary(eigenvector: &Array1<f64>) -> Labeling {
    eigenvector
        .iter()
        .map(|&component| if component >= 0.0 { 1 } else { -1 })
        .collect()
}

/// Signum labeling: the sign of each component, with exact zeros excluded.
pub fn sign_labeling(eigenvector: &Array1<f64>) -> Labeling {
    eigenvector.iter().map(|&component| signum(component)).collect()
}

fn signum(component: f64) -> i8 {
    if component > 0.0 {
        1
    } else if component < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // Two triangles of friends, all cross edges hostile.
    fn two_camps() -> SignedGraph {
        let edges = [
            (0, 1, 1),
            (1, 2, 1),
            (0, 2, 1),
            (3, 4, 1),
            (4, 5, 1),
            (3, 5, 1),
            (0, 3, -1),
            (1, 4, -1),
            (2, 5, -1),
        ];
        SignedGraph::from_edges(&edges, 6).unwrap()
    }

    #[test]
    fn test_dominant_eigenvector_splits_camps() {
        let graph = two_camps();
        let v = dominant_eigenvector(&graph, &PowerIteration::new().with_seed(7));

        // One camp per sign, and a genuinely dominant direction.
        let labeling = eigensign_binary(&v);
        assert_eq!(labeling[0], labeling[1]);
        assert_eq!(labeling[1], labeling[2]);
        assert_eq!(labeling[3], labeling[4]);
        assert_eq!(labeling[4], labeling[5]);
        assert_ne!(labeling[0], labeling[3]);

        let norm: f64 = v.iter().map(|x| x * x).sum();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dominant_eigenvector_rayleigh_quotient() {
        let graph = two_camps();
        let v = dominant_eigenvector(&graph, &PowerIteration::new().with_seed(7));

        // lambda_max of this graph's adjacency is 3 (each node: two
        // consistent intra edges plus one consistent inter edge).
        let a = graph.adjacency_matrix();
        let av = a.dot(&v);
        let rayleigh = v.dot(&av);
        assert!((rayleigh - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_edgeless_graph_has_no_direction() {
        let graph = SignedGraph::from_edges(&[], 3).unwrap();
        let v = dominant_eigenvector(&graph, &PowerIteration::new().with_seed(1));
        assert!(v.iter().all(|&x| x == 0.0));
        assert_eq!(sign_labeling(&v), vec![0, 0, 0]);
        assert_eq!(eigensign_binary(&v), vec![1, 1, 1]);
    }

    #[test]
    fn test_eigensign_excludes_weak_components() {
        // Node 4 dangles off the polarized square with a single positive
        // edge; its eigenvector component is small.
        let edges = [
            (0, 1, 1),
            (2, 3, 1),
            (1, 2, -1),
            (0, 3, -1),
            (3, 4, 1),
        ];
        let graph = SignedGraph::from_edges(&edges, 5).unwrap();
        let v = dominant_eigenvector(&graph, &PowerIteration::new().with_seed(11));
        let solution = eigensign(&graph, &v);

        assert!(solution.density.is_some());
        // The best threshold keeps a labeling at least as good as all-in.
        let all_in = polarity_density(&graph, &eigensign_binary(&v));
        assert!(solution.density >= all_in);
        assert_eq!(solution.labeling.len(), 5);
    }

    #[test]
    fn test_eigensign_quantization() {
        let graph = SignedGraph::from_edges(&[(0, 1, 1)], 2).unwrap();
        let v = array![0.70710678, -0.70710678];
        let solution = eigensign(&graph, &v);
        // Only one distinct quantized magnitude: 0.707.
        assert!((solution.threshold - 0.707).abs() < 1e-12);
        assert_eq!(solution.labeling, vec![1, -1]);
        // Positive edge across the split scores -1 per node.
        assert_eq!(solution.density, Some(-1.0));
    }

    #[test]
    fn test_sign_labeling_keeps_zero() {
        let v = array![0.5, -0.25, 0.0];
        assert_eq!(sign_labeling(&v), vec![1, -1, 0]);
        assert_eq!(eigensign_binary(&v), vec![1, -1, 1]);
    }
}
