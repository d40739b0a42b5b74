//! Iterated consistency peeling with per-node potentials.
//!
//! A single peel is greedy and can strand a good node behind an early
//! removal. The boosted variant re-runs the peel, carrying a per-node
//! potential `l_v` across rounds: whenever a node is removed, its potential
//! becomes the bucket key it held at that moment. Nodes removed early
//! accumulate strongly negative potentials and sink to the front of the
//! next round's removal order, which frees the later order to explore
//! different peelings and drives the process toward a stable one, the same
//! load-carrying idea as iterated densest-subgraph peeling.
//!
//! Unlike the single-pass peel, every round starts from the **full** node
//! set, even for nodes the seed labeling excludes.

use crate::error::{Error, Result};
use crate::graph::SignedGraph;
use crate::objective::improves;
use crate::peel::consistency::peel_pass;
use crate::peel::Bipartition;

/// Iterated consistency peel with cross-round potentials.
#[derive(Debug, Clone)]
pub struct BoostedPeeling {
    iterations: usize,
    convergence: Option<f64>,
}

/// Outcome of a boosted peel.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostedReport {
    /// Best state seen across all rounds.
    pub partition: Bipartition,
    /// Largest inconsistent degree seen at any removal, over all rounds.
    pub max_inconsistent_degree: usize,
    /// Number of rounds actually executed.
    pub iterations: usize,
}

impl BoostedPeeling {
    /// Create the algorithm with a fixed budget of 10 rounds.
    pub fn new() -> Self {
        Self {
            iterations: 10,
            convergence: None,
        }
    }

    /// Set the fixed round budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Stop on relative objective change below `threshold` instead of a
    /// fixed budget: `|f_i - f_{i-1}| / max(|f_{i-1}|, 1) < threshold`.
    /// The check needs a predecessor, so at least two rounds run.
    pub fn with_convergence(mut self, threshold: f64) -> Self {
        self.convergence = Some(threshold);
        self
    }

    /// Run the boosted peel of `graph` against the seed labeling `x0`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for a node-less graph;
    /// [`Error::LengthMismatch`] if `x0` does not cover every node.
    pub fn run(&self, graph: &SignedGraph, x0: &[i8]) -> Result<BoostedReport> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if x0.len() != n {
            return Err(Error::LengthMismatch {
                expected: n,
                found: x0.len(),
            });
        }

        let mut potential = vec![0i64; n];
        let mut best: Option<Bipartition> = None;
        let mut max_inconsistent = 0usize;
        let mut previous: Option<f64> = None;
        let mut executed = 0usize;

        loop {
            executed += 1;
            let outcome = peel_pass(graph, x0, true, Some(&mut potential));
            let round_objective = outcome.best.density;

            max_inconsistent = max_inconsistent.max(outcome.max_inconsistent_degree);
            let replace = match &best {
                Some(incumbent) => improves(round_objective, incumbent.density),
                None => true,
            };
            if replace {
                best = Some(outcome.best);
            }

            match self.convergence {
                Some(threshold) => {
                    if let (Some(previous), Some(current)) = (previous, round_objective) {
                        let relative = (current - previous).abs() / previous.abs().max(1.0);
                        if relative < threshold {
                            break;
                        }
                    }
                    previous = round_objective;
                }
                None => {
                    if executed >= self.iterations {
                        break;
                    }
                }
            }
        }

        Ok(BoostedReport {
            // A round always runs, so a best always exists.
            partition: best.expect("at least one round executed"),
            max_inconsistent_degree: max_inconsistent,
            iterations: executed,
        })
    }
}

impl Default for BoostedPeeling {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peel::ConsistencyPeeling;

    fn polarized_square() -> SignedGraph {
        SignedGraph::from_edges(&[(0, 1, 1), (2, 3, 1), (1, 2, -1), (0, 3, -1)], 4).unwrap()
    }

    #[test]
    fn test_single_round_matches_single_pass() {
        // The best state of this instance is unique whatever the tie-break
        // order, so both algorithms must land on it.
        let graph = SignedGraph::from_edges(
            &[(0, 1, 1), (2, 3, 1), (1, 2, -1), (0, 3, -1), (2, 4, -1), (3, 4, -1)],
            5,
        )
        .unwrap();
        let x0 = [1, 1, -1, -1, -1];

        let single = ConsistencyPeeling::new().run(&graph, &x0).unwrap();
        let boosted = BoostedPeeling::new()
            .with_iterations(1)
            .run(&graph, &x0)
            .unwrap();

        assert_eq!(boosted.iterations, 1);
        assert_eq!(boosted.partition, single.partition);
        assert_eq!(
            boosted.max_inconsistent_degree,
            single.max_inconsistent_degree
        );
    }

    #[test]
    fn test_fully_consistent_graph_is_stable() {
        let graph = polarized_square();
        let report = BoostedPeeling::new()
            .with_iterations(3)
            .run(&graph, &[1, 1, -1, -1])
            .unwrap();
        assert_eq!(report.iterations, 3);
        assert_eq!(report.partition.labeling, vec![1, 1, -1, -1]);
        assert_eq!(report.partition.density, Some(2.0));
        assert_eq!(report.max_inconsistent_degree, 0);
    }

    #[test]
    fn test_convergence_stops_on_stable_objective() {
        let graph = polarized_square();
        let report = BoostedPeeling::new()
            .with_convergence(0.001)
            .run(&graph, &[1, 1, -1, -1])
            .unwrap();
        // Identical objective in round two triggers the check.
        assert_eq!(report.iterations, 2);
        assert_eq!(report.partition.density, Some(2.0));
    }

    #[test]
    fn test_starts_from_full_set_despite_seed_zeros() {
        // The single-pass peel never admits seed-excluded nodes; the
        // boosted variant peels them instead of ignoring them.
        let graph = polarized_square();
        let x0 = [1, 1, 0, 0];

        let report = BoostedPeeling::new()
            .with_iterations(1)
            .run(&graph, &x0)
            .unwrap();

        // Nodes 2 and 3 enter the peel with label 0: they are removed like
        // anyone else but never scored, so the best state is the seeded
        // pair at its true density.
        assert_eq!(report.partition.labeling, vec![1, 1, 0, 0]);
        assert_eq!(report.partition.density, Some(1.0));
        assert_eq!(report.max_inconsistent_degree, 0);
    }

    #[test]
    fn test_potentials_shift_later_rounds() {
        // Two hostile triangles bridged by one consistent negative edge.
        let edges = [
            (0, 1, 1),
            (1, 2, 1),
            (0, 2, 1),
            (3, 4, 1),
            (4, 5, 1),
            (3, 5, 1),
            (2, 3, -1),
        ];
        let graph = SignedGraph::from_edges(&edges, 6).unwrap();
        let x0 = [1, 1, 1, -1, -1, -1];

        let report = BoostedPeeling::new()
            .with_iterations(4)
            .run(&graph, &x0)
            .unwrap();

        // Everything is consistent; no round can beat keeping all six.
        assert_eq!(report.partition.labeling, x0.to_vec());
        assert_eq!(report.partition.density, Some(7.0 / 3.0));
        assert_eq!(report.max_inconsistent_degree, 0);
        assert_eq!(report.iterations, 4);
    }

    #[test]
    fn test_input_validation() {
        let graph = SignedGraph::from_edges(&[], 0).unwrap();
        assert_eq!(
            BoostedPeeling::new().run(&graph, &[]).unwrap_err(),
            Error::EmptyInput
        );

        let graph = polarized_square();
        assert_eq!(
            BoostedPeeling::new().run(&graph, &[1]).unwrap_err(),
            Error::LengthMismatch {
                expected: 4,
                found: 1
            }
        );
    }
}
