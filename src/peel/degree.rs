//! Peeling by raw degree.
//!
//! The baseline peel: repeatedly delete the active node of minimum degree
//! and keep the labeling with the best polarity density seen. With
//! `signed_degree` (the default), a node's value is its positive minus its
//! negative degree, so nodes drowning in conflict edges go first.
//!
//! Removal order is kept in a lazy-deletion min-heap: neighbor updates push
//! fresh entries and stale ones are skipped when popped, the classic
//! alternative to a decrease-key operation.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::graph::SignedGraph;
use crate::objective::{improves, polarity_density};
use crate::peel::Bipartition;

/// Greedy degree-removal peel.
#[derive(Debug, Clone)]
pub struct DegreePeeling {
    signed_degree: bool,
}

impl DegreePeeling {
    /// Create the algorithm with signed degrees (positive minus negative).
    pub fn new() -> Self {
        Self {
            signed_degree: true,
        }
    }

    /// Peel by unsigned positive degree instead of positive minus negative.
    pub fn with_signed_degree(mut self, signed_degree: bool) -> Self {
        self.signed_degree = signed_degree;
        self
    }

    /// Peel `graph` starting from the labeling `x0`.
    ///
    /// Every node is active initially, whatever its seed label; peeling
    /// only ever clears labels. An all-zero `x0` flows through and yields
    /// the empty bipartition with undefined density.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for a node-less graph;
    /// [`Error::LengthMismatch`] if `x0` does not cover every node.
    pub fn run(&self, graph: &SignedGraph, x0: &[i8]) -> Result<Bipartition> {
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

        let mut degree: Vec<i64> = (0..n)
            .map(|node| {
                let positive = graph.positive_neighbors(node).len() as i64;
                let negative = graph.negative_neighbors(node).len() as i64;
                positive - if self.signed_degree { negative } else { 0 }
            })
            .collect();
        let mut heap: BinaryHeap<Reverse<(i64, usize)>> = (0..n)
            .map(|node| Reverse((degree[node], node)))
            .collect();

        let mut active = vec![true; n];
        let mut x = x0.to_vec();
        let mut best = Bipartition {
            labeling: x.clone(),
            density: polarity_density(graph, &x),
        };

        while let Some(Reverse((_, node))) = heap.pop() {
            if !active[node] {
                continue;
            }
            active[node] = false;
            x[node] = 0;

            for &neighbor in graph.positive_neighbors(node) {
                if active[neighbor] {
                    degree[neighbor] -= 1;
                    heap.push(Reverse((degree[neighbor], neighbor)));
                }
            }
            if self.signed_degree {
                for &neighbor in graph.negative_neighbors(node) {
                    if active[neighbor] {
                        degree[neighbor] += 1;
                        heap.push(Reverse((degree[neighbor], neighbor)));
                    }
                }
            }

            let density = polarity_density(graph, &x);
            if improves(density, best.density) {
                best = Bipartition {
                    labeling: x.clone(),
                    density,
                };
            }
        }

        Ok(best)
    }
}

impl Default for DegreePeeling {
    fn default() -> Self {
        Self::new()
    }
}
