//! Signed graph adjacency structure.
//!
//! A [`SignedGraph`] stores, for every node, two neighbor lists: one for
//! positive (agreement) edges and one for negative (conflict) edges. The
//! structure is immutable after construction; the dense adjacency matrix and
//! the signed Laplacian are built on first request and cached for the
//! graph's lifetime.
//!
//! ## Input format
//!
//! The text loader reads a line-oriented edge list:
//!
//! ```text
//! # 4
//! 0	1	1
//! 1	2	1
//! 2	3	-1
//! 0	3	-1
//! ```
//!
//! First line: `# <node_count>`. Each following line: tab-separated
//! `<from> <to> <sign>` with sign in {1, -1}. Edges are undirected; parallel
//! edges are kept as duplicate neighbor entries; self-loops are dropped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use ndarray::Array2;

use crate::error::{Error, Result};

#[cfg(feature = "petgraph")]
use petgraph::graph::UnGraph;
#[cfg(feature = "petgraph")]
use petgraph::visit::EdgeRef;

/// An undirected graph with edges labeled +1 or -1.
///
/// Node ids are dense integers in `[0, node_count)`. Construction validates
/// every edge; no partially-built graph is ever returned.
#[derive(Debug)]
pub struct SignedGraph {
    node_count: usize,
    edge_count: usize,
    positive: Vec<Vec<usize>>,
    negative: Vec<Vec<usize>>,
    adjacency: OnceLock<Array2<f64>>,
    laplacian: OnceLock<Array2<f64>>,
}

impl SignedGraph {
    /// Build a graph from an explicit edge list.
    ///
    /// Each edge is `(from, to, sign)` with sign +1 or -1. Self-loops are
    /// dropped; parallel edges are kept.
    ///
    /// # Errors
    ///
    /// [`Error::NodeOutOfRange`] if an endpoint is not in `[0, node_count)`;
    /// [`Error::InvalidSign`] for a sign other than +1/-1.
    pub fn from_edges(edges: &[(usize, usize, i8)], node_count: usize) -> Result<Self> {
        let mut graph = Self::empty(node_count);
        for &(from, to, sign) in edges {
            graph.add_edge(from, to, sign)?;
        }
        Ok(graph)
    }

    /// Load a graph from an edge-list file (see module docs for the format).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a graph from any buffered reader in the edge-list format.
    ///
    /// Fails fast on the first malformed line; empty lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let node_count = match lines.next() {
            Some((_, line)) => {
                let line = line?;
                let header = line.trim();
                let count = header.strip_prefix('#').map(str::trim).ok_or_else(|| {
                    Error::BadEdgeLine {
                        line: 1,
                        reason: format!("expected '# <node_count>' header, got '{header}'"),
                    }
                })?;
                count.parse::<usize>().map_err(|_| Error::BadEdgeLine {
                    line: 1,
                    reason: format!("node count '{count}' is not an integer"),
                })?
            }
            None => {
                return Err(Error::BadEdgeLine {
                    line: 1,
                    reason: "missing '# <node_count>' header".to_string(),
                })
            }
        };

        let mut graph = Self::empty(node_count);
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (from, to, sign) = parse_edge_line(&line, index + 1)?;
            graph.add_edge(from, to, sign)?;
        }
        Ok(graph)
    }

    /// Build a signed graph from a petgraph undirected graph whose edge
    /// weights are the signs.
    #[cfg(feature = "petgraph")]
    pub fn from_ungraph<N>(graph: &UnGraph<N, i8>) -> Result<Self> {
        let mut signed = Self::empty(graph.node_count());
        for edge in graph.edge_references() {
            signed.add_edge(edge.source().index(), edge.target().index(), *edge.weight())?;
        }
        Ok(signed)
    }

    fn empty(node_count: usize) -> Self {
        Self {
            node_count,
            edge_count: 0,
            positive: vec![Vec::new(); node_count],
            negative: vec![Vec::new(); node_count],
            adjacency: OnceLock::new(),
            laplacian: OnceLock::new(),
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, sign: i8) -> Result<()> {
        for node in [from, to] {
            if node >= self.node_count {
                return Err(Error::NodeOutOfRange {
                    node,
                    node_count: self.node_count,
                });
            }
        }
        let lists = match sign {
            1 => &mut self.positive,
            -1 => &mut self.negative,
            other => return Err(Error::InvalidSign { sign: other as i64 }),
        };
        // self-loops carry no polarity information
        if from != to {
            lists[from].push(to);
            lists[to].push(from);
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected edges (each counted once, self-loops excluded).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of `node` across positive edges.
    pub fn positive_neighbors(&self, node: usize) -> &[usize] {
        &self.positive[node]
    }

    /// Neighbors of `node` across negative edges.
    pub fn negative_neighbors(&self, node: usize) -> &[usize] {
        &self.negative[node]
    }

    /// Unsigned degree of `node` (positive plus negative incident edges).
    pub fn degree(&self, node: usize) -> usize {
        self.positive[node].len() + self.negative[node].len()
    }

    /// The dense signed adjacency matrix.
    ///
    /// Entry `(i, j)` is +1 for a positive edge, -1 for a negative edge, 0
    /// otherwise. Symmetric. Built in O(V² + E) on first call, cached after.
    pub fn adjacency_matrix(&self) -> &Array2<f64> {
        self.adjacency.get_or_init(|| {
            let mut a = Array2::zeros((self.node_count, self.node_count));
            for node in 0..self.node_count {
                for &neighbor in &self.positive[node] {
                    a[[node, neighbor]] = 1.0;
                }
                for &neighbor in &self.negative[node] {
                    a[[node, neighbor]] = -1.0;
                }
            }
            a
        })
    }

    /// The dense signed Laplacian.
    ///
    /// Off-diagonal entries are the negated edge sign; the diagonal holds
    /// each node's unsigned degree. Cached like [`adjacency_matrix`].
    ///
    /// [`adjacency_matrix`]: SignedGraph::adjacency_matrix
    pub fn signed_laplacian(&self) -> &Array2<f64> {
        self.laplacian.get_or_init(|| {
            let mut l = Array2::zeros((self.node_count, self.node_count));
            for node in 0..self.node_count {
                for &neighbor in &self.positive[node] {
                    l[[node, neighbor]] = -1.0;
                }
                for &neighbor in &self.negative[node] {
                    l[[node, neighbor]] = 1.0;
                }
                l[[node, node]] = self.degree(node) as f64;
            }
            l
        })
    }

    /// The signed Laplacian of the subgraph induced by `nodes`, reindexed to
    /// `0..k` in ascending original-id order.
    ///
    /// Diagonal degrees count only edges with both endpoints inside the
    /// subset. Intended for subgraph spectral analysis by callers; the
    /// peeling algorithms do not use it.
    pub fn induced_laplacian(&self, nodes: &[usize]) -> Result<Array2<f64>> {
        let mut sorted = nodes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if let Some(&node) = sorted.iter().find(|&&node| node >= self.node_count) {
            return Err(Error::NodeOutOfRange {
                node,
                node_count: self.node_count,
            });
        }

        let mut order = vec![usize::MAX; self.node_count];
        for (index, &node) in sorted.iter().enumerate() {
            order[node] = index;
        }

        let k = sorted.len();
        let mut l = Array2::zeros((k, k));
        for (index, &node) in sorted.iter().enumerate() {
            let mut degree = 0.0;
            for &neighbor in &self.positive[node] {
                if order[neighbor] != usize::MAX {
                    l[[index, order[neighbor]]] += -1.0;
                    degree += 1.0;
                }
            }
            for &neighbor in &self.negative[node] {
                if order[neighbor] != usize::MAX {
                    l[[index, order[neighbor]]] += 1.0;
                    degree += 1.0;
                }
            }
            l[[index, index]] = degree;
        }
        Ok(l)
    }
}

fn parse_edge_line(line: &str, line_number: usize) -> Result<(usize, usize, i8)> {
    let mut fields = line.split('\t').map(str::trim);
    let mut next_field = |name: &str| {
        fields.next().filter(|f| !f.is_empty()).ok_or_else(|| Error::BadEdgeLine {
            line: line_number,
            reason: format!("missing {name} field"),
        })
    };

    let from = next_field("from")?;
    let to = next_field("to")?;
    let sign = next_field("sign")?;

    let from = from.parse::<usize>().map_err(|_| Error::BadEdgeLine {
        line: line_number,
        reason: format!("'{from}' is not a node id"),
    })?;
    let to = to.parse::<usize>().map_err(|_| Error::BadEdgeLine {
        line: line_number,
        reason: format!("'{to}' is not a node id"),
    })?;
    let sign = sign.parse::<i64>().map_err(|_| Error::BadEdgeLine {
        line: line_number,
        reason: format!("'{sign}' is not a sign"),
    })?;
    let sign = match sign {
        1 => 1,
        -1 => -1,
        other => return Err(Error::InvalidSign { sign: other }),
    };
    Ok((from, to, sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FOUR_CYCLE: &[(usize, usize, i8)] =
        &[(0, 1, 1), (1, 2, 1), (2, 3, -1), (0, 3, -1)];

    fn four_cycle_text() -> String {
        "# 4\n0\t1\t1\n1\t2\t1\n2\t3\t-1\n0\t3\t-1\n".to_string()
    }

    #[test]
    fn test_from_edges_basic() {
        let graph = SignedGraph::from_edges(FOUR_CYCLE, 4).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.positive_neighbors(1), &[0, 2]);
        assert_eq!(graph.negative_neighbors(3), &[2, 0]);
        assert_eq!(graph.degree(0), 2);
    }

    #[test]
    fn test_text_and_edge_list_agree() {
        let from_text = SignedGraph::from_reader(Cursor::new(four_cycle_text())).unwrap();
        let from_edges = SignedGraph::from_edges(FOUR_CYCLE, 4).unwrap();

        assert_eq!(from_text.node_count(), from_edges.node_count());
        assert_eq!(from_text.edge_count(), from_edges.edge_count());
        for node in 0..4 {
            let sets = |graph: &SignedGraph| {
                let mut pos = graph.positive_neighbors(node).to_vec();
                let mut neg = graph.negative_neighbors(node).to_vec();
                pos.sort_unstable();
                neg.sort_unstable();
                (pos, neg)
            };
            assert_eq!(sets(&from_text), sets(&from_edges));
        }
        assert_eq!(from_text.adjacency_matrix(), from_edges.adjacency_matrix());
    }

    #[test]
    fn test_self_loop_dropped() {
        let graph = SignedGraph::from_edges(&[(0, 1, 1), (3, 3, 1)], 4).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.positive_neighbors(3).is_empty());
        assert!(graph.negative_neighbors(3).is_empty());
    }

    #[test]
    fn test_node_out_of_range() {
        let result = SignedGraph::from_edges(&[(0, 7, 1)], 4);
        assert_eq!(
            result.unwrap_err(),
            Error::NodeOutOfRange {
                node: 7,
                node_count: 4
            }
        );
    }

    #[test]
    fn test_invalid_sign() {
        let result = SignedGraph::from_edges(&[(0, 1, 2)], 4);
        assert_eq!(result.unwrap_err(), Error::InvalidSign { sign: 2 });
    }

    #[test]
    fn test_bad_header() {
        let result = SignedGraph::from_reader(Cursor::new("4\n0\t1\t1\n"));
        assert!(matches!(result, Err(Error::BadEdgeLine { line: 1, .. })));
    }

    #[test]
    fn test_bad_edge_line() {
        let result = SignedGraph::from_reader(Cursor::new("# 4\n0\t1\n"));
        assert!(matches!(result, Err(Error::BadEdgeLine { line: 2, .. })));

        let result = SignedGraph::from_reader(Cursor::new("# 4\n0\tx\t1\n"));
        assert!(matches!(result, Err(Error::BadEdgeLine { line: 2, .. })));

        let result = SignedGraph::from_reader(Cursor::new("# 4\n0\t1\t5\n"));
        assert_eq!(result.unwrap_err(), Error::InvalidSign { sign: 5 });
    }

    #[test]
    fn test_adjacency_matrix() {
        let graph = SignedGraph::from_edges(FOUR_CYCLE, 4).unwrap();
        let a = graph.adjacency_matrix();
        assert_eq!(a[[0, 1]], 1.0);
        assert_eq!(a[[1, 0]], 1.0);
        assert_eq!(a[[2, 3]], -1.0);
        assert_eq!(a[[3, 2]], -1.0);
        assert_eq!(a[[0, 2]], 0.0);
        assert_eq!(a[[0, 0]], 0.0);
    }

    #[test]
    fn test_signed_laplacian() {
        let graph = SignedGraph::from_edges(FOUR_CYCLE, 4).unwrap();
        let l = graph.signed_laplacian();
        assert_eq!(l[[0, 1]], -1.0);
        assert_eq!(l[[2, 3]], 1.0);
        for node in 0..4 {
            assert_eq!(l[[node, node]], 2.0);
        }
    }

    #[test]
    fn test_induced_laplacian() {
        let graph = SignedGraph::from_edges(FOUR_CYCLE, 4).unwrap();
        // Subgraph {0, 1, 3}: edges (0,1,+) and (0,3,-); reindexed 0->0, 1->1, 3->2.
        let l = graph.induced_laplacian(&[3, 0, 1]).unwrap();
        assert_eq!(l.nrows(), 3);
        assert_eq!(l[[0, 0]], 2.0);
        assert_eq!(l[[1, 1]], 1.0);
        assert_eq!(l[[2, 2]], 1.0);
        assert_eq!(l[[0, 1]], -1.0);
        assert_eq!(l[[0, 2]], 1.0);
        assert_eq!(l[[1, 2]], 0.0);

        assert!(graph.induced_laplacian(&[0, 9]).is_err());
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn test_from_ungraph() {
        use petgraph::graph::UnGraph;

        let mut input = UnGraph::<(), i8>::new_undirected();
        let nodes: Vec<_> = (0..4).map(|_| input.add_node(())).collect();
        input.add_edge(nodes[0], nodes[1], 1);
        input.add_edge(nodes[1], nodes[2], 1);
        input.add_edge(nodes[2], nodes[3], -1);
        input.add_edge(nodes[0], nodes[3], -1);

        let graph = SignedGraph::from_ungraph(&input).unwrap();
        let reference = SignedGraph::from_edges(FOUR_CYCLE, 4).unwrap();
        assert_eq!(graph.adjacency_matrix(), reference.adjacency_matrix());
    }
}
