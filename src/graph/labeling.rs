//! Community labelings over {-1, 0, +1}.
//!
//! A labeling assigns every node to the first community (+1), the second
//! community (-1), or to neither (0). It is the common currency between the
//! spectral seeding step and the peeling algorithms.

use crate::error::{Error, Result};

/// Per-node community assignment: +1, -1, or 0 (excluded).
///
/// Always the same length as the graph's node count.
pub type Labeling = Vec<i8>;

/// Split a labeling into its two community id sets `(S1, S2)`, where S1
/// holds the nodes labeled +1 and S2 the nodes labeled -1.
pub fn communities(labeling: &[i8]) -> (Vec<usize>, Vec<usize>) {
    let mut s1 = Vec::new();
    let mut s2 = Vec::new();
    for (node, &label) in labeling.iter().enumerate() {
        match label {
            1 => s1.push(node),
            -1 => s2.push(node),
            _ => {}
        }
    }
    (s1, s2)
}

/// Nodes assigned to either community.
pub fn members(labeling: &[i8]) -> Vec<usize> {
    labeling
        .iter()
        .enumerate()
        .filter(|(_, &label)| label != 0)
        .map(|(node, _)| node)
        .collect()
}

/// Build a labeling of length `node_count` from two community id sets.
///
/// Nodes in `s1` get +1, nodes in `s2` get -1, everything else 0. A node
/// listed in both sets ends up in S2 (last write wins).
///
/// # Errors
///
/// [`Error::NodeOutOfRange`] if a listed node is not in `[0, node_count)`.
pub fn from_communities(node_count: usize, s1: &[usize], s2: &[usize]) -> Result<Labeling> {
    let mut labeling = vec![0i8; node_count];
    for (nodes, label) in [(s1, 1i8), (s2, -1i8)] {
        for &node in nodes {
            if node >= node_count {
                return Err(Error::NodeOutOfRange { node, node_count });
            }
            labeling[node] = label;
        }
    }
    Ok(labeling)
}
