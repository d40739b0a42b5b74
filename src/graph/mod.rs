//! Signed-graph data structures.
//!
//! [`SignedGraph`] is the read-only adjacency structure every algorithm in
//! this crate operates on; [`Labeling`] is the {-1, 0, +1} community
//! assignment they produce and consume.

mod labeling;
mod signed;

pub use labeling::{communities, from_communities, members, Labeling};
pub use signed::SignedGraph;
