//! # rift
//!
//! Signed-graph polarization mining: find two communities that are
//! internally cohesive (positive edges inside) and mutually antagonistic
//! (negative edges across), leaving unrelated nodes out of both.
//!
//! The problem is NP-hard in general; this crate implements the
//! density-peeling heuristics: start from a spectral seed, then repeatedly
//! remove the node contributing least to the polarity objective, keeping
//! the best intermediate state.
//!
//! ## Pipeline
//!
//! ```rust
//! use rift::{
//!     dominant_eigenvector, eigensign_binary, ConsistencyPeeling, PowerIteration, SignedGraph,
//! };
//!
//! // Two friendly pairs at war: positive edges inside, negative across.
//! let graph = SignedGraph::from_edges(
//!     &[(0, 1, 1), (2, 3, 1), (1, 2, -1), (0, 3, -1)],
//!     4,
//! ).unwrap();
//!
//! let eigenvector = dominant_eigenvector(&graph, &PowerIteration::new().with_seed(42));
//! let seed = eigensign_binary(&eigenvector);
//! let report = ConsistencyPeeling::new().run(&graph, &seed).unwrap();
//!
//! let (s1, s2) = report.partition.communities();
//! assert_eq!(s1.len() + s2.len(), 4);
//! assert_eq!(report.partition.density, Some(2.0));
//! ```
//!
//! ## Algorithms
//!
//! - [`DegreePeeling`]: baseline peel by (signed) degree.
//! - [`ConsistencyPeeling`]: peel by agreement with the spectral seed,
//!   with the objective maintained incrementally in O(V + E) total.
//! - [`BoostedPeeling`]: re-peels over multiple rounds with per-node
//!   potentials to escape single-pass local optima.
//!
//! The spectral seed itself is replaceable: [`eigensign`],
//! [`eigensign_binary`] and [`sign_labeling`] accept any eigenvector-like
//! `ndarray` vector, with [`dominant_eigenvector`] as the built-in solver.
//!
//! ## References
//!
//! - Bonchi, Galimberti, Gionis, Ordozgoiti, Ruffo (2019). "Discovering
//!   Polarized Communities in Signed Networks." CIKM.
//! - Kunegis et al. (2010). "Spectral analysis of signed graphs for
//!   clustering, prediction and visualization." SDM.

pub mod error;
pub mod graph;
pub mod objective;
pub mod peel;
pub mod spectral;

pub use error::{Error, Result};
pub use graph::{communities, from_communities, members, Labeling, SignedGraph};
pub use objective::{agreement_ratio, improves, polarity_density, EdgeClassCounts};
pub use peel::{
    Bipartition, BoostedPeeling, BoostedReport, BucketQueue, ConsistencyPeeling, DegreePeeling,
    PeelReport,
};
pub use spectral::{
    dominant_eigenvector, eigensign, eigensign_binary, sign_labeling, EigensignSolution,
    PowerIteration,
};
