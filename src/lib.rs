//! tristream
//!
//! One-pass estimation of per-vertex and global triangle counts over a stream
//! of edge insertions into an undirected multigraph, in memory bounded by a
//! fixed edge budget.
//!
//! # Architecture
//!
//! - [`sampling::Reservoir`]: bottom-k sample of edges by rank
//! - [`sampling::SampledGraph`]: adjacency of the sampled edges, binary or
//!   with multiplicities
//! - [`TriangleEstimator`]: per-event update, triangle enumeration and
//!   inverse-probability weighting
//! - [`ensemble::EnsembleSmoother`]: exponential decay over time buckets
//!
//! The edge-list reader, rank hasher, output files and error metrics used by
//! the `tristream` command-line tool live in [`stream`], [`rank`],
//! [`output`] and [`metrics`].
//!
//! ## Example Usage
//!
//! ```rust
//! use tristream::{Edge, EstimatorConfig, Rank, TriangleEstimator};
//!
//! let mut estimator = TriangleEstimator::new(EstimatorConfig::binary(100)).unwrap();
//!
//! for (u, v, r) in [(1, 2, 0.1), (2, 3, 0.2), (1, 3, 0.3)] {
//!     let edge = Edge::new(u, v).unwrap();
//!     estimator.update(edge, Rank::new(r).unwrap());
//! }
//!
//! assert_eq!(estimator.raw_estimate(), vec![0.0, 1.0, 1.0, 1.0]);
//! assert_eq!(estimator.triangle_estimate(), 1.0);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod ensemble;
pub mod error;
pub mod estimator;
pub mod graph;
pub mod metrics;
pub mod output;
pub mod rank;
pub mod sampling;
pub mod stream;

pub use config::{CountingMode, EstimatorConfig};
pub use error::{ConfigError, ConfigResult, EstimatorError, EstimatorResult};
pub use estimator::{EstimatorStats, TriangleEstimator};
pub use graph::{Edge, Rank, VertexId};
pub use rank::{EdgeHasher, RankSource};
pub use stream::{EdgeListReader, StreamError, StreamResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
