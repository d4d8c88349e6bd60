//! Edge stream data model
//!
//! Vertices are plain integer ids; edges are normalized unordered pairs of
//! distinct vertices; ranks are sampling priorities in `[0, 1)`.

pub mod types;

pub use types::{Edge, Rank, VertexId};
