//! Edge sampling: the bottom-k reservoir and the sampled subgraph it induces

pub mod reservoir;
pub mod sampled_graph;

pub use reservoir::{Admission, RankedEdge, Reservoir};
pub use sampled_graph::{BinaryAdjacency, NeighborList, SampledGraph, WeightedAdjacency};
