//! Core type definitions for edge streams

use crate::error::{EstimatorError, EstimatorResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertex identifier. Vertices are created implicitly on first appearance.
pub type VertexId = u32;

/// An undirected edge, normalized so that `lo < hi`
///
/// Self-loops cannot be represented: [`Edge::new`] rejects equal endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Edge {
    lo: VertexId,
    hi: VertexId,
}

impl Edge {
    /// Create a normalized edge between two distinct vertices
    pub fn new(u: VertexId, v: VertexId) -> EstimatorResult<Self> {
        match u.cmp(&v) {
            std::cmp::Ordering::Less => Ok(Edge { lo: u, hi: v }),
            std::cmp::Ordering::Greater => Ok(Edge { lo: v, hi: u }),
            std::cmp::Ordering::Equal => Err(EstimatorError::SelfLoop(u)),
        }
    }

    /// Endpoint with the smaller id
    pub fn lo(&self) -> VertexId {
        self.lo
    }

    /// Endpoint with the larger id
    pub fn hi(&self) -> VertexId {
        self.hi
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.lo, self.hi)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

impl TryFrom<(VertexId, VertexId)> for Edge {
    type Error = EstimatorError;

    fn try_from((u, v): (VertexId, VertexId)) -> Result<Self, Self::Error> {
        Edge::new(u, v)
    }
}

/// Sampling rank of an edge, a value in `[0, 1)`
///
/// Smaller ranks are preferred for retention in the reservoir.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Rank(f64);

impl Rank {
    pub fn new(value: f64) -> EstimatorResult<Self> {
        if (0.0..1.0).contains(&value) {
            Ok(Rank(value))
        } else {
            Err(EstimatorError::RankOutOfRange(value))
        }
    }

    /// Caller guarantees `value` lies in `[0, 1)`
    pub(crate) fn from_unit(value: f64) -> Self {
        debug_assert!((0.0..1.0).contains(&value));
        Rank(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl TryFrom<f64> for Rank {
    type Error = EstimatorError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}
