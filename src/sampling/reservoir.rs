//! Bottom-k edge reservoir
//!
//! Keeps the `capacity` distinct edges with the smallest ranks seen so far.
//! Backed by a max-heap on rank so the eviction candidate is always at the top.

use crate::graph::{Edge, Rank};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An edge together with the rank it was admitted with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEdge {
    pub edge: Edge,
    pub rank: Rank,
}

impl Eq for RankedEdge {}

impl Ord for RankedEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on rank; ties broken by edge so heap order is deterministic
        self.rank
            .value()
            .total_cmp(&other.rank.value())
            .then_with(|| self.edge.cmp(&other.edge))
    }
}

impl PartialOrd for RankedEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of offering an edge to the reservoir
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    /// Stored in a free slot
    Inserted,
    /// Stored in place of the evicted max-rank edge
    Replaced(Edge),
    /// Rank not small enough; reservoir unchanged
    Rejected,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Admission::Rejected)
    }
}

/// Fixed-capacity reservoir of ranked edges
#[derive(Debug, Clone)]
pub struct Reservoir {
    capacity: usize,
    heap: BinaryHeap<RankedEdge>,
}

impl Reservoir {
    /// Create an empty reservoir. `capacity` must be positive.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Reservoir {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The retained edge with the largest rank
    pub fn top(&self) -> Option<&RankedEdge> {
        self.heap.peek()
    }

    /// Current admission threshold: the largest retained rank
    pub fn threshold(&self) -> Option<f64> {
        self.top().map(|top| top.rank.value())
    }

    /// Offer an edge. Callers must not offer an edge that is already held.
    ///
    /// Below capacity every edge is inserted. At capacity the edge replaces
    /// the max-rank member only if its rank is strictly smaller.
    pub fn admit(&mut self, edge: Edge, rank: Rank) -> Admission {
        let candidate = RankedEdge { edge, rank };
        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
            return Admission::Inserted;
        }

        match self.heap.peek_mut() {
            Some(mut top) if rank.value() < top.rank.value() => {
                let evicted = std::mem::replace(&mut *top, candidate);
                // Dropping `top` restores heap order
                Admission::Replaced(evicted.edge)
            }
            _ => Admission::Rejected,
        }
    }

    /// Iterate retained edges in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &RankedEdge> {
        self.heap.iter()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.heap.iter().any(|held| held.edge == *edge)
    }
}
