//! Adjacency view of the edges currently held in the reservoir
//!
//! Two representations:
//! - binary: each vertex maps to its distinct sampled neighbors
//! - weighted: each vertex maps to `neighbor -> multiplicity`, where the
//!   multiplicity counts observations of the pair since it was admitted

use crate::config::CountingMode;
use crate::graph::{Edge, VertexId};
use rustc_hash::FxHashMap;

/// Unordered neighbor list with O(1) membership and O(1) removal
///
/// Removal swaps the last element into the vacated slot; `slots` tracks each
/// neighbor's current position.
#[derive(Debug, Clone, Default)]
pub struct NeighborList {
    items: Vec<VertexId>,
    slots: FxHashMap<VertexId, usize>,
}

impl NeighborList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.slots.contains_key(&v)
    }

    /// Append `v`. Returns false if it was already present.
    pub fn push(&mut self, v: VertexId) -> bool {
        if self.slots.contains_key(&v) {
            return false;
        }
        self.slots.insert(v, self.items.len());
        self.items.push(v);
        true
    }

    /// Remove `v` by swapping the last neighbor into its slot
    pub fn remove(&mut self, v: VertexId) -> bool {
        let Some(slot) = self.slots.remove(&v) else {
            return false;
        };
        self.items.swap_remove(slot);
        if let Some(&moved) = self.items.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.items.iter().copied()
    }
}

/// Sampled graph without multiplicities
#[derive(Debug, Clone, Default)]
pub struct BinaryAdjacency {
    neighbors: FxHashMap<VertexId, NeighborList>,
    edges: usize,
}

impl BinaryAdjacency {
    pub fn insert(&mut self, u: VertexId, v: VertexId) {
        let added = self.neighbors.entry(u).or_default().push(v);
        self.neighbors.entry(v).or_default().push(u);
        if added {
            self.edges += 1;
        }
    }

    pub fn remove(&mut self, u: VertexId, v: VertexId) {
        let removed = self.remove_half(u, v);
        self.remove_half(v, u);
        if removed {
            self.edges -= 1;
        }
    }

    fn remove_half(&mut self, u: VertexId, v: VertexId) -> bool {
        let Some(list) = self.neighbors.get_mut(&u) else {
            return false;
        };
        let removed = list.remove(v);
        if list.is_empty() {
            self.neighbors.remove(&u);
        }
        removed
    }

    pub fn contains(&self, u: VertexId, v: VertexId) -> bool {
        self.neighbors.get(&u).is_some_and(|list| list.contains(v))
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors.get(&v).map_or(0, NeighborList::len)
    }

    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.neighbors.get(&v).into_iter().flat_map(NeighborList::iter)
    }
}

/// Sampled graph with per-edge multiplicities
#[derive(Debug, Clone, Default)]
pub struct WeightedAdjacency {
    occurrences: FxHashMap<VertexId, FxHashMap<VertexId, u32>>,
    edges: usize,
}

impl WeightedAdjacency {
    pub fn insert(&mut self, u: VertexId, v: VertexId) {
        let previous = self.occurrences.entry(u).or_default().insert(v, 1);
        self.occurrences.entry(v).or_default().insert(u, 1);
        if previous.is_none() {
            self.edges += 1;
        }
    }

    pub fn remove(&mut self, u: VertexId, v: VertexId) {
        let removed = self.remove_half(u, v);
        self.remove_half(v, u);
        if removed {
            self.edges -= 1;
        }
    }

    fn remove_half(&mut self, u: VertexId, v: VertexId) -> bool {
        let Some(map) = self.occurrences.get_mut(&u) else {
            return false;
        };
        let removed = map.remove(&v).is_some();
        if map.is_empty() {
            self.occurrences.remove(&u);
        }
        removed
    }

    /// Add one observation to a sampled pair, symmetrically
    pub fn increment(&mut self, u: VertexId, v: VertexId) {
        if let Some(m) = self.occurrences.get_mut(&u).and_then(|map| map.get_mut(&v)) {
            *m += 1;
        }
        if let Some(m) = self.occurrences.get_mut(&v).and_then(|map| map.get_mut(&u)) {
            *m += 1;
        }
    }

    pub fn contains(&self, u: VertexId, v: VertexId) -> bool {
        self.multiplicity(u, v).is_some()
    }

    pub fn multiplicity(&self, u: VertexId, v: VertexId) -> Option<u32> {
        self.occurrences.get(&u).and_then(|map| map.get(&v)).copied()
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.occurrences.get(&v).map_or(0, FxHashMap::len)
    }

    /// `(neighbor, multiplicity)` pairs of `v`
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, u32)> + '_ {
        self.occurrences
            .get(&v)
            .into_iter()
            .flat_map(|map| map.iter().map(|(&n, &m)| (n, m)))
    }
}

/// The sampled subgraph, in the representation chosen by [`CountingMode`]
#[derive(Debug, Clone)]
pub enum SampledGraph {
    Binary(BinaryAdjacency),
    Weighted(WeightedAdjacency),
}

impl SampledGraph {
    pub fn new(mode: CountingMode) -> Self {
        match mode {
            CountingMode::Binary => SampledGraph::Binary(BinaryAdjacency::default()),
            CountingMode::Weighted => SampledGraph::Weighted(WeightedAdjacency::default()),
        }
    }

    pub fn mode(&self) -> CountingMode {
        match self {
            SampledGraph::Binary(_) => CountingMode::Binary,
            SampledGraph::Weighted(_) => CountingMode::Weighted,
        }
    }

    /// Add a newly admitted edge (multiplicity 1 in weighted form)
    pub fn insert(&mut self, edge: Edge) {
        let (u, v) = edge.endpoints();
        match self {
            SampledGraph::Binary(adj) => adj.insert(u, v),
            SampledGraph::Weighted(adj) => adj.insert(u, v),
        }
    }

    /// Drop an evicted edge; vertices left without neighbors are dropped too
    pub fn remove(&mut self, edge: Edge) {
        let (u, v) = edge.endpoints();
        match self {
            SampledGraph::Binary(adj) => adj.remove(u, v),
            SampledGraph::Weighted(adj) => adj.remove(u, v),
        }
    }

    pub fn contains(&self, u: VertexId, v: VertexId) -> bool {
        match self {
            SampledGraph::Binary(adj) => adj.contains(u, v),
            SampledGraph::Weighted(adj) => adj.contains(u, v),
        }
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.contains(edge.lo(), edge.hi())
    }

    /// Sampled degree of `v`, 0 if `v` has no sampled edges
    pub fn degree(&self, v: VertexId) -> usize {
        match self {
            SampledGraph::Binary(adj) => adj.degree(v),
            SampledGraph::Weighted(adj) => adj.degree(v),
        }
    }

    /// Observations of the pair since admission; 1 for any sampled binary
    /// edge and 0 for unsampled pairs
    pub fn multiplicity(&self, u: VertexId, v: VertexId) -> u32 {
        match self {
            SampledGraph::Binary(adj) => u32::from(adj.contains(u, v)),
            SampledGraph::Weighted(adj) => adj.multiplicity(u, v).unwrap_or(0),
        }
    }

    /// Record a duplicate observation of a sampled edge. No-op in binary form.
    pub fn increment(&mut self, edge: Edge) {
        if let SampledGraph::Weighted(adj) = self {
            adj.increment(edge.lo(), edge.hi());
        }
    }

    /// Number of distinct sampled edges
    pub fn edge_count(&self) -> usize {
        match self {
            SampledGraph::Binary(adj) => adj.edges,
            SampledGraph::Weighted(adj) => adj.edges,
        }
    }

    /// Number of vertices with at least one sampled edge
    pub fn vertex_count(&self) -> usize {
        match self {
            SampledGraph::Binary(adj) => adj.neighbors.len(),
            SampledGraph::Weighted(adj) => adj.occurrences.len(),
        }
    }

    /// Sampled neighbors of `v`, in arbitrary order
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        match self {
            SampledGraph::Binary(adj) => adj.neighbors(v).collect(),
            SampledGraph::Weighted(adj) => adj.neighbors(v).map(|(n, _)| n).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(u: u32, v: u32) -> Edge {
        Edge::new(u, v).unwrap()
    }

    #[test]
    fn test_neighbor_list_swap_remove() {
        let mut list = NeighborList::default();
        for v in [4, 8, 15, 16] {
            assert!(list.push(v));
        }
        assert!(!list.push(8));

        assert!(list.remove(4));
        assert!(!list.contains(4));
        assert_eq!(list.len(), 3);
        // 16 moved into slot 0 and is still findable and removable
        assert!(list.remove(16));
        assert!(list.remove(15));
        assert!(list.remove(8));
        assert!(list.is_empty());
        assert!(!list.remove(8));
    }

    #[test]
    fn test_binary_insert_remove() {
        let mut graph = SampledGraph::new(CountingMode::Binary);
        graph.insert(edge(1, 2));
        graph.insert(edge(2, 3));

        assert!(graph.contains(1, 2));
        assert!(graph.contains(2, 1));
        assert_eq!(graph.degree(2), 2);
        assert_eq!(graph.edge_count(), 2);

        graph.remove(edge(1, 2));
        assert!(!graph.contains(2, 1));
        assert_eq!(graph.degree(1), 0);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_weighted_multiplicity() {
        let mut graph = SampledGraph::new(CountingMode::Weighted);
        graph.insert(edge(5, 6));
        graph.increment(edge(5, 6));
        graph.increment(edge(6, 5));

        assert_eq!(graph.multiplicity(5, 6), 3);
        assert_eq!(graph.multiplicity(6, 5), 3);
        assert_eq!(graph.multiplicity(5, 7), 0);

        graph.remove(edge(5, 6));
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_binary_multiplicity_is_indicator() {
        let mut graph = SampledGraph::new(CountingMode::Binary);
        assert_eq!(graph.mode(), CountingMode::Binary);
        assert_eq!(SampledGraph::new(CountingMode::Weighted).mode(), CountingMode::Weighted);
        graph.insert(edge(1, 2));
        graph.increment(edge(1, 2));
        assert_eq!(graph.multiplicity(1, 2), 1);
        assert_eq!(graph.multiplicity(1, 3), 0);
    }
}
