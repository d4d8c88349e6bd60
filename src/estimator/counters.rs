//! Per-vertex and global triangle accumulators

use crate::graph::VertexId;
use rustc_hash::FxHashMap;

/// Raw and smoothed triangle estimates for every vertex seen so far
#[derive(Debug, Clone, Default)]
pub struct LocalCounters {
    /// Instantaneous estimate per vertex
    counts: FxHashMap<VertexId, f64>,
    /// Ensemble (smoothed) estimate per vertex
    estimations: FxHashMap<VertexId, f64>,
    /// Sum of all per-edge contributions; three times the triangle estimate
    global: f64,
    max_vertex: Option<VertexId>,
}

impl LocalCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex with a zero count if it is new
    pub fn touch(&mut self, v: VertexId) {
        self.counts.entry(v).or_insert(0.0);
        self.max_vertex = Some(self.max_vertex.map_or(v, |max| max.max(v)));
    }

    pub fn add(&mut self, v: VertexId, amount: f64) {
        *self.counts.entry(v).or_insert(0.0) += amount;
    }

    pub fn add_global(&mut self, amount: f64) {
        self.global += amount;
    }

    pub fn global(&self) -> f64 {
        self.global
    }

    pub fn count(&self, v: VertexId) -> f64 {
        self.counts.get(&v).copied().unwrap_or(0.0)
    }

    pub fn estimation(&self, v: VertexId) -> f64 {
        self.estimations.get(&v).copied().unwrap_or(0.0)
    }

    pub fn max_vertex(&self) -> Option<VertexId> {
        self.max_vertex
    }

    pub fn vertex_count(&self) -> usize {
        self.counts.len()
    }

    /// Fold the raw counts into the smoothed estimate
    ///
    /// `delta == 0` copies the counts; otherwise each vertex becomes
    /// `delta * estimation + (1 - delta) * count`.
    pub fn blend(&mut self, delta: f64) {
        for (&v, &count) in &self.counts {
            let estimation = self.estimations.entry(v).or_insert(0.0);
            *estimation = if delta == 0.0 {
                count
            } else {
                delta * *estimation + (1.0 - delta) * count
            };
        }
    }

    /// Dense export of the raw counts, indexed by vertex id
    pub fn dense_counts(&self) -> Vec<f64> {
        self.dense(&self.counts)
    }

    /// Dense export of the smoothed estimates, indexed by vertex id
    pub fn dense_estimations(&self) -> Vec<f64> {
        self.dense(&self.estimations)
    }

    fn dense(&self, values: &FxHashMap<VertexId, f64>) -> Vec<f64> {
        let Some(max) = self.max_vertex else {
            return Vec::new();
        };
        let mut out = vec![0.0; max as usize + 1];
        for (&v, &value) in values {
            out[v as usize] = value;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_export_fills_gaps() {
        let mut counters = LocalCounters::new();
        counters.touch(4);
        counters.touch(1);
        counters.add(4, 2.5);
        assert_eq!(counters.dense_counts(), vec![0.0, 0.0, 0.0, 0.0, 2.5]);
        assert_eq!(counters.max_vertex(), Some(4));
        assert_eq!(counters.vertex_count(), 2);
    }

    #[test]
    fn test_empty_export() {
        let counters = LocalCounters::new();
        assert!(counters.dense_counts().is_empty());
        assert!(counters.dense_estimations().is_empty());
    }

    #[test]
    fn test_blend_decay_and_reset() {
        let mut counters = LocalCounters::new();
        counters.touch(0);
        counters.add(0, 10.0);
        counters.blend(0.0);
        assert_eq!(counters.estimation(0), 10.0);

        counters.add(0, 10.0);
        counters.blend(0.5);
        assert_eq!(counters.estimation(0), 15.0);

        counters.blend(0.0);
        assert_eq!(counters.estimation(0), counters.count(0));
    }
}
