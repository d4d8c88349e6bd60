//! Streaming triangle estimator
//!
//! Processes a stream of edge insertions in one pass and maintains, for every
//! vertex, an estimate of the number of triangles it belongs to.
//!
//! Each event:
//! 1. advances `time` and registers both endpoints,
//! 2. lets the ensemble fold at a bucket boundary,
//! 3. offers the edge to the bottom-k reservoir (evicting the max-rank edge
//!    when full) and mirrors the change in the sampled graph,
//! 4. enumerates common sampled neighbors of the endpoints and credits each
//!    closed triangle, scaled by its inverse inclusion probability.
//!
//! In weighted mode step 4 runs before step 3 and uses the multiplicities as
//! they were before this observation.

pub mod counters;
pub mod weights;

pub use counters::LocalCounters;

use crate::config::{CountingMode, EstimatorConfig};
use crate::ensemble::EnsembleSmoother;
use crate::error::EstimatorResult;
use crate::graph::{Edge, Rank, VertexId};
use crate::sampling::{Admission, Reservoir, SampledGraph};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Snapshot of estimator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorStats {
    pub mode: CountingMode,
    pub time: u64,
    pub exact: bool,
    pub exact_phase_end: Option<u64>,
    pub reservoir_size: usize,
    pub capacity: usize,
    pub threshold: Option<f64>,
    pub sampled_vertices: usize,
    pub known_vertices: usize,
    pub discovered_triangles: u64,
    pub global: f64,
    /// Time spent maintaining the reservoir and sampled graph
    pub sampling_secs: f64,
    /// Time spent enumerating and crediting triangles
    pub counting_secs: f64,
}

/// One-pass estimator of local and global triangle counts
#[derive(Debug, Clone)]
pub struct TriangleEstimator {
    config: EstimatorConfig,
    reservoir: Reservoir,
    graph: SampledGraph,
    counters: LocalCounters,
    smoother: Option<EnsembleSmoother>,
    /// Events processed so far
    time: u64,
    /// True until the reservoir first fills
    exact: bool,
    /// `TM`: time at which the exact phase ended
    exact_phase_end: Option<u64>,
    /// Closed triangles found in the sampled graph
    discovered: u64,
    sampling_time: Duration,
    counting_time: Duration,
}

impl TriangleEstimator {
    pub fn new(config: EstimatorConfig) -> EstimatorResult<Self> {
        config.validate()?;
        let smoother = if config.ensemble {
            Some(EnsembleSmoother::new(config.decay, config.bucket_length)?)
        } else {
            None
        };

        Ok(TriangleEstimator {
            reservoir: Reservoir::new(config.capacity),
            graph: SampledGraph::new(config.mode),
            counters: LocalCounters::new(),
            smoother,
            time: 0,
            exact: true,
            exact_phase_end: None,
            discovered: 0,
            sampling_time: Duration::ZERO,
            counting_time: Duration::ZERO,
            config,
        })
    }

    /// Process one stream event
    pub fn update(&mut self, edge: Edge, rank: Rank) {
        self.time += 1;
        let (u, v) = edge.endpoints();
        self.counters.touch(u);
        self.counters.touch(v);

        if !self.exact {
            if let Some(smoother) = self.smoother.as_mut() {
                smoother.on_tick(self.time, &mut self.counters);
            }
        }

        match self.config.mode {
            CountingMode::Binary => {
                // Duplicates of a sampled edge carry no new information
                if !self.graph.contains_edge(&edge) {
                    let admitted = self.sample(edge, rank);
                    self.count_binary(edge, admitted);
                }
            }
            CountingMode::Weighted => {
                self.count_weighted(edge);
                if self.graph.contains_edge(&edge) {
                    self.graph.increment(edge);
                } else {
                    self.sample(edge, rank);
                }
            }
        }

        debug_assert_eq!(self.reservoir.len(), self.graph.edge_count());
    }

    /// Convenience wrapper that validates raw inputs first
    pub fn update_raw(&mut self, u: VertexId, v: VertexId, rank: f64) -> EstimatorResult<()> {
        let edge = Edge::new(u, v)?;
        let rank = Rank::new(rank)?;
        self.update(edge, rank);
        Ok(())
    }

    /// Offer a new edge to the reservoir and mirror the outcome in the graph
    fn sample(&mut self, edge: Edge, rank: Rank) -> bool {
        if self.exact && self.reservoir.is_full() {
            self.end_exact_phase();
        }

        let started = Instant::now();
        let admission = self.reservoir.admit(edge, rank);
        match admission {
            Admission::Inserted => self.graph.insert(edge),
            Admission::Replaced(evicted) => {
                self.graph.remove(evicted);
                self.graph.insert(edge);
            }
            Admission::Rejected => {}
        }
        self.sampling_time += started.elapsed();
        admission.is_admitted()
    }

    fn end_exact_phase(&mut self) {
        // In binary mode the transition is detected while sampling the event
        // that follows the last exact one; weighted mode counts first.
        let tm = match self.config.mode {
            CountingMode::Binary => self.time - 1,
            CountingMode::Weighted => self.time,
        };
        self.exact = false;
        self.exact_phase_end = Some(tm);
        debug!(
            "Reservoir full (capacity {}), exact phase ended at TM={}",
            self.config.capacity, tm
        );

        if let Some(smoother) = self.smoother.as_mut() {
            smoother.start(tm, &mut self.counters);
        }
    }

    fn count_binary(&mut self, edge: Edge, admitted: bool) {
        let weight = if self.exact {
            1.0
        } else if admitted {
            weights::binary_weight(self.config.capacity, self.current_threshold())
        } else {
            return;
        };
        self.add_triangles(edge, weight);
    }

    fn count_weighted(&mut self, edge: Edge) {
        let weight = if self.exact {
            1.0
        } else {
            weights::weighted_weight(self.config.capacity, self.current_threshold())
        };
        self.add_triangles(edge, weight);
    }

    fn current_threshold(&self) -> f64 {
        self.reservoir.threshold().unwrap_or(0.0)
    }

    /// Credit every sampled triangle closed by `edge` with `weight`
    ///
    /// Scans the endpoint with the smaller sampled degree, so the work is
    /// bounded by `min(degree(u), degree(v))`.
    fn add_triangles(&mut self, edge: Edge, weight: f64) {
        let started = Instant::now();
        let (u, v) = edge.endpoints();
        let (lo, hi) = if self.graph.degree(u) <= self.graph.degree(v) {
            (u, v)
        } else {
            (v, u)
        };

        let mut sum = 0.0;
        match &self.graph {
            SampledGraph::Binary(adj) => {
                for n in adj.neighbors(lo) {
                    if n != hi && adj.contains(hi, n) {
                        self.discovered += 1;
                        self.counters.add(n, weight);
                        sum += weight;
                    }
                }
            }
            SampledGraph::Weighted(adj) => {
                for (n, m_lo) in adj.neighbors(lo) {
                    if n == hi {
                        continue;
                    }
                    if let Some(m_hi) = adj.multiplicity(hi, n) {
                        self.discovered += 1;
                        let value = f64::from(m_lo) * f64::from(m_hi) * weight;
                        self.counters.add(n, value);
                        sum += value;
                    }
                }
            }
        }

        self.counters.add(u, sum);
        self.counters.add(v, sum);
        // Each triangle credits all three of its vertices
        self.counters.add_global(3.0 * sum);
        self.counting_time += started.elapsed();
    }

    /// Fold the raw counts into the smoothed estimate with decay `delta`
    ///
    /// `refresh(0.0)` resets the smoothed estimate to the raw counts.
    pub fn refresh(&mut self, delta: f64) {
        match self.smoother.as_mut() {
            Some(smoother) => smoother.fold(delta, &mut self.counters),
            None => self.counters.blend(delta),
        }
    }

    /// Dense per-vertex raw estimate, indexed `0..=max_vertex`
    pub fn raw_estimate(&self) -> Vec<f64> {
        self.counters.dense_counts()
    }

    /// Dense per-vertex smoothed estimate, after folding any partial bucket
    ///
    /// Only a started ensemble folds on read. Otherwise this exports whatever
    /// explicit `refresh` calls have left, which is all zeros if there were none.
    pub fn smoothed_estimate(&mut self) -> Vec<f64> {
        if let Some(smoother) = self.smoother.as_mut() {
            smoother.catch_up(self.time, &mut self.counters);
        }
        self.counters.dense_estimations()
    }

    /// Dense smoothed estimate as currently stored, without folding
    pub fn estimations(&self) -> Vec<f64> {
        self.counters.dense_estimations()
    }

    /// Raw estimate for a single vertex; 0 for unseen vertices
    pub fn local_estimate(&self, v: VertexId) -> f64 {
        self.counters.count(v)
    }

    /// Sum of all contributions: three times the triangle estimate
    pub fn global_estimate(&self) -> f64 {
        self.counters.global()
    }

    pub fn triangle_estimate(&self) -> f64 {
        self.counters.global() / 3.0
    }

    pub fn sampled_degree(&self, v: VertexId) -> usize {
        self.graph.degree(v)
    }

    pub fn is_sampled(&self, u: VertexId, v: VertexId) -> bool {
        self.graph.contains(u, v)
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn exact_phase_end(&self) -> Option<u64> {
        self.exact_phase_end
    }

    /// Largest rank in the reservoir
    pub fn threshold(&self) -> Option<f64> {
        self.reservoir.threshold()
    }

    pub fn discovered_triangles(&self) -> u64 {
        self.discovered
    }

    /// Cumulative time spent in reservoir and sampled-graph maintenance
    pub fn sampling_time(&self) -> Duration {
        self.sampling_time
    }

    /// Cumulative time spent in triangle enumeration
    pub fn counting_time(&self) -> Duration {
        self.counting_time
    }

    pub fn max_vertex(&self) -> Option<VertexId> {
        self.counters.max_vertex()
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn reservoir(&self) -> &Reservoir {
        &self.reservoir
    }

    pub fn sampled_graph(&self) -> &SampledGraph {
        &self.graph
    }

    pub fn stats(&self) -> EstimatorStats {
        EstimatorStats {
            mode: self.graph.mode(),
            time: self.time,
            exact: self.exact,
            exact_phase_end: self.exact_phase_end,
            reservoir_size: self.reservoir.len(),
            capacity: self.config.capacity,
            threshold: self.reservoir.threshold(),
            sampled_vertices: self.graph.vertex_count(),
            known_vertices: self.counters.vertex_count(),
            discovered_triangles: self.discovered,
            global: self.counters.global(),
            sampling_secs: self.sampling_time.as_secs_f64(),
            counting_secs: self.counting_time.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(estimator: &mut TriangleEstimator, events: &[(u32, u32, f64)]) {
        for &(u, v, r) in events {
            estimator.update_raw(u, v, r).unwrap();
        }
    }

    #[test]
    fn test_exact_triangle() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::binary(100)).unwrap();
        feed(&mut estimator, &[(1, 2, 0.1), (2, 3, 0.2), (1, 3, 0.3)]);

        assert_eq!(estimator.raw_estimate(), vec![0.0, 1.0, 1.0, 1.0]);
        assert_eq!(estimator.global_estimate(), 3.0);
        assert_eq!(estimator.triangle_estimate(), 1.0);
        assert!(estimator.is_exact());
        assert_eq!(estimator.discovered_triangles(), 1);
    }

    #[test]
    fn test_binary_ignores_sampled_duplicates() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::binary(100)).unwrap();
        feed(
            &mut estimator,
            &[(1, 2, 0.1), (2, 3, 0.2), (1, 3, 0.3), (1, 3, 0.3), (2, 1, 0.1)],
        );
        assert_eq!(estimator.global_estimate(), 3.0);
        assert_eq!(estimator.time(), 5);
        assert_eq!(estimator.reservoir().len(), 3);
    }

    #[test]
    fn test_weighted_counts_duplicates() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::weighted(100)).unwrap();
        feed(&mut estimator, &[(1, 2, 0.1), (2, 3, 0.2), (1, 3, 0.3), (1, 3, 0.3)]);
        // Each observation of (1,3) closes one triangle with m(1,2)=m(2,3)=1
        assert_eq!(estimator.global_estimate(), 6.0);
        assert_eq!(estimator.local_estimate(2), 2.0);
        assert_eq!(estimator.sampled_graph().multiplicity(1, 3), 2);
    }

    #[test]
    fn test_binary_transition_records_tm() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::binary(2)).unwrap();
        feed(&mut estimator, &[(1, 2, 0.9), (2, 3, 0.1)]);
        assert!(estimator.is_exact());
        assert_eq!(estimator.exact_phase_end(), None);

        feed(&mut estimator, &[(1, 3, 0.5)]);
        assert!(!estimator.is_exact());
        assert_eq!(estimator.exact_phase_end(), Some(2));
    }

    #[test]
    fn test_weighted_transition_records_tm() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::weighted(2)).unwrap();
        feed(&mut estimator, &[(1, 2, 0.9), (2, 3, 0.1), (1, 3, 0.5)]);
        assert_eq!(estimator.exact_phase_end(), Some(3));
        // Counted before the transition, so the triangle is exact
        assert_eq!(estimator.global_estimate(), 3.0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(TriangleEstimator::new(EstimatorConfig::binary(0)).is_err());
    }

    #[test]
    fn test_smoothed_estimate_reflects_manual_refresh() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::binary(100)).unwrap();
        feed(&mut estimator, &[(1, 2, 0.1), (2, 3, 0.2), (1, 3, 0.3)]);
        assert_eq!(estimator.smoothed_estimate(), vec![0.0; 4]);

        estimator.refresh(0.5);
        assert_eq!(estimator.smoothed_estimate(), vec![0.0, 0.5, 0.5, 0.5]);
        assert_eq!(estimator.smoothed_estimate(), estimator.estimations());
        assert_eq!(estimator.raw_estimate(), vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_smoothed_estimate_before_ensemble_starts() {
        let config = EstimatorConfig::binary(100).with_ensemble(0.5, 2);
        let mut estimator = TriangleEstimator::new(config).unwrap();
        feed(&mut estimator, &[(1, 2, 0.1), (2, 3, 0.2), (1, 3, 0.3)]);
        assert!(estimator.is_exact());
        assert_eq!(estimator.smoothed_estimate(), vec![0.0; 4]);
        assert_eq!(estimator.smoothed_estimate(), estimator.estimations());
    }

    #[test]
    fn test_phase_timings_accumulate() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::weighted(2)).unwrap();
        assert_eq!(estimator.sampling_time(), Duration::ZERO);
        assert_eq!(estimator.counting_time(), Duration::ZERO);
        for i in 0..200u32 {
            estimator.update_raw(i % 7, (i % 7) + 1 + i % 3, 0.5).unwrap();
        }
        let stats = estimator.stats();
        assert_eq!(stats.sampling_secs, estimator.sampling_time().as_secs_f64());
        assert_eq!(stats.counting_secs, estimator.counting_time().as_secs_f64());
        assert!(estimator.sampling_time() + estimator.counting_time() > Duration::ZERO);
    }

    #[test]
    fn test_stats_snapshot() {
        let mut estimator = TriangleEstimator::new(EstimatorConfig::binary(10)).unwrap();
        feed(&mut estimator, &[(1, 2, 0.4), (2, 3, 0.2)]);
        let stats = estimator.stats();
        assert_eq!(stats.time, 2);
        assert_eq!(stats.reservoir_size, 2);
        assert_eq!(stats.threshold, Some(0.4));
        assert_eq!(stats.sampled_vertices, 3);
        assert_eq!(stats.known_vertices, 3);
        assert_eq!(stats.mode, estimator.config().mode);
        assert!(stats.exact);
    }
}
