//! Shared helpers for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tristream::{Edge, TriangleEstimator};

/// Random loop-free edge stream over `vertices` vertices
pub fn random_stream(seed: u64, vertices: u32, events: usize) -> Vec<Edge> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stream = Vec::with_capacity(events);
    while stream.len() < events {
        let u = rng.gen_range(0..vertices);
        let v = rng.gen_range(0..vertices);
        if let Ok(edge) = Edge::new(u, v) {
            stream.push(edge);
        }
    }
    stream
}

/// Per-vertex triangle counts of a multigraph, each triangle weighted by the
/// product of its three edge multiplicities. With every multiplicity forced
/// to 1 this is the plain triangle count of the distinct-edge graph.
pub fn brute_force_counts(stream: &[Edge], with_multiplicity: bool) -> Vec<f64> {
    let mut multiplicity: BTreeMap<(u32, u32), u32> = BTreeMap::new();
    let mut max_vertex = 0;
    for edge in stream {
        let m = multiplicity.entry(edge.endpoints()).or_insert(0);
        if with_multiplicity || *m == 0 {
            *m += 1;
        }
        max_vertex = max_vertex.max(edge.hi());
    }

    let mut counts = vec![0.0; max_vertex as usize + 1];
    let m = |a: u32, b: u32| {
        let key = if a < b { (a, b) } else { (b, a) };
        multiplicity.get(&key).copied().unwrap_or(0)
    };
    for a in 0..=max_vertex {
        for b in (a + 1)..=max_vertex {
            let ab = m(a, b);
            if ab == 0 {
                continue;
            }
            for c in (b + 1)..=max_vertex {
                let weight = ab * m(b, c) * m(a, c);
                if weight > 0 {
                    for v in [a, b, c] {
                        counts[v as usize] += f64::from(weight);
                    }
                }
            }
        }
    }
    counts
}

/// Reservoir and sampled graph hold exactly the same edge set
pub fn assert_sample_consistent(estimator: &TriangleEstimator) {
    let reservoir = estimator.reservoir();
    let graph = estimator.sampled_graph();
    assert_eq!(reservoir.len(), graph.edge_count());
    assert!(reservoir.len() <= reservoir.capacity());

    let mut degree_sum = 0;
    for held in reservoir.iter() {
        let (u, v) = held.edge.endpoints();
        assert!(graph.contains(u, v), "edge {} missing from graph", held.edge);
        assert!(graph.contains(v, u), "edge {} not symmetric", held.edge);
        assert!(estimator.is_sampled(u, v));
    }
    for v in 0..=estimator.max_vertex().unwrap_or(0) {
        degree_sum += graph.degree(v);
        for n in graph.neighbors(v) {
            let edge = Edge::new(v, n).unwrap();
            assert!(reservoir.contains(&edge), "graph edge {} not in reservoir", edge);
        }
    }
    assert_eq!(degree_sum, 2 * reservoir.len());
}
