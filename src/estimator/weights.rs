//! Inverse-probability weights for triangles closed after the exact phase
//!
//! `threshold` is the largest rank held by a full reservoir. A triangle seen
//! through `k` sampled edges is scaled by `((M - k) / M) / threshold^k`.

/// Weight of a triangle closed by a newly admitted edge in binary mode
pub fn binary_weight(capacity: usize, threshold: f64) -> f64 {
    scaled_inverse(capacity, threshold, 3)
}

/// Weight of a triangle closed by any observation in weighted mode
pub fn weighted_weight(capacity: usize, threshold: f64) -> f64 {
    scaled_inverse(capacity, threshold, 2)
}

fn scaled_inverse(capacity: usize, threshold: f64, k: i32) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    let m = capacity as f64;
    ((m - f64::from(k)) / m) / threshold.powi(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_weight() {
        let w = binary_weight(100, 0.5);
        assert!((w - 0.97 / 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_weight() {
        let w = weighted_weight(10, 0.2);
        assert!((w - 0.8 / 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_zero_threshold() {
        assert_eq!(binary_weight(10, 0.0), 0.0);
        assert_eq!(weighted_weight(10, 0.0), 0.0);
    }
}
