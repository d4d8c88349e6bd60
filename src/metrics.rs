//! Accuracy measures against ground truth

/// Local average percentage error
///
/// Mean over ground-truth vertices of `|estimate - truth| / (truth + 1)`.
/// Vertices missing from `estimates` count as estimate 0. Returns `None`
/// when `truth` is empty.
pub fn lape(estimates: &[f64], truth: &[f64]) -> Option<f64> {
    if truth.is_empty() {
        return None;
    }
    let total: f64 = truth
        .iter()
        .enumerate()
        .map(|(v, &t)| {
            let e = estimates.get(v).copied().unwrap_or(0.0);
            (e - t).abs() / (t + 1.0)
        })
        .sum();
    Some(total / truth.len() as f64)
}

/// Relative error of a global triangle estimate; `None` for a zero truth
pub fn global_relative_error(estimate: f64, truth: f64) -> Option<f64> {
    (truth != 0.0).then(|| (estimate - truth).abs() / truth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lape_exact_is_zero() {
        assert_eq!(lape(&[1.0, 2.0], &[1.0, 2.0]), Some(0.0));
    }

    #[test]
    fn test_lape_missing_estimates() {
        // |0-1|/2 + |0-3|/4 over two vertices
        let err = lape(&[], &[1.0, 3.0]).unwrap();
        assert!((err - (0.5 + 0.75) / 2.0).abs() < 1e-12);
        assert_eq!(lape(&[1.0], &[]), None);
    }

    #[test]
    fn test_global_relative_error() {
        assert_eq!(global_relative_error(110.0, 100.0), Some(0.1));
        assert_eq!(global_relative_error(5.0, 0.0), None);
    }
}
