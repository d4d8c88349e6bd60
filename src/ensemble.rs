//! Exponential-decay ensemble over fixed-length time buckets
//!
//! Once the reservoir first fills at time `TM`, the smoother snapshots the
//! raw counts and then folds them into the smoothed estimate every
//! `bucket_length` events. Reads may also fold in a partial bucket.

use crate::error::{EstimatorError, EstimatorResult};
use crate::estimator::LocalCounters;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EnsembleSmoother {
    decay: f64,
    bucket_length: u64,
    /// `TM`: the time the exact phase ended, once it has
    anchor: Option<u64>,
    /// Time of the most recent read-triggered fold
    last_catch_up: Option<u64>,
}

impl EnsembleSmoother {
    pub fn new(decay: f64, bucket_length: u64) -> EstimatorResult<Self> {
        if !(0.0..=1.0).contains(&decay) {
            return Err(EstimatorError::InvalidDecay(decay));
        }
        if bucket_length == 0 {
            return Err(EstimatorError::ZeroBucketLength);
        }
        Ok(EnsembleSmoother {
            decay,
            bucket_length,
            anchor: None,
            last_catch_up: None,
        })
    }

    pub fn is_started(&self) -> bool {
        self.anchor.is_some()
    }

    /// Begin the ensemble at `anchor` with a plain snapshot of the counts
    pub fn start(&mut self, anchor: u64, counters: &mut LocalCounters) {
        self.anchor = Some(anchor);
        self.fold(0.0, counters);
        debug!(
            "Ensemble started at TM={} (decay {}, bucket length {})",
            anchor, self.decay, self.bucket_length
        );
    }

    /// Fold at bucket boundaries. Called once per event, before counting.
    pub fn on_tick(&mut self, time: u64, counters: &mut LocalCounters) -> bool {
        match self.anchor {
            Some(anchor) if (time - anchor) % self.bucket_length == 0 => {
                debug!("Ensemble refresh at time {}", time);
                self.fold(self.decay, counters);
                true
            }
            _ => false,
        }
    }

    /// Fold a partial bucket before a read, at most once per `time`
    pub fn catch_up(&mut self, time: u64, counters: &mut LocalCounters) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        if time <= anchor
            || (time - anchor) % self.bucket_length == 0
            || self.last_catch_up == Some(time)
        {
            return false;
        }
        self.last_catch_up = Some(time);
        self.fold(self.decay, counters);
        true
    }

    /// Fold the raw counts into the smoothed estimate with an explicit decay
    pub fn fold(&self, delta: f64, counters: &mut LocalCounters) {
        counters.blend(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters_with(v: u32, count: f64) -> LocalCounters {
        let mut counters = LocalCounters::new();
        counters.touch(v);
        counters.add(v, count);
        counters
    }

    #[test]
    fn test_new_rejects_bad_parameters() {
        assert_eq!(
            EnsembleSmoother::new(0.5, 0).unwrap_err(),
            EstimatorError::ZeroBucketLength
        );
        assert!(matches!(
            EnsembleSmoother::new(1.5, 10),
            Err(EstimatorError::InvalidDecay(_))
        ));
        assert!(EnsembleSmoother::new(f64::NAN, 10).is_err());
        assert!(EnsembleSmoother::new(1.0, 1).is_ok());
    }

    #[test]
    fn test_idle_until_started() {
        let mut smoother = EnsembleSmoother::new(0.5, 2).unwrap();
        let mut counters = counters_with(1, 4.0);
        assert!(!smoother.on_tick(2, &mut counters));
        assert!(!smoother.catch_up(3, &mut counters));
        assert_eq!(counters.estimation(1), 0.0);
    }

    #[test]
    fn test_start_snapshots_counts() {
        let mut smoother = EnsembleSmoother::new(0.5, 2).unwrap();
        let mut counters = counters_with(1, 4.0);
        smoother.start(10, &mut counters);
        assert!(smoother.is_started());
        assert_eq!(counters.estimation(1), 4.0);
    }

    #[test]
    fn test_ticks_on_bucket_boundaries() {
        let mut smoother = EnsembleSmoother::new(0.5, 3).unwrap();
        let mut counters = counters_with(1, 4.0);
        smoother.start(10, &mut counters);

        counters.add(1, 4.0);
        assert!(!smoother.on_tick(11, &mut counters));
        assert!(!smoother.on_tick(12, &mut counters));
        assert!(smoother.on_tick(13, &mut counters));
        assert_eq!(counters.estimation(1), 0.5 * 4.0 + 0.5 * 8.0);
    }

    #[test]
    fn test_catch_up_is_idempotent_per_time() {
        let mut smoother = EnsembleSmoother::new(0.5, 4).unwrap();
        let mut counters = counters_with(1, 2.0);
        smoother.start(0, &mut counters);
        counters.add(1, 2.0);

        assert!(smoother.catch_up(1, &mut counters));
        let once = counters.estimation(1);
        assert!(!smoother.catch_up(1, &mut counters));
        assert_eq!(counters.estimation(1), once);
        assert!(!smoother.catch_up(4, &mut counters));
    }
}
