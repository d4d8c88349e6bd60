//! Estimator configuration

use crate::error::{ConfigResult, EstimatorError, EstimatorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How repeated observations of the same vertex pair are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountingMode {
    /// Count each distinct edge once; duplicates are ignored
    #[default]
    Binary,
    /// Count every observation; sampled edges carry a multiplicity
    Weighted,
}

/// Estimator configuration
///
/// Fixed for the lifetime of a [`crate::TriangleEstimator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Binary or weighted counting
    pub mode: CountingMode,
    /// Reservoir capacity M (number of retained distinct edges)
    pub capacity: usize,
    /// Enable the exponential-decay ensemble over time buckets
    pub ensemble: bool,
    /// Decay factor for past estimations, in [0, 1]
    pub decay: f64,
    /// Bucket length J, in events, between ensemble refreshes
    pub bucket_length: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            mode: CountingMode::Binary,
            capacity: 100_000,
            ensemble: false,
            decay: 0.0,
            bucket_length: 2_100_000_000,
        }
    }
}

impl EstimatorConfig {
    /// Binary-mode configuration with the given capacity and ensembling off
    pub fn binary(capacity: usize) -> Self {
        Self {
            mode: CountingMode::Binary,
            capacity,
            ..Self::default()
        }
    }

    /// Weighted-mode configuration with the given capacity and ensembling off
    pub fn weighted(capacity: usize) -> Self {
        Self {
            mode: CountingMode::Weighted,
            capacity,
            ..Self::default()
        }
    }

    /// Turn on ensemble smoothing with decay `delta` and bucket length `j`
    pub fn with_ensemble(mut self, delta: f64, j: u64) -> Self {
        self.ensemble = true;
        self.decay = delta;
        self.bucket_length = j;
        self
    }

    pub fn validate(&self) -> EstimatorResult<()> {
        if self.capacity == 0 {
            return Err(EstimatorError::ZeroCapacity);
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(EstimatorError::InvalidDecay(self.decay));
        }
        if self.bucket_length == 0 {
            return Err(EstimatorError::ZeroBucketLength);
        }
        Ok(())
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EstimatorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
