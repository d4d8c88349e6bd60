//! Error types for the estimator engine

use crate::graph::VertexId;
use thiserror::Error;

/// Errors raised when constructing estimator inputs or configuration
///
/// These are precondition violations: once an [`crate::Edge`], a
/// [`crate::Rank`] and a validated [`crate::EstimatorConfig`] exist,
/// every engine operation is total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("Self-loop on vertex {0} is not a valid edge")]
    SelfLoop(VertexId),

    #[error("Rank {0} is outside [0, 1)")]
    RankOutOfRange(f64),

    #[error("Reservoir capacity must be positive")]
    ZeroCapacity,

    #[error("Decay factor {0} is outside [0, 1]")]
    InvalidDecay(f64),

    #[error("Bucket length must be positive")]
    ZeroBucketLength,
}

pub type EstimatorResult<T> = Result<T, EstimatorError>;

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] EstimatorError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
