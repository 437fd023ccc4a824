//! Anomaly detection error types.

use thiserror::Error;

/// Errors raised while configuring the detector.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnomalyError {
    /// `min_samples` must be at least one.
    #[error("min_samples must be > 0")]
    ZeroMinSamples,

    /// The rolling window cannot be smaller than the warm-up threshold.
    #[error("max_samples ({max}) is smaller than min_samples ({min})")]
    WindowTooSmall { min: usize, max: usize },

    /// The outlier score threshold must be positive and finite.
    #[error("invalid outlier threshold: {0}")]
    InvalidThreshold(f64),
}
