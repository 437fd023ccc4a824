//! Detector configuration.

use super::errors::AnomalyError;

/// Number of observations before the detector starts flagging outliers.
pub const DEFAULT_MIN_SAMPLES: usize = 100;

/// Default rolling window of retained observations.
pub const DEFAULT_MAX_SAMPLES: usize = 10_000;

/// Default robust z-score above which a value is an outlier.
pub const DEFAULT_THRESHOLD: f64 = 3.5;

/// Anomaly detector configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AnomalyConfig {
    /// Warm-up threshold; below it every amount is reported normal.
    pub min_samples: usize,
    /// Oldest observations are dropped beyond this many. `None` keeps all.
    pub max_samples: Option<usize>,
    /// Score threshold handed to the default model.
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            min_samples: DEFAULT_MIN_SAMPLES,
            max_samples: Some(DEFAULT_MAX_SAMPLES),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AnomalyConfig {
    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), AnomalyError> {
        if self.min_samples == 0 {
            return Err(AnomalyError::ZeroMinSamples);
        }
        if let Some(max) = self.max_samples {
            if max < self.min_samples {
                return Err(AnomalyError::WindowTooSmall {
                    min: self.min_samples,
                    max,
                });
            }
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(AnomalyError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
