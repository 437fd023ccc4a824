//! # Outlier Models
//!
//! Unsupervised models fitted on the historical sample. The detector only
//! relies on the [`OutlierModel`] trait.

/// A pluggable unsupervised outlier model.
pub trait OutlierModel: Send + Sync {
    /// Refit on the full historical sample.
    fn fit(&mut self, samples: &[f64]);

    /// Whether the model has been fitted at least once.
    fn is_fitted(&self) -> bool;

    /// Whether `value` is an outlier relative to the last fit.
    fn is_outlier(&self, value: f64) -> bool;
}

/// Consistency constant relating MAD to the standard deviation of a normal
/// distribution.
const MAD_SCALE: f64 = 0.6745;

/// Relates the mean absolute deviation to the standard deviation.
const MEAN_AD_SCALE: f64 = 1.253_314;

/// Robust z-score model: `0.6745 * |x - median| / MAD > threshold`.
///
/// Falls back to the mean absolute deviation when more than half of the
/// sample shares one value (MAD of zero). When the sample has no spread at
/// all, a value is an outlier once it strays further from the median than
/// the median's own magnitude.
#[derive(Debug, Clone)]
pub struct MadOutlierModel {
    threshold: f64,
    fit: Option<Fit>,
}

#[derive(Debug, Clone, Copy)]
struct Fit {
    median: f64,
    mad: f64,
    mean_ad: f64,
}

impl MadOutlierModel {
    /// Create an unfitted model with the given score threshold.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fit: None,
        }
    }

    /// Robust score of `value`, `None` before the first fit.
    pub fn score(&self, value: f64) -> Option<f64> {
        let fit = self.fit?;
        let distance = (value - fit.median).abs();
        if fit.mad > 0.0 {
            return Some(MAD_SCALE * distance / fit.mad);
        }
        if fit.mean_ad > 0.0 {
            return Some(distance / (MEAN_AD_SCALE * fit.mean_ad));
        }
        let tolerance = fit.median.abs();
        if distance <= tolerance {
            Some(0.0)
        } else {
            Some(f64::INFINITY)
        }
    }
}

impl OutlierModel for MadOutlierModel {
    fn fit(&mut self, samples: &[f64]) {
        let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            self.fit = None;
            return;
        }
        sorted.sort_by(f64::total_cmp);
        let median = median_of_sorted(&sorted);

        let mut deviations: Vec<f64> = sorted.iter().map(|v| (v - median).abs()).collect();
        let mean_ad = deviations.iter().sum::<f64>() / deviations.len() as f64;
        deviations.sort_by(f64::total_cmp);
        let mad = median_of_sorted(&deviations);

        self.fit = Some(Fit {
            median,
            mad,
            mean_ad,
        });
    }

    fn is_fitted(&self) -> bool {
        self.fit.is_some()
    }

    fn is_outlier(&self, value: f64) -> bool {
        if !value.is_finite() {
            return true;
        }
        match self.score(value) {
            Some(score) => score > self.threshold,
            None => false,
        }
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfitted_model_never_flags() {
        let model = MadOutlierModel::new(3.5);
        assert!(!model.is_fitted());
        assert!(!model.is_outlier(1e12));
    }

    #[test]
    fn test_flags_far_value() {
        let mut model = MadOutlierModel::new(3.5);
        let samples: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        model.fit(&samples);

        assert!(model.is_fitted());
        assert!(!model.is_outlier(50.0));
        assert!(!model.is_outlier(99.0));
        assert!(model.is_outlier(10_000.0));
        assert!(model.is_outlier(-10_000.0));
    }

    #[test]
    fn test_flat_sample() {
        let mut model = MadOutlierModel::new(3.5);
        model.fit(&[5.0; 200]);

        assert!(!model.is_outlier(5.0));
        assert!(!model.is_outlier(9.0));
        assert!(model.is_outlier(50.0));
    }

    #[test]
    fn test_mostly_flat_sample_uses_mean_deviation() {
        let mut samples = vec![1.0; 150];
        samples.extend([2.0; 10]);
        let mut model = MadOutlierModel::new(3.5);
        model.fit(&samples);

        assert!(!model.is_outlier(1.0));
        assert!(model.is_outlier(1_000.0));
    }
}
