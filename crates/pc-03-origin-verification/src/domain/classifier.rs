//! # Pattern Classifier
//!
//! Binary predicate over [`VerificationFeatures`]. Untrained classifiers
//! fail open and predict every origin as valid.

use crate::domain::features::VerificationFeatures;

/// A labelled training example.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabeledSample {
    pub features: VerificationFeatures,
    pub valid: bool,
}

impl LabeledSample {
    pub fn new(features: VerificationFeatures, valid: bool) -> Self {
        Self { features, valid }
    }
}

/// A pluggable, trainable validity predicate.
pub trait PatternClassifier: Send + Sync {
    /// Replace the model with one fitted on `samples`.
    fn train(&mut self, samples: &[LabeledSample]);

    /// Whether `train` has produced a model.
    fn is_trained(&self) -> bool;

    /// Predicted validity. `true` while untrained.
    fn predict(&self, features: &VerificationFeatures) -> bool;
}

const DIMENSIONS: usize = 3;

#[derive(Clone, Debug)]
enum Model {
    /// Every training sample carried the same label.
    Constant(bool),
    Centroids {
        mean: [f64; DIMENSIONS],
        scale: [f64; DIMENSIONS],
        valid: [f64; DIMENSIONS],
        invalid: [f64; DIMENSIONS],
    },
}

/// Nearest-centroid classifier over standardised features.
///
/// Dimensions with no spread in the training set (the correlation constant
/// always) are ignored.
#[derive(Clone, Debug, Default)]
pub struct CentroidClassifier {
    model: Option<Model>,
}

impl CentroidClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn fit(samples: &[LabeledSample]) -> Option<Model> {
        if samples.is_empty() {
            return None;
        }
        let valid_count = samples.iter().filter(|s| s.valid).count();
        if valid_count == 0 || valid_count == samples.len() {
            return Some(Model::Constant(valid_count > 0));
        }

        let n = samples.len() as f64;
        let mut mean = [0.0; DIMENSIONS];
        for sample in samples {
            for (m, x) in mean.iter_mut().zip(sample.features.as_array()) {
                *m += x / n;
            }
        }
        let mut scale = [0.0; DIMENSIONS];
        for sample in samples {
            for (i, x) in sample.features.as_array().iter().enumerate() {
                scale[i] += (x - mean[i]).powi(2) / n;
            }
        }
        for s in scale.iter_mut() {
            *s = s.sqrt();
        }

        let centroid = |label: bool| {
            let members: Vec<_> = samples.iter().filter(|s| s.valid == label).collect();
            let count = members.len() as f64;
            let mut c = [0.0; DIMENSIONS];
            for sample in members {
                for (i, x) in sample.features.as_array().iter().enumerate() {
                    c[i] += standardise(*x, mean[i], scale[i]) / count;
                }
            }
            c
        };

        Some(Model::Centroids {
            mean,
            scale,
            valid: centroid(true),
            invalid: centroid(false),
        })
    }
}

fn standardise(x: f64, mean: f64, scale: f64) -> f64 {
    if scale > 0.0 && scale.is_finite() {
        (x - mean) / scale
    } else {
        0.0
    }
}

fn distance(a: &[f64; DIMENSIONS], b: &[f64; DIMENSIONS]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

impl PatternClassifier for CentroidClassifier {
    fn train(&mut self, samples: &[LabeledSample]) {
        self.model = Self::fit(samples);
    }

    fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    fn predict(&self, features: &VerificationFeatures) -> bool {
        match &self.model {
            None => true,
            Some(Model::Constant(label)) => *label,
            Some(Model::Centroids {
                mean,
                scale,
                valid,
                invalid,
            }) => {
                let raw = features.as_array();
                let mut point = [0.0; DIMENSIONS];
                for i in 0..DIMENSIONS {
                    point[i] = standardise(raw[i], mean[i], scale[i]);
                }
                distance(&point, valid) <= distance(&point, invalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample(amount: i64, frequency: u32, valid: bool) -> LabeledSample {
        LabeledSample::new(VerificationFeatures::new(&Decimal::from(amount), frequency), valid)
    }

    fn features(amount: i64, frequency: u32) -> VerificationFeatures {
        VerificationFeatures::new(&Decimal::from(amount), frequency)
    }

    #[test]
    fn test_untrained_fails_open() {
        let classifier = CentroidClassifier::new();
        assert!(!classifier.is_trained());
        assert!(classifier.predict(&features(1_000_000, 1_000)));
    }

    #[test]
    fn test_separates_small_from_large() {
        let mut samples: Vec<_> = (1..=10).map(|i| sample(i, 1, true)).collect();
        samples.extend((1..=10).map(|i| sample(10_000 + i, 50, false)));

        let mut classifier = CentroidClassifier::new();
        classifier.train(&samples);

        assert!(classifier.is_trained());
        assert!(classifier.predict(&features(5, 1)));
        assert!(!classifier.predict(&features(9_000, 40)));
    }

    #[test]
    fn test_single_class_training() {
        let samples: Vec<_> = (1..=12).map(|i| sample(i, 1, false)).collect();
        let mut classifier = CentroidClassifier::new();
        classifier.train(&samples);

        assert!(!classifier.predict(&features(3, 1)));
    }
}
