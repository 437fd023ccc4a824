//! Anomaly Detector - thread-safe wrapper around an [`OutlierModel`].

use parking_lot::RwLock;
use rust_decimal::prelude::ToPrimitive;
use shared_types::{Amount, AnomalyOracle};
use std::collections::VecDeque;

use crate::domain::config::AnomalyConfig;
use crate::domain::errors::AnomalyError;
use crate::domain::model::{MadOutlierModel, OutlierModel};

struct DetectorState {
    samples: VecDeque<f64>,
    model: Box<dyn OutlierModel>,
}

/// Stateful classifier over historical amounts.
///
/// Fails open: before `min_samples` observations every amount is normal.
pub struct AnomalyDetector {
    config: AnomalyConfig,
    state: RwLock<DetectorState>,
}

impl AnomalyDetector {
    /// Create a detector with the default robust z-score model.
    pub fn new(config: AnomalyConfig) -> Result<Self, AnomalyError> {
        let model = Box::new(MadOutlierModel::new(config.threshold));
        Self::with_model(config, model)
    }

    /// Create a detector with a custom model.
    pub fn with_model(
        config: AnomalyConfig,
        model: Box<dyn OutlierModel>,
    ) -> Result<Self, AnomalyError> {
        config.validate()?;
        Ok(Self {
            config,
            state: RwLock::new(DetectorState {
                samples: VecDeque::new(),
                model,
            }),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    /// Record an amount and refit once warmed up.
    pub fn observe(&self, amount: &Amount) {
        self.observe_many(std::slice::from_ref(amount));
    }

    /// Record several amounts under one lock acquisition and refit once.
    pub fn observe_many(&self, amounts: &[Amount]) {
        if amounts.is_empty() {
            return;
        }
        let mut state = self.state.write();
        for amount in amounts {
            match amount.to_f64() {
                Some(value) if value.is_finite() => state.samples.push_back(value),
                _ => tracing::warn!(amount = %amount, "Skipping amount not representable as f64"),
            }
        }
        if let Some(max) = self.config.max_samples {
            while state.samples.len() > max {
                state.samples.pop_front();
            }
        }

        if state.samples.len() >= self.config.min_samples {
            let DetectorState { samples, model } = &mut *state;
            model.fit(samples.make_contiguous());
            tracing::trace!(samples = samples.len(), "Outlier model refitted");
        }
    }

    /// Whether `amount` is an outlier. `false` until warmed up.
    pub fn is_anomalous(&self, amount: &Amount) -> bool {
        let state = self.state.read();
        if state.samples.len() < self.config.min_samples || !state.model.is_fitted() {
            return false;
        }
        let value = match amount.to_f64() {
            Some(value) => value,
            None => return false,
        };
        let anomalous = state.model.is_outlier(value);
        if anomalous {
            tracing::debug!(amount = %amount, samples = state.samples.len(), "Amount flagged as anomalous");
        }
        anomalous
    }

    /// Number of retained observations.
    pub fn sample_count(&self) -> usize {
        self.state.read().samples.len()
    }

    /// Whether the warm-up threshold has been reached.
    pub fn is_warmed_up(&self) -> bool {
        self.sample_count() >= self.config.min_samples
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self {
            config: AnomalyConfig::default(),
            state: RwLock::new(DetectorState {
                samples: VecDeque::new(),
                model: Box::new(MadOutlierModel::new(AnomalyConfig::default().threshold)),
            }),
        }
    }
}

impl AnomalyOracle for AnomalyDetector {
    fn is_anomalous(&self, amount: &Amount) -> bool {
        AnomalyDetector::is_anomalous(self, amount)
    }

    fn observe(&self, amount: &Amount) {
        AnomalyDetector::observe(self, amount)
    }
}
