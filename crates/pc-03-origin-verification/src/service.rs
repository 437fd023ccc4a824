//! Origin Verifier Service
//!
//! Runs the five gate stages in order and stops at the first rejection.

use parking_lot::RwLock;
use rayon::prelude::*;
use shared_crypto::integrity_digest;
use shared_types::{canonical_amount, Amount, AnomalyOracle, Coin, CoinRegistry, SourcePolicy};
use std::sync::Arc;

use crate::domain::classifier::{CentroidClassifier, LabeledSample, PatternClassifier};
use crate::domain::config::{IntegrityMode, VerificationConfig};
use crate::domain::entities::VerificationRequest;
use crate::domain::errors::{VerificationError, VerificationResult};
use crate::domain::features::VerificationFeatures;
use crate::ports::inbound::OriginVerificationApi;
use crate::ports::outbound::SignatureCheck;

/// Collaborators the verifier needs.
pub struct VerifierDependencies {
    pub policy: SourcePolicy,
    pub registry: Arc<dyn CoinRegistry>,
    pub anomaly: Arc<dyn AnomalyOracle>,
    pub signatures: Arc<dyn SignatureCheck>,
}

/// Origin Verifier
///
/// Stateless apart from the pattern classifier, which is replaced
/// wholesale by [`train`](OriginVerificationApi::train).
pub struct OriginVerifier {
    config: VerificationConfig,
    policy: SourcePolicy,
    classifier: RwLock<Box<dyn PatternClassifier>>,
    registry: Arc<dyn CoinRegistry>,
    anomaly: Arc<dyn AnomalyOracle>,
    signatures: Arc<dyn SignatureCheck>,
}

impl OriginVerifier {
    /// Create a verifier with an untrained centroid classifier.
    pub fn new(config: VerificationConfig, deps: VerifierDependencies) -> Self {
        Self {
            config,
            policy: deps.policy,
            classifier: RwLock::new(Box::new(CentroidClassifier::new())),
            registry: deps.registry,
            anomaly: deps.anomaly,
            signatures: deps.signatures,
        }
    }

    /// Replace the pattern classifier.
    pub fn with_classifier(self, classifier: Box<dyn PatternClassifier>) -> Self {
        *self.classifier.write() = classifier;
        self
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Whether the pattern classifier has been trained.
    pub fn is_trained(&self) -> bool {
        self.classifier.read().is_trained()
    }

    fn check_pattern(&self, source: &str, amount: &Amount, frequency: u32) -> VerificationResult<()> {
        let features = VerificationFeatures::new(amount, frequency);
        if self.classifier.read().predict(&features) {
            Ok(())
        } else {
            Err(VerificationError::PatternRejected {
                origin: source.to_string(),
            })
        }
    }

    fn check_integrity(
        &self,
        source: &str,
        coin_id: &str,
        amount: &Amount,
        registered: Option<&Coin>,
    ) -> VerificationResult<()> {
        let reject_unregistered = match self.config.integrity {
            IntegrityMode::Disabled => return Ok(()),
            IntegrityMode::Anchored {
                reject_unregistered,
            } => reject_unregistered,
        };
        let rejected = || VerificationError::HashIntegrity {
            coin_id: coin_id.to_string(),
        };

        match registered {
            Some(coin) => {
                let expected = integrity_digest(source, coin_id, &canonical_amount(amount));
                let anchored = integrity_digest(
                    coin.source().as_str(),
                    coin.id(),
                    &canonical_amount(&coin.amount()),
                );
                if expected == anchored {
                    Ok(())
                } else {
                    Err(rejected())
                }
            }
            None if reject_unregistered => Err(rejected()),
            None => Ok(()),
        }
    }

    /// Stages in order; `?` stops at the first rejection.
    fn run_stages(
        &self,
        source: &str,
        coin_id: &str,
        amount: &Amount,
        frequency: u32,
    ) -> VerificationResult<()> {
        self.policy.check(source)?;
        self.check_pattern(source, amount, frequency)?;

        let registered = self.registry.coin(coin_id);
        self.check_integrity(source, coin_id, amount, registered.as_ref())?;

        if self.anomaly.is_anomalous(amount) {
            return Err(VerificationError::AnomalyRejected { amount: *amount });
        }

        if !self
            .signatures
            .verify_origin(source, coin_id, registered.as_ref())
        {
            return Err(VerificationError::SignatureInvalid {
                coin_id: coin_id.to_string(),
            });
        }
        Ok(())
    }
}

impl OriginVerificationApi for OriginVerifier {
    fn verify_detailed(
        &self,
        source: &str,
        coin_id: &str,
        amount: &Amount,
        frequency: u32,
    ) -> VerificationResult<()> {
        let outcome = self.run_stages(source, coin_id, amount, frequency);

        match &outcome {
            Ok(()) => tracing::debug!(source = %source, coin_id = %coin_id, "Origin verified"),
            Err(e) => tracing::warn!(
                source = %source,
                coin_id = %coin_id,
                stage = e.stage(),
                error = %e,
                "Origin rejected"
            ),
        }
        outcome
    }

    fn batch_verify_detailed(
        &self,
        requests: &[VerificationRequest],
    ) -> Vec<VerificationResult<()>> {
        requests
            .par_iter()
            .map(|r| self.verify_detailed(&r.source, &r.id, &r.amount, r.frequency))
            .collect()
    }

    fn train(&self, samples: &[LabeledSample]) -> bool {
        if samples.len() < self.config.min_training_samples {
            tracing::warn!(
                samples = samples.len(),
                required = self.config.min_training_samples,
                "Ignoring undersized training batch"
            );
            return false;
        }
        self.classifier.write().train(samples);
        tracing::info!(samples = samples.len(), "Pattern classifier trained");
        true
    }
}
