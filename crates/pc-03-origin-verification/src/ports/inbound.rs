//! Inbound port: the verification API.

use shared_types::Amount;

use crate::domain::classifier::LabeledSample;
use crate::domain::entities::VerificationRequest;
use crate::domain::errors::VerificationResult;

/// Primary API of the origin verification subsystem.
pub trait OriginVerificationApi: Send + Sync {
    /// Run the gate and report the first failing stage.
    fn verify_detailed(
        &self,
        source: &str,
        coin_id: &str,
        amount: &Amount,
        frequency: u32,
    ) -> VerificationResult<()>;

    /// Boolean form of [`verify_detailed`](Self::verify_detailed).
    fn verify(&self, source: &str, coin_id: &str, amount: &Amount, frequency: u32) -> bool {
        self.verify_detailed(source, coin_id, amount, frequency)
            .is_ok()
    }

    /// Verify each request independently; output order matches input order.
    fn batch_verify_detailed(
        &self,
        requests: &[VerificationRequest],
    ) -> Vec<VerificationResult<()>>;

    /// Boolean form of [`batch_verify_detailed`](Self::batch_verify_detailed).
    fn batch_verify(&self, requests: &[VerificationRequest]) -> Vec<bool> {
        self.batch_verify_detailed(requests)
            .iter()
            .map(Result::is_ok)
            .collect()
    }

    /// Train the pattern classifier. Returns whether the batch was used.
    fn train(&self, samples: &[LabeledSample]) -> bool;
}
