//! # Verification Errors
//!
//! One variant per gate stage. These are expected outcomes, surfaced to
//! callers as `false` by the boolean API.

use shared_types::{Amount, CoinId, SourceError};
use thiserror::Error;

/// Why an origin was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Stage 1: source not allowed or deny-listed.
    #[error("Source rejected: {0}")]
    SourceRejected(#[from] SourceError),

    /// Stage 2: the pattern classifier predicted an invalid origin.
    #[error("Pattern classifier rejected origin {origin}")]
    PatternRejected { origin: String },

    /// Stage 3: integrity digest mismatch, possible tampering.
    #[error("Hash integrity mismatch for {coin_id}")]
    HashIntegrity { coin_id: CoinId },

    /// Stage 4: amount is a statistical outlier.
    #[error("Anomalous amount: {amount}")]
    AnomalyRejected { amount: Amount },

    /// Stage 5: signature does not verify.
    #[error("Signature invalid for {coin_id}")]
    SignatureInvalid { coin_id: CoinId },
}

impl VerificationError {
    /// Short label for logs and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            VerificationError::SourceRejected(_) => "source",
            VerificationError::PatternRejected { .. } => "pattern",
            VerificationError::HashIntegrity { .. } => "integrity",
            VerificationError::AnomalyRejected { .. } => "anomaly",
            VerificationError::SignatureInvalid { .. } => "signature",
        }
    }
}

/// Result type for verification operations.
pub type VerificationResult<T> = Result<T, VerificationError>;
