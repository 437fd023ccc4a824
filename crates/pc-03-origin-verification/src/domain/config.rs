//! Verification gate configuration.

/// How stage 3 treats the integrity digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegrityMode {
    /// Skip the integrity stage.
    Disabled,
    /// Compare the digest of `{source, coin_id, amount}` with the digest of
    /// the coin registered under `coin_id`.
    Anchored {
        /// Reject ids the ledger has never issued.
        reject_unregistered: bool,
    },
}

impl Default for IntegrityMode {
    fn default() -> Self {
        IntegrityMode::Anchored {
            reject_unregistered: false,
        }
    }
}

/// Minimum labelled samples before the classifier is trained.
pub const DEFAULT_MIN_TRAINING_SAMPLES: usize = 10;

/// Origin verifier configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Stage 3 behaviour.
    pub integrity: IntegrityMode,
    /// Training batches smaller than this are ignored.
    pub min_training_samples: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            integrity: IntegrityMode::default(),
            min_training_samples: DEFAULT_MIN_TRAINING_SAMPLES,
        }
    }
}
