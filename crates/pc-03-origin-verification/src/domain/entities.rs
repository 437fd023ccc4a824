//! Verification request entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, CoinId};

/// One element of a batch verification call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Declared origin, checked against the source policy.
    pub source: String,
    /// Coin or transfer id.
    pub id: CoinId,
    /// Amount being verified.
    #[serde(default = "default_amount")]
    pub amount: Amount,
    /// How often this origin has been seen recently.
    #[serde(default = "default_frequency")]
    pub frequency: u32,
}

fn default_amount() -> Amount {
    Decimal::ONE
}

fn default_frequency() -> u32 {
    1
}

impl VerificationRequest {
    /// Request with the default amount and frequency of one.
    pub fn new(source: impl Into<String>, id: impl Into<CoinId>) -> Self {
        Self {
            source: source.into(),
            id: id.into(),
            amount: default_amount(),
            frequency: default_frequency(),
        }
    }

    /// Set the amount.
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    /// Set the frequency.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }
}
