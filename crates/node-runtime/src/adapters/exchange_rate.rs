//! Fixed USD exchange rate.

use rust_decimal::Decimal;
use shared_types::{pi_value_usd, total_supply, Amount, ExchangeRateProvider};

/// Lowest adjusted value accepted.
pub const MIN_ADJUSTED_VALUE_USD: u64 = 314_158;

/// Highest adjusted value accepted.
pub const MAX_ADJUSTED_VALUE_USD: u64 = 314_160;

/// Returns 314159 USD per unit unless adjusted within the clamp band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedExchangeRate {
    value: Amount,
}

impl FixedExchangeRate {
    pub fn new() -> Self {
        Self {
            value: pi_value_usd(),
        }
    }

    /// Rate adjusted to `proposed`, clamped to `[314158, 314160]`.
    pub fn adjusted(proposed: Amount) -> Self {
        let min = Decimal::from(MIN_ADJUSTED_VALUE_USD);
        let max = Decimal::from(MAX_ADJUSTED_VALUE_USD);
        let value = proposed.clamp(min, max);
        if value != proposed {
            tracing::warn!(proposed = %proposed, applied = %value, "Exchange rate adjustment clamped");
        }
        Self { value }
    }
}

impl Default for FixedExchangeRate {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeRateProvider for FixedExchangeRate {
    fn current_value(&self) -> Amount {
        self.value
    }

    fn supply_cap(&self) -> Amount {
        total_supply()
    }
}
