//! # Verification Features
//!
//! The feature vector fed to the pattern classifier. The correlation term
//! is derived from the leading digits of pi, computed once, never learned.

use lazy_static::lazy_static;
use rust_decimal::prelude::ToPrimitive;
use shared_crypto::PI_ENTROPY;
use shared_types::Amount;

/// Number of leading characters of the pi string that feed the correlation.
const CORRELATION_PREFIX_LEN: usize = 10;

lazy_static! {
    static ref DOMAIN_CONSTANT_CORRELATION: f64 = {
        let digit_sum: u32 = PI_ENTROPY
            .chars()
            .take(CORRELATION_PREFIX_LEN)
            .filter_map(|c| c.to_digit(10))
            .sum();
        f64::from(digit_sum) / CORRELATION_PREFIX_LEN as f64
    };
}

/// Digit sum of `3.14159265`, divided by ten.
pub fn domain_constant_correlation() -> f64 {
    *DOMAIN_CONSTANT_CORRELATION
}

/// Transient classifier input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerificationFeatures {
    pub amount: f64,
    pub frequency: f64,
    pub domain_constant_correlation: f64,
}

impl VerificationFeatures {
    pub fn new(amount: &Amount, frequency: u32) -> Self {
        Self {
            amount: amount.to_f64().unwrap_or(f64::MAX),
            frequency: f64::from(frequency),
            domain_constant_correlation: domain_constant_correlation(),
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.amount, self.frequency, self.domain_constant_correlation]
    }
}
