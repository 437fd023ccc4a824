//! # Cross-Subsystem Ports
//!
//! Narrow traits through which one subsystem consumes another without a
//! compile-time dependency on its crate. Implementations are wired together
//! by the node runtime.

use crate::entities::{Amount, Coin};

/// Outlier decision over transaction and issuance amounts.
///
/// Implemented by the anomaly detection subsystem.
pub trait AnomalyOracle: Send + Sync {
    /// Whether `amount` is statistically inconsistent with history.
    fn is_anomalous(&self, amount: &Amount) -> bool;

    /// Feed an accepted amount into the history.
    fn observe(&self, amount: &Amount);
}

/// Read access to coins recorded by the supply ledger.
pub trait CoinRegistry: Send + Sync {
    /// Look up a minted coin by id.
    fn coin(&self, id: &str) -> Option<Coin>;
}

/// Fixed-value pricing collaborator.
pub trait ExchangeRateProvider: Send + Sync {
    /// USD value of one unit.
    fn current_value(&self) -> Amount;

    /// Supply cap reported alongside the rate.
    fn supply_cap(&self) -> Amount;
}
