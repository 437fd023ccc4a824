//! Error types for the supply ledger.

use shared_types::{Amount, SourceError};
use thiserror::Error;

/// Ledger error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Declared source is unknown, deny-listed or not allowed.
    #[error("Invalid source: {0}")]
    InvalidSource(#[from] SourceError),

    /// Mint amounts must be strictly positive.
    #[error("Invalid mint amount: {0}")]
    InvalidAmount(Amount),

    /// Minting would push total supply past the cap. Nothing was minted.
    #[error("Supply cap exceeded: current {current}, requested {requested}, cap {cap}")]
    SupplyCapExceeded {
        current: Amount,
        requested: Amount,
        cap: Amount,
    },
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
