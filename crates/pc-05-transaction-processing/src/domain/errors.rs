//! # Transaction Errors
//!
//! Every stage failure leaves the transfer `Failed`. None is retried here.

use pc_03_origin_verification::VerificationError;
use pc_04_consensus::ConsensusError;
use thiserror::Error;

use crate::domain::entities::TransactionStatus;

/// Failure of the external commit step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BroadcastError {
    /// The endpoint could not be reached.
    #[error("Broadcast endpoint unreachable: {endpoint}")]
    Unreachable { endpoint: String },

    /// The endpoint answered but refused the transfer.
    #[error("Broadcast rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("Consensus failed: {0}")]
    Consensus(#[from] ConsensusError),

    #[error("Broadcast failed: {0}")]
    Broadcast(#[from] BroadcastError),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Transaction already {0}")]
    AlreadyTerminal(TransactionStatus),

    #[error("Votes already recorded for this transaction")]
    VotesAlreadyRecorded,
}

impl TransactionError {
    /// Short label for logs and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            TransactionError::Verification(_) => "verification",
            TransactionError::Consensus(_) => "consensus",
            TransactionError::Broadcast(_) => "broadcast",
            TransactionError::InvalidTransition { .. }
            | TransactionError::AlreadyTerminal(_)
            | TransactionError::VotesAlreadyRecorded => "state",
        }
    }
}

pub type TransactionResult<T> = Result<T, TransactionError>;
