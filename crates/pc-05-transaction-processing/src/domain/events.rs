//! Events published after a transfer reaches a terminal status.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, Digest};

use crate::domain::entities::{Transaction, TransactionStatus};

/// Published once per processed transfer, whatever the outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionProcessed {
    pub tx_id: Digest,
    pub status: TransactionStatus,
    pub amount: Amount,
    pub votes: Vec<bool>,
    pub confirmation: Option<Digest>,
}

impl From<&Transaction> for TransactionProcessed {
    fn from(tx: &Transaction) -> Self {
        Self {
            tx_id: tx.id().to_string(),
            status: tx.status(),
            amount: tx.amount(),
            votes: tx.votes().to_vec(),
            confirmation: tx.confirmation().map(str::to_string),
        }
    }
}
