//! # Transaction Entity
//!
//! A transfer request and its lifecycle. Status changes go through
//! [`Transaction::transition`], which only moves forward.

use serde::{Deserialize, Serialize};
use shared_crypto::pi_digest;
use shared_types::{canonical_amount, current_timestamp_ms, Amount, Digest, Timestamp};
use std::fmt;

use crate::domain::errors::{TransactionError, TransactionResult};

/// Origin declared by transfers unless set otherwise.
pub const DEFAULT_TRANSFER_SOURCE: &str = "p2p";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Verified,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Verified => "verified",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Completed | TransactionStatus::Failed)
    }

    /// `pending -> verified | failed`, `verified -> completed | failed`.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Pending, Verified) | (Pending, Failed) | (Verified, Completed) | (Verified, Failed)
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transfer between two parties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    sender: String,
    receiver: String,
    amount: Amount,
    source: String,
    id: Digest,
    created_at: Timestamp,
    frequency: u32,
    status: TransactionStatus,
    votes: Vec<bool>,
    confirmation: Option<Digest>,
}

impl Transaction {
    /// New `pending` transfer stamped with the current time.
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: Amount) -> Self {
        Self::at(sender, receiver, amount, current_timestamp_ms())
    }

    /// New `pending` transfer with an explicit creation time.
    pub fn at(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: Amount,
        created_at: Timestamp,
    ) -> Self {
        let sender = sender.into();
        let receiver = receiver.into();
        let id = pi_digest(&format!(
            "{}-{}-{}-{}",
            sender,
            receiver,
            canonical_amount(&amount),
            created_at
        ));
        Self {
            sender,
            receiver,
            amount,
            source: DEFAULT_TRANSFER_SOURCE.to_string(),
            id,
            created_at,
            frequency: 1,
            status: TransactionStatus::Pending,
            votes: Vec::new(),
            confirmation: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Observed frequency of this origin, fed to the pattern classifier.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Votes of the consensus round, empty until one has run.
    pub fn votes(&self) -> &[bool] {
        &self.votes
    }

    /// Broadcast confirmation digest, set on completion.
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    /// Move to `next`.
    ///
    /// # Errors
    /// - `AlreadyTerminal` once `completed` or `failed`
    /// - `InvalidTransition` for any other backwards or skipping move
    pub fn transition(&mut self, next: TransactionStatus) -> TransactionResult<()> {
        if self.status.is_terminal() {
            return Err(TransactionError::AlreadyTerminal(self.status));
        }
        if !self.status.can_transition_to(next) {
            return Err(TransactionError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        tracing::debug!(tx_id = %self.id, from = %self.status, to = %next, "Transaction status changed");
        self.status = next;
        Ok(())
    }

    /// Record the vote sequence of the single consensus round.
    pub fn record_votes(&mut self, votes: Vec<bool>) -> TransactionResult<()> {
        if !self.votes.is_empty() {
            return Err(TransactionError::VotesAlreadyRecorded);
        }
        self.votes = votes;
        Ok(())
    }

    pub(crate) fn set_confirmation(&mut self, digest: Digest) {
        self.confirmation = Some(digest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use TransactionStatus::*;

    fn tx() -> Transaction {
        Transaction::at("alice", "bob", Decimal::from(10), 1_700_000_000_000)
    }

    #[test]
    fn test_new_transaction_defaults() {
        let tx = tx();
        assert_eq!(tx.status(), Pending);
        assert_eq!(tx.source(), "p2p");
        assert_eq!(tx.frequency(), 1);
        assert!(tx.votes().is_empty());
        assert!(tx.confirmation().is_none());
    }

    #[test]
    fn test_id_binds_fields() {
        let a = tx();
        assert_eq!(a.id(), tx().id());
        assert_eq!(a.id().len(), 128);

        let later = Transaction::at("alice", "bob", Decimal::from(10), 1_700_000_000_001);
        let other = Transaction::at("alice", "carol", Decimal::from(10), 1_700_000_000_000);
        assert_ne!(a.id(), later.id());
        assert_ne!(a.id(), other.id());
    }

    #[test]
    fn test_success_path() {
        let mut tx = tx();
        tx.transition(Verified).unwrap();
        tx.transition(Completed).unwrap();
        assert_eq!(tx.status(), Completed);
    }

    #[test]
    fn test_failure_from_pending_and_verified() {
        let mut early = tx();
        early.transition(Failed).unwrap();

        let mut late = tx();
        late.transition(Verified).unwrap();
        late.transition(Failed).unwrap();
        assert_eq!(late.status(), Failed);
    }

    #[test]
    fn test_no_skipping_or_regression() {
        let mut tx = tx();
        assert_eq!(
            tx.transition(Completed),
            Err(TransactionError::InvalidTransition {
                from: Pending,
                to: Completed
            })
        );

        tx.transition(Verified).unwrap();
        assert!(tx.transition(Pending).is_err());
        assert!(tx.transition(Verified).is_err());
        assert_eq!(tx.status(), Verified);
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [Completed, Failed] {
            let mut tx = tx();
            tx.transition(Verified).unwrap();
            tx.transition(terminal).unwrap();

            for next in [Pending, Verified, Completed, Failed] {
                assert_eq!(
                    tx.transition(next),
                    Err(TransactionError::AlreadyTerminal(terminal))
                );
            }
        }
    }

    #[test]
    fn test_votes_recorded_once() {
        let mut tx = tx();
        tx.record_votes(vec![true, false, true]).unwrap();
        assert_eq!(
            tx.record_votes(vec![true; 3]),
            Err(TransactionError::VotesAlreadyRecorded)
        );
        assert_eq!(tx.votes(), &[true, false, true]);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Completed).unwrap(), "\"completed\"");
    }
}
