//! Driven ports (Outbound Dependencies)

use async_trait::async_trait;
use shared_types::{Amount, Digest};

use crate::domain::errors::BroadcastError;
use crate::domain::events::TransactionProcessed;

/// External commit endpoint.
///
/// A single failure is final for the transfer. Callers never retry.
#[async_trait]
pub trait BroadcastEndpoint: Send + Sync {
    /// Submit the transfer and wait for its confirmation digest.
    async fn submit(
        &self,
        sender: &str,
        receiver: &str,
        amount: &Amount,
    ) -> Result<Digest, BroadcastError>;
}

/// Receives a notification for every processed transfer.
#[async_trait]
pub trait TransactionEventSink: Send + Sync {
    async fn publish(&self, event: TransactionProcessed);
}
