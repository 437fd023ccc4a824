//! Driving ports (Inbound API)

use async_trait::async_trait;
use shared_types::Digest;
use tokio::sync::watch;

use crate::domain::entities::Transaction;
use crate::domain::errors::TransactionResult;

#[async_trait]
pub trait TransactionProcessingApi: Send + Sync {
    /// Run a `pending` transfer to `completed` or `failed`.
    ///
    /// Returns the broadcast confirmation digest on success.
    async fn process(&self, tx: &mut Transaction) -> TransactionResult<Digest>;

    /// As [`process`](Self::process), abandoning the consensus round once
    /// `cancel` reads `true`. The transfer ends `failed`.
    async fn process_cancellable(
        &self,
        tx: &mut Transaction,
        cancel: watch::Receiver<bool>,
    ) -> TransactionResult<Digest>;

    /// Process every transfer concurrently. Outcomes are in input order.
    async fn process_batch(&self, txs: &mut [Transaction]) -> Vec<TransactionResult<Digest>>;
}
