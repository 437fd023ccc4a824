//! Transaction Processor
//!
//! Orchestrates one transfer: verify, observe, vote, broadcast.

use async_trait::async_trait;
use futures::future::join_all;
use pc_03_origin_verification::OriginVerificationApi;
use pc_04_consensus::{ConsensusApi, Proposal};
use shared_types::{AnomalyOracle, Digest};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::entities::{Transaction, TransactionStatus};
use crate::domain::errors::{TransactionError, TransactionResult};
use crate::domain::events::TransactionProcessed;
use crate::ports::inbound::TransactionProcessingApi;
use crate::ports::outbound::{BroadcastEndpoint, TransactionEventSink};

/// Collaborators the processor needs.
pub struct TransactionDependencies {
    pub verifier: Arc<dyn OriginVerificationApi>,
    pub anomaly: Arc<dyn AnomalyOracle>,
    pub consensus: Arc<dyn ConsensusApi>,
    pub broadcaster: Arc<dyn BroadcastEndpoint>,
    pub events: Arc<dyn TransactionEventSink>,
}

pub struct TransactionProcessor {
    verifier: Arc<dyn OriginVerificationApi>,
    anomaly: Arc<dyn AnomalyOracle>,
    consensus: Arc<dyn ConsensusApi>,
    broadcaster: Arc<dyn BroadcastEndpoint>,
    events: Arc<dyn TransactionEventSink>,
}

impl TransactionProcessor {
    pub fn new(deps: TransactionDependencies) -> Self {
        Self {
            verifier: deps.verifier,
            anomaly: deps.anomaly,
            consensus: deps.consensus,
            broadcaster: deps.broadcaster,
            events: deps.events,
        }
    }

    /// Steps 1-4. Leaves the transfer `pending` or `verified` on error.
    async fn advance(
        &self,
        tx: &mut Transaction,
        cancel: watch::Receiver<bool>,
    ) -> TransactionResult<Digest> {
        self.verifier
            .verify_detailed(tx.source(), tx.id(), &tx.amount(), tx.frequency())?;

        self.anomaly.observe(&tx.amount());
        tx.transition(TransactionStatus::Verified)?;

        let proposal = Proposal::new(tx.id(), tx.amount());
        let round = self.consensus.decide_cancellable(&proposal, cancel).await?;
        tx.record_votes(round.votes.clone())?;
        round.ensure_accepted()?;

        let digest = self
            .broadcaster
            .submit(tx.sender(), tx.receiver(), &tx.amount())
            .await?;
        Ok(digest)
    }

    async fn run(
        &self,
        tx: &mut Transaction,
        cancel: watch::Receiver<bool>,
    ) -> TransactionResult<Digest> {
        if tx.status() != TransactionStatus::Pending {
            let err = if tx.status().is_terminal() {
                TransactionError::AlreadyTerminal(tx.status())
            } else {
                TransactionError::InvalidTransition {
                    from: tx.status(),
                    to: TransactionStatus::Verified,
                }
            };
            return Err(err);
        }

        let outcome = match self.advance(tx, cancel).await {
            Ok(digest) => {
                tx.set_confirmation(digest.clone());
                tx.transition(TransactionStatus::Completed).map(|()| digest)
            }
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(digest) => tracing::info!(
                tx_id = %tx.id(),
                amount = %tx.amount(),
                confirmation = %digest,
                "Transaction completed"
            ),
            Err(e) => {
                tx.transition(TransactionStatus::Failed)?;
                tracing::warn!(
                    tx_id = %tx.id(),
                    amount = %tx.amount(),
                    stage = e.stage(),
                    error = %e,
                    "Transaction failed"
                );
            }
        }

        self.events.publish(TransactionProcessed::from(&*tx)).await;
        outcome
    }
}

#[async_trait]
impl TransactionProcessingApi for TransactionProcessor {
    async fn process(&self, tx: &mut Transaction) -> TransactionResult<Digest> {
        let (_never_cancel, cancel) = watch::channel(false);
        self.run(tx, cancel).await
    }

    async fn process_cancellable(
        &self,
        tx: &mut Transaction,
        cancel: watch::Receiver<bool>,
    ) -> TransactionResult<Digest> {
        self.run(tx, cancel).await
    }

    async fn process_batch(&self, txs: &mut [Transaction]) -> Vec<TransactionResult<Digest>> {
        tracing::debug!(count = txs.len(), "Processing transaction batch");
        join_all(txs.iter_mut().map(|tx| self.process(tx))).await
    }
}
