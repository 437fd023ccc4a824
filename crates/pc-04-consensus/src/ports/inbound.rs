//! Driving ports (Inbound API)

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::entities::{ConsensusRound, Proposal};
use crate::domain::errors::ConsensusResult;

/// Primary Consensus API
#[async_trait]
pub trait ConsensusApi: Send + Sync {
    /// Run one round and return every vote with the decision.
    ///
    /// A rejected proposal is `Ok` with `accepted == false`; errors are
    /// reserved for rounds that could not complete.
    async fn decide(&self, proposal: &Proposal) -> ConsensusResult<ConsensusRound>;

    /// As [`decide`](Self::decide), abandoning the round with
    /// `ConsensusError::Cancelled` once `cancel` reads `true`.
    async fn decide_cancellable(
        &self,
        proposal: &Proposal,
        cancel: watch::Receiver<bool>,
    ) -> ConsensusResult<ConsensusRound>;
}
