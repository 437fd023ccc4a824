//! Consensus Coordinator
//!
//! Spawns one task per validator, each sleeping for its own simulated
//! latency before voting, and tallies once every task has finished.
//! The tasks live in a [`JoinSet`], so dropping a round at any point
//! aborts the votes still in flight.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::domain::config::ConsensusConfig;
use crate::domain::entities::{ConsensusRound, Proposal};
use crate::domain::errors::{ConsensusError, ConsensusResult};
use crate::ports::inbound::ConsensusApi;
use crate::ports::outbound::VoteSource;

pub struct ConsensusCoordinator {
    config: ConsensusConfig,
    votes: Arc<dyn VoteSource>,
}

impl ConsensusCoordinator {
    pub fn new(config: ConsensusConfig, votes: Arc<dyn VoteSource>) -> ConsensusResult<Self> {
        config.validate()?;
        Ok(Self { config, votes })
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    fn vote_delays(&self) -> Vec<Duration> {
        let min = self.config.vote_delay_min;
        let max = self.config.vote_delay_max;
        let mut rng = rand::thread_rng();
        (0..self.config.quorum_size)
            .map(|_| {
                if min == max {
                    min
                } else {
                    rng.gen_range(min..=max)
                }
            })
            .collect()
    }

    fn spawn_votes(&self, proposal: &Proposal) -> JoinSet<(usize, bool)> {
        let mut tasks = JoinSet::new();
        for (validator, delay) in self.vote_delays().into_iter().enumerate() {
            let votes = Arc::clone(&self.votes);
            let proposal = proposal.clone();
            tasks.spawn(async move {
                tokio::time::sleep(delay).await;
                (validator, votes.vote(validator, &proposal).await)
            });
        }
        tasks
    }
}

/// Await every vote and return them in validator order.
async fn collect_votes(
    mut tasks: JoinSet<(usize, bool)>,
    quorum: usize,
) -> ConsensusResult<Vec<bool>> {
    let mut votes = vec![false; quorum];
    while let Some(joined) = tasks.join_next().await {
        let (validator, vote) =
            joined.map_err(|e| ConsensusError::VoteTaskFailed(e.to_string()))?;
        if let Some(slot) = votes.get_mut(validator) {
            *slot = vote;
        }
    }
    Ok(votes)
}

/// Resolves once `cancel` reads `true`. Never resolves if the sender is
/// dropped without cancelling.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl ConsensusApi for ConsensusCoordinator {
    async fn decide(&self, proposal: &Proposal) -> ConsensusResult<ConsensusRound> {
        let (_never_cancel, cancel) = watch::channel(false);
        self.decide_cancellable(proposal, cancel).await
    }

    async fn decide_cancellable(
        &self,
        proposal: &Proposal,
        mut cancel: watch::Receiver<bool>,
    ) -> ConsensusResult<ConsensusRound> {
        let tasks = self.spawn_votes(proposal);

        // Losing the race drops the JoinSet, which aborts the remaining votes
        let votes = tokio::select! {
            votes = collect_votes(tasks, self.config.quorum_size) => votes?,
            _ = cancelled(&mut cancel) => {
                tracing::warn!(tx_id = %proposal.id, "Consensus round cancelled");
                return Err(ConsensusError::Cancelled);
            }
        };

        let round = ConsensusRound::tally(votes, self.config.required_votes());
        tracing::info!(
            tx_id = %proposal.id,
            votes = ?round.votes,
            accepted = round.accepted,
            "Consensus round complete"
        );
        Ok(round)
    }
}
