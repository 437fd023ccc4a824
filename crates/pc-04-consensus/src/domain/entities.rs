//! Consensus entities.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

use crate::domain::errors::{ConsensusError, ConsensusResult};

/// The subject of a consensus round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Transaction id.
    pub id: String,
    pub amount: Amount,
}

impl Proposal {
    pub fn new(id: impl Into<String>, amount: Amount) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

/// Outcome of one round: every vote in validator order, and the decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusRound {
    pub votes: Vec<bool>,
    pub required: usize,
    pub accepted: bool,
}

impl ConsensusRound {
    pub fn tally(votes: Vec<bool>, required: usize) -> Self {
        let affirmative = votes.iter().filter(|v| **v).count();
        Self {
            accepted: affirmative >= required,
            votes,
            required,
        }
    }

    pub fn affirmative(&self) -> usize {
        self.votes.iter().filter(|v| **v).count()
    }

    /// `Err(ConsensusFailed)` unless the round was accepted.
    pub fn ensure_accepted(&self) -> ConsensusResult<()> {
        if self.accepted {
            Ok(())
        } else {
            Err(ConsensusError::ConsensusFailed {
                affirmative: self.affirmative(),
                required: self.required,
                quorum: self.votes.len(),
            })
        }
    }
}
