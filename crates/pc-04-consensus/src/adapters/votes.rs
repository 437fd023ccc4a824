//! Vote sources.

use async_trait::async_trait;
use rand::Rng;

use crate::domain::entities::Proposal;
use crate::ports::outbound::VoteSource;

/// Validator `i` votes yes when `i` is even: `[true, false, true]` for a
/// quorum of three, which accepts.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlternatingVotes;

#[async_trait]
impl VoteSource for AlternatingVotes {
    async fn vote(&self, validator: usize, _proposal: &Proposal) -> bool {
        validator % 2 == 0
    }
}

/// Scripted votes, cycled when the quorum is larger than the script.
#[derive(Clone, Debug)]
pub struct FixedVotes {
    votes: Vec<bool>,
}

impl FixedVotes {
    pub fn new(votes: Vec<bool>) -> Self {
        Self { votes }
    }

    pub fn all(vote: bool) -> Self {
        Self::new(vec![vote])
    }
}

#[async_trait]
impl VoteSource for FixedVotes {
    async fn vote(&self, validator: usize, _proposal: &Proposal) -> bool {
        if self.votes.is_empty() {
            return false;
        }
        self.votes[validator % self.votes.len()]
    }
}

/// Each validator votes yes with probability `approval_rate`.
#[derive(Clone, Copy, Debug)]
pub struct RandomVotes {
    approval_rate: f64,
}

impl RandomVotes {
    /// Rates are clamped to `[0, 1]`; a NaN rate never approves.
    pub fn new(approval_rate: f64) -> Self {
        let approval_rate = if approval_rate.is_nan() {
            0.0
        } else {
            approval_rate.clamp(0.0, 1.0)
        };
        Self { approval_rate }
    }

    pub fn approval_rate(&self) -> f64 {
        self.approval_rate
    }
}

#[async_trait]
impl VoteSource for RandomVotes {
    async fn vote(&self, _validator: usize, _proposal: &Proposal) -> bool {
        rand::thread_rng().gen_bool(self.approval_rate)
    }
}
