//! Consensus configuration.

use std::time::Duration;

use crate::domain::errors::{ConsensusError, ConsensusResult};

/// Number of simulated validators.
pub const DEFAULT_QUORUM_SIZE: usize = 3;

/// Lower bound of the simulated per-vote network latency.
pub const DEFAULT_VOTE_DELAY_MIN: Duration = Duration::from_millis(50);

/// Upper bound of the simulated per-vote network latency.
pub const DEFAULT_VOTE_DELAY_MAX: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusConfig {
    pub quorum_size: usize,
    pub vote_delay_min: Duration,
    pub vote_delay_max: Duration,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            quorum_size: DEFAULT_QUORUM_SIZE,
            vote_delay_min: DEFAULT_VOTE_DELAY_MIN,
            vote_delay_max: DEFAULT_VOTE_DELAY_MAX,
        }
    }
}

impl ConsensusConfig {
    /// Fixed delay for every vote.
    pub fn with_fixed_delay(mut self, delay: Duration) -> Self {
        self.vote_delay_min = delay;
        self.vote_delay_max = delay;
        self
    }

    /// Strict majority of the quorum: 2 of 3, 3 of 5, 3 of 4.
    pub fn required_votes(&self) -> usize {
        self.quorum_size / 2 + 1
    }

    pub fn validate(&self) -> ConsensusResult<()> {
        if self.quorum_size == 0 {
            return Err(ConsensusError::InvalidQuorum(self.quorum_size));
        }
        if self.vote_delay_min > self.vote_delay_max {
            return Err(ConsensusError::InvalidDelayBounds {
                min: self.vote_delay_min,
                max: self.vote_delay_max,
            });
        }
        Ok(())
    }
}
