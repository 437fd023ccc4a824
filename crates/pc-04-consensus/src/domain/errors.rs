//! Error types for the consensus subsystem.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsensusError {
    /// Fewer affirmative votes than the strict majority.
    #[error("Consensus failed: {affirmative}/{quorum} affirmative, {required} required")]
    ConsensusFailed {
        affirmative: usize,
        required: usize,
        quorum: usize,
    },

    /// The round was abandoned before all votes arrived.
    #[error("Consensus round cancelled")]
    Cancelled,

    #[error("Invalid quorum size: {0}")]
    InvalidQuorum(usize),

    #[error("Invalid vote delay bounds: min {min:?} > max {max:?}")]
    InvalidDelayBounds { min: Duration, max: Duration },

    /// A validator task panicked or was aborted.
    #[error("Vote task failed: {0}")]
    VoteTaskFailed(String),
}

pub type ConsensusResult<T> = Result<T, ConsensusError>;
