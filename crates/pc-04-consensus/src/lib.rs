//! # Consensus Subsystem (PC-04)
//!
//! Local stand-in for a validator quorum. A fixed number of validators
//! vote concurrently on a proposal, each after an independent bounded
//! delay, and the proposal is accepted on a strict majority.
//!
//! ## Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | All votes counted | Coordinator awaits every vote, no early exit |
//! | Latency O(max delay) | Votes run as concurrent tasks |
//! | Deterministic tests | Injectable [`VoteSource`] |
//! | Abandonable rounds | `watch` cancellation aborts in-flight votes |
//!
//! This is not a replicated agreement protocol. There is no leader
//! election, networking or Byzantine fault tolerance.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{AlternatingVotes, FixedVotes, RandomVotes};
pub use domain::config::ConsensusConfig;
pub use domain::entities::{ConsensusRound, Proposal};
pub use domain::errors::{ConsensusError, ConsensusResult};
pub use ports::inbound::ConsensusApi;
pub use ports::outbound::VoteSource;
pub use service::ConsensusCoordinator;
