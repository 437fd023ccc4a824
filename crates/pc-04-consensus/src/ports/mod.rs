//! # Ports Layer
//!
//! - **Inbound (Driving)**: [`ConsensusApi`](inbound::ConsensusApi)
//! - **Outbound (Driven)**: [`VoteSource`](outbound::VoteSource)

pub mod inbound;
pub mod outbound;
