//! Vote source implementations.

pub mod votes;

pub use votes::{AlternatingVotes, FixedVotes, RandomVotes};
