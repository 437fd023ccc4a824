//! Driven ports (Outbound Dependencies)

use async_trait::async_trait;

use crate::domain::entities::Proposal;

/// Produces the vote of one simulated validator.
#[async_trait]
pub trait VoteSource: Send + Sync {
    /// Vote of validator `validator` (0-based) on `proposal`.
    async fn vote(&self, validator: usize, proposal: &Proposal) -> bool;
}
