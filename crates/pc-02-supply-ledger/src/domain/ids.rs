//! # Coin Id Generation
//!
//! Id derivation is pluggable so tests can use predictable ids while
//! production ids stay unguessable.

use rand::Rng;
use shared_crypto::pi_digest;
use shared_types::{canonical_amount, Amount, CoinId, CoinSource};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh coin identifiers.
pub trait CoinIdGenerator: Send + Sync {
    /// Produce the id for a coin about to be minted.
    fn next_id(&self, amount: &Amount, source: CoinSource) -> CoinId;
}

/// Pi digest of `{amount}-{source}-{random nonce}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCoinIds;

impl CoinIdGenerator for RandomCoinIds {
    fn next_id(&self, amount: &Amount, source: CoinSource) -> CoinId {
        let nonce: u64 = rand::thread_rng().gen();
        pi_digest(&format!("{}-{}-{}", canonical_amount(amount), source, nonce))
    }
}

/// `coin-00000001`, `coin-00000002`, ...
#[derive(Debug, Default)]
pub struct SequentialCoinIds {
    next: AtomicU64,
}

impl SequentialCoinIds {
    /// Start counting from one.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoinIdGenerator for SequentialCoinIds {
    fn next_id(&self, _amount: &Amount, _source: CoinSource) -> CoinId {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("coin-{:08}", n)
    }
}
