//! Simulated RPC broadcast endpoint.

use async_trait::async_trait;
use pc_05_transaction_processing::{BroadcastEndpoint, BroadcastError};
use shared_crypto::keccak256_hex;
use shared_types::{canonical_amount, Amount, Digest};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::container::config::BroadcastConfig;

/// Waits the configured latency, then confirms with the Keccak-256 of the
/// transfer payload. A disconnected endpoint fails every submission, and a
/// connected one refuses transfers with a blank party.
pub struct SimulatedBroadcaster {
    config: BroadcastConfig,
    nonce: AtomicU64,
}

impl SimulatedBroadcaster {
    pub fn new(config: BroadcastConfig) -> Self {
        Self {
            config,
            nonce: AtomicU64::new(0),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Submissions attempted so far.
    pub fn submitted(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BroadcastEndpoint for SimulatedBroadcaster {
    async fn submit(
        &self,
        sender: &str,
        receiver: &str,
        amount: &Amount,
    ) -> Result<Digest, BroadcastError> {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.config.latency).await;

        if !self.config.connected {
            tracing::warn!(endpoint = %self.config.endpoint, "Broadcast endpoint unreachable");
            return Err(BroadcastError::Unreachable {
                endpoint: self.config.endpoint.clone(),
            });
        }

        if sender.trim().is_empty() || receiver.trim().is_empty() {
            tracing::warn!(endpoint = %self.config.endpoint, "Broadcast refused blank party");
            return Err(BroadcastError::Rejected(
                "sender and receiver must be non-empty".into(),
            ));
        }

        let payload = serde_json::json!({
            "from": sender,
            "to": receiver,
            "value": canonical_amount(amount),
            "nonce": nonce,
        });
        let digest = keccak256_hex(payload.to_string().as_bytes());
        tracing::debug!(endpoint = %self.config.endpoint, confirmation = %digest, "Transfer broadcast");
        Ok(digest)
    }
}
