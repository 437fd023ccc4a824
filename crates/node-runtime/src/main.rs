//! # Pi Coin Node
//!
//! Demonstration entry point for the Pi Coin core.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install logging and register metrics
//! 3. Build the node (signature authority, ledger, verifier, consensus)
//! 4. Run the demo flow; Ctrl+C cancels in-flight transfers, which then
//!    settle as `Failed` before the demo reports and exits
//!
//! ## Demo Flow
//!
//! ```text
//! mint ──→ supply status ──→ verify origins ──→ transfer batch ──→ metrics
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use pc_03_origin_verification::VerificationRequest;
use pc_05_transaction_processing::Transaction;
use pi_node::{NodeConfig, PiNode};
use pi_telemetry::{encode_metrics, init_telemetry};

/// Demo runtime holding the node and the shutdown signal.
struct NodeRuntime {
    node: Arc<PiNode>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    fn new(config: NodeConfig, shutdown_rx: watch::Receiver<bool>) -> Result<Self> {
        let node = PiNode::new(config).context("Failed to build Pi node")?;
        Ok(Self {
            node: Arc::new(node),
            shutdown_rx,
        })
    }

    async fn run_demo(&self) -> Result<()> {
        info!("===========================================");
        info!("  Pi Coin Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        // Issuance
        let coin = self
            .node
            .mint(Decimal::from(10), "mining")
            .context("Demo mint failed")?;
        info!(coin_id = %coin.id(), verified = self.node.verify_coin(&coin), "Minted demo coin");

        if let Err(e) = self.node.mint(Decimal::from(10), "exchange") {
            info!(error = %e, "Exchange mint rejected as expected");
        }

        let status = serde_json::to_string_pretty(&self.node.supply_status())
            .context("Failed to encode supply status")?;
        info!("Supply status:\n{}", status);

        // Origin verification
        let single = self
            .node
            .verify_origin("mining", coin.id(), coin.amount(), 1);
        info!(accepted = single, "Verified minted coin origin");

        let batch = self.node.batch_verify(&[
            VerificationRequest::new("mining", "demo-1"),
            VerificationRequest::new("exchange", "demo-2"),
            VerificationRequest::new("rewards", "demo-3").with_amount(Decimal::from(5)),
        ]);
        info!(results = ?batch, "Batch verification finished");

        // Transfers
        if *self.shutdown_rx.borrow() {
            warn!("Shutdown requested, skipping transfers");
            return Ok(());
        }
        let mut txs = vec![
            Transaction::new("alice", "bob", Decimal::from(3)),
            Transaction::new("carol", "dave", Decimal::new(15, 1)),
        ];
        let futures = txs.iter_mut().map(|tx| {
            let node = Arc::clone(&self.node);
            let cancel = self.shutdown_rx.clone();
            async move { node.process_cancellable(tx, cancel).await }
        });
        let outcomes = futures::future::join_all(futures).await;
        for (tx, outcome) in txs.iter().zip(outcomes) {
            match outcome {
                Ok(confirmation) => info!(
                    tx_id = %tx.id(),
                    votes = ?tx.votes(),
                    confirmation = %confirmation,
                    "Transfer completed"
                ),
                Err(e) => warn!(tx_id = %tx.id(), stage = e.stage(), error = %e, "Transfer failed"),
            }
        }

        info!(
            rate = %self.node.exchange_rate(),
            pi_per_million_usd = %self.node.usd_to_pi(Decimal::from(1_000_000)),
            "Exchange rate"
        );

        match encode_metrics() {
            Ok(metrics) => info!("Metrics:\n{}", metrics),
            Err(e) => warn!(error = %e, "Failed to encode metrics"),
        }

        Ok(())
    }
}

/// Flips the shutdown signal on Ctrl+C. Runs detached so the demo keeps
/// polling its rounds and observes the cancellation.
fn spawn_shutdown_listener(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Initiating shutdown...");
                if let Err(e) = shutdown_tx.send(true) {
                    error!("Failed to send shutdown signal: {}", e);
                }
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runtime = NodeRuntime::new(config, shutdown_rx)?;
    spawn_shutdown_listener(shutdown_tx);

    runtime.run_demo().await?;

    info!("Pi node stopped");
    Ok(())
}
