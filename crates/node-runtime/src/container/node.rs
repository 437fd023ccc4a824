//! # Pi Node
//!
//! Builds every subsystem in dependency order and exposes the public API.
//!
//! ```text
//! Level 0: SignatureAuthority, AnomalyDetector
//! Level 1: SupplyLedger (authority, detector)
//! Level 2: OriginVerifier (ledger registry, detector, authority)
//! Level 3: ConsensusCoordinator, TransactionProcessor
//! ```

use futures::future::join_all;
use pc_01_anomaly_detection::{AnomalyDetector, AnomalyError};
use pc_02_supply_ledger::{LedgerDependencies, LedgerError, LedgerResult, SupplyLedger};
use pc_03_origin_verification::{
    AuthoritySignatureCheck, LabeledSample, OriginVerificationApi, OriginVerifier,
    VerificationRequest, VerificationResult, VerifierDependencies,
};
use pc_04_consensus::{AlternatingVotes, ConsensusCoordinator, ConsensusError, VoteSource};
use pc_05_transaction_processing::{
    BroadcastEndpoint, InMemoryEventSink, Transaction, TransactionDependencies, TransactionError,
    TransactionProcessed, TransactionProcessingApi, TransactionProcessor, TransactionResult,
};
use pi_telemetry::{
    log_coin_event, log_event, log_tx_event, metric_inc, HistogramTimer, COINS_MINTED,
    CONSENSUS_ROUNDS, MINT_REJECTIONS, SUPPLY_MINTED, TRANSACTIONS, TRANSACTION_DURATION,
    VERIFICATION_RESULTS,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared_crypto::{CryptoError, Ed25519KeyPair, Ed25519PublicKey, SignatureAuthority};
use shared_types::{
    Amount, AnomalyOracle, Coin, CoinRegistry, Digest, ExchangeRateProvider, SourcePolicy,
    SupplyStatus,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use crate::adapters::{FixedExchangeRate, SimulatedBroadcaster};
use crate::container::config::{ConfigError, NodeConfig};

/// Node construction errors. Any of these is fatal at startup.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Signing key unavailable: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Anomaly detector error: {0}")]
    Anomaly(#[from] AnomalyError),

    #[error("Consensus error: {0}")]
    Consensus(#[from] ConsensusError),
}

/// Replaceable external collaborators.
pub struct Collaborators {
    pub votes: Arc<dyn VoteSource>,
    pub broadcaster: Arc<dyn BroadcastEndpoint>,
    pub exchange_rate: Arc<dyn ExchangeRateProvider>,
}

impl Collaborators {
    /// Alternating validator votes, simulated broadcaster, fixed rate.
    pub fn simulated(config: &NodeConfig) -> Self {
        Self {
            votes: Arc::new(AlternatingVotes),
            broadcaster: Arc::new(SimulatedBroadcaster::new(config.broadcast.clone())),
            exchange_rate: Arc::new(FixedExchangeRate::new()),
        }
    }
}

/// The application root.
pub struct PiNode {
    config: NodeConfig,
    authority: Arc<SignatureAuthority>,
    anomaly: Arc<AnomalyDetector>,
    ledger: Arc<SupplyLedger>,
    verifier: Arc<OriginVerifier>,
    processor: TransactionProcessor,
    exchange_rate: Arc<dyn ExchangeRateProvider>,
    events: Arc<InMemoryEventSink>,
}

impl PiNode {
    /// Node with simulated collaborators.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        let collaborators = Collaborators::simulated(&config);
        Self::with_collaborators(config, collaborators)
    }

    pub fn with_collaborators(
        config: NodeConfig,
        collaborators: Collaborators,
    ) -> Result<Self, NodeError> {
        config.validate()?;

        // Level 0
        let keypair = match &config.signing_seed {
            Some(seed) => Ed25519KeyPair::from_seed_hex(seed)?,
            None => Ed25519KeyPair::generate(),
        };
        let authority = Arc::new(SignatureAuthority::from_keypair(keypair));
        let anomaly = Arc::new(AnomalyDetector::new(config.anomaly.clone())?);
        let oracle: Arc<dyn AnomalyOracle> = anomaly.clone();

        // Level 1
        let ledger = Arc::new(SupplyLedger::new(LedgerDependencies {
            authority: Arc::clone(&authority),
            anomaly: Arc::clone(&oracle),
            policy: SourcePolicy::default(),
        }));
        let registry: Arc<dyn CoinRegistry> = ledger.clone();

        // Level 2
        let verifier = Arc::new(OriginVerifier::new(
            config.verification.clone(),
            VerifierDependencies {
                policy: SourcePolicy::default(),
                registry,
                anomaly: Arc::clone(&oracle),
                signatures: Arc::new(AuthoritySignatureCheck::new(Arc::clone(&authority))),
            },
        ));

        // Level 3
        let consensus = Arc::new(ConsensusCoordinator::new(
            config.consensus.clone(),
            collaborators.votes,
        )?);
        let events = Arc::new(InMemoryEventSink::new());
        let processor = TransactionProcessor::new(TransactionDependencies {
            verifier: verifier.clone(),
            anomaly: oracle,
            consensus,
            broadcaster: collaborators.broadcaster,
            events: events.clone(),
        });

        log_event!(
            info,
            "node",
            "Pi node initialised",
            public_key = %authority.public_key().to_hex(),
            quorum = config.consensus.quorum_size
        );

        Ok(Self {
            config,
            authority,
            anomaly,
            ledger,
            verifier,
            processor,
            exchange_rate: collaborators.exchange_rate,
            events,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// The process public key every coin signature verifies against.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.authority.public_key()
    }

    // =========================================================================
    // Issuance
    // =========================================================================

    /// Mint `amount` units from `source`.
    pub fn mint(&self, amount: Amount, source: &str) -> LedgerResult<Coin> {
        match self.ledger.mint(amount, source) {
            Ok(coin) => {
                metric_inc!(COINS_MINTED);
                SUPPLY_MINTED.set(self.ledger.total_minted().to_f64().unwrap_or_default());
                log_coin_event!(debug, "ledger", "Coin issued", coin.id(), coin.amount());
                Ok(coin)
            }
            Err(e) => {
                let reason = match &e {
                    LedgerError::InvalidSource(_) => "invalid_source",
                    LedgerError::InvalidAmount(_) => "invalid_amount",
                    LedgerError::SupplyCapExceeded { .. } => "supply_cap",
                };
                metric_inc!(MINT_REJECTIONS, &[reason]);
                Err(e)
            }
        }
    }

    /// Whether `coin` carries a valid process signature over its fields.
    pub fn verify_coin(&self, coin: &Coin) -> bool {
        self.ledger.verify_coin(coin)
    }

    pub fn supply_status(&self) -> SupplyStatus {
        self.ledger.status()
    }

    // =========================================================================
    // Origin verification
    // =========================================================================

    pub fn verify_origin(&self, source: &str, coin_id: &str, amount: Amount, frequency: u32) -> bool {
        self.verify_origin_detailed(source, coin_id, amount, frequency)
            .is_ok()
    }

    /// As [`verify_origin`](Self::verify_origin), reporting the failing stage.
    pub fn verify_origin_detailed(
        &self,
        source: &str,
        coin_id: &str,
        amount: Amount,
        frequency: u32,
    ) -> VerificationResult<()> {
        let result = self
            .verifier
            .verify_detailed(source, coin_id, &amount, frequency);
        record_verification(&result);
        result
    }

    /// Order-preserving batch verification.
    pub fn batch_verify(&self, requests: &[VerificationRequest]) -> Vec<bool> {
        self.verifier
            .batch_verify_detailed(requests)
            .iter()
            .map(|result| {
                record_verification(result);
                result.is_ok()
            })
            .collect()
    }

    /// Train the pattern classifier. Batches under the minimum are ignored.
    pub fn train_classifier(&self, samples: &[LabeledSample]) -> bool {
        self.verifier.train(samples)
    }

    /// Seed the anomaly history, e.g. from past transfers.
    pub fn record_history(&self, amounts: &[Amount]) {
        self.anomaly.observe_many(amounts);
    }

    pub fn anomaly_warmed_up(&self) -> bool {
        self.anomaly.is_warmed_up()
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Run a transfer to completion. `true` iff it ends `completed`.
    pub async fn process_transaction(&self, tx: &mut Transaction) -> bool {
        self.process_detailed(tx).await.is_ok()
    }

    /// Run a transfer and return the confirmation digest or the failure.
    pub async fn process_detailed(&self, tx: &mut Transaction) -> TransactionResult<Digest> {
        let _timer = HistogramTimer::new(&TRANSACTION_DURATION);
        let result = self.processor.process(tx).await;
        self.record_transaction(tx, &result);
        result
    }

    /// As [`process_detailed`](Self::process_detailed), abandoning the
    /// consensus round when `cancel` becomes `true`.
    pub async fn process_cancellable(
        &self,
        tx: &mut Transaction,
        cancel: watch::Receiver<bool>,
    ) -> TransactionResult<Digest> {
        let _timer = HistogramTimer::new(&TRANSACTION_DURATION);
        let result = self.processor.process_cancellable(tx, cancel).await;
        self.record_transaction(tx, &result);
        result
    }

    /// Process every transfer concurrently; outcomes in input order.
    pub async fn process_batch(&self, txs: &mut [Transaction]) -> Vec<bool> {
        join_all(txs.iter_mut().map(|tx| self.process_transaction(tx))).await
    }

    fn record_transaction(&self, tx: &Transaction, result: &TransactionResult<Digest>) {
        metric_inc!(TRANSACTIONS, &[tx.status().as_str()]);

        let outcome = match result {
            Err(TransactionError::Consensus(ConsensusError::ConsensusFailed { .. })) => {
                Some("rejected")
            }
            Err(TransactionError::Consensus(ConsensusError::Cancelled)) => Some("cancelled"),
            _ if !tx.votes().is_empty() => Some("accepted"),
            _ => None,
        };
        if let Some(outcome) = outcome {
            metric_inc!(CONSENSUS_ROUNDS, &[outcome]);
        }

        log_tx_event!(debug, "transactions", "Transaction recorded", tx.id(), status = %tx.status());
    }

    /// Events published for every processed transfer.
    pub fn transaction_events(&self) -> Vec<TransactionProcessed> {
        self.events.events()
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    pub fn exchange_rate(&self) -> Amount {
        self.exchange_rate.current_value()
    }

    /// Units worth `usd` at the current rate.
    pub fn usd_to_pi(&self, usd: Amount) -> Amount {
        let rate = self.exchange_rate.current_value();
        if rate.is_zero() {
            return Decimal::ZERO;
        }
        usd / rate
    }
}

/// One `accepted` or failing-stage label per verified origin.
fn record_verification(result: &VerificationResult<()>) {
    let label = match result {
        Ok(()) => "accepted",
        Err(e) => e.stage(),
    };
    metric_inc!(VERIFICATION_RESULTS, &[label]);
}
