//! Prometheus metrics for the Pi Coin node.
//!
//! All metrics follow the naming convention: `pi_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // LEDGER METRICS
    // =========================================================================

    /// Coins issued
    pub static ref COINS_MINTED: Counter = Counter::new(
        "pi_ledger_coins_minted_total",
        "Total number of coins minted"
    ).expect("metric creation failed");

    /// Mint rejections by reason
    pub static ref MINT_REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("pi_ledger_mint_rejections_total", "Mint requests rejected"),
        &["reason"]  // reason: invalid_source/invalid_amount/supply_cap
    ).expect("metric creation failed");

    /// Units minted so far
    pub static ref SUPPLY_MINTED: Gauge = Gauge::new(
        "pi_ledger_supply_minted",
        "Total units minted against the supply cap"
    ).expect("metric creation failed");

    // =========================================================================
    // VERIFICATION METRICS
    // =========================================================================

    /// Origin verification outcomes
    pub static ref VERIFICATION_RESULTS: CounterVec = CounterVec::new(
        Opts::new("pi_verification_results_total", "Origin verification outcomes"),
        &["result"]  // result: accepted/source/pattern/integrity/anomaly/signature
    ).expect("metric creation failed");

    // =========================================================================
    // CONSENSUS AND TRANSACTION METRICS
    // =========================================================================

    /// Consensus rounds by outcome
    pub static ref CONSENSUS_ROUNDS: CounterVec = CounterVec::new(
        Opts::new("pi_consensus_rounds_total", "Total consensus rounds"),
        &["outcome"]  // outcome: accepted/rejected/cancelled
    ).expect("metric creation failed");

    /// Processed transfers by final status
    pub static ref TRANSACTIONS: CounterVec = CounterVec::new(
        Opts::new("pi_transactions_total", "Processed transactions"),
        &["status"]  // status: completed/failed
    ).expect("metric creation failed");

    /// End-to-end transfer processing time
    pub static ref TRANSACTION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "pi_transaction_duration_seconds",
            "Time spent processing a transaction"
        ).buckets(exponential_buckets(0.001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Ledger
        Box::new(COINS_MINTED.clone()),
        Box::new(MINT_REJECTIONS.clone()),
        Box::new(SUPPLY_MINTED.clone()),
        // Verification
        Box::new(VERIFICATION_RESULTS.clone()),
        // Consensus and transactions
        Box::new(CONSENSUS_ROUNDS.clone()),
        Box::new(TRANSACTIONS.clone()),
        Box::new(TRANSACTION_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
