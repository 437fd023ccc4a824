//! Supply Ledger Service
//!
//! Mints signed coins against the fixed supply cap.

use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use shared_crypto::SignatureAuthority;
use shared_types::{
    current_timestamp_ms, total_supply, Amount, AnomalyOracle, Coin, CoinId, CoinRegistry,
    SourcePolicy, SupplyStatus, UnsignedCoin,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::ids::{CoinIdGenerator, RandomCoinIds};

/// Percentage of the requested amount kept when the anomaly detector flags
/// a mint request.
pub const ANOMALY_MITIGATION_FACTOR_PERCENT: i64 = 95;

/// Collaborators the ledger needs.
pub struct LedgerDependencies {
    pub authority: Arc<SignatureAuthority>,
    pub anomaly: Arc<dyn AnomalyOracle>,
    pub policy: SourcePolicy,
}

/// Supply Ledger
///
/// Owns the process-wide minted counter and the registry of issued coins.
pub struct SupplyLedger {
    authority: Arc<SignatureAuthority>,
    anomaly: Arc<dyn AnomalyOracle>,
    policy: SourcePolicy,
    ids: Box<dyn CoinIdGenerator>,
    cap: Amount,
    total_minted: Mutex<Amount>,
    coins: RwLock<HashMap<CoinId, Coin>>,
}

impl SupplyLedger {
    /// Create an empty ledger capped at `TOTAL_SUPPLY`.
    pub fn new(deps: LedgerDependencies) -> Self {
        Self {
            authority: deps.authority,
            anomaly: deps.anomaly,
            policy: deps.policy,
            ids: Box::new(RandomCoinIds),
            cap: total_supply(),
            total_minted: Mutex::new(Decimal::ZERO),
            coins: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the id generator (for testing).
    pub fn with_id_generator(mut self, ids: Box<dyn CoinIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Lower the cap (for testing cap behaviour without minting 10^11 units).
    pub fn with_cap(mut self, cap: Amount) -> Self {
        self.cap = cap;
        self
    }

    /// Mint `amount` units from `source`.
    ///
    /// # Errors
    /// - `InvalidSource` - source unknown, deny-listed or not allowed
    /// - `InvalidAmount` - amount is zero or negative
    /// - `SupplyCapExceeded` - nothing is minted and the total is unchanged
    pub fn mint(&self, amount: Amount, source: &str) -> LedgerResult<Coin> {
        let source = self.policy.check(source).map_err(|e| {
            tracing::warn!(source = %source, error = %e, "Mint rejected: invalid source");
            LedgerError::InvalidSource(e)
        })?;

        if amount <= Decimal::ZERO {
            tracing::warn!(amount = %amount, "Mint rejected: non-positive amount");
            return Err(LedgerError::InvalidAmount(amount));
        }

        let id = self.ids.next_id(&amount, source);

        let mut issued = amount;
        if self.anomaly.is_anomalous(&amount) {
            issued = amount
                .checked_mul(Decimal::new(ANOMALY_MITIGATION_FACTOR_PERCENT, 2))
                .ok_or_else(|| self.cap_exceeded(amount))?;
            tracing::warn!(
                coin_id = %id,
                requested = %amount,
                issued = %issued,
                "Anomalous mint request, applying mitigation"
            );
        }

        self.reserve(issued)?;

        let unsigned = UnsignedCoin {
            id,
            amount: issued,
            source,
            issued_at: current_timestamp_ms(),
        };
        let signature = self.authority.sign(&unsigned.message());
        let coin = unsigned.into_signed(signature);

        self.coins.write().insert(coin.id().to_string(), coin.clone());

        tracing::info!(
            coin_id = %coin.id(),
            amount = %coin.amount(),
            source = %coin.source(),
            "Coin minted"
        );
        Ok(coin)
    }

    /// Atomic check-and-add against the cap. A sum past `Decimal::MAX` is
    /// past the cap too.
    fn reserve(&self, amount: Amount) -> LedgerResult<()> {
        let mut total = self.total_minted.lock();
        let next = match total.checked_add(amount) {
            Some(next) if next <= self.cap => next,
            _ => {
                tracing::warn!(
                    current = %*total,
                    requested = %amount,
                    cap = %self.cap,
                    "Mint rejected: supply cap exceeded"
                );
                return Err(LedgerError::SupplyCapExceeded {
                    current: *total,
                    requested: amount,
                    cap: self.cap,
                });
            }
        };
        *total = next;
        Ok(())
    }

    fn cap_exceeded(&self, requested: Amount) -> LedgerError {
        tracing::warn!(requested = %requested, "Mint rejected: amount out of range");
        LedgerError::SupplyCapExceeded {
            current: self.total_minted(),
            requested,
            cap: self.cap,
        }
    }

    /// Total units minted so far.
    pub fn total_minted(&self) -> Amount {
        *self.total_minted.lock()
    }

    /// Supply cap enforced by this ledger.
    pub fn cap(&self) -> Amount {
        self.cap
    }

    /// Current / remaining / utilisation snapshot.
    pub fn status(&self) -> SupplyStatus {
        SupplyStatus::from_minted(self.total_minted(), self.cap)
    }

    /// Number of coins issued.
    pub fn coin_count(&self) -> usize {
        self.coins.read().len()
    }

    /// Check a coin's signature against the process public key.
    pub fn verify_coin(&self, coin: &Coin) -> bool {
        self.authority.verify_own(&coin.message(), coin.signature())
    }
}

impl CoinRegistry for SupplyLedger {
    fn coin(&self, id: &str) -> Option<Coin> {
        self.coins.read().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::SequentialCoinIds;
    use pc_01_anomaly_detection::{AnomalyConfig, AnomalyDetector};
    use shared_types::CoinSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedAnomaly {
        anomalous: bool,
        calls: AtomicUsize,
    }

    impl FixedAnomaly {
        fn new(anomalous: bool) -> Self {
            Self {
                anomalous,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AnomalyOracle for FixedAnomaly {
        fn is_anomalous(&self, _amount: &Amount) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.anomalous
        }

        fn observe(&self, _amount: &Amount) {}
    }

    fn ledger_with(anomaly: Arc<dyn AnomalyOracle>) -> SupplyLedger {
        SupplyLedger::new(LedgerDependencies {
            authority: Arc::new(SignatureAuthority::generate()),
            anomaly,
            policy: SourcePolicy::default(),
        })
        .with_id_generator(Box::new(SequentialCoinIds::new()))
    }

    fn test_ledger() -> SupplyLedger {
        ledger_with(Arc::new(AnomalyDetector::new(AnomalyConfig::default()).unwrap()))
    }

    #[test]
    fn test_mint_scenario_from_empty_ledger() {
        let ledger = test_ledger();
        let coin = ledger.mint(Decimal::from(10), "mining").unwrap();

        assert_eq!(coin.amount(), Decimal::from(10));
        assert_eq!(coin.source(), CoinSource::Mining);
        assert_eq!(coin.id(), "coin-00000001");

        let status = ledger.status();
        assert_eq!(status.current, Decimal::from(10));
        assert_eq!(status.remaining, Decimal::from(99_999_999_990u64));
        assert_eq!(status.utilization_percent, Decimal::new(1, 8));
    }

    #[test]
    fn test_mint_rejects_denied_source() {
        let ledger = test_ledger();
        let result = ledger.mint(Decimal::from(10), "exchange");

        assert!(matches!(result, Err(LedgerError::InvalidSource(_))));
        assert_eq!(ledger.total_minted(), Decimal::ZERO);
        assert_eq!(ledger.coin_count(), 0);
    }

    #[test]
    fn test_mint_rejects_non_positive_amount() {
        let ledger = test_ledger();
        assert!(matches!(
            ledger.mint(Decimal::ZERO, "mining"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            ledger.mint(Decimal::from(-5), "mining"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert_eq!(ledger.total_minted(), Decimal::ZERO);
    }

    #[test]
    fn test_source_checked_before_anomaly() {
        let anomaly = Arc::new(FixedAnomaly::new(false));
        let ledger = ledger_with(anomaly.clone());
        let _ = ledger.mint(Decimal::ONE, "illicit");

        assert_eq!(anomaly.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_anomalous_mint_is_reduced_by_five_percent() {
        let ledger = ledger_with(Arc::new(FixedAnomaly::new(true)));
        let coin = ledger.mint(Decimal::from(100), "rewards").unwrap();

        assert_eq!(coin.amount(), Decimal::from(95));
        assert_eq!(ledger.total_minted(), Decimal::from(95));
    }

    #[test]
    fn test_reduced_amount_is_checked_against_cap() {
        let ledger = ledger_with(Arc::new(FixedAnomaly::new(true))).with_cap(Decimal::from(96));

        // 100 requested, 95 issued, fits under a cap of 96
        assert!(ledger.mint(Decimal::from(100), "mining").is_ok());
    }

    #[test]
    fn test_cap_exceeded_leaves_total_unchanged() {
        let ledger = test_ledger().with_cap(Decimal::from(100));
        ledger.mint(Decimal::from(60), "mining").unwrap();

        let result = ledger.mint(Decimal::from(41), "mining");
        assert_eq!(
            result,
            Err(LedgerError::SupplyCapExceeded {
                current: Decimal::from(60),
                requested: Decimal::from(41),
                cap: Decimal::from(100),
            })
        );
        assert_eq!(ledger.total_minted(), Decimal::from(60));

        // Exactly reaching the cap is allowed
        ledger.mint(Decimal::from(40), "mining").unwrap();
        assert_eq!(ledger.status().remaining, Decimal::ZERO);
    }

    #[test]
    fn test_amount_near_decimal_max_is_cap_error() {
        let ledger = test_ledger();
        ledger.mint(Decimal::from(10), "mining").unwrap();

        let result = ledger.mint(Decimal::MAX, "mining");
        assert_eq!(
            result,
            Err(LedgerError::SupplyCapExceeded {
                current: Decimal::from(10),
                requested: Decimal::MAX,
                cap: total_supply(),
            })
        );
        assert_eq!(ledger.total_minted(), Decimal::from(10));
        assert_eq!(ledger.coin_count(), 1);
    }

    #[test]
    fn test_mitigated_decimal_max_is_cap_error() {
        let ledger = ledger_with(Arc::new(FixedAnomaly::new(true)));
        ledger.mint(Decimal::from(10), "mining").unwrap();

        assert!(matches!(
            ledger.mint(Decimal::MAX, "rewards"),
            Err(LedgerError::SupplyCapExceeded { .. })
        ));
        assert_eq!(ledger.total_minted(), Decimal::new(950, 2));
    }

    #[test]
    fn test_minted_coin_signature_verifies() {
        let ledger = test_ledger();
        let coin = ledger.mint(Decimal::new(25, 1), "p2p").unwrap();

        assert!(ledger.verify_coin(&coin));
        assert_eq!(ledger.coin(coin.id()), Some(coin.clone()));

        let tampered = UnsignedCoin {
            id: coin.id().to_string(),
            amount: Decimal::from(3),
            source: coin.source(),
            issued_at: coin.issued_at(),
        }
        .into_signed(coin.signature().to_vec());
        assert!(!ledger.verify_coin(&tampered));
    }

    #[test]
    fn test_foreign_signed_coin_is_not_authentic() {
        let ledger = test_ledger();
        let forger = SignatureAuthority::generate();
        let unsigned = UnsignedCoin {
            id: "forged-1".into(),
            amount: Decimal::from(1_000),
            source: CoinSource::Mining,
            issued_at: 0,
        };
        let signature = forger.sign(&unsigned.message());
        let forged = unsigned.into_signed(signature);

        assert!(forger.verify_own(&forged.message(), forged.signature()));
        assert!(!ledger.verify_coin(&forged));
        assert_eq!(ledger.coin(forged.id()), None);
        assert_eq!(ledger.total_minted(), Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_mints_never_exceed_cap() {
        let ledger = Arc::new(test_ledger().with_cap(Decimal::from(1_000)));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| ledger.mint(Decimal::from(7), "mining").is_ok())
                        .count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 142 * 7 = 994, the 143rd would cross 1000
        assert_eq!(accepted, 142);
        assert_eq!(ledger.total_minted(), Decimal::from(994));
        assert_eq!(ledger.coin_count(), 142);
    }
}
