//! # Issuance Flows
//!
//! Ledger, signature authority and anomaly detector wired through `PiNode`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pc_01_anomaly_detection::{AnomalyConfig, AnomalyDetector};
    use pc_02_supply_ledger::{LedgerDependencies, LedgerError, SupplyLedger};
    use rust_decimal::Decimal;
    use shared_crypto::SignatureAuthority;
    use shared_types::{Amount, CoinSource, SourcePolicy};

    use super::super::fixtures::node;

    // =========================================================================
    // MINTING
    // =========================================================================

    #[test]
    fn test_mint_then_status() {
        let node = node();
        let coin = node.mint(Decimal::from(10), "mining").unwrap();

        assert_eq!(coin.amount(), Decimal::from(10));
        assert_eq!(coin.source(), CoinSource::Mining);
        assert!(!coin.signature().is_empty());

        let status = node.supply_status();
        assert_eq!(status.current, Decimal::from(10));
        assert_eq!(status.remaining, Decimal::from(99_999_999_990u64));
        assert_eq!(status.utilization_percent, Decimal::new(1, 8));
    }

    #[test]
    fn test_every_denied_source_rejected() {
        let node = node();
        for source in ["exchange", "illicit", "untrusted", "unknown-source"] {
            assert!(
                matches!(
                    node.mint(Decimal::ONE, source),
                    Err(LedgerError::InvalidSource(_))
                ),
                "{source} should be rejected"
            );
        }
        assert_eq!(node.supply_status().current, Decimal::ZERO);
    }

    #[test]
    fn test_coin_signature_verifies_against_node_key_only() {
        let node = node();
        let coin = node.mint(Decimal::new(25, 1), "rewards").unwrap();

        let other = SignatureAuthority::generate();
        assert!(node.verify_coin(&coin));
        assert!(!other.verify(&coin.message(), coin.signature(), &other.public_key()));
        assert!(other.verify(&coin.message(), coin.signature(), &node.public_key()));
    }

    #[test]
    fn test_warmed_up_detector_reduces_outlier_mint() {
        let node = node();
        let history: Vec<Amount> = (1..=100).map(Decimal::from).collect();
        node.record_history(&history);
        assert!(node.anomaly_warmed_up());

        let normal = node.mint(Decimal::from(50), "mining").unwrap();
        assert_eq!(normal.amount(), Decimal::from(50));

        let outlier = node.mint(Decimal::from(1_000_000), "mining").unwrap();
        assert_eq!(outlier.amount(), Decimal::from(950_000));
        assert_eq!(node.supply_status().current, Decimal::from(950_050));
    }

    #[test]
    fn test_cold_detector_never_reduces() {
        let node = node();
        node.record_history(&vec![Decimal::ONE; 99]);

        let coin = node.mint(Decimal::from(1_000_000), "p2p").unwrap();
        assert_eq!(coin.amount(), Decimal::from(1_000_000));
    }

    // =========================================================================
    // SUPPLY CAP UNDER CONTENTION
    // =========================================================================

    #[test]
    fn test_supply_cap_holds_across_threads() {
        let ledger = Arc::new(
            SupplyLedger::new(LedgerDependencies {
                authority: Arc::new(SignatureAuthority::generate()),
                anomaly: Arc::new(AnomalyDetector::new(AnomalyConfig::default()).unwrap()),
                policy: SourcePolicy::default(),
            })
            .with_cap(Decimal::from(500)),
        );

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    (0..10)
                        .filter(|_| ledger.mint(Decimal::from(9), "mining").is_ok())
                        .count()
                })
            })
            .collect();
        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 55 * 9 = 495
        assert_eq!(accepted, 55);
        assert_eq!(ledger.total_minted(), Decimal::from(495));
        assert!(ledger.total_minted() <= ledger.cap());
    }
}
