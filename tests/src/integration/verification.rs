//! # Origin Verification Flows
//!
//! The gate exercised against coins the same node minted.

#[cfg(test)]
mod tests {
    use pc_03_origin_verification::{LabeledSample, VerificationFeatures, VerificationRequest};
    use rust_decimal::Decimal;

    use super::super::fixtures::node;

    #[test]
    fn test_gate_scenarios() {
        let node = node();
        assert!(!node.verify_origin("exchange", "id1", Decimal::from(10), 1));
        assert!(node.verify_origin("mining", "id2", Decimal::ONE, 5));
    }

    #[test]
    fn test_registered_coin_integrity() {
        let node = node();
        let coin = node.mint(Decimal::from(12), "p2p").unwrap();

        assert!(node.verify_origin("p2p", coin.id(), Decimal::from(12), 1));
        // Equal value, different scale
        assert!(node.verify_origin("p2p", coin.id(), Decimal::new(1200, 2), 1));
        // Declared source or amount differs from what was issued
        assert!(!node.verify_origin("mining", coin.id(), Decimal::from(12), 1));
        assert!(!node.verify_origin("p2p", coin.id(), Decimal::from(13), 1));
    }

    #[test]
    fn test_batch_preserves_order() {
        let node = node();
        let coin = node.mint(Decimal::from(4), "mining").unwrap();

        let requests = vec![
            VerificationRequest::new("exchange", "a"),
            VerificationRequest::new("mining", coin.id()).with_amount(Decimal::from(4)),
            VerificationRequest::new("illicit", "b"),
            VerificationRequest::new("rewards", "c"),
            VerificationRequest::new("mining", coin.id()).with_amount(Decimal::from(5)),
        ];
        assert_eq!(
            node.batch_verify(&requests),
            vec![false, true, false, true, false]
        );
        assert!(node.batch_verify(&[]).is_empty());
    }

    #[test]
    fn test_trained_classifier_gates_patterns() {
        let node = node();

        let mut samples = Vec::new();
        for i in 1..=10 {
            let valid = VerificationFeatures::new(&Decimal::from(i), 1);
            let invalid = VerificationFeatures::new(&Decimal::from(10_000 + i), 500);
            samples.push(LabeledSample::new(valid, true));
            samples.push(LabeledSample::new(invalid, false));
        }
        assert!(node.train_classifier(&samples));

        assert!(node.verify_origin("mining", "small", Decimal::from(5), 1));
        assert!(!node.verify_origin("mining", "large", Decimal::from(10_005), 500));
    }

    #[test]
    fn test_small_training_batch_ignored() {
        let node = node();
        let features = VerificationFeatures::new(&Decimal::ONE, 1);
        let samples = vec![LabeledSample::new(features, false); 3];

        assert!(!node.train_classifier(&samples));
        assert!(node.verify_origin("mining", "id", Decimal::ONE, 1));
    }
}
