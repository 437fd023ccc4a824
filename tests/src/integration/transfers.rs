//! # Transfer Flows
//!
//! Verification → consensus → broadcast through `PiNode`.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pc_05_transaction_processing::{Transaction, TransactionError, TransactionStatus};
    use rust_decimal::Decimal;
    use tokio::sync::watch;
    use tokio::time::Instant;

    use super::super::fixtures::{node, node_with_votes};

    #[tokio::test(start_paused = true)]
    async fn test_alternating_validators_complete_transfer() {
        let node = node();
        let mut tx = Transaction::new("alice", "bob", Decimal::from(3));

        let result = node.process_detailed(&mut tx).await;
        let confirmation = result.unwrap();

        assert_eq!(tx.status(), TransactionStatus::Completed);
        assert_eq!(tx.votes(), &[true, false, true]);
        assert_eq!(tx.confirmation(), Some(confirmation.as_str()));
        assert!(confirmation.starts_with("0x"));
        assert_eq!(confirmation.len(), 66);
    }

    #[tokio::test(start_paused = true)]
    async fn test_majority_decides() {
        let cases = [
            (vec![false, false, false], false),
            (vec![true, false, false], false),
            (vec![true, true, false], true),
            (vec![true, true, true], true),
        ];
        for (votes, expected) in cases {
            let node = node_with_votes(votes.clone());
            let mut tx = Transaction::new("alice", "bob", Decimal::ONE);

            assert_eq!(node.process_transaction(&mut tx).await, expected, "{votes:?}");
            assert_eq!(tx.votes(), votes.as_slice());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_source_never_reaches_consensus() {
        let node = node();
        let mut tx = Transaction::new("alice", "bob", Decimal::ONE).with_source("exchange");

        let result = node.process_detailed(&mut tx).await;
        assert!(matches!(result, Err(TransactionError::Verification(_))));
        assert_eq!(tx.status(), TransactionStatus::Failed);
        assert!(tx.votes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_order_and_concurrency() {
        let node = node_with_votes(vec![true, true, true]);
        let mut txs = vec![
            Transaction::new("a", "b", Decimal::ONE),
            Transaction::new("c", "d", Decimal::ONE).with_source("illicit"),
            Transaction::new("e", "f", Decimal::from(2)),
        ];

        let start = Instant::now();
        let results = node.process_batch(&mut txs).await;

        assert_eq!(results, vec![true, false, true]);
        assert_eq!(txs[1].status(), TransactionStatus::Failed);
        // One vote delay plus one broadcast latency, not three of each
        assert!(start.elapsed() < Duration::from_millis(60));
        assert_eq!(node.transaction_events().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_transfer_not_reprocessed() {
        let node = node();
        let mut tx = Transaction::new("alice", "bob", Decimal::ONE);
        assert!(node.process_transaction(&mut tx).await);

        let again = node.process_detailed(&mut tx).await;
        assert!(matches!(again, Err(TransactionError::AlreadyTerminal(_))));
        assert_eq!(tx.status(), TransactionStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_round() {
        let node = node();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let mut tx = Transaction::new("alice", "bob", Decimal::ONE);

        let (result, _) = tokio::join!(node.process_cancellable(&mut tx, cancel_rx), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            cancel_tx.send(true).unwrap();
        });

        assert!(matches!(result, Err(TransactionError::Consensus(_))));
        assert_eq!(tx.status(), TransactionStatus::Failed);
    }
}
