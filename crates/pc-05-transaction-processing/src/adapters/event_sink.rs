//! In-memory event sink, the feed read by dashboards and tests.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::entities::TransactionStatus;
use crate::domain::events::TransactionProcessed;
use crate::ports::outbound::TransactionEventSink;

#[derive(Default)]
pub struct InMemoryEventSink {
    events: RwLock<Vec<TransactionProcessed>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransactionProcessed> {
        self.events.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    pub fn count_with_status(&self, status: TransactionStatus) -> usize {
        self.events.read().iter().filter(|e| e.status == status).count()
    }
}

#[async_trait]
impl TransactionEventSink for InMemoryEventSink {
    async fn publish(&self, event: TransactionProcessed) {
        self.events.write().push(event);
    }
}
