//! # Transaction Processing Subsystem (PC-05)
//!
//! Drives a single transfer through verification, consensus and broadcast,
//! owning its status.
//!
//! ## State Machine
//!
//! ```text
//! [Pending] ──verify ok──→ [Verified] ──majority + broadcast──→ [Completed]
//!     │                        │
//!     └──rejected──→ [Failed] ←┘ no majority / broadcast error
//! ```
//!
//! `Completed` and `Failed` are terminal. Status never regresses.
//!
//! ## Batch Semantics
//!
//! `process_batch` runs every transfer concurrently as an independent state
//! machine and reports outcomes in input order.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryEventSink;
pub use domain::entities::{Transaction, TransactionStatus, DEFAULT_TRANSFER_SOURCE};
pub use domain::errors::{BroadcastError, TransactionError, TransactionResult};
pub use domain::events::TransactionProcessed;
pub use ports::inbound::TransactionProcessingApi;
pub use ports::outbound::{BroadcastEndpoint, TransactionEventSink};
pub use service::{TransactionDependencies, TransactionProcessor};
