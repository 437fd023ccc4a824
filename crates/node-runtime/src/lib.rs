//! # Pi Node
//!
//! Application root of the Pi Coin core. The library exposes the node for
//! integration tests; `main.rs` runs a demonstration.
//!
//! ## Ownership
//!
//! The process keypair, the supply counter and the anomaly history are
//! created exactly once here and handed to subsystems as `Arc`s. No
//! subsystem holds global state of its own.
//!
//! ```text
//!             ┌──────────────── PiNode ────────────────┐
//!  mint ────→ │ AnomalyDetector → SupplyLedger → Sig.  │
//!  transfer → │ OriginVerifier → Consensus → Broadcast │
//!             └────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod container;

pub use adapters::{FixedExchangeRate, SimulatedBroadcaster};
pub use container::config::{BroadcastConfig, ConfigError, NodeConfig};
pub use container::node::{Collaborators, NodeError, PiNode};
