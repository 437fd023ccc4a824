//! # Supply Ledger Subsystem (PC-02)
//!
//! Single source of truth for total minted units.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `0 <= total_minted <= TOTAL_SUPPLY` | `SupplyLedger::reserve` - check and add under one mutex guard |
//! | No partial increment on overflow | `reserve` returns before touching the counter |
//! | Every coin verifies against the process key | `mint` signs `{id}-{amount}-{source}` with the injected authority |
//! | Minted coins are permanent | the registry only ever inserts |
//!
//! ## Mint Pipeline
//!
//! ```text
//! source policy ──→ amount > 0 ──→ anomaly check (x0.95 if flagged)
//!                                        │
//!                                        ↓
//!                          reserve (atomic check-and-add)
//!                                        │
//!                                        ↓
//!                          sign ──→ register ──→ Coin
//! ```

pub mod domain;
pub mod service;

pub use domain::errors::{LedgerError, LedgerResult};
pub use domain::ids::{CoinIdGenerator, RandomCoinIds, SequentialCoinIds};
pub use service::{LedgerDependencies, SupplyLedger, ANOMALY_MITIGATION_FACTOR_PERCENT};
