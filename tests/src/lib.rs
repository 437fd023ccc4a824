//! # Pi Coin Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (signing, batch verification)
//! └── src/integration/  # Cross-subsystem flows through PiNode
//!     ├── issuance.rs     # Ledger + authority + anomaly detector
//!     ├── verification.rs # Origin gate against minted coins
//!     └── transfers.rs    # Verification → consensus → broadcast
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pc-tests
//! cargo test -p pc-tests integration::transfers
//! cargo bench -p pc-tests
//! ```

#![allow(dead_code)]

pub mod integration;
