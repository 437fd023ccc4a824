//! # Shared Types Crate
//!
//! Domain entities and narrow cross-subsystem ports for the Pi Coin core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the `Coin` record, origin sources and the
//!   supply constants are defined once, here.
//! - **Immutable issuance**: a `Coin` can only be produced by signing an
//!   `UnsignedCoin`; none of its fields can be mutated afterwards.
//! - **Injected collaborators**: process-wide state (ledger counter, keypair)
//!   is never a global; subsystems receive it through the ports in `ports`.

pub mod entities;
pub mod errors;
pub mod policy;
pub mod ports;

pub use entities::*;
pub use errors::*;
pub use policy::SourcePolicy;
pub use ports::{AnomalyOracle, CoinRegistry, ExchangeRateProvider};
