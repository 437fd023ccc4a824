//! # External Collaborator Adapters
//!
//! Stand-ins for the pricing oracle and the RPC broadcast endpoint.

pub mod broadcast;
pub mod exchange_rate;

pub use broadcast::SimulatedBroadcaster;
pub use exchange_rate::FixedExchangeRate;
