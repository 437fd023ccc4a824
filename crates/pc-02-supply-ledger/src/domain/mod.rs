//! Domain layer for the supply ledger.

pub mod errors;
pub mod ids;
