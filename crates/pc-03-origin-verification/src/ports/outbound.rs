//! Outbound ports required by the origin verifier.

use shared_types::Coin;

/// Signature stage backend.
pub trait SignatureCheck: Send + Sync {
    /// Whether the origin of `coin_id` carries a valid process signature.
    ///
    /// `registered` is the ledger record for `coin_id`, if any.
    fn verify_origin(&self, source: &str, coin_id: &str, registered: Option<&Coin>) -> bool;
}
