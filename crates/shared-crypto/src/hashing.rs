//! # Digests
//!
//! - `pi_digest`: SHA3-512 over the input followed by the leading digits of
//!   pi. Used for coin ids, transfer ids and integrity digests.
//! - `keccak256_hex`: Keccak-256, used for broadcast confirmation digests.

use sha3::{Digest, Keccak256, Sha3_512};

/// Leading digits of pi appended to every pi digest input.
pub const PI_ENTROPY: &str = "3.141592653589793";

/// SHA3-512 of `data || PI_ENTROPY`, hex encoded.
pub fn pi_digest(data: &str) -> String {
    let mut hasher = Sha3_512::new();
    hasher.update(data.as_bytes());
    hasher.update(PI_ENTROPY.as_bytes());
    hex::encode(hasher.finalize())
}

/// Integrity digest binding a declared source, an id and an amount.
///
/// `amount` must already be in canonical form so that equal values
/// produce equal digests.
pub fn integrity_digest(source: &str, coin_id: &str, amount: &str) -> String {
    pi_digest(&format!("{}-{}-{}", source, coin_id, amount))
}

/// Keccak-256 of `data`, hex encoded with a `0x` prefix.
pub fn keccak256_hex(data: &[u8]) -> String {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    format!("0x{}", hex::encode(hasher.finalize()))
}
