//! # Shared Crypto - Signature Authority and Digests
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Process-wide issuance signing authority |
//! | `hashing` | SHA3-512, Keccak-256 | Coin ids, integrity digests, broadcast confirmations |
//!
//! ## Security Properties
//!
//! - **One keypair per process**: the authority is created once by the
//!   application root and shared by reference; signing never generates keys.
//! - **Ed25519**: deterministic nonces, no RNG dependency when signing.
//! - **Total verification**: malformed input makes `verify` return `false`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{integrity_digest, keccak256_hex, pi_digest, PI_ENTROPY};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, SignatureAuthority};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
