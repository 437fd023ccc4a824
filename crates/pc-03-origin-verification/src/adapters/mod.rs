//! # Adapters Layer
//!
//! Implementations of the outbound ports.

pub mod signature;

pub use signature::AuthoritySignatureCheck;
