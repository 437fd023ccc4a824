//! # Error Types
//!
//! Errors shared across subsystems.

use thiserror::Error;

/// Why an origin source was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The name is not one of the recognised sources.
    #[error("Unknown source: {0}")]
    Unknown(String),

    /// The source is explicitly deny-listed.
    #[error("Source is deny-listed: {0}")]
    Denied(String),

    /// The source is recognised but not on the allow-list.
    #[error("Source not allowed: {0}")]
    NotAllowed(String),
}
