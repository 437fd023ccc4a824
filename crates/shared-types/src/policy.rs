//! # Source Policy
//!
//! Read-only allow-list / deny-list of origin sources.

use serde::{Deserialize, Serialize};

use crate::entities::CoinSource;
use crate::errors::SourceError;

/// Sources refused regardless of the allow-list.
pub const DEFAULT_DENIED_SOURCES: [&str; 3] = ["exchange", "unknown", "illicit"];

/// Allow/deny lists consulted before any issuance or transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePolicy {
    allowed: Vec<CoinSource>,
    denied: Vec<String>,
}

impl SourcePolicy {
    /// Create a policy from explicit lists.
    pub fn new(allowed: Vec<CoinSource>, denied: Vec<String>) -> Self {
        Self { allowed, denied }
    }

    /// Allowed sources.
    pub fn allowed(&self) -> &[CoinSource] {
        &self.allowed
    }

    /// Denied source names.
    pub fn denied(&self) -> &[String] {
        &self.denied
    }

    /// Resolve a declared source name, applying the deny-list first.
    pub fn check(&self, source: &str) -> Result<CoinSource, SourceError> {
        if self.denied.iter().any(|d| d == source) {
            return Err(SourceError::Denied(source.to_string()));
        }
        let parsed: CoinSource = source.parse()?;
        if !self.allowed.contains(&parsed) {
            return Err(SourceError::NotAllowed(source.to_string()));
        }
        Ok(parsed)
    }

    /// Convenience predicate over [`SourcePolicy::check`].
    pub fn is_allowed(&self, source: &str) -> bool {
        self.check(source).is_ok()
    }
}

impl Default for SourcePolicy {
    fn default() -> Self {
        Self {
            allowed: CoinSource::ALL.to_vec(),
            denied: DEFAULT_DENIED_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
