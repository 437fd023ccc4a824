//! # Node Configuration
//!
//! Unified configuration for all subsystems and the simulated collaborators.
//!
//! Every value has a default; `PI_*` environment variables override them.

use pc_01_anomaly_detection::{AnomalyConfig, AnomalyError};
use pc_03_origin_verification::{IntegrityMode, VerificationConfig};
use pc_04_consensus::{ConsensusConfig, ConsensusError};
use pi_telemetry::TelemetryConfig;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub anomaly: AnomalyConfig,
    pub consensus: ConsensusConfig,
    pub verification: VerificationConfig,
    pub broadcast: BroadcastConfig,
    pub telemetry: TelemetryConfig,
    /// Hex-encoded 32-byte Ed25519 seed. A fresh keypair is generated when unset.
    pub signing_seed: Option<String>,
}

/// Simulated broadcast endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastConfig {
    pub endpoint: String,
    /// Simulated network round trip.
    pub latency: Duration,
    /// When `false` every submission fails as unreachable.
    pub connected: bool,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            latency: Duration::from_millis(100),
            connected: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid anomaly configuration: {0}")]
    Anomaly(#[from] AnomalyError),

    #[error("Invalid consensus configuration: {0}")]
    Consensus(#[from] ConsensusError),
}

impl NodeConfig {
    /// Defaults overridden by `PI_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `PI_*` key.
    ///
    /// | Key | Field |
    /// |-----|-------|
    /// | `PI_ANOMALY_MIN_SAMPLES` | `anomaly.min_samples` |
    /// | `PI_ANOMALY_MAX_SAMPLES` | `anomaly.max_samples` (`0` keeps all) |
    /// | `PI_ANOMALY_THRESHOLD` | `anomaly.threshold` |
    /// | `PI_QUORUM_SIZE` | `consensus.quorum_size` |
    /// | `PI_VOTE_DELAY_MS` | both vote delay bounds |
    /// | `PI_VOTE_DELAY_MIN_MS` / `PI_VOTE_DELAY_MAX_MS` | one bound |
    /// | `PI_INTEGRITY_MODE` | `disabled`, `anchored` or `strict` |
    /// | `PI_MIN_TRAINING_SAMPLES` | `verification.min_training_samples` |
    /// | `PI_BROADCAST_ENDPOINT` | `broadcast.endpoint` |
    /// | `PI_BROADCAST_LATENCY_MS` | `broadcast.latency` |
    /// | `PI_BROADCAST_CONNECTED` | `broadcast.connected` |
    /// | `PI_SIGNING_SEED` | `signing_seed` |
    ///
    /// Telemetry keys go through [`TelemetryConfig::from_lookup`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = NodeConfig {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..NodeConfig::default()
        };

        if let Some(v) = parse(&lookup, "PI_ANOMALY_MIN_SAMPLES")? {
            config.anomaly.min_samples = v;
        }
        if let Some(v) = parse::<usize, _>(&lookup, "PI_ANOMALY_MAX_SAMPLES")? {
            config.anomaly.max_samples = (v > 0).then_some(v);
        }
        if let Some(v) = parse(&lookup, "PI_ANOMALY_THRESHOLD")? {
            config.anomaly.threshold = v;
        }

        if let Some(v) = parse(&lookup, "PI_QUORUM_SIZE")? {
            config.consensus.quorum_size = v;
        }
        if let Some(ms) = parse(&lookup, "PI_VOTE_DELAY_MS")? {
            config.consensus = config.consensus.with_fixed_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = parse(&lookup, "PI_VOTE_DELAY_MIN_MS")? {
            config.consensus.vote_delay_min = Duration::from_millis(ms);
        }
        if let Some(ms) = parse(&lookup, "PI_VOTE_DELAY_MAX_MS")? {
            config.consensus.vote_delay_max = Duration::from_millis(ms);
        }

        if let Some(mode) = lookup("PI_INTEGRITY_MODE") {
            config.verification.integrity = parse_integrity_mode(&mode)?;
        }
        if let Some(v) = parse(&lookup, "PI_MIN_TRAINING_SAMPLES")? {
            config.verification.min_training_samples = v;
        }

        if let Some(endpoint) = lookup("PI_BROADCAST_ENDPOINT") {
            config.broadcast.endpoint = endpoint;
        }
        if let Some(ms) = parse(&lookup, "PI_BROADCAST_LATENCY_MS")? {
            config.broadcast.latency = Duration::from_millis(ms);
        }
        if let Some(connected) = parse(&lookup, "PI_BROADCAST_CONNECTED")? {
            config.broadcast.connected = connected;
        }

        config.signing_seed = lookup("PI_SIGNING_SEED");
        Ok(config)
    }

    /// Reject configurations the subsystems cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.anomaly.validate()?;
        self.consensus.validate()?;
        Ok(())
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

fn parse_integrity_mode(value: &str) -> Result<IntegrityMode, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "disabled" | "off" => Ok(IntegrityMode::Disabled),
        "anchored" => Ok(IntegrityMode::Anchored {
            reject_unregistered: false,
        }),
        "strict" => Ok(IntegrityMode::Anchored {
            reject_unregistered: true,
        }),
        _ => Err(ConfigError::InvalidValue {
            key: "PI_INTEGRITY_MODE",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<NodeConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::from_lookup(move |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.anomaly.min_samples, 100);
        assert_eq!(config.consensus.quorum_size, 3);
        assert_eq!(config.consensus.vote_delay_min, Duration::from_millis(50));
        assert_eq!(config.consensus.vote_delay_max, Duration::from_millis(100));
        assert_eq!(config.broadcast.endpoint, "http://localhost:8545");
        assert!(config.signing_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PI_QUORUM_SIZE", "5"),
            ("PI_VOTE_DELAY_MS", "10"),
            ("PI_ANOMALY_MIN_SAMPLES", "20"),
            ("PI_ANOMALY_MAX_SAMPLES", "0"),
            ("PI_INTEGRITY_MODE", "strict"),
            ("PI_BROADCAST_CONNECTED", "false"),
            ("PI_BROADCAST_ENDPOINT", "http://rpc:8545"),
        ])
        .unwrap();

        assert_eq!(config.consensus.quorum_size, 5);
        assert_eq!(config.consensus.vote_delay_min, Duration::from_millis(10));
        assert_eq!(config.consensus.vote_delay_max, Duration::from_millis(10));
        assert_eq!(config.anomaly.min_samples, 20);
        assert_eq!(config.anomaly.max_samples, None);
        assert_eq!(
            config.verification.integrity,
            IntegrityMode::Anchored {
                reject_unregistered: true
            }
        );
        assert!(!config.broadcast.connected);
        assert_eq!(config.broadcast.endpoint, "http://rpc:8545");
    }

    #[test]
    fn test_telemetry_read_through_lookup() {
        let config = config_from(&[
            ("PI_LOG_LEVEL", "trace"),
            ("PI_JSON_LOGS", "true"),
            ("PI_SERVICE_NAME", "pi-test"),
        ])
        .unwrap();

        assert_eq!(config.telemetry.log_level, "trace");
        assert!(config.telemetry.json_logs);
        assert_eq!(config.telemetry.service_name, "pi-test");
    }

    #[test]
    fn test_unparseable_value() {
        assert_eq!(
            config_from(&[("PI_QUORUM_SIZE", "three")]).unwrap_err(),
            ConfigError::InvalidValue {
                key: "PI_QUORUM_SIZE",
                value: "three".into()
            }
        );
        assert!(config_from(&[("PI_INTEGRITY_MODE", "sometimes")]).is_err());
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let zero_quorum = config_from(&[("PI_QUORUM_SIZE", "0")]).unwrap();
        assert!(matches!(
            zero_quorum.validate(),
            Err(ConfigError::Consensus(ConsensusError::InvalidQuorum(0)))
        ));

        let inverted = config_from(&[("PI_VOTE_DELAY_MIN_MS", "500")]).unwrap();
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::Consensus(ConsensusError::InvalidDelayBounds { .. }))
        ));

        let zero_threshold = config_from(&[("PI_ANOMALY_THRESHOLD", "0")]).unwrap();
        assert!(matches!(
            zero_threshold.validate(),
            Err(ConfigError::Anomaly(AnomalyError::InvalidThreshold(_)))
        ));
    }
}
