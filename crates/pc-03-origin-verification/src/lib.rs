//! # Origin Verification Subsystem (PC-03)
//!
//! Multi-stage gate deciding whether a declared origin is acceptable.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): features, classifier, errors, configuration
//! - **Ports Layer** (`ports/`): inbound API and the signature check it depends on
//! - **Adapters Layer** (`adapters/`): signature check backed by the process authority
//! - **Service Layer** (`service.rs`): the ordered gate itself
//!
//! ## Stage Order
//!
//! ```text
//! 1. source policy ─→ 2. pattern classifier ─→ 3. hash integrity
//!                                                     │
//!                      5. signature ←─ 4. anomaly ←───┘
//! ```
//!
//! Stages short-circuit: once one rejects, no later stage runs. Later stages
//! talk to shared collaborators, so rejected input must never reach them.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::AuthoritySignatureCheck;
pub use domain::classifier::{CentroidClassifier, LabeledSample, PatternClassifier};
pub use domain::config::{IntegrityMode, VerificationConfig};
pub use domain::entities::VerificationRequest;
pub use domain::errors::{VerificationError, VerificationResult};
pub use domain::features::{domain_constant_correlation, VerificationFeatures};
pub use ports::inbound::OriginVerificationApi;
pub use ports::outbound::SignatureCheck;
pub use service::{OriginVerifier, VerifierDependencies};
