//! # Anomaly Detection Subsystem (PC-01)
//!
//! Stateful outlier classifier over a growing sample of historical amounts.
//!
//! ## Behaviour
//!
//! | Samples observed | `is_anomalous` |
//! |------------------|----------------|
//! | `< min_samples` (100) | always `false` (fails open) |
//! | `>= min_samples` | delegated to the fitted [`OutlierModel`] |
//!
//! The model is refitted on the accumulated sample every time a new amount
//! is observed once the warm-up threshold is reached. The default model is
//! a median/MAD robust z-score; any [`OutlierModel`] can be substituted
//! without touching call sites.
//!
//! ## Concurrency
//!
//! Sample and model live behind a single `parking_lot::RwLock`: `observe`
//! takes the write lock, `is_anomalous` the read lock.

pub mod domain;
pub mod service;

pub use domain::config::AnomalyConfig;
pub use domain::errors::AnomalyError;
pub use domain::model::{MadOutlierModel, OutlierModel};
pub use service::AnomalyDetector;
