//! # Domain Layer
//!
//! Pure verification logic with no locking and no I/O.

pub mod classifier;
pub mod config;
pub mod entities;
pub mod errors;
pub mod features;
