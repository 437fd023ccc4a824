//! # Domain Layer
//!
//! Pure statistics, no locking and no I/O.

pub mod config;
pub mod errors;
pub mod model;
