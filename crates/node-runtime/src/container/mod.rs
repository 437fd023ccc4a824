//! # Node Container
//!
//! Configuration and the dependency-injected node.

pub mod config;
pub mod node;
