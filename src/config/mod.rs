//! # Configuration
//!
//! Aggregator settings loaded from environment variables.

pub mod aggregator;

pub use aggregator::*;
