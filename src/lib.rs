//! ORD Aggregator Library
//!
//! Fetches Open Resource Discovery documents from application webhooks,
//! validates and sanitizes them, and reconciles them against the catalog
//! persisted for each application.
//!
//! Persistence, application enumeration and transactions are supplied by the
//! embedding service through the traits in [`ord::reconciler::services`].

pub mod config;
pub mod constants;
pub mod observability;
pub mod ord;

pub use config::AggregatorConfig;
pub use ord::reconciler::{Reconciler, ReconcilerError, SyncSummary};
