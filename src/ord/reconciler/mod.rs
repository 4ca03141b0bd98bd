//! # Reconciler
//!
//! Converges the persisted ORD resources of every application onto what its
//! ORD providers currently serve.
//!
//! The reconciler:
//! - Pages through applications and opens one transaction per application
//! - Fetches documents from the application's ORD webhooks
//! - Validates and sanitizes the batch
//! - Upserts every resource type in dependency order
//! - Applies tombstones as deletions
//!
//! ## Reconciliation Flow
//!
//! 1. Hash the incoming resources and load the stored snapshot
//! 2. Validate (invalid objects are dropped, batch-fatal errors abort)
//! 3. Sanitize (URLs, inheritance, default entry points)
//! 4. Vendor → Product → Package → Bundle → API → Event → EntityType →
//!    Capability → IntegrationDependency → DataProduct → Tombstone
//! 5. Commit, or roll back and continue with the next application

pub mod processing;
pub mod services;
pub mod sync;
pub mod types;

// Re-export public API
pub use services::{
    is_not_found, ApiService, Application, ApplicationService, BundleLinks,
    BundleReferenceService, BundledResourceService, EventService, NotFoundError, Page,
    ReferenceObjectType, ResourceService, SpecService, Transaction, Transactioner, Upsert,
    Webhook, WebhookService,
};
pub use types::{Reconciler, ReconcilerError, Repositories, SyncSummary};
