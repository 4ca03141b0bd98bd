//! # Types
//!
//! Core types for the reconciler.

use super::services::{
    ApiService, ApplicationService, BundleReferenceService, EventService, ResourceService,
    SpecService, Transactioner, WebhookService,
};
use crate::config::AggregatorConfig;
use crate::ord::client::DocumentFetcher;
use crate::ord::model::{
    Capability, ConsumptionBundle, DataProduct, EntityType, IntegrationDependency, Package,
    Product, Tombstone, Vendor,
};
use crate::ord::resource::ResourceType;
use crate::ord::sanitizer::{SanitizeError, Sanitizer};
use crate::ord::validation::{ValidationError, Validator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("Failed to list applications (page {page}): {source}")]
    ListApplications {
        page: usize,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to list webhooks of application {app}: {source}")]
    ListWebhooks {
        app: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to fetch ORD documents from webhook {webhook} of application {app}: {source}")]
    FetchDocuments {
        webhook: String,
        app: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Invalid ORD documents: {0}")]
    InvalidDocuments(#[from] ValidationError),
    #[error("Failed to sanitize ORD documents: {0}")]
    Sanitize(#[from] SanitizeError),
    #[error("Failed to hash ORD resources: {0}")]
    Hash(#[from] serde_json::Error),
    #[error("Failed to list stored {resource_type} records of application {app}: {source}")]
    ListResources {
        resource_type: ResourceType,
        app: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to {operation} {resource_type} {ord_id:?} of application {app}: {source}")]
    Persistence {
        operation: &'static str,
        resource_type: ResourceType,
        ord_id: String,
        app: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Transaction failed for application {app}: {source}")]
    Transaction {
        app: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Tombstone {0:?} does not name a known resource type")]
    UnknownTombstoneType(String),
}

/// Per-type persistence collaborators
#[derive(Clone)]
pub struct Repositories {
    pub vendors: Arc<dyn ResourceService<Vendor>>,
    pub products: Arc<dyn ResourceService<Product>>,
    pub packages: Arc<dyn ResourceService<Package>>,
    pub bundles: Arc<dyn ResourceService<ConsumptionBundle>>,
    pub apis: Arc<ApiService>,
    pub events: Arc<EventService>,
    pub entity_types: Arc<dyn ResourceService<EntityType>>,
    pub capabilities: Arc<dyn ResourceService<Capability>>,
    pub integration_dependencies: Arc<dyn ResourceService<IntegrationDependency>>,
    pub data_products: Arc<dyn ResourceService<DataProduct>>,
    pub tombstones: Arc<dyn ResourceService<Tombstone>>,
    pub bundle_references: Arc<dyn BundleReferenceService>,
    pub specs: Arc<dyn SpecService>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Counts of one `sync_ord_documents` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub applications_processed: usize,
    pub applications_failed: usize,
    /// Set when the shutdown flag stopped the run early
    pub cancelled: bool,
}

#[derive(Clone)]
pub struct Reconciler {
    pub applications: Arc<dyn ApplicationService>,
    pub webhooks: Arc<dyn WebhookService>,
    pub transactioner: Arc<dyn Transactioner>,
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub repositories: Repositories,
    pub validator: Validator,
    pub sanitizer: Sanitizer,
    pub page_size: usize,
    /// Used when neither the provider nor the application names a base URL
    pub base_url: Option<String>,
    /// Used when a webhook carries no proxy URL of its own
    pub webhook_proxy_url: String,
    // Checked between applications, never mid-application
    pub shutdown: Arc<AtomicBool>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("validator", &self.validator)
            .field("page_size", &self.page_size)
            .field("shutdown", &self.shutdown.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    pub fn new(
        config: &AggregatorConfig,
        applications: Arc<dyn ApplicationService>,
        webhooks: Arc<dyn WebhookService>,
        transactioner: Arc<dyn Transactioner>,
        fetcher: Arc<dyn DocumentFetcher>,
        repositories: Repositories,
    ) -> Self {
        Self {
            applications,
            webhooks,
            transactioner,
            fetcher,
            repositories,
            validator: Validator::from_config(config),
            sanitizer: Sanitizer::new(),
            page_size: config.page_size,
            base_url: config.base_url.clone(),
            webhook_proxy_url: config.webhook_proxy_url.clone(),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that stops `sync_ord_documents` before the next application
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}
