//! # Collaborators
//!
//! Interfaces the reconciler needs from the surrounding service: application
//! and webhook enumeration, the transaction boundary and per-type persistence.
//! Persistence is application scoped and keyed by internal ID.

use crate::ord::model::{ApiResource, EventResource, SpecInput, StoredResource};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub tenant_id: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Webhook {
    pub id: String,
    pub application_id: String,
    pub webhook_type: String,
    pub url: Option<String>,
    pub proxy_url: Option<String>,
}

/// One page of a cursor based listing
#[derive(Debug, Clone, Default)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Returned by a persistence collaborator when the addressed record does not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{resource} {id:?} not found")]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            id: id.into(),
        }
    }
}

/// Whether an error chain carries a `NotFoundError`
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.downcast_ref::<NotFoundError>().is_some())
}

#[async_trait]
pub trait ApplicationService: Send + Sync {
    async fn list_page(&self, page_size: usize, cursor: Option<&str>) -> Result<Page<Application>>;
}

#[async_trait]
pub trait WebhookService: Send + Sync {
    async fn list_for_application(&self, application_id: &str) -> Result<Vec<Webhook>>;
}

#[async_trait]
pub trait Transaction: Send {
    async fn commit(&mut self) -> Result<()>;

    /// No-op after a successful commit
    async fn rollback_unless_committed(&mut self) -> Result<()>;
}

#[async_trait]
pub trait Transactioner: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn Transaction>>;
}

/// Payload of a create or update call
pub struct Upsert<'a, I> {
    pub input: &'a I,
    /// Internal ID of the owning package, for package-scoped resources
    pub package_id: Option<&'a str>,
    /// Content hash stored with the record
    pub resource_hash: Option<&'a str>,
}

impl<I> Clone for Upsert<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Upsert<'_, I> {}

impl<I: fmt::Debug> fmt::Debug for Upsert<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upsert")
            .field("input", self.input)
            .field("package_id", &self.package_id)
            .field("resource_hash", &self.resource_hash)
            .finish()
    }
}

/// Persistence of one resource type
#[async_trait]
pub trait ResourceService<I: Sync>: Send + Sync {
    async fn list_by_application_id(&self, application_id: &str) -> Result<Vec<StoredResource>>;

    /// Returns the internal ID of the new record
    async fn create(&self, application_id: &str, resource: Upsert<'_, I>) -> Result<String>;

    async fn update(&self, id: &str, resource: Upsert<'_, I>) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Bundle membership changes sent with an API or event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleLinks {
    /// Bundle internal ID to default entry point (APIs only)
    pub default_target_urls: HashMap<String, String>,
    pub to_create: Vec<String>,
    pub to_delete: Vec<String>,
}

/// Persistence of APIs and events, which belong to consumption bundles
#[async_trait]
pub trait BundledResourceService<I: Sync>: Send + Sync {
    async fn list_by_application_id(&self, application_id: &str) -> Result<Vec<StoredResource>>;

    async fn create(
        &self,
        application_id: &str,
        resource: Upsert<'_, I>,
        bundles: &BundleLinks,
    ) -> Result<String>;

    async fn update(&self, id: &str, resource: Upsert<'_, I>, bundles: &BundleLinks) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Object types bundle references and specs can hang off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceObjectType {
    Api,
    Event,
}

impl ReferenceObjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceObjectType::Api => "api",
            ReferenceObjectType::Event => "event",
        }
    }
}

#[async_trait]
pub trait BundleReferenceService: Send + Sync {
    /// Internal IDs of the bundles an API or event currently belongs to
    async fn get_bundle_ids_for_object(
        &self,
        object_type: ReferenceObjectType,
        object_id: &str,
    ) -> Result<Vec<String>>;
}

#[async_trait]
pub trait SpecService: Send + Sync {
    async fn create_by_reference_object_id(
        &self,
        object_type: ReferenceObjectType,
        object_id: &str,
        spec: &SpecInput,
    ) -> Result<String>;

    async fn delete_by_reference_object_id(
        &self,
        object_type: ReferenceObjectType,
        object_id: &str,
    ) -> Result<()>;
}

pub type ApiService = dyn BundledResourceService<ApiResource>;
pub type EventService = dyn BundledResourceService<EventResource>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_not_found_is_detected_through_context() {
        let err = Err::<(), _>(NotFoundError::new("api", "42"))
            .context("Failed to delete api")
            .unwrap_err();
        assert!(is_not_found(&err));
        assert!(!is_not_found(&anyhow::anyhow!("connection reset")));
    }
}
