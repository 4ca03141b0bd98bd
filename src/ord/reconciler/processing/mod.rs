//! # Document Processing
//!
//! Reconciles one application's validated and sanitized documents against
//! what is stored for it.
//!
//! - Hashes are computed and the stored snapshot is loaded before validation
//! - Types are processed in dependency order, vendors first, tombstones last
//! - Each type is listed again after processing so later types resolve
//!   records created moments ago

mod apis;
mod bundled;
mod events;
mod resources;
mod specs;
mod tombstones;

use super::types::{Reconciler, ReconcilerError};
use crate::observability;
use crate::ord::hash::{compute_resource_hashes, ResourceHashes};
use crate::ord::model::{Document, StoredResource};
use crate::ord::resource::ResourceType;
use crate::ord::snapshot::ResourcesFromDb;
use crate::ord::validation::{Severity, ValidationReport};
use tracing::{debug, info, warn};

/// State shared by the per-type passes of one application
pub(crate) struct SyncContext<'a> {
    pub app_id: &'a str,
    pub hashes: &'a ResourceHashes,
    pub snapshot: ResourcesFromDb,
}

impl<'a> SyncContext<'a> {
    pub fn existing(&self, resource_type: ResourceType, ord_id: &str) -> Option<StoredResource> {
        self.snapshot.find(resource_type, ord_id).cloned()
    }

    /// Internal ID of a stored package
    pub fn package_id(&self, package_ord_id: Option<&str>) -> Option<String> {
        let package_ord_id = package_ord_id?;
        self.snapshot
            .find(ResourceType::Package, package_ord_id)
            .map(|record| record.id.clone())
    }

    pub fn incoming_hash(&self, resource_type: ResourceType, ord_id: &str) -> Option<&'a str> {
        self.hashes.get(resource_type, ord_id)
    }

    pub fn refresh(
        &mut self,
        resource_type: ResourceType,
        records: anyhow::Result<Vec<StoredResource>>,
    ) -> Result<(), ReconcilerError> {
        let records = records.map_err(|source| ReconcilerError::ListResources {
            resource_type,
            app: self.app_id.to_string(),
            source,
        })?;
        debug!(
            app_id = %self.app_id,
            resource_type = %resource_type,
            "Loaded {} stored record(s)",
            records.len()
        );
        self.snapshot.set(resource_type, records);
        Ok(())
    }

    pub fn persistence_error(
        &self,
        operation: &'static str,
        resource_type: ResourceType,
        ord_id: &str,
        source: anyhow::Error,
    ) -> ReconcilerError {
        ReconcilerError::Persistence {
            operation,
            resource_type,
            ord_id: ord_id.to_string(),
            app: self.app_id.to_string(),
            source,
        }
    }
}

fn collect<'d, T>(documents: &'d [Document], field: impl Fn(&'d Document) -> &'d Vec<T>) -> Vec<&'d T> {
    documents.iter().flat_map(field).collect()
}

fn report_issues(app_id: &str, report: &ValidationReport) {
    for issue in &report.issues {
        warn!(
            app_id = %app_id,
            ord_id = %issue.ord_id,
            severity = %issue.severity,
            code = issue.code,
            "{}",
            issue.description
        );
    }
    observability::increment_validation_issues(Severity::Error.as_str(), report.errors().count());
    observability::increment_validation_issues(
        Severity::Warning.as_str(),
        report.warnings().count(),
    );
}

impl Reconciler {
    /// Validate, sanitize and persist the documents of one application
    ///
    /// `base_url` may be empty, in which case the documents must declare one.
    /// Object-level validation issues are logged and the remaining objects are
    /// reconciled; batch-fatal validation and sanitize errors abort.
    pub async fn process_documents(
        &self,
        app_id: &str,
        mut documents: Vec<Document>,
        base_url: &str,
        proxy_url: &str,
    ) -> Result<(), ReconcilerError> {
        let hashes = compute_resource_hashes(&documents)?;
        let snapshot = self.load_snapshot(app_id).await?;

        let report = self
            .validator
            .validate(&mut documents, base_url, &snapshot, &hashes)?;
        if !report.issues.is_empty() {
            report_issues(app_id, &report);
        }
        self.sanitizer
            .sanitize(&mut documents, &report.base_url, proxy_url)?;

        let mut ctx = SyncContext {
            app_id,
            hashes: &hashes,
            snapshot,
        };
        let repositories = &self.repositories;

        self.resync_resources(&mut ctx, repositories.vendors.as_ref(), collect(&documents, |d| &d.vendors))
            .await?;
        self.resync_resources(&mut ctx, repositories.products.as_ref(), collect(&documents, |d| &d.products))
            .await?;
        self.resync_resources(&mut ctx, repositories.packages.as_ref(), collect(&documents, |d| &d.packages))
            .await?;
        self.resync_resources(
            &mut ctx,
            repositories.bundles.as_ref(),
            collect(&documents, |d| &d.consumption_bundles),
        )
        .await?;
        self.resync_apis(&mut ctx, collect(&documents, |d| &d.api_resources))
            .await?;
        self.resync_events(&mut ctx, collect(&documents, |d| &d.event_resources))
            .await?;
        self.resync_resources(
            &mut ctx,
            repositories.entity_types.as_ref(),
            collect(&documents, |d| &d.entity_types),
        )
        .await?;
        self.resync_resources(
            &mut ctx,
            repositories.capabilities.as_ref(),
            collect(&documents, |d| &d.capabilities),
        )
        .await?;
        self.resync_resources(
            &mut ctx,
            repositories.integration_dependencies.as_ref(),
            collect(&documents, |d| &d.integration_dependencies),
        )
        .await?;
        self.resync_resources(
            &mut ctx,
            repositories.data_products.as_ref(),
            collect(&documents, |d| &d.data_products),
        )
        .await?;
        self.apply_tombstones(&mut ctx, collect(&documents, |d| &d.tombstones))
            .await?;

        info!(
            app_id = %app_id,
            "Reconciled {} ORD document(s) ({} validation issue(s))",
            documents.len(),
            report.issues.len()
        );
        Ok(())
    }

    /// Everything stored for the application, one collection per type
    async fn load_snapshot(&self, app_id: &str) -> Result<ResourcesFromDb, ReconcilerError> {
        let repositories = &self.repositories;
        let no_hashes = ResourceHashes::new();
        let mut ctx = SyncContext {
            app_id,
            hashes: &no_hashes,
            snapshot: ResourcesFromDb::new(),
        };

        ctx.refresh(ResourceType::Vendor, repositories.vendors.list_by_application_id(app_id).await)?;
        ctx.refresh(ResourceType::Product, repositories.products.list_by_application_id(app_id).await)?;
        ctx.refresh(ResourceType::Package, repositories.packages.list_by_application_id(app_id).await)?;
        ctx.refresh(
            ResourceType::ConsumptionBundle,
            repositories.bundles.list_by_application_id(app_id).await,
        )?;
        ctx.refresh(ResourceType::ApiResource, repositories.apis.list_by_application_id(app_id).await)?;
        ctx.refresh(
            ResourceType::EventResource,
            repositories.events.list_by_application_id(app_id).await,
        )?;
        ctx.refresh(
            ResourceType::EntityType,
            repositories.entity_types.list_by_application_id(app_id).await,
        )?;
        ctx.refresh(
            ResourceType::Capability,
            repositories.capabilities.list_by_application_id(app_id).await,
        )?;
        ctx.refresh(
            ResourceType::IntegrationDependency,
            repositories.integration_dependencies.list_by_application_id(app_id).await,
        )?;
        ctx.refresh(
            ResourceType::DataProduct,
            repositories.data_products.list_by_application_id(app_id).await,
        )?;
        ctx.refresh(
            ResourceType::Tombstone,
            repositories.tombstones.list_by_application_id(app_id).await,
        )?;

        Ok(ctx.snapshot)
    }
}
