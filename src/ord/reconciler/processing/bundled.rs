//! Upsert of APIs and events: bundle membership and specifications follow the record.

use super::SyncContext;
use crate::observability;
use crate::ord::hash::was_previously_accepted;
use crate::ord::model::{ConsumptionBundleReference, OrdResource, ResourceDefinition, SpecInput};
use crate::ord::reconciler::services::{
    BundleLinks, BundledResourceService, ReferenceObjectType, Upsert,
};
use crate::ord::reconciler::types::{Reconciler, ReconcilerError};
use crate::ord::resource::ResourceType;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resources that belong to consumption bundles and carry definitions
pub(super) trait BundledResource: OrdResource + Sync {
    const OBJECT_TYPE: ReferenceObjectType;

    fn bundle_references(&self) -> &[ConsumptionBundleReference];

    fn version(&self) -> &str;

    fn definitions(&self) -> &[ResourceDefinition];

    /// Bundle internal ID to default entry point
    fn default_target_urls(&self, _ctx: &SyncContext<'_>) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Internal ID of a stored bundle
pub(super) fn bundle_id(ctx: &SyncContext<'_>, bundle_ord_id: &str) -> Option<String> {
    ctx.snapshot
        .find(ResourceType::ConsumptionBundle, bundle_ord_id)
        .map(|record| record.id.clone())
}

/// Stored bundle IDs of the references, in declaration order
fn bundle_ids(ctx: &SyncContext<'_>, references: &[ConsumptionBundleReference]) -> Vec<String> {
    let mut seen = HashSet::new();
    references
        .iter()
        .filter_map(|reference| bundle_id(ctx, &reference.bundle_ord_id))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Split the wanted bundle IDs against the current ones
pub(super) fn diff_bundle_ids(wanted: &[String], current: &[String]) -> (Vec<String>, Vec<String>) {
    let to_create = wanted
        .iter()
        .filter(|id| !current.contains(id))
        .cloned()
        .collect();
    let to_delete = current
        .iter()
        .filter(|id| !wanted.contains(id))
        .cloned()
        .collect();
    (to_create, to_delete)
}

impl Reconciler {
    pub(super) async fn resync_bundled<T: BundledResource>(
        &self,
        ctx: &mut SyncContext<'_>,
        service: &dyn BundledResourceService<T>,
        items: Vec<&T>,
    ) -> Result<(), ReconcilerError> {
        let resource_type = T::RESOURCE_TYPE;
        let mut handled: HashSet<&str> = HashSet::new();

        for item in items {
            let Some(ord_id) = item.ord_id().filter(|id| !id.is_empty()) else {
                continue;
            };
            if !handled.insert(ord_id) {
                debug!(app_id = %ctx.app_id, ord_id = %ord_id, resource_type = %resource_type, "Skipping restated resource, first occurrence already reconciled");
                continue;
            }
            let package_id = ctx.package_id(item.package_ord_id());
            let resource_hash = ctx.incoming_hash(resource_type, ord_id);
            let upsert = Upsert {
                input: item,
                package_id: package_id.as_deref(),
                resource_hash,
            };
            let wanted = bundle_ids(ctx, item.bundle_references());
            let specs: Vec<SpecInput> = item
                .definitions()
                .iter()
                .map(ResourceDefinition::to_spec)
                .collect();

            match ctx.existing(resource_type, ord_id) {
                Some(existing)
                    if was_previously_accepted(
                        ord_id,
                        resource_hash,
                        existing.resource_hash.as_deref(),
                    ) =>
                {
                    debug!(app_id = %ctx.app_id, ord_id = %ord_id, resource_type = %resource_type, "Skipping unchanged resource");
                }
                Some(existing) => {
                    let current = self
                        .repositories
                        .bundle_references
                        .get_bundle_ids_for_object(T::OBJECT_TYPE, &existing.id)
                        .await
                        .map_err(|e| {
                            ctx.persistence_error("list bundle references of", resource_type, ord_id, e)
                        })?;
                    let (to_create, to_delete) = diff_bundle_ids(&wanted, &current);
                    let links = BundleLinks {
                        default_target_urls: item.default_target_urls(ctx),
                        to_create,
                        to_delete,
                    };
                    service
                        .update(&existing.id, upsert, &links)
                        .await
                        .map_err(|e| ctx.persistence_error("update", resource_type, ord_id, e))?;
                    observability::record_resource_operation(resource_type.as_str(), "update");

                    if existing.version.as_deref() != Some(item.version()) {
                        debug!(
                            app_id = %ctx.app_id,
                            ord_id = %ord_id,
                            "Version changed from {:?} to {}, recreating specifications",
                            existing.version,
                            item.version()
                        );
                        self.recreate_specs(ctx, T::OBJECT_TYPE, resource_type, &existing.id, ord_id, &specs)
                            .await?;
                    }
                }
                None => {
                    let links = BundleLinks {
                        default_target_urls: item.default_target_urls(ctx),
                        to_create: wanted,
                        to_delete: Vec::new(),
                    };
                    let id = service
                        .create(ctx.app_id, upsert, &links)
                        .await
                        .map_err(|e| ctx.persistence_error("create", resource_type, ord_id, e))?;
                    observability::record_resource_operation(resource_type.as_str(), "create");
                    self.create_specs(ctx, T::OBJECT_TYPE, resource_type, &id, ord_id, &specs)
                        .await?;
                }
            }
        }

        let records = service.list_by_application_id(ctx.app_id).await;
        ctx.refresh(resource_type, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_diff_bundle_ids() {
        let (to_create, to_delete) = diff_bundle_ids(&ids(&["b1", "b2"]), &ids(&["b2", "b3"]));
        assert_eq!(to_create, ids(&["b1"]));
        assert_eq!(to_delete, ids(&["b3"]));

        let (to_create, to_delete) = diff_bundle_ids(&ids(&["b1"]), &ids(&["b1"]));
        assert!(to_create.is_empty());
        assert!(to_delete.is_empty());
    }
}
