//! Match-or-create upsert for resource types without bundle membership.

use super::SyncContext;
use crate::observability;
use crate::ord::hash::was_previously_accepted;
use crate::ord::model::OrdResource;
use crate::ord::reconciler::services::{ResourceService, Upsert};
use crate::ord::reconciler::types::{Reconciler, ReconcilerError};
use std::collections::HashSet;
use tracing::debug;

impl Reconciler {
    /// Update matched records, create the rest, then list the type again
    pub(super) async fn resync_resources<T>(
        &self,
        ctx: &mut SyncContext<'_>,
        service: &dyn ResourceService<T>,
        items: Vec<&T>,
    ) -> Result<(), ReconcilerError>
    where
        T: OrdResource + Sync,
    {
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
                    service
                        .update(&existing.id, upsert)
                        .await
                        .map_err(|e| ctx.persistence_error("update", resource_type, ord_id, e))?;
                    observability::record_resource_operation(resource_type.as_str(), "update");
                }
                None => {
                    let id = service
                        .create(ctx.app_id, upsert)
                        .await
                        .map_err(|e| ctx.persistence_error("create", resource_type, ord_id, e))?;
                    debug!(app_id = %ctx.app_id, ord_id = %ord_id, resource_type = %resource_type, "Created {}", id);
                    observability::record_resource_operation(resource_type.as_str(), "create");
                }
            }
        }

        let records = service.list_by_application_id(ctx.app_id).await;
        ctx.refresh(resource_type, records)
    }
}
