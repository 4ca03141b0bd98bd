//! Tombstones are stored like any other resource and then delete their target.

use super::SyncContext;
use crate::observability;
use crate::ord::model::Tombstone;
use crate::ord::reconciler::services::is_not_found;
use crate::ord::reconciler::types::{Reconciler, ReconcilerError};
use crate::ord::resource::ResourceType;
use tracing::{debug, info};

impl Reconciler {
    pub(super) async fn apply_tombstones(
        &self,
        ctx: &mut SyncContext<'_>,
        tombstones: Vec<&Tombstone>,
    ) -> Result<(), ReconcilerError> {
        self.resync_resources(ctx, self.repositories.tombstones.as_ref(), tombstones.clone())
            .await?;

        for tombstone in tombstones {
            let target = ResourceType::from_tombstone_ord_id(&tombstone.ord_id)
                .ok_or_else(|| ReconcilerError::UnknownTombstoneType(tombstone.ord_id.clone()))?;
            self.delete_tombstoned(ctx, target, &tombstone.ord_id).await?;
        }
        Ok(())
    }

    /// Delete the stored target of a tombstone; a missing target is not an error
    async fn delete_tombstoned(
        &self,
        ctx: &SyncContext<'_>,
        target: ResourceType,
        ord_id: &str,
    ) -> Result<(), ReconcilerError> {
        // Vendors and products are addressed by their ORD ID
        let id = match target {
            ResourceType::Vendor | ResourceType::Product => Some(ord_id.to_string()),
            _ => ctx.snapshot.find(target, ord_id).map(|record| record.id.clone()),
        };
        let Some(id) = id else {
            debug!(app_id = %ctx.app_id, ord_id = %ord_id, resource_type = %target, "Tombstoned resource is not stored");
            return Ok(());
        };

        let repositories = &self.repositories;
        let result = match target {
            ResourceType::Vendor => repositories.vendors.delete(&id).await,
            ResourceType::Product => repositories.products.delete(&id).await,
            ResourceType::Package => repositories.packages.delete(&id).await,
            ResourceType::ConsumptionBundle => repositories.bundles.delete(&id).await,
            ResourceType::ApiResource => repositories.apis.delete(&id).await,
            ResourceType::EventResource => repositories.events.delete(&id).await,
            ResourceType::EntityType => repositories.entity_types.delete(&id).await,
            ResourceType::Capability => repositories.capabilities.delete(&id).await,
            ResourceType::IntegrationDependency => {
                repositories.integration_dependencies.delete(&id).await
            }
            ResourceType::DataProduct => repositories.data_products.delete(&id).await,
            ResourceType::Tombstone => {
                return Err(ReconcilerError::UnknownTombstoneType(ord_id.to_string()))
            }
        };

        match result {
            Ok(()) => {
                info!(app_id = %ctx.app_id, ord_id = %ord_id, resource_type = %target, "Deleted tombstoned resource");
                observability::record_resource_operation(target.as_str(), "delete");
                Ok(())
            }
            Err(e) if is_not_found(&e) => {
                debug!(app_id = %ctx.app_id, ord_id = %ord_id, "Tombstoned resource already deleted");
                Ok(())
            }
            Err(e) => Err(ctx.persistence_error("delete", target, ord_id, e)),
        }
    }
}
