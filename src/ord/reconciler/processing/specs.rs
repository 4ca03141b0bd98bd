//! Specifications stored for APIs and events.

use super::SyncContext;
use crate::observability;
use crate::ord::model::SpecInput;
use crate::ord::reconciler::services::ReferenceObjectType;
use crate::ord::reconciler::types::{Reconciler, ReconcilerError};
use crate::ord::resource::ResourceType;
use tracing::debug;

impl Reconciler {
    pub(super) async fn create_specs(
        &self,
        ctx: &SyncContext<'_>,
        object_type: ReferenceObjectType,
        resource_type: ResourceType,
        object_id: &str,
        ord_id: &str,
        specs: &[SpecInput],
    ) -> Result<(), ReconcilerError> {
        for spec in specs {
            self.repositories
                .specs
                .create_by_reference_object_id(object_type, object_id, spec)
                .await
                .map_err(|e| ctx.persistence_error("create specification of", resource_type, ord_id, e))?;
            observability::record_resource_operation("spec", "create");
        }
        debug!(ord_id = %ord_id, "Created {} specification(s)", specs.len());
        Ok(())
    }

    /// Drop every stored specification of the object and create the given ones
    pub(super) async fn recreate_specs(
        &self,
        ctx: &SyncContext<'_>,
        object_type: ReferenceObjectType,
        resource_type: ResourceType,
        object_id: &str,
        ord_id: &str,
        specs: &[SpecInput],
    ) -> Result<(), ReconcilerError> {
        self.repositories
            .specs
            .delete_by_reference_object_id(object_type, object_id)
            .await
            .map_err(|e| ctx.persistence_error("delete specifications of", resource_type, ord_id, e))?;
        observability::record_resource_operation("spec", "delete");
        self.create_specs(ctx, object_type, resource_type, object_id, ord_id, specs)
            .await
    }
}
