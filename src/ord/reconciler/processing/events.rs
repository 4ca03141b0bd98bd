use super::bundled::BundledResource;
use super::SyncContext;
use crate::ord::model::{ConsumptionBundleReference, EventResource, ResourceDefinition};
use crate::ord::reconciler::services::ReferenceObjectType;
use crate::ord::reconciler::types::{Reconciler, ReconcilerError};

impl BundledResource for EventResource {
    const OBJECT_TYPE: ReferenceObjectType = ReferenceObjectType::Event;

    fn bundle_references(&self) -> &[ConsumptionBundleReference] {
        self.part_of_consumption_bundles.as_deref().unwrap_or_default()
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn definitions(&self) -> &[ResourceDefinition] {
        &self.resource_definitions
    }
}

impl Reconciler {
    pub(super) async fn resync_events(
        &self,
        ctx: &mut SyncContext<'_>,
        events: Vec<&EventResource>,
    ) -> Result<(), ReconcilerError> {
        let service = self.repositories.events.as_ref();
        self.resync_bundled(ctx, service, events).await
    }
}
