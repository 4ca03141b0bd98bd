use super::bundled::{bundle_id, BundledResource};
use super::SyncContext;
use crate::ord::model::{ApiResource, ConsumptionBundleReference, ResourceDefinition};
use crate::ord::reconciler::services::ReferenceObjectType;
use crate::ord::reconciler::types::{Reconciler, ReconcilerError};
use std::collections::HashMap;

/// Declared default entry point, or the only entry point when none was declared
fn default_entry_point<'a>(
    reference: &'a ConsumptionBundleReference,
    entry_points: &'a [String],
) -> Option<&'a str> {
    if !reference.default_target_url.is_empty() {
        return Some(reference.default_target_url.as_str());
    }
    match entry_points {
        [only] => Some(only.as_str()),
        _ => None,
    }
}

impl BundledResource for ApiResource {
    const OBJECT_TYPE: ReferenceObjectType = ReferenceObjectType::Api;

    fn bundle_references(&self) -> &[ConsumptionBundleReference] {
        self.part_of_consumption_bundles.as_deref().unwrap_or_default()
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn definitions(&self) -> &[ResourceDefinition] {
        &self.resource_definitions
    }

    fn default_target_urls(&self, ctx: &SyncContext<'_>) -> HashMap<String, String> {
        let entry_points = self.target_urls.as_deref().unwrap_or_default();
        self.bundle_references()
            .iter()
            .filter_map(|reference| {
                let url = default_entry_point(reference, entry_points)?;
                let id = bundle_id(ctx, &reference.bundle_ord_id)?;
                Some((id, url.to_string()))
            })
            .collect()
    }
}

impl Reconciler {
    pub(super) async fn resync_apis(
        &self,
        ctx: &mut SyncContext<'_>,
        apis: Vec<&ApiResource>,
    ) -> Result<(), ReconcilerError> {
        let service = self.repositories.apis.as_ref();
        self.resync_bundled(ctx, service, apis).await
    }
}
