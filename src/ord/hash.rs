//! # Resource Hashes
//!
//! Content hashes of incoming resources. They are stored with each persisted
//! record and compared on the next pass to detect unchanged resources.

use crate::ord::model::{Document, OrdResource};
use crate::ord::resource::ResourceType;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

/// Content hashes of incoming resources, keyed by type and ORD ID
///
/// An ORD ID restated with different content has no hash, so it is never
/// treated as unchanged.
#[derive(Debug, Clone, Default)]
pub struct ResourceHashes {
    by_type: HashMap<ResourceType, HashMap<String, Option<String>>>,
}

impl ResourceHashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource_type: ResourceType, ord_id: &str, hash: String) {
        let entry = self
            .by_type
            .entry(resource_type)
            .or_default()
            .entry(ord_id.to_string())
            .or_insert_with(|| Some(hash.clone()));
        if entry.as_deref().is_some_and(|known| known != hash) {
            debug!(ord_id = %ord_id, resource_type = %resource_type, "restated with different content, dropping its hash");
            *entry = None;
        }
    }

    pub fn get(&self, resource_type: ResourceType, ord_id: &str) -> Option<&str> {
        self.by_type
            .get(&resource_type)?
            .get(ord_id)?
            .as_deref()
    }

    pub fn len(&self) -> usize {
        self.by_type.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// SHA-256 over the canonical JSON encoding of a resource
pub fn hash_resource<T: Serialize>(resource: &T) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(resource)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash every identifiable resource in the batch
///
/// Must run before validation and sanitization mutate the documents.
pub fn compute_resource_hashes(documents: &[Document]) -> Result<ResourceHashes, serde_json::Error> {
    let mut hashes = ResourceHashes::new();
    for doc in documents {
        insert_hashes(&mut hashes, &doc.vendors)?;
        insert_hashes(&mut hashes, &doc.products)?;
        insert_hashes(&mut hashes, &doc.packages)?;
        insert_hashes(&mut hashes, &doc.consumption_bundles)?;
        insert_hashes(&mut hashes, &doc.api_resources)?;
        insert_hashes(&mut hashes, &doc.event_resources)?;
        insert_hashes(&mut hashes, &doc.entity_types)?;
        insert_hashes(&mut hashes, &doc.capabilities)?;
        insert_hashes(&mut hashes, &doc.integration_dependencies)?;
        insert_hashes(&mut hashes, &doc.data_products)?;
        insert_hashes(&mut hashes, &doc.tombstones)?;
    }
    Ok(hashes)
}

fn insert_hashes<T: OrdResource>(
    hashes: &mut ResourceHashes,
    resources: &[T],
) -> Result<(), serde_json::Error> {
    for resource in resources {
        if let Some(ord_id) = resource.ord_id().filter(|id| !id.is_empty()) {
            hashes.insert(T::RESOURCE_TYPE, ord_id, hash_resource(resource)?);
        }
    }
    Ok(())
}

/// Whether a resource was accepted before and has not changed since
///
/// Both hashes must be present and equal.
pub fn was_previously_accepted(
    ord_id: &str,
    current_hash: Option<&str>,
    prior_hash: Option<&str>,
) -> bool {
    let accepted = matches!((current_hash, prior_hash), (Some(current), Some(prior)) if current == prior);
    if accepted {
        debug!(ord_id = %ord_id, "resource unchanged since last accepted version");
    }
    accepted
}
