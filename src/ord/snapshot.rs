//! # Persisted Snapshot
//!
//! Read-only view of what is already stored for one application, one
//! collection per resource type, with an ORD ID lookup built once per listing.

use crate::ord::model::StoredResource;
use crate::ord::resource::ResourceType;
use std::collections::HashMap;

/// Records of one resource type in listing order
#[derive(Debug, Clone, Default)]
pub struct StoredCollection {
    records: Vec<StoredResource>,
    by_ord_id: HashMap<String, usize>,
}

impl StoredCollection {
    pub fn new(records: Vec<StoredResource>) -> Self {
        let mut by_ord_id = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if let Some(ord_id) = &record.ord_id {
                by_ord_id.entry(ord_id.clone()).or_insert(i);
            }
        }
        Self { records, by_ord_id }
    }

    pub fn find_by_ord_id(&self, ord_id: &str) -> Option<&StoredResource> {
        self.by_ord_id.get(ord_id).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[StoredResource] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Snapshot of every persisted collection for one application
#[derive(Debug, Clone, Default)]
pub struct ResourcesFromDb {
    collections: HashMap<ResourceType, StoredCollection>,
}

impl ResourcesFromDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection of one resource type
    pub fn set(&mut self, resource_type: ResourceType, records: Vec<StoredResource>) {
        self.collections
            .insert(resource_type, StoredCollection::new(records));
    }

    pub fn collection(&self, resource_type: ResourceType) -> Option<&StoredCollection> {
        self.collections.get(&resource_type)
    }

    pub fn find(&self, resource_type: ResourceType, ord_id: &str) -> Option<&StoredResource> {
        self.collection(resource_type)
            .and_then(|collection| collection.find_by_ord_id(ord_id))
    }

    /// Hash stored with the record of the given ORD ID
    pub fn stored_hash(&self, resource_type: ResourceType, ord_id: &str) -> Option<&str> {
        self.find(resource_type, ord_id)
            .and_then(|record| record.resource_hash.as_deref())
    }
}
