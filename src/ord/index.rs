//! # Resource ID Index
//!
//! Per-type sets of ORD IDs that were accepted while validating one batch.

use crate::ord::resource::ResourceType;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceIdIndex {
    ids: HashMap<ResourceType, HashSet<String>>,
    /// Effective policy level per package ORD ID
    pub package_policy_levels: HashMap<String, String>,
}

impl ResourceIdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an ORD ID, returning `false` when it was already known
    pub fn insert(&mut self, resource_type: ResourceType, ord_id: &str) -> bool {
        self.ids
            .entry(resource_type)
            .or_default()
            .insert(ord_id.to_string())
    }

    pub fn contains(&self, resource_type: ResourceType, ord_id: &str) -> bool {
        self.ids
            .get(&resource_type)
            .is_some_and(|ids| ids.contains(ord_id))
    }

    /// Forget an ORD ID so later reference checks no longer resolve it
    pub fn remove(&mut self, resource_type: ResourceType, ord_id: &str) -> bool {
        self.ids
            .get_mut(&resource_type)
            .is_some_and(|ids| ids.remove(ord_id))
    }

    pub fn ids(&self, resource_type: ResourceType) -> impl Iterator<Item = &str> {
        self.ids
            .get(&resource_type)
            .into_iter()
            .flat_map(|ids| ids.iter().map(String::as_str))
    }

    pub fn count(&self, resource_type: ResourceType) -> usize {
        self.ids.get(&resource_type).map_or(0, HashSet::len)
    }

    /// Union another index into this one; existing policy levels are kept
    pub fn merge(&mut self, other: ResourceIdIndex) {
        for (resource_type, ids) in other.ids {
            self.ids.entry(resource_type).or_default().extend(ids);
        }
        for (ord_id, level) in other.package_policy_levels {
            self.package_policy_levels.entry(ord_id).or_insert(level);
        }
    }
}
