//! # Reference Validation
//!
//! Cross-object references must resolve inside the batch (or, for vendors and
//! products, against the globally known ORD IDs). Objects with unresolved
//! references are removed. An ID leaves the index once no copy of it remains,
//! so checks that run later also drop the objects that depended on it.

use super::duplicates::entries;
use super::{Removals, ValidationIssue};
use crate::constants::ERROR_CODE_UNKNOWN_REFERENCE;
use crate::ord::index::ResourceIdIndex;
use crate::ord::model::{ConsumptionBundleReference, Document, OrdResource};
use crate::ord::resource::ResourceType;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

struct ReferencePass<'a> {
    documents: &'a [Document],
    index: &'a mut ResourceIdIndex,
    global_ord_ids: &'a HashSet<String>,
    removals: &'a mut Removals,
    issues: &'a mut Vec<ValidationIssue>,
}

impl ReferencePass<'_> {
    fn is_known(&self, resource_type: ResourceType, ord_id: &str) -> bool {
        self.index.contains(resource_type, ord_id)
    }

    fn is_known_or_global(&self, resource_type: ResourceType, ord_id: &str) -> bool {
        self.is_known(resource_type, ord_id) || self.global_ord_ids.contains(ord_id)
    }

    /// Whether a restated copy of the object is still kept in any document
    fn has_remaining_copy(&self, resource_type: ResourceType, ord_id: &str) -> bool {
        self.documents.iter().enumerate().any(|(doc_idx, doc)| {
            entries(doc).into_iter().any(|(entry_type, idx, entry_id)| {
                entry_type == resource_type
                    && entry_id == ord_id
                    && !self.removals.contains(doc_idx, resource_type, idx)
            })
        })
    }

    /// Apply `unresolved` to every remaining object; a returned message removes the object
    fn check<T: OrdResource>(
        &mut self,
        doc_idx: usize,
        items: &[T],
        unresolved: impl Fn(&Self, &T) -> Option<String>,
    ) {
        let resource_type = T::RESOURCE_TYPE;
        for (idx, item) in items.iter().enumerate() {
            if self.removals.contains(doc_idx, resource_type, idx) {
                continue;
            }
            let Some(reason) = unresolved(self, item) else {
                continue;
            };

            let ord_id = item.ord_id().unwrap_or_default();
            debug!(ord_id = %ord_id, resource_type = %resource_type, "dropping object with unresolved reference");
            self.issues.push(ValidationIssue::error(
                ord_id,
                ERROR_CODE_UNKNOWN_REFERENCE,
                format!("{} {ord_id:?}: {reason}", resource_type.display_name()),
            ));
            self.removals.mark(doc_idx, resource_type, idx);
            if !self.has_remaining_copy(resource_type, ord_id) {
                self.index.remove(resource_type, ord_id);
            }
        }
    }

    fn package(&self, package_ord_id: Option<&str>) -> Option<String> {
        let package = package_ord_id.unwrap_or_default();
        (!self.is_known(ResourceType::Package, package))
            .then(|| format!("references unknown package {package:?}"))
    }

    fn products(&self, products: Option<&Value>) -> Option<String> {
        string_values(products)
            .find(|product| !self.is_known_or_global(ResourceType::Product, product))
            .map(|product| format!("references unknown product {product:?}"))
    }

    fn bundles(&self, references: Option<&[ConsumptionBundleReference]>) -> Option<String> {
        references
            .unwrap_or_default()
            .iter()
            .find(|r| !self.is_known(ResourceType::ConsumptionBundle, &r.bundle_ord_id))
            .map(|r| format!("references unknown bundle {:?}", r.bundle_ord_id))
    }
}

fn string_values(value: Option<&Value>) -> impl Iterator<Item = &str> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

/// Check references in dependency order: vendors, products, packages, bundles
pub(super) fn check_references(
    documents: &[Document],
    index: &mut ResourceIdIndex,
    global_ord_ids: &HashSet<String>,
    removals: &mut Removals,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut pass = ReferencePass {
        documents,
        index,
        global_ord_ids,
        removals,
        issues,
    };

    for (doc_idx, doc) in documents.iter().enumerate() {
        pass.check(doc_idx, &doc.products, |pass, product| {
            (!pass.is_known_or_global(ResourceType::Vendor, &product.vendor))
                .then(|| format!("references unknown vendor {:?}", product.vendor))
        });
    }

    for (doc_idx, doc) in documents.iter().enumerate() {
        pass.check(doc_idx, &doc.packages, |pass, package| {
            if let Some(vendor) = package.vendor.as_deref() {
                if !pass.is_known_or_global(ResourceType::Vendor, vendor) {
                    return Some(format!("references unknown vendor {vendor:?}"));
                }
            }
            pass.products(package.part_of_products.as_ref())
        });
    }

    for (doc_idx, doc) in documents.iter().enumerate() {
        pass.check(doc_idx, &doc.api_resources, |pass, api| {
            pass.package(api.ord_package_id.as_deref())
        });
        pass.check(doc_idx, &doc.event_resources, |pass, event| {
            pass.package(event.ord_package_id.as_deref())
        });
        pass.check(doc_idx, &doc.entity_types, |pass, entity_type| {
            pass.package(entity_type.ord_package_id.as_deref())
        });
        pass.check(doc_idx, &doc.capabilities, |pass, capability| {
            pass.package(capability.ord_package_id.as_deref())
        });
        pass.check(doc_idx, &doc.integration_dependencies, |pass, dependency| {
            pass.package(dependency.ord_package_id.as_deref())
        });
        pass.check(doc_idx, &doc.data_products, |pass, data_product| {
            pass.package(data_product.ord_package_id.as_deref())
        });
    }

    for (doc_idx, doc) in documents.iter().enumerate() {
        pass.check(doc_idx, &doc.api_resources, |pass, api| {
            pass.bundles(api.part_of_consumption_bundles.as_deref())
        });
        pass.check(doc_idx, &doc.event_resources, |pass, event| {
            pass.bundles(event.part_of_consumption_bundles.as_deref())
        });
    }

    for (doc_idx, doc) in documents.iter().enumerate() {
        pass.check(doc_idx, &doc.api_resources, |pass, api| {
            pass.products(api.part_of_products.as_ref())
        });
        pass.check(doc_idx, &doc.event_resources, |pass, event| {
            pass.products(event.part_of_products.as_ref())
        });
        pass.check(doc_idx, &doc.entity_types, |pass, entity_type| {
            pass.products(entity_type.part_of_products.as_ref())
        });
    }
}
