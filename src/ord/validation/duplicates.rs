//! # Duplicate Detection
//!
//! A batch may restate the same resource from a system-instance and a
//! system-version document. Any other repeated ORD ID is a duplicate.
//!
//! Three forbidding sweeps each leave out one perspective and reject repeats
//! among the remaining documents. A final sweep over every document only
//! collects IDs. The ID sets of all sweeps are merged into one index.

use super::{Removals, ValidationIssue};
use crate::constants::ERROR_CODE_DUPLICATE_RESOURCE;
use crate::ord::index::ResourceIdIndex;
use crate::ord::model::{Document, OrdResource, Perspective};
use crate::ord::resource::ResourceType;
use std::collections::{HashMap, HashSet};

/// Whether an ORD ID first seen under `first` may appear again under `current`
pub fn is_duplicate_allowed(first: Perspective, current: Perspective) -> bool {
    matches!(
        (first, current),
        (Perspective::SystemInstance, Perspective::SystemVersion)
            | (Perspective::SystemVersion, Perspective::SystemInstance)
    )
}

pub(super) type Entry<'a> = (ResourceType, usize, &'a str);

fn push_entries<'a, T: OrdResource>(entries: &mut Vec<Entry<'a>>, items: &'a [T]) {
    entries.extend(items.iter().enumerate().filter_map(|(idx, item)| {
        item.ord_id()
            .filter(|id| !id.is_empty())
            .map(|id| (T::RESOURCE_TYPE, idx, id))
    }));
}

/// Every identifiable object of a document in declaration order
pub(super) fn entries(doc: &Document) -> Vec<Entry<'_>> {
    let mut entries = Vec::new();
    push_entries(&mut entries, &doc.vendors);
    push_entries(&mut entries, &doc.products);
    push_entries(&mut entries, &doc.packages);
    push_entries(&mut entries, &doc.consumption_bundles);
    push_entries(&mut entries, &doc.api_resources);
    push_entries(&mut entries, &doc.event_resources);
    push_entries(&mut entries, &doc.entity_types);
    push_entries(&mut entries, &doc.capabilities);
    push_entries(&mut entries, &doc.integration_dependencies);
    push_entries(&mut entries, &doc.data_products);
    push_entries(&mut entries, &doc.tombstones);
    entries
}

struct Sweep<'a> {
    removals: &'a mut Removals,
    issues: &'a mut Vec<ValidationIssue>,
    reported: &'a mut HashSet<String>,
}

impl Sweep<'_> {
    /// One pass over the documents, leaving out `skip` when given
    fn run(&mut self, documents: &[Document], skip: Option<Perspective>, forbid: bool) -> ResourceIdIndex {
        let mut index = ResourceIdIndex::new();
        let mut seen: HashMap<(ResourceType, &str), Vec<Perspective>> = HashMap::new();

        for (doc_idx, doc) in documents.iter().enumerate() {
            if skip == Some(doc.perspective) {
                continue;
            }
            for (resource_type, idx, ord_id) in entries(doc) {
                if self.removals.contains(doc_idx, resource_type, idx) {
                    continue;
                }

                let perspectives = seen.entry((resource_type, ord_id)).or_default();
                let duplicate = perspectives
                    .iter()
                    .any(|&first| !is_duplicate_allowed(first, doc.perspective));
                if forbid && duplicate {
                    self.removals.mark(doc_idx, resource_type, idx);
                    let description = format!(
                        "found duplicate {} with ord id {ord_id:?}",
                        resource_type.display_name()
                    );
                    if self.reported.insert(description.clone()) {
                        self.issues.push(ValidationIssue::error(
                            ord_id,
                            ERROR_CODE_DUPLICATE_RESOURCE,
                            description,
                        ));
                    }
                    continue;
                }

                perspectives.push(doc.perspective);
                index.insert(resource_type, ord_id);
            }
        }
        index
    }
}

/// Run all sweeps and return the merged ID index
pub(super) fn detect_duplicates(
    documents: &[Document],
    removals: &mut Removals,
    issues: &mut Vec<ValidationIssue>,
) -> ResourceIdIndex {
    let mut reported = HashSet::new();
    let mut sweep = Sweep {
        removals,
        issues,
        reported: &mut reported,
    };

    let mut index = ResourceIdIndex::new();
    for skip in [
        Perspective::SystemVersion,
        Perspective::SystemInstance,
        Perspective::Default,
    ] {
        index.merge(sweep.run(documents, Some(skip), true));
    }
    index.merge(sweep.run(documents, None, false));
    index
}
