//! # Validation
//!
//! Validates a batch of ORD documents fetched for one application and removes
//! every object that must not reach persistence.
//!
//! The pass runs in four stages:
//!
//! 1. **Base URL** - resolve the batch base URL (fatal on mismatch)
//! 2. **Structure** - per-object field rules, lenient for unchanged resources
//!    that were accepted before
//! 3. **Duplicates** - perspective-aware duplicate ORD ID sweeps
//! 4. **References** - package, bundle, vendor and product references
//!
//! Object-level problems are collected as [`ValidationIssue`]s and never abort
//! the batch. Removals are applied once at the end with a stable filter.

mod duplicates;
pub mod fields;
pub mod patterns;
mod references;
pub mod rules;

pub use duplicates::is_duplicate_allowed;

use crate::config::AggregatorConfig;
use crate::constants::{
    ERROR_CODE_BASE_URL_MISMATCH, ERROR_CODE_INVALID_RESOURCE, ERROR_CODE_UNSUPPORTED_ACCESS_STRATEGY,
    OPEN_ACCESS_STRATEGY,
};
use crate::ord::hash::{was_previously_accepted, ResourceHashes};
use crate::ord::index::ResourceIdIndex;
use crate::ord::model::{Document, OrdResource, ResourceDefinition};
use crate::ord::resource::ResourceType;
use crate::ord::snapshot::ResourcesFromDb;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One object-level finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub ord_id: String,
    pub severity: Severity,
    pub code: &'static str,
    pub description: String,
}

impl ValidationIssue {
    pub fn error(ord_id: impl Into<String>, code: &'static str, description: impl Into<String>) -> Self {
        Self {
            ord_id: ord_id.into(),
            severity: Severity::Error,
            code,
            description: description.into(),
        }
    }

    pub fn warning(ord_id: impl Into<String>, code: &'static str, description: impl Into<String>) -> Self {
        Self {
            ord_id: ord_id.into(),
            severity: Severity::Warning,
            code,
            description: description.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.ord_id, self.code, self.description
        )
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error-severity issues of one pass combined into a single error
#[derive(Debug, Clone, Error)]
#[error("{}", join_issues(.0))]
pub struct ValidationIssues(pub Vec<ValidationIssue>);

/// Batch-fatal validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no base URL configured and no document declares describedSystemInstance.baseUrl")]
    MissingBaseUrl,
    #[error("document base URL {found:?} does not match {expected:?}")]
    BaseUrlMismatch { found: String, expected: String },
}

impl ValidationError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingBaseUrl => None,
            ValidationError::BaseUrlMismatch { .. } => Some(ERROR_CODE_BASE_URL_MISMATCH),
        }
    }
}

/// Outcome of validating one batch
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub index: ResourceIdIndex,
    pub issues: Vec<ValidationIssue>,
    pub base_url: String,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Fold every error-severity issue into one combined error
    pub fn into_result(self) -> Result<Self, ValidationIssues> {
        let errors: Vec<ValidationIssue> = self.errors().cloned().collect();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ValidationIssues(errors))
        }
    }
}

/// Objects marked for removal, keyed by document index, type and position
#[derive(Debug, Default)]
pub(crate) struct Removals(HashSet<(usize, ResourceType, usize)>);

impl Removals {
    pub(crate) fn mark(&mut self, doc: usize, resource_type: ResourceType, idx: usize) {
        self.0.insert((doc, resource_type, idx));
    }

    pub(crate) fn contains(&self, doc: usize, resource_type: ResourceType, idx: usize) -> bool {
        self.0.contains(&(doc, resource_type, idx))
    }

    fn retain<T>(&self, doc: usize, resource_type: ResourceType, items: &mut Vec<T>) {
        let mut idx = 0;
        items.retain(|_| {
            let keep = !self.contains(doc, resource_type, idx);
            idx += 1;
            keep
        });
    }

    fn apply(&self, doc_idx: usize, doc: &mut Document) {
        self.retain(doc_idx, ResourceType::Vendor, &mut doc.vendors);
        self.retain(doc_idx, ResourceType::Product, &mut doc.products);
        self.retain(doc_idx, ResourceType::Package, &mut doc.packages);
        self.retain(doc_idx, ResourceType::ConsumptionBundle, &mut doc.consumption_bundles);
        self.retain(doc_idx, ResourceType::ApiResource, &mut doc.api_resources);
        self.retain(doc_idx, ResourceType::EventResource, &mut doc.event_resources);
        self.retain(doc_idx, ResourceType::EntityType, &mut doc.entity_types);
        self.retain(doc_idx, ResourceType::Capability, &mut doc.capabilities);
        self.retain(
            doc_idx,
            ResourceType::IntegrationDependency,
            &mut doc.integration_dependencies,
        );
        self.retain(doc_idx, ResourceType::DataProduct, &mut doc.data_products);
        self.retain(doc_idx, ResourceType::Tombstone, &mut doc.tombstones);
    }
}

/// Mutable state of one structural pass
struct StructurePass<'a> {
    resources_from_db: &'a ResourcesFromDb,
    resource_hashes: &'a ResourceHashes,
    removals: &'a mut Removals,
    issues: &'a mut Vec<ValidationIssue>,
}

impl StructurePass<'_> {
    fn check<T: OrdResource>(&mut self, doc_idx: usize, items: &[T], rule: impl Fn(&T) -> Vec<String>) {
        for (idx, item) in items.iter().enumerate() {
            let violations = rule(item);
            if violations.is_empty() {
                continue;
            }

            let ord_id = item.ord_id().unwrap_or_default();
            let accepted = was_previously_accepted(
                ord_id,
                self.resource_hashes.get(T::RESOURCE_TYPE, ord_id),
                self.resources_from_db.stored_hash(T::RESOURCE_TYPE, ord_id),
            );
            let resource_type = T::RESOURCE_TYPE;
            let name = resource_type.display_name();
            for violation in violations {
                let description = format!("{name} {ord_id:?}: {violation}");
                if accepted {
                    warn!(ord_id = %ord_id, resource_type = %resource_type, "{description}");
                    self.issues
                        .push(ValidationIssue::warning(ord_id, ERROR_CODE_INVALID_RESOURCE, description));
                } else {
                    self.issues
                        .push(ValidationIssue::error(ord_id, ERROR_CODE_INVALID_RESOURCE, description));
                }
            }
            if !accepted {
                self.removals.mark(doc_idx, T::RESOURCE_TYPE, idx);
            }
        }
    }
}

/// Validates ORD document batches
#[derive(Debug, Clone, Default)]
pub struct Validator {
    global_ord_ids: HashSet<String>,
    credential_mappings: HashMap<String, String>,
}

impl Validator {
    /// `global_ord_ids` are vendor and product ORD IDs known outside any batch
    pub fn new(
        global_ord_ids: impl IntoIterator<Item = String>,
        credential_mappings: HashMap<String, String>,
    ) -> Self {
        Self {
            global_ord_ids: global_ord_ids.into_iter().collect(),
            credential_mappings,
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(
            config.global_resource_ord_ids.iter().cloned(),
            config.credential_mappings.clone(),
        )
    }

    /// Validate a batch in place
    ///
    /// `base_url` is the externally configured base URL; pass an empty string to
    /// take it from the documents. Invalid objects are removed from `documents`.
    pub fn validate(
        &self,
        documents: &mut [Document],
        base_url: &str,
        resources_from_db: &ResourcesFromDb,
        resource_hashes: &ResourceHashes,
    ) -> Result<ValidationReport, ValidationError> {
        let base_url = resolve_base_url(documents, base_url)?;
        let package_policy_levels = package_policy_levels(documents);

        let mut removals = Removals::default();
        let mut issues = Vec::new();

        let mut pass = StructurePass {
            resources_from_db,
            resource_hashes,
            removals: &mut removals,
            issues: &mut issues,
        };
        for (doc_idx, doc) in documents.iter().enumerate() {
            let doc_policy = doc.policy_level.as_deref();
            let effective = |own: Option<&str>, package: Option<&str>| -> Option<String> {
                own.or_else(|| package.and_then(|p| package_policy_levels.get(p).map(String::as_str)))
                    .or(doc_policy)
                    .map(str::to_string)
            };

            pass.check(doc_idx, &doc.vendors, rules::validate_vendor);
            pass.check(doc_idx, &doc.products, rules::validate_product);
            pass.check(doc_idx, &doc.packages, |package| {
                rules::validate_package(package, doc_policy)
            });
            pass.check(doc_idx, &doc.consumption_bundles, rules::validate_bundle);
            pass.check(doc_idx, &doc.api_resources, |api| {
                let policy = effective(api.policy_level.as_deref(), api.ord_package_id.as_deref());
                rules::validate_api(api, policy.as_deref())
            });
            pass.check(doc_idx, &doc.event_resources, |event| {
                let policy = effective(event.policy_level.as_deref(), event.ord_package_id.as_deref());
                rules::validate_event(event, policy.as_deref())
            });
            pass.check(doc_idx, &doc.entity_types, |entity_type| {
                let policy = effective(
                    entity_type.policy_level.as_deref(),
                    entity_type.ord_package_id.as_deref(),
                );
                rules::validate_entity_type(entity_type, policy.as_deref())
            });
            pass.check(doc_idx, &doc.capabilities, rules::validate_capability);
            pass.check(
                doc_idx,
                &doc.integration_dependencies,
                rules::validate_integration_dependency,
            );
            pass.check(doc_idx, &doc.data_products, |data_product| {
                let policy = effective(
                    data_product.policy_level.as_deref(),
                    data_product.ord_package_id.as_deref(),
                );
                rules::validate_data_product(data_product, policy.as_deref())
            });
            pass.check(doc_idx, &doc.tombstones, rules::validate_tombstone);
        }

        self.check_access_strategies(documents, &removals, &mut issues);

        let mut index = duplicates::detect_duplicates(documents, &mut removals, &mut issues);
        index.package_policy_levels = package_policy_levels;

        references::check_references(
            documents,
            &mut index,
            &self.global_ord_ids,
            &mut removals,
            &mut issues,
        );

        for (doc_idx, doc) in documents.iter_mut().enumerate() {
            removals.apply(doc_idx, doc);
        }

        let report = ValidationReport {
            index,
            issues,
            base_url,
        };
        debug!(
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            "validated {} ORD document(s)",
            documents.len()
        );
        Ok(report)
    }

    /// Warn about definitions no configured strategy can fetch
    fn check_access_strategies(
        &self,
        documents: &[Document],
        removals: &Removals,
        issues: &mut Vec<ValidationIssue>,
    ) {
        for (doc_idx, doc) in documents.iter().enumerate() {
            for (idx, api) in doc.api_resources.iter().enumerate() {
                if !removals.contains(doc_idx, ResourceType::ApiResource, idx) {
                    self.warn_unsupported(api, &api.resource_definitions, issues);
                }
            }
            for (idx, event) in doc.event_resources.iter().enumerate() {
                if !removals.contains(doc_idx, ResourceType::EventResource, idx) {
                    self.warn_unsupported(event, &event.resource_definitions, issues);
                }
            }
            for (idx, capability) in doc.capabilities.iter().enumerate() {
                if !removals.contains(doc_idx, ResourceType::Capability, idx) {
                    self.warn_unsupported(capability, &capability.capability_definitions, issues);
                }
            }
        }
    }

    fn warn_unsupported<T: OrdResource>(
        &self,
        resource: &T,
        definitions: &[ResourceDefinition],
        issues: &mut Vec<ValidationIssue>,
    ) {
        let ord_id = resource.ord_id().unwrap_or_default();
        for definition in definitions {
            let supported = definition.access_strategies.iter().any(|strategy| {
                strategy.strategy_type == OPEN_ACCESS_STRATEGY
                    || self.credential_mappings.contains_key(&strategy.strategy_type)
            });
            if !supported {
                issues.push(ValidationIssue::warning(
                    ord_id,
                    ERROR_CODE_UNSUPPORTED_ACCESS_STRATEGY,
                    format!(
                        "{} {ord_id:?}: no supported access strategy for definition {:?}",
                        T::RESOURCE_TYPE.display_name(),
                        definition.url
                    ),
                ));
            }
        }
    }
}

/// Configured base URL first, then the first document that declares one
fn resolve_base_url(documents: &[Document], configured: &str) -> Result<String, ValidationError> {
    let resolved = if configured.is_empty() {
        documents
            .iter()
            .find_map(Document::declared_base_url)
            .ok_or(ValidationError::MissingBaseUrl)?
            .to_string()
    } else {
        configured.to_string()
    };

    let expected = resolved.trim_end_matches('/');
    for doc in documents {
        if let Some(found) = doc.declared_base_url() {
            if found.trim_end_matches('/') != expected {
                return Err(ValidationError::BaseUrlMismatch {
                    found: found.to_string(),
                    expected: resolved,
                });
            }
        }
    }
    Ok(resolved)
}

/// Effective policy level per package: its own, else its document's
fn package_policy_levels(documents: &[Document]) -> HashMap<String, String> {
    let mut levels = HashMap::new();
    for doc in documents {
        for package in &doc.packages {
            let level = package
                .policy_level
                .as_deref()
                .or(doc.policy_level.as_deref());
            if let Some(level) = level {
                levels
                    .entry(package.ord_id.clone())
                    .or_insert_with(|| level.to_string());
            }
        }
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ord::model::SystemInstance;

    fn doc_with_base(base_url: Option<&str>) -> Document {
        Document {
            described_system_instance: base_url.map(|url| SystemInstance {
                base_url: Some(url.to_string()),
                ..SystemInstance::default()
            }),
            ..Document::default()
        }
    }

    #[test]
    fn test_resolve_base_url_prefers_configured_value() {
        let docs = vec![doc_with_base(None)];
        assert_eq!(
            resolve_base_url(&docs, "https://acme.example.com").unwrap(),
            "https://acme.example.com"
        );
    }

    #[test]
    fn test_resolve_base_url_from_documents() {
        let docs = vec![doc_with_base(None), doc_with_base(Some("https://acme.example.com/"))];
        assert_eq!(resolve_base_url(&docs, "").unwrap(), "https://acme.example.com/");
    }

    #[test]
    fn test_missing_base_url_is_fatal() {
        assert_eq!(
            resolve_base_url(&[doc_with_base(None)], ""),
            Err(ValidationError::MissingBaseUrl)
        );
    }

    #[test]
    fn test_base_url_mismatch_is_fatal() {
        let docs = vec![
            doc_with_base(Some("https://acme.example.com")),
            doc_with_base(Some("https://other.example.com")),
        ];
        assert!(matches!(
            resolve_base_url(&docs, ""),
            Err(ValidationError::BaseUrlMismatch { .. })
        ));
    }

    #[test]
    fn test_removals_keep_relative_order() {
        let mut removals = Removals::default();
        removals.mark(0, ResourceType::Tombstone, 1);
        let mut items = vec!["a", "b", "c"];
        removals.retain(0, ResourceType::Tombstone, &mut items);
        assert_eq!(items, vec!["a", "c"]);
    }

    #[test]
    fn test_into_result_combines_errors() {
        let report = ValidationReport {
            issues: vec![
                ValidationIssue::error("a", ERROR_CODE_INVALID_RESOURCE, "first"),
                ValidationIssue::warning("b", ERROR_CODE_INVALID_RESOURCE, "ignored"),
                ValidationIssue::error("c", ERROR_CODE_INVALID_RESOURCE, "second"),
            ],
            ..ValidationReport::default()
        };
        let err = report.into_result().unwrap_err();
        assert_eq!(err.0.len(), 2);
        let message = err.to_string();
        assert!(message.contains("first") && message.contains("second"));
        assert!(!message.contains("ignored"));
    }
}
