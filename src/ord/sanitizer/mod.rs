//! # Sanitizer
//!
//! Normalizes validated documents before they are reconciled:
//!
//! - relative URLs are joined onto the base URL's path (proxy base first,
//!   webhook base otherwise; API entry points always use the webhook base)
//! - resources without a policy level take the document's
//! - package attributes are merged into the package's resources
//! - APIs with several entry points get a default entry point per bundle
//!
//! Runs strictly after validation, which guarantees that package references
//! resolve. A missing package is therefore reported as a hard error.

mod inheritance;
mod urls;

pub use inheritance::{merge_labels, merge_string_arrays};
pub use urls::{is_absolute_url, UrlRewriter};

use crate::ord::model::{ConsumptionBundleReference, Document, Package, ResourceDefinition};
use crate::ord::resource::ResourceType;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    #[error("{resource_type} {ord_id:?} references unknown package {package:?}")]
    UnknownPackage {
        resource_type: ResourceType,
        ord_id: String,
        package: String,
    },
    #[error("error while merging {field} for {ord_id:?}: {reason}")]
    Merge {
        field: &'static str,
        ord_id: String,
        reason: String,
    },
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Merge one inherited attribute into a resource field
fn inherit(
    field: &'static str,
    ord_id: &str,
    package_value: Option<&Value>,
    own: &mut Option<Value>,
    merge: fn(Option<&Value>, Option<&Value>) -> Result<Option<Value>, String>,
) -> Result<(), SanitizeError> {
    *own = merge(package_value, own.as_ref()).map_err(|reason| SanitizeError::Merge {
        field,
        ord_id: ord_id.to_string(),
        reason,
    })?;
    Ok(())
}

fn inherit_policy_level(
    policy_level: &mut Option<String>,
    custom_policy_level: &mut Option<String>,
    doc: (&Option<String>, &Option<String>),
) {
    if policy_level.is_none() {
        *policy_level = doc.0.clone();
        *custom_policy_level = doc.1.clone();
    }
}

fn resolve_definitions(rewriter: &UrlRewriter, definitions: &mut [ResourceDefinition]) {
    for definition in definitions {
        definition.url = rewriter.resolve(&definition.url);
    }
}

fn resolve_default_entry_points(
    rewriter: &UrlRewriter,
    references: Option<&mut Vec<ConsumptionBundleReference>>,
) {
    for reference in references.into_iter().flatten() {
        if !reference.default_target_url.is_empty() {
            reference.default_target_url = rewriter.resolve(&reference.default_target_url);
        }
    }
}

/// With more than one entry point, references without a default use the first
fn assign_default_entry_point(
    references: Option<&mut Vec<ConsumptionBundleReference>>,
    entry_points: Option<&[String]>,
) {
    let Some(entry_points) = entry_points.filter(|urls| urls.len() > 1) else {
        return;
    };
    for reference in references.into_iter().flatten() {
        if reference.default_target_url.is_empty() {
            reference.default_target_url = entry_points[0].clone();
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer;

impl Sanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Sanitize documents in place
    pub fn sanitize(
        &self,
        documents: &mut [Document],
        webhook_base_url: &str,
        webhook_base_proxy_url: &str,
    ) -> Result<(), SanitizeError> {
        let base_url = if webhook_base_proxy_url.is_empty() {
            webhook_base_url
        } else {
            webhook_base_proxy_url
        };
        let rewriter = UrlRewriter::new(base_url)?;
        let entry_point_rewriter = UrlRewriter::new(webhook_base_url)?;

        for doc in documents.iter_mut() {
            rewrite_urls(doc, &rewriter, &entry_point_rewriter);
        }

        let mut packages: HashMap<String, Package> = HashMap::new();
        for doc in documents.iter_mut() {
            let doc_policy = (&doc.policy_level, &doc.custom_policy_level);
            for package in &mut doc.packages {
                inherit_policy_level(
                    &mut package.policy_level,
                    &mut package.custom_policy_level,
                    doc_policy,
                );
                packages.insert(package.ord_id.clone(), package.clone());
            }
        }

        for doc in documents.iter_mut() {
            inherit_from_packages(doc, &packages)?;
        }
        debug!(
            documents = documents.len(),
            base_url = %base_url,
            "sanitized ORD documents"
        );
        Ok(())
    }
}

fn rewrite_urls(
    doc: &mut Document,
    rewriter: &UrlRewriter,
    entry_point_rewriter: &UrlRewriter,
) {
    for package in &mut doc.packages {
        rewriter.rewrite_json_field(&mut package.package_links, "url");
        rewriter.rewrite_json_field(&mut package.links, "url");
    }

    for bundle in &mut doc.consumption_bundles {
        rewriter.rewrite_json_field(&mut bundle.links, "url");
        rewriter.rewrite_json_field(&mut bundle.credential_exchange_strategies, "callbackUrl");
    }

    for api in &mut doc.api_resources {
        resolve_definitions(rewriter, &mut api.resource_definitions);
        rewriter.rewrite_json_field(&mut api.api_resource_links, "url");
        rewriter.rewrite_json_field(&mut api.links, "url");
        rewriter.rewrite_json_field(&mut api.changelog_entries, "url");
        if let Some(entry_points) = &mut api.target_urls {
            for entry_point in entry_points.iter_mut() {
                *entry_point = entry_point_rewriter.resolve(entry_point);
            }
        }
        resolve_default_entry_points(rewriter, api.part_of_consumption_bundles.as_mut());
    }

    for event in &mut doc.event_resources {
        rewriter.rewrite_json_field(&mut event.changelog_entries, "url");
        rewriter.rewrite_json_field(&mut event.event_resource_links, "url");
        rewriter.rewrite_json_field(&mut event.links, "url");
        resolve_definitions(rewriter, &mut event.resource_definitions);
    }

    for entity_type in &mut doc.entity_types {
        rewriter.rewrite_json_field(&mut entity_type.changelog_entries, "url");
        rewriter.rewrite_json_field(&mut entity_type.links, "url");
    }

    for capability in &mut doc.capabilities {
        resolve_definitions(rewriter, &mut capability.capability_definitions);
        rewriter.rewrite_json_field(&mut capability.links, "url");
    }

    for dependency in &mut doc.integration_dependencies {
        rewriter.rewrite_json_field(&mut dependency.links, "url");
    }

    for data_product in &mut doc.data_products {
        rewriter.rewrite_json_field(&mut data_product.data_product_links, "url");
        rewriter.rewrite_json_field(&mut data_product.changelog_entries, "url");
        rewriter.rewrite_json_field(&mut data_product.links, "url");
    }
}

fn lookup<'a>(
    packages: &'a HashMap<String, Package>,
    resource_type: ResourceType,
    ord_id: Option<&str>,
    package_ord_id: Option<&str>,
) -> Result<Option<&'a Package>, SanitizeError> {
    let Some(package_ord_id) = package_ord_id else {
        return Ok(None);
    };
    packages
        .get(package_ord_id)
        .map(Some)
        .ok_or_else(|| SanitizeError::UnknownPackage {
            resource_type,
            ord_id: ord_id.unwrap_or_default().to_string(),
            package: package_ord_id.to_string(),
        })
}

fn inherit_from_packages(
    doc: &mut Document,
    packages: &HashMap<String, Package>,
) -> Result<(), SanitizeError> {
    let doc_policy = (&doc.policy_level, &doc.custom_policy_level);

    for api in &mut doc.api_resources {
        inherit_policy_level(&mut api.policy_level, &mut api.custom_policy_level, doc_policy);
        let ord_id = api.ord_id.clone().unwrap_or_default();
        if let Some(package) = lookup(
            packages,
            ResourceType::ApiResource,
            api.ord_id.as_deref(),
            api.ord_package_id.as_deref(),
        )? {
            inherit("partOfProducts", &ord_id, package.part_of_products.as_ref(), &mut api.part_of_products, merge_string_arrays)?;
            inherit("tags", &ord_id, package.tags.as_ref(), &mut api.tags, merge_string_arrays)?;
            inherit("countries", &ord_id, package.countries.as_ref(), &mut api.countries, merge_string_arrays)?;
            inherit("industry", &ord_id, package.industry.as_ref(), &mut api.industry, merge_string_arrays)?;
            inherit("lineOfBusiness", &ord_id, package.line_of_business.as_ref(), &mut api.line_of_business, merge_string_arrays)?;
            inherit("labels", &ord_id, package.labels.as_ref(), &mut api.labels, merge_labels)?;
        }
        assign_default_entry_point(
            api.part_of_consumption_bundles.as_mut(),
            api.target_urls.as_deref(),
        );
    }

    for event in &mut doc.event_resources {
        inherit_policy_level(&mut event.policy_level, &mut event.custom_policy_level, doc_policy);
        let ord_id = event.ord_id.clone().unwrap_or_default();
        if let Some(package) = lookup(
            packages,
            ResourceType::EventResource,
            event.ord_id.as_deref(),
            event.ord_package_id.as_deref(),
        )? {
            inherit("partOfProducts", &ord_id, package.part_of_products.as_ref(), &mut event.part_of_products, merge_string_arrays)?;
            inherit("tags", &ord_id, package.tags.as_ref(), &mut event.tags, merge_string_arrays)?;
            inherit("countries", &ord_id, package.countries.as_ref(), &mut event.countries, merge_string_arrays)?;
            inherit("industry", &ord_id, package.industry.as_ref(), &mut event.industry, merge_string_arrays)?;
            inherit("lineOfBusiness", &ord_id, package.line_of_business.as_ref(), &mut event.line_of_business, merge_string_arrays)?;
            inherit("labels", &ord_id, package.labels.as_ref(), &mut event.labels, merge_labels)?;
        }
    }

    for entity_type in &mut doc.entity_types {
        inherit_policy_level(
            &mut entity_type.policy_level,
            &mut entity_type.custom_policy_level,
            doc_policy,
        );
        let ord_id = entity_type.ord_id.clone();
        if let Some(package) = lookup(
            packages,
            ResourceType::EntityType,
            Some(&ord_id),
            entity_type.ord_package_id.as_deref(),
        )? {
            inherit("partOfProducts", &ord_id, package.part_of_products.as_ref(), &mut entity_type.part_of_products, merge_string_arrays)?;
            inherit("tags", &ord_id, package.tags.as_ref(), &mut entity_type.tags, merge_string_arrays)?;
            inherit("labels", &ord_id, package.labels.as_ref(), &mut entity_type.labels, merge_labels)?;
        }
    }

    for capability in &mut doc.capabilities {
        let ord_id = capability.ord_id.clone().unwrap_or_default();
        if let Some(package) = lookup(
            packages,
            ResourceType::Capability,
            capability.ord_id.as_deref(),
            capability.ord_package_id.as_deref(),
        )? {
            inherit("tags", &ord_id, package.tags.as_ref(), &mut capability.tags, merge_string_arrays)?;
            inherit("labels", &ord_id, package.labels.as_ref(), &mut capability.labels, merge_labels)?;
        }
    }

    for dependency in &mut doc.integration_dependencies {
        let ord_id = dependency.ord_id.clone().unwrap_or_default();
        if let Some(package) = lookup(
            packages,
            ResourceType::IntegrationDependency,
            dependency.ord_id.as_deref(),
            dependency.ord_package_id.as_deref(),
        )? {
            inherit("tags", &ord_id, package.tags.as_ref(), &mut dependency.tags, merge_string_arrays)?;
            inherit("labels", &ord_id, package.labels.as_ref(), &mut dependency.labels, merge_labels)?;
        }
    }

    for data_product in &mut doc.data_products {
        inherit_policy_level(
            &mut data_product.policy_level,
            &mut data_product.custom_policy_level,
            doc_policy,
        );
        let ord_id = data_product.ord_id.clone().unwrap_or_default();
        if let Some(package) = lookup(
            packages,
            ResourceType::DataProduct,
            data_product.ord_id.as_deref(),
            data_product.ord_package_id.as_deref(),
        )? {
            inherit("tags", &ord_id, package.tags.as_ref(), &mut data_product.tags, merge_string_arrays)?;
            inherit("industry", &ord_id, package.industry.as_ref(), &mut data_product.industry, merge_string_arrays)?;
            inherit("lineOfBusiness", &ord_id, package.line_of_business.as_ref(), &mut data_product.line_of_business, merge_string_arrays)?;
            inherit("labels", &ord_id, package.labels.as_ref(), &mut data_product.labels, merge_labels)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ord::model::{ApiResource, EventResource};
    use serde_json::json;

    fn reference(bundle: &str, default_entry_point: &str) -> ConsumptionBundleReference {
        ConsumptionBundleReference {
            bundle_ord_id: bundle.to_string(),
            default_target_url: default_entry_point.to_string(),
        }
    }

    #[test]
    fn test_assign_default_entry_point_only_with_several_entry_points() {
        let mut references = vec![reference("b1", ""), reference("b2", "/explicit")];
        let entry_points = vec!["/users".to_string(), "/users/v2".to_string()];
        assign_default_entry_point(Some(&mut references), Some(entry_points.as_slice()));
        assert_eq!(references[0].default_target_url, "/users");
        assert_eq!(references[1].default_target_url, "/explicit");

        let mut references = vec![reference("b1", "")];
        assign_default_entry_point(Some(&mut references), Some(&entry_points[..1]));
        assert_eq!(references[0].default_target_url, "");
    }

    #[test]
    fn test_proxy_used_for_links_but_not_entry_points() {
        let mut docs = vec![Document {
            api_resources: vec![ApiResource {
                ord_id: Some("ns:apiResource:users".to_string()),
                target_urls: Some(vec!["/users".to_string()]),
                links: Some(json!([{"title": "Docs", "url": "/docs"}])),
                resource_definitions: vec![ResourceDefinition {
                    definition_type: "openapi-v3".to_string(),
                    url: "/openapi.json".to_string(),
                    ..ResourceDefinition::default()
                }],
                ..ApiResource::default()
            }],
            ..Document::default()
        }];

        Sanitizer::new()
            .sanitize(&mut docs, "https://acme.example.com", "https://proxy.example.com")
            .unwrap();

        let api = &docs[0].api_resources[0];
        assert_eq!(
            api.target_urls.as_deref(),
            Some(&["https://acme.example.com/users".to_string()][..])
        );
        assert_eq!(api.links.as_ref().unwrap()[0]["url"], "https://proxy.example.com/docs");
        assert_eq!(
            api.resource_definitions[0].url,
            "https://proxy.example.com/openapi.json"
        );
    }

    #[test]
    fn test_policy_level_inherited_from_document() {
        let mut docs = vec![Document {
            policy_level: Some("custom".to_string()),
            custom_policy_level: Some("acme:strict:v1".to_string()),
            event_resources: vec![EventResource::default()],
            packages: vec![Package {
                ord_id: "ns:package:acme".to_string(),
                policy_level: Some("sap:core:v1".to_string()),
                ..Package::default()
            }],
            ..Document::default()
        }];

        Sanitizer::new().sanitize(&mut docs, "", "").unwrap();

        let event = &docs[0].event_resources[0];
        assert_eq!(event.policy_level.as_deref(), Some("custom"));
        assert_eq!(event.custom_policy_level.as_deref(), Some("acme:strict:v1"));
        assert_eq!(docs[0].packages[0].policy_level.as_deref(), Some("sap:core:v1"));
        assert_eq!(docs[0].packages[0].custom_policy_level, None);
    }

    #[test]
    fn test_unknown_package_is_a_hard_error() {
        let mut docs = vec![Document {
            api_resources: vec![ApiResource {
                ord_id: Some("ns:apiResource:users".to_string()),
                ord_package_id: Some("ns:package:missing".to_string()),
                ..ApiResource::default()
            }],
            ..Document::default()
        }];

        let err = Sanitizer::new().sanitize(&mut docs, "", "").unwrap_err();
        assert!(matches!(err, SanitizeError::UnknownPackage { .. }));
    }

    #[test]
    fn test_packages_resolve_across_documents() {
        let mut docs = vec![
            Document {
                packages: vec![Package {
                    ord_id: "ns:package:acme".to_string(),
                    tags: Some(json!(["shared"])),
                    ..Package::default()
                }],
                ..Document::default()
            },
            Document {
                event_resources: vec![EventResource {
                    ord_id: Some("ns:eventResource:created".to_string()),
                    ord_package_id: Some("ns:package:acme".to_string()),
                    ..EventResource::default()
                }],
                ..Document::default()
            },
        ];

        Sanitizer::new().sanitize(&mut docs, "", "").unwrap();
        assert_eq!(docs[1].event_resources[0].tags, Some(json!(["shared"])));
    }
}
