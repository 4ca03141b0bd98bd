//! Validation followed by sanitization, the way the reconciler chains them

mod common;

use common::{
    catalog, definition, document, event, extended_catalog, package, BASE_URL, BUNDLE_ID,
    DATA_PRODUCT_ID, PACKAGE_ID,
};
use ord_aggregator::ord::hash::ResourceHashes;
use ord_aggregator::ord::model::Document;
use ord_aggregator::ord::resource::ResourceType;
use ord_aggregator::ord::sanitizer::{SanitizeError, Sanitizer};
use ord_aggregator::ord::snapshot::ResourcesFromDb;
use ord_aggregator::ord::validation::Validator;
use serde_json::json;

fn tagged_catalog() -> Vec<Document> {
    let mut doc = catalog("1.0.0");
    doc.packages[0].tags = Some(json!(["a"]));
    doc.api_resources[0].tags = Some(json!(["b"]));
    vec![doc]
}

#[test]
fn test_api_inherits_package_tags_and_default_entry_point() {
    let mut documents = tagged_catalog();
    let report = Validator::default()
        .validate(&mut documents, "", &ResourcesFromDb::new(), &ResourceHashes::new())
        .expect("batch should validate");
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);

    Sanitizer::new()
        .sanitize(&mut documents, "", "")
        .expect("sanitize");

    let api = &documents[0].api_resources[0];
    assert_eq!(api.tags, Some(json!(["a", "b"])));
    let references = api.part_of_consumption_bundles.as_ref().expect("bundle references");
    assert_eq!(references[0].bundle_ord_id, BUNDLE_ID);
    assert_eq!(references[0].default_target_url, "/users");
    assert_eq!(api.resource_definitions[0].url, "/users/openapi.json");
}

#[test]
fn test_relative_urls_use_proxy_but_entry_points_do_not() {
    let mut documents = tagged_catalog();

    Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "https://proxy.example.com")
        .expect("sanitize");

    let api = &documents[0].api_resources[0];
    assert_eq!(
        api.resource_definitions[0].url,
        "https://proxy.example.com/users/openapi.json"
    );
    assert_eq!(
        api.target_urls.as_deref(),
        Some(
            &[
                format!("{BASE_URL}/users"),
                format!("{BASE_URL}/users/v2"),
            ][..]
        )
    );
}

#[test]
fn test_relative_urls_keep_base_path() {
    let mut documents = tagged_catalog();

    Sanitizer::new()
        .sanitize(
            &mut documents,
            "https://acme.example.com/tenant-a",
            "https://proxy.example.com/acme",
        )
        .expect("sanitize");

    let api = &documents[0].api_resources[0];
    assert_eq!(
        api.resource_definitions[0].url,
        "https://proxy.example.com/acme/users/openapi.json"
    );
    assert_eq!(
        api.target_urls.as_deref(),
        Some(
            &[
                "https://acme.example.com/tenant-a/users".to_string(),
                "https://acme.example.com/tenant-a/users/v2".to_string(),
            ][..]
        )
    );
    let references = api.part_of_consumption_bundles.as_ref().expect("bundle references");
    assert_eq!(
        references[0].default_target_url,
        "https://acme.example.com/tenant-a/users"
    );
}

#[test]
fn test_absolute_urls_are_kept() {
    let mut documents = tagged_catalog();
    documents[0].api_resources[0].resource_definitions[0].url =
        "https://cdn.example.com/openapi.json".to_string();

    Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "")
        .expect("sanitize");

    assert_eq!(
        documents[0].api_resources[0].resource_definitions[0].url,
        "https://cdn.example.com/openapi.json"
    );
}

#[test]
fn test_policy_level_flows_from_document() {
    let mut documents = vec![Document {
        packages: vec![package(PACKAGE_ID)],
        event_resources: vec![event("ns:eventResource:users", "1.0.0")],
        ..document(Some(BASE_URL))
    }];

    Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "")
        .expect("sanitize");

    assert_eq!(documents[0].packages[0].policy_level.as_deref(), Some("custom"));
    assert_eq!(
        documents[0].event_resources[0].policy_level.as_deref(),
        Some("custom")
    );
}

#[test]
fn test_labels_merge_per_key() {
    let mut documents = tagged_catalog();
    documents[0].packages[0].labels = Some(json!({"team": ["core"], "tier": ["gold"]}));
    documents[0].api_resources[0].labels = Some(json!({"team": ["users", "core"]}));

    Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "")
        .expect("sanitize");

    assert_eq!(
        documents[0].api_resources[0].labels,
        Some(json!({"team": ["core", "users"], "tier": ["gold"]}))
    );
}

#[test]
fn test_unknown_package_is_a_hard_error() {
    let mut documents = tagged_catalog();
    documents[0].packages = vec![package("ns:package:other")];

    let err = Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "")
        .unwrap_err();

    assert!(matches!(err, SanitizeError::UnknownPackage { ref package, .. } if package == PACKAGE_ID));
}

#[test]
fn test_extended_resources_inherit_package_attributes() {
    let mut doc = extended_catalog("1.0.0");
    let package = &mut doc.packages[0];
    package.tags = Some(json!(["a"]));
    package.labels = Some(json!({"team": ["core"]}));
    package.part_of_products = Some(json!(["ns:product:acme:"]));
    package.industry = Some(json!(["Retail"]));
    package.line_of_business = Some(json!(["Sales"]));
    doc.entity_types[0].tags = Some(json!(["b"]));
    doc.data_products[0].labels = Some(json!({"team": ["data"]}));
    let mut documents = vec![doc];

    Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "")
        .expect("sanitize");

    let doc = &documents[0];
    let entity_type = &doc.entity_types[0];
    assert_eq!(entity_type.tags, Some(json!(["a", "b"])));
    assert_eq!(entity_type.labels, Some(json!({"team": ["core"]})));
    assert_eq!(entity_type.part_of_products, Some(json!(["ns:product:acme:"])));
    assert_eq!(entity_type.policy_level.as_deref(), Some("custom"));

    let capability = &doc.capabilities[0];
    assert_eq!(capability.tags, Some(json!(["a"])));
    assert_eq!(capability.labels, Some(json!({"team": ["core"]})));

    let dependency = &doc.integration_dependencies[0];
    assert_eq!(dependency.tags, Some(json!(["a"])));
    assert_eq!(dependency.labels, Some(json!({"team": ["core"]})));

    let data_product = &doc.data_products[0];
    assert_eq!(data_product.tags, Some(json!(["a"])));
    assert_eq!(data_product.industry, Some(json!(["Retail"])));
    assert_eq!(data_product.line_of_business, Some(json!(["Sales"])));
    assert_eq!(data_product.labels, Some(json!({"team": ["core", "data"]})));
    assert_eq!(data_product.policy_level.as_deref(), Some("custom"));
}

#[test]
fn test_extended_resource_links_are_made_absolute() {
    let mut doc = extended_catalog("1.0.0");
    doc.capabilities[0].capability_definitions = vec![definition("/capabilities/orders.json")];
    doc.data_products[0].data_product_links = Some(json!([{"type": "support", "url": "/support"}]));
    doc.entity_types[0].links = Some(json!([{"title": "Docs", "url": "docs/order"}]));
    let mut documents = vec![doc];

    Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "https://proxy.example.com")
        .expect("sanitize");

    let doc = &documents[0];
    assert_eq!(
        doc.capabilities[0].capability_definitions[0].url,
        "https://proxy.example.com/capabilities/orders.json"
    );
    assert_eq!(
        doc.data_products[0].data_product_links,
        Some(json!([{"type": "support", "url": "https://proxy.example.com/support"}]))
    );
    assert_eq!(
        doc.entity_types[0].links,
        Some(json!([{"title": "Docs", "url": "https://proxy.example.com/docs/order"}]))
    );
}

#[test]
fn test_data_product_with_unknown_package_is_a_hard_error() {
    let mut documents = vec![extended_catalog("1.0.0")];
    documents[0].data_products[0].ord_package_id = Some("ns:package:other".to_string());

    let err = Sanitizer::new()
        .sanitize(&mut documents, BASE_URL, "")
        .unwrap_err();

    assert!(matches!(
        err,
        SanitizeError::UnknownPackage { resource_type: ResourceType::DataProduct, ref ord_id, ref package }
            if ord_id == DATA_PRODUCT_ID && package == "ns:package:other"
    ));
}
