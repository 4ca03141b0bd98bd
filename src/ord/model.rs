//! # ORD Document Model
//!
//! Wire types for ORD documents as served by providers, plus the record shape the
//! persistence layer hands back for previously stored resources.
//!
//! Required scalar fields deserialize to empty strings when absent so that a
//! missing field surfaces as a validation issue instead of a parse failure.
//! Free-form attributes (tags, labels, links, ...) stay as raw JSON values.

use crate::ord::resource::ResourceType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Vantage point a document was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Perspective {
    #[serde(rename = "system-instance")]
    SystemInstance,
    #[serde(rename = "system-version")]
    SystemVersion,
    #[default]
    #[serde(rename = "system-independent")]
    Default,
}

impl Perspective {
    pub fn as_str(self) -> &'static str {
        match self {
            Perspective::SystemInstance => "system-instance",
            Perspective::SystemVersion => "system-version",
            Perspective::Default => "system-independent",
        }
    }
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ORD document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub open_resource_discovery: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub perspective: Perspective,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub described_system_instance: Option<SystemInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub described_system_version: Option<SystemVersion>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub consumption_bundles: Vec<ConsumptionBundle>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub api_resources: Vec<ApiResource>,
    #[serde(default)]
    pub event_resources: Vec<EventResource>,
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub integration_dependencies: Vec<IntegrationDependency>,
    #[serde(default)]
    pub data_products: Vec<DataProduct>,
    #[serde(default)]
    pub tombstones: Vec<Tombstone>,
}

impl Document {
    /// Base URL declared by the described system instance, if any
    pub fn declared_base_url(&self) -> Option<&str> {
        self.described_system_instance
            .as_ref()
            .and_then(|instance| instance.base_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_ids: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_ids: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(default)]
    pub ord_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_products: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ord_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_exchange_strategies: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub ord_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_ids: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default)]
    pub ord_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
}

/// Reference from an API or event to a consumption bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionBundleReference {
    #[serde(rename = "ordId", default)]
    pub bundle_ord_id: String,
    #[serde(
        rename = "defaultEntryPoint",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub default_target_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessStrategy {
    #[serde(rename = "type", default)]
    pub strategy_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_description: Option<String>,
}

/// Machine-readable definition attached to an API, event or capability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    #[serde(rename = "type", default)]
    pub definition_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub access_strategies: Vec<AccessStrategy>,
}

impl ResourceDefinition {
    /// Specification input stored alongside the owning API or event
    pub fn to_spec(&self) -> SpecInput {
        SpecInput {
            spec_type: self.definition_type.clone(),
            custom_type: self.custom_type.clone(),
            media_type: self.media_type.clone(),
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ord_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "partOfPackage", default, skip_serializing_if = "Option::is_none")]
    pub ord_package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successors: Option<Value>,
    #[serde(rename = "entryPoints", default, skip_serializing_if = "Option::is_none")]
    pub target_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_consumption_bundles: Option<Vec<ConsumptionBundleReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_products: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_resource_links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_entries: Option<Value>,
    #[serde(default)]
    pub resource_definitions: Vec<ResourceDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_implementation_standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_implementation_standard_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensible: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ord_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "partOfPackage", default, skip_serializing_if = "Option::is_none")]
    pub ord_package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successors: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_consumption_bundles: Option<Vec<ConsumptionBundleReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_products: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_resource_links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_entries: Option<Value>,
    #[serde(default)]
    pub resource_definitions: Vec<ResourceDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensible: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    #[serde(default)]
    pub ord_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "partOfPackage", default, skip_serializing_if = "Option::is_none")]
    pub ord_package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successors: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_products: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_entries: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensible: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ord_id: Option<String>,
    #[serde(rename = "type", default)]
    pub capability_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "partOfPackage", default, skip_serializing_if = "Option::is_none")]
    pub ord_package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_status: Option<String>,
    #[serde(rename = "definitions", default)]
    pub capability_definitions: Vec<ResourceDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entity_types: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationDependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ord_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "partOfPackage", default, skip_serializing_if = "Option::is_none")]
    pub ord_package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspects: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ord_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "partOfPackage", default, skip_serializing_if = "Option::is_none")]
    pub ord_package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_policy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successors: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_ports: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_ports: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_product_links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_entries: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tombstone {
    #[serde(default)]
    pub ord_id: String,
    #[serde(default)]
    pub removal_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Specification created for an API or event from one of its resource definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecInput {
    pub spec_type: String,
    pub custom_type: Option<String>,
    pub media_type: String,
    pub url: String,
}

/// Previously persisted resource as returned by the persistence layer
///
/// Vendors and products are addressed by their ORD ID, so `id` equals `ord_id` for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredResource {
    pub id: String,
    pub ord_id: Option<String>,
    pub package_id: Option<String>,
    pub version: Option<String>,
    pub resource_hash: Option<String>,
}

/// Common accessors over every resource variant
pub trait OrdResource: Serialize {
    const RESOURCE_TYPE: ResourceType;

    fn ord_id(&self) -> Option<&str>;

    /// ORD ID of the owning package, for package-scoped resources
    fn package_ord_id(&self) -> Option<&str> {
        None
    }
}

impl OrdResource for Package {
    const RESOURCE_TYPE: ResourceType = ResourceType::Package;

    fn ord_id(&self) -> Option<&str> {
        Some(&self.ord_id)
    }
}

impl OrdResource for ConsumptionBundle {
    const RESOURCE_TYPE: ResourceType = ResourceType::ConsumptionBundle;

    fn ord_id(&self) -> Option<&str> {
        self.ord_id.as_deref()
    }
}

impl OrdResource for Product {
    const RESOURCE_TYPE: ResourceType = ResourceType::Product;

    fn ord_id(&self) -> Option<&str> {
        Some(&self.ord_id)
    }
}

impl OrdResource for Vendor {
    const RESOURCE_TYPE: ResourceType = ResourceType::Vendor;

    fn ord_id(&self) -> Option<&str> {
        Some(&self.ord_id)
    }
}

impl OrdResource for ApiResource {
    const RESOURCE_TYPE: ResourceType = ResourceType::ApiResource;

    fn ord_id(&self) -> Option<&str> {
        self.ord_id.as_deref()
    }

    fn package_ord_id(&self) -> Option<&str> {
        self.ord_package_id.as_deref()
    }
}

impl OrdResource for EventResource {
    const RESOURCE_TYPE: ResourceType = ResourceType::EventResource;

    fn ord_id(&self) -> Option<&str> {
        self.ord_id.as_deref()
    }

    fn package_ord_id(&self) -> Option<&str> {
        self.ord_package_id.as_deref()
    }
}

impl OrdResource for EntityType {
    const RESOURCE_TYPE: ResourceType = ResourceType::EntityType;

    fn ord_id(&self) -> Option<&str> {
        Some(&self.ord_id)
    }

    fn package_ord_id(&self) -> Option<&str> {
        self.ord_package_id.as_deref()
    }
}

impl OrdResource for Capability {
    const RESOURCE_TYPE: ResourceType = ResourceType::Capability;

    fn ord_id(&self) -> Option<&str> {
        self.ord_id.as_deref()
    }

    fn package_ord_id(&self) -> Option<&str> {
        self.ord_package_id.as_deref()
    }
}

impl OrdResource for IntegrationDependency {
    const RESOURCE_TYPE: ResourceType = ResourceType::IntegrationDependency;

    fn ord_id(&self) -> Option<&str> {
        self.ord_id.as_deref()
    }

    fn package_ord_id(&self) -> Option<&str> {
        self.ord_package_id.as_deref()
    }
}

impl OrdResource for DataProduct {
    const RESOURCE_TYPE: ResourceType = ResourceType::DataProduct;

    fn ord_id(&self) -> Option<&str> {
        self.ord_id.as_deref()
    }

    fn package_ord_id(&self) -> Option<&str> {
        self.ord_package_id.as_deref()
    }
}

impl OrdResource for Tombstone {
    const RESOURCE_TYPE: ResourceType = ResourceType::Tombstone;

    fn ord_id(&self) -> Option<&str> {
        Some(&self.ord_id)
    }
}
