//! # Structural Rules
//!
//! One function per resource type. Each returns the list of violations found;
//! an empty list means the object is structurally valid. Reference checks
//! against the rest of the batch happen later in `references`.

use crate::constants::SAP_VENDOR;
use crate::ord::model::{
    ApiResource, Capability, ConsumptionBundle, ConsumptionBundleReference, DataProduct,
    EntityType, EventResource, IntegrationDependency, Package, Product, ResourceDefinition,
    Tombstone, Vendor,
};
use crate::ord::validation::fields::{self, is_request_uri};
use crate::ord::validation::patterns::*;
use anyhow::{anyhow, bail, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

/// Collects field violations under their field name
#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
    fn check(&mut self, field: &str, result: Result<()>) {
        if let Err(e) = result {
            self.0.push(format!("error validating field {field}: {e}"));
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

fn is_sap_or_partner(policy_level: Option<&str>) -> bool {
    matches!(policy_level, Some(POLICY_LEVEL_SAP | POLICY_LEVEL_SAP_PARTNER))
}

fn custom_policy_level(custom: Option<&str>, policy_level: Option<&str>) -> Result<()> {
    let Some(custom) = custom else {
        return Ok(());
    };
    if policy_level != Some(POLICY_LEVEL_CUSTOM) {
        bail!("customPolicyLevel is only allowed with policyLevel '{POLICY_LEVEL_CUSTOM}'");
    }
    fields::matches(custom, &CUSTOM_TYPE)
}

/// `industry` and `lineOfBusiness` come from the ORD catalogues unless the policy is custom
fn catalogue_values(value: Option<&Value>, catalogue: &[&str], policy_level: Option<&str>) -> Result<()> {
    fields::string_array_matching(value, &STRING_ARRAY_ELEMENT)?;
    if policy_level == Some(POLICY_LEVEL_CUSTOM) {
        return Ok(());
    }
    fields::string_array_in(value, catalogue)
}

/// Release status plus the deprecation fields that depend on it
fn lifecycle(
    v: &mut Violations,
    release_status: Option<&str>,
    sunset_date: Option<&str>,
    successors: Option<&Value>,
    successor_pattern: &Regex,
) {
    v.check("releaseStatus", fields::required_one_of(release_status, RELEASE_STATUSES));
    if release_status == Some(RELEASE_STATUS_DEPRECATED) {
        v.check("sunsetDate", fields::rfc3339(sunset_date.unwrap_or_default()));
        v.check(
            "successors",
            successors
                .ok_or_else(|| anyhow!("cannot be blank for deprecated resources"))
                .and_then(|s| fields::string_array_matching(Some(s), successor_pattern)),
        );
    } else {
        if let Some(date) = sunset_date {
            v.check("sunsetDate", fields::rfc3339(date));
        }
        v.check(
            "successors",
            fields::string_array_matching(successors, successor_pattern),
        );
    }
}

fn bundle_references(
    references: Option<&[ConsumptionBundleReference]>,
    entry_points: Option<&[String]>,
    allow_default_entry_point: bool,
) -> Result<()> {
    let Some(references) = references else {
        return Ok(());
    };
    if references.is_empty() {
        bail!("should not be empty if present");
    }

    let mut seen = HashSet::new();
    for reference in references {
        fields::required_match(&reference.bundle_ord_id, &BUNDLE_ORD_ID)?;
        if !seen.insert(reference.bundle_ord_id.as_str()) {
            bail!("bundle {:?} is referenced more than once", reference.bundle_ord_id);
        }
        if reference.default_target_url.is_empty() {
            continue;
        }
        if !allow_default_entry_point {
            bail!("defaultEntryPoint is not allowed on event bundle references");
        }
        if !is_request_uri(&reference.default_target_url) {
            bail!("defaultEntryPoint {:?} should be a valid URI", reference.default_target_url);
        }
        let entry_points = entry_points.unwrap_or_default();
        if entry_points.len() <= 1 {
            bail!("defaultEntryPoint is only allowed when more than one entryPoint is declared");
        }
        if !entry_points.contains(&reference.default_target_url) {
            bail!("defaultEntryPoint {:?} must be one of the entryPoints", reference.default_target_url);
        }
    }
    Ok(())
}

fn definitions_required(policy_level: Option<&str>, visibility: Option<&str>) -> bool {
    !(policy_level == Some(POLICY_LEVEL_SAP) && visibility == Some(VISIBILITY_PRIVATE))
}

fn resource_definitions(definitions: &[ResourceDefinition], required: bool) -> Result<()> {
    if definitions.is_empty() {
        if required {
            bail!("cannot be blank");
        }
        return Ok(());
    }
    fields::resource_definitions(definitions)
}

/// Definition types a protocol must ship with under the SAP and partner policies
fn protocol_definitions(protocol: Option<&str>, definitions: &[ResourceDefinition]) -> Result<()> {
    let has = |types: &[&str]| {
        definitions
            .iter()
            .any(|d| types.contains(&d.definition_type.as_str()))
    };
    let openapi = [SPEC_TYPE_OPENAPI_V2, SPEC_TYPE_OPENAPI_V3];

    let complete = match protocol {
        Some(API_PROTOCOL_SOAP_INBOUND | API_PROTOCOL_SOAP_OUTBOUND) => {
            has(&[SPEC_TYPE_WSDL_V1, SPEC_TYPE_WSDL_V2])
        }
        Some(API_PROTOCOL_ODATA_V2 | API_PROTOCOL_ODATA_V4) => has(&[SPEC_TYPE_EDMX]) && has(&openapi),
        Some(API_PROTOCOL_REST) => has(&openapi),
        Some(API_PROTOCOL_SAP_RFC) => has(&[SPEC_TYPE_RFC_METADATA]),
        _ => true,
    };
    if !complete {
        bail!(
            "missing resource definition types required for apiProtocol {:?}",
            protocol.unwrap_or_default()
        );
    }
    Ok(())
}

fn implementation_standard(api: &ApiResource) -> Result<()> {
    let custom = api.custom_implementation_standard.as_deref();
    let description = api.custom_implementation_standard_description.as_deref();
    match api.implementation_standard.as_deref() {
        Some(IMPLEMENTATION_STANDARD_CUSTOM) => {
            fields::required_match(custom.unwrap_or_default(), &CUSTOM_TYPE)
                .map_err(|e| anyhow!("customImplementationStandard: {e}"))?;
            fields::required_opt(description)
                .map_err(|e| anyhow!("customImplementationStandardDescription: {e}"))
        }
        standard => {
            if let Some(standard) = standard {
                fields::one_of(standard, IMPLEMENTATION_STANDARDS)?;
            }
            if custom.is_some() || description.is_some() {
                bail!("custom implementation standard fields are only allowed with '{IMPLEMENTATION_STANDARD_CUSTOM}'");
            }
            Ok(())
        }
    }
}

pub fn validate_package(package: &Package, doc_policy_level: Option<&str>) -> Vec<String> {
    let policy_level = package.policy_level.as_deref().or(doc_policy_level);
    let mut v = Violations::default();

    v.check("ordId", fields::required_match(&package.ord_id, &PACKAGE_ORD_ID));
    v.check("title", fields::required(&package.title));
    v.check("shortDescription", fields::short_description(&package.short_description));
    v.check("description", fields::required(&package.description));
    v.check("version", fields::semver(&package.version));
    v.check("policyLevel", fields::required_one_of(policy_level, POLICY_LEVELS));
    v.check(
        "customPolicyLevel",
        custom_policy_level(package.custom_policy_level.as_deref(), policy_level),
    );
    v.check(
        "packageLinks",
        fields::typed_links(package.package_links.as_ref(), PACKAGE_LINK_TYPES),
    );
    v.check("links", fields::links(package.links.as_ref()));
    v.check("vendor", package_vendor(package.vendor.as_deref(), policy_level));
    v.check(
        "partOfProducts",
        fields::string_array_matching(package.part_of_products.as_ref(), &PRODUCT_ORD_ID),
    );
    v.check(
        "tags",
        fields::string_array_matching(package.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check("countries", fields::countries(package.countries.as_ref()));
    v.check(
        "lineOfBusiness",
        catalogue_values(package.line_of_business.as_ref(), LINES_OF_BUSINESS, policy_level),
    );
    v.check(
        "industry",
        catalogue_values(package.industry.as_ref(), INDUSTRIES, policy_level),
    );
    v.check("labels", fields::labels(package.labels.as_ref()));
    v.into_inner()
}

fn package_vendor(vendor: Option<&str>, policy_level: Option<&str>) -> Result<()> {
    let Some(vendor) = vendor else {
        return Ok(());
    };
    fields::matches(vendor, &VENDOR_ORD_ID)?;
    match policy_level {
        Some(POLICY_LEVEL_SAP) if vendor != SAP_VENDOR => {
            bail!("packages with policyLevel '{POLICY_LEVEL_SAP}' must use vendor {SAP_VENDOR:?}")
        }
        Some(POLICY_LEVEL_SAP_PARTNER) if vendor == SAP_VENDOR => {
            bail!("packages with policyLevel '{POLICY_LEVEL_SAP_PARTNER}' must not use vendor {SAP_VENDOR:?}")
        }
        _ => Ok(()),
    }
}

pub fn validate_bundle(bundle: &ConsumptionBundle) -> Vec<String> {
    let mut v = Violations::default();
    v.check(
        "ordId",
        fields::required_match(bundle.ord_id.as_deref().unwrap_or_default(), &BUNDLE_ORD_ID),
    );
    v.check("title", fields::required(&bundle.title));
    if let Some(short_description) = &bundle.short_description {
        v.check("shortDescription", fields::short_description(short_description));
    }
    if let Some(version) = &bundle.version {
        v.check("version", fields::semver(version));
    }
    v.check("links", fields::links(bundle.links.as_ref()));
    v.check("labels", fields::labels(bundle.labels.as_ref()));
    v.check(
        "tags",
        fields::string_array_matching(bundle.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check(
        "credentialExchangeStrategies",
        fields::credential_exchange_strategies(bundle.credential_exchange_strategies.as_ref()),
    );
    v.into_inner()
}

pub fn validate_product(product: &Product) -> Vec<String> {
    let mut v = Violations::default();
    v.check("ordId", fields::required_match(&product.ord_id, &PRODUCT_ORD_ID));
    v.check("title", fields::required(&product.title));
    v.check("shortDescription", fields::short_description(&product.short_description));
    v.check("vendor", product_vendor(&product.ord_id, &product.vendor));
    if let Some(parent) = &product.parent {
        v.check("parent", fields::matches(parent, &PRODUCT_ORD_ID));
    }
    v.check(
        "correlationIds",
        fields::string_array_matching(product.correlation_ids.as_ref(), &CORRELATION_ID),
    );
    v.check("labels", fields::labels(product.labels.as_ref()));
    v.check(
        "tags",
        fields::string_array_matching(product.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.into_inner()
}

fn product_vendor(ord_id: &str, vendor: &str) -> Result<()> {
    fields::required_match(vendor, &VENDOR_ORD_ID)?;
    let namespace = ord_id.split(':').next().unwrap_or_default();
    let sap_owned = SAP_NAMESPACE.is_match(namespace);
    if sap_owned && vendor != SAP_VENDOR {
        bail!("products in namespace {namespace:?} must use vendor {SAP_VENDOR:?}");
    }
    if !sap_owned && vendor == SAP_VENDOR {
        bail!("vendor {SAP_VENDOR:?} is reserved for SAP products");
    }
    Ok(())
}

pub fn validate_vendor(vendor: &Vendor) -> Vec<String> {
    let mut v = Violations::default();
    v.check("ordId", fields::required_match(&vendor.ord_id, &VENDOR_ORD_ID));
    v.check("title", fields::required(&vendor.title));
    v.check(
        "partners",
        fields::string_array_matching(vendor.partners.as_ref(), &VENDOR_ORD_ID),
    );
    v.check("labels", fields::labels(vendor.labels.as_ref()));
    v.check(
        "tags",
        fields::string_array_matching(vendor.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.into_inner()
}

/// `policy_level` is the effective level: own, owning package's, then document's
pub fn validate_api(api: &ApiResource, policy_level: Option<&str>) -> Vec<String> {
    let mut v = Violations::default();
    let visibility = api.visibility.as_deref();

    v.check(
        "ordId",
        fields::required_match(api.ord_id.as_deref().unwrap_or_default(), &API_ORD_ID),
    );
    v.check("title", fields::required(&api.title));
    v.check("shortDescription", fields::short_description(&api.short_description));
    v.check("description", fields::required(&api.description));
    v.check("version", fields::semver(&api.version));
    v.check(
        "partOfPackage",
        fields::required_match(api.ord_package_id.as_deref().unwrap_or_default(), &PACKAGE_ORD_ID),
    );
    v.check(
        "customPolicyLevel",
        custom_policy_level(api.custom_policy_level.as_deref(), policy_level),
    );
    v.check("apiProtocol", fields::required_one_of(api.api_protocol.as_deref(), API_PROTOCOLS));
    v.check("visibility", fields::required_one_of(visibility, VISIBILITIES));
    lifecycle(
        &mut v,
        api.release_status.as_deref(),
        api.sunset_date.as_deref(),
        api.successors.as_ref(),
        &API_ORD_ID,
    );
    v.check("entryPoints", fields::entry_points(api.target_urls.as_deref()));
    if api.target_urls.is_none() && api.part_of_consumption_bundles.is_some() {
        v.check(
            "partOfConsumptionBundles",
            Err(anyhow!("an API without entryPoints cannot be part of a bundle")),
        );
    }
    v.check(
        "partOfConsumptionBundles",
        bundle_references(
            api.part_of_consumption_bundles.as_deref(),
            api.target_urls.as_deref(),
            true,
        ),
    );
    v.check(
        "partOfProducts",
        fields::string_array_matching(api.part_of_products.as_ref(), &PRODUCT_ORD_ID),
    );
    v.check(
        "tags",
        fields::string_array_matching(api.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check("countries", fields::countries(api.countries.as_ref()));
    v.check(
        "lineOfBusiness",
        catalogue_values(api.line_of_business.as_ref(), LINES_OF_BUSINESS, policy_level),
    );
    v.check(
        "industry",
        catalogue_values(api.industry.as_ref(), INDUSTRIES, policy_level),
    );
    v.check("labels", fields::labels(api.labels.as_ref()));
    v.check("links", fields::links(api.links.as_ref()));
    v.check(
        "apiResourceLinks",
        fields::typed_links(api.api_resource_links.as_ref(), API_LINK_TYPES),
    );
    v.check("changelogEntries", fields::changelog_entries(api.changelog_entries.as_ref()));
    v.check("implementationStandard", implementation_standard(api));
    v.check("extensible", fields::extensible(api.extensible.as_ref(), policy_level));

    let required = definitions_required(policy_level, visibility);
    v.check(
        "resourceDefinitions",
        resource_definitions(&api.resource_definitions, required),
    );
    if required && is_sap_or_partner(policy_level) {
        v.check(
            "resourceDefinitions",
            protocol_definitions(api.api_protocol.as_deref(), &api.resource_definitions),
        );
    }
    v.into_inner()
}

pub fn validate_event(event: &EventResource, policy_level: Option<&str>) -> Vec<String> {
    let mut v = Violations::default();
    let visibility = event.visibility.as_deref();

    v.check(
        "ordId",
        fields::required_match(event.ord_id.as_deref().unwrap_or_default(), &EVENT_ORD_ID),
    );
    v.check("title", fields::required(&event.title));
    v.check("shortDescription", fields::short_description(&event.short_description));
    v.check("description", fields::required(&event.description));
    v.check("version", fields::semver(&event.version));
    v.check(
        "partOfPackage",
        fields::required_match(event.ord_package_id.as_deref().unwrap_or_default(), &PACKAGE_ORD_ID),
    );
    v.check(
        "customPolicyLevel",
        custom_policy_level(event.custom_policy_level.as_deref(), policy_level),
    );
    v.check("visibility", fields::required_one_of(visibility, VISIBILITIES));
    lifecycle(
        &mut v,
        event.release_status.as_deref(),
        event.sunset_date.as_deref(),
        event.successors.as_ref(),
        &EVENT_ORD_ID,
    );
    v.check(
        "partOfConsumptionBundles",
        bundle_references(event.part_of_consumption_bundles.as_deref(), None, false),
    );
    v.check(
        "partOfProducts",
        fields::string_array_matching(event.part_of_products.as_ref(), &PRODUCT_ORD_ID),
    );
    v.check(
        "tags",
        fields::string_array_matching(event.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check("countries", fields::countries(event.countries.as_ref()));
    v.check(
        "lineOfBusiness",
        catalogue_values(event.line_of_business.as_ref(), LINES_OF_BUSINESS, policy_level),
    );
    v.check(
        "industry",
        catalogue_values(event.industry.as_ref(), INDUSTRIES, policy_level),
    );
    v.check("labels", fields::labels(event.labels.as_ref()));
    v.check("links", fields::links(event.links.as_ref()));
    v.check(
        "eventResourceLinks",
        fields::typed_links(event.event_resource_links.as_ref(), EVENT_LINK_TYPES),
    );
    v.check("changelogEntries", fields::changelog_entries(event.changelog_entries.as_ref()));
    v.check("extensible", fields::extensible(event.extensible.as_ref(), policy_level));
    v.check(
        "resourceDefinitions",
        resource_definitions(
            &event.resource_definitions,
            definitions_required(policy_level, visibility),
        ),
    );
    v.into_inner()
}

pub fn validate_entity_type(entity_type: &EntityType, policy_level: Option<&str>) -> Vec<String> {
    let mut v = Violations::default();
    v.check("ordId", fields::required_match(&entity_type.ord_id, &ENTITY_TYPE_ORD_ID));
    v.check("title", fields::required(&entity_type.title));
    v.check(
        "shortDescription",
        fields::short_description(&entity_type.short_description),
    );
    v.check("version", fields::semver(&entity_type.version));
    v.check(
        "partOfPackage",
        fields::required_match(
            entity_type.ord_package_id.as_deref().unwrap_or_default(),
            &PACKAGE_ORD_ID,
        ),
    );
    v.check(
        "customPolicyLevel",
        custom_policy_level(entity_type.custom_policy_level.as_deref(), policy_level),
    );
    v.check(
        "visibility",
        fields::required_one_of(entity_type.visibility.as_deref(), VISIBILITIES),
    );
    lifecycle(
        &mut v,
        entity_type.release_status.as_deref(),
        entity_type.sunset_date.as_deref(),
        entity_type.successors.as_ref(),
        &ENTITY_TYPE_ORD_ID,
    );
    v.check(
        "partOfProducts",
        fields::string_array_matching(entity_type.part_of_products.as_ref(), &PRODUCT_ORD_ID),
    );
    v.check(
        "tags",
        fields::string_array_matching(entity_type.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check("labels", fields::labels(entity_type.labels.as_ref()));
    v.check("links", fields::links(entity_type.links.as_ref()));
    v.check(
        "changelogEntries",
        fields::changelog_entries(entity_type.changelog_entries.as_ref()),
    );
    v.check(
        "extensible",
        fields::extensible(entity_type.extensible.as_ref(), policy_level),
    );
    v.into_inner()
}

pub fn validate_capability(capability: &Capability) -> Vec<String> {
    let mut v = Violations::default();
    v.check(
        "ordId",
        fields::required_match(capability.ord_id.as_deref().unwrap_or_default(), &CAPABILITY_ORD_ID),
    );
    v.check("type", fields::required_one_of(Some(capability.capability_type.as_str()), CAPABILITY_TYPES));
    v.check("customType", capability_custom_type(capability));
    v.check("title", fields::required(&capability.title));
    v.check(
        "shortDescription",
        fields::short_description(&capability.short_description),
    );
    v.check("version", fields::semver(&capability.version));
    v.check(
        "partOfPackage",
        fields::required_match(
            capability.ord_package_id.as_deref().unwrap_or_default(),
            &PACKAGE_ORD_ID,
        ),
    );
    v.check(
        "visibility",
        fields::required_one_of(capability.visibility.as_deref(), VISIBILITIES),
    );
    v.check(
        "releaseStatus",
        fields::required_one_of(capability.release_status.as_deref(), RELEASE_STATUSES),
    );
    v.check(
        "definitions",
        resource_definitions(&capability.capability_definitions, false),
    );
    v.check(
        "tags",
        fields::string_array_matching(capability.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check("labels", fields::labels(capability.labels.as_ref()));
    v.check("links", fields::links(capability.links.as_ref()));
    v.into_inner()
}

fn capability_custom_type(capability: &Capability) -> Result<()> {
    match (&capability.custom_type, capability.capability_type.as_str()) {
        (Some(custom_type), "custom") => fields::matches(custom_type, &CUSTOM_TYPE),
        (Some(_), _) => bail!("if customType is provided, type should be set to 'custom'"),
        (None, _) => Ok(()),
    }
}

pub fn validate_integration_dependency(dependency: &IntegrationDependency) -> Vec<String> {
    let mut v = Violations::default();
    v.check(
        "ordId",
        fields::required_match(
            dependency.ord_id.as_deref().unwrap_or_default(),
            &INTEGRATION_DEPENDENCY_ORD_ID,
        ),
    );
    v.check("title", fields::required(&dependency.title));
    v.check(
        "shortDescription",
        fields::short_description(&dependency.short_description),
    );
    v.check("version", fields::semver(&dependency.version));
    v.check(
        "partOfPackage",
        fields::required_match(
            dependency.ord_package_id.as_deref().unwrap_or_default(),
            &PACKAGE_ORD_ID,
        ),
    );
    v.check(
        "visibility",
        fields::required_one_of(dependency.visibility.as_deref(), VISIBILITIES),
    );
    v.check(
        "releaseStatus",
        fields::required_one_of(dependency.release_status.as_deref(), RELEASE_STATUSES),
    );
    if dependency.mandatory.is_none() {
        v.check("mandatory", Err(anyhow!("cannot be blank")));
    }
    v.check("aspects", aspects(dependency.aspects.as_ref()));
    v.check(
        "tags",
        fields::string_array_matching(dependency.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check("labels", fields::labels(dependency.labels.as_ref()));
    v.check("links", fields::links(dependency.links.as_ref()));
    v.into_inner()
}

fn aspects(value: Option<&Value>) -> Result<()> {
    let items = value
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| anyhow!("should be a non-empty json array"))?;
    for aspect in items {
        let title = aspect
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default();
        fields::required(title).map_err(|e| anyhow!("aspect title: {e}"))?;
    }
    Ok(())
}

pub fn validate_data_product(data_product: &DataProduct, policy_level: Option<&str>) -> Vec<String> {
    let mut v = Violations::default();
    v.check(
        "ordId",
        fields::required_match(
            data_product.ord_id.as_deref().unwrap_or_default(),
            &DATA_PRODUCT_ORD_ID,
        ),
    );
    v.check("title", fields::required(&data_product.title));
    v.check(
        "shortDescription",
        fields::short_description(&data_product.short_description),
    );
    v.check("version", fields::semver(&data_product.version));
    v.check(
        "partOfPackage",
        fields::required_match(
            data_product.ord_package_id.as_deref().unwrap_or_default(),
            &PACKAGE_ORD_ID,
        ),
    );
    v.check(
        "customPolicyLevel",
        custom_policy_level(data_product.custom_policy_level.as_deref(), policy_level),
    );
    v.check(
        "visibility",
        fields::required_one_of(data_product.visibility.as_deref(), VISIBILITIES),
    );
    lifecycle(
        &mut v,
        data_product.release_status.as_deref(),
        data_product.sunset_date.as_deref(),
        data_product.successors.as_ref(),
        &DATA_PRODUCT_ORD_ID,
    );
    v.check(
        "type",
        fields::required_one_of(data_product.product_type.as_deref(), DATA_PRODUCT_TYPES),
    );
    v.check(
        "category",
        fields::required_one_of(data_product.category.as_deref(), DATA_PRODUCT_CATEGORIES),
    );
    v.check(
        "outputPorts",
        data_product
            .output_ports
            .as_ref()
            .and_then(Value::as_array)
            .filter(|ports| !ports.is_empty())
            .map(|_| ())
            .ok_or_else(|| anyhow!("should be a non-empty json array")),
    );
    if let Some(input_ports) = &data_product.input_ports {
        if !input_ports.is_array() {
            v.check("inputPorts", Err(anyhow!("should be a json array")));
        }
    }
    v.check(
        "tags",
        fields::string_array_matching(data_product.tags.as_ref(), &STRING_ARRAY_ELEMENT),
    );
    v.check(
        "lineOfBusiness",
        catalogue_values(data_product.line_of_business.as_ref(), LINES_OF_BUSINESS, policy_level),
    );
    v.check(
        "industry",
        catalogue_values(data_product.industry.as_ref(), INDUSTRIES, policy_level),
    );
    v.check("labels", fields::labels(data_product.labels.as_ref()));
    v.check("links", fields::links(data_product.links.as_ref()));
    v.check(
        "dataProductLinks",
        fields::typed_links(data_product.data_product_links.as_ref(), DATA_PRODUCT_LINK_TYPES),
    );
    v.check(
        "changelogEntries",
        fields::changelog_entries(data_product.changelog_entries.as_ref()),
    );
    v.into_inner()
}

pub fn validate_tombstone(tombstone: &Tombstone) -> Vec<String> {
    let mut v = Violations::default();
    v.check("ordId", fields::required_match(&tombstone.ord_id, &TOMBSTONE_ORD_ID));
    v.check("removalDate", fields::rfc3339(&tombstone.removal_date));
    v.into_inner()
}
