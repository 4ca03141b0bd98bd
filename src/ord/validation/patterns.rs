//! # Patterns and Enumerations
//!
//! ORD ID patterns and the closed value sets ORD defines. The trailing version
//! segment of versioned ORD IDs is optional.

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

pub static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
});

pub static PACKAGE_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([a-zA-Z0-9._\-]+):(package):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+))?$")
});

pub static VENDOR_ORD_ID: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([a-zA-Z0-9._\-]+):(vendor):([a-zA-Z0-9._\-]+):?$"));

pub static PRODUCT_ORD_ID: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([a-zA-Z0-9._\-]+):(product):([a-zA-Z0-9._\-]+):?$"));

pub static BUNDLE_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([a-zA-Z0-9._\-]+):(consumptionBundle):([a-zA-Z0-9._\-]+)(?::v([0-9]+))?$")
});

pub static API_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([a-zA-Z0-9._\-]+):(apiResource):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+))?$")
});

pub static EVENT_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([a-zA-Z0-9._\-]+):(eventResource):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+))?$")
});

pub static ENTITY_TYPE_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([a-zA-Z0-9._\-]+):(entityType):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+))?$")
});

pub static CAPABILITY_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([a-zA-Z0-9._\-]+):(capability):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+))?$")
});

pub static INTEGRATION_DEPENDENCY_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^([a-zA-Z0-9._\-]+):(integrationDependency):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+))?$",
    )
});

pub static DATA_PRODUCT_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([a-zA-Z0-9._\-]+):(dataProduct):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+))?$")
});

pub static TOMBSTONE_ORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^([a-zA-Z0-9._\-]+):(package|consumptionBundle|product|vendor|apiResource|eventResource|entityType|capability|integrationDependency|dataProduct):([a-zA-Z0-9._\-]+)(?::(alpha|beta|v[0-9]+)?)?$",
    )
});

/// Allowed characters for tags, industry and line of business entries
pub static STRING_ARRAY_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z0-9 -./]*$"));

pub static COUNTRY: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z]{2}$"));

pub static LABELS_KEY: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z0-9_.\-]*$"));

pub static CORRELATION_ID: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([a-zA-Z0-9._\-]+):([a-zA-Z0-9._\-/]+)$"));

/// Shape shared by custom policy levels, implementation standards and custom types
pub static CUSTOM_TYPE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([a-z0-9.]+):([a-zA-Z0-9._\-]+):v([0-9]+)$"));

/// Namespaces owned by SAP (`sap`, `sap.foo`, ...)
pub static SAP_NAMESPACE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(sap)((\.)([a-zA-Z0-9._\-])+)*$"));

pub const POLICY_LEVEL_SAP: &str = "sap:core:v1";
pub const POLICY_LEVEL_SAP_PARTNER: &str = "sap:partner:v1";
pub const POLICY_LEVEL_CUSTOM: &str = "custom";
pub const POLICY_LEVELS: &[&str] = &[POLICY_LEVEL_SAP, POLICY_LEVEL_SAP_PARTNER, POLICY_LEVEL_CUSTOM];

pub const RELEASE_STATUS_DEPRECATED: &str = "deprecated";
pub const RELEASE_STATUSES: &[&str] = &["beta", "active", RELEASE_STATUS_DEPRECATED];

pub const API_PROTOCOL_ODATA_V2: &str = "odata-v2";
pub const API_PROTOCOL_ODATA_V4: &str = "odata-v4";
pub const API_PROTOCOL_SOAP_INBOUND: &str = "soap-inbound";
pub const API_PROTOCOL_SOAP_OUTBOUND: &str = "soap-outbound";
pub const API_PROTOCOL_REST: &str = "rest";
pub const API_PROTOCOL_SAP_RFC: &str = "sap-rfc";
pub const API_PROTOCOLS: &[&str] = &[
    API_PROTOCOL_ODATA_V2,
    API_PROTOCOL_ODATA_V4,
    API_PROTOCOL_SOAP_INBOUND,
    API_PROTOCOL_SOAP_OUTBOUND,
    API_PROTOCOL_REST,
    API_PROTOCOL_SAP_RFC,
];

pub const VISIBILITY_PRIVATE: &str = "private";
pub const VISIBILITIES: &[&str] = &["public", "internal", VISIBILITY_PRIVATE];

pub const IMPLEMENTATION_STANDARD_CUSTOM: &str = "custom";
pub const IMPLEMENTATION_STANDARDS: &[&str] = &[
    "sap:ord-document-api:v1",
    "cff:open-service-broker:v2",
    "sap:csn-exposure:v1",
    IMPLEMENTATION_STANDARD_CUSTOM,
];

pub const PACKAGE_LINK_TYPES: &[&str] = &[
    "terms-of-service",
    "license",
    "client-registration",
    "payment",
    "sandbox",
    "service-level-agreement",
    "support",
    "custom",
];

pub const API_LINK_TYPES: &[&str] = &[
    "api-documentation",
    "authentication",
    "client-registration",
    "console",
    "payment",
    "service-level-agreement",
    "support",
    "custom",
];

pub const EVENT_LINK_TYPES: &[&str] = &["authentication", "console", "payment", "support", "custom"];

pub const DATA_PRODUCT_LINK_TYPES: &[&str] = &[
    "payment",
    "terms-of-service",
    "service-level-agreement",
    "support",
    "custom",
];

pub const ACCESS_STRATEGY_TYPES: &[&str] = &[
    crate::constants::OPEN_ACCESS_STRATEGY,
    "sap:oauth-client-credentials:v1",
    "sap:cmp-mtls:v1",
    "sap.businesshub:basic-auth:v1",
    "custom",
];

pub const EXTENSIBLE_SUPPORT: &[&str] = &["no", "manual", "automatic"];

pub const CAPABILITY_TYPES: &[&str] = &["sap.mdo:mdi-capability:v1", "custom"];

pub const DATA_PRODUCT_TYPES: &[&str] = &["primary", "derived"];
pub const DATA_PRODUCT_CATEGORIES: &[&str] = &["business-object", "analytical", "other"];

pub const SPEC_TYPE_OPENAPI_V2: &str = "openapi-v2";
pub const SPEC_TYPE_OPENAPI_V3: &str = "openapi-v3";
pub const SPEC_TYPE_EDMX: &str = "edmx";
pub const SPEC_TYPE_WSDL_V1: &str = "wsdl-v1";
pub const SPEC_TYPE_WSDL_V2: &str = "wsdl-v2";
pub const SPEC_TYPE_RFC_METADATA: &str = "sap-rfc-metadata-v1";

pub const LINES_OF_BUSINESS: &[&str] = &[
    "Asset Management",
    "Commerce",
    "Finance",
    "Human Resources",
    "Manufacturing",
    "Marketing",
    "R&D Engineering",
    "Sales",
    "Service",
    "Sourcing and Procurement",
    "Supply Chain",
    "Sustainability",
    "Metering",
    "Grid Operations and Maintenance",
    "Plant Operations and Maintenance",
    "Maintenance and Engineering",
];

pub const INDUSTRIES: &[&str] = &[
    "Aerospace and Defense",
    "Automotive",
    "Banking",
    "Chemicals",
    "Consumer Products",
    "Defense and Security",
    "Engineering Construction and Operations",
    "Healthcare",
    "Higher Education and Research",
    "High Tech",
    "Industrial Machinery and Components",
    "Insurance",
    "Life Sciences",
    "Media",
    "Mill Products",
    "Mining",
    "Oil and Gas",
    "Professional Services",
    "Public Sector",
    "Retail",
    "Sports and Entertainment",
    "Telecommunications",
    "Travel and Transportation",
    "Utilities",
    "Wholesale Distribution",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_ord_ids_accept_optional_version() {
        assert!(PACKAGE_ORD_ID.is_match("ns:package:acme"));
        assert!(PACKAGE_ORD_ID.is_match("ns:package:acme:v1"));
        assert!(PACKAGE_ORD_ID.is_match("ns:package:1"));
        assert!(!PACKAGE_ORD_ID.is_match("ns:apiResource:acme:v1"));
        assert!(!PACKAGE_ORD_ID.is_match("ns:package:acme:gamma"));
        assert!(API_ORD_ID.is_match("ns:apiResource:users"));
        assert!(API_ORD_ID.is_match("ns:apiResource:42:beta"));
        assert!(BUNDLE_ORD_ID.is_match("ns:consumptionBundle:default"));
        assert!(!BUNDLE_ORD_ID.is_match("ns:consumptionBundle:default:beta"));
    }

    #[test]
    fn test_vendor_and_product_ids() {
        assert!(VENDOR_ORD_ID.is_match("sap:vendor:SAP:"));
        assert!(VENDOR_ORD_ID.is_match("acme:vendor:Acme"));
        assert!(PRODUCT_ORD_ID.is_match("sap:product:S4HANA:"));
        assert!(!PRODUCT_ORD_ID.is_match("sap:product:S4HANA:v1"));
    }

    #[test]
    fn test_tombstone_ids_cover_every_type() {
        for id in [
            "ns:apiResource:42",
            "ns:package:acme:v1",
            "sap:vendor:SAP:",
            "ns:entityType:order:v1",
            "ns:dataProduct:orders",
        ] {
            assert!(TOMBSTONE_ORD_ID.is_match(id), "{id} should be a valid tombstone id");
        }
        assert!(!TOMBSTONE_ORD_ID.is_match("ns:tombstone:1"));
    }

    #[test]
    fn test_semver_and_small_patterns() {
        assert!(SEMVER.is_match("1.0.0"));
        assert!(SEMVER.is_match("1.2.3-rc.1+build.5"));
        assert!(!SEMVER.is_match("1.0"));
        assert!(COUNTRY.is_match("DE"));
        assert!(!COUNTRY.is_match("de"));
        assert!(STRING_ARRAY_ELEMENT.is_match("High Tech"));
        assert!(!STRING_ARRAY_ELEMENT.is_match("line\nbreak"));
        assert!(LABELS_KEY.is_match("some-key_1.x"));
        assert!(!LABELS_KEY.is_match("bad key"));
        assert!(CUSTOM_TYPE.is_match("acme.corp:policy:v2"));
        assert!(SAP_NAMESPACE.is_match("sap.s4"));
        assert!(!SAP_NAMESPACE.is_match("sapling"));
    }
}
