//! # Constants
//!
//! Shared constants used throughout the aggregator.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Default number of applications requested per listing page
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Default timeout for ORD configuration and document requests (seconds)
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 120;

/// Path of the ORD configuration endpoint, relative to a webhook URL
pub const WELL_KNOWN_CONFIG_PATH: &str = "/.well-known/open-resource-discovery";

/// Webhook type that points at an ORD provider
pub const ORD_WEBHOOK_TYPE: &str = "OPEN_RESOURCE_DISCOVERY";

/// Access strategy that needs no credentials
pub const OPEN_ACCESS_STRATEGY: &str = "open";

/// Vendor ORD ID reserved for SAP-owned resources
pub const SAP_VENDOR: &str = "sap:vendor:SAP:";

/// Error code reported for references to resources that are not part of the batch
pub const ERROR_CODE_UNKNOWN_REFERENCE: &str = "sap-ord-unknown-reference";

/// Error code reported for ORD IDs declared more than once
pub const ERROR_CODE_DUPLICATE_RESOURCE: &str = "sap-ord-duplicate-resource";

/// Error code reported for structural violations
pub const ERROR_CODE_INVALID_RESOURCE: &str = "sap-ord-invalid-resource";

/// Error code reported for documents whose base URL disagrees with the batch
pub const ERROR_CODE_BASE_URL_MISMATCH: &str = "sap-ord-base-url-mismatch";

/// Error code reported for resource definitions that cannot be fetched
pub const ERROR_CODE_UNSUPPORTED_ACCESS_STRATEGY: &str = "sap-ord-unsupported-access-strategy";

/// Maximum length of a `shortDescription`
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 255;
