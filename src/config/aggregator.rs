//! # Aggregator Configuration
//!
//! Aggregator-level settings loaded from environment variables.

use std::collections::HashMap;
use std::time::Duration;

/// Aggregator-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Number of applications requested per listing page
    pub page_size: usize,
    /// Timeout for ORD configuration and document requests (seconds)
    pub client_timeout_secs: u64,
    /// Webhook URLs inspected by the dry-run binary
    pub webhook_urls: Vec<String>,
    /// Proxy base URL used when rewriting relative URLs (empty when unset)
    pub webhook_proxy_url: String,
    /// Externally configured base URL
    /// When unset, documents must declare `describedSystemInstance.baseUrl`
    pub base_url: Option<String>,
    /// ORD IDs of vendors and products that are known outside of any batch
    pub global_resource_ord_ids: Vec<String>,
    /// Access strategy type to credential reference
    /// Resource definitions whose strategies are all unmapped produce a warning
    pub credential_mappings: HashMap<String, String>,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            client_timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
            webhook_urls: Vec::new(),
            webhook_proxy_url: String::new(),
            base_url: None,
            global_resource_ord_ids: Vec::new(),
            credential_mappings: HashMap::new(),
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            enable_metrics: true,
        }
    }
}

impl AggregatorConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        use crate::constants::*;
        Self {
            page_size: env_var_or_default("ORD_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            client_timeout_secs: env_var_or_default(
                "ORD_CLIENT_TIMEOUT_SECS",
                DEFAULT_CLIENT_TIMEOUT_SECS,
            ),
            webhook_urls: parse_list(&env_var_or_default_str("ORD_WEBHOOK_URLS", "")),
            webhook_proxy_url: env_var_or_default_str("ORD_WEBHOOK_PROXY_URL", ""),
            base_url: std::env::var("ORD_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            global_resource_ord_ids: parse_list(&env_var_or_default_str(
                "ORD_GLOBAL_RESOURCE_IDS",
                "",
            )),
            credential_mappings: parse_mappings(&env_var_or_default_str(
                "ORD_CREDENTIAL_MAPPINGS",
                "",
            )),
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default_str("LOG_FORMAT", "text"),
            enable_metrics: env_var_or_default_bool("ENABLE_METRICS", true),
        }
    }

    /// Get client timeout duration
    pub fn client_timeout(&self) -> Duration {
        Duration::from_secs(self.client_timeout_secs)
    }
}

/// Split a comma separated list, dropping blank entries
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse `key=value` pairs separated by commas
///
/// Entries without `=` are ignored.
pub fn parse_mappings(value: &str) -> HashMap<String, String> {
    parse_list(value)
        .into_iter()
        .filter_map(|entry| {
            let (key, val) = entry.split_once('=')?;
            let (key, val) = (key.trim(), val.trim());
            (!key.is_empty()).then(|| (key.to_string(), val.to_string()))
        })
        .collect()
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_constants() {
        let config = AggregatorConfig::default();
        assert_eq!(config.page_size, 200);
        assert_eq!(config.client_timeout(), Duration::from_secs(120));
        assert!(config.webhook_proxy_url.is_empty());
        assert!(config.base_url.is_none());
        assert!(config.enable_metrics);
    }

    #[test]
    fn test_parse_list_trims_and_skips_blanks() {
        assert_eq!(
            parse_list(" sap:vendor:SAP: , ,sap:product:S4HANA:"),
            vec!["sap:vendor:SAP:".to_string(), "sap:product:S4HANA:".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_mappings() {
        let mappings = parse_mappings("sap:cmp-mtls:v1=mtls-cert, broken, =x,custom = basic");
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings.get("sap:cmp-mtls:v1").map(String::as_str), Some("mtls-cert"));
        assert_eq!(mappings.get("custom").map(String::as_str), Some("basic"));
    }
}
