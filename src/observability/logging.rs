//! # Logging
//!
//! Tracing subscriber setup driven by [`AggregatorConfig`].

use crate::config::AggregatorConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured log level when set.
pub fn init_tracing(config: &AggregatorConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("ord_aggregator={}", config.log_level.to_lowercase()).into()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize tracing subscriber: {e}"))
}
