//! # Metrics
//!
//! Prometheus metrics for monitoring ORD aggregation.
//!
//! ## Metrics Exposed
//!
//! - `ord_aggregator_applications_processed_total` - Applications reconciled successfully
//! - `ord_aggregator_application_errors_total` - Applications whose reconciliation failed
//! - `ord_aggregator_documents_fetched_total` - ORD documents downloaded from webhooks
//! - `ord_aggregator_validation_issues_total` - Validation issues by severity
//! - `ord_aggregator_resources_synced_total` - Persistence operations by resource type and operation
//! - `ord_aggregator_sync_duration_seconds` - Duration of a full synchronisation pass

use anyhow::Result;
use prometheus::{Encoder, Histogram, IntCounter, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

// Metrics
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static APPLICATIONS_PROCESSED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "ord_aggregator_applications_processed_total",
        "Total number of applications reconciled successfully",
    )
    .expect("Failed to create APPLICATIONS_PROCESSED_TOTAL metric - this should never happen")
});

static APPLICATION_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "ord_aggregator_application_errors_total",
        "Total number of applications whose reconciliation failed",
    )
    .expect("Failed to create APPLICATION_ERRORS_TOTAL metric - this should never happen")
});

static DOCUMENTS_FETCHED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "ord_aggregator_documents_fetched_total",
        "Total number of ORD documents fetched from webhooks",
    )
    .expect("Failed to create DOCUMENTS_FETCHED_TOTAL metric - this should never happen")
});

static VALIDATION_ISSUES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "ord_aggregator_validation_issues_total",
            "Total number of validation issues by severity",
        ),
        &["severity"],
    )
    .expect("Failed to create VALIDATION_ISSUES_TOTAL metric - this should never happen")
});

static RESOURCES_SYNCED_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "ord_aggregator_resources_synced_total",
            "Total number of persistence operations by resource type and operation",
        ),
        &["resource_type", "operation"],
    )
    .expect("Failed to create RESOURCES_SYNCED_TOTAL metric - this should never happen")
});

static SYNC_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "ord_aggregator_sync_duration_seconds",
            "Duration of a full ORD synchronisation pass in seconds",
        )
        .buckets(vec![0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 300.0]),
    )
    .expect("Failed to create SYNC_DURATION metric - this should never happen")
});

pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(APPLICATIONS_PROCESSED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(APPLICATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(DOCUMENTS_FETCHED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(VALIDATION_ISSUES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RESOURCES_SYNCED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(SYNC_DURATION.clone()))?;

    Ok(())
}

/// Render every registered metric in the Prometheus text exposition format
pub fn render_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn increment_applications_processed() {
    APPLICATIONS_PROCESSED_TOTAL.inc();
}

pub fn increment_application_errors() {
    APPLICATION_ERRORS_TOTAL.inc();
}

pub fn increment_documents_fetched(count: usize) {
    DOCUMENTS_FETCHED_TOTAL.inc_by(count as u64);
}

/// Increment validation issues counter
pub fn increment_validation_issues(severity: &str, count: usize) {
    VALIDATION_ISSUES_TOTAL
        .with_label_values(&[severity])
        .inc_by(count as u64);
}

/// Record one create/update/delete against the persistence layer
pub fn record_resource_operation(resource_type: &str, operation: &str) {
    RESOURCES_SYNCED_TOTAL
        .with_label_values(&[resource_type, operation])
        .inc();
}

pub fn observe_sync_duration(duration: f64) {
    SYNC_DURATION.observe(duration);
}
