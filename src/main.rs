//! # ORD Aggregator
//!
//! Dry run against live ORD providers: every webhook URL in `ORD_WEBHOOK_URLS`
//! is fetched, validated and sanitized, and the outcome is logged. Nothing is
//! persisted.

use anyhow::{Context, Result};
use ord_aggregator::config::AggregatorConfig;
use ord_aggregator::observability;
use ord_aggregator::ord::client::{DocumentFetcher, HttpDocumentFetcher};
use ord_aggregator::ord::hash::compute_resource_hashes;
use ord_aggregator::ord::resource::ResourceType;
use ord_aggregator::ord::sanitizer::Sanitizer;
use ord_aggregator::ord::snapshot::ResourcesFromDb;
use ord_aggregator::ord::validation::Validator;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AggregatorConfig::from_env();
    observability::init_tracing(&config)?;

    info!(
        "Starting ORD Aggregator dry run (build {} at {})",
        env!("BUILD_GIT_HASH"),
        env!("BUILD_DATETIME")
    );

    if config.enable_metrics {
        observability::register_metrics().context("Failed to register metrics")?;
    }

    if config.webhook_urls.is_empty() {
        warn!("ORD_WEBHOOK_URLS is empty, nothing to do");
        return Ok(());
    }

    let fetcher = HttpDocumentFetcher::new(config.client_timeout())?;
    let validator = Validator::from_config(&config);
    let sanitizer = Sanitizer::new();

    let mut failed = 0;
    for webhook_url in &config.webhook_urls {
        if let Err(e) = dry_run(&config, &fetcher, &validator, &sanitizer, webhook_url).await {
            error!("Dry run failed for webhook {}: {:#}", webhook_url, e);
            observability::increment_application_errors();
            failed += 1;
        } else {
            observability::increment_applications_processed();
        }
    }

    if config.enable_metrics {
        println!("{}", observability::render_metrics()?);
    }

    info!(
        "Dry run finished: {} webhook(s), {} failed",
        config.webhook_urls.len(),
        failed
    );
    Ok(())
}

async fn dry_run(
    config: &AggregatorConfig,
    fetcher: &HttpDocumentFetcher,
    validator: &Validator,
    sanitizer: &Sanitizer,
    webhook_url: &str,
) -> Result<()> {
    let fetched = fetcher.fetch_documents(webhook_url).await?;
    observability::increment_documents_fetched(fetched.documents.len());
    let mut documents = fetched.documents;

    let hashes = compute_resource_hashes(&documents).context("Failed to hash ORD resources")?;
    let base_url = fetched
        .base_url
        .or_else(|| config.base_url.clone())
        .unwrap_or_default();

    let report = validator
        .validate(&mut documents, &base_url, &ResourcesFromDb::new(), &hashes)
        .context("ORD documents failed validation")?;
    for issue in &report.issues {
        warn!(ord_id = %issue.ord_id, code = issue.code, "{}: {}", issue.severity, issue.description);
    }
    observability::increment_validation_issues("error", report.errors().count());
    observability::increment_validation_issues("warning", report.warnings().count());

    sanitizer
        .sanitize(&mut documents, &report.base_url, &config.webhook_proxy_url)
        .context("Failed to sanitize ORD documents")?;

    info!(
        "Webhook {}: {} document(s), {} package(s), {} API(s), {} event(s), {} issue(s)",
        webhook_url,
        documents.len(),
        report.index.count(ResourceType::Package),
        report.index.count(ResourceType::ApiResource),
        report.index.count(ResourceType::EventResource),
        report.issues.len()
    );
    Ok(())
}
