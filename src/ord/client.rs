//! # Document Client
//!
//! Fetches ORD documents for a webhook. The HTTP implementation reads the
//! well-known configuration endpoint and downloads every listed document that
//! can be fetched with the `open` access strategy.

use crate::constants::{OPEN_ACCESS_STRATEGY, WELL_KNOWN_CONFIG_PATH};
use crate::ord::model::{AccessStrategy, Document};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Documents served behind one webhook
#[derive(Debug, Clone, Default)]
pub struct FetchedDocuments {
    pub documents: Vec<Document>,
    /// `baseUrl` advertised by the well-known configuration
    pub base_url: Option<String>,
}

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_documents(&self, webhook_url: &str) -> Result<FetchedDocuments>;
}

/// Well-known ORD configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellKnownConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(rename = "openResourceDiscoveryV1", default)]
    pub open_resource_discovery_v1: DocumentsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default)]
    pub documents: Vec<DocumentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetails {
    pub url: String,
    #[serde(default)]
    pub access_strategies: Vec<AccessStrategy>,
}

impl DocumentDetails {
    fn is_open(&self) -> bool {
        self.access_strategies
            .iter()
            .any(|strategy| strategy.strategy_type == OPEN_ACCESS_STRATEGY)
    }
}

/// `DocumentFetcher` over HTTP
#[derive(Debug, Clone)]
pub struct HttpDocumentFetcher {
    client: Client,
}

impl HttpDocumentFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    async fn fetch_config(&self, webhook_url: &str) -> Result<WellKnownConfig> {
        let config_url = format!("{}{}", webhook_url.trim_end_matches('/'), WELL_KNOWN_CONFIG_PATH);
        debug!("Fetching ORD configuration from {}", config_url);
        self.client
            .get(&config_url)
            .send()
            .await
            .with_context(|| format!("Failed to request ORD configuration from {config_url}"))?
            .error_for_status()
            .with_context(|| format!("ORD configuration endpoint {config_url} returned an error"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse ORD configuration from {config_url}"))
    }

    async fn fetch_document(&self, document_url: Url) -> Result<Document> {
        debug!("Fetching ORD document {}", document_url);
        self.client
            .get(document_url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to request ORD document {document_url}"))?
            .error_for_status()
            .with_context(|| format!("ORD document {document_url} returned an error"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse ORD document {document_url}"))
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch_documents(&self, webhook_url: &str) -> Result<FetchedDocuments> {
        let webhook = Url::parse(webhook_url)
            .with_context(|| format!("Invalid webhook URL {webhook_url}"))?;
        let config = self.fetch_config(webhook_url).await?;

        let mut document_urls = Vec::new();
        for details in &config.open_resource_discovery_v1.documents {
            if !details.is_open() {
                warn!(
                    "Skipping ORD document {} of webhook {}: no supported access strategy",
                    details.url, webhook_url
                );
                continue;
            }
            let url = webhook
                .join(&details.url)
                .with_context(|| format!("Invalid ORD document URL {}", details.url))?;
            document_urls.push(url);
        }

        let documents =
            try_join_all(document_urls.into_iter().map(|url| self.fetch_document(url))).await?;
        info!(
            "Fetched {} ORD document(s) from webhook {}",
            documents.len(),
            webhook_url
        );

        Ok(FetchedDocuments {
            documents,
            base_url: config.base_url.filter(|url| !url.is_empty()),
        })
    }
}
