//! # Application Loop
//!
//! Pages through all applications and reconciles each one inside its own
//! transaction. A failing application is logged, counted and rolled back; the
//! loop moves on to the next one.

use super::services::Application;
use super::types::{Reconciler, ReconcilerError, SyncSummary};
use crate::constants::ORD_WEBHOOK_TYPE;
use crate::observability;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

impl Reconciler {
    /// Reconcile the ORD documents of every application
    ///
    /// Only a failure to list applications aborts the run. The shutdown flag is
    /// checked before each application.
    pub async fn sync_ord_documents(&self) -> Result<SyncSummary, ReconcilerError> {
        let start = Instant::now();
        let mut summary = SyncSummary::default();
        let mut cursor: Option<String> = None;
        let mut page_number = 0;

        'pages: loop {
            page_number += 1;
            let page = self
                .applications
                .list_page(self.page_size, cursor.as_deref())
                .await
                .map_err(|source| ReconcilerError::ListApplications {
                    page: page_number,
                    source,
                })?;
            debug!("Listed {} application(s) on page {}", page.data.len(), page_number);

            for app in &page.data {
                if self.is_shutting_down() {
                    info!("Shutdown requested, stopping ORD sync before application {}", app.id);
                    summary.cancelled = true;
                    break 'pages;
                }

                let span = info_span!("ord.application", app_id = %app.id);
                match self.sync_application(app).instrument(span).await {
                    Ok(()) => {
                        summary.applications_processed += 1;
                        observability::increment_applications_processed();
                    }
                    Err(e) => {
                        error!(app_id = %app.id, "Failed to sync ORD documents: {}", e);
                        summary.applications_failed += 1;
                        observability::increment_application_errors();
                    }
                }
            }

            if !page.has_next_page {
                break;
            }
            match page.end_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    warn!("Application page {} reports more pages but no cursor", page_number);
                    break;
                }
            }
        }

        let elapsed = start.elapsed().as_secs_f64();
        observability::observe_sync_duration(elapsed);
        info!(
            "ORD sync finished in {:.2}s: {} application(s) processed, {} failed",
            elapsed, summary.applications_processed, summary.applications_failed
        );
        Ok(summary)
    }

    /// One application inside its own transaction
    async fn sync_application(&self, app: &Application) -> Result<(), ReconcilerError> {
        let transaction_error = |source: anyhow::Error| ReconcilerError::Transaction {
            app: app.id.clone(),
            source,
        };

        let mut tx = self.transactioner.begin().await.map_err(transaction_error)?;
        let result = match self.fetch_and_process(app).await {
            Ok(()) => tx.commit().await.map_err(transaction_error),
            Err(e) => Err(e),
        };
        if let Err(e) = tx.rollback_unless_committed().await {
            warn!(app_id = %app.id, "Failed to roll back transaction: {}", e);
        }
        result
    }

    async fn fetch_and_process(&self, app: &Application) -> Result<(), ReconcilerError> {
        let webhooks = self
            .webhooks
            .list_for_application(&app.id)
            .await
            .map_err(|source| ReconcilerError::ListWebhooks {
                app: app.id.clone(),
                source,
            })?;

        let mut documents = Vec::new();
        let mut base_url: Option<String> = None;
        let mut proxy_url: Option<String> = None;
        for webhook in webhooks.iter().filter(|w| w.webhook_type == ORD_WEBHOOK_TYPE) {
            let Some(url) = webhook.url.as_deref().filter(|url| !url.is_empty()) else {
                debug!(app_id = %app.id, "Webhook {} has no URL", webhook.id);
                continue;
            };

            let fetched = self.fetcher.fetch_documents(url).await.map_err(|source| {
                ReconcilerError::FetchDocuments {
                    webhook: url.to_string(),
                    app: app.id.clone(),
                    source,
                }
            })?;
            observability::increment_documents_fetched(fetched.documents.len());

            base_url = base_url.or(fetched.base_url);
            proxy_url = proxy_url.or_else(|| webhook.proxy_url.clone().filter(|url| !url.is_empty()));
            documents.extend(fetched.documents);
        }

        if documents.is_empty() {
            debug!(app_id = %app.id, "No ORD documents to process");
            return Ok(());
        }

        let base_url = base_url
            .or_else(|| app.base_url.clone())
            .or_else(|| self.base_url.clone())
            .unwrap_or_default();
        let proxy_url = proxy_url.unwrap_or_else(|| self.webhook_proxy_url.clone());
        self.process_documents(&app.id, documents, &base_url, &proxy_url)
            .await
    }
}
