//! Scraping orchestrator use case (spec §4.B).
//!
//! Owns one `tokio::task` per in-flight job behind a process-local
//! `DashMap<JobId, JobHandle>`, injected rather than held as a singleton.
//! Cancellation is cooperative via `tokio_util::sync::CancellationToken`,
//! polled at three checkpoints per run.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use govdocs_domain::entities::ScrapeJob;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{DialectScraper, Downloader};
use govdocs_domain::ports::repositories::{DocumentRepository, JobRepository, SourceRepository};
use govdocs_domain::value_objects::{Dialect, JobId, ScrapeJobStatus, SourceId};

use crate::constants::{MIN_DOCUMENT_DELAY_MS, MIN_PAGE_DELAY_MS};
use crate::ports::services::{ProcessOutcome, ScrapeOrchestratorInterface, ScrapeOverrides};
use crate::ports::DocumentProcessorInterface;

/// Tracking for one in-flight job; dropped once the job reaches a terminal state.
struct JobHandle {
    cancel: CancellationToken,
}

/// Per-source scrape policy snapshot carried into `run_job`, so a running
/// job is insulated from the source being edited concurrently.
#[derive(Clone, Copy)]
struct SourceDefaults {
    max_docs: u32,
    max_pages: u32,
    pagination_enabled: bool,
    window_size: u32,
}

/// Per-source crawl orchestrator (spec §4.B).
pub struct ScrapeOrchestrator {
    source_repo: Arc<dyn SourceRepository>,
    job_repo: Arc<dyn JobRepository>,
    document_repo: Arc<dyn DocumentRepository>,
    downloader: Arc<dyn Downloader>,
    dialect_scrapers: HashMap<Dialect, Arc<dyn DialectScraper>>,
    document_processor: Arc<dyn DocumentProcessorInterface>,
    jobs: Arc<DashMap<JobId, JobHandle>>,
    /// Bounds the number of scrape jobs running concurrently across all sources.
    job_pool: Arc<Semaphore>,
}

impl ScrapeOrchestrator {
    /// Construct a new orchestrator. `concurrent_job_limit` bounds the
    /// process-wide scrape-job pool (spec §5, default 1 per source).
    #[must_use]
    pub fn new(
        source_repo: Arc<dyn SourceRepository>,
        job_repo: Arc<dyn JobRepository>,
        document_repo: Arc<dyn DocumentRepository>,
        downloader: Arc<dyn Downloader>,
        dialect_scrapers: HashMap<Dialect, Arc<dyn DialectScraper>>,
        document_processor: Arc<dyn DocumentProcessorInterface>,
        concurrent_job_limit: usize,
    ) -> Self {
        Self {
            source_repo,
            job_repo,
            document_repo,
            downloader,
            dialect_scrapers,
            document_processor,
            jobs: Arc::new(DashMap::new()),
            job_pool: Arc::new(Semaphore::new(concurrent_job_limit.max(1))),
        }
    }

    async fn run_job(
        source_repo: Arc<dyn SourceRepository>,
        job_repo: Arc<dyn JobRepository>,
        document_repo: Arc<dyn DocumentRepository>,
        downloader: Arc<dyn Downloader>,
        scraper: Arc<dyn DialectScraper>,
        document_processor: Arc<dyn DocumentProcessorInterface>,
        job_pool: Arc<Semaphore>,
        jobs: Arc<DashMap<JobId, JobHandle>>,
        mut job: ScrapeJob,
        source_id: SourceId,
        base_url: String,
        source_defaults: SourceDefaults,
        overrides: ScrapeOverrides,
        cancel: CancellationToken,
    ) {
        let _permit = job_pool.acquire().await;
        let max_docs = overrides.max_documents.unwrap_or(source_defaults.max_docs);
        let max_pages = overrides.max_pages.unwrap_or(source_defaults.max_pages);
        let pagination_enabled = overrides
            .pagination_enabled
            .unwrap_or(source_defaults.pagination_enabled);
        let max_pages = if pagination_enabled { max_pages } else { 1 };
        let window_size = if overrides.force_full_scan {
            max_pages
        } else {
            source_defaults.window_size.min(max_pages)
        };

        let mut next_url = Some(base_url.clone());
        let mut page_index = 0u32;
        let mut zero_new_streak = 0u32;

        let outcome: Result<()> = 'outer: loop {
            let Some(url) = next_url.take() else { break Ok(()) };
            if page_index >= max_pages || job.documents_found >= max_docs {
                break Ok(());
            }
            // Checkpoint (i): before starting each pagination page.
            if cancel.is_cancelled() {
                job.request_stop();
                break Ok(());
            }

            let html = match downloader.fetch(&url, &base_url).await {
                Ok(fetched) => String::from_utf8_lossy(&fetched.bytes).into_owned(),
                Err(err) => {
                    tracing::warn!(page_url = %url, error = %err, "listing page fetch failed, continuing crawl");
                    page_index += 1;
                    continue;
                }
            };

            let listing = match scraper.parse_listing(&html, &url) {
                Ok(listing) => listing,
                Err(err) => {
                    tracing::warn!(page_url = %url, error = %err, "listing page parse failed, continuing crawl");
                    page_index += 1;
                    continue;
                }
            };

            let mut new_this_page = 0u32;
            for link in listing.links {
                if job.documents_found >= max_docs {
                    break;
                }
                // Checkpoint (ii): before fetching each document.
                if cancel.is_cancelled() {
                    job.request_stop();
                    break 'outer Ok(());
                }

                if let Ok(Some(existing)) = document_repo
                    .find_by_source_url(source_id, &link.url)
                    .await
                {
                    job.record_document(false);
                    let _ = existing;
                    tokio::time::sleep(Duration::from_millis(MIN_DOCUMENT_DELAY_MS)).await;
                    continue;
                }

                let fetched = match downloader.fetch(&link.url, &base_url).await {
                    Ok(fetched) => fetched,
                    Err(err) => {
                        tracing::warn!(doc_url = %link.url, error = %err, "document download failed after retries");
                        tokio::time::sleep(Duration::from_millis(MIN_DOCUMENT_DELAY_MS)).await;
                        continue;
                    }
                };

                // Checkpoint (iii): between processing stages of a document.
                if cancel.is_cancelled() {
                    job.request_stop();
                    break 'outer Ok(());
                }

                let outcome = document_processor
                    .process(
                        source_id,
                        &link.url,
                        link.title.as_deref(),
                        fetched.bytes,
                        fetched.content_type.as_deref(),
                    )
                    .await;

                match outcome {
                    Ok(ProcessOutcome::New(_)) => {
                        job.record_document(true);
                        new_this_page += 1;
                    }
                    Ok(ProcessOutcome::Unchanged(_)) => job.record_document(false),
                    Ok(ProcessOutcome::DroppedNoMetadata) => job.record_metadata_failure(),
                    Err(err) => {
                        tracing::warn!(doc_url = %link.url, error = %err, "document processing failed");
                        job.record_metadata_failure();
                    }
                }

                let _ = job_repo.update(&job).await;
                tokio::time::sleep(Duration::from_millis(MIN_DOCUMENT_DELAY_MS)).await;
            }

            job.record_page();
            let _ = job_repo.update(&job).await;

            zero_new_streak = if new_this_page == 0 { zero_new_streak + 1 } else { 0 };
            page_index += 1;
            next_url = listing.next_page_url;

            let past_window = page_index >= window_size;
            if past_window && zero_new_streak >= 1 {
                break Ok(());
            }

            tokio::time::sleep(Duration::from_millis(MIN_PAGE_DELAY_MS)).await;
        };

        let final_status = if job.status == ScrapeJobStatus::Stopping {
            ScrapeJobStatus::Stopped
        } else {
            match &outcome {
                Ok(()) => ScrapeJobStatus::Succeeded,
                Err(_) => ScrapeJobStatus::Failed,
            }
        };
        job.finish(final_status, outcome.err().map(|e| e.to_string()));
        let _ = job_repo.update(&job).await;
        if let Ok(mut source) = source_repo.get_by_id(source_id).await {
            source.last_scraped_at = Some(govdocs_domain::utils::unix_now());
            source.stats.accumulate(&job);
            let _ = source_repo.update(&source).await;
        }
        jobs.remove(&job.id);
    }
}

#[async_trait]
impl ScrapeOrchestratorInterface for ScrapeOrchestrator {
    async fn start(&self, source_id: SourceId, overrides: ScrapeOverrides) -> Result<JobId> {
        let source = self.source_repo.get_by_id(source_id).await?;
        if !source.enabled {
            return Err(Error::invalid("source is disabled"));
        }
        let scraper = self
            .dialect_scrapers
            .get(&source.dialect)
            .cloned()
            .ok_or_else(|| Error::Config {
                message: format!("no scraper registered for dialect {}", source.dialect),
            })?;

        let job = ScrapeJob::new(source_id);
        self.job_repo.create(&job).await?;

        let cancel = CancellationToken::new();
        self.jobs.insert(job.id, JobHandle { cancel: cancel.clone() });

        let job_id = job.id;
        let source_defaults = SourceDefaults {
            max_docs: source.max_docs,
            max_pages: source.max_pages,
            pagination_enabled: source.pagination_enabled,
            window_size: source.window_size,
        };
        tokio::spawn(Self::run_job(
            self.source_repo.clone(),
            self.job_repo.clone(),
            self.document_repo.clone(),
            self.downloader.clone(),
            scraper,
            self.document_processor.clone(),
            self.job_pool.clone(),
            self.jobs.clone(),
            job,
            source_id,
            source.base_url,
            source_defaults,
            overrides,
            cancel,
        ));

        Ok(job_id)
    }

    async fn stop(&self, job_id: JobId) -> Result<ScrapeJob> {
        if let Some(handle) = self.jobs.get(&job_id) {
            handle.cancel.cancel();
        }
        let mut job = self.job_repo.get_by_id(job_id).await?;
        job.request_stop();
        self.job_repo.update(&job).await?;
        Ok(job)
    }

    async fn status(&self, job_id: JobId) -> Result<ScrapeJob> {
        self.job_repo.get_by_id(job_id).await
    }

    async fn active_jobs(&self) -> Result<Vec<ScrapeJob>> {
        self.job_repo.list_active().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_handle_cancellation_propagates_through_clone() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
