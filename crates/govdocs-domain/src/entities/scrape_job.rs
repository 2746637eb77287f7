//! Scrape job entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value_objects::{JobId, ScrapeJobStatus, SourceId};

/// A single run of the scrape orchestrator against one [`crate::entities::Source`]
/// (spec §3, §4.B).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeJob {
    /// Unique identifier.
    pub id: JobId,
    /// Source this job is scraping.
    pub source_id: SourceId,
    /// Current lifecycle status.
    pub status: ScrapeJobStatus,
    /// Number of listing pages visited so far.
    pub pages_visited: u32,
    /// Total documents discovered (new + already-known).
    pub documents_found: u32,
    /// Documents whose content hash had not been seen before (spec invariant 3).
    pub documents_new: u32,
    /// Documents matched to an existing record with an identical content hash (spec §4.B dedup).
    pub documents_unchanged: u32,
    /// Documents whose metadata extraction failed both providers (spec §4.F).
    pub documents_failed_metadata: u32,
    /// Started timestamp (Unix epoch seconds).
    pub started_at: i64,
    /// Completion timestamp, set once the job reaches a terminal state.
    pub finished_at: Option<i64>,
    /// Error summary, set only when `status == Failed`.
    pub error_message: Option<String>,
}

impl ScrapeJob {
    /// Start a new job for `source_id`.
    #[must_use]
    pub fn new(source_id: SourceId) -> Self {
        Self {
            id: JobId::new(),
            source_id,
            status: ScrapeJobStatus::Running,
            pages_visited: 0,
            documents_found: 0,
            documents_new: 0,
            documents_unchanged: 0,
            documents_failed_metadata: 0,
            started_at: crate::utils::unix_now(),
            finished_at: None,
            error_message: None,
        }
    }

    /// Record a successfully processed listing page.
    pub fn record_page(&mut self) {
        self.pages_visited += 1;
    }

    /// Record a discovered document, `is_new` when its content hash was unseen.
    pub fn record_document(&mut self, is_new: bool) {
        self.documents_found += 1;
        if is_new {
            self.documents_new += 1;
        } else {
            self.documents_unchanged += 1;
        }
    }

    /// Record a document whose metadata extraction failed on every configured provider.
    pub fn record_metadata_failure(&mut self) {
        self.documents_failed_metadata += 1;
    }

    /// Request cooperative cancellation. Only valid while `Running`.
    pub fn request_stop(&mut self) {
        if self.status == ScrapeJobStatus::Running {
            self.status = ScrapeJobStatus::Stopping;
        }
    }

    /// Transition to a terminal state and stamp `finished_at`.
    pub fn finish(&mut self, status: ScrapeJobStatus, error_message: Option<String>) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.error_message = error_message;
        self.finished_at = Some(crate::utils::unix_now());
    }
}
