//! Scrape job repository port.

use async_trait::async_trait;

use crate::entities::ScrapeJob;
use crate::error::Result;
use crate::value_objects::{JobId, SourceId};

/// Persistence port for [`ScrapeJob`].
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Create a new job record.
    async fn create(&self, job: &ScrapeJob) -> Result<()>;

    /// Fetch a job by id.
    async fn get_by_id(&self, id: JobId) -> Result<ScrapeJob>;

    /// List jobs currently in a non-terminal state for `source_id`.
    async fn list_active_for_source(&self, source_id: SourceId) -> Result<Vec<ScrapeJob>>;

    /// List every active (non-terminal) job across all sources.
    async fn list_active(&self) -> Result<Vec<ScrapeJob>>;

    /// List jobs that finished before `cutoff_unix` (job-history retention sweep).
    async fn list_finished_before(&self, cutoff_unix: i64) -> Result<Vec<ScrapeJob>>;

    /// Persist changes to an existing job.
    async fn update(&self, job: &ScrapeJob) -> Result<()>;

    /// Delete a job record.
    async fn delete(&self, id: JobId) -> Result<()>;
}
