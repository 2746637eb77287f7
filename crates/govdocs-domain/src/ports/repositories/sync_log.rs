//! Sync log repository port.

use async_trait::async_trait;

use crate::entities::SyncLog;
use crate::error::Result;
use crate::value_objects::{ExternalDataSourceId, SyncLogId};

/// Append-only persistence port for [`SyncLog`] (spec §3, §4.L).
#[async_trait]
pub trait SyncLogRepository: Send + Sync {
    /// Append a new sync run record.
    async fn create(&self, log: &SyncLog) -> Result<()>;

    /// Persist the terminal state of a run already created.
    async fn update(&self, log: &SyncLog) -> Result<()>;

    /// Fetch a sync log by id.
    async fn get_by_id(&self, id: SyncLogId) -> Result<SyncLog>;

    /// List sync runs for a given external data source, newest first.
    async fn list_for_source(&self, source_id: ExternalDataSourceId) -> Result<Vec<SyncLog>>;
}
