//! External sync log entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::value_objects::{ExternalDataSourceId, SyncLogId};

/// Outcome of a single sync run against an [`crate::entities::ExternalDataSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Running,
    Succeeded,
    PartiallyFailed,
    Failed,
}

/// Record of one sync run against an external data source (spec §4.L).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SyncLog {
    /// Unique identifier.
    pub id: SyncLogId,
    /// The external data source synced from.
    pub external_source_id: ExternalDataSourceId,
    /// Run outcome.
    pub status: SyncStatus,
    /// Records successfully ingested.
    pub records_synced: u32,
    /// Records skipped or failed.
    pub records_failed: u32,
    /// Started timestamp (Unix epoch seconds).
    pub started_at: i64,
    /// Completion timestamp, set once the run reaches a terminal state.
    pub finished_at: Option<i64>,
    /// Error summary, set only when `status` indicates failure.
    pub error_message: Option<String>,
}
