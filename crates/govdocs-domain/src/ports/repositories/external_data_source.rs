//! External data source repository port.

use async_trait::async_trait;

use crate::entities::ExternalDataSource;
use crate::error::Result;
use crate::value_objects::ExternalDataSourceId;

/// Persistence port for [`ExternalDataSource`] (spec §3, §4.L).
#[async_trait]
pub trait ExternalDataSourceRepository: Send + Sync {
    /// Register a new external data source.
    async fn create(&self, source: &ExternalDataSource) -> Result<()>;

    /// Fetch a source by id.
    async fn get_by_id(&self, id: ExternalDataSourceId) -> Result<ExternalDataSource>;

    /// List every registered external data source.
    async fn list_all(&self) -> Result<Vec<ExternalDataSource>>;

    /// Persist changes (e.g. `last_synced_at`) to an existing source.
    async fn update(&self, source: &ExternalDataSource) -> Result<()>;

    /// Remove a source.
    async fn delete(&self, id: ExternalDataSourceId) -> Result<()>;
}
