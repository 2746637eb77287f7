//! Source repository port.

use async_trait::async_trait;

use crate::entities::Source;
use crate::error::Result;
use crate::value_objects::SourceId;

/// Persistence port for [`Source`].
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Create a new source.
    async fn create(&self, source: &Source) -> Result<()>;

    /// Fetch a source by id.
    async fn get_by_id(&self, id: SourceId) -> Result<Source>;

    /// List all enabled sources.
    async fn list_enabled(&self) -> Result<Vec<Source>>;

    /// List every registered source.
    async fn list_all(&self) -> Result<Vec<Source>>;

    /// Persist changes to an existing source.
    async fn update(&self, source: &Source) -> Result<()>;

    /// Remove a source.
    async fn delete(&self, id: SourceId) -> Result<()>;
}
