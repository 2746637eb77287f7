//! Object/Blob Store Provider Port (spec §4.G)

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Stores raw document bytes outside the primary database, for sources
/// configured with `StorageKind::ObjectStore`.
#[async_trait]
pub trait ObjectStoreProvider: Send + Sync + std::fmt::Debug {
    /// Write `bytes` under `key`, overwriting any existing object.
    async fn put(&self, key: &str, bytes: Bytes) -> Result<()>;

    /// Read the object stored at `key`.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Delete the object at `key`; a no-op if it does not exist.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Whether an object exists at `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Identifier of this backend implementation, e.g. `"s3"`, `"filesystem"`.
    fn provider_name(&self) -> &str;
}
