//! Cache Provider Port

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Namespace-scoped key/value cache used to memoize expensive lookups
/// (listing-page fetches, LLM metadata calls).
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Fetch a cached JSON value by key.
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Store a JSON value under `key`, expiring after `ttl`.
    async fn set_json(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Remove a key; returns whether it was present.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Number of live entries.
    async fn size(&self) -> Result<usize>;

    /// Identifier of this provider implementation, e.g. `"moka"`.
    fn provider_name(&self) -> &str;
}
