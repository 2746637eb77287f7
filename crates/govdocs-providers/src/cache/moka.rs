//! Moka in-memory cache provider (spec §4.B: memoizes listing-page fetches
//! and LLM metadata calls).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::CacheProvider;
use govdocs_domain::registry::{CACHE_PROVIDERS, CacheProviderEntry};
use govdocs_domain::value_objects::CacheConfig;
use moka::future::Cache;

/// Moka-based in-memory cache provider.
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, CachedValue>,
}

#[derive(Clone)]
struct CachedValue {
    bytes: Vec<u8>,
    expires_at: Option<Instant>,
}

impl MokaCacheProvider {
    /// Create a new cache with the given maximum entry count.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_capacity).build(),
        }
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let Some(cached) = self.cache.get(key).await else {
            return Ok(None);
        };
        if cached.expires_at.is_some_and(|exp| Instant::now() >= exp) {
            self.cache.invalidate(key).await;
            return Ok(None);
        }
        let json = String::from_utf8(cached.bytes)
            .map_err(|e| Error::Cache { message: format!("invalid UTF-8 in cached value: {e}") })?;
        Ok(Some(json))
    }

    async fn set_json(&self, key: &str, value: &str, ttl: std::time::Duration) -> Result<()> {
        let expires_at = if ttl.is_zero() { None } else { Instant::now().checked_add(ttl) };
        self.cache
            .insert(key.to_owned(), CachedValue { bytes: value.as_bytes().to_vec(), expires_at })
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.cache.contains_key(key);
        self.cache.invalidate(key).await;
        Ok(existed)
    }

    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider").field("entries", &self.cache.entry_count()).finish()
    }
}

fn moka_cache_factory(config: &CacheConfig) -> std::result::Result<Arc<dyn CacheProvider>, String> {
    let capacity = if config.max_capacity == 0 { 10_000 } else { config.max_capacity };
    Ok(Arc::new(MokaCacheProvider::new(capacity)))
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static MOKA_PROVIDER: CacheProviderEntry =
    CacheProviderEntry { name: "moka", description: "Moka high-performance in-memory cache", build: moka_cache_factory };

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = MokaCacheProvider::new(10);
        cache.set_json("k", "\"v\"", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get_json("k").await.unwrap(), Some("\"v\"".to_string()));
    }

    #[tokio::test]
    async fn delete_reports_prior_existence() {
        let cache = MokaCacheProvider::new(10);
        cache.set_json("k", "\"v\"", Duration::from_secs(60)).await.unwrap();
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
    }
}
