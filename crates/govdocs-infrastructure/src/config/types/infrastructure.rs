//! Logging and cache configuration types.

use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Enable JSON output format.
    pub json_format: bool,
    /// Log to file in addition to stderr.
    pub file_output: Option<std::path::PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Cache providers, resolved against `govdocs_domain`'s `CACHE_PROVIDERS` registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CacheProvider {
    /// In-memory cache (Moka).
    #[default]
    Moka,
    /// Distributed cache (Redis).
    Redis,
}

impl CacheProvider {
    /// The registry key for this provider.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheProvider::Moka => "moka",
            CacheProvider::Redis => "redis",
        }
    }
}

/// Cache system configuration (spec §4.B: listing-page and LLM-call memoization).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CacheSystemConfig {
    /// Cache enabled.
    pub enabled: bool,
    /// Cache provider.
    pub provider: CacheProvider,
    /// Default TTL in seconds.
    pub default_ttl_secs: u64,
    /// Maximum cache size (entries).
    pub max_size: usize,
    /// Redis URL (for the Redis provider).
    pub redis_url: Option<String>,
}
