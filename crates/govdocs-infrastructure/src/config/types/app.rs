//! Top-level application configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use govdocs_domain::value_objects::{EmbeddingConfig, LlmProviderConfig, ObjectStoreConfig, VectorStoreConfig};

pub use super::infrastructure::{CacheProvider, CacheSystemConfig, LoggingConfig};
pub use super::server::{
    ServerConfig, ServerCorsConfig, ServerNetworkConfig, ServerSslConfig, ServerTimeoutConfig,
};

/// Database connection configuration. The `provider` string resolves a
/// concrete repository implementation (spec §4.A's `DatabaseExecutor`
/// abstraction); `url` is the DSN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Provider name, e.g. `"sqlite"`, `"postgres"`.
    #[serde(default = "DatabaseConfig::default_provider")]
    pub provider: String,
    /// Connection string / DSN.
    pub url: String,
    /// Maximum connection pool size.
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_provider() -> String {
        "sqlite".to_string()
    }

    fn default_max_connections() -> u32 {
        10
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: Self::default_provider(),
            url: "sqlite://govdocs.db".to_string(),
            max_connections: Self::default_max_connections(),
        }
    }
}

/// Symmetric-key material for the `CryptoProvider` port (spec §4.L:
/// external data source connection strings are encrypted at rest).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CryptoConfig {
    /// 32-byte AES-256-GCM key, hex-encoded. Read from an environment
    /// variable in production, never checked into `govdocs.toml`.
    pub key_hex: String,
}

/// Per-role override of the default LLM provider selection (spec §2:
/// "LLM provider selection per role" — e.g. ministry admins get the
/// higher-accuracy primary model, students get the cheaper fallback only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleProviderOverride {
    /// Role this override applies to, matched against `Role::as_str()`.
    pub role: String,
    /// Provider config to use instead of the default primary.
    pub llm: LlmProviderConfig,
}

/// Provider-selection configuration for a tiered collaborator (LLM metadata
/// extraction / rerank): a default, an optional fallback, and optional
/// per-role overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProviderSelectionConfig {
    /// Default (primary) provider.
    pub default: LlmProviderConfig,
    /// Fallback provider, tried when the default fails the quality gate
    /// or errors outright (spec §4.F).
    pub fallback: Option<LlmProviderConfig>,
    /// Per-role overrides of the default.
    #[serde(default)]
    pub role_overrides: Vec<RoleProviderOverride>,
}

impl ProviderSelectionConfig {
    /// Resolve the configured LLM provider for `role`, falling back to the default.
    #[must_use]
    pub fn for_role(&self, role: &str) -> &LlmProviderConfig {
        self.role_overrides
            .iter()
            .find(|o| o.role == role)
            .map_or(&self.default, |o| &o.llm)
    }
}

/// Named OCR engine configuration, keyed by `OcrProvider` registry name
/// (spec §4.E scopes engine selection out; `tesseract` is the bundled default).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OcrConfig {
    /// Registry key, e.g. `"tesseract"`, `"none"`.
    pub provider: String,
    /// Extra named configs, for deployments wiring more than one engine.
    #[serde(default)]
    pub configs: HashMap<String, String>,
}

/// Main application configuration, loaded via `figment` (spec §2 ambient
/// stack): `AppConfig::default()` then `govdocs.toml` then environment
/// overrides, validated fail-fast at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Listing-page/LLM-call cache configuration.
    #[serde(default)]
    pub cache: CacheSystemConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Credential-encryption key material.
    #[serde(default)]
    pub crypto: CryptoConfig,
    /// Embedding provider selection and canonical dimension.
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Vector store backend selection.
    #[serde(default)]
    pub vector_store: VectorStoreConfig,
    /// Object store backend selection.
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
    /// LLM provider selection (metadata extraction + rerank), per role.
    #[serde(default)]
    pub llm: ProviderSelectionConfig,
    /// OCR engine selection.
    #[serde(default)]
    pub ocr: OcrConfig,
    /// Process-wide concurrent scrape-job limit (spec §5).
    #[serde(default = "AppConfig::default_scrape_job_concurrency")]
    pub scrape_job_concurrency: usize,
    /// Embedding worker pool size (spec §5, default 5).
    #[serde(default = "AppConfig::default_embedding_workers")]
    pub embedding_workers: usize,
    /// Policy for a document whose metadata extraction fails both the
    /// primary and fallback LLM providers (spec §4.F/§9 open question):
    /// `true` drops the document outright, `false` (default, the lenient
    /// reading) keeps it with `metadata_status = failed`.
    #[serde(default)]
    pub delete_without_metadata: bool,
}

impl AppConfig {
    fn default_scrape_job_concurrency() -> usize {
        4
    }

    fn default_embedding_workers() -> usize {
        govdocs_domain::constants::DEFAULT_EMBEDDING_WORKERS
    }

    /// Translate [`CacheSystemConfig`] into the registry-facing
    /// [`govdocs_domain::value_objects::CacheConfig`].
    #[must_use]
    pub fn cache_provider_config(&self) -> govdocs_domain::value_objects::CacheConfig {
        govdocs_domain::value_objects::CacheConfig {
            provider: self.cache.provider.as_str().to_string(),
            max_capacity: self.cache.max_size as u64,
            url: self.cache.redis_url.clone(),
            extra: HashMap::new(),
        }
    }
}
