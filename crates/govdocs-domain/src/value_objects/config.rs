//! Provider-selection and connection configuration value objects.
//!
//! These are the domain-level shapes that [`crate::registry`] consults to
//! resolve a concrete provider; `govdocs-infrastructure` is responsible for
//! populating them from the layered configuration sources (spec §6's
//! "Environment" list).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Selects and configures an embedding provider (spec §4.I).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Registry key of the provider, e.g. `"openai"`, `"gemini"`, `"ollama"`, `"voyageai"`.
    pub provider: String,
    /// Model name passed to the provider.
    pub model: String,
    /// Canonical dimensionality all vectors are padded/validated to (spec §3, §4.I).
    pub canonical_dimensions: usize,
    /// API key, when the provider requires one.
    pub api_key: Option<String>,
    /// API base URL override, for self-hosted or proxy deployments.
    pub base_url: Option<String>,
    /// Maximum chunks submitted in a single provider batch call.
    pub batch_size: usize,
}

crate::impl_config_builder!(EmbeddingConfig {
    /// Set the API key.
    api_key: with_api_key(into String),
    /// Set the API base URL override.
    base_url: with_base_url(into String),
});

/// Selects and configures an LLM provider used for metadata extraction and
/// reranking (spec §4.F, §4.K).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Registry key of the provider, e.g. `"openai_compatible"`, `"gemini"`, `"anthropic"`, `"local"`.
    pub provider: String,
    /// Model name passed to the provider.
    pub model: String,
    /// API key, when the provider requires one.
    pub api_key: Option<String>,
    /// API base URL override.
    pub base_url: Option<String>,
    /// Per-call timeout in seconds (spec §5 default 60s).
    pub timeout_secs: u64,
    /// Character budget for the extraction prompt (spec §4.F default ~8,000).
    pub prompt_char_budget: usize,
}

crate::impl_config_builder!(LlmProviderConfig {
    /// Set the API key.
    api_key: with_api_key(into String),
    /// Set the API base URL override.
    base_url: with_base_url(into String),
});

/// Selects and configures the vector store backend (spec §4.J).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Registry key of the backend, e.g. `"memory"`, `"qdrant"`.
    pub provider: String,
    /// Connection URL, when the backend is networked.
    pub url: Option<String>,
    /// Collection/index name.
    pub collection: String,
    /// Expected vector dimensionality, must match `EmbeddingConfig::canonical_dimensions`.
    pub dimensions: usize,
}

crate::impl_config_builder!(VectorStoreConfig {
    /// Set the connection URL.
    url: with_url(into String),
});

/// Selects and configures the object-store backend (spec §4.G).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    /// Registry key of the backend, e.g. `"filesystem"`, `"s3"`.
    pub provider: String,
    /// Root path (filesystem) or bucket name (s3).
    pub bucket_or_root: String,
    /// Region, for S3-compatible backends.
    pub region: Option<String>,
    /// Endpoint override, for S3-compatible non-AWS backends.
    pub endpoint: Option<String>,
    /// Public base URL used to materialize a reachable `blob_url` (spec §3).
    pub public_base_url: Option<String>,
}

crate::impl_config_builder!(ObjectStoreConfig {
    /// Set the region.
    region: with_region(into String),
    /// Set the endpoint override.
    endpoint: with_endpoint(into String),
    /// Set the public base URL.
    public_base_url: with_public_base_url(into String),
});

/// Selects and configures the cache backend used to memoize listing-page
/// fetches and LLM metadata calls (spec §4.B).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Registry key of the backend, e.g. `"moka"`, `"redis"`.
    pub provider: String,
    /// Maximum number of entries held in the cache.
    pub max_capacity: u64,
    /// Connection URL, for networked backends.
    pub url: Option<String>,
    /// Additional backend-specific settings.
    pub extra: HashMap<String, String>,
}

crate::impl_config_builder!(CacheConfig {
    /// Set the connection URL.
    url: with_url(into String),
});
