//! Embedding provider registry (spec §4.I).

use crate::ports::providers::EmbeddingProvider;
use crate::value_objects::EmbeddingConfig;

crate::impl_registry!(
    provider_trait: EmbeddingProvider,
    config_type: EmbeddingConfig,
    entry_type: EmbeddingProviderEntry,
    slice_name: EMBEDDING_PROVIDERS,
    resolve_fn: resolve_embedding_provider,
    list_fn: list_embedding_providers
);
