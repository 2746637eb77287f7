//! Provider auto-registration registry.
//!
//! Each concrete provider in `govdocs-providers` registers itself into one
//! of the `linkme` distributed slices declared below via
//! `#[linkme::distributed_slice(...)]`; `govdocs-infrastructure`'s DI
//! bootstrap resolves the configured provider by name at startup. Selection
//! is configuration-driven: a provider family is a name in `AppConfig`, not
//! a compile-time choice.

mod cache;
mod embedding;
mod llm;
mod object_store;
mod vector_store;

pub use cache::{CACHE_PROVIDERS, CacheProviderEntry, list_cache_providers, resolve_cache_provider};
pub use embedding::{
    EMBEDDING_PROVIDERS, EmbeddingProviderEntry, list_embedding_providers, resolve_embedding_provider,
};
pub use llm::{LLM_PROVIDERS, LlmProviderEntry, list_llm_providers, resolve_llm_provider};
pub use object_store::{
    OBJECT_STORE_PROVIDERS, ObjectStoreProviderEntry, list_object_store_providers,
    resolve_object_store_provider,
};
pub use vector_store::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderEntry, list_vector_store_providers,
    resolve_vector_store_provider,
};
