//! Vector store provider registry (spec §4.J).

use crate::ports::providers::VectorStoreProvider;
use crate::value_objects::VectorStoreConfig;

crate::impl_registry!(
    provider_trait: VectorStoreProvider,
    config_type: VectorStoreConfig,
    entry_type: VectorStoreProviderEntry,
    slice_name: VECTOR_STORE_PROVIDERS,
    resolve_fn: resolve_vector_store_provider,
    list_fn: list_vector_store_providers
);
