//! Cache provider registry (spec §4.B).

use crate::ports::providers::CacheProvider;
use crate::value_objects::CacheConfig;

crate::impl_registry!(
    provider_trait: CacheProvider,
    config_type: CacheConfig,
    entry_type: CacheProviderEntry,
    slice_name: CACHE_PROVIDERS,
    resolve_fn: resolve_cache_provider,
    list_fn: list_cache_providers
);
