//! Object/blob store provider registry (spec §4.G).

use crate::ports::providers::ObjectStoreProvider;
use crate::value_objects::ObjectStoreConfig;

crate::impl_registry!(
    provider_trait: ObjectStoreProvider,
    config_type: ObjectStoreConfig,
    entry_type: ObjectStoreProviderEntry,
    slice_name: OBJECT_STORE_PROVIDERS,
    resolve_fn: resolve_object_store_provider,
    list_fn: list_object_store_providers
);
