//! Filesystem object-store provider (spec §4.G), backed by the `object_store` crate.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::ObjectStoreProvider;
use govdocs_domain::registry::{OBJECT_STORE_PROVIDERS, ObjectStoreProviderEntry};
use govdocs_domain::value_objects::ObjectStoreConfig;
use object_store::ObjectStore as OsStore;
use object_store::local::LocalFileSystem;
use object_store::path::Path as OsPath;

/// Stores document blobs under a root directory on local disk.
#[derive(Debug)]
pub struct FilesystemObjectStore {
    store: LocalFileSystem,
}

impl FilesystemObjectStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let store = LocalFileSystem::new_with_prefix(root)
            .map_err(|e| Error::ObjectStore { message: format!("creating filesystem root: {e}") })?;
        Ok(Self { store })
    }
}

fn os_path(key: &str) -> Result<OsPath> {
    if key.contains("..") {
        return Err(Error::invalid(format!("object key '{key}' must not contain '..'")));
    }
    OsPath::parse(key).map_err(|e| Error::invalid(format!("invalid object key '{key}': {e}")))
}

#[async_trait]
impl ObjectStoreProvider for FilesystemObjectStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<()> {
        self.store
            .put(&os_path(key)?, bytes.into())
            .await
            .map_err(|e| Error::ObjectStore { message: format!("writing '{key}': {e}") })?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let result = self
            .store
            .get(&os_path(key)?)
            .await
            .map_err(|e| Error::ObjectStore { message: format!("reading '{key}': {e}") })?;
        result.bytes().await.map_err(|e| Error::ObjectStore { message: format!("reading '{key}': {e}") })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self.store.delete(&os_path(key)?).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(Error::ObjectStore { message: format!("deleting '{key}': {e}") }),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        match self.store.head(&os_path(key)?).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(Error::ObjectStore { message: format!("checking '{key}': {e}") }),
        }
    }

    fn provider_name(&self) -> &str {
        "filesystem"
    }
}

fn filesystem_factory(config: &ObjectStoreConfig) -> std::result::Result<Arc<dyn ObjectStoreProvider>, String> {
    if config.bucket_or_root.trim().is_empty() {
        return Err("filesystem object store requires bucket_or_root (the root path)".to_string());
    }
    std::fs::create_dir_all(&config.bucket_or_root).map_err(|e| e.to_string())?;
    let store = FilesystemObjectStore::new(&config.bucket_or_root).map_err(|e| e.to_string())?;
    Ok(Arc::new(store))
}

#[linkme::distributed_slice(OBJECT_STORE_PROVIDERS)]
static FILESYSTEM_PROVIDER: ObjectStoreProviderEntry = ObjectStoreProviderEntry {
    name: "filesystem",
    description: "Local filesystem blob storage",
    build: filesystem_factory,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemObjectStore::new(dir.path()).unwrap();
        store.put("a/b.txt", Bytes::from_static(b"hello")).await.unwrap();
        assert_eq!(store.get("a/b.txt").await.unwrap(), Bytes::from_static(b"hello"));
        assert!(store.exists("a/b.txt").await.unwrap());
        store.delete("a/b.txt").await.unwrap();
        assert!(!store.exists("a/b.txt").await.unwrap());
    }

    #[tokio::test]
    async fn path_traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemObjectStore::new(dir.path()).unwrap();
        assert!(store.put("../escape.txt", Bytes::from_static(b"x")).await.is_err());
    }
}
