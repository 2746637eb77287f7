//! S3-compatible object-store provider (spec §4.G), backed by the
//! `object_store` crate's `aws` feature. Works against real S3 or a
//! MinIO endpoint via `endpoint`.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::ObjectStoreProvider;
use govdocs_domain::registry::{OBJECT_STORE_PROVIDERS, ObjectStoreProviderEntry};
use govdocs_domain::value_objects::ObjectStoreConfig;
use object_store::ObjectStore as OsStore;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as OsPath;

/// Stores document blobs in an S3-compatible bucket.
#[derive(Debug)]
pub struct S3ObjectStore {
    store: Box<dyn OsStore>,
    public_base_url: Option<String>,
}

impl S3ObjectStore {
    /// Build a store from `config`, picking up AWS credentials from the
    /// environment (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, etc).
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `bucket_or_root` is empty or the
    /// underlying client fails to build.
    pub fn new(config: &ObjectStoreConfig) -> Result<Self> {
        if config.bucket_or_root.trim().is_empty() {
            return Err(Error::Config { message: "s3 object store requires bucket_or_root (the bucket name)".to_string() });
        }
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(&config.bucket_or_root);
        if let Some(region) = &config.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }
        let store = builder.build().map_err(|e| Error::Config { message: format!("building s3 client: {e}") })?;
        Ok(Self { store: Box::new(store), public_base_url: config.public_base_url.clone() })
    }
}

fn os_path(key: &str) -> Result<OsPath> {
    if key.contains("..") {
        return Err(Error::invalid(format!("object key '{key}' must not contain '..'")));
    }
    OsPath::parse(key).map_err(|e| Error::invalid(format!("invalid object key '{key}': {e}")))
}

#[async_trait]
impl ObjectStoreProvider for S3ObjectStore {
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
        "s3"
    }
}

impl S3ObjectStore {
    /// Public URL for `key`, if a base URL was configured (e.g. a CDN or
    /// bucket website endpoint).
    #[must_use]
    pub fn public_url(&self, key: &str) -> Option<String> {
        self.public_base_url.as_ref().map(|base| format!("{}/{key}", base.trim_end_matches('/')))
    }
}

fn factory(config: &ObjectStoreConfig) -> std::result::Result<Arc<dyn ObjectStoreProvider>, String> {
    S3ObjectStore::new(config).map(|p| Arc::new(p) as Arc<dyn ObjectStoreProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(OBJECT_STORE_PROVIDERS)]
static S3_PROVIDER: ObjectStoreProviderEntry =
    ObjectStoreProviderEntry { name: "s3", description: "S3-compatible blob storage (works against MinIO)", build: factory };
