//! Document metadata repository port.

use async_trait::async_trait;

use crate::entities::DocumentMetadata;
use crate::error::Result;
use crate::value_objects::DocumentId;

/// Persistence port for [`DocumentMetadata`] (spec §3: created once per
/// document, re-created only if re-extraction is requested).
#[async_trait]
pub trait DocumentMetadataRepository: Send + Sync {
    /// Insert or replace the metadata satellite for a document.
    async fn upsert(&self, metadata: &DocumentMetadata) -> Result<()>;

    /// Fetch metadata for a document, if it has been extracted.
    async fn get(&self, doc_id: DocumentId) -> Result<Option<DocumentMetadata>>;

    /// Delete metadata for a document (e.g. as part of `delete_without_metadata`).
    async fn delete(&self, doc_id: DocumentId) -> Result<()>;
}
