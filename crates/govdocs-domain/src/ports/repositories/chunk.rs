//! Chunk repository port.

use async_trait::async_trait;

use crate::entities::Chunk;
use crate::error::Result;
use crate::value_objects::DocumentId;

/// Persistence port for [`Chunk`] (spec §4.H).
///
/// Chunks are content-addressed by `(doc_id, chunk_index)`; `replace_all`
/// is the only write operation because re-chunking always supersedes the
/// entire prior set rather than patching individual entries.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    /// Replace every chunk belonging to `doc_id` with `chunks`.
    async fn replace_all(&self, doc_id: DocumentId, chunks: &[Chunk]) -> Result<()>;

    /// Fetch all chunks for a document, ordered by `chunk_index`.
    async fn list_for_document(&self, doc_id: DocumentId) -> Result<Vec<Chunk>>;

    /// Fetch a single chunk's text by its content address, used to resolve
    /// a [`crate::value_objects::SearchResult::text_ref`].
    async fn get(&self, doc_id: DocumentId, chunk_index: crate::value_objects::ChunkIndex) -> Result<Option<Chunk>>;

    /// Delete all chunks for a document.
    async fn delete_for_document(&self, doc_id: DocumentId) -> Result<()>;
}
