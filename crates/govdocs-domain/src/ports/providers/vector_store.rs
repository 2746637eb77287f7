//! Vector Store Provider Port
//!
//! Abstraction over the backend that stores embedding vectors and answers
//! similarity search (spec §4.J). Concrete backends (in-memory, Qdrant)
//! live in `govdocs-providers`.

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{ChunkIndex, DocumentId, SearchResult, VectorFilter};

/// A vector plus the identifiers and metadata needed to retrieve its source
/// chunk once a search matches it.
#[derive(Debug, Clone)]
pub struct VectorRecord {
    /// Parent document.
    pub doc_id: DocumentId,
    /// Chunk ordinal within the document.
    pub chunk_index: ChunkIndex,
    /// The embedding vector, already padded to the store's configured width.
    pub vector: Vec<f32>,
    /// Metadata snapshot serialized as JSON, for filtering and citation
    /// rendering without a round trip to the document repository.
    pub metadata_json: String,
}

/// Stores and searches embedding vectors (spec §4.J).
#[async_trait]
pub trait VectorStoreProvider: Send + Sync + std::fmt::Debug {
    /// Ensure the backing collection exists with the given dimensionality.
    async fn ensure_collection(&self, collection: &str, dimensions: usize) -> Result<()>;

    /// Upsert vectors into `collection`. Overwrites any existing vector for
    /// the same `(doc_id, chunk_index)`.
    async fn upsert(&self, collection: &str, records: &[VectorRecord]) -> Result<()>;

    /// Find the `limit` most similar vectors to `query_vector`, optionally
    /// constrained by `filter`.
    async fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: &VectorFilter,
    ) -> Result<Vec<SearchResult>>;

    /// Delete all vectors belonging to `doc_id` (re-chunking or removal).
    async fn delete_document(&self, collection: &str, doc_id: DocumentId) -> Result<()>;

    /// Whether any vector for `(doc_id, chunk_index)` already exists.
    async fn contains(&self, collection: &str, doc_id: DocumentId, chunk_index: ChunkIndex) -> Result<bool>;

    /// Identifier of this backend implementation, e.g. `"qdrant"`.
    fn provider_name(&self) -> &str;
}
