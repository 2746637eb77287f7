//! Embedding record repository port.

use async_trait::async_trait;

use crate::entities::EmbeddingRecord;
use crate::error::Result;
use crate::value_objects::DocumentId;

/// Persistence port for [`EmbeddingRecord`] bookkeeping rows (spec §4.I).
///
/// The vectors themselves live in the vector store
/// ([`crate::ports::providers::VectorStoreProvider`]); this repository is
/// the cheap, database-local index the lazy-embedding subsystem consults to
/// avoid a vector-store round trip just to ask "has this been embedded".
#[async_trait]
pub trait EmbeddingRecordRepository: Send + Sync {
    /// Replace every embedding record belonging to `doc_id`.
    async fn replace_all(&self, doc_id: DocumentId, records: &[EmbeddingRecord]) -> Result<()>;

    /// Fetch all embedding records for a document.
    async fn list_for_document(&self, doc_id: DocumentId) -> Result<Vec<EmbeddingRecord>>;

    /// Delete all embedding records for a document.
    async fn delete_for_document(&self, doc_id: DocumentId) -> Result<()>;
}
