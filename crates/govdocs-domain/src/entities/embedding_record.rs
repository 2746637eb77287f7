//! Embedding satellite record entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChunkIndex, DocumentId};

/// Tracks that a chunk's vector has been written to the vector store
/// (spec §4.I).
///
/// The vector itself is owned by the vector store backend; this record is
/// the domain-side bookkeeping that lets the lazy-embedding subsystem know
/// what has already been embedded without querying the vector store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmbeddingRecord {
    /// Parent document.
    pub doc_id: DocumentId,
    /// Chunk this vector was computed from.
    pub chunk_index: ChunkIndex,
    /// Embedding model used.
    pub model: String,
    /// Dimensionality actually stored (post-padding).
    pub dimensions: usize,
    /// Creation timestamp (Unix epoch seconds).
    pub created_at: i64,
}
