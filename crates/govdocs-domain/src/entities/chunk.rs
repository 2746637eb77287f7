//! Section-aware chunk entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChunkIndex, DocumentId};

/// One section-bounded slice of a document's extracted text (spec §4.H).
///
/// Chunks are content-addressed by `(doc_id, chunk_index)` rather than
/// carrying their own id, so re-chunking a document deterministically
/// replaces prior chunks instead of accumulating orphans.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Chunk {
    /// Parent document.
    pub doc_id: DocumentId,
    /// Ordinal position within the document.
    pub chunk_index: ChunkIndex,
    /// Chunk text.
    pub text: String,
    /// Nearest governing section header, if the chunker found one.
    pub section_header: Option<String>,
    /// Character offset of `text` within the document's extracted text.
    pub start_offset: usize,
    /// Character length of `text`.
    pub char_len: usize,
}

impl Chunk {
    /// Whether this chunk carries usable text (spec §4.H edge case: an
    /// all-whitespace section produces no emitted chunk).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
