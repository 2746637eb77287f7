//! Strong-typed UUID identifiers for domain entities.

use crate::define_id;

define_id!(SourceId, "Strong typed identifier for a scraping source");
define_id!(JobId, "Strong typed identifier for a scrape job");
define_id!(DocumentId, "Strong typed identifier for a document record");
define_id!(UserId, "Strong typed identifier for a user/requestor context");
define_id!(
    ExternalDataSourceId,
    "Strong typed identifier for an external database/object-store data source"
);
define_id!(SyncLogId, "Strong typed identifier for an external-sync log entry");

/// Zero-based position of a chunk within its parent document.
///
/// Not a UUID: chunks are content-addressed by `(doc_id, chunk_index)` per
/// spec §3, so the index is a plain ordinal, not an opaque identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChunkIndex(pub u32);

impl ChunkIndex {
    /// Construct from a raw ordinal.
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for ChunkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
