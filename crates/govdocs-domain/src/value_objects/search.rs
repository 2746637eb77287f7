//! Search/retrieval value objects.

use serde::{Deserialize, Serialize};

use crate::value_objects::enums::{ApprovalStatus, Visibility};
use crate::value_objects::ids::{ChunkIndex, DocumentId};

/// Metadata carried alongside a stored embedding (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadataView {
    /// Governing section header, if any.
    pub section_header: Option<String>,
    /// Canonical filename of the source document.
    pub filename: String,
    /// Owning institution, if scoped.
    pub institution_id: Option<String>,
    /// Visibility tier of the parent document.
    pub visibility: Visibility,
    /// Approval status of the parent document.
    pub approval_status: ApprovalStatus,
    /// Version date of the parent document, if known.
    pub version_date: Option<chrono::NaiveDate>,
    /// Document type, e.g. `"circular"`, `"act"`.
    pub document_type: Option<String>,
}

/// A single retrieval result, returned by both the vector store and the
/// hybrid retriever (spec §4.J, §4.K).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Parent document id.
    pub doc_id: DocumentId,
    /// Chunk ordinal within the document.
    pub chunk_index: ChunkIndex,
    /// Similarity/relevance score (higher is better).
    pub score: f32,
    /// Metadata snapshot for filtering and citation rendering.
    pub metadata: ChunkMetadataView,
    /// The chunk's text, or a reference when text is fetched lazily.
    pub text_ref: String,
}

/// Filter set accepted by vector-store search (spec §4.J).
///
/// Every field is a set: `None` means unconstrained, `Some(empty)` matches
/// nothing (distinguishing "don't filter" from "filter to nothing" avoids a
/// caller's empty multi-select silently returning everything).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorFilter {
    /// Allowed institution ids.
    pub institution_id: Option<Vec<String>>,
    /// Allowed visibility tiers.
    pub visibility: Option<Vec<Visibility>>,
    /// Allowed approval statuses.
    pub approval_status: Option<Vec<ApprovalStatus>>,
    /// Allowed version-date years.
    pub version_year: Option<Vec<i32>>,
    /// Allowed document types.
    pub document_type: Option<Vec<String>>,
}

impl VectorFilter {
    /// Whether `self` constrains nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.institution_id.is_none()
            && self.visibility.is_none()
            && self.approval_status.is_none()
            && self.version_year.is_none()
            && self.document_type.is_none()
    }
}
