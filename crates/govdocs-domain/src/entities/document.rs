//! Document entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value_objects::{
    ApprovalStatus, DocumentId, EmbeddingStatus, ExternalDataSourceId, MetadataStatus, SourceId,
    StorageKind, UserId, Visibility,
};

/// A single ingested document, either discovered by a scrape job or
/// synced from an external data source (spec §3, §4.E).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// Originating source, when scraped.
    pub source_id: Option<SourceId>,
    /// Originating external data source, when synced from a database
    /// (spec §4.L). Mutually exclusive with `source_id`.
    pub external_source_id: Option<ExternalDataSourceId>,
    /// Canonical filename, e.g. `"AICTE-circular-2024-17.pdf"`.
    pub filename: String,
    /// URL the document was fetched from, when scraped.
    pub source_url: Option<String>,
    /// SHA-256 of the raw document bytes, used for dedup (spec invariant 3).
    pub content_hash: String,
    /// Where the raw bytes live.
    pub storage_kind: StorageKind,
    /// Database blob id or object-store key, per `storage_kind`.
    pub storage_ref: String,
    /// Size of the raw document in bytes.
    pub size_bytes: u64,
    /// Owning institution, when scoped.
    pub institution_id: Option<String>,
    /// User who uploaded or synced this document in, when known. The
    /// uploader can always see their own document regardless of visibility
    /// (spec §4.K access matrix).
    pub uploaded_by: Option<UserId>,
    /// Visibility tier.
    pub visibility: Visibility,
    /// Approval workflow status.
    pub approval_status: ApprovalStatus,
    /// Metadata extraction lifecycle.
    pub metadata_status: MetadataStatus,
    /// Lazy-embedding lifecycle.
    pub embedding_status: EmbeddingStatus,
    /// Document type classification, once known, e.g. `"circular"`.
    pub document_type: Option<String>,
    /// Effective/version date of the document, once known.
    pub version_date: Option<chrono::NaiveDate>,
    /// Discovery timestamp (Unix epoch seconds).
    pub discovered_at: i64,
    /// Last update timestamp (Unix epoch seconds).
    pub updated_at: i64,
}

impl Document {
    /// Construct a newly discovered document in `Processing`/`NotEmbedded` state.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_hash: impl Into<String>,
        storage_kind: StorageKind,
        storage_ref: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        let now = crate::utils::unix_now();
        Self {
            id: DocumentId::new(),
            source_id: None,
            external_source_id: None,
            filename: filename.into(),
            source_url: None,
            content_hash: content_hash.into(),
            storage_kind,
            storage_ref: storage_ref.into(),
            size_bytes,
            institution_id: None,
            uploaded_by: None,
            visibility: Visibility::Public,
            approval_status: ApprovalStatus::Pending,
            metadata_status: MetadataStatus::Processing,
            embedding_status: EmbeddingStatus::NotEmbedded,
            document_type: None,
            version_date: None,
            discovered_at: now,
            updated_at: now,
        }
    }

    /// Whether this document's text has already been embedded (spec §4.I).
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.embedding_status == EmbeddingStatus::Embedded
    }
}
