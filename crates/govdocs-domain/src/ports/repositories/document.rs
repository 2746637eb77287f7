//! Document repository port.

use async_trait::async_trait;

use crate::entities::Document;
use crate::error::Result;
use crate::value_objects::{ApprovalStatus, DocumentId, ExternalDataSourceId, SourceId, Visibility};

/// Filter set accepted by [`DocumentRepository::browse`] (spec §6
/// `GET /documents/browse/metadata`).
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Restrict to documents of this type, when set.
    pub document_type: Option<String>,
    /// Restrict to documents whose `version_date` falls in this year.
    pub year: Option<i32>,
    /// Restrict to documents owned by this institution.
    pub institution_id: Option<String>,
    /// Restrict to documents whose extracted metadata names this department.
    pub department: Option<String>,
    /// Restrict to documents with one of these visibility tiers.
    pub visibility: Option<Vec<Visibility>>,
    /// Restrict to documents with one of these approval statuses.
    pub approval_status: Option<Vec<ApprovalStatus>>,
    /// Free-text match against filename/title, when the caller supplies a query.
    pub query: Option<String>,
}

/// Persistence port for [`Document`].
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Atomically commit a newly ingested document (spec §5: the record is
    /// visible only after download → extract → upload all succeeded).
    async fn create(&self, document: &Document) -> Result<()>;

    /// Fetch a document by id.
    async fn get_by_id(&self, id: DocumentId) -> Result<Document>;

    /// Look up an existing document by `(source_id, content_hash)` for
    /// dedup (spec invariant 3).
    async fn find_by_content_hash(
        &self,
        source_id: SourceId,
        content_hash: &str,
    ) -> Result<Option<Document>>;

    /// Look up an existing document by `(external_source_id, content_hash)`
    /// for the external DB ingester's dedup (spec §4.L).
    async fn find_by_external_content_hash(
        &self,
        external_source_id: ExternalDataSourceId,
        content_hash: &str,
    ) -> Result<Option<Document>>;

    /// Look up an existing document previously discovered at `source_url`,
    /// used by the scraper's HEAD-based dedup path (spec §4.B).
    async fn find_by_source_url(
        &self,
        source_id: SourceId,
        source_url: &str,
    ) -> Result<Option<Document>>;

    /// Page through documents matching `filter`, newest first.
    async fn browse(
        &self,
        filter: &DocumentFilter,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Document>, u64)>;

    /// Persist changes to an existing document.
    async fn update(&self, document: &Document) -> Result<()>;

    /// Delete a document record (used by the atomic `delete_without_metadata` path).
    async fn delete(&self, id: DocumentId) -> Result<()>;

    /// List documents awaiting embedding (`embedding_status == NotEmbedded`)
    /// for a bounded batch, used by the lazy-embedding trigger (spec §4.K).
    async fn list_pending_embedding(&self, limit: u32) -> Result<Vec<Document>>;
}
