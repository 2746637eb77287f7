//! Application service port interfaces.
//!
//! Defines the port interfaces for application layer services. These traits
//! are the contracts `govdocs-server` depends on, following Clean
//! Architecture principles: the server never names a concrete use-case
//! struct directly.

use async_trait::async_trait;
use govdocs_domain::entities::{ScrapeJob, Source};
use govdocs_domain::error::Result;
use govdocs_domain::value_objects::{DocumentId, JobId, SourceId, UserContext};

// ============================================================================
// Source Registry (spec §4.A)
// ============================================================================

/// Persisted list of scraping sources with their scrape policy.
#[async_trait]
pub trait SourceRegistryInterface: Send + Sync {
    /// Register a new source.
    async fn create(&self, source: Source) -> Result<Source>;

    /// Apply an update to an existing source.
    async fn update(&self, source: Source) -> Result<Source>;

    /// Remove a source. Refuses if a job is currently running against it.
    async fn delete(&self, id: SourceId) -> Result<()>;

    /// Fetch a single source.
    async fn get(&self, id: SourceId) -> Result<Source>;

    /// List every registered source.
    async fn list(&self) -> Result<Vec<Source>>;
}

// ============================================================================
// Scraping Orchestrator (spec §4.B)
// ============================================================================

/// Overrides accepted by `start`, layered over a source's stored defaults.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOverrides {
    /// Caps documents discovered this run.
    pub max_documents: Option<u32>,
    /// Overrides the source's `pagination_enabled` flag.
    pub pagination_enabled: Option<bool>,
    /// Caps listing pages visited this run.
    pub max_pages: Option<u32>,
    /// Forces a full re-scan ignoring the sliding-window shortcut.
    pub force_full_scan: bool,
}

/// Per-source crawl job lifecycle: start, cancel, observe (spec §4.B).
#[async_trait]
pub trait ScrapeOrchestratorInterface: Send + Sync {
    /// Start a new job against `source_id`.
    async fn start(&self, source_id: SourceId, overrides: ScrapeOverrides) -> Result<JobId>;

    /// Request cooperative cancellation of a running job.
    async fn stop(&self, job_id: JobId) -> Result<ScrapeJob>;

    /// Current snapshot of a job's status and stats.
    async fn status(&self, job_id: JobId) -> Result<ScrapeJob>;

    /// All jobs not yet in a terminal state.
    async fn active_jobs(&self) -> Result<Vec<ScrapeJob>>;
}

// ============================================================================
// Document Processor (spec §4.E, §4.F, §4.G, §4.H, §4.I)
// ============================================================================

/// Outcome of processing one downloaded document through extraction,
/// metadata, chunking, and upload.
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// A brand-new document was persisted.
    New(DocumentId),
    /// Content hash matched an existing document for the source; discarded.
    Unchanged(DocumentId),
    /// Document was dropped per `delete_without_metadata` policy.
    DroppedNoMetadata,
}

/// Turns raw downloaded bytes into a persisted, queryable `Document`
/// (spec data flow B → C → D → E → F → G → persist).
#[async_trait]
pub trait DocumentProcessorInterface: Send + Sync {
    /// Process one document's bytes end to end and persist the result.
    #[allow(clippy::too_many_arguments)]
    async fn process(
        &self,
        source_id: SourceId,
        source_url: &str,
        suggested_title: Option<&str>,
        bytes: bytes::Bytes,
        content_type: Option<&str>,
    ) -> Result<ProcessOutcome>;

    /// Embed a document's extracted text on demand, used both by the manual
    /// `/documents/embed` endpoint and the retriever's lazy-embedding
    /// trigger (spec §4.I, §4.K).
    async fn embed_document(&self, doc_id: DocumentId) -> Result<()>;
}

// ============================================================================
// Hybrid Retriever + Reranker (spec §4.K)
// ============================================================================

/// One cited, role-filtered chunk returned from a query.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RetrievedChunk {
    /// Parent document id.
    pub doc_id: DocumentId,
    /// Resolved chunk text.
    pub text: String,
    /// Source filename, for citation rendering.
    pub filename: String,
    /// Approval status of the parent document.
    pub approval_status: govdocs_domain::value_objects::ApprovalStatus,
    /// Governing section header, if any.
    pub section_header: Option<String>,
    /// Final blended confidence/relevance score.
    pub confidence: f32,
}

/// Combines metadata/keyword search with dense vector search, reranks, and
/// applies the role-scoped access matrix (spec §4.K).
#[async_trait]
pub trait HybridRetrieverInterface: Send + Sync {
    /// Retrieve and rerank chunks relevant to `query` for `user`.
    async fn retrieve(
        &self,
        query: &str,
        user: &UserContext,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>>;
}

// ============================================================================
// External DB Ingester (spec §4.L)
// ============================================================================

/// Connects to a registered external relational source and ingests rows as
/// `Document` candidates (spec §4.L).
#[async_trait]
pub trait ExternalDbSyncInterface: Send + Sync {
    /// Run a sync against `source_id`, optionally capped at `limit` rows.
    async fn sync(
        &self,
        source_id: govdocs_domain::value_objects::ExternalDataSourceId,
        limit: Option<u32>,
    ) -> Result<govdocs_domain::entities::SyncLog>;
}
