//! Domain Entities
//!
//! Core business entities representing the main concepts of the ingestion
//! and retrieval domain. Entities have identity and are persisted through
//! the repository ports in [`crate::ports`].

/// Section-bounded chunk of a document's extracted text.
pub mod chunk;
pub use chunk::Chunk;

/// A single ingested document.
pub mod document;
pub use document::Document;

/// LLM-extracted document metadata.
pub mod document_metadata;
pub use document_metadata::DocumentMetadata;

/// Embedding bookkeeping satellite record.
pub mod embedding_record;
pub use embedding_record::EmbeddingRecord;

/// External database/object-store data source.
pub mod external_data_source;
pub use external_data_source::ExternalDataSource;

/// Scrape job lifecycle entity.
pub mod scrape_job;
pub use scrape_job::ScrapeJob;

/// Scraping source entity.
pub mod source;
pub use source::Source;

/// External sync run log.
pub mod sync_log;
pub use sync_log::{SyncLog, SyncStatus};
