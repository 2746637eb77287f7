//! Persistence ports for domain entities.
//!
//! One trait per aggregate root. Satellite entities (`DocumentMetadata`,
//! `Chunk`, `EmbeddingRecord`) get their own repositories rather than being
//! nested under `Document`'s, matching spec §3's "document record owns
//! nothing it cannot delete; metadata and embeddings are satellites whose
//! absence is valid".

mod chunk;
mod document;
mod document_metadata;
mod embedding_record;
mod external_data_source;
mod job;
mod source;
mod sync_log;

pub use chunk::ChunkRepository;
pub use document::{DocumentFilter, DocumentRepository};
pub use document_metadata::DocumentMetadataRepository;
pub use embedding_record::EmbeddingRecordRepository;
pub use external_data_source::ExternalDataSourceRepository;
pub use job::JobRepository;
pub use source::SourceRepository;
pub use sync_log::SyncLogRepository;
