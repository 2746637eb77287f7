//! Immutable value objects.

mod config;
mod embedding;
mod enums;
mod ids;
mod search;
mod user_context;

pub use config::{CacheConfig, EmbeddingConfig, LlmProviderConfig, ObjectStoreConfig, VectorStoreConfig};
pub use embedding::Embedding;
pub use enums::{
    ApprovalStatus, Dialect, EmbeddingStatus, MetadataStatus, Role, ScrapeJobStatus,
    StorageKind, Visibility,
};
pub use ids::{
    ChunkIndex, DocumentId, ExternalDataSourceId, JobId, SourceId, SyncLogId, UserId,
};
pub use search::{ChunkMetadataView, SearchResult, VectorFilter};
pub use user_context::UserContext;
