//! Provider ports.
//!
//! Each trait here is a seam resolved at runtime by the registry in
//! [`crate::registry`], keeping `govdocs-application` and
//! `govdocs-infrastructure` decoupled from concrete providers in
//! `govdocs-providers`/`govdocs-scraping`/`govdocs-extraction`.

mod cache;
mod crypto;
mod dialect_scraper;
mod downloader;
mod embedding;
mod external_row_source;
mod llm;
mod object_store;
mod ocr;
mod vector_store;

pub use cache::CacheProvider;
pub use crypto::{CryptoProvider, EncryptedData};
pub use dialect_scraper::{DialectScraper, DiscoveredLink, ListingPage};
pub use downloader::{Downloader, FetchedDocument};
pub use embedding::EmbeddingProvider;
pub use external_row_source::{ExternalRow, ExternalRowSourceProvider, ExternalValue};
pub use llm::{ExtractedMetadata, LlmProvider, RerankScores};
pub use object_store::ObjectStoreProvider;
pub use ocr::OcrProvider;
pub use vector_store::{VectorRecord, VectorStoreProvider};
