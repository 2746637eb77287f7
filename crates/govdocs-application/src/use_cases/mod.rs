//! Use cases - application layer services.
//!
//! Each use case orchestrates domain entities and port traits to realize one
//! of the pipeline's operations. All dependencies are injected as
//! `Arc<dyn Trait>` domain-port objects, so these modules never name a
//! concrete provider crate.
//!
//! - `source_registry`: CRUD over scrape `Source` configuration (spec §4.A).
//! - `scrape_orchestrator`: sliding-window crawl, download, and dispatch to
//!   the document processor (spec §4.B/§4.C).
//! - `document_processor`: dedup, extraction, metadata gate, object-store
//!   upload, and lazy chunk/embed (spec §4.E/§4.F/§4.H/§4.I).
//! - `hybrid_retriever`: dense + BM25-like candidate generation, access
//!   filtering, and rerank (spec §4.K).
//! - `external_db_sync`: external SQL source ingestion (spec §4.L).

pub mod document_processor;
pub mod external_db_sync;
pub mod hybrid_retriever;
pub mod scrape_orchestrator;
pub mod source_registry;

pub use document_processor::DocumentProcessor;
pub use external_db_sync::ExternalDbSync;
pub use hybrid_retriever::HybridRetriever;
pub use scrape_orchestrator::ScrapeOrchestrator;
pub use source_registry::SourceRegistry;
