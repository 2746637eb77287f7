//! Boundary traits implemented by the providers/infrastructure layers.
//!
//! - [`providers`] — external collaborators (embedding, vector store, LLM,
//!   object store, OCR, downloader, dialect scraper, cache, crypto).
//! - [`repositories`] — persistence ports for domain entities.

pub mod providers;
pub mod repositories;
