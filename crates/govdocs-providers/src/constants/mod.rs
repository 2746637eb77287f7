//! Constants specific to concrete provider implementations, kept apart from
//! `govdocs_domain::constants` (domain-layer) and `govdocs_infrastructure`
//! (process-layer) constants.

/// Database-backed repository constants (retention windows, log limits).
pub mod database;
/// Embedding HTTP API constants (`OpenAI`, Gemini, Ollama, `VoyageAI`).
pub mod embedding;
/// HTTP client constants shared across provider HTTP calls.
pub mod http;
/// Retry configuration constants for provider API requests.
pub mod retry;
/// Vector store backend constants.
pub mod vector_store;

pub use self::database::*;
pub use self::embedding::*;
pub use self::http::*;
pub use self::retry::*;
pub use self::vector_store::*;
