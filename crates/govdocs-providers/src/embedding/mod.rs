//! Embedding providers (spec §4.I): OpenAI, Gemini, Ollama, VoyageAI.
//!
//! Each backend is a thin `reqwest` client shaped to that provider's wire
//! format; the lazy-embedding subsystem only ever sees
//! `govdocs_domain::ports::providers::EmbeddingProvider`. Canonical-width
//! padding happens one layer up, in the application's embedding worker,
//! via `Embedding::pad_to` — these providers return vectors at their
//! native width.

mod gemini;
mod ollama;
mod openai;
mod voyageai;

pub use gemini::GeminiEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
pub use voyageai::VoyageAiEmbeddingProvider;
