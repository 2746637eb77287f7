//! Embedding Provider Port
//!
//! Defines the interface implemented by every concrete embedding backend
//! (OpenAI, Gemini, Ollama, ...). The lazy-embedding subsystem (spec §4.I)
//! depends only on this trait, never on a concrete provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::Embedding;

/// Produces dense vector embeddings for text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Embed a single piece of text.
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Embed a batch of texts in one provider call where the backend
    /// supports batching; falls back to sequential calls otherwise.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Native dimensionality this provider's model produces, before any
    /// canonical padding is applied.
    fn native_dimensions(&self) -> usize;

    /// Identifier of this provider implementation, e.g. `"openai"`.
    fn provider_name(&self) -> &str;
}
