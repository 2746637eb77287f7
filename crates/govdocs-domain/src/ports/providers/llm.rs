//! LLM Provider Port (spec §4.F, §4.K)
//!
//! Used by the metadata extraction pipeline stage and the hybrid
//! retriever's rerank stage. Kept distinct from
//! [`super::embedding::EmbeddingProvider`]: metadata extraction is a
//! completion call, embedding is a vector call, and a deployment may mix
//! providers across the two (e.g. local embeddings, hosted LLM).
//!
//! Spec §9 calls for collapsing "deep inheritance / dynamic dispatch among
//! metadata/rerank providers" into a single `Provider` capability set of
//! `{generate_structured, rerank}` with tagged variants selected by
//! configuration; `extract_metadata` is that spec's `generate_structured`
//! and `rerank` is its `rerank`, both on the one trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Structured metadata extracted from a document's leading text (spec §4.F).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    /// Short human title.
    pub title: String,
    /// One- or two-sentence summary.
    pub summary: String,
    /// Free-form topical tags.
    pub tags: Vec<String>,
    /// Document type classification, when the model could infer one.
    pub document_type: Option<String>,
    /// Issuing department/ministry, when the model could infer one.
    pub department: Option<String>,
    /// Document language, when the model could infer one (e.g. `"en"`).
    pub language: Option<String>,
}

/// One candidate's relevance score from [`LlmProvider::rerank`], `0.0..=1.0`,
/// aligned by position with the `candidates` slice passed in.
pub type RerankScores = Vec<f32>;

/// Produces structured metadata from document text via a completion call,
/// and reranks retrieval candidates against a query via the same provider
/// (spec §4.K, §9).
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Extract metadata from `text`, truncated by the caller to the
    /// provider's prompt character budget.
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata>;

    /// Score each of `candidates` for relevance to `query`, returning one
    /// score per candidate in the same order (spec §4.K stage 5).
    async fn rerank(&self, query: &str, candidates: &[String]) -> Result<RerankScores>;

    /// Identifier of this provider implementation, e.g. `"openai"`.
    fn provider_name(&self) -> &str;
}
