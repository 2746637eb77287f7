//! Hybrid retriever + reranker use case (spec §4.K).
//!
//! Runs the five stages exactly as spec'd: metadata/BM25-like search union
//! dense vector search, a bounded lazy-embedding trigger, the role/
//! institution access matrix, LLM rerank with a score-weighted fallback,
//! and final chunk assembly.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use govdocs_domain::entities::Document;
use govdocs_domain::error::Result;
use govdocs_domain::ports::providers::{EmbeddingProvider, LlmProvider, VectorStoreProvider};
use govdocs_domain::ports::repositories::{ChunkRepository, DocumentFilter, DocumentMetadataRepository, DocumentRepository};
use govdocs_domain::value_objects::{ChunkIndex, DocumentId, EmbeddingStatus, Role, UserContext, Visibility, VectorFilter};

use crate::constants::{BM25_B, BM25_K1, BM25_TOKEN_MIN_LENGTH};
use crate::ports::services::{HybridRetrieverInterface, RetrievedChunk};
use crate::ports::DocumentProcessorInterface;

/// One chunk-level candidate surviving the union of both candidate-
/// generation legs, keyed by `(doc_id, chunk_index)` while scores accumulate.
#[derive(Clone)]
struct Candidate {
    doc_id: DocumentId,
    chunk_index: ChunkIndex,
    text: String,
    section_header: Option<String>,
    dense_score: f32,
    bm25_score: f32,
}

/// Combines metadata/keyword search with dense vector search, reranks, and
/// applies the role-scoped access matrix (spec §4.K).
pub struct HybridRetriever {
    document_repo: Arc<dyn DocumentRepository>,
    metadata_repo: Arc<dyn DocumentMetadataRepository>,
    chunk_repo: Arc<dyn ChunkRepository>,
    vector_store: Arc<dyn VectorStoreProvider>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    rerank_provider: Arc<dyn LlmProvider>,
    document_processor: Arc<dyn DocumentProcessorInterface>,
    vector_collection: String,
    canonical_dimensions: usize,
}

impl HybridRetriever {
    /// Construct a new retriever.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        document_repo: Arc<dyn DocumentRepository>,
        metadata_repo: Arc<dyn DocumentMetadataRepository>,
        chunk_repo: Arc<dyn ChunkRepository>,
        vector_store: Arc<dyn VectorStoreProvider>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        rerank_provider: Arc<dyn LlmProvider>,
        document_processor: Arc<dyn DocumentProcessorInterface>,
        vector_collection: impl Into<String>,
        canonical_dimensions: usize,
    ) -> Self {
        Self {
            document_repo,
            metadata_repo,
            chunk_repo,
            vector_store,
            embedding_provider,
            rerank_provider,
            document_processor,
            vector_collection: vector_collection.into(),
            canonical_dimensions,
        }
    }

    /// Stage 2b: dense candidate generation, pre-filtered coarsely by role
    /// so ineligible vectors never leave the store (spec §4.K: "a query
    /// MUST filter at the store level, not only post-hoc").
    async fn dense_candidates(&self, query: &str, user: &UserContext, pool_size: usize) -> Result<Vec<Candidate>> {
        let mut embedding = self.embedding_provider.embed(query).await?;
        if embedding.dimensions > self.canonical_dimensions {
            return Err(govdocs_domain::error::Error::Config {
                message: format!(
                    "embedding provider '{}' native dimension {} exceeds canonical dimension {}",
                    self.embedding_provider.provider_name(),
                    embedding.dimensions,
                    self.canonical_dimensions
                ),
            });
        }
        embedding.pad_to(self.canonical_dimensions);

        let filter = coarse_vector_filter(user);
        let hits = self
            .vector_store
            .search(&self.vector_collection, &embedding.vector, pool_size, &filter)
            .await?;

        Ok(hits
            .into_iter()
            .map(|hit| Candidate {
                doc_id: hit.doc_id,
                chunk_index: hit.chunk_index,
                text: hit.text_ref,
                section_header: hit.metadata.section_header,
                dense_score: hit.score,
                bm25_score: 0.0,
            })
            .collect())
    }

    /// Stage 2a + 3: metadata/BM25-like candidate generation, triggering a
    /// bounded number of synchronous embeddings for documents that surfaced
    /// here but have no chunks yet (spec §4.K stage 3).
    async fn metadata_candidates(
        &self,
        query: &str,
        pool_size: usize,
        lazy_embed_budget: &mut usize,
    ) -> Result<Vec<Candidate>> {
        let filter = DocumentFilter {
            query: Some(query.to_string()),
            ..Default::default()
        };
        let (docs, _total) = self.document_repo.browse(&filter, 0, pool_size as u32).await?;

        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || docs.is_empty() {
            return Ok(Vec::new());
        }

        let mut doc_tokens = Vec::with_capacity(docs.len());
        for doc in &docs {
            let mut tokens = tokenize(&doc.filename);
            if let Ok(Some(metadata)) = self.metadata_repo.get(doc.id).await {
                tokens.extend(tokenize(&metadata.title));
                tokens.extend(tokenize(&metadata.summary));
                for tag in &metadata.tags {
                    tokens.extend(tokenize(tag));
                }
            }
            doc_tokens.push(tokens);
        }
        let scores = bm25_scores(&query_tokens, &doc_tokens);

        let mut candidates = Vec::new();
        for (doc, score) in docs.into_iter().zip(scores) {
            if score <= 0.0 {
                continue;
            }
            let mut chunks = self.chunk_repo.list_for_document(doc.id).await.unwrap_or_default();
            if chunks.is_empty() && doc.embedding_status != EmbeddingStatus::Embedded && *lazy_embed_budget > 0 {
                *lazy_embed_budget -= 1;
                if let Err(err) = self.document_processor.embed_document(doc.id).await {
                    tracing::warn!(doc_id = %doc.id, error = %err, "lazy embedding trigger failed");
                } else {
                    chunks = self.chunk_repo.list_for_document(doc.id).await.unwrap_or_default();
                }
            }
            if let Some(first) = chunks.into_iter().next() {
                candidates.push(Candidate {
                    doc_id: doc.id,
                    chunk_index: first.chunk_index,
                    text: first.text,
                    section_header: first.section_header,
                    dense_score: 0.0,
                    bm25_score: score,
                });
            }
        }
        Ok(candidates)
    }
}

#[async_trait]
impl HybridRetrieverInterface for HybridRetriever {
    async fn retrieve(&self, query: &str, user: &UserContext, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let top_k = if top_k == 0 {
            crate::constants::DEFAULT_RERANK_TOP_K
        } else {
            top_k
        };
        let pool_size = crate::constants::CANDIDATE_POOL_SIZE;
        let mut lazy_embed_budget = crate::constants::MAX_LAZY_EMBED_PER_QUERY;

        let dense = self.dense_candidates(query, user, pool_size).await?;
        let metadata = self.metadata_candidates(query, pool_size, &mut lazy_embed_budget).await?;

        let mut merged: HashMap<(DocumentId, ChunkIndex), Candidate> = HashMap::new();
        for c in dense.into_iter().chain(metadata) {
            merged
                .entry((c.doc_id, c.chunk_index))
                .and_modify(|existing| {
                    existing.dense_score = existing.dense_score.max(c.dense_score);
                    existing.bm25_score = existing.bm25_score.max(c.bm25_score);
                    if existing.section_header.is_none() {
                        existing.section_header = c.section_header.clone();
                    }
                })
                .or_insert(c);
        }

        // Stage 4: role filter, authoritative (the dense leg's store-level
        // filter above is coarse; this is the final per-document guard).
        let mut visible: Vec<(Document, Candidate)> = Vec::with_capacity(merged.len());
        for candidate in merged.into_values() {
            let Ok(doc) = self.document_repo.get_by_id(candidate.doc_id).await else {
                continue;
            };
            if govdocs_domain::access::is_visible(&doc, user) {
                visible.push((doc, candidate));
            }
        }

        if visible.is_empty() {
            return Ok(Vec::new());
        }

        // Stage 5: LLM rerank, falling back to a score-weighted union.
        let texts: Vec<String> = visible.iter().map(|(_, c)| c.text.clone()).collect();
        let scores = match self.rerank_provider.rerank(query, &texts).await {
            Ok(scores) if scores.len() == visible.len() => scores,
            Ok(_) => {
                tracing::warn!("rerank provider returned a mismatched score count, falling back");
                fallback_scores(&visible)
            }
            Err(err) => {
                tracing::warn!(error = %err, "rerank provider failed, falling back to score-weighted union");
                fallback_scores(&visible)
            }
        };

        let mut ranked: Vec<(f32, Document, Candidate)> = visible
            .into_iter()
            .zip(scores)
            .map(|((doc, candidate), score)| (score, doc, candidate))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_k);

        Ok(ranked
            .into_iter()
            .map(|(score, doc, candidate)| RetrievedChunk {
                doc_id: doc.id,
                text: candidate.text,
                filename: doc.filename,
                approval_status: doc.approval_status,
                section_header: candidate.section_header,
                confidence: score,
            })
            .collect())
    }
}

fn fallback_scores(visible: &[(Document, Candidate)]) -> Vec<f32> {
    visible
        .iter()
        .map(|(_, c)| crate::constants::RERANK_FALLBACK_ALPHA * c.dense_score + (1.0 - crate::constants::RERANK_FALLBACK_ALPHA) * c.bm25_score)
        .collect()
}

/// Coarse, conservative visibility pre-filter applied at the vector store
/// (spec §4.K: filtering "not only post-hoc"). Over-approximates what a
/// role may see; [`govdocs_domain::access::is_visible`] narrows the rest.
fn coarse_vector_filter(user: &UserContext) -> VectorFilter {
    let visibility = match user.role {
        Role::Student => Some(vec![Visibility::Public, Visibility::InstitutionOnly]),
        Role::DocumentOfficer => Some(vec![Visibility::Public, Visibility::InstitutionOnly, Visibility::Restricted]),
        Role::UniversityAdmin | Role::MinistryAdmin | Role::Developer => None,
    };
    let institution_id = if user.role == Role::Developer {
        None
    } else {
        user.institution_id.clone().map(|id| vec![id])
    };
    VectorFilter {
        institution_id,
        visibility,
        approval_status: None,
        version_year: None,
        document_type: None,
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= BM25_TOKEN_MIN_LENGTH)
        .map(str::to_string)
        .collect()
}

/// BM25 scoring of `docs_tokens` against `query_tokens`, with document
/// frequency computed over this candidate pool rather than the full corpus
/// (spec §4.K names this leg "BM25-like" rather than full BM25 precisely
/// because candidate-pool IDF is an approximation of corpus IDF).
fn bm25_scores(query_tokens: &[String], docs_tokens: &[Vec<String>]) -> Vec<f32> {
    let n = docs_tokens.len() as f64;
    if n == 0.0 {
        return Vec::new();
    }
    let avgdl = docs_tokens.iter().map(|d| d.len() as f64).sum::<f64>() / n;

    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for tokens in docs_tokens {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    docs_tokens
        .iter()
        .map(|tokens| {
            let dl = tokens.len() as f64;
            let mut term_freq: HashMap<&str, usize> = HashMap::new();
            for t in tokens {
                *term_freq.entry(t.as_str()).or_insert(0) += 1;
            }
            let score: f64 = query_tokens
                .iter()
                .map(|q| {
                    let f = *term_freq.get(q.as_str()).unwrap_or(&0) as f64;
                    if f == 0.0 {
                        return 0.0;
                    }
                    let n_q = *doc_freq.get(q.as_str()).unwrap_or(&0) as f64;
                    let idf = ((n - n_q + 0.5) / (n_q + 0.5) + 1.0).ln();
                    idf * (f * (BM25_K1 + 1.0)) / (f + BM25_K1 * (1.0 - BM25_B + BM25_B * dl / avgdl.max(1.0)))
                })
                .sum();
            score.max(0.0) as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_short_tokens_and_lowercases() {
        assert_eq!(tokenize("The AICTE Circular"), vec!["the", "aicte", "circular"]);
        assert_eq!(tokenize("a I of"), Vec::<String>::new());
    }

    #[test]
    fn bm25_scores_favor_documents_containing_query_terms() {
        let query = tokenize("circular fees");
        let docs = vec![tokenize("fee circular notice"), tokenize("unrelated academic calendar")];
        let scores = bm25_scores(&query, &docs);
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn coarse_vector_filter_excludes_confidential_for_students() {
        let user = UserContext::new(
            govdocs_domain::value_objects::UserId::new(),
            Role::Student,
            Some("inst-1".to_string()),
        );
        let filter = coarse_vector_filter(&user);
        let visibility = filter.visibility.expect("students get a visibility filter");
        assert!(!visibility.contains(&Visibility::Confidential));
    }
}
