//! Application layer constants.
//!
//! Cross-cutting tuning knobs the use cases share. Per-component policy that
//! is configurable at runtime lives in `govdocs-domain::value_objects::config`
//! instead; these are the fixed design floors that stay constant regardless.

// ============================================================================
// SCRAPING ORCHESTRATOR (spec §4.B)
// ============================================================================

/// Minimum delay between listing-page fetches within a single job.
pub const MIN_PAGE_DELAY_MS: u64 = 1_000;

/// Minimum delay between document fetches within a single job.
pub const MIN_DOCUMENT_DELAY_MS: u64 = 200;

/// Default number of leading pages re-scanned on every crawl ("sliding window").
pub const DEFAULT_WINDOW_SIZE: u32 = 3;

// ============================================================================
// METADATA EXTRACTION (spec §4.F)
// ============================================================================

/// Leading characters of extracted text sent to the metadata LLM.
pub const METADATA_PROMPT_CHAR_BUDGET: usize = 8_000;

/// Minimum acceptable title length for the quality gate.
pub const MIN_TITLE_LEN: usize = 3;

/// Minimum acceptable summary length for the quality gate.
pub const MIN_SUMMARY_LEN: usize = 20;

/// Minimum acceptable keyword count for the quality gate.
pub const MIN_KEYWORD_COUNT: usize = 3;

// ============================================================================
// HYBRID RETRIEVER (spec §4.K)
// ============================================================================

/// Candidates requested from each of metadata search and dense search.
pub const CANDIDATE_POOL_SIZE: usize = 20;

/// Default reranked result count returned to the caller.
pub const DEFAULT_RERANK_TOP_K: usize = 5;

/// Maximum documents lazily embedded synchronously within one query.
pub const MAX_LAZY_EMBED_PER_QUERY: usize = 3;

/// Weight given to dense-search score in the score-weighted rerank fallback.
pub const RERANK_FALLBACK_ALPHA: f32 = 0.6;

/// BM25 k1 parameter (term-frequency saturation) for the metadata/BM25-like
/// candidate-generation leg.
pub const BM25_K1: f64 = 1.2;

/// BM25 b parameter (document-length normalization).
pub const BM25_B: f64 = 0.75;

/// Minimum token length considered during BM25-like scoring.
pub const BM25_TOKEN_MIN_LENGTH: usize = 2;

// ============================================================================
// EMBEDDING WORKER POOL (spec §5)
// ============================================================================

/// Chunks per `embed_batch` call when splitting one document's chunks
/// across the bounded embedding worker pool
/// (`govdocs_domain::constants::DEFAULT_EMBEDDING_WORKERS`).
pub const EMBEDDING_SUB_BATCH_SIZE: usize = 10;
