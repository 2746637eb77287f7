//! Domain-level constants.

/// Canonical embedding vector width every stored embedding must have (spec §3, §4.I).
pub const D_CANONICAL_DEFAULT: usize = 1024;

/// Default sliding-window page count always re-scanned on every crawl (spec §4.B).
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Default retention window, in days, for terminal `ScrapeJob` rows (spec §3).
pub const JOB_RETENTION_DAYS: i64 = 30;

/// Minimum inter-page delay enforced by the orchestrator (spec §4.B).
pub const MIN_PAGE_DELAY_MS: u64 = 1_000;

/// Minimum inter-document delay enforced by the orchestrator (spec §4.B).
pub const MIN_DOCUMENT_DELAY_MS: u64 = 200;

/// Maximum document-download attempts before giving up (spec §4.B).
pub const DOWNLOAD_MAX_ATTEMPTS: u32 = 3;

/// Exponential backoff schedule (seconds) between download attempts.
pub const DOWNLOAD_BACKOFF_SECS: &[u64] = &[1, 2];

/// Maximum redirects the downloader follows (spec §4.D).
pub const MAX_REDIRECTS: usize = 5;

/// Default per-request HTTP timeout, in seconds (spec §4.D, §5).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default per-call LLM timeout, in seconds (spec §5).
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Default maximum characters of extracted text fed to the metadata extractor (spec §4.F).
pub const METADATA_PROMPT_CHAR_BUDGET: usize = 8_000;

/// Default bounded worker pool size for the lazy embedding subsystem (spec §5).
pub const DEFAULT_EMBEDDING_WORKERS: usize = 5;

/// Maximum number of documents lazily embedded synchronously within one retrieval call (spec §4.K).
pub const MAX_LAZY_EMBED_PER_QUERY: usize = 3;

/// Candidate pool size returned by each of the two candidate-generation legs (spec §4.K).
pub const CANDIDATE_POOL_SIZE: usize = 20;

/// Default top-K results returned after reranking (spec §4.K).
pub const DEFAULT_RERANK_TOP_K: usize = 5;

/// Score-weighted fallback mixing factor between dense and BM25-like scores (spec §4.K).
pub const HYBRID_FALLBACK_ALPHA: f32 = 0.6;

/// BM25 k1 parameter (term-frequency saturation) for the metadata/BM25-like
/// candidate-generation leg (spec §4.K).
pub const BM25_K1: f64 = 1.2;

/// BM25 b parameter (document-length normalization).
pub const BM25_B: f64 = 0.75;

/// Minimum token length considered during BM25-like scoring; shorter tokens
/// are noise (stopword fragments, punctuation remnants).
pub const BM25_TOKEN_MIN_LENGTH: usize = 2;
