//! Composition root.
//!
//! Resolves every provider named in [`crate::config::AppConfig`] and wires
//! the five use cases from `govdocs-application` against them, producing one
//! [`AppContext`] for `govdocs-server`/`govdocs` to hold.

use std::collections::HashMap;
use std::sync::Arc;

use govdocs_domain::error::Result;
use govdocs_domain::ports::providers::{CryptoProvider, DialectScraper, ExternalRowSourceProvider, OcrProvider};
use govdocs_domain::ports::repositories::{
    ChunkRepository, DocumentMetadataRepository, DocumentRepository, EmbeddingRecordRepository,
    ExternalDataSourceRepository, JobRepository, SourceRepository, SyncLogRepository,
};
use govdocs_domain::registry::{
    resolve_cache_provider, resolve_embedding_provider, resolve_llm_provider, resolve_object_store_provider,
    resolve_vector_store_provider,
};
use govdocs_domain::value_objects::Dialect;

use govdocs_application::ports::services::{
    DocumentProcessorInterface, ExternalDbSyncInterface, HybridRetrieverInterface, ScrapeOrchestratorInterface,
    SourceRegistryInterface,
};
use govdocs_application::{DocumentProcessor, ExternalDbSync, HybridRetriever, ScrapeOrchestrator, SourceRegistry};

use govdocs_extraction::ocr::NoopOcrProvider;
use govdocs_extraction::{MetadataExtractor, TextExtractor};

use govdocs_providers::database;
use govdocs_providers::database::{
    SqlChunkRepository, SqlDocumentMetadataRepository, SqlDocumentRepository, SqlEmbeddingRecordRepository,
    SqlExternalDataSourceRepository, SqlExternalRowSourceProvider, SqlJobRepository, SqlSourceRepository,
    SqlSyncLogRepository,
};

use govdocs_scraping::dialects::{AicteScraper, GenericScraper, MoeScraper, UgcScraper};
use govdocs_scraping::downloader::ReqwestDownloader;

use crate::config::AppConfig;
use crate::crypto::AesGcmCryptoProvider;

const DEFAULT_MAX_DOWNLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Everything `govdocs-server` and the `govdocs` CLI need to serve requests:
/// the five use-case interfaces, plus the repositories an admin surface
/// (data-source CRUD, document browse) addresses directly.
pub struct AppContext {
    /// Loaded, validated configuration.
    pub config: Arc<AppConfig>,
    /// Source registry use case (spec §4.A).
    pub source_registry: Arc<dyn SourceRegistryInterface>,
    /// Scrape orchestrator use case (spec §4.B).
    pub scrape_orchestrator: Arc<dyn ScrapeOrchestratorInterface>,
    /// Document processor use case (spec §4.E-§4.I).
    pub document_processor: Arc<dyn DocumentProcessorInterface>,
    /// Hybrid retriever use case (spec §4.K).
    pub hybrid_retriever: Arc<dyn HybridRetrieverInterface>,
    /// External DB sync use case (spec §4.L).
    pub external_db_sync: Arc<dyn ExternalDbSyncInterface>,
    /// Source repository, for direct admin reads the interfaces don't cover.
    pub source_repo: Arc<dyn SourceRepository>,
    /// External data source repository, for the `/data-sources` admin surface.
    pub external_data_source_repo: Arc<dyn ExternalDataSourceRepository>,
    /// Document repository, for the `/documents/browse` admin surface.
    pub document_repo: Arc<dyn DocumentRepository>,
    /// Document metadata repository, for document browse/compare surfaces.
    pub metadata_repo: Arc<dyn DocumentMetadataRepository>,
    /// Crypto provider, for the `/data-sources` admin surface to encrypt a
    /// connection string on create (spec §4.L: credentials are encrypted
    /// at rest, decrypted only during a sync).
    pub crypto: Arc<dyn CryptoProvider>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

fn dialect_scrapers() -> HashMap<Dialect, Arc<dyn DialectScraper>> {
    let mut map: HashMap<Dialect, Arc<dyn DialectScraper>> = HashMap::new();
    map.insert(Dialect::Aicte, Arc::new(AicteScraper::new()));
    map.insert(Dialect::Generic, Arc::new(GenericScraper::new()));
    map.insert(Dialect::Moe, Arc::new(MoeScraper::new()));
    map.insert(Dialect::Ugc, Arc::new(UgcScraper::new()));
    map
}

/// Build the OCR provider named by `config.ocr.provider`.
///
/// Only `"none"` (the default, fails fast on scanned documents) is built in
/// without a feature flag; `"tesseract"` requires this crate's `tesseract`
/// feature and shells out to the system binary.
fn build_ocr_provider(config: &AppConfig) -> Result<Arc<dyn OcrProvider>> {
    match config.ocr.provider.as_str() {
        "" | "none" => Ok(Arc::new(NoopOcrProvider::new())),
        #[cfg(feature = "tesseract")]
        "tesseract" => {
            let binary = config.ocr.configs.get("binary").cloned().unwrap_or_else(|| "tesseract".to_string());
            let language = config.ocr.configs.get("language").cloned().unwrap_or_else(|| "eng".to_string());
            Ok(Arc::new(govdocs_extraction::TesseractOcrProvider::new(binary, language)))
        }
        other => Err(govdocs_domain::error::Error::Config {
            message: format!("unknown OCR provider '{other}', available: none, tesseract"),
        }),
    }
}

/// Initialize the application context: connect the database, resolve every
/// configured provider, and wire the use cases.
///
/// # Errors
///
/// Returns an error if the database connection fails, a configured provider
/// name isn't registered, or a provider's own constructor fails (e.g. an
/// invalid crypto key).
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    let config = Arc::new(config);

    let pool = database::connect(&config.database.url, config.database.max_connections).await?;

    let source_repo: Arc<dyn SourceRepository> = Arc::new(SqlSourceRepository::new(pool.clone()));
    let job_repo: Arc<dyn JobRepository> = Arc::new(SqlJobRepository::new(pool.clone()));
    let document_repo: Arc<dyn DocumentRepository> = Arc::new(SqlDocumentRepository::new(pool.clone()));
    let metadata_repo: Arc<dyn DocumentMetadataRepository> = Arc::new(SqlDocumentMetadataRepository::new(pool.clone()));
    let chunk_repo: Arc<dyn ChunkRepository> = Arc::new(SqlChunkRepository::new(pool.clone()));
    let embedding_record_repo: Arc<dyn EmbeddingRecordRepository> = Arc::new(SqlEmbeddingRecordRepository::new(pool.clone()));
    let external_data_source_repo: Arc<dyn ExternalDataSourceRepository> =
        Arc::new(SqlExternalDataSourceRepository::new(pool.clone()));
    let sync_log_repo: Arc<dyn SyncLogRepository> = Arc::new(SqlSyncLogRepository::new(pool.clone()));

    let embedding_provider = resolve_embedding_provider(&config.embedding)?;
    let vector_store = resolve_vector_store_provider(&config.vector_store)?;
    let object_store = resolve_object_store_provider(&config.object_store)?;
    // Resolved for fail-fast startup validation only; request-path caching
    // (listing pages, LLM calls) is wired where those calls happen.
    let _cache_provider = resolve_cache_provider(&config.cache_provider_config())?;

    let crypto: Arc<dyn CryptoProvider> = Arc::new(AesGcmCryptoProvider::from_hex(&config.crypto.key_hex)?);
    let row_source: Arc<dyn ExternalRowSourceProvider> = Arc::new(SqlExternalRowSourceProvider::new());

    let ocr_provider = build_ocr_provider(&config)?;
    let text_extractor = Arc::new(TextExtractor::new(ocr_provider));

    let metadata_llm = resolve_llm_provider(&config.llm.default)?;
    let metadata_fallback = config.llm.fallback.as_ref().map(resolve_llm_provider).transpose()?;
    let metadata_extractor = Arc::new(MetadataExtractor::new(
        metadata_llm,
        metadata_fallback,
        config.llm.default.prompt_char_budget,
    ));

    let document_processor: Arc<dyn DocumentProcessorInterface> = Arc::new(DocumentProcessor::new(
        document_repo.clone(),
        metadata_repo.clone(),
        chunk_repo.clone(),
        embedding_record_repo,
        object_store.clone(),
        text_extractor,
        metadata_extractor,
        embedding_provider.clone(),
        vector_store.clone(),
        config.vector_store.collection.clone(),
        config.embedding.canonical_dimensions,
        config.delete_without_metadata,
        config.embedding_workers,
    ));

    let downloader = Arc::new(ReqwestDownloader::new(DEFAULT_MAX_DOWNLOAD_BYTES)?);
    let scrape_orchestrator: Arc<dyn ScrapeOrchestratorInterface> = Arc::new(ScrapeOrchestrator::new(
        source_repo.clone(),
        job_repo.clone(),
        document_repo.clone(),
        downloader,
        dialect_scrapers(),
        document_processor.clone(),
        config.scrape_job_concurrency,
    ));

    let source_registry: Arc<dyn SourceRegistryInterface> = Arc::new(SourceRegistry::new(source_repo.clone(), job_repo.clone()));

    // Reranking uses the default provider selection; per-role LLM overrides
    // (spec §2) are intended for the metadata-extraction tier, not rerank.
    let rerank_provider = resolve_llm_provider(&config.llm.default)?;
    let hybrid_retriever: Arc<dyn HybridRetrieverInterface> = Arc::new(HybridRetriever::new(
        document_repo.clone(),
        metadata_repo.clone(),
        chunk_repo.clone(),
        vector_store,
        embedding_provider,
        rerank_provider,
        document_processor.clone(),
        config.vector_store.collection.clone(),
        config.embedding.canonical_dimensions,
    ));

    let external_db_sync: Arc<dyn ExternalDbSyncInterface> = Arc::new(ExternalDbSync::new(
        external_data_source_repo.clone(),
        sync_log_repo,
        document_repo.clone(),
        metadata_repo.clone(),
        object_store,
        crypto.clone(),
        row_source,
    ));

    crate::retention::spawn_retention_sweep(
        job_repo,
        crate::retention::default_retention(),
        tokio_util::sync::CancellationToken::new(),
    );

    Ok(AppContext {
        config,
        source_registry,
        scrape_orchestrator,
        document_processor,
        hybrid_retriever,
        external_db_sync,
        source_repo,
        external_data_source_repo,
        document_repo,
        metadata_repo,
        crypto,
    })
}
