//! In-memory `AppContext` plus in-process request dispatch via
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use govdocs_application::ports::services::{
    DocumentProcessorInterface, ExternalDbSyncInterface, HybridRetrieverInterface, ProcessOutcome, RetrievedChunk,
    ScrapeOrchestratorInterface, ScrapeOverrides, SourceRegistryInterface,
};
use govdocs_domain::entities::{Document, DocumentMetadata, ExternalDataSource, ScrapeJob, Source, SyncLog, SyncStatus};
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{CryptoProvider, EncryptedData};
use govdocs_domain::ports::repositories::{DocumentFilter, DocumentMetadataRepository, DocumentRepository, ExternalDataSourceRepository, SourceRepository};
use govdocs_domain::value_objects::{DocumentId, ExternalDataSourceId, JobId, SourceId, UserContext};
use govdocs_infrastructure::config::AppConfig;
use govdocs_infrastructure::di::bootstrap::AppContext;

#[derive(Default)]
pub struct FakeSourceRegistry {
    sources: Mutex<Vec<Source>>,
}

#[async_trait]
impl SourceRegistryInterface for FakeSourceRegistry {
    async fn create(&self, source: Source) -> Result<Source> {
        self.sources.lock().await.push(source.clone());
        Ok(source)
    }

    async fn update(&self, source: Source) -> Result<Source> {
        let mut sources = self.sources.lock().await;
        if let Some(slot) = sources.iter_mut().find(|s| s.id == source.id) {
            *slot = source.clone();
        }
        Ok(source)
    }

    async fn delete(&self, id: SourceId) -> Result<()> {
        self.sources.lock().await.retain(|s| s.id != id);
        Ok(())
    }

    async fn get(&self, id: SourceId) -> Result<Source> {
        self.sources
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("source {id}")))
    }

    async fn list(&self) -> Result<Vec<Source>> {
        Ok(self.sources.lock().await.clone())
    }
}

#[derive(Default)]
pub struct FakeScrapeOrchestrator;

#[async_trait]
impl ScrapeOrchestratorInterface for FakeScrapeOrchestrator {
    async fn start(&self, _source_id: SourceId, _overrides: ScrapeOverrides) -> Result<JobId> {
        Ok(JobId::new())
    }

    async fn stop(&self, job_id: JobId) -> Result<ScrapeJob> {
        let mut job = ScrapeJob::new(SourceId::new());
        job.id = job_id;
        job.finish(govdocs_domain::value_objects::ScrapeJobStatus::Stopped, None);
        Ok(job)
    }

    async fn status(&self, job_id: JobId) -> Result<ScrapeJob> {
        let mut job = ScrapeJob::new(SourceId::new());
        job.id = job_id;
        Ok(job)
    }

    async fn active_jobs(&self) -> Result<Vec<ScrapeJob>> {
        Ok(vec![])
    }
}

#[derive(Default)]
pub struct FakeDocumentProcessor;

#[async_trait]
impl DocumentProcessorInterface for FakeDocumentProcessor {
    async fn process(
        &self,
        _source_id: SourceId,
        _source_url: &str,
        _suggested_title: Option<&str>,
        _bytes: bytes::Bytes,
        _content_type: Option<&str>,
    ) -> Result<ProcessOutcome> {
        Ok(ProcessOutcome::New(DocumentId::new()))
    }

    async fn embed_document(&self, _doc_id: DocumentId) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHybridRetriever {
    pub chunks: Vec<RetrievedChunk>,
}

#[async_trait]
impl HybridRetrieverInterface for FakeHybridRetriever {
    async fn retrieve(&self, _query: &str, _user: &UserContext, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        Ok(self.chunks.iter().take(top_k).cloned().collect())
    }
}

#[derive(Default)]
pub struct FakeExternalDbSync;

#[async_trait]
impl ExternalDbSyncInterface for FakeExternalDbSync {
    async fn sync(&self, source_id: ExternalDataSourceId, _limit: Option<u32>) -> Result<SyncLog> {
        Ok(SyncLog {
            id: govdocs_domain::value_objects::SyncLogId::new(),
            external_source_id: source_id,
            status: SyncStatus::Succeeded,
            records_synced: 0,
            records_failed: 0,
            started_at: 0,
            finished_at: Some(0),
            error_message: None,
        })
    }
}

#[derive(Default)]
pub struct FakeSourceRepo {
    sources: Mutex<Vec<Source>>,
}

#[async_trait]
impl SourceRepository for FakeSourceRepo {
    async fn create(&self, source: &Source) -> Result<()> {
        self.sources.lock().await.push(source.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: SourceId) -> Result<Source> {
        self.sources
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("source {id}")))
    }

    async fn list_enabled(&self) -> Result<Vec<Source>> {
        Ok(self.sources.lock().await.iter().filter(|s| s.enabled).cloned().collect())
    }

    async fn list_all(&self) -> Result<Vec<Source>> {
        Ok(self.sources.lock().await.clone())
    }

    async fn update(&self, source: &Source) -> Result<()> {
        let mut sources = self.sources.lock().await;
        if let Some(slot) = sources.iter_mut().find(|s| s.id == source.id) {
            *slot = source.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: SourceId) -> Result<()> {
        self.sources.lock().await.retain(|s| s.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDocumentRepo {
    documents: Mutex<Vec<Document>>,
}

#[async_trait]
impl DocumentRepository for FakeDocumentRepo {
    async fn create(&self, document: &Document) -> Result<()> {
        self.documents.lock().await.push(document.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: DocumentId) -> Result<Document> {
        self.documents
            .lock()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("document {id}")))
    }

    async fn find_by_content_hash(&self, _source_id: SourceId, _content_hash: &str) -> Result<Option<Document>> {
        Ok(None)
    }

    async fn find_by_external_content_hash(&self, _external_source_id: ExternalDataSourceId, _content_hash: &str) -> Result<Option<Document>> {
        Ok(None)
    }

    async fn find_by_source_url(&self, _source_id: SourceId, _source_url: &str) -> Result<Option<Document>> {
        Ok(None)
    }

    async fn browse(&self, _filter: &DocumentFilter, _page: u32, page_size: u32) -> Result<(Vec<Document>, u64)> {
        let documents = self.documents.lock().await;
        let total = documents.len() as u64;
        Ok((documents.iter().take(page_size as usize).cloned().collect(), total))
    }

    async fn update(&self, document: &Document) -> Result<()> {
        let mut documents = self.documents.lock().await;
        if let Some(slot) = documents.iter_mut().find(|d| d.id == document.id) {
            *slot = document.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: DocumentId) -> Result<()> {
        self.documents.lock().await.retain(|d| d.id != id);
        Ok(())
    }

    async fn list_pending_embedding(&self, _limit: u32) -> Result<Vec<Document>> {
        Ok(vec![])
    }
}

#[derive(Default)]
pub struct FakeDocumentMetadataRepo {
    metadata: Mutex<Vec<DocumentMetadata>>,
}

#[async_trait]
impl DocumentMetadataRepository for FakeDocumentMetadataRepo {
    async fn upsert(&self, metadata: &DocumentMetadata) -> Result<()> {
        let mut store = self.metadata.lock().await;
        store.retain(|m| m.doc_id != metadata.doc_id);
        store.push(metadata.clone());
        Ok(())
    }

    async fn get(&self, doc_id: DocumentId) -> Result<Option<DocumentMetadata>> {
        Ok(self.metadata.lock().await.iter().find(|m| m.doc_id == doc_id).cloned())
    }

    async fn delete(&self, doc_id: DocumentId) -> Result<()> {
        self.metadata.lock().await.retain(|m| m.doc_id != doc_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeExternalDataSourceRepo {
    sources: Mutex<Vec<ExternalDataSource>>,
}

#[async_trait]
impl ExternalDataSourceRepository for FakeExternalDataSourceRepo {
    async fn create(&self, source: &ExternalDataSource) -> Result<()> {
        self.sources.lock().await.push(source.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: ExternalDataSourceId) -> Result<ExternalDataSource> {
        self.sources
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("external data source {id}")))
    }

    async fn list_all(&self) -> Result<Vec<ExternalDataSource>> {
        Ok(self.sources.lock().await.clone())
    }

    async fn update(&self, source: &ExternalDataSource) -> Result<()> {
        let mut sources = self.sources.lock().await;
        if let Some(slot) = sources.iter_mut().find(|s| s.id == source.id) {
            *slot = source.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: ExternalDataSourceId) -> Result<()> {
        self.sources.lock().await.retain(|s| s.id != id);
        Ok(())
    }
}

/// Passthrough stand-in for `AesGcmCryptoProvider`: real encryption would
/// pull in a key-management story the test harness doesn't need, so this
/// just round-trips bytes through a fixed XOR mask, enough to exercise the
/// `/data-sources` handler's encrypt-before-persist call.
pub struct FakeCryptoProvider;

impl CryptoProvider for FakeCryptoProvider {
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        Ok(EncryptedData::new(plaintext.iter().map(|b| b ^ 0xAA).collect(), vec![0; 12]))
    }

    fn decrypt(&self, encrypted: &EncryptedData) -> Result<Vec<u8>> {
        Ok(encrypted.ciphertext.iter().map(|b| b ^ 0xAA).collect())
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

/// Build an `AppContext` wired entirely to in-memory fakes, bypassing
/// `init_app`'s database connection and provider resolution.
#[must_use]
pub fn test_context() -> Arc<AppContext> {
    Arc::new(AppContext {
        config: Arc::new(AppConfig::default()),
        source_registry: Arc::new(FakeSourceRegistry::default()),
        scrape_orchestrator: Arc::new(FakeScrapeOrchestrator),
        document_processor: Arc::new(FakeDocumentProcessor),
        hybrid_retriever: Arc::new(FakeHybridRetriever::default()),
        external_db_sync: Arc::new(FakeExternalDbSync),
        source_repo: Arc::new(FakeSourceRepo::default()),
        external_data_source_repo: Arc::new(FakeExternalDataSourceRepo::default()),
        document_repo: Arc::new(FakeDocumentRepo::default()),
        metadata_repo: Arc::new(FakeDocumentMetadataRepo::default()),
        crypto: Arc::new(FakeCryptoProvider),
    })
}

#[must_use]
pub fn test_app() -> Router {
    test_app_with_context(test_context())
}

#[must_use]
pub fn test_app_with_context(ctx: Arc<AppContext>) -> Router {
    let state = Arc::new(govdocs_server::AppState::new(ctx));
    govdocs_server::build_router(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("response body should be valid JSON")
    }
}

pub async fn test_get(app: &Router, path: &str) -> TestResponse {
    let request = Request::builder().method("GET").uri(path).body(Body::empty()).expect("valid GET request");
    dispatch(app.clone(), request).await
}

pub async fn test_post(app: &Router, path: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_owned()))
        .expect("valid POST request");
    dispatch(app.clone(), request).await
}

async fn dispatch(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router should not fail to dispatch");
    let status = response.status();
    let body = response.into_body().collect().await.expect("response body should be readable").to_bytes().to_vec();
    TestResponse { status, body }
}
