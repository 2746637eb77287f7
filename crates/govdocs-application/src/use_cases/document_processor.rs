//! Document processor use case (spec §4.E, §4.F, §4.G, §4.H, §4.I).
//!
//! Owns the per-document pipeline stages that run between a raw download
//! and a queryable record: text extraction, LLM metadata extraction with
//! provider fallback, object-store upload, and persistence. Chunking and
//! embedding are deliberately NOT run here — spec §3 marks `Chunk` as
//! "recomputed only on re-embed", so that work lives in `embed_document`,
//! triggered either by the manual `/documents/embed` endpoint or the
//! retriever's lazy-embedding path (spec §4.K). Re-extraction there reads
//! the uploaded blob back rather than caching extracted text, keeping the
//! "re-extract ⇒ identical hash" round-trip law (spec §8) meaningful for
//! the whole pipeline, not just the initial pass.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::try_join_all;
use tokio::sync::Semaphore;

use govdocs_domain::entities::{Chunk, Document, DocumentMetadata, EmbeddingRecord};
use govdocs_domain::error::Result;
use govdocs_domain::ports::providers::{EmbeddingProvider, ObjectStoreProvider, VectorRecord, VectorStoreProvider};
use govdocs_domain::ports::repositories::{
    ChunkRepository, DocumentMetadataRepository, DocumentRepository, EmbeddingRecordRepository,
};
use govdocs_domain::value_objects::{
    ChunkIndex, ChunkMetadataView, DocumentId, Embedding, EmbeddingStatus, MetadataStatus, SourceId, StorageKind,
};

use govdocs_extraction::text::DeclaredType;
use govdocs_extraction::{MetadataExtractor, SectionAwareChunker, TextExtractor};

use crate::constants::EMBEDDING_SUB_BATCH_SIZE;
use crate::ports::services::{DocumentProcessorInterface, ProcessOutcome};

/// Turns raw downloaded bytes into a persisted `Document`, then later turns
/// a persisted `Document` into chunked, embedded vectors on demand.
pub struct DocumentProcessor {
    document_repo: Arc<dyn DocumentRepository>,
    metadata_repo: Arc<dyn DocumentMetadataRepository>,
    chunk_repo: Arc<dyn ChunkRepository>,
    embedding_record_repo: Arc<dyn EmbeddingRecordRepository>,
    object_store: Arc<dyn ObjectStoreProvider>,
    text_extractor: Arc<TextExtractor>,
    metadata_extractor: Arc<MetadataExtractor>,
    chunker: SectionAwareChunker,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    vector_collection: String,
    canonical_dimensions: usize,
    /// Policy flag (spec §4.F/§9): drop a document whose metadata fails
    /// both providers (`true`), or keep it with `metadata_status=failed`
    /// (`false`, the lenient default).
    delete_without_metadata: bool,
    /// Bounds concurrent `embed_batch` calls (spec §5: a separate bounded
    /// embedding worker pool, default 5), both across a single document's
    /// chunk sub-batches and across documents embedded concurrently.
    embedding_pool: Arc<Semaphore>,
}

impl DocumentProcessor {
    /// Construct a new processor.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        document_repo: Arc<dyn DocumentRepository>,
        metadata_repo: Arc<dyn DocumentMetadataRepository>,
        chunk_repo: Arc<dyn ChunkRepository>,
        embedding_record_repo: Arc<dyn EmbeddingRecordRepository>,
        object_store: Arc<dyn ObjectStoreProvider>,
        text_extractor: Arc<TextExtractor>,
        metadata_extractor: Arc<MetadataExtractor>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStoreProvider>,
        vector_collection: impl Into<String>,
        canonical_dimensions: usize,
        delete_without_metadata: bool,
        embedding_workers: usize,
    ) -> Self {
        Self {
            document_repo,
            metadata_repo,
            chunk_repo,
            embedding_record_repo,
            object_store,
            text_extractor,
            metadata_extractor,
            chunker: SectionAwareChunker::new(),
            embedding_provider,
            vector_store,
            vector_collection: vector_collection.into(),
            canonical_dimensions,
            delete_without_metadata,
            embedding_pool: Arc::new(Semaphore::new(embedding_workers.max(1))),
        }
    }

    /// Embed `texts` split into sub-batches run concurrently through the
    /// bounded embedding worker pool, preserving input order in the result.
    async fn embed_chunks(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let futures = texts.chunks(EMBEDDING_SUB_BATCH_SIZE).map(|sub_batch| {
            let provider = self.embedding_provider.clone();
            let pool = self.embedding_pool.clone();
            let sub_batch = sub_batch.to_vec();
            async move {
                let _permit = pool.acquire().await.map_err(|_| govdocs_domain::error::Error::Config {
                    message: "embedding worker pool closed".to_string(),
                })?;
                provider.embed_batch(&sub_batch).await
            }
        });
        let results = try_join_all(futures).await?;
        Ok(results.into_iter().flatten().collect())
    }

    async fn extract_text_lenient(&self, bytes: &[u8], declared_type: Option<DeclaredType>) -> govdocs_extraction::ExtractedText {
        let Some(declared_type) = declared_type else {
            tracing::warn!("document type could not be determined, treating as empty text");
            return empty_extracted_text();
        };
        match self.text_extractor.extract(bytes, declared_type).await {
            Ok(extracted) => extracted,
            Err(err) => {
                // spec §7: ExtractionFailed keeps the document with empty
                // text rather than aborting; it is simply excluded from
                // embedding until it has usable text.
                tracing::warn!(error = %err, "text extraction failed, keeping document with empty text");
                empty_extracted_text()
            }
        }
    }
}

fn empty_extracted_text() -> govdocs_extraction::ExtractedText {
    govdocs_extraction::ExtractedText {
        text: String::new(),
        is_scanned: false,
        pages: 0,
    }
}

/// Best-effort declared type from a `Content-Type` header, falling back to
/// the URL/filename extension (spec §4.D: "sniffed type from Content-Type
/// or magic bytes"; magic-byte sniffing is left to the downloader, this is
/// the processor-side half of that contract).
fn declared_type_of(url_or_name: &str, content_type: Option<&str>) -> Option<DeclaredType> {
    if let Some(ct) = content_type {
        if let Some(dt) = declared_type_from_mime(ct) {
            return Some(dt);
        }
    }
    extension_of(url_or_name).and_then(|ext| DeclaredType::from_extension(&ext))
}

fn declared_type_from_mime(content_type: &str) -> Option<DeclaredType> {
    match content_type.split(';').next().unwrap_or(content_type).trim() {
        "application/pdf" => Some(DeclaredType::Pdf),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some(DeclaredType::Docx),
        "application/vnd.openxmlformats-officedocument.presentationml.presentation" => Some(DeclaredType::Pptx),
        "image/png" => Some(DeclaredType::Png),
        "image/jpeg" => Some(DeclaredType::Jpg),
        "image/tiff" => Some(DeclaredType::Tiff),
        _ => None,
    }
}

fn last_path_segment(url: &str) -> String {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url).to_string()
}

fn extension_of(url_or_name: &str) -> Option<String> {
    let path = url_or_name.split(['?', '#']).next().unwrap_or(url_or_name);
    path.rsplit('.').next().map(str::to_lowercase).filter(|ext| ext.len() <= 5 && ext != path)
}

/// Replace filesystem-unsafe characters, then truncate to 100 characters
/// (spec §4.C, reused here for blob naming per spec §6's
/// `scraped_{yyyymmdd_hhmmss}_{sanitized_title}.{ext}` convention).
///
/// Duplicated from `govdocs-scraping::dialects::sanitize_filename` rather
/// than imported: `govdocs-application` depends only on `govdocs-domain` by
/// design, so a concrete adapter crate cannot be a dependency here.
fn sanitize_filename(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .map(|c| match c {
            ':' | '"' | '/' | '\\' | '?' | '*' => '-',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    sanitized.trim().chars().take(100).collect()
}

fn blob_key(title: &str, ext: &str) -> String {
    let stamp = govdocs_domain::utils::time::now().format("%Y%m%d_%H%M%S");
    let sanitized = sanitize_filename(title);
    format!("scraped_{stamp}_{sanitized}.{ext}")
}

#[async_trait]
impl DocumentProcessorInterface for DocumentProcessor {
    async fn process(
        &self,
        source_id: SourceId,
        source_url: &str,
        suggested_title: Option<&str>,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<ProcessOutcome> {
        let hash = govdocs_domain::utils::content_hash(&bytes);

        if let Some(existing) = self.document_repo.find_by_content_hash(source_id, &hash).await? {
            return Ok(ProcessOutcome::Unchanged(existing.id));
        }

        let declared_type = declared_type_of(source_url, content_type);
        let extracted = self.extract_text_lenient(&bytes, declared_type).await;

        let extracted_metadata = self.metadata_extractor.extract(&extracted.text).await?;

        if extracted_metadata.is_none() && self.delete_without_metadata {
            return Ok(ProcessOutcome::DroppedNoMetadata);
        }

        let ext = declared_type
            .map(|dt| extension_for(dt).to_string())
            .or_else(|| extension_of(source_url))
            .unwrap_or_else(|| "bin".to_string());
        let title_for_name = extracted_metadata
            .as_ref()
            .map(|(m, _)| m.title.as_str())
            .or(suggested_title)
            .unwrap_or(source_url);
        let key = blob_key(title_for_name, &ext);
        self.object_store.put(&key, bytes.clone()).await?;

        let filename = suggested_title
            .map(str::to_string)
            .unwrap_or_else(|| last_path_segment(source_url));

        let mut document = Document::new(filename, hash, StorageKind::ObjectStore, key, bytes.len() as u64);
        document.source_id = Some(source_id);
        document.source_url = Some(source_url.to_string());

        match &extracted_metadata {
            Some((metadata, _)) => {
                document.metadata_status = MetadataStatus::Ready;
                document.document_type = metadata.document_type.clone();
            }
            None => {
                document.metadata_status = MetadataStatus::Failed;
            }
        }

        self.document_repo.create(&document).await?;

        if let Some((metadata, extracted_by)) = extracted_metadata {
            let record = DocumentMetadata {
                doc_id: document.id,
                title: metadata.title,
                summary: metadata.summary,
                tags: metadata.tags,
                department: metadata.department,
                language: metadata.language,
                extracted_by,
                quality_score: 1.0,
                extracted_at: govdocs_domain::utils::unix_now(),
            };
            self.metadata_repo.upsert(&record).await?;
        }

        Ok(ProcessOutcome::New(document.id))
    }

    async fn embed_document(&self, doc_id: DocumentId) -> Result<()> {
        let mut document = self.document_repo.get_by_id(doc_id).await?;
        if document.is_embedded() {
            return Ok(());
        }

        document.embedding_status = EmbeddingStatus::Embedding;
        self.document_repo.update(&document).await?;

        let bytes = self.object_store.get(&document.storage_ref).await?;
        let declared_type = declared_type_of(
            document.source_url.as_deref().unwrap_or(&document.filename),
            None,
        );
        let extracted = self.extract_text_lenient(&bytes, declared_type).await;

        if extracted.text.trim().is_empty() {
            document.embedding_status = EmbeddingStatus::Failed;
            self.document_repo.update(&document).await?;
            return Ok(());
        }

        let drafts = self.chunker.chunk(&extracted.text);
        if drafts.is_empty() {
            document.embedding_status = EmbeddingStatus::Failed;
            self.document_repo.update(&document).await?;
            return Ok(());
        }

        let texts: Vec<String> = drafts.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embed_chunks(&texts).await?;

        let metadata_view = ChunkMetadataView {
            section_header: None,
            filename: document.filename.clone(),
            institution_id: document.institution_id.clone(),
            visibility: document.visibility,
            approval_status: document.approval_status,
            version_date: document.version_date,
            document_type: document.document_type.clone(),
        };

        let mut chunks = Vec::with_capacity(drafts.len());
        let mut vector_records = Vec::with_capacity(drafts.len());
        let mut embedding_records = Vec::with_capacity(drafts.len());

        for (i, (draft, mut embedding)) in drafts.into_iter().zip(embeddings).enumerate() {
            if embedding.dimensions > self.canonical_dimensions {
                document.embedding_status = EmbeddingStatus::Failed;
                self.document_repo.update(&document).await?;
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

            let chunk_index = ChunkIndex::new(i as u32);
            let mut chunk_metadata = metadata_view.clone();
            chunk_metadata.section_header = draft.section_header.clone();

            chunks.push(Chunk {
                doc_id,
                chunk_index,
                text: draft.text,
                section_header: draft.section_header,
                start_offset: draft.start_offset,
                char_len: draft.char_len,
            });
            let metadata_json = serde_json::to_string(&chunk_metadata)?;
            vector_records.push(VectorRecord {
                doc_id,
                chunk_index,
                vector: embedding.vector,
                metadata_json,
            });
            embedding_records.push(EmbeddingRecord {
                doc_id,
                chunk_index,
                model: embedding.model,
                dimensions: embedding.dimensions,
                created_at: govdocs_domain::utils::unix_now(),
            });
        }

        self.chunk_repo.replace_all(doc_id, &chunks).await?;
        self.vector_store
            .ensure_collection(&self.vector_collection, self.canonical_dimensions)
            .await?;
        self.vector_store.upsert(&self.vector_collection, &vector_records).await?;
        self.embedding_record_repo.replace_all(doc_id, &embedding_records).await?;

        document.embedding_status = EmbeddingStatus::Embedded;
        self.document_repo.update(&document).await?;
        Ok(())
    }
}

fn extension_for(declared_type: DeclaredType) -> &'static str {
    match declared_type {
        DeclaredType::Pdf => "pdf",
        DeclaredType::Docx => "docx",
        DeclaredType::Pptx => "pptx",
        DeclaredType::Png => "png",
        DeclaredType::Jpg => "jpg",
        DeclaredType::Tiff => "tiff",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filename_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("Notice: \"Fees\" / Update?*"), "Notice- -Fees- - Update--");
    }

    #[test]
    fn declared_type_of_prefers_content_type_over_extension() {
        let dt = declared_type_of("https://example.test/file.bin", Some("application/pdf"));
        assert_eq!(dt, Some(DeclaredType::Pdf));
    }

    #[test]
    fn declared_type_of_falls_back_to_extension() {
        let dt = declared_type_of("https://example.test/notice.docx", None);
        assert_eq!(dt, Some(DeclaredType::Docx));
    }

    #[test]
    fn extension_of_ignores_query_string() {
        assert_eq!(extension_of("https://example.test/a/b.pdf?x=1"), Some("pdf".to_string()));
    }
}
