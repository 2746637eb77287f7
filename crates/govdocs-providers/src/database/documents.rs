//! `Document`, `DocumentMetadata`, `Chunk`, and `EmbeddingRecord` repositories.

use async_trait::async_trait;
use govdocs_domain::entities::{Chunk, Document, DocumentMetadata, EmbeddingRecord};
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::repositories::{
    ChunkRepository, DocumentFilter, DocumentMetadataRepository, DocumentRepository, EmbeddingRecordRepository,
};
use govdocs_domain::value_objects::{ChunkIndex, DocumentId, ExternalDataSourceId, SourceId};
use sqlx::{AnyPool, Row};

use super::store::{db_err, from_json, to_json};

/// `AnyPool`-backed [`DocumentRepository`].
pub struct SqlDocumentRepository {
    pool: AnyPool,
}

impl SqlDocumentRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    async fn load_all(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query("SELECT data FROM documents")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing documents", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    /// Ids of documents whose `document_metadata` row names `department`.
    /// Department lives on the metadata satellite, not on `documents`
    /// itself, so browsing by department requires this separate lookup.
    async fn doc_ids_for_department(&self, department: &str) -> Result<std::collections::HashSet<DocumentId>> {
        let rows = sqlx::query("SELECT doc_id, data FROM document_metadata")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing document metadata for department filter", e))?;
        let mut ids = std::collections::HashSet::new();
        for row in &rows {
            let metadata: DocumentMetadata = from_json(row.get::<String, _>("data").as_str())?;
            if metadata.department.as_deref() == Some(department) {
                ids.insert(metadata.doc_id);
            }
        }
        Ok(ids)
    }
}

/// Whether `document` satisfies every constraint `filter` sets (spec §6
/// `GET /documents/browse/metadata`). The free-text `query` matches only
/// `filename`, since `title`/`summary` live in the metadata satellite and a
/// JSON-blob store has no cross-table index to join against cheaply.
fn matches(document: &Document, filter: &DocumentFilter) -> bool {
    if let Some(doc_type) = &filter.document_type {
        if document.document_type.as_deref() != Some(doc_type.as_str()) {
            return false;
        }
    }
    if let Some(year) = filter.year {
        if document.version_date.map(|d| d.format("%Y").to_string()) != Some(year.to_string()) {
            return false;
        }
    }
    if let Some(institution_id) = &filter.institution_id {
        if document.institution_id.as_deref() != Some(institution_id.as_str()) {
            return false;
        }
    }
    if let Some(visibilities) = &filter.visibility {
        if !visibilities.contains(&document.visibility) {
            return false;
        }
    }
    if let Some(statuses) = &filter.approval_status {
        if !statuses.contains(&document.approval_status) {
            return false;
        }
    }
    if let Some(query) = &filter.query {
        if !document.filename.to_lowercase().contains(&query.to_lowercase()) {
            return false;
        }
    }
    true
}

#[async_trait]
impl DocumentRepository for SqlDocumentRepository {
    async fn create(&self, document: &Document) -> Result<()> {
        sqlx::query(
            "INSERT INTO documents (id, source_id, external_source_id, content_hash, source_url, embedding_status, data) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(document.id.to_string())
        .bind(document.source_id.map(|id| id.to_string()))
        .bind(document.external_source_id.map(|id| id.to_string()))
        .bind(document.content_hash.clone())
        .bind(document.source_url.clone())
        .bind(document.embedding_status.to_string())
        .bind(to_json(document)?)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("creating document", e))?;
        Ok(())
    }

    async fn get_by_id(&self, id: DocumentId) -> Result<Document> {
        let row = sqlx::query("SELECT data FROM documents WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("fetching document", e))?
            .ok_or_else(|| Error::not_found(format!("document {id}")))?;
        from_json(row.get::<String, _>("data").as_str())
    }

    async fn find_by_content_hash(&self, source_id: SourceId, content_hash: &str) -> Result<Option<Document>> {
        let row = sqlx::query("SELECT data FROM documents WHERE source_id = ? AND content_hash = ?")
            .bind(source_id.to_string())
            .bind(content_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("finding document by content hash", e))?;
        row.map(|r| from_json(r.get::<String, _>("data").as_str())).transpose()
    }

    async fn find_by_external_content_hash(
        &self,
        external_source_id: ExternalDataSourceId,
        content_hash: &str,
    ) -> Result<Option<Document>> {
        let row = sqlx::query("SELECT data FROM documents WHERE external_source_id = ? AND content_hash = ?")
            .bind(external_source_id.to_string())
            .bind(content_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("finding document by external content hash", e))?;
        row.map(|r| from_json(r.get::<String, _>("data").as_str())).transpose()
    }

    async fn find_by_source_url(&self, source_id: SourceId, source_url: &str) -> Result<Option<Document>> {
        let row = sqlx::query("SELECT data FROM documents WHERE source_id = ? AND source_url = ?")
            .bind(source_id.to_string())
            .bind(source_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("finding document by source url", e))?;
        row.map(|r| from_json(r.get::<String, _>("data").as_str())).transpose()
    }

    async fn browse(&self, filter: &DocumentFilter, page: u32, page_size: u32) -> Result<(Vec<Document>, u64)> {
        let department_doc_ids = match &filter.department {
            Some(department) => Some(self.doc_ids_for_department(department).await?),
            None => None,
        };
        let mut matching: Vec<Document> = self
            .load_all()
            .await?
            .into_iter()
            .filter(|d| matches(d, filter))
            .filter(|d| department_doc_ids.as_ref().is_none_or(|ids| ids.contains(&d.id)))
            .collect();
        matching.sort_by(|a, b| b.discovered_at.cmp(&a.discovered_at));
        let total = matching.len() as u64;
        let start = (page as usize) * (page_size as usize);
        let page_rows = matching.into_iter().skip(start).take(page_size as usize).collect();
        Ok((page_rows, total))
    }

    async fn update(&self, document: &Document) -> Result<()> {
        sqlx::query(
            "UPDATE documents SET source_id = ?, external_source_id = ?, content_hash = ?, source_url = ?, \
             embedding_status = ?, data = ? WHERE id = ?",
        )
        .bind(document.source_id.map(|id| id.to_string()))
        .bind(document.external_source_id.map(|id| id.to_string()))
        .bind(document.content_hash.clone())
        .bind(document.source_url.clone())
        .bind(document.embedding_status.to_string())
        .bind(to_json(document)?)
        .bind(document.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("updating document", e))?;
        Ok(())
    }

    async fn delete(&self, id: DocumentId) -> Result<()> {
        sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting document", e))?;
        Ok(())
    }

    async fn list_pending_embedding(&self, limit: u32) -> Result<Vec<Document>> {
        let rows = sqlx::query("SELECT data FROM documents WHERE embedding_status = 'not_embedded' LIMIT ?")
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing pending-embedding documents", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }
}

/// `AnyPool`-backed [`DocumentMetadataRepository`].
pub struct SqlDocumentMetadataRepository {
    pool: AnyPool,
}

impl SqlDocumentMetadataRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentMetadataRepository for SqlDocumentMetadataRepository {
    async fn upsert(&self, metadata: &DocumentMetadata) -> Result<()> {
        let data = to_json(metadata)?;
        sqlx::query(
            "INSERT INTO document_metadata (doc_id, data) VALUES (?, ?) \
             ON CONFLICT (doc_id) DO UPDATE SET data = excluded.data",
        )
        .bind(metadata.doc_id.to_string())
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("upserting document metadata", e))?;
        Ok(())
    }

    async fn get(&self, doc_id: DocumentId) -> Result<Option<DocumentMetadata>> {
        let row = sqlx::query("SELECT data FROM document_metadata WHERE doc_id = ?")
            .bind(doc_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("fetching document metadata", e))?;
        row.map(|r| from_json(r.get::<String, _>("data").as_str())).transpose()
    }

    async fn delete(&self, doc_id: DocumentId) -> Result<()> {
        sqlx::query("DELETE FROM document_metadata WHERE doc_id = ?")
            .bind(doc_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting document metadata", e))?;
        Ok(())
    }
}

/// `AnyPool`-backed [`ChunkRepository`].
pub struct SqlChunkRepository {
    pool: AnyPool,
}

impl SqlChunkRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChunkRepository for SqlChunkRepository {
    async fn replace_all(&self, doc_id: DocumentId, chunks: &[Chunk]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| db_err("starting chunk replace transaction", e))?;
        sqlx::query("DELETE FROM chunks WHERE doc_id = ?")
            .bind(doc_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("clearing prior chunks", e))?;
        for chunk in chunks {
            sqlx::query("INSERT INTO chunks (doc_id, chunk_index, data) VALUES (?, ?, ?)")
                .bind(doc_id.to_string())
                .bind(i64::from(chunk.chunk_index.0))
                .bind(to_json(chunk)?)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_err("inserting chunk", e))?;
        }
        tx.commit().await.map_err(|e| db_err("committing chunk replace", e))?;
        Ok(())
    }

    async fn list_for_document(&self, doc_id: DocumentId) -> Result<Vec<Chunk>> {
        let rows = sqlx::query("SELECT data FROM chunks WHERE doc_id = ? ORDER BY chunk_index")
            .bind(doc_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing chunks", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn get(&self, doc_id: DocumentId, chunk_index: ChunkIndex) -> Result<Option<Chunk>> {
        let row = sqlx::query("SELECT data FROM chunks WHERE doc_id = ? AND chunk_index = ?")
            .bind(doc_id.to_string())
            .bind(i64::from(chunk_index.0))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("fetching chunk", e))?;
        row.map(|r| from_json(r.get::<String, _>("data").as_str())).transpose()
    }

    async fn delete_for_document(&self, doc_id: DocumentId) -> Result<()> {
        sqlx::query("DELETE FROM chunks WHERE doc_id = ?")
            .bind(doc_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting chunks", e))?;
        Ok(())
    }
}

/// `AnyPool`-backed [`EmbeddingRecordRepository`].
pub struct SqlEmbeddingRecordRepository {
    pool: AnyPool,
}

impl SqlEmbeddingRecordRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmbeddingRecordRepository for SqlEmbeddingRecordRepository {
    async fn replace_all(&self, doc_id: DocumentId, records: &[EmbeddingRecord]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| db_err("starting embedding replace transaction", e))?;
        sqlx::query("DELETE FROM embedding_records WHERE doc_id = ?")
            .bind(doc_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("clearing prior embedding records", e))?;
        for record in records {
            sqlx::query("INSERT INTO embedding_records (doc_id, chunk_index, data) VALUES (?, ?, ?)")
                .bind(doc_id.to_string())
                .bind(i64::from(record.chunk_index.0))
                .bind(to_json(record)?)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_err("inserting embedding record", e))?;
        }
        tx.commit().await.map_err(|e| db_err("committing embedding replace", e))?;
        Ok(())
    }

    async fn list_for_document(&self, doc_id: DocumentId) -> Result<Vec<EmbeddingRecord>> {
        let rows = sqlx::query("SELECT data FROM embedding_records WHERE doc_id = ? ORDER BY chunk_index")
            .bind(doc_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing embedding records", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn delete_for_document(&self, doc_id: DocumentId) -> Result<()> {
        sqlx::query("DELETE FROM embedding_records WHERE doc_id = ?")
            .bind(doc_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting embedding records", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_domain::value_objects::StorageKind;

    async fn pool() -> AnyPool {
        crate::database::connect("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn dedup_lookup_by_content_hash() {
        let repo = SqlDocumentRepository::new(pool().await);
        let mut doc = Document::new("a.pdf", "hash-1", StorageKind::ObjectStore, "docs/a.pdf", 1024);
        doc.source_id = Some(SourceId::new());
        repo.create(&doc).await.unwrap();

        let found = repo.find_by_content_hash(doc.source_id.unwrap(), "hash-1").await.unwrap();
        assert!(found.is_some());
        let missing = repo.find_by_content_hash(doc.source_id.unwrap(), "hash-2").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn browse_paginates_and_filters_by_query() {
        let repo = SqlDocumentRepository::new(pool().await);
        for i in 0..3 {
            let doc = Document::new(format!("circular-{i}.pdf"), format!("hash-{i}"), StorageKind::ObjectStore, format!("docs/{i}"), 10);
            repo.create(&doc).await.unwrap();
        }
        let filter = DocumentFilter { query: Some("circular".to_string()), ..Default::default() };
        let (page, total) = repo.browse(&filter, 0, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn chunk_replace_all_supersedes_prior_set() {
        let repo = SqlChunkRepository::new(pool().await);
        let doc_id = DocumentId::new();
        let first = vec![Chunk { doc_id, chunk_index: ChunkIndex::new(0), text: "a".into(), section_header: None, start_offset: 0, char_len: 1 }];
        repo.replace_all(doc_id, &first).await.unwrap();
        let second = vec![Chunk { doc_id, chunk_index: ChunkIndex::new(0), text: "b".into(), section_header: None, start_offset: 0, char_len: 1 }];
        repo.replace_all(doc_id, &second).await.unwrap();

        let listed = repo.list_for_document(doc_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "b");
    }
}
