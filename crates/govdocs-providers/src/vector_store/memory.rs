//! In-memory vector store (spec §4.J): brute-force cosine similarity,
//! suitable for development and small deployments without a Qdrant cluster.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{VectorRecord, VectorStoreProvider};
use govdocs_domain::registry::{VECTOR_STORE_PROVIDERS, VectorStoreProviderEntry};
use govdocs_domain::value_objects::{ChunkIndex, ChunkMetadataView, DocumentId, SearchResult, VectorFilter, VectorStoreConfig};

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for i in 0..len {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

fn passes_filter(metadata: &ChunkMetadataView, filter: &VectorFilter) -> bool {
    if let Some(ids) = &filter.institution_id {
        if !metadata.institution_id.as_ref().is_some_and(|id| ids.contains(id)) {
            return false;
        }
    }
    if let Some(visibilities) = &filter.visibility {
        if !visibilities.contains(&metadata.visibility) {
            return false;
        }
    }
    if let Some(statuses) = &filter.approval_status {
        if !statuses.contains(&metadata.approval_status) {
            return false;
        }
    }
    if let Some(years) = &filter.version_year {
        if !metadata.version_date.is_some_and(|d| years.contains(&d.format("%Y").to_string().parse().unwrap_or(0))) {
            return false;
        }
    }
    if let Some(types) = &filter.document_type {
        if !metadata.document_type.as_ref().is_some_and(|t| types.contains(t)) {
            return false;
        }
    }
    true
}

/// Process-local vector store, one `Vec<VectorRecord>` per collection.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: DashMap<String, Vec<VectorRecord>>,
}

impl InMemoryVectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    async fn ensure_collection(&self, collection: &str, _dimensions: usize) -> Result<()> {
        self.collections.entry(collection.to_string()).or_default();
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[VectorRecord]) -> Result<()> {
        let mut entry = self.collections.entry(collection.to_string()).or_default();
        for record in records {
            entry.retain(|r| !(r.doc_id == record.doc_id && r.chunk_index == record.chunk_index));
            entry.push(record.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: &VectorFilter,
    ) -> Result<Vec<SearchResult>> {
        let Some(records) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut scored: Vec<SearchResult> = Vec::new();
        for record in records.iter() {
            let metadata: ChunkMetadataView = serde_json::from_str(&record.metadata_json).map_err(Error::from)?;
            if !passes_filter(&metadata, filter) {
                continue;
            }
            scored.push(SearchResult {
                doc_id: record.doc_id,
                chunk_index: record.chunk_index,
                score: cosine_similarity(query_vector, &record.vector),
                metadata,
                text_ref: String::new(),
            });
        }
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        Ok(scored)
    }

    async fn delete_document(&self, collection: &str, doc_id: DocumentId) -> Result<()> {
        if let Some(mut records) = self.collections.get_mut(collection) {
            records.retain(|r| r.doc_id != doc_id);
        }
        Ok(())
    }

    async fn contains(&self, collection: &str, doc_id: DocumentId, chunk_index: ChunkIndex) -> Result<bool> {
        Ok(self
            .collections
            .get(collection)
            .is_some_and(|records| records.iter().any(|r| r.doc_id == doc_id && r.chunk_index == chunk_index)))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

fn factory(_config: &VectorStoreConfig) -> std::result::Result<Arc<dyn VectorStoreProvider>, String> {
    Ok(Arc::new(InMemoryVectorStore::new()))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static MEMORY_PROVIDER: VectorStoreProviderEntry =
    VectorStoreProviderEntry { name: "memory", description: "In-process brute-force cosine similarity store", build: factory };

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_domain::value_objects::{ApprovalStatus, Visibility};

    fn metadata() -> ChunkMetadataView {
        ChunkMetadataView {
            section_header: None,
            filename: "a.pdf".to_string(),
            institution_id: None,
            visibility: Visibility::Public,
            approval_status: ApprovalStatus::Approved,
            version_date: None,
            document_type: None,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_existing_chunk_vector() {
        let store = InMemoryVectorStore::new();
        let doc_id = DocumentId::new();
        let metadata_json = serde_json::to_string(&metadata()).unwrap();
        let record = VectorRecord { doc_id, chunk_index: ChunkIndex::new(0), vector: vec![1.0, 0.0], metadata_json: metadata_json.clone() };
        store.upsert("docs", &[record]).await.unwrap();
        let replacement = VectorRecord { doc_id, chunk_index: ChunkIndex::new(0), vector: vec![0.0, 1.0], metadata_json };
        store.upsert("docs", &[replacement]).await.unwrap();

        let results = store.search("docs", &[0.0, 1.0], 10, &VectorFilter::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn delete_document_removes_all_its_chunks() {
        let store = InMemoryVectorStore::new();
        let doc_id = DocumentId::new();
        let metadata_json = serde_json::to_string(&metadata()).unwrap();
        let records = vec![
            VectorRecord { doc_id, chunk_index: ChunkIndex::new(0), vector: vec![1.0], metadata_json: metadata_json.clone() },
            VectorRecord { doc_id, chunk_index: ChunkIndex::new(1), vector: vec![1.0], metadata_json },
        ];
        store.upsert("docs", &records).await.unwrap();
        store.delete_document("docs", doc_id).await.unwrap();
        assert!(!store.contains("docs", doc_id, ChunkIndex::new(0)).await.unwrap());
    }
}
