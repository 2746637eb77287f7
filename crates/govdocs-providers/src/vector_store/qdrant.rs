//! Qdrant-backed vector store (spec §4.J), the production default.
//!
//! `VectorFilter` fields are pushed down to Qdrant's native payload filter
//! rather than applied after retrieval, so filtering happens inside the
//! ANN search itself instead of discarding post-hoc.

use std::sync::Arc;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{VectorRecord, VectorStoreProvider};
use govdocs_domain::registry::{VECTOR_STORE_PROVIDERS, VectorStoreProviderEntry};
use govdocs_domain::value_objects::{ChunkIndex, ChunkMetadataView, DocumentId, SearchResult, VectorFilter, VectorStoreConfig};
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, GetPointsBuilder, PointStruct,
    PointsIdsList, ScalarQuantizationBuilder, ScrollPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QdrantValue, point_id::PointIdOptions, value::Kind as QdrantValueKind,
};

use crate::constants::vector_store::{QDRANT_DISTANCE_METRIC, QDRANT_UPSERT_BATCH_SIZE};

const FIELD_DOC_ID: &str = "doc_id";
const FIELD_CHUNK_INDEX: &str = "chunk_index";
const FIELD_INSTITUTION_ID: &str = "institution_id";
const FIELD_VISIBILITY: &str = "visibility";
const FIELD_APPROVAL_STATUS: &str = "approval_status";
const FIELD_VERSION_YEAR: &str = "version_year";
const FIELD_DOCUMENT_TYPE: &str = "document_type";
const FIELD_METADATA_JSON: &str = "metadata_json";

fn point_id(doc_id: DocumentId, chunk_index: ChunkIndex) -> String {
    format!("{doc_id}:{chunk_index}")
}

fn distance_metric() -> Distance {
    match QDRANT_DISTANCE_METRIC {
        "Euclid" => Distance::Euclid,
        "Dot" => Distance::Dot,
        "Manhattan" => Distance::Manhattan,
        _ => Distance::Cosine,
    }
}

fn build_filter(filter: &VectorFilter) -> Option<Filter> {
    if filter.is_empty() {
        return None;
    }
    let mut must = Vec::new();
    if let Some(ids) = &filter.institution_id {
        must.push(Condition::matches(FIELD_INSTITUTION_ID, ids.clone()));
    }
    if let Some(visibilities) = &filter.visibility {
        must.push(Condition::matches(FIELD_VISIBILITY, visibilities.iter().map(ToString::to_string).collect::<Vec<_>>()));
    }
    if let Some(statuses) = &filter.approval_status {
        must.push(Condition::matches(FIELD_APPROVAL_STATUS, statuses.iter().map(ToString::to_string).collect::<Vec<_>>()));
    }
    if let Some(years) = &filter.version_year {
        must.push(Condition::matches(FIELD_VERSION_YEAR, years.clone()));
    }
    if let Some(types) = &filter.document_type {
        must.push(Condition::matches(FIELD_DOCUMENT_TYPE, types.clone()));
    }
    Some(Filter::must(must))
}

fn payload_from_record(record: &VectorRecord, metadata: &ChunkMetadataView) -> Result<std::collections::HashMap<String, QdrantValue>> {
    let mut payload = std::collections::HashMap::new();
    payload.insert(FIELD_DOC_ID.to_string(), record.doc_id.to_string().into());
    payload.insert(FIELD_CHUNK_INDEX.to_string(), i64::from(record.chunk_index.0).into());
    payload.insert(FIELD_METADATA_JSON.to_string(), record.metadata_json.clone().into());
    if let Some(institution_id) = &metadata.institution_id {
        payload.insert(FIELD_INSTITUTION_ID.to_string(), institution_id.clone().into());
    }
    payload.insert(FIELD_VISIBILITY.to_string(), metadata.visibility.to_string().into());
    payload.insert(FIELD_APPROVAL_STATUS.to_string(), metadata.approval_status.to_string().into());
    if let Some(year) = metadata.version_date.map(|d| d.format("%Y").to_string()) {
        payload.insert(FIELD_VERSION_YEAR.to_string(), year.parse::<i64>().unwrap_or(0).into());
    }
    if let Some(document_type) = &metadata.document_type {
        payload.insert(FIELD_DOCUMENT_TYPE.to_string(), document_type.clone().into());
    }
    Ok(payload)
}

/// Calls a Qdrant cluster over gRPC.
#[derive(Debug)]
pub struct QdrantVectorStore {
    client: Qdrant,
}

impl QdrantVectorStore {
    /// Connect to `url`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the gRPC channel fails to build.
    pub fn new(url: &str) -> Result<Self> {
        let client = Qdrant::from_url(url).build().map_err(|e| Error::Config { message: format!("building qdrant client: {e}") })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantVectorStore {
    async fn ensure_collection(&self, collection: &str, dimensions: usize) -> Result<()> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| Error::VectorStore { message: format!("checking collection '{collection}': {e}") })?;
        if exists {
            return Ok(());
        }
        self.client
            .create_collection(
                CreateCollectionBuilder::new(collection)
                    .vectors_config(qdrant_client::qdrant::VectorParamsBuilder::new(dimensions as u64, distance_metric()))
                    .quantization_config(ScalarQuantizationBuilder::default()),
            )
            .await
            .map_err(|e| Error::VectorStore { message: format!("creating collection '{collection}': {e}") })?;
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[VectorRecord]) -> Result<()> {
        for batch in records.chunks(QDRANT_UPSERT_BATCH_SIZE) {
            let mut points = Vec::with_capacity(batch.len());
            for record in batch {
                let metadata: ChunkMetadataView = serde_json::from_str(&record.metadata_json).map_err(Error::from)?;
                let payload = payload_from_record(record, &metadata)?;
                points.push(PointStruct::new(point_id(record.doc_id, record.chunk_index), record.vector.clone(), payload));
            }
            self.client
                .upsert_points(UpsertPointsBuilder::new(collection, points))
                .await
                .map_err(|e| Error::VectorStore { message: format!("upserting into '{collection}': {e}") })?;
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
        let mut builder = SearchPointsBuilder::new(collection, query_vector.to_vec(), limit as u64).with_payload(true);
        if let Some(qdrant_filter) = build_filter(filter) {
            builder = builder.filter(qdrant_filter);
        }
        let response = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| Error::VectorStore { message: format!("searching '{collection}': {e}") })?;

        response.result.into_iter().map(scored_point_to_search_result).collect()
    }

    async fn delete_document(&self, collection: &str, doc_id: DocumentId) -> Result<()> {
        let filter = Filter::must(vec![Condition::matches(FIELD_DOC_ID, doc_id.to_string())]);
        self.client
            .delete_points(DeletePointsBuilder::new(collection).points(filter))
            .await
            .map_err(|e| Error::VectorStore { message: format!("deleting document from '{collection}': {e}") })?;
        Ok(())
    }

    async fn contains(&self, collection: &str, doc_id: DocumentId, chunk_index: ChunkIndex) -> Result<bool> {
        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(collection)
                    .filter(Filter::must(vec![
                        Condition::matches(FIELD_DOC_ID, doc_id.to_string()),
                        Condition::matches(FIELD_CHUNK_INDEX, i64::from(chunk_index.0)),
                    ]))
                    .limit(1),
            )
            .await
            .map_err(|e| Error::VectorStore { message: format!("scrolling '{collection}': {e}") })?;
        Ok(!response.result.is_empty())
    }

    fn provider_name(&self) -> &str {
        "qdrant"
    }
}

fn scored_point_to_search_result(point: qdrant_client::qdrant::ScoredPoint) -> Result<SearchResult> {
    let payload = point.payload;
    let metadata_json = payload
        .get(FIELD_METADATA_JSON)
        .and_then(|v| match &v.kind {
            Some(QdrantValueKind::StringValue(s)) => Some(s.clone()),
            _ => None,
        })
        .ok_or_else(|| Error::VectorStore { message: "qdrant point missing metadata_json payload field".to_string() })?;
    let metadata: ChunkMetadataView = serde_json::from_str(&metadata_json).map_err(Error::from)?;

    let doc_id_str = payload
        .get(FIELD_DOC_ID)
        .and_then(|v| match &v.kind {
            Some(QdrantValueKind::StringValue(s)) => Some(s.clone()),
            _ => None,
        })
        .ok_or_else(|| Error::VectorStore { message: "qdrant point missing doc_id payload field".to_string() })?;
    let doc_id = doc_id_str.parse::<DocumentId>().map_err(|e| Error::VectorStore { message: format!("parsing doc_id: {e}") })?;

    let chunk_index = payload
        .get(FIELD_CHUNK_INDEX)
        .and_then(|v| match &v.kind {
            Some(QdrantValueKind::IntegerValue(i)) => Some(ChunkIndex::new(*i as u32)),
            _ => None,
        })
        .ok_or_else(|| Error::VectorStore { message: "qdrant point missing chunk_index payload field".to_string() })?;

    Ok(SearchResult { doc_id, chunk_index, score: point.score, metadata, text_ref: String::new() })
}

fn factory(config: &VectorStoreConfig) -> std::result::Result<Arc<dyn VectorStoreProvider>, String> {
    let url = config.url.as_deref().ok_or("qdrant vector store requires url")?;
    QdrantVectorStore::new(url).map(|p| Arc::new(p) as Arc<dyn VectorStoreProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static QDRANT_PROVIDER: VectorStoreProviderEntry =
    VectorStoreProviderEntry { name: "qdrant", description: "Qdrant vector database over gRPC", build: factory };

#[allow(unused_imports)]
use PointIdOptions as _unused_point_id_options;
#[allow(unused_imports)]
use GetPointsBuilder as _unused_get_points_builder;
#[allow(unused_imports)]
use PointsIdsList as _unused_points_ids_list;
