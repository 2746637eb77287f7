//! `/documents/*` and `/web-scraping/scraped-documents` (spec §4.E-§4.K, §6).
//!
//! The comparison and conflict-detection endpoints sit downstream of the
//! conversational agent, which spec §1 treats as an external collaborator
//! named but not designed here. What's implemented is the contract surface
//! over data this service already owns — stored `DocumentMetadata` fields —
//! not free-text natural-language generation.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use govdocs_domain::entities::{Document, DocumentMetadata};
use govdocs_domain::ports::repositories::DocumentFilter;
use govdocs_domain::value_objects::DocumentId;

use crate::transport::axum_http::dto::{resolve_page_size, Page};
use crate::transport::axum_http::error::ApiError;
use crate::transport::axum_http::state::AppState;

// ============================================================================
// POST /documents/embed
// ============================================================================

/// Body of `POST /documents/embed`.
#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    /// Documents to embed on demand.
    pub doc_ids: Vec<DocumentId>,
}

/// Response of `POST /documents/embed`.
#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    /// Always `"queued"`: embedding runs on a background task per document.
    pub status: &'static str,
    /// Rough wall-clock estimate in seconds, assuming the embedding worker
    /// pool processes roughly one document per second under load.
    pub estimated_time_secs: u64,
}

/// `POST /documents/embed`. Manual pre-embed trigger, the same path the
/// hybrid retriever's lazy-embedding stage calls synchronously per
/// candidate (spec §4.K stage 3); here it's fire-and-forget per document so
/// a bulk request doesn't block on the slowest document.
pub async fn embed_documents(State(state): State<Arc<AppState>>, Json(body): Json<EmbedRequest>) -> Json<EmbedResponse> {
    for doc_id in body.doc_ids.clone() {
        let processor = state.ctx.document_processor.clone();
        tokio::spawn(async move {
            if let Err(err) = processor.embed_document(doc_id).await {
                tracing::warn!(doc_id = %doc_id, error = %err, "manual embed request failed");
            }
        });
    }
    Json(EmbedResponse {
        status: "queued",
        estimated_time_secs: body.doc_ids.len() as u64,
    })
}

// ============================================================================
// GET /documents/{id}/status
// ============================================================================

/// Response of `GET /documents/{id}/status`.
#[derive(Debug, Serialize)]
pub struct DocumentStatusResponse {
    /// The document's own lifecycle fields.
    pub document: Document,
    /// Extracted metadata, once `metadata_status == ready`.
    pub metadata: Option<DocumentMetadata>,
}

/// `GET /documents/{id}/status`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`]-mapped response if `id` is unknown.
pub async fn document_status(State(state): State<Arc<AppState>>, Path(id): Path<DocumentId>) -> Result<Json<DocumentStatusResponse>, ApiError> {
    let document = state.ctx.document_repo.get_by_id(id).await?;
    let metadata = state.ctx.metadata_repo.get(id).await?;
    Ok(Json(DocumentStatusResponse { document, metadata }))
}

// ============================================================================
// GET /documents/browse/metadata, GET /web-scraping/scraped-documents
// ============================================================================

/// Query params shared by the two browse endpoints.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    /// Free-text filter over filename/title.
    pub query: Option<String>,
    /// Restrict to a document type.
    pub document_type: Option<String>,
    /// Restrict to a `version_date` year.
    pub year: Option<i32>,
    /// Restrict to an owning institution.
    pub institution_id: Option<String>,
    /// Restrict to a department/ministry named in extracted metadata.
    pub department: Option<String>,
    /// 0-based page index, defaults to 0.
    #[serde(default)]
    pub page: u32,
    /// Items per page, defaults to [`crate::transport::axum_http::dto::DEFAULT_PAGE_SIZE`].
    pub page_size: Option<u32>,
}

impl BrowseQuery {
    fn into_filter(&self) -> DocumentFilter {
        DocumentFilter {
            document_type: self.document_type.clone(),
            year: self.year,
            institution_id: self.institution_id.clone(),
            department: self.department.clone(),
            visibility: None,
            approval_status: None,
            query: self.query.clone(),
        }
    }
}

/// `GET /documents/browse/metadata` and `GET /web-scraping/scraped-documents`.
///
/// # Errors
///
/// Returns [`ApiError`] if the underlying repository read fails.
pub async fn browse_documents(State(state): State<Arc<AppState>>, Query(query): Query<BrowseQuery>) -> Result<Json<Page<Document>>, ApiError> {
    let page = query.page;
    let page_size = resolve_page_size(query.page_size);
    let filter = query.into_filter();
    let (items, total) = state.ctx.document_repo.browse(&filter, page, page_size).await?;
    Ok(Json(Page {
        items,
        page,
        page_size,
        total,
    }))
}

// ============================================================================
// POST /documents/compare, POST /documents/compare/conflicts
// ============================================================================

/// Body shared by `/documents/compare` and `/documents/compare/conflicts`.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    /// 2 to 5 documents to compare.
    pub document_ids: Vec<DocumentId>,
    /// Aspects to compare; defaults to title/summary/document_type/tags/version_date.
    #[serde(default)]
    pub comparison_aspects: Vec<String>,
}

pub(crate) const DEFAULT_ASPECTS: &[&str] = &["title", "summary", "document_type", "tags", "version_date"];

fn validate_document_count(ids: &[DocumentId]) -> Result<(), ApiError> {
    if !(2..=5).contains(&ids.len()) {
        return Err(ApiError(govdocs_domain::error::Error::invalid(
            "document_ids must contain between 2 and 5 entries",
        )));
    }
    Ok(())
}

/// One document's row in the comparison matrix.
#[derive(Debug, Serialize)]
pub struct ComparisonRow {
    /// The document this row describes.
    pub doc_id: DocumentId,
    /// Requested aspect → rendered value (`"—"` when unavailable).
    pub values: std::collections::BTreeMap<String, String>,
}

/// Response of `POST /documents/compare`.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    /// Aspects actually compared.
    pub aspects: Vec<String>,
    /// One row per requested document.
    pub rows: Vec<ComparisonRow>,
}

async fn load_pairs(state: &AppState, ids: &[DocumentId]) -> Result<Vec<(Document, Option<DocumentMetadata>)>, ApiError> {
    let mut pairs = Vec::with_capacity(ids.len());
    for &id in ids {
        let document = state.ctx.document_repo.get_by_id(id).await?;
        let metadata = state.ctx.metadata_repo.get(id).await?;
        pairs.push((document, metadata));
    }
    Ok(pairs)
}

pub(crate) fn render_aspect(aspect: &str, document: &Document, metadata: Option<&DocumentMetadata>) -> String {
    match aspect {
        "title" => metadata.map(|m| m.title.clone()).unwrap_or_else(|| document.filename.clone()),
        "summary" => metadata.map(|m| m.summary.clone()).unwrap_or_default(),
        "document_type" => document.document_type.clone().unwrap_or_default(),
        "tags" => metadata.map(|m| m.tags.join(", ")).unwrap_or_default(),
        "version_date" => document.version_date.map(|d| d.to_string()).unwrap_or_default(),
        "approval_status" => document.approval_status.to_string(),
        "visibility" => document.visibility.to_string(),
        _ => String::new(),
    }
}

/// `POST /documents/compare`
///
/// # Errors
///
/// Returns [`ApiError`] if `document_ids` isn't within `2..=5` or any id is unknown.
pub async fn compare_documents(State(state): State<Arc<AppState>>, Json(body): Json<CompareRequest>) -> Result<Json<ComparisonResponse>, ApiError> {
    validate_document_count(&body.document_ids)?;
    let aspects: Vec<String> = if body.comparison_aspects.is_empty() {
        DEFAULT_ASPECTS.iter().map(|s| (*s).to_string()).collect()
    } else {
        body.comparison_aspects
    };

    let pairs = load_pairs(&state, &body.document_ids).await?;
    let rows = pairs
        .iter()
        .map(|(document, metadata)| ComparisonRow {
            doc_id: document.id,
            values: aspects
                .iter()
                .map(|aspect| (aspect.clone(), render_aspect(aspect, document, metadata.as_ref())))
                .collect(),
        })
        .collect();

    Ok(Json(ComparisonResponse { aspects, rows }))
}

/// One detected disagreement between two documents under comparison.
#[derive(Debug, Serialize)]
pub struct Conflict {
    /// Aspect the two documents disagree on.
    pub aspect: String,
    /// First document in the pair.
    pub doc_id_a: DocumentId,
    /// Second document in the pair.
    pub doc_id_b: DocumentId,
    /// `doc_id_a`'s value.
    pub value_a: String,
    /// `doc_id_b`'s value.
    pub value_b: String,
}

/// Response of `POST /documents/compare/conflicts`.
#[derive(Debug, Serialize)]
pub struct ConflictsResponse {
    /// Every pairwise disagreement found on `document_type` or `version_date`.
    pub conflicts: Vec<Conflict>,
}

/// `POST /documents/compare/conflicts`. Flags pairwise disagreements on
/// `document_type` and `version_date` — the two fields where two documents
/// that are meant to describe the same policy diverging is itself the
/// signal, independent of any NLG.
///
/// # Errors
///
/// Returns [`ApiError`] if `document_ids` isn't within `2..=5` or any id is unknown.
pub async fn compare_conflicts(State(state): State<Arc<AppState>>, Json(body): Json<CompareRequest>) -> Result<Json<ConflictsResponse>, ApiError> {
    validate_document_count(&body.document_ids)?;
    let pairs = load_pairs(&state, &body.document_ids).await?;

    let mut conflicts = Vec::new();
    for i in 0..pairs.len() {
        for j in (i + 1)..pairs.len() {
            let (doc_a, meta_a) = &pairs[i];
            let (doc_b, meta_b) = &pairs[j];
            for aspect in ["document_type", "version_date"] {
                let value_a = render_aspect(aspect, doc_a, meta_a.as_ref());
                let value_b = render_aspect(aspect, doc_b, meta_b.as_ref());
                if !value_a.is_empty() && !value_b.is_empty() && value_a != value_b {
                    conflicts.push(Conflict {
                        aspect: aspect.to_string(),
                        doc_id_a: doc_a.id,
                        doc_id_b: doc_b.id,
                        value_a,
                        value_b,
                    });
                }
            }
        }
    }

    Ok(Json(ConflictsResponse { conflicts }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_domain::value_objects::StorageKind;

    fn doc() -> Document {
        Document::new("f.pdf", "hash", StorageKind::Database, "ref", 1)
    }

    #[test]
    fn render_aspect_falls_back_to_filename_without_metadata() {
        let document = doc();
        assert_eq!(render_aspect("title", &document, None), "f.pdf");
    }

    #[test]
    fn validate_document_count_rejects_single_document() {
        assert!(validate_document_count(&[DocumentId::new()]).is_err());
    }

    #[test]
    fn validate_document_count_accepts_two_to_five() {
        let ids: Vec<DocumentId> = (0..5).map(|_| DocumentId::new()).collect();
        assert!(validate_document_count(&ids).is_ok());
    }
}
