//! `POST /chat/query` (spec §4.K, §6, §9).
//!
//! The conversational agent that turns retrieved chunks into free-form
//! natural-language answers is an external collaborator named but not
//! designed here (spec §1). This handler owns what's left: running the
//! hybrid retriever, classifying the caller's intent into one of a closed
//! set of `format` variants (spec §9 REDESIGN FLAGS: wire format chosen
//! before the handler returns, no post-hoc reinterpretation), and
//! assembling citations with provenance.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use govdocs_application::ports::services::RetrievedChunk;
use govdocs_domain::value_objects::{ApprovalStatus, DocumentId};

use crate::transport::axum_http::auth::AuthenticatedUser;
use crate::transport::axum_http::error::ApiError;
use crate::transport::axum_http::handlers::documents::{render_aspect, DEFAULT_ASPECTS};
use crate::transport::axum_http::state::AppState;

/// Body of `POST /chat/query`.
#[derive(Debug, Deserialize)]
pub struct ChatQueryRequest {
    /// The caller's natural-language question.
    pub question: String,
    /// Conversation thread to associate this turn with, if continuing one.
    /// Threading/memory itself belongs to the out-of-scope conversational
    /// agent; it is accepted and echoed back, not acted on here.
    pub thread_id: Option<String>,
}

/// Closed response-format variants (spec §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-text answer synthesized from the top chunk.
    Text,
    /// `data` is a flat list of matching document titles.
    List,
    /// `data` is a single integer count of matching documents.
    Count,
    /// `data` is a per-document comparison matrix over the default aspects.
    Comparison,
}

/// One cited chunk backing the answer.
#[derive(Debug, Serialize)]
pub struct Citation {
    /// Parent document id.
    pub doc_id: DocumentId,
    /// Source filename.
    pub source: String,
    /// Approval status of the parent document.
    pub approval_status: ApprovalStatus,
    /// Blended relevance/confidence score.
    pub score: f32,
}

/// Response of `POST /chat/query`.
#[derive(Debug, Serialize)]
pub struct ChatQueryResponse {
    /// Synthesized answer text.
    pub answer: String,
    /// Which closed format `data` follows.
    pub format: ResponseFormat,
    /// Format-specific payload; absent for `Text`.
    pub data: Option<serde_json::Value>,
    /// Supporting citations, role-filtered and reranked.
    pub citations: Vec<Citation>,
    /// Overall confidence: the top citation's score, or 0 with no results.
    pub confidence: f32,
    /// Echoes the request's `thread_id`, unchanged.
    pub thread_id: Option<String>,
}

/// Light keyword/regex intent classification (spec §4.K stage 1).
fn classify_intent(question: &str) -> ResponseFormat {
    let q = question.to_lowercase();
    if q.contains("how many") || q.contains("number of") || q.starts_with("count") {
        ResponseFormat::Count
    } else if q.contains("compare") || q.contains(" vs ") || q.contains("difference between") {
        ResponseFormat::Comparison
    } else if q.contains("list ") || q.starts_with("list") || q.contains("which documents") || q.contains("show me all") {
        ResponseFormat::List
    } else {
        ResponseFormat::Text
    }
}

/// `POST /chat/query`
///
/// # Errors
///
/// Returns [`ApiError`] if the retriever fails.
pub async fn chat_query(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<ChatQueryRequest>,
) -> Result<Json<ChatQueryResponse>, ApiError> {
    let format = classify_intent(&body.question);
    let chunks = state
        .ctx
        .hybrid_retriever
        .retrieve(&body.question, &user, govdocs_application::constants::DEFAULT_RERANK_TOP_K)
        .await?;

    let citations: Vec<Citation> = chunks
        .iter()
        .map(|c| Citation {
            doc_id: c.doc_id,
            source: c.filename.clone(),
            approval_status: c.approval_status,
            score: c.confidence,
        })
        .collect();
    let confidence = citations.first().map_or(0.0, |c| c.score);

    let (answer, data) = match format {
        ResponseFormat::Count => (
            format!("Found {} matching document(s).", chunks.len()),
            Some(serde_json::json!({ "count": chunks.len() })),
        ),
        ResponseFormat::List => {
            let titles: Vec<&str> = chunks.iter().map(|c| c.filename.as_str()).collect();
            (format!("{} document(s) matched your query.", titles.len()), Some(serde_json::json!({ "items": titles })))
        }
        ResponseFormat::Comparison => {
            let rows = comparison_rows(&state, &chunks).await?;
            (
                "Comparison assembled from the documents retrieved for your query.".to_string(),
                Some(serde_json::json!({ "aspects": DEFAULT_ASPECTS, "rows": rows })),
            )
        }
        ResponseFormat::Text => (synthesize_answer(&chunks), None),
    };

    Ok(Json(ChatQueryResponse {
        answer,
        format,
        data,
        citations,
        confidence,
        thread_id: body.thread_id,
    }))
}

/// Deterministic excerpt-based answer: the out-of-scope conversational
/// agent owns actual NLG, so this surfaces the top chunk verbatim rather
/// than fabricating a paraphrase.
fn synthesize_answer(chunks: &[RetrievedChunk]) -> String {
    match chunks.first() {
        Some(top) => {
            const MAX_EXCERPT_CHARS: usize = 400;
            let excerpt: String = top.text.chars().take(MAX_EXCERPT_CHARS).collect();
            excerpt
        }
        None => "No matching documents were found.".to_string(),
    }
}

async fn comparison_rows(state: &AppState, chunks: &[RetrievedChunk]) -> Result<Vec<serde_json::Value>, ApiError> {
    let mut seen = std::collections::HashSet::new();
    let mut rows = Vec::new();
    for chunk in chunks {
        if !seen.insert(chunk.doc_id) || rows.len() >= 5 {
            continue;
        }
        let document = state.ctx.document_repo.get_by_id(chunk.doc_id).await?;
        let metadata = state.ctx.metadata_repo.get(chunk.doc_id).await?;
        let values: std::collections::BTreeMap<String, String> = DEFAULT_ASPECTS
            .iter()
            .map(|aspect| ((*aspect).to_string(), render_aspect(aspect, &document, metadata.as_ref())))
            .collect();
        rows.push(serde_json::json!({ "doc_id": document.id, "values": values }));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_intent_detects_count_questions() {
        assert_eq!(classify_intent("How many circulars were issued in 2023?"), ResponseFormat::Count);
    }

    #[test]
    fn classify_intent_detects_comparison_questions() {
        assert_eq!(classify_intent("Compare the 2022 and 2023 fee circulars"), ResponseFormat::Comparison);
    }

    #[test]
    fn classify_intent_detects_list_questions() {
        assert_eq!(classify_intent("List all AICTE circulars about fees"), ResponseFormat::List);
    }

    #[test]
    fn classify_intent_defaults_to_text() {
        assert_eq!(classify_intent("What is the fee refund policy?"), ResponseFormat::Text);
    }
}
