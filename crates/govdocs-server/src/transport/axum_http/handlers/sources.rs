//! `POST/PUT/DELETE/GET /web-scraping/sources` (spec §4.A, §6).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use govdocs_domain::entities::Source;
use govdocs_domain::value_objects::{Dialect, SourceId};

use crate::transport::axum_http::error::ApiError;
use crate::transport::axum_http::state::AppState;

/// Body of `POST /web-scraping/sources`.
#[derive(Debug, Deserialize)]
pub struct CreateSourceRequest {
    /// Human-readable name.
    pub name: String,
    /// Entry-point URL pagination starts from.
    pub base_url: String,
    /// Dialect scraper this source discovers links with.
    pub dialect: Dialect,
    /// Filter keywords; normalized (trimmed, case-folded, deduped) before storage.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Cap on documents discovered per run, overrides the `Source::new` default.
    pub max_docs: Option<u32>,
    /// Cap on listing pages visited per run, overrides the `Source::new` default.
    pub max_pages: Option<u32>,
    /// Leading pages always re-scanned, overrides the `Source::new` default.
    pub window_size: Option<u32>,
    /// Optional cron-style schedule for unattended runs.
    pub schedule: Option<String>,
    /// Owning institution, when the source is institution-scoped.
    pub institution_id: Option<String>,
}

/// Body of `PUT /web-scraping/sources/{id}`. Every field optional; only
/// supplied fields are applied over the stored source.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateSourceRequest {
    /// Replace the display name.
    pub name: Option<String>,
    /// Replace filter keywords.
    pub keywords: Option<Vec<String>>,
    /// Replace the documents-per-run cap.
    pub max_docs: Option<u32>,
    /// Replace the pages-per-run cap.
    pub max_pages: Option<u32>,
    /// Replace the sliding-window size.
    pub window_size: Option<u32>,
    /// Replace pagination enablement.
    pub pagination_enabled: Option<bool>,
    /// Replace the schedule string.
    pub schedule: Option<String>,
    /// Replace the enabled flag.
    pub enabled: Option<bool>,
}

/// Normalize keywords per spec §4.A: trimmed, case-folded, deduped.
fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for kw in keywords {
        let normalized = kw.trim().to_lowercase();
        if !normalized.is_empty() && seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }
    out
}

/// `POST /web-scraping/sources`
///
/// # Errors
///
/// Returns [`ApiError`] if `window_size` exceeds `max_pages` or the
/// registry rejects the write.
pub async fn create_source(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSourceRequest>,
) -> Result<Json<Source>, ApiError> {
    let mut source = Source::new(body.name, body.base_url, body.dialect);
    source.keywords = normalize_keywords(body.keywords);
    if let Some(v) = body.max_docs {
        source.max_docs = v;
    }
    if let Some(v) = body.max_pages {
        source.max_pages = v;
    }
    if let Some(v) = body.window_size {
        source.window_size = v;
    }
    source.schedule = body.schedule;
    source.institution_id = body.institution_id;

    if source.window_size > source.max_pages {
        return Err(ApiError(govdocs_domain::error::Error::invalid(
            "window_size must not exceed max_pages",
        )));
    }

    let created = state.ctx.source_registry.create(source).await?;
    Ok(Json(created))
}

/// `PUT /web-scraping/sources/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`]-mapped response if `id` is unknown.
pub async fn update_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SourceId>,
    Json(body): Json<UpdateSourceRequest>,
) -> Result<Json<Source>, ApiError> {
    let mut source = state.ctx.source_registry.get(id).await?;
    if let Some(v) = body.name {
        source.name = v;
    }
    if let Some(v) = body.keywords {
        source.keywords = normalize_keywords(v);
    }
    if let Some(v) = body.max_docs {
        source.max_docs = v;
    }
    if let Some(v) = body.max_pages {
        source.max_pages = v;
    }
    if let Some(v) = body.window_size {
        source.window_size = v;
    }
    if let Some(v) = body.pagination_enabled {
        source.pagination_enabled = v;
    }
    if let Some(v) = body.schedule {
        source.schedule = Some(v);
    }
    if let Some(v) = body.enabled {
        source.enabled = v;
    }

    if source.window_size > source.max_pages {
        return Err(ApiError(govdocs_domain::error::Error::invalid(
            "window_size must not exceed max_pages",
        )));
    }

    let updated = state.ctx.source_registry.update(source).await?;
    Ok(Json(updated))
}

/// `DELETE /web-scraping/sources/{id}`
///
/// # Errors
///
/// Returns [`ApiError`] if a job is currently running against this source
/// (the registry refuses the delete, spec §4.A).
pub async fn delete_source(State(state): State<Arc<AppState>>, Path(id): Path<SourceId>) -> Result<Json<DeleteAck>, ApiError> {
    state.ctx.source_registry.delete(id).await?;
    Ok(Json(DeleteAck { deleted: true }))
}

/// Response body of a delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    /// Always `true` on success; failures are surfaced as an `ApiError`.
    pub deleted: bool,
}

/// `GET /web-scraping/sources`
///
/// # Errors
///
/// Returns [`ApiError`] if the registry read fails.
pub async fn list_sources(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Source>>, ApiError> {
    let sources = state.ctx.source_registry.list().await?;
    Ok(Json(sources))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keywords_trims_folds_and_dedupes() {
        let out = normalize_keywords(vec![" Circular ".to_string(), "circular".to_string(), "Notice".to_string()]);
        assert_eq!(out, vec!["circular".to_string(), "notice".to_string()]);
    }
}
