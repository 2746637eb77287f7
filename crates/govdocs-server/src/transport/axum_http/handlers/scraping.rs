//! `POST /web-scraping/sources/{id}/scrape`, `POST /web-scraping/stop`,
//! `GET /web-scraping/active-jobs` (spec §4.B, §6).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use govdocs_application::ports::services::ScrapeOverrides;
use govdocs_domain::entities::ScrapeJob;
use govdocs_domain::value_objects::{JobId, SourceId};

use crate::transport::axum_http::error::ApiError;
use crate::transport::axum_http::state::AppState;

/// Body of `POST /web-scraping/sources/{id}/scrape`.
#[derive(Debug, Deserialize, Default)]
pub struct StartScrapeRequest {
    /// Caps documents discovered this run.
    pub max_documents: Option<u32>,
    /// Overrides the source's `pagination_enabled` flag.
    pub pagination_enabled: Option<bool>,
    /// Caps listing pages visited this run.
    pub max_pages: Option<u32>,
    /// Forces a full re-scan ignoring the sliding-window shortcut.
    #[serde(default)]
    pub force_full_scan: bool,
}

impl From<StartScrapeRequest> for ScrapeOverrides {
    fn from(body: StartScrapeRequest) -> Self {
        Self {
            max_documents: body.max_documents,
            pagination_enabled: body.pagination_enabled,
            max_pages: body.max_pages,
            force_full_scan: body.force_full_scan,
        }
    }
}

/// Response of `POST /web-scraping/sources/{id}/scrape`.
#[derive(Debug, Serialize)]
pub struct StartScrapeResponse {
    /// Identifier of the newly started job.
    pub job_id: JobId,
}

/// `POST /web-scraping/sources/{id}/scrape`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`]-mapped response if `id` is unknown.
pub async fn start_scrape(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<SourceId>,
    Json(body): Json<StartScrapeRequest>,
) -> Result<Json<StartScrapeResponse>, ApiError> {
    let job_id = state.ctx.scrape_orchestrator.start(source_id, body.into()).await?;
    Ok(Json(StartScrapeResponse { job_id }))
}

/// Body of `POST /web-scraping/stop`.
#[derive(Debug, Deserialize)]
pub struct StopScrapeRequest {
    /// Job to cancel.
    pub job_id: JobId,
}

/// Response of `POST /web-scraping/stop`.
#[derive(Debug, Serialize)]
pub struct StopScrapeResponse {
    /// The job's status immediately after the stop request was recorded.
    pub status: govdocs_domain::value_objects::ScrapeJobStatus,
}

/// `POST /web-scraping/stop`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`]-mapped response if `job_id` is unknown.
pub async fn stop_scrape(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StopScrapeRequest>,
) -> Result<Json<StopScrapeResponse>, ApiError> {
    let job = state.ctx.scrape_orchestrator.stop(body.job_id).await?;
    Ok(Json(StopScrapeResponse { status: job.status }))
}

/// `GET /web-scraping/active-jobs`
///
/// # Errors
///
/// Returns [`ApiError`] if the orchestrator's job-tracking read fails.
pub async fn active_jobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ScrapeJob>>, ApiError> {
    let jobs = state.ctx.scrape_orchestrator.active_jobs().await?;
    Ok(Json(jobs))
}
