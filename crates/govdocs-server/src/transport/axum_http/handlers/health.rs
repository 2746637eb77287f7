//! Liveness/readiness probes (spec §6 supplement: standard for any
//! long-running service).

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::transport::axum_http::error::ApiError;
use crate::transport::axum_http::state::AppState;

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

/// `GET /health`. Always returns `200` once the process is up; does not
/// touch the database, so it stays cheap for a load balancer to poll.
pub async fn health_check() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// `GET /readyz`. Round-trips the database through the source repository;
/// a failure here means the process is up but not ready to serve traffic.
///
/// # Errors
///
/// Returns [`ApiError`] if the database is unreachable.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Result<Json<HealthBody>, ApiError> {
    state.ctx.source_repo.list_all().await?;
    Ok(Json(HealthBody { status: "ready" }))
}
