//! `POST /data-sources`, `POST /data-sources/{id}/sync` (spec §4.L, §6).

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use govdocs_domain::entities::{ExternalDataSource, SyncLog};
use govdocs_domain::ports::providers::CryptoProvider;
use govdocs_domain::value_objects::{ExternalDataSourceId, StorageKind};

use crate::transport::axum_http::error::ApiError;
use crate::transport::axum_http::state::AppState;

/// Body of `POST /data-sources`. `connection_string` arrives in plaintext
/// over the (assumed TLS-terminated) admin channel and is encrypted before
/// it ever reaches the repository (spec §4.L).
#[derive(Debug, Deserialize)]
pub struct CreateDataSourceRequest {
    /// Human-readable name.
    pub name: String,
    /// Backing store kind.
    pub storage_kind: StorageKind,
    /// Plaintext connection string; never persisted as given.
    pub connection_string: String,
    /// Table the ingester selects rows from.
    pub table: String,
    /// Column carrying the raw document bytes or object-store path.
    pub file_column: String,
    /// Column carrying the document's display filename.
    pub filename_column: String,
    /// Additional columns merged into `DocumentMetadata` by name.
    #[serde(default)]
    pub metadata_columns: Vec<String>,
    /// Prepended to `file_column` values for `storage_kind == object_store`.
    pub path_prefix: Option<String>,
}

/// `POST /data-sources`
///
/// # Errors
///
/// Returns [`ApiError`] if credential encryption or the repository write fails.
pub async fn create_data_source(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateDataSourceRequest>,
) -> Result<Json<ExternalDataSource>, ApiError> {
    let encrypted = state.ctx.crypto.encrypt(body.connection_string.as_bytes())?;

    let mut source = ExternalDataSource::new(
        body.name,
        body.storage_kind,
        hex::encode(&encrypted.ciphertext),
        hex::encode(&encrypted.nonce),
        body.table,
        body.file_column,
        body.filename_column,
        body.metadata_columns,
    );
    source.path_prefix = body.path_prefix;

    state.ctx.external_data_source_repo.create(&source).await?;
    Ok(Json(source))
}

/// `GET /data-sources`
///
/// # Errors
///
/// Returns [`ApiError`] if the repository read fails.
pub async fn list_data_sources(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ExternalDataSource>>, ApiError> {
    let sources = state.ctx.external_data_source_repo.list_all().await?;
    Ok(Json(sources))
}

/// Query params of `POST /data-sources/{id}/sync`.
#[derive(Debug, Deserialize, Default)]
pub struct SyncQuery {
    /// Caps rows processed this run.
    pub limit: Option<u32>,
}

/// `POST /data-sources/{id}/sync[?limit=N]`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`]-mapped response if `id` is unknown.
pub async fn sync_data_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ExternalDataSourceId>,
    Query(query): Query<SyncQuery>,
) -> Result<Json<SyncLog>, ApiError> {
    let log = state.ctx.external_db_sync.sync(id, query.limit).await?;
    Ok(Json(log))
}
