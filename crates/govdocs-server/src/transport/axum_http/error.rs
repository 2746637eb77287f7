//! Typed-cause to HTTP translation (spec §7: "user-facing endpoints
//! translate typed causes to HTTP"; §6 error model: `4xx` with a JSON
//! `{detail}` body, `403` with a specific reason).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use govdocs_domain::error::Error as DomainError;

/// Wraps a [`DomainError`] so it can be returned directly from a handler.
pub struct ApiError(pub DomainError);

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            DomainError::InputInvalid { message } => (StatusCode::BAD_REQUEST, message.clone()),
            DomainError::AccessDenied { reason } => (StatusCode::FORBIDDEN, reason.clone()),
            DomainError::NotFound { resource } => (StatusCode::NOT_FOUND, format!("not found: {resource}")),
            DomainError::UpstreamBlocked { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            DomainError::UpstreamTransient { message, .. } => (StatusCode::GATEWAY_TIMEOUT, message.clone()),
            DomainError::TooLarge { message } => (StatusCode::PAYLOAD_TOO_LARGE, message.clone()),
            DomainError::ExtractionFailed { message } => (StatusCode::UNPROCESSABLE_ENTITY, message.clone()),
            DomainError::MetadataFailed { message } => (StatusCode::UNPROCESSABLE_ENTITY, message.clone()),
            DomainError::ProviderQuotaExceeded { provider } => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{provider} is temporarily unavailable, please retry shortly"),
            ),
            DomainError::IndexFailure { .. } | DomainError::Database { .. } | DomainError::Io { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string()),
        };

        // Never surface a raw stack trace/source chain to the caller
        // (spec §7: "the service never returns raw stack traces"); the
        // full error, including `source`, still reaches the logs via this
        // span's error event below.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed with an internal error");
        } else {
            tracing::warn!(error = %self.0, status = %status, "request failed");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}
