//! Axum HTTP transport: router assembly, shared state, auth extraction,
//! and error mapping (spec §6 External Interfaces).

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use govdocs_infrastructure::config::ServerCorsConfig;
use govdocs_infrastructure::constants::http::HEALTH_CHECK_PATH;

pub use state::AppState;

/// Build the full router, wiring every endpoint named in spec §6 against
/// `state`. Wrapped in `Arc` so handlers extract `State<Arc<AppState>>`
/// cheaply; `AppState` itself only holds `Arc` fields so this is one layer
/// of indirection, not a deep clone.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.ctx.config.server.cors);

    Router::new()
        // Liveness/readiness (spec §6 supplement)
        .route(HEALTH_CHECK_PATH, get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readiness_check))
        // Source registry (spec §4.A)
        .route("/web-scraping/sources", post(handlers::sources::create_source).get(handlers::sources::list_sources))
        .route(
            "/web-scraping/sources/{id}",
            put(handlers::sources::update_source).delete(handlers::sources::delete_source),
        )
        // Scraping orchestrator (spec §4.B)
        .route("/web-scraping/sources/{id}/scrape", post(handlers::scraping::start_scrape))
        .route("/web-scraping/stop", post(handlers::scraping::stop_scrape))
        .route("/web-scraping/active-jobs", get(handlers::scraping::active_jobs))
        .route("/web-scraping/scraped-documents", get(handlers::documents::browse_documents))
        // Document lifecycle + retrieval prep (spec §4.E-§4.K)
        .route("/documents/embed", post(handlers::documents::embed_documents))
        .route("/documents/{id}/status", get(handlers::documents::document_status))
        .route("/documents/browse/metadata", get(handlers::documents::browse_documents))
        .route("/documents/compare", post(handlers::documents::compare_documents))
        .route("/documents/compare/conflicts", post(handlers::documents::compare_conflicts))
        // Hybrid retriever / chat surface (spec §4.K)
        .route("/chat/query", post(handlers::chat::chat_query))
        // External DB ingester (spec §4.L)
        .route("/data-sources", post(handlers::data_sources::create_data_source).get(handlers::data_sources::list_data_sources))
        .route("/data-sources/{id}/sync", post(handlers::data_sources::sync_data_source))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ServerCorsConfig) -> CorsLayer {
    if !config.cors_enabled {
        return CorsLayer::new();
    }
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600))
}
