//! CLI subcommand bodies: serve the HTTP API, or trigger a one-shot
//! scrape/sync outside the request path (spec §4.B, §4.L, §6).

use std::sync::Arc;

use anyhow::{Context, Result};

use govdocs_application::ports::services::{ExternalDbSyncInterface, ScrapeOrchestratorInterface, ScrapeOverrides};
use govdocs_domain::value_objects::{ExternalDataSourceId, SourceId};
use govdocs_infrastructure::di::bootstrap::AppContext;

/// Bind and serve the HTTP API until interrupted (spec §6).
///
/// # Errors
///
/// Returns an error if the configured bind address is invalid or the
/// listener cannot be bound.
pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let addr = ctx.config.server.parse_address().context("resolve server bind address")?;
    let state = Arc::new(govdocs_server::AppState::new(ctx));
    let router = govdocs_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.context("bind HTTP listener")?;
    tracing::info!(%addr, "govdocs server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("govdocs server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install Ctrl+C handler, shutdown signal unavailable");
    }
}

/// Trigger a one-shot scrape run against a registered source and wait for it
/// to reach a terminal state (spec §4.B).
///
/// # Errors
///
/// Returns an error if `source_id` doesn't parse, the source is unknown, or
/// the job fails to start.
pub async fn scrape(ctx: Arc<AppContext>, source_id: &str, max_documents: Option<u32>, max_pages: Option<u32>, force_full_scan: bool) -> Result<()> {
    let source_id = SourceId::from_string(source_id);
    let overrides = ScrapeOverrides {
        max_documents,
        pagination_enabled: None,
        max_pages,
        force_full_scan,
    };

    let job_id = ctx.scrape_orchestrator.start(source_id, overrides).await.context("start scrape job")?;
    tracing::info!(%job_id, %source_id, "scrape job started");

    loop {
        let job = ctx.scrape_orchestrator.status(job_id).await.context("poll scrape job status")?;
        if job.status.is_terminal() {
            tracing::info!(
                %job_id,
                status = %job.status,
                documents_found = job.documents_found,
                documents_new = job.documents_new,
                documents_unchanged = job.documents_unchanged,
                documents_failed_metadata = job.documents_failed_metadata,
                "scrape job finished"
            );
            if let Some(message) = job.error_message {
                tracing::warn!(%job_id, %message, "scrape job reported an error");
            }
            return Ok(());
        }
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    }
}

/// Trigger a one-shot sync against a registered external data source (spec §4.L).
///
/// # Errors
///
/// Returns an error if `data_source_id` doesn't parse or the sync fails.
pub async fn sync(ctx: Arc<AppContext>, data_source_id: &str, limit: Option<u32>) -> Result<()> {
    let data_source_id = ExternalDataSourceId::from_string(data_source_id);
    let log = ctx.external_db_sync.sync(data_source_id, limit).await.context("run external data source sync")?;
    tracing::info!(
        sync_log_id = %log.id,
        status = %log.status,
        records_synced = log.records_synced,
        records_failed = log.records_failed,
        "external data source sync finished"
    );
    if let Some(message) = log.error_message {
        tracing::warn!(%message, "sync reported an error");
    }
    Ok(())
}
