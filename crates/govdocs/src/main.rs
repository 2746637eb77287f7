//! `govdocs` binary: serves the HTTP API, or runs a one-shot scrape/sync
//! outside the request path (spec §6).

use anyhow::Result;
use clap::{Parser, Subcommand};
use govdocs::commands;

#[derive(Parser)]
#[command(name = "govdocs")]
#[command(about = "Document ingestion and retrieval platform for policy/regulatory documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve,
    /// Run a one-shot scrape against a registered source and wait for it to finish.
    Scrape {
        /// Source id (UUID, or a name resolved to a deterministic id).
        source_id: String,
        /// Cap documents discovered this run.
        #[arg(long)]
        max_documents: Option<u32>,
        /// Cap listing pages visited this run.
        #[arg(long)]
        max_pages: Option<u32>,
        /// Ignore the sliding-window shortcut and rescan from the start.
        #[arg(long)]
        force_full_scan: bool,
    },
    /// Run a one-shot sync against a registered external data source.
    Sync {
        /// External data source id (UUID, or a name resolved to a deterministic id).
        data_source_id: String,
        /// Cap the number of rows ingested this run.
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = govdocs_infrastructure::config::load()?;
    govdocs_infrastructure::logging::init(&config.logging);

    let cli = Cli::parse();
    let ctx = std::sync::Arc::new(govdocs_infrastructure::di::bootstrap::init_app(config).await?);

    match cli.command {
        Commands::Serve => commands::serve(ctx).await,
        Commands::Scrape {
            source_id,
            max_documents,
            max_pages,
            force_full_scan,
        } => commands::scrape(ctx, &source_id, max_documents, max_pages, force_full_scan).await,
        Commands::Sync { data_source_id, limit } => commands::sync(ctx, &data_source_id, limit).await,
    }
}
