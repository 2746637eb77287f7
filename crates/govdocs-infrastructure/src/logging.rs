//! Structured logging setup (spec §2 ambient stack: `tracing` +
//! `tracing-subscriber`). The non-ASCII-safe rendering fallback required by
//! spec §7 lives in `govdocs_domain::utils::safe_display`, reused by every
//! layer that logs scraped content.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::LoggingConfig;

/// Install the global `tracing` subscriber from [`LoggingConfig`].
///
/// Honors `RUST_LOG` if set, otherwise falls back to `config.level`.
/// Safe to call once per process; a second call is a no-op (subsequent
/// `set_global_default` failures are swallowed rather than panicking, since
/// tests and CLI subcommands may both try to initialize logging).
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);

    let result = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already initialized, skipping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = LoggingConfig::default();
        init(&config);
        init(&config);
    }
}
