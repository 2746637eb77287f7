//! Constants for the `sqlx`-backed repository implementations.

/// Job-history retention window in seconds (30 days), used by the
/// retention sweep to purge finished [`govdocs_domain::entities::ScrapeJob`]
/// rows past this age.
pub const JOB_RETENTION_SECS: i64 = 30 * 24 * 60 * 60;

/// Max characters for a SQL statement preview in log messages.
pub const SQL_PREVIEW_CHAR_LIMIT: usize = 120;
