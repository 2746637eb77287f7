//! Scraping source entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Dialect, SourceId};

/// Cumulative scrape statistics for a source, updated by the orchestrator
/// after every job completes (spec §3's `Source.stats`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct SourceStats {
    /// Documents discovered across all runs.
    pub discovered: u64,
    /// Documents that were new on first sight across all runs.
    pub new: u64,
    /// Documents that matched an existing content hash across all runs.
    pub unchanged: u64,
    /// Documents whose metadata extraction failed both providers.
    pub failed_metadata: u64,
    /// Listing pages visited across all runs.
    pub pages_scraped: u64,
}

impl SourceStats {
    /// Fold one finished job's counters into the running totals.
    pub fn accumulate(&mut self, job: &crate::entities::ScrapeJob) {
        self.discovered += u64::from(job.documents_found);
        self.new += u64::from(job.documents_new);
        self.unchanged += u64::from(job.documents_unchanged);
        self.failed_metadata += u64::from(job.documents_failed_metadata);
        self.pages_scraped += u64::from(job.pages_visited);
    }
}

/// A registered site a scrape job can be run against (spec §3, §4.A).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    /// Unique identifier.
    pub id: SourceId,
    /// Human-readable name, e.g. `"Ministry of Education circulars"`.
    pub name: String,
    /// Entry-point URL pagination starts from.
    pub base_url: String,
    /// Which dialect scraper this source is discovered/parsed with.
    pub dialect: Dialect,
    /// Normalized (trimmed, case-folded, deduped) filter keywords; a
    /// generic-dialect scraper matches link text against these.
    pub keywords: Vec<String>,
    /// Global cap on documents discovered per run.
    pub max_docs: u32,
    /// Cap on listing pages visited per run.
    pub max_pages: u32,
    /// Whether the sliding-window pagination continues past the first page.
    pub pagination_enabled: bool,
    /// Leading pages always re-scanned on every crawl. Invariant:
    /// `window_size <= max_pages` (spec §3).
    pub window_size: u32,
    /// Optional cron-style schedule string for unattended runs.
    pub schedule: Option<String>,
    /// Owning institution, when the source is institution-scoped.
    pub institution_id: Option<String>,
    /// Whether the source is eligible to be scraped.
    pub enabled: bool,
    /// Cumulative counters mutated by the orchestrator (spec: "stats").
    pub stats: SourceStats,
    /// Creation timestamp (Unix epoch seconds).
    pub created_at: i64,
    /// Last update timestamp (Unix epoch seconds).
    pub updated_at: i64,
    /// Timestamp of the most recent completed scrape, if any.
    pub last_scraped_at: Option<i64>,
}

impl Source {
    /// Construct a new, enabled source at the current time with design-floor
    /// defaults (`max_docs=200`, `max_pages=20`, `window_size=3`).
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, dialect: Dialect) -> Self {
        let now = crate::utils::unix_now();
        Self {
            id: SourceId::new(),
            name: name.into(),
            base_url: base_url.into(),
            dialect,
            keywords: Vec::new(),
            max_docs: 200,
            max_pages: 20,
            pagination_enabled: true,
            window_size: 3,
            schedule: None,
            institution_id: None,
            enabled: true,
            stats: SourceStats::default(),
            created_at: now,
            updated_at: now,
            last_scraped_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_source_respects_window_le_max_pages_invariant() {
        let source = Source::new("test", "https://example.test", Dialect::Generic);
        assert!(source.window_size <= source.max_pages);
    }
}
