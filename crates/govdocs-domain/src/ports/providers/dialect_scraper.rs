//! Site-Dialect Scraper Port (spec §4.C)

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One document link discovered on a listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredLink {
    /// Absolute URL of the document.
    pub url: String,
    /// Link text or caption, used as a filename fallback.
    pub title: Option<String>,
    /// File extension inferred from the URL or link text (e.g. `"pdf"`), when determinable.
    pub file_type: Option<String>,
}

/// Parsed listing page: the links it contains and where pagination continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage {
    /// Document links discovered on this page.
    pub links: Vec<DiscoveredLink>,
    /// URL of the next listing page, if the dialect found one.
    pub next_page_url: Option<String>,
}

/// Parses a site's HTML listing pages into document links (spec §4.C).
///
/// Implementations are stateless, pure parsers: fetching is the
/// [`super::downloader::Downloader`]'s job, dialect selection is the
/// registry's job.
pub trait DialectScraper: Send + Sync + std::fmt::Debug {
    /// Parse a fetched listing page's HTML.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::ExtractionFailed`] when the page's
    /// structure does not match this dialect's expected shape.
    fn parse_listing(&self, html: &str, page_url: &str) -> Result<ListingPage>;

    /// Identifier of this dialect, e.g. `"moe"`.
    fn dialect_name(&self) -> &str;
}
