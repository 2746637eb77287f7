//! Shared request/response shapes used across more than one handler module.

use serde::Serialize;

/// Common pagination envelope for list endpoints (spec §6
/// `GET /web-scraping/scraped-documents`, `GET /documents/browse/metadata`).
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 0-based page index this response represents.
    pub page: u32,
    /// Page size that was applied.
    pub page_size: u32,
    /// Total matching items across all pages.
    pub total: u64,
}

/// Default page size applied when a list endpoint's `page_size` is omitted.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Clamp an optional requested page size to `[1, 200]`, defaulting to
/// [`DEFAULT_PAGE_SIZE`] when the caller didn't specify one.
#[must_use]
pub fn resolve_page_size(page_size: Option<u32>) -> u32 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 200)
}
