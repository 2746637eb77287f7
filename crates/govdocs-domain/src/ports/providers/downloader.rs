//! Downloader Provider Port (spec §4.D)

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Fetched document bytes plus the response metadata needed for dedup and
/// storage bookkeeping.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects.
    pub final_url: String,
    /// Raw response body.
    pub bytes: Bytes,
    /// `Content-Type` response header, if present.
    pub content_type: Option<String>,
}

/// Fetches remote URLs with retry, backoff, and redirect handling (spec §4.D).
#[async_trait]
pub trait Downloader: Send + Sync + std::fmt::Debug {
    /// Fetch `url`, retrying transient failures per the provider's backoff
    /// policy and following up to the configured redirect limit. `referer`
    /// is sent as the `Referer` header, set by the caller to the source's
    /// base URL (spec §4.D).
    ///
    /// # Errors
    /// Returns [`crate::error::Error::UpstreamBlocked`] when the source
    /// rejects the request after retries, or
    /// [`crate::error::Error::UpstreamTransient`] when the retry budget is
    /// exhausted on a transient failure.
    async fn fetch(&self, url: &str, referer: &str) -> Result<FetchedDocument>;
}
