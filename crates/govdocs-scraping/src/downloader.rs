//! Retrying document downloader (spec §4.D).

use std::time::Duration;

use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoffBuilder};
use bytes::{Bytes, BytesMut};
use rand::Rng;
use reqwest::{Client, StatusCode};

use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{Downloader, FetchedDocument};

/// Rotating `User-Agent` pool spanning at least three distinct browser
/// families, so a single fixed header does not become a scraper signature.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

const MAX_REDIRECTS: usize = 5;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: usize = 3;
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Fetches a URL with retry/backoff, a bounded redirect chain, and a byte
/// cap enforced while streaming the response body (spec §4.D).
#[derive(Debug)]
pub struct ReqwestDownloader {
    client: Client,
    max_bytes: u64,
}

impl ReqwestDownloader {
    /// Build a downloader. `max_bytes` aborts the stream once exceeded,
    /// surfaced as [`Error::TooLarge`] and never retried.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the underlying `reqwest::Client` fails
    /// to build (e.g. an invalid TLS backend configuration).
    pub fn new(max_bytes: u64) -> Result<Self> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config { message: format!("failed to build HTTP client: {e}") })?;
        Ok(Self { client, max_bytes })
    }

    fn random_user_agent(&self) -> &'static str {
        let idx = rand::rng().random_range(0..USER_AGENTS.len());
        USER_AGENTS[idx]
    }
}

#[async_trait]
impl Downloader for ReqwestDownloader {
    async fn fetch(&self, url: &str, referer: &str) -> Result<FetchedDocument> {
        let mut backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(INITIAL_BACKOFF)
            .with_multiplier(2.0)
            .with_max_elapsed_time(Some(Duration::from_secs(30)))
            .build();

        let mut attempt = 0usize;
        loop {
            attempt += 1;
            match self.try_fetch(url, referer).await {
                Ok(doc) => return Ok(doc),
                Err(err) if attempt > MAX_RETRIES || !is_retryable(&err) => return Err(err),
                Err(err) => {
                    let wait = backoff.next_backoff().unwrap_or(INITIAL_BACKOFF);
                    tracing::warn!(url, attempt, error = %err, "retrying download after backoff");
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

impl ReqwestDownloader {
    async fn try_fetch(&self, url: &str, referer: &str) -> Result<FetchedDocument> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", self.random_user_agent())
            .header("Accept", "text/html,application/pdf,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Referer", referer)
            .send()
            .await
            .map_err(|e| Error::UpstreamTransient { message: e.to_string(), source: Some(Box::new(e)) })?;

        let status = response.status();
        if status.is_client_error() && status != StatusCode::REQUEST_TIMEOUT && status != StatusCode::TOO_MANY_REQUESTS
        {
            return Err(Error::UpstreamBlocked { message: format!("HTTP {status} fetching {url}") });
        }
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::REQUEST_TIMEOUT || status.is_server_error()
        {
            return Err(Error::UpstreamTransient {
                message: format!("HTTP {status} fetching {url}"),
                source: None,
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = self.read_capped_body(response).await?;

        Ok(FetchedDocument { final_url, bytes, content_type })
    }

    async fn read_capped_body(&self, response: reqwest::Response) -> Result<Bytes> {
        use futures_util::StreamExt;

        let mut stream = response.bytes_stream();
        let mut buffer = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::UpstreamTransient { message: e.to_string(), source: Some(Box::new(e)) })?;
            buffer.extend_from_slice(&chunk);
            if buffer.len() as u64 > self.max_bytes {
                return Err(Error::TooLarge {
                    message: format!("response exceeded byte cap of {} bytes", self.max_bytes),
                });
            }
        }
        Ok(buffer.freeze())
    }
}

fn is_retryable(err: &Error) -> bool {
    matches!(err, Error::UpstreamTransient { .. })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_pool_spans_distinct_families() {
        assert!(USER_AGENTS.len() >= 3);
        assert!(USER_AGENTS.iter().any(|ua| ua.contains("Chrome")));
        assert!(USER_AGENTS.iter().any(|ua| ua.contains("Firefox")));
    }

    #[tokio::test]
    async fn fetch_returns_upstream_blocked_for_404() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let downloader = ReqwestDownloader::new(10_000_000).unwrap();
        let result = downloader.fetch(&server.uri(), &server.uri()).await;
        assert!(matches!(result, Err(Error::UpstreamBlocked { .. })));
    }

    #[tokio::test]
    async fn fetch_retries_then_succeeds_after_transient_5xx() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
            .mount(&server)
            .await;

        let downloader = ReqwestDownloader::new(10_000_000).unwrap();
        let doc = downloader.fetch(&server.uri(), &server.uri()).await.unwrap();
        assert_eq!(doc.bytes.as_ref(), b"ok");
    }
}
