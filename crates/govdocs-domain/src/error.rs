//! Error handling types.
//!
//! Typed error kinds map directly to the error model of the pipeline spec:
//! client input errors, access control, upstream scraping failures,
//! extraction/metadata failures, and persistence failures each get their own
//! variant so callers can match on cause rather than string-sniff messages.

use thiserror::Error;

/// Result type alias for operations that can fail.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ingestion and retrieval pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed client request; never retried, maps to 4xx.
    #[error("invalid input: {message}")]
    InputInvalid {
        /// Description of what was invalid.
        message: String,
    },

    /// Role/visibility violation; maps to 403 with a specific reason.
    #[error("access denied: {reason}")]
    AccessDenied {
        /// Human-readable denial reason surfaced to the caller.
        reason: String,
    },

    /// Unknown id; maps to 404.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Source returned 401/403/429 after retries were exhausted.
    #[error("upstream blocked: {message}")]
    UpstreamBlocked {
        /// Description of the block.
        message: String,
    },

    /// Timeouts, 5xx responses, or connection errors; retried upstream.
    #[error("upstream transient error: {message}")]
    UpstreamTransient {
        /// Description of the transient failure.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Response body exceeded the downloader's byte cap; never retried,
    /// since re-fetching reproduces the identical failure.
    #[error("response too large: {message}")]
    TooLarge {
        /// Description of the size violation.
        message: String,
    },

    /// No usable text could be extracted from a document.
    #[error("extraction failed: {message}")]
    ExtractionFailed {
        /// Description of the extraction failure.
        message: String,
    },

    /// Neither the primary nor the fallback LLM provider produced acceptable metadata.
    #[error("metadata extraction failed: {message}")]
    MetadataFailed {
        /// Description of the metadata failure.
        message: String,
    },

    /// An LLM provider's rate limit or quota was exceeded.
    #[error("provider quota exceeded: {provider}")]
    ProviderQuotaExceeded {
        /// Name of the provider that rejected the call.
        provider: String,
    },

    /// A vector-store or database write failed after the retry budget was spent.
    #[error("index failure: {message}")]
    IndexFailure {
        /// Description of the failure.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration is missing or fails validation at startup.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// Embedding-provider specific failure.
    #[error("embedding provider error: {message}")]
    Embedding {
        /// Description of the embedding failure.
        message: String,
    },

    /// Vector-store specific failure not covered by [`Error::IndexFailure`].
    #[error("vector store error: {message}")]
    VectorStore {
        /// Description of the vector-store failure.
        message: String,
    },

    /// Object/blob-store specific failure.
    #[error("object store error: {message}")]
    ObjectStore {
        /// Description of the object-store failure.
        message: String,
    },

    /// Cryptographic operation failure (encrypt/decrypt of external credentials).
    #[error("crypto error: {message}")]
    Crypto {
        /// Description of the crypto failure.
        message: String,
    },

    /// Cache operation failure.
    #[error("cache error: {message}")]
    Cache {
        /// Description of the cache failure.
        message: String,
    },

    /// Database operation failure.
    #[error("database error: {message}")]
    Database {
        /// Description of the database failure.
        source: String,
    },

    /// I/O failure.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization failure.
    #[error("JSON error: {source}")]
    Json {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Generic error from an external source with no dedicated variant.
    #[error("error: {0}")]
    Generic(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Create an [`Error::InputInvalid`].
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::InputInvalid {
            message: message.into(),
        }
    }

    /// Create an [`Error::AccessDenied`].
    pub fn access_denied<S: Into<String>>(reason: S) -> Self {
        Self::AccessDenied {
            reason: reason.into(),
        }
    }

    /// Create an [`Error::NotFound`].
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an [`Error::UpstreamTransient`] with no source.
    pub fn transient<S: Into<String>>(message: S) -> Self {
        Self::UpstreamTransient {
            message: message.into(),
            source: None,
        }
    }

    /// Create an [`Error::IndexFailure`] with no source.
    pub fn index_failure<S: Into<String>>(message: S) -> Self {
        Self::IndexFailure {
            message: message.into(),
            source: None,
        }
    }
}
