//! OCR Provider Port (spec §4.H)
//!
//! Used by the text extractor as a fallback when a PDF's embedded text
//! layer is empty or below the garbage-text heuristic threshold.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Recovers text from scanned/image-only pages.
#[async_trait]
pub trait OcrProvider: Send + Sync + std::fmt::Debug {
    /// Run OCR over a rendered page image and return recovered text.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::ExtractionFailed`] when OCR produces
    /// no usable text.
    async fn recognize(&self, image_bytes: Bytes) -> Result<String>;

    /// Identifier of this provider implementation.
    fn provider_name(&self) -> &str;
}
