//! `OcrProvider` implementations (spec §4.E: OCR is an external collaborator).
//!
//! The spec explicitly scopes OCR engine selection out, so the default
//! build carries a provider that fails fast with a clear error rather than
//! silently returning empty text. The `tesseract` feature adds a real
//! implementation that shells out to the `tesseract` CLI, keeping the
//! binary dependency optional instead of linking an OCR engine into every
//! build.

use async_trait::async_trait;
use bytes::Bytes;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::OcrProvider;

/// Fails every call; wired in when no OCR engine is configured so a scanned
/// document surfaces as an extraction failure instead of an empty chunk.
#[derive(Debug, Default)]
pub struct NoopOcrProvider;

impl NoopOcrProvider {
    /// Construct the no-op provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OcrProvider for NoopOcrProvider {
    async fn recognize(&self, _image_bytes: Bytes) -> Result<String> {
        Err(Error::ExtractionFailed {
            message: "no OCR provider configured; scanned document cannot be read".to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "none"
    }
}

#[cfg(feature = "tesseract")]
pub use tesseract_cli::TesseractOcrProvider;

#[cfg(feature = "tesseract")]
mod tesseract_cli {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use bytes::Bytes;
    use govdocs_domain::error::{Error, Result};
    use govdocs_domain::ports::providers::OcrProvider;
    use tokio::io::AsyncWriteExt;
    use tokio::process::Command;

    /// Runs the system `tesseract` binary against a temp file, the simplest
    /// integration that avoids linking a C OCR library into this crate.
    #[derive(Debug)]
    pub struct TesseractOcrProvider {
        binary: String,
        language: String,
    }

    impl TesseractOcrProvider {
        /// Construct a provider invoking `binary` (usually `"tesseract"` on `$PATH`).
        #[must_use]
        pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
            Self { binary: binary.into(), language: language.into() }
        }
    }

    impl Default for TesseractOcrProvider {
        fn default() -> Self {
            Self::new("tesseract", "eng")
        }
    }

    #[async_trait]
    impl OcrProvider for TesseractOcrProvider {
        async fn recognize(&self, image_bytes: Bytes) -> Result<String> {
            let dir = tempfile::tempdir()
                .map_err(|e| Error::ExtractionFailed { message: format!("creating OCR temp dir: {e}") })?;
            let input_path: PathBuf = dir.path().join("page.img");
            let output_stem = dir.path().join("page");

            let mut file = tokio::fs::File::create(&input_path)
                .await
                .map_err(|e| Error::ExtractionFailed { message: format!("writing OCR input: {e}") })?;
            file.write_all(&image_bytes)
                .await
                .map_err(|e| Error::ExtractionFailed { message: format!("writing OCR input: {e}") })?;
            file.flush().await.map_err(|e| Error::ExtractionFailed { message: format!("writing OCR input: {e}") })?;

            let status = Command::new(&self.binary)
                .arg(&input_path)
                .arg(&output_stem)
                .arg("-l")
                .arg(&self.language)
                .status()
                .await
                .map_err(|e| Error::ExtractionFailed { message: format!("running tesseract: {e}") })?;
            if !status.success() {
                return Err(Error::ExtractionFailed { message: format!("tesseract exited with {status}") });
            }

            let text = tokio::fs::read_to_string(output_stem.with_extension("txt"))
                .await
                .map_err(|e| Error::ExtractionFailed { message: format!("reading tesseract output: {e}") })?;
            if text.trim().is_empty() {
                return Err(Error::ExtractionFailed { message: "tesseract produced no text".to_string() });
            }
            Ok(text)
        }

        fn provider_name(&self) -> &str {
            "tesseract"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_provider_fails_fast() {
        let provider = NoopOcrProvider::new();
        assert!(provider.recognize(Bytes::from_static(b"x")).await.is_err());
    }
}
