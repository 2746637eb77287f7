//! Text extractor (spec §4.E).
//!
//! Dispatches on the declared document type: native extraction for
//! PDF/DOCX/PPTX, OCR for image formats and for PDFs whose text layer turns
//! out to be empty or below the garbage-text threshold.

use std::io::Read;
use std::sync::Arc;

use bytes::Bytes;

use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::OcrProvider;

/// Document type as declared by the downloader (from `Content-Type` or the
/// URL's extension), driving which extraction path is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    /// Portable Document Format.
    Pdf,
    /// Word Open XML document.
    Docx,
    /// PowerPoint Open XML presentation.
    Pptx,
    /// PNG raster image.
    Png,
    /// JPEG raster image.
    Jpg,
    /// TIFF raster image.
    Tiff,
}

impl DeclaredType {
    /// Best-effort guess from a file extension, case-insensitive.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpg),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpg | Self::Tiff)
    }
}

/// Result of extracting text from one document.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// UTF-8, newline-normalized text, with page boundaries preserved where possible.
    pub text: String,
    /// Whether the document had no usable embedded text layer and was
    /// routed through OCR.
    pub is_scanned: bool,
    /// Number of pages/slides recovered, when countable.
    pub pages: u32,
}

/// Minimum characters-per-page below which a PDF's native text layer is
/// considered unusable and the document is routed to OCR (spec §4.E).
const SCANNED_CHAR_PER_PAGE_THRESHOLD: usize = 20;

/// Extracts plain text from raw document bytes by declared type (spec §4.E).
#[derive(Debug)]
pub struct TextExtractor {
    ocr: Arc<dyn OcrProvider>,
}

impl TextExtractor {
    /// Construct an extractor that falls back to `ocr` for scanned PDFs and
    /// raw image inputs.
    #[must_use]
    pub fn new(ocr: Arc<dyn OcrProvider>) -> Self {
        Self { ocr }
    }

    /// Extract text from `bytes`, declared as `declared_type`.
    ///
    /// # Errors
    /// Returns [`Error::ExtractionFailed`] when no usable text could be
    /// recovered through either the native path or OCR.
    pub async fn extract(&self, bytes: &[u8], declared_type: DeclaredType) -> Result<ExtractedText> {
        if declared_type.is_image() {
            let text = self.ocr.recognize(Bytes::copy_from_slice(bytes)).await?;
            return Ok(ExtractedText {
                text: normalize_newlines(&text),
                is_scanned: true,
                pages: 1,
            });
        }

        match declared_type {
            DeclaredType::Pdf => self.extract_pdf(bytes).await,
            DeclaredType::Docx => Self::extract_docx(bytes),
            DeclaredType::Pptx => Self::extract_pptx(bytes),
            DeclaredType::Png | DeclaredType::Jpg | DeclaredType::Tiff => unreachable!(),
        }
    }

    async fn extract_pdf(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let native = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
        let pages = native.matches('\x0c').count().max(1) as u32;
        let chars_per_page = native.chars().count() / pages.max(1) as usize;

        if chars_per_page >= SCANNED_CHAR_PER_PAGE_THRESHOLD {
            return Ok(ExtractedText {
                text: normalize_newlines(&native),
                is_scanned: false,
                pages,
            });
        }

        // Native layer is empty or near-empty: treat as scanned and OCR the
        // raw bytes page-by-page is out of scope here (rendering requires a
        // PDF rasterizer); OCR the whole document as a single unit instead.
        let ocr_text = self.ocr.recognize(Bytes::copy_from_slice(bytes)).await?;
        Ok(ExtractedText {
            text: normalize_newlines(&ocr_text),
            is_scanned: true,
            pages,
        })
    }

    fn extract_docx(bytes: &[u8]) -> Result<ExtractedText> {
        let document = docx_rs::read_docx(bytes)
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
        let mut text = String::new();
        for child in &document.document.children {
            collect_docx_text(child, &mut text);
        }
        if text.trim().is_empty() {
            return Err(Error::ExtractionFailed {
                message: "docx produced no text content".to_string(),
            });
        }
        Ok(ExtractedText {
            text: normalize_newlines(&text),
            is_scanned: false,
            pages: 1,
        })
    }

    fn extract_pptx(bytes: &[u8]) -> Result<ExtractedText> {
        let cursor = std::io::Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;

        let mut slide_names: Vec<String> = (0..archive.len())
            .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
            .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
            .collect();
        slide_names.sort();

        let mut text = String::new();
        for name in &slide_names {
            let mut file = archive
                .by_name(name)
                .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
            let mut xml = String::new();
            file.read_to_string(&mut xml)
                .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
            extract_ooxml_text(&xml, &mut text);
            text.push('\x0c');
        }

        if text.trim().is_empty() {
            return Err(Error::ExtractionFailed {
                message: "pptx produced no slide text".to_string(),
            });
        }

        Ok(ExtractedText {
            text: normalize_newlines(&text),
            is_scanned: false,
            pages: slide_names.len() as u32,
        })
    }
}

fn collect_docx_text(child: &docx_rs::DocumentChild, out: &mut String) {
    if let docx_rs::DocumentChild::Paragraph(p) = child {
        for run_child in &p.children {
            if let docx_rs::ParagraphChild::Run(run) = run_child {
                for rc in &run.children {
                    if let docx_rs::RunChild::Text(t) = rc {
                        out.push_str(&t.text);
                    }
                }
            }
        }
        out.push('\n');
    }
}

/// Pulls the text content out of `<a:t>...</a:t>` runs in a slide's XML,
/// the OOXML text-run element shared by PPTX slide parts.
fn extract_ooxml_text(xml: &str, out: &mut String) {
    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    let mut reader = Reader::from_str(xml);
    let mut in_text_run = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => {
                in_text_run = false;
                out.push(' ');
            }
            Ok(Event::Text(t)) if in_text_run => {
                if let Ok(unescaped) = t.unescape() {
                    out.push_str(&unescaped);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::DeclaredType;

    #[test]
    fn from_extension_is_case_insensitive() {
        assert_eq!(DeclaredType::from_extension("PDF"), Some(DeclaredType::Pdf));
        assert_eq!(DeclaredType::from_extension("JPEG"), Some(DeclaredType::Jpg));
        assert_eq!(DeclaredType::from_extension("xyz"), None);
    }
}
