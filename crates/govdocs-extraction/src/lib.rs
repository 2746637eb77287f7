//! # Extraction Layer
//!
//! Text extraction, LLM-driven metadata extraction, and section-aware
//! chunking for the document ingestion pipeline.
//!
//! Each module implements one stage of the ingestion data flow
//! `download → extract → metadata → chunk`, depending only on
//! `govdocs-domain`'s ports (`LlmProvider`, `OcrProvider`) so the concrete
//! LLM/OCR backends stay swappable without this crate changing.

#![allow(missing_docs)]

pub mod chunker;
pub mod metadata;
pub mod ocr;
pub mod text;

pub use chunker::{ChunkDraft, SectionAwareChunker};
pub use metadata::MetadataExtractor;
pub use ocr::NoopOcrProvider;
#[cfg(feature = "tesseract")]
pub use ocr::TesseractOcrProvider;
pub use text::{DeclaredType, ExtractedText, TextExtractor};
