//! Extracted document metadata entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value_objects::DocumentId;

/// LLM-extracted metadata for a [`crate::entities::Document`] (spec §4.F).
///
/// Kept separate from `Document` because extraction is a second pipeline
/// stage that can fail, retry, or be re-run with a different provider
/// without touching the document record itself.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentMetadata {
    /// Document this metadata describes.
    pub doc_id: DocumentId,
    /// Short human title, distinct from the filename.
    pub title: String,
    /// One- or two-sentence summary.
    pub summary: String,
    /// Free-form topical tags.
    pub tags: Vec<String>,
    /// Issuing department/ministry, when known.
    pub department: Option<String>,
    /// Document language, when known (e.g. `"en"`).
    pub language: Option<String>,
    /// Name of the LLM provider/model that produced this metadata.
    pub extracted_by: String,
    /// Heuristic confidence score in `[0.0, 1.0]` from the quality gate.
    pub quality_score: f32,
    /// Extraction timestamp (Unix epoch seconds).
    pub extracted_at: i64,
}

impl DocumentMetadata {
    /// Whether this metadata passes the minimum quality gate (spec §4.F).
    #[must_use]
    pub fn passes_quality_gate(&self) -> bool {
        const MIN_QUALITY_SCORE: f32 = 0.5;
        !self.title.trim().is_empty() && self.quality_score >= MIN_QUALITY_SCORE
    }
}
