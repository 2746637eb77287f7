//! Metadata extractor (spec §4.F).
//!
//! Composes a primary and optional fallback [`LlmProvider`] behind one
//! quality gate. Neither provider is named here — selection is a
//! configuration concern resolved by `govdocs-domain`'s `LLM_PROVIDERS`
//! registry in `govdocs-infrastructure`'s DI bootstrap.

use std::sync::Arc;

use govdocs_domain::error::Result;
use govdocs_domain::ports::providers::{ExtractedMetadata, LlmProvider};

/// Minimum acceptable field lengths/counts for the quality gate (spec §4.F).
#[derive(Debug, Clone, Copy)]
pub struct QualityGate {
    /// Minimum `title` length.
    pub min_title_len: usize,
    /// Minimum `summary` length.
    pub min_summary_len: usize,
    /// Minimum keyword count.
    pub min_keywords: usize,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            min_title_len: 3,
            min_summary_len: 20,
            min_keywords: 3,
        }
    }
}

const PLACEHOLDER_STRINGS: &[&str] = &["untitled", "n/a", "unknown", "todo", "tbd"];

impl QualityGate {
    /// Whether `metadata` passes every required check (spec §4.F).
    #[must_use]
    pub fn passes(&self, metadata: &ExtractedMetadata) -> bool {
        let title = metadata.title.trim();
        let summary = metadata.summary.trim();

        !title.is_empty()
            && title.chars().count() >= self.min_title_len
            && !summary.is_empty()
            && summary.chars().count() >= self.min_summary_len
            && metadata.tags.len() >= self.min_keywords
            && !PLACEHOLDER_STRINGS.contains(&title.to_lowercase().as_str())
    }
}

/// LLM-driven `{title, department, document_type, summary, keywords, language}`
/// extraction with primary/fallback provider chaining (spec §4.F).
pub struct MetadataExtractor {
    primary: Arc<dyn LlmProvider>,
    fallback: Option<Arc<dyn LlmProvider>>,
    gate: QualityGate,
    prompt_char_budget: usize,
}

impl MetadataExtractor {
    /// Construct an extractor. `prompt_char_budget` truncates text before
    /// either provider sees it (spec default ~8,000 characters).
    #[must_use]
    pub fn new(
        primary: Arc<dyn LlmProvider>,
        fallback: Option<Arc<dyn LlmProvider>>,
        prompt_char_budget: usize,
    ) -> Self {
        Self {
            primary,
            fallback,
            gate: QualityGate::default(),
            prompt_char_budget,
        }
    }

    /// Extract metadata from `text`, trying the primary provider then the
    /// fallback. Returns `None` when neither passes the quality gate
    /// (spec §4.F step 3: "returns a partial/empty result"); otherwise
    /// returns the metadata alongside the name of whichever provider
    /// produced it, for provenance.
    pub async fn extract(&self, text: &str) -> Result<Option<(ExtractedMetadata, String)>> {
        let budgeted = truncate_chars(text, self.prompt_char_budget);

        match self.primary.extract_metadata(budgeted).await {
            Ok(metadata) if self.gate.passes(&metadata) => {
                return Ok(Some((metadata, self.primary.provider_name().to_string())));
            }
            Ok(metadata) => {
                tracing::debug!(provider = self.primary.provider_name(), "metadata failed quality gate");
                let _ = metadata;
            }
            Err(err) => {
                tracing::warn!(provider = self.primary.provider_name(), error = %err, "primary metadata provider failed");
            }
        }

        if let Some(fallback) = &self.fallback {
            match fallback.extract_metadata(budgeted).await {
                Ok(metadata) if self.gate.passes(&metadata) => {
                    return Ok(Some((metadata, fallback.provider_name().to_string())));
                }
                Ok(_) => tracing::debug!(provider = fallback.provider_name(), "fallback metadata failed quality gate"),
                Err(err) => {
                    tracing::warn!(provider = fallback.provider_name(), error = %err, "fallback metadata provider failed");
                }
            }
        }

        Ok(None)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, summary: &str, tags: Vec<&str>) -> ExtractedMetadata {
        ExtractedMetadata {
            title: title.to_string(),
            summary: summary.to_string(),
            tags: tags.into_iter().map(str::to_string).collect(),
            document_type: None,
            department: None,
            language: None,
        }
    }

    #[test]
    fn quality_gate_rejects_placeholder_title() {
        let gate = QualityGate::default();
        let metadata = sample(
            "Untitled",
            "a summary long enough to pass the gate check",
            vec!["a", "b", "c"],
        );
        assert!(!gate.passes(&metadata));
    }

    #[test]
    fn quality_gate_rejects_too_few_keywords() {
        let gate = QualityGate::default();
        let metadata = sample("Circular 17/2024", "a summary long enough to pass", vec!["a"]);
        assert!(!gate.passes(&metadata));
    }

    #[test]
    fn quality_gate_accepts_well_formed_metadata() {
        let gate = QualityGate::default();
        let metadata = sample(
            "AICTE Circular 17/2024",
            "Announces revised fee structure for technical institutions.",
            vec!["fees", "aicte", "circular"],
        );
        assert!(gate.passes(&metadata));
    }

    #[test]
    fn truncate_chars_respects_char_boundaries_not_bytes() {
        let text = "héllo wörld";
        let truncated = truncate_chars(text, 5);
        assert_eq!(truncated.chars().count(), 5);
    }
}
