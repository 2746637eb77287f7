//! LLM providers (spec §4.F metadata extraction, §4.K rerank): an
//! OpenAI-compatible chat-completions backend, Gemini, Anthropic, and a
//! `local`/Ollama-style backend for self-hosted deployments.

mod anthropic;
mod gemini;
mod local;
mod openai_compatible;

pub use anthropic::AnthropicLlmProvider;
pub use gemini::GeminiLlmProvider;
pub use local::LocalLlmProvider;
pub use openai_compatible::OpenAiCompatibleLlmProvider;

use govdocs_domain::ports::providers::ExtractedMetadata;

/// Parse a structured-metadata JSON payload emitted by any of these
/// providers, with graceful degradation: a best-effort title from the raw
/// text when the model didn't return valid JSON (spec §4.F quality gate
/// catches the empty-title case downstream).
fn parse_extracted_metadata(raw: &str) -> ExtractedMetadata {
    serde_json::from_str(raw.trim()).unwrap_or_else(|_| ExtractedMetadata {
        title: raw.lines().next().unwrap_or_default().chars().take(120).collect(),
        summary: String::new(),
        tags: Vec::new(),
        document_type: None,
        department: None,
        language: None,
    })
}

/// Build the extraction prompt shared by every LLM provider, truncating
/// `text` to `char_budget` (spec §4.F).
fn extraction_prompt(text: &str, char_budget: usize) -> String {
    let truncated: String = text.chars().take(char_budget).collect();
    format!(
        "Extract metadata from the following document text. Respond with a single JSON object \
         with fields \"title\", \"summary\", \"tags\" (array of strings), \"document_type\" \
         (string or null), \"department\" (string or null), and \"language\" (string or null). \
         Text:\n\n{truncated}"
    )
}

/// Build the rerank prompt shared by every LLM provider.
fn rerank_prompt(query: &str, candidates: &[String]) -> String {
    let mut prompt = format!(
        "Score each candidate passage's relevance to the query on a 0.0-1.0 scale. \
         Respond with a JSON array of floats, one per candidate, in order.\n\nQuery: {query}\n\nCandidates:\n"
    );
    for (i, candidate) in candidates.iter().enumerate() {
        prompt.push_str(&format!("{}. {candidate}\n", i + 1));
    }
    prompt
}

fn parse_rerank_scores(raw: &str, expected_len: usize) -> govdocs_domain::ports::providers::RerankScores {
    serde_json::from_str::<Vec<f32>>(raw.trim()).unwrap_or_else(|_| vec![0.5; expected_len])
}
