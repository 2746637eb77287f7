//! Gemini `generateContent` backend for metadata extraction and rerank.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{ExtractedMetadata, LlmProvider, RerankScores};
use govdocs_domain::registry::{LLM_PROVIDERS, LlmProviderEntry};
use govdocs_domain::value_objects::LlmProviderConfig;
use serde::{Deserialize, Serialize};

use super::{extraction_prompt, parse_extracted_metadata, parse_rerank_scores, rerank_prompt};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Calls Gemini's `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiLlmProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    prompt_char_budget: usize,
}

impl GeminiLlmProvider {
    /// Construct a provider from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `api_key` is missing.
    pub fn new(config: &LlmProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config { message: "gemini llm provider requires api_key".to_string() })?;
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs.max(1)))
                .build()
                .map_err(|e| Error::Config { message: format!("building http client: {e}") })?,
            base_url: config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            model: if config.model.is_empty() { DEFAULT_MODEL.to_string() } else { config.model.clone() },
            prompt_char_budget: if config.prompt_char_budget == 0 { 8000 } else { config.prompt_char_budget },
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url =
            format!("{}/v1beta/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&GenerateContentRequest { contents: vec![Content { parts: vec![Part { text: prompt }] }] })
            .send()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("gemini request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::MetadataFailed { message: format!("gemini returned {status}: {body}") });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("gemini response decode failed: {e}") })?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::MetadataFailed { message: "gemini returned no candidates".to_string() })
    }
}

#[async_trait]
impl LlmProvider for GeminiLlmProvider {
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata> {
        let raw = self.generate(&extraction_prompt(text, self.prompt_char_budget)).await?;
        Ok(parse_extracted_metadata(&raw))
    }

    async fn rerank(&self, query: &str, candidates: &[String]) -> Result<RerankScores> {
        let raw = self.generate(&rerank_prompt(query, candidates)).await?;
        Ok(parse_rerank_scores(&raw, candidates.len()))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

fn factory(config: &LlmProviderConfig) -> std::result::Result<Arc<dyn LlmProvider>, String> {
    GeminiLlmProvider::new(config).map(|p| Arc::new(p) as Arc<dyn LlmProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(LLM_PROVIDERS)]
static GEMINI_PROVIDER: LlmProviderEntry =
    LlmProviderEntry { name: "gemini", description: "Google Gemini generateContent API", build: factory };
