//! Anthropic Messages API backend for metadata extraction and rerank.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{ExtractedMetadata, LlmProvider, RerankScores};
use govdocs_domain::registry::{LLM_PROVIDERS, LlmProviderEntry};
use govdocs_domain::value_objects::LlmProviderConfig;
use serde::{Deserialize, Serialize};

use super::{extraction_prompt, parse_extracted_metadata, parse_rerank_scores, rerank_prompt};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Calls Anthropic's Messages API.
#[derive(Debug)]
pub struct AnthropicLlmProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    prompt_char_budget: usize,
}

impl AnthropicLlmProvider {
    /// Construct a provider from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `api_key` is missing.
    pub fn new(config: &LlmProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config { message: "anthropic llm provider requires api_key".to_string() })?;
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

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/messages", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&MessagesRequest {
                model: &self.model,
                max_tokens: 1024,
                messages: vec![Message { role: "user", content: prompt }],
            })
            .send()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("anthropic request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::MetadataFailed { message: format!("anthropic returned {status}: {body}") });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("anthropic response decode failed: {e}") })?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|b| b.text)
            .ok_or_else(|| Error::MetadataFailed { message: "anthropic returned no content blocks".to_string() })
    }
}

#[async_trait]
impl LlmProvider for AnthropicLlmProvider {
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata> {
        let raw = self.complete(&extraction_prompt(text, self.prompt_char_budget)).await?;
        Ok(parse_extracted_metadata(&raw))
    }

    async fn rerank(&self, query: &str, candidates: &[String]) -> Result<RerankScores> {
        let raw = self.complete(&rerank_prompt(query, candidates)).await?;
        Ok(parse_rerank_scores(&raw, candidates.len()))
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}

fn factory(config: &LlmProviderConfig) -> std::result::Result<Arc<dyn LlmProvider>, String> {
    AnthropicLlmProvider::new(config).map(|p| Arc::new(p) as Arc<dyn LlmProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(LLM_PROVIDERS)]
static ANTHROPIC_PROVIDER: LlmProviderEntry =
    LlmProviderEntry { name: "anthropic", description: "Anthropic Messages API", build: factory };
