//! OpenAI-compatible chat-completions backend for metadata extraction and rerank.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{ExtractedMetadata, LlmProvider, RerankScores};
use govdocs_domain::registry::{LLM_PROVIDERS, LlmProviderEntry};
use govdocs_domain::value_objects::LlmProviderConfig;
use serde::{Deserialize, Serialize};

use super::{extraction_prompt, parse_extracted_metadata, parse_rerank_scores, rerank_prompt};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Calls any chat-completions API compatible with OpenAI's wire format
/// (OpenAI itself, Azure OpenAI, or a self-hosted gateway via `base_url`).
#[derive(Debug)]
pub struct OpenAiCompatibleLlmProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    prompt_char_budget: usize,
}

impl OpenAiCompatibleLlmProvider {
    /// Construct a provider from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `api_key` is missing.
    pub fn new(config: &LlmProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config { message: "openai_compatible llm provider requires api_key".to_string() })?;
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
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest { model: &self.model, messages: vec![ChatMessage { role: "user", content: prompt }] })
            .send()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("openai_compatible request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::MetadataFailed { message: format!("openai_compatible returned {status}: {body}") });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("openai_compatible response decode failed: {e}") })?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::MetadataFailed { message: "openai_compatible returned no choices".to_string() })
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleLlmProvider {
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata> {
        let raw = self.complete(&extraction_prompt(text, self.prompt_char_budget)).await?;
        Ok(parse_extracted_metadata(&raw))
    }

    async fn rerank(&self, query: &str, candidates: &[String]) -> Result<RerankScores> {
        let raw = self.complete(&rerank_prompt(query, candidates)).await?;
        Ok(parse_rerank_scores(&raw, candidates.len()))
    }

    fn provider_name(&self) -> &str {
        "openai_compatible"
    }
}

fn factory(config: &LlmProviderConfig) -> std::result::Result<Arc<dyn LlmProvider>, String> {
    OpenAiCompatibleLlmProvider::new(config).map(|p| Arc::new(p) as Arc<dyn LlmProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(LLM_PROVIDERS)]
static OPENAI_COMPATIBLE_PROVIDER: LlmProviderEntry = LlmProviderEntry {
    name: "openai_compatible",
    description: "OpenAI-compatible chat-completions API",
    build: factory,
};
