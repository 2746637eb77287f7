//! Local (Ollama-style) chat backend for metadata extraction and rerank.
//!
//! Used for self-hosted deployments with no outbound API dependency (spec
//! §4.F: "a deployment may mix providers"), or as the cheaper per-role
//! fallback for roles that don't need the primary model's accuracy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{ExtractedMetadata, LlmProvider, RerankScores};
use govdocs_domain::registry::{LLM_PROVIDERS, LlmProviderEntry};
use govdocs_domain::value_objects::LlmProviderConfig;
use serde::{Deserialize, Serialize};

use super::{extraction_prompt, parse_extracted_metadata, parse_rerank_scores, rerank_prompt};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Calls a local Ollama server's `/api/chat` endpoint.
#[derive(Debug)]
pub struct LocalLlmProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    prompt_char_budget: usize,
}

impl LocalLlmProvider {
    /// Construct a provider from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the HTTP client fails to build.
    pub fn new(config: &LlmProviderConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs.max(1)))
                .build()
                .map_err(|e| Error::Config { message: format!("building http client: {e}") })?,
            base_url: config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: if config.model.is_empty() { DEFAULT_MODEL.to_string() } else { config.model.clone() },
            prompt_char_budget: if config.prompt_char_budget == 0 { 8000 } else { config.prompt_char_budget },
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { model: &self.model, messages: vec![ChatMessage { role: "user", content: prompt }], stream: false })
            .send()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("local llm request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::MetadataFailed { message: format!("local llm returned {status}: {body}") });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::MetadataFailed { message: format!("local llm response decode failed: {e}") })?;
        Ok(parsed.message.content)
    }
}

#[async_trait]
impl LlmProvider for LocalLlmProvider {
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata> {
        let raw = self.complete(&extraction_prompt(text, self.prompt_char_budget)).await?;
        Ok(parse_extracted_metadata(&raw))
    }

    async fn rerank(&self, query: &str, candidates: &[String]) -> Result<RerankScores> {
        let raw = self.complete(&rerank_prompt(query, candidates)).await?;
        Ok(parse_rerank_scores(&raw, candidates.len()))
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

fn factory(config: &LlmProviderConfig) -> std::result::Result<Arc<dyn LlmProvider>, String> {
    LocalLlmProvider::new(config).map(|p| Arc::new(p) as Arc<dyn LlmProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(LLM_PROVIDERS)]
static LOCAL_PROVIDER: LlmProviderEntry =
    LlmProviderEntry { name: "local", description: "Local Ollama-style chat backend", build: factory };
