//! OpenAI-compatible embeddings backend.

use std::sync::Arc;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::EmbeddingProvider;
use govdocs_domain::registry::{EMBEDDING_PROVIDERS, EmbeddingProviderEntry};
use govdocs_domain::value_objects::{Embedding, EmbeddingConfig};
use serde::{Deserialize, Serialize};

use crate::constants::{EMBEDDING_API_ENDPOINT, OPENAI_API_BASE_URL, OPENAI_DEFAULT_MODEL};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// Calls OpenAI's `/embeddings` endpoint (and any API-compatible mirror via
/// `base_url`, e.g. Azure OpenAI or a self-hosted gateway).
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddingProvider {
    /// Construct a provider from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `api_key` is missing.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config { message: "openai embedding provider requires api_key".to_string() })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone().unwrap_or_else(|| OPENAI_API_BASE_URL.to_string()),
            api_key,
            model: if config.model.is_empty() { OPENAI_DEFAULT_MODEL.to_string() } else { config.model.clone() },
        })
    }

    async fn call(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let url = format!("{}{EMBEDDING_API_ENDPOINT}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest { model: &self.model, input: texts })
            .send()
            .await
            .map_err(|e| Error::Embedding { message: format!("openai request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding { message: format!("openai returned {status}: {body}") });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding { message: format!("openai response decode failed: {e}") })?;

        Ok(parsed.data.into_iter().map(|d| Embedding::new(d.embedding, self.model.clone())).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        self.call(std::slice::from_ref(&text.to_string()))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding { message: "openai returned no embeddings".to_string() })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.call(texts).await
    }

    fn native_dimensions(&self) -> usize {
        match self.model.as_str() {
            "text-embedding-3-large" => 3072,
            _ => 1536,
        }
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

fn factory(config: &EmbeddingConfig) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    OpenAiEmbeddingProvider::new(config).map(|p| Arc::new(p) as Arc<dyn EmbeddingProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static OPENAI_PROVIDER: EmbeddingProviderEntry =
    EmbeddingProviderEntry { name: "openai", description: "OpenAI-compatible embeddings API", build: factory };
