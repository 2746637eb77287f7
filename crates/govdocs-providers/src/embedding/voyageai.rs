//! VoyageAI embeddings backend.

use std::sync::Arc;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::EmbeddingProvider;
use govdocs_domain::registry::{EMBEDDING_PROVIDERS, EmbeddingProviderEntry};
use govdocs_domain::value_objects::{Embedding, EmbeddingConfig};
use serde::{Deserialize, Serialize};

use crate::constants::{EMBEDDING_API_ENDPOINT, VOYAGEAI_API_BASE_URL, VOYAGEAI_DEFAULT_MODEL};

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

/// Calls VoyageAI's `/embeddings` endpoint (wire-compatible with OpenAI's).
#[derive(Debug)]
pub struct VoyageAiEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl VoyageAiEmbeddingProvider {
    /// Construct a provider from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `api_key` is missing.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config { message: "voyageai embedding provider requires api_key".to_string() })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone().unwrap_or_else(|| VOYAGEAI_API_BASE_URL.to_string()),
            api_key,
            model: if config.model.is_empty() { VOYAGEAI_DEFAULT_MODEL.to_string() } else { config.model.clone() },
        })
    }
}

#[async_trait]
impl EmbeddingProvider for VoyageAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(self.embed_batch(std::slice::from_ref(&text.to_string())).await?.remove(0))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let url = format!("{}{EMBEDDING_API_ENDPOINT}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest { model: &self.model, input: texts })
            .send()
            .await
            .map_err(|e| Error::Embedding { message: format!("voyageai request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding { message: format!("voyageai returned {status}: {body}") });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding { message: format!("voyageai response decode failed: {e}") })?;
        Ok(parsed.data.into_iter().map(|d| Embedding::new(d.embedding, self.model.clone())).collect())
    }

    fn native_dimensions(&self) -> usize {
        1024
    }

    fn provider_name(&self) -> &str {
        "voyageai"
    }
}

fn factory(config: &EmbeddingConfig) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    VoyageAiEmbeddingProvider::new(config).map(|p| Arc::new(p) as Arc<dyn EmbeddingProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static VOYAGEAI_PROVIDER: EmbeddingProviderEntry =
    EmbeddingProviderEntry { name: "voyageai", description: "VoyageAI text embeddings", build: factory };
