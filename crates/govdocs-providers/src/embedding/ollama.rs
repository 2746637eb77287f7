//! Ollama (local) embeddings backend.

use std::sync::Arc;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::EmbeddingProvider;
use govdocs_domain::registry::{EMBEDDING_PROVIDERS, EmbeddingProviderEntry};
use govdocs_domain::value_objects::{Embedding, EmbeddingConfig};
use serde::{Deserialize, Serialize};

use crate::constants::{OLLAMA_DEFAULT_BASE_URL, OLLAMA_DEFAULT_MODEL, OLLAMA_EMBED_ENDPOINT};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Calls a local (or self-hosted) Ollama server's native `/api/embed`
/// endpoint, which natively batches.
#[derive(Debug)]
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbeddingProvider {
    /// Construct a provider from `config`. Never requires an API key — the
    /// server is assumed to be reachable on a trusted network.
    #[must_use]
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone().unwrap_or_else(|| OLLAMA_DEFAULT_BASE_URL.to_string()),
            model: if config.model.is_empty() { OLLAMA_DEFAULT_MODEL.to_string() } else { config.model.clone() },
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(self.embed_batch(std::slice::from_ref(&text.to_string())).await?.remove(0))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let url = format!("{}{OLLAMA_EMBED_ENDPOINT}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest { model: &self.model, input: texts })
            .send()
            .await
            .map_err(|e| Error::Embedding { message: format!("ollama request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding { message: format!("ollama returned {status}: {body}") });
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding { message: format!("ollama response decode failed: {e}") })?;
        Ok(parsed.embeddings.into_iter().map(|v| Embedding::new(v, self.model.clone())).collect())
    }

    fn native_dimensions(&self) -> usize {
        768
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}

fn factory(config: &EmbeddingConfig) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    Ok(Arc::new(OllamaEmbeddingProvider::new(config)))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static OLLAMA_PROVIDER: EmbeddingProviderEntry =
    EmbeddingProviderEntry { name: "ollama", description: "Local Ollama embeddings server", build: factory };
