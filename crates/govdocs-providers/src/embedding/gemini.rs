//! Google Gemini embeddings backend.

use std::sync::Arc;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::EmbeddingProvider;
use govdocs_domain::registry::{EMBEDDING_PROVIDERS, EmbeddingProviderEntry};
use govdocs_domain::value_objects::{Embedding, EmbeddingConfig};
use serde::{Deserialize, Serialize};

use crate::constants::{GEMINI_API_BASE_URL, GEMINI_DEFAULT_MODEL};

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: GeminiEmbedding,
}

#[derive(Deserialize)]
struct GeminiEmbedding {
    values: Vec<f32>,
}

/// Calls Gemini's `embedContent` endpoint, one text at a time (the API has
/// no stable public batch variant as widely deployed as the single-content
/// call, so `embed_batch` falls back to sequential `embed` calls).
#[derive(Debug)]
pub struct GeminiEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiEmbeddingProvider {
    /// Construct a provider from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `api_key` is missing.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config { message: "gemini embedding provider requires api_key".to_string() })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone().unwrap_or_else(|| GEMINI_API_BASE_URL.to_string()),
            api_key,
            model: if config.model.is_empty() { GEMINI_DEFAULT_MODEL.to_string() } else { config.model.clone() },
        })
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let url = format!("{}/v1beta/models/{}:embedContent?key={}", self.base_url, self.model, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&EmbedContentRequest { content: Content { parts: vec![Part { text }] } })
            .send()
            .await
            .map_err(|e| Error::Embedding { message: format!("gemini request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding { message: format!("gemini returned {status}: {body}") });
        }

        let parsed: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding { message: format!("gemini response decode failed: {e}") })?;
        Ok(Embedding::new(parsed.embedding.values, self.model.clone()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn native_dimensions(&self) -> usize {
        768
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

fn factory(config: &EmbeddingConfig) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    GeminiEmbeddingProvider::new(config).map(|p| Arc::new(p) as Arc<dyn EmbeddingProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static GEMINI_PROVIDER: EmbeddingProviderEntry =
    EmbeddingProviderEntry { name: "gemini", description: "Google Gemini text embeddings", build: factory };
