//! Source registry use case (spec §4.A).

use std::sync::Arc;

use async_trait::async_trait;

use govdocs_domain::entities::Source;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::repositories::{JobRepository, SourceRepository};
use govdocs_domain::value_objects::SourceId;

use crate::ports::services::SourceRegistryInterface;

/// Normalize a source's keywords: trimmed, case-folded, deduped (spec §4.A).
fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut normalized = Vec::new();
    for kw in keywords {
        let folded = kw.trim().to_lowercase();
        if folded.is_empty() {
            continue;
        }
        if seen.insert(folded.clone()) {
            normalized.push(folded);
        }
    }
    normalized
}

/// CRUD over registered scraping sources.
pub struct SourceRegistry {
    source_repo: Arc<dyn SourceRepository>,
    job_repo: Arc<dyn JobRepository>,
}

impl SourceRegistry {
    /// Construct a new registry.
    #[must_use]
    pub fn new(source_repo: Arc<dyn SourceRepository>, job_repo: Arc<dyn JobRepository>) -> Self {
        Self { source_repo, job_repo }
    }
}

#[async_trait]
impl SourceRegistryInterface for SourceRegistry {
    async fn create(&self, mut source: Source) -> Result<Source> {
        if source.name.trim().is_empty() || source.base_url.trim().is_empty() {
            return Err(Error::invalid("source requires a non-empty name and base_url"));
        }
        source.keywords = normalize_keywords(source.keywords);
        source.window_size = source.window_size.min(source.max_pages);
        self.source_repo.create(&source).await?;
        source.updated_at = govdocs_domain::utils::unix_now();
        Ok(source)
    }

    async fn update(&self, mut source: Source) -> Result<Source> {
        source.keywords = normalize_keywords(source.keywords);
        source.window_size = source.window_size.min(source.max_pages);
        source.updated_at = govdocs_domain::utils::unix_now();
        self.source_repo.update(&source).await?;
        Ok(source)
    }

    async fn delete(&self, id: SourceId) -> Result<()> {
        let active = self.job_repo.list_active_for_source(id).await?;
        if !active.is_empty() {
            return Err(Error::invalid(
                "cannot delete a source with a running scrape job",
            ));
        }
        self.source_repo.delete(id).await
    }

    async fn get(&self, id: SourceId) -> Result<Source> {
        self.source_repo.get_by_id(id).await
    }

    async fn list(&self) -> Result<Vec<Source>> {
        self.source_repo.list_all().await
    }
}

/// Apply spec §4.A keyword normalization to a source's keyword list before
/// persisting. Kept as a free function so both create and update paths and
/// `govdocs-scraping`'s generic dialect (which matches link text against
/// keywords) can share the same normalization rule.
#[must_use]
pub fn normalized(keywords: Vec<String>) -> Vec<String> {
    normalize_keywords(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keywords_trims_folds_and_dedupes() {
        let input = vec![
            " Circular ".to_string(),
            "circular".to_string(),
            "NOTICE".to_string(),
            "".to_string(),
        ];
        assert_eq!(normalized(input), vec!["circular".to_string(), "notice".to_string()]);
    }
}
