//! `Source` and `ScrapeJob` repositories.

use async_trait::async_trait;
use govdocs_domain::entities::{ScrapeJob, Source};
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::repositories::{JobRepository, SourceRepository};
use govdocs_domain::value_objects::{JobId, SourceId};
use sqlx::{AnyPool, Row};

use super::store::{db_err, from_json, to_json};

/// `AnyPool`-backed [`SourceRepository`].
pub struct SqlSourceRepository {
    pool: AnyPool,
}

impl SqlSourceRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SourceRepository for SqlSourceRepository {
    async fn create(&self, source: &Source) -> Result<()> {
        sqlx::query("INSERT INTO sources (id, enabled, data) VALUES (?, ?, ?)")
            .bind(source.id.to_string())
            .bind(i64::from(source.enabled))
            .bind(to_json(source)?)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("creating source", e))?;
        Ok(())
    }

    async fn get_by_id(&self, id: SourceId) -> Result<Source> {
        let row = sqlx::query("SELECT data FROM sources WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("fetching source", e))?
            .ok_or_else(|| Error::not_found(format!("source {id}")))?;
        from_json(row.get::<String, _>("data").as_str())
    }

    async fn list_enabled(&self) -> Result<Vec<Source>> {
        let rows = sqlx::query("SELECT data FROM sources WHERE enabled = 1")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing enabled sources", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn list_all(&self) -> Result<Vec<Source>> {
        let rows = sqlx::query("SELECT data FROM sources")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing sources", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn update(&self, source: &Source) -> Result<()> {
        sqlx::query("UPDATE sources SET enabled = ?, data = ? WHERE id = ?")
            .bind(i64::from(source.enabled))
            .bind(to_json(source)?)
            .bind(source.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("updating source", e))?;
        Ok(())
    }

    async fn delete(&self, id: SourceId) -> Result<()> {
        sqlx::query("DELETE FROM sources WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting source", e))?;
        Ok(())
    }
}

/// `AnyPool`-backed [`JobRepository`].
pub struct SqlJobRepository {
    pool: AnyPool,
}

impl SqlJobRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for SqlJobRepository {
    async fn create(&self, job: &ScrapeJob) -> Result<()> {
        sqlx::query("INSERT INTO scrape_jobs (id, source_id, status, finished_at, data) VALUES (?, ?, ?, ?, ?)")
            .bind(job.id.to_string())
            .bind(job.source_id.to_string())
            .bind(job.status.to_string())
            .bind(job.finished_at)
            .bind(to_json(job)?)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("creating job", e))?;
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<ScrapeJob> {
        let row = sqlx::query("SELECT data FROM scrape_jobs WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("fetching job", e))?
            .ok_or_else(|| Error::not_found(format!("job {id}")))?;
        from_json(row.get::<String, _>("data").as_str())
    }

    async fn list_active_for_source(&self, source_id: SourceId) -> Result<Vec<ScrapeJob>> {
        let rows = sqlx::query(
            "SELECT data FROM scrape_jobs WHERE source_id = ? AND status IN ('running', 'stopping')",
        )
        .bind(source_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("listing active jobs for source", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn list_active(&self) -> Result<Vec<ScrapeJob>> {
        let rows = sqlx::query("SELECT data FROM scrape_jobs WHERE status IN ('running', 'stopping')")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing active jobs", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn list_finished_before(&self, cutoff_unix: i64) -> Result<Vec<ScrapeJob>> {
        let rows = sqlx::query("SELECT data FROM scrape_jobs WHERE finished_at IS NOT NULL AND finished_at < ?")
            .bind(cutoff_unix)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing finished jobs", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn update(&self, job: &ScrapeJob) -> Result<()> {
        sqlx::query("UPDATE scrape_jobs SET status = ?, finished_at = ?, data = ? WHERE id = ?")
            .bind(job.status.to_string())
            .bind(job.finished_at)
            .bind(to_json(job)?)
            .bind(job.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("updating job", e))?;
        Ok(())
    }

    async fn delete(&self, id: JobId) -> Result<()> {
        sqlx::query("DELETE FROM scrape_jobs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting job", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_domain::value_objects::Dialect;

    async fn pool() -> AnyPool {
        crate::database::connect("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = SqlSourceRepository::new(pool().await);
        let source = Source::new("Ministry circulars", "https://example.test", Dialect::Generic);
        repo.create(&source).await.unwrap();
        let fetched = repo.get_by_id(source.id).await.unwrap();
        assert_eq!(fetched.name, source.name);
    }

    #[tokio::test]
    async fn list_enabled_excludes_disabled() {
        let repo = SqlSourceRepository::new(pool().await);
        let mut disabled = Source::new("disabled", "https://example.test", Dialect::Generic);
        disabled.enabled = false;
        repo.create(&disabled).await.unwrap();
        let enabled = Source::new("enabled", "https://example.test", Dialect::Generic);
        repo.create(&enabled).await.unwrap();

        let listed = repo.list_enabled().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, enabled.id);
    }

    #[tokio::test]
    async fn job_retention_sweep_query_respects_cutoff() {
        let repo = SqlJobRepository::new(pool().await);
        let source_id = SourceId::new();
        let mut job = ScrapeJob::new(source_id);
        job.finish(govdocs_domain::value_objects::ScrapeJobStatus::Succeeded, None);
        repo.create(&job).await.unwrap();

        let before = repo.list_finished_before(job.finished_at.unwrap() + 1).await.unwrap();
        assert_eq!(before.len(), 1);
        let after = repo.list_finished_before(job.finished_at.unwrap() - 1).await.unwrap();
        assert!(after.is_empty());
    }
}
