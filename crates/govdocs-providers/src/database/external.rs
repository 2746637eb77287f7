//! `ExternalDataSource` and `SyncLog` repositories.

use async_trait::async_trait;
use govdocs_domain::entities::{ExternalDataSource, SyncLog};
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::repositories::{ExternalDataSourceRepository, SyncLogRepository};
use govdocs_domain::value_objects::{ExternalDataSourceId, SyncLogId};
use sqlx::{AnyPool, Row};

use super::store::{db_err, from_json, to_json};

/// `AnyPool`-backed [`ExternalDataSourceRepository`].
pub struct SqlExternalDataSourceRepository {
    pool: AnyPool,
}

impl SqlExternalDataSourceRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExternalDataSourceRepository for SqlExternalDataSourceRepository {
    async fn create(&self, source: &ExternalDataSource) -> Result<()> {
        sqlx::query("INSERT INTO external_data_sources (id, enabled, data) VALUES (?, ?, ?)")
            .bind(source.id.to_string())
            .bind(i64::from(source.enabled))
            .bind(to_json(source)?)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("creating external data source", e))?;
        Ok(())
    }

    async fn get_by_id(&self, id: ExternalDataSourceId) -> Result<ExternalDataSource> {
        let row = sqlx::query("SELECT data FROM external_data_sources WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("fetching external data source", e))?
            .ok_or_else(|| Error::not_found(format!("external data source {id}")))?;
        from_json(row.get::<String, _>("data").as_str())
    }

    async fn list_all(&self) -> Result<Vec<ExternalDataSource>> {
        let rows = sqlx::query("SELECT data FROM external_data_sources")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing external data sources", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }

    async fn update(&self, source: &ExternalDataSource) -> Result<()> {
        sqlx::query("UPDATE external_data_sources SET enabled = ?, data = ? WHERE id = ?")
            .bind(i64::from(source.enabled))
            .bind(to_json(source)?)
            .bind(source.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("updating external data source", e))?;
        Ok(())
    }

    async fn delete(&self, id: ExternalDataSourceId) -> Result<()> {
        sqlx::query("DELETE FROM external_data_sources WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("deleting external data source", e))?;
        Ok(())
    }
}

/// `AnyPool`-backed [`SyncLogRepository`].
pub struct SqlSyncLogRepository {
    pool: AnyPool,
}

impl SqlSyncLogRepository {
    #[must_use]
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncLogRepository for SqlSyncLogRepository {
    async fn create(&self, log: &SyncLog) -> Result<()> {
        sqlx::query("INSERT INTO sync_logs (id, external_source_id, started_at, data) VALUES (?, ?, ?, ?)")
            .bind(log.id.to_string())
            .bind(log.external_source_id.to_string())
            .bind(log.started_at)
            .bind(to_json(log)?)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("creating sync log", e))?;
        Ok(())
    }

    async fn update(&self, log: &SyncLog) -> Result<()> {
        sqlx::query("UPDATE sync_logs SET data = ? WHERE id = ?")
            .bind(to_json(log)?)
            .bind(log.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("updating sync log", e))?;
        Ok(())
    }

    async fn get_by_id(&self, id: SyncLogId) -> Result<SyncLog> {
        let row = sqlx::query("SELECT data FROM sync_logs WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("fetching sync log", e))?
            .ok_or_else(|| Error::not_found(format!("sync log {id}")))?;
        from_json(row.get::<String, _>("data").as_str())
    }

    async fn list_for_source(&self, source_id: ExternalDataSourceId) -> Result<Vec<SyncLog>> {
        let rows = sqlx::query("SELECT data FROM sync_logs WHERE external_source_id = ? ORDER BY started_at DESC")
            .bind(source_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("listing sync logs", e))?;
        rows.iter().map(|r| from_json(r.get::<String, _>("data").as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_domain::value_objects::StorageKind;

    async fn pool() -> AnyPool {
        crate::database::connect("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn sync_logs_list_newest_first() {
        let shared_pool = pool().await;
        let external_repo = SqlExternalDataSourceRepository::new(shared_pool.clone());
        let log_repo = SqlSyncLogRepository::new(shared_pool);
        let source = ExternalDataSource::new(
            "legacy archive",
            StorageKind::Database,
            "enc",
            "nonce",
            "docs",
            "bytes",
            "filename",
            vec![],
        );
        external_repo.create(&source).await.unwrap();

        let mut first = SyncLog {
            id: govdocs_domain::value_objects::SyncLogId::new(),
            external_source_id: source.id,
            status: govdocs_domain::entities::SyncStatus::Running,
            records_synced: 0,
            records_failed: 0,
            started_at: 100,
            finished_at: None,
            error_message: None,
        };
        log_repo.create(&first).await.unwrap();
        first.started_at = 200;
        first.id = govdocs_domain::value_objects::SyncLogId::new();
        log_repo.create(&first).await.unwrap();

        let listed = log_repo.list_for_source(source.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].started_at >= listed[1].started_at);
    }
}
