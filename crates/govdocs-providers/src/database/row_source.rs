//! External relational row source (spec §4.L).
//!
//! Opens a short-lived connection to whatever database an
//! [`govdocs_domain::entities::ExternalDataSource`] points at (distinct
//! from the application's own pool) and streams back the configured
//! columns. `table`/`columns` come from an admin-configured source record,
//! not end-user input, but are still validated as plain identifiers since
//! `sqlx` has no bind-parameter form for table/column names.

use std::collections::HashMap;

use async_trait::async_trait;
use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{ExternalRow, ExternalRowSourceProvider, ExternalValue};
use sqlx::Row;
use sqlx::any::AnyPoolOptions;

fn validate_identifier(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Config { message: format!("invalid external source identifier: {name:?}") })
    }
}

/// `sqlx::AnyPool`-backed [`ExternalRowSourceProvider`], connecting fresh
/// for each sync run since every external data source names a different
/// database.
#[derive(Debug, Default)]
pub struct SqlExternalRowSourceProvider;

impl SqlExternalRowSourceProvider {
    /// Construct a provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExternalRowSourceProvider for SqlExternalRowSourceProvider {
    async fn fetch_rows(
        &self,
        connection_string: &str,
        table: &str,
        columns: &[String],
        limit: Option<u32>,
    ) -> Result<Vec<ExternalRow>> {
        validate_identifier(table)?;
        for column in columns {
            validate_identifier(column)?;
        }
        if columns.is_empty() {
            return Err(Error::Config { message: "external row source requires at least one column".to_string() });
        }

        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect(connection_string)
            .await
            .map_err(|e| Error::Database { source: format!("connecting to external source: {e}") })?;

        let column_list = columns.join(", ");
        let mut query = format!("SELECT {column_list} FROM {table}");
        if let Some(limit) = limit {
            query.push_str(&format!(" LIMIT {limit}"));
        }

        let rows = sqlx::query(&query)
            .fetch_all(&pool)
            .await
            .map_err(|e| Error::Database { source: format!("reading external source rows: {e}") });
        pool.close().await;
        let rows = rows?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut values = HashMap::with_capacity(columns.len());
            for name in columns {
                let value = if let Ok(bytes) = row.try_get::<Vec<u8>, _>(name.as_str()) {
                    ExternalValue::Bytes(bytes)
                } else if let Ok(text) = row.try_get::<String, _>(name.as_str()) {
                    ExternalValue::Text(text)
                } else {
                    ExternalValue::Null
                };
                values.insert(name.clone(), value);
            }
            out.push(ExternalRow { columns: values });
        }
        Ok(out)
    }

    fn provider_name(&self) -> &str {
        "sql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_identifier_rejects_sql_metacharacters() {
        assert!(validate_identifier("documents").is_ok());
        assert!(validate_identifier("doc_id").is_ok());
        assert!(validate_identifier("docs; DROP TABLE x;--").is_err());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1col").is_err());
    }

    #[tokio::test]
    async fn fetch_rows_reads_back_text_and_blob_columns() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("legacy.db");
        let connection_string = format!("sqlite://{}?mode=rwc", db_path.display());

        sqlx::any::install_default_drivers();
        let setup_pool = sqlx::any::AnyPoolOptions::new().max_connections(1).connect(&connection_string).await.unwrap();
        sqlx::query("CREATE TABLE legacy_docs (id TEXT, title TEXT, body BLOB)").execute(&setup_pool).await.unwrap();
        sqlx::query("INSERT INTO legacy_docs (id, title, body) VALUES ('1', 'Circular', X'68656c6c6f')")
            .execute(&setup_pool)
            .await
            .unwrap();
        setup_pool.close().await;

        let provider = SqlExternalRowSourceProvider::new();
        let rows = provider
            .fetch_rows(&connection_string, "legacy_docs", &["id".to_string(), "title".to_string(), "body".to_string()], None)
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id").and_then(ExternalValue::as_text), Some("1"));
        assert_eq!(rows[0].get("title").and_then(ExternalValue::as_text), Some("Circular"));
        assert_eq!(rows[0].get("body").cloned().and_then(ExternalValue::into_bytes), Some(b"hello".to_vec()));
    }
}
