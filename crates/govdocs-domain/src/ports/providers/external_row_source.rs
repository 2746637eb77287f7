//! External Row Source Provider Port (spec §4.L)

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

/// One column value read back from an external relational source.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalValue {
    /// `NULL`.
    Null,
    /// Text-typed column value.
    Text(String),
    /// Binary column value (used for `file_column` under `StorageKind::Database`).
    Bytes(Vec<u8>),
}

impl ExternalValue {
    /// Render this value as a UTF-8 string, lossily for binary data.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExternalValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Take the raw bytes, whether the column was typed text or blob.
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            ExternalValue::Bytes(b) => Some(b),
            ExternalValue::Text(s) => Some(s.into_bytes()),
            ExternalValue::Null => None,
        }
    }
}

/// One row read back from the configured `table`, keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct ExternalRow {
    /// Column name to value, for every column the ingester requested.
    pub columns: HashMap<String, ExternalValue>,
}

impl ExternalRow {
    /// Look up a column by name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ExternalValue> {
        self.columns.get(column)
    }
}

/// Read-only connection to an external relational database, used by the
/// external DB ingester to stream candidate rows (spec §4.L).
///
/// Implementations connect using a decrypted connection string supplied at
/// call time; this port never persists or logs credentials itself.
#[async_trait]
pub trait ExternalRowSourceProvider: Send + Sync {
    /// Open a read-only connection to `connection_string` and fetch up to
    /// `limit` rows of `columns` from `table`, in a stable order (e.g. by
    /// primary key) so repeated syncs are reproducible.
    ///
    /// # Errors
    /// Returns an error if the connection fails or the table/columns do not
    /// exist.
    async fn fetch_rows(
        &self,
        connection_string: &str,
        table: &str,
        columns: &[String],
        limit: Option<u32>,
    ) -> Result<Vec<ExternalRow>>;

    /// Identifier of this backend implementation, e.g. `"postgres"`, `"mysql"`.
    fn provider_name(&self) -> &str;
}
