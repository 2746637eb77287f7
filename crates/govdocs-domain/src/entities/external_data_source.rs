//! External data source entity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value_objects::{ExternalDataSourceId, StorageKind};

/// A connection to an external database or object store that documents can
/// be synced from (spec §3, §4.L).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExternalDataSource {
    /// Unique identifier.
    pub id: ExternalDataSourceId,
    /// Human-readable name.
    pub name: String,
    /// Which kind of backing store this connects to.
    pub storage_kind: StorageKind,
    /// AES-GCM-encrypted connection string (spec §4.L, §7: never logged in
    /// plaintext; see [`crate::utils::safe_display`] for log-safe rendering
    /// of any user-supplied fields adjacent to this entity).
    pub connection_string_encrypted: String,
    /// Nonce used to encrypt `connection_string_encrypted`.
    pub encryption_nonce: String,
    /// Table the ingester selects rows from.
    pub table: String,
    /// Column carrying the raw document bytes (`storage_kind == Database`)
    /// or the object-store path to fetch (`storage_kind == ObjectStore`).
    pub file_column: String,
    /// Column carrying the document's display filename.
    pub filename_column: String,
    /// Additional columns merged into `DocumentMetadata` when their names
    /// match known fields (spec §4.L).
    pub metadata_columns: Vec<String>,
    /// Prepended to `file_column` values before fetching from the object
    /// store, when `storage_kind == ObjectStore`.
    pub path_prefix: Option<String>,
    /// Whether this source is eligible to be synced.
    pub enabled: bool,
    /// Creation timestamp (Unix epoch seconds).
    pub created_at: i64,
    /// Timestamp of the most recent completed sync, if any.
    pub last_synced_at: Option<i64>,
}

impl ExternalDataSource {
    /// Construct a new, enabled external data source from an already
    /// encrypted connection string (spec §4.L: credentials are encrypted at
    /// rest and decrypted only during a sync).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        storage_kind: StorageKind,
        connection_string_encrypted: impl Into<String>,
        encryption_nonce: impl Into<String>,
        table: impl Into<String>,
        file_column: impl Into<String>,
        filename_column: impl Into<String>,
        metadata_columns: Vec<String>,
    ) -> Self {
        Self {
            id: ExternalDataSourceId::new(),
            name: name.into(),
            storage_kind,
            connection_string_encrypted: connection_string_encrypted.into(),
            encryption_nonce: encryption_nonce.into(),
            table: table.into(),
            file_column: file_column.into(),
            filename_column: filename_column.into(),
            metadata_columns,
            path_prefix: None,
            enabled: true,
            created_at: crate::utils::unix_now(),
            last_synced_at: None,
        }
    }
}
