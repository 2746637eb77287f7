//! Shared JSON-blob (de)serialization helpers for the `AnyPool` repositories.

use govdocs_domain::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Error::from)
}

pub(super) fn from_json<T: DeserializeOwned>(data: &str) -> Result<T> {
    serde_json::from_str(data).map_err(Error::from)
}

pub(super) fn db_err(context: &str, e: sqlx::Error) -> Error {
    Error::Database { source: format!("{context}: {e}") }
}
