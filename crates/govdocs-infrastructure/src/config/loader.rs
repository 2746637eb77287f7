//! Configuration loading: defaults, then `govdocs.toml`, then environment
//! overrides, each layer winning over the last, via `figment`.

use figment::providers::{Env, Format, Toml};
use figment::Figment;

use govdocs_domain::error::{Error, Result};

use super::types::AppConfig;

/// Default path to the TOML configuration file, overridable via `GOVDOCS_CONFIG`.
pub const DEFAULT_CONFIG_PATH: &str = "govdocs.toml";

/// Load [`AppConfig`] from defaults, an optional TOML file, and
/// `GOVDOCS_`-prefixed environment variables (later layers win), then
/// validate it fail-fast.
///
/// # Errors
///
/// Returns [`Error::Config`] if the layered configuration fails to
/// deserialize or fails validation.
pub fn load() -> Result<AppConfig> {
    let config_path =
        std::env::var("GOVDOCS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config: AppConfig = Figment::new()
        .merge(Toml::file(&config_path))
        .merge(Env::prefixed("GOVDOCS_").split("__"))
        .extract()
        .map_err(|err| Error::Config {
            message: format!("failed to load configuration from {config_path}: {err}"),
        })?;

    validate(&config)?;
    Ok(config)
}

/// Validate invariants that `serde`'s defaulting cannot express (spec §2
/// ambient stack: "invalid configuration refuses to start").
///
/// # Errors
///
/// Returns [`Error::Config`] on the first violated invariant.
pub fn validate(config: &AppConfig) -> Result<()> {
    config.server.validate_ssl()?;

    if config.embedding.canonical_dimensions == 0 {
        return Err(Error::Config {
            message: "embedding.canonical_dimensions must be greater than zero".to_string(),
        });
    }
    if config.vector_store.dimensions != 0
        && config.vector_store.dimensions != config.embedding.canonical_dimensions
    {
        return Err(Error::Config {
            message: format!(
                "vector_store.dimensions ({}) must match embedding.canonical_dimensions ({})",
                config.vector_store.dimensions, config.embedding.canonical_dimensions
            ),
        });
    }
    if config.database.url.trim().is_empty() {
        return Err(Error::Config {
            message: "database.url must not be empty".to_string(),
        });
    }
    const AES_GCM_KEY_HEX_LEN: usize = 64;
    if config.crypto.key_hex.len() != AES_GCM_KEY_HEX_LEN && !config.crypto.key_hex.is_empty() {
        return Err(Error::Config {
            message: format!(
                "crypto.key_hex must be exactly {AES_GCM_KEY_HEX_LEN} hex characters ({}-byte key)",
                AES_GCM_KEY_HEX_LEN / 2
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_dimension_mismatch() {
        let mut config = AppConfig::default();
        config.embedding.canonical_dimensions = 768;
        config.vector_store.dimensions = 384;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn validate_rejects_zero_canonical_dimensions() {
        let config = AppConfig::default();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn validate_accepts_matching_dimensions() {
        let mut config = AppConfig::default();
        config.embedding.canonical_dimensions = 768;
        config.vector_store.dimensions = 768;
        assert!(validate(&config).is_ok());
    }
}
