//! Configuration Management - type-safe, layered, validated.
//!
//! Loaded via `figment` (defaults → `govdocs.toml` → environment, each layer
//! overriding the last) and validated fail-fast at startup (spec §2 ambient
//! stack: "invalid configuration refuses to start").

mod loader;
mod types;

pub use loader::load;
pub use types::{
    AppConfig, CacheProvider, CacheSystemConfig, CryptoConfig, DatabaseConfig, LoggingConfig,
    ProviderSelectionConfig, RoleProviderOverride, ServerConfig, ServerCorsConfig,
    ServerNetworkConfig, ServerSslConfig, ServerTimeoutConfig,
};
