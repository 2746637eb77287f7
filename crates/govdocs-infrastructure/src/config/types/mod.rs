//! Configuration types organized by domain:
//! - `app` - top-level `AppConfig` and provider-selection containers
//! - `server` - HTTP server transport/network configuration
//! - `infrastructure` - logging, cache

pub mod app;
pub mod infrastructure;
pub mod server;

pub use app::{
    AppConfig, CryptoConfig, DatabaseConfig, ProviderSelectionConfig, RoleProviderOverride,
};
pub use infrastructure::{CacheProvider, CacheSystemConfig, LoggingConfig};
pub use server::{
    ServerConfig, ServerCorsConfig, ServerNetworkConfig, ServerSslConfig, ServerTimeoutConfig,
};
