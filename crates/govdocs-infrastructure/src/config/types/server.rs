//! HTTP server configuration types.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use govdocs_domain::error::{Error, Result};

/// Network configuration for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerNetworkConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerNetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// SSL/TLS configuration for the server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ServerSslConfig {
    /// HTTPS enabled.
    pub https: bool,
    /// SSL certificate path (if HTTPS enabled).
    pub ssl_cert_path: Option<PathBuf>,
    /// SSL key path (if HTTPS enabled).
    pub ssl_key_path: Option<PathBuf>,
}

/// Timeout configuration for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerTimeoutConfig {
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds.
    pub connection_timeout_secs: u64,
    /// Maximum request body size in bytes.
    pub max_request_body_size: usize,
}

impl Default for ServerTimeoutConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connection_timeout_secs: 10,
            max_request_body_size: 10 * 1024 * 1024,
        }
    }
}

/// CORS configuration for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerCorsConfig {
    /// Enable CORS.
    pub cors_enabled: bool,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerCorsConfig {
    fn default() -> Self {
        Self {
            cors_enabled: false,
            cors_origins: Vec::new(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Network configuration.
    pub network: ServerNetworkConfig,
    /// SSL/TLS configuration.
    pub ssl: ServerSslConfig,
    /// Timeout configuration.
    pub timeouts: ServerTimeoutConfig,
    /// CORS configuration.
    pub cors: ServerCorsConfig,
}

impl ServerConfig {
    /// Parse the bind address from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the host address cannot be parsed.
    pub fn parse_address(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.network.host.parse().map_err(|_| Error::Config {
            message: format!("invalid server host: {}", self.network.host),
        })?;
        Ok(SocketAddr::new(ip, self.network.port))
    }

    /// The server's base URL, honoring the SSL setting.
    #[must_use]
    pub fn get_base_url(&self) -> String {
        let protocol = if self.ssl.https { "https" } else { "http" };
        format!("{}://{}:{}", protocol, self.network.host, self.network.port)
    }

    /// Validate SSL configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTPS is enabled but the certificate or key paths
    /// are missing or don't exist.
    pub fn validate_ssl(&self) -> Result<()> {
        if !self.ssl.https {
            return Ok(());
        }
        let cert_path = self.ssl.ssl_cert_path.as_ref().ok_or_else(|| Error::Config {
            message: "SSL certificate path is required when HTTPS is enabled".to_string(),
        })?;
        let key_path = self.ssl.ssl_key_path.as_ref().ok_or_else(|| Error::Config {
            message: "SSL key path is required when HTTPS is enabled".to_string(),
        })?;
        if !cert_path.exists() {
            return Err(Error::Config {
                message: format!("SSL certificate file does not exist: {}", cert_path.display()),
            });
        }
        if !key_path.exists() {
            return Err(Error::Config {
                message: format!("SSL key file does not exist: {}", key_path.display()),
            });
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.request_timeout_secs)
    }

    /// Connection timeout as a [`Duration`].
    #[must_use]
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.connection_timeout_secs)
    }
}
