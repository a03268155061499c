//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `PRODUCT_API_*` environment variables, command-line flags
//! or a configuration file. Everything except the API key and database URL
//! has a default.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::inbound::http::api_key::ApiKeyDigest;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_INVENTORY_BASE_URL: &str = "http://localhost:8081";
const DEFAULT_INVENTORY_HEALTH_ENDPOINT: &str = "/actuator/health";

/// A required setting is absent or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("PRODUCT_API_API_KEY must be set to a non-empty value")]
    MissingApiKey,
    #[error("PRODUCT_API_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Runtime settings for the product service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PRODUCT_API")]
pub struct AppSettings {
    /// Shared secret clients present in `X-API-Key`.
    pub api_key: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub db_connection_timeout_secs: u64,
    /// Base URL of the inventory service.
    pub inventory_base_url: Option<String>,
    /// Health path probed on the inventory service.
    pub inventory_health_endpoint: Option<String>,
    /// Seconds before an inventory probe gives up.
    #[ortho_config(default = 5)]
    pub inventory_timeout_secs: u64,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .field(
                "db_connection_timeout_secs",
                &self.db_connection_timeout_secs,
            )
            .field("inventory_base_url", &self.inventory_base_url)
            .field("inventory_health_endpoint", &self.inventory_health_endpoint)
            .field("inventory_timeout_secs", &self.inventory_timeout_secs)
            .finish()
    }
}

impl AppSettings {
    /// The configured API key, wiped from memory on drop.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingApiKey`] when unset or blank.
    pub fn api_key(&self) -> Result<Zeroizing<String>, SettingsError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(Zeroizing::new(key.to_owned())),
            _ => Err(SettingsError::MissingApiKey),
        }
    }

    /// Digest of the configured API key.
    ///
    /// # Errors
    ///
    /// See [`AppSettings::api_key`].
    pub fn api_key_digest(&self) -> Result<ApiKeyDigest, SettingsError> {
        self.api_key().map(|key| ApiKeyDigest::from_secret(&key))
    }

    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Pool settings for the product repository.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when no URL is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        Ok(PoolConfig::new(url)
            .with_max_size(self.db_max_connections)
            .with_connection_timeout(Duration::from_secs(self.db_connection_timeout_secs)))
    }

    pub fn inventory_base_url(&self) -> &str {
        self.inventory_base_url
            .as_deref()
            .unwrap_or(DEFAULT_INVENTORY_BASE_URL)
    }

    pub fn inventory_health_endpoint(&self) -> &str {
        self.inventory_health_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_INVENTORY_HEALTH_ENDPOINT)
    }

    pub fn inventory_timeout(&self) -> Duration {
        Duration::from_secs(self.inventory_timeout_secs)
    }
}
