//! Reqwest-backed inventory connectivity adapter.
//!
//! Owns transport concerns only: URL assembly, timeout, and mapping of
//! transport and status failures onto the port error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::{InventoryConnectivity, InventoryConnectivityError};

/// Errors raised while constructing the client.
#[derive(Debug, thiserror::Error)]
pub enum InventoryClientBuildError {
    /// Base URL and health path do not form a valid URL.
    #[error("invalid inventory health URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be created.
    #[error("failed to build inventory HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Join base URL and health path with exactly one slash between them.
fn health_url(base_url: &str, health_endpoint: &str) -> Result<Url, InventoryClientBuildError> {
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        health_endpoint.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|source| InventoryClientBuildError::InvalidUrl { url: raw, source })
}

/// Inventory probe issuing `GET {base_url}{health_endpoint}`.
pub struct InventoryHttpClient {
    client: Client,
    health_url: Url,
}

impl InventoryHttpClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is malformed or the reqwest client
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        health_endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, InventoryClientBuildError> {
        let health_url = health_url(base_url, health_endpoint)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, health_url })
    }
}

#[async_trait]
impl InventoryConnectivity for InventoryHttpClient {
    fn target_url(&self) -> String {
        self.health_url.to_string()
    }

    async fn probe(&self) -> Result<String, InventoryConnectivityError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(body)
    }
}

fn map_transport_error(error: reqwest::Error) -> InventoryConnectivityError {
    if error.is_timeout() {
        InventoryConnectivityError::timeout(error.to_string())
    } else {
        InventoryConnectivityError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &str) -> InventoryConnectivityError {
    InventoryConnectivityError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
