//! Port for probing the downstream inventory service.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by inventory connectivity adapters.
    pub enum InventoryConnectivityError {
        /// The request could not be sent or the connection dropped.
        Transport { message: String } =>
            "inventory request failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "inventory request timed out: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, body: String } =>
            "inventory responded with status {status}: {body}",
    }
}

/// Port for checking whether the inventory service answers its health
/// endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryConnectivity: Send + Sync {
    /// Absolute URL the probe targets.
    fn target_url(&self) -> String;

    /// Issue one health request and return the response body.
    async fn probe(&self) -> Result<String, InventoryConnectivityError>;
}
