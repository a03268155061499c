//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use product_api::domain::ports::InventoryConnectivity;
use product_api::inbound::http::api_key::ApiKeyDigest;
use product_api::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs to assemble the application.
pub struct ServerConfig {
    pub(crate) api_key: ApiKeyDigest,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) inventory: Arc<dyn InventoryConnectivity>,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(
        api_key: ApiKeyDigest,
        bind_addr: SocketAddr,
        db_pool: DbPool,
        inventory: Arc<dyn InventoryConnectivity>,
    ) -> Self {
        Self {
            api_key,
            bind_addr,
            db_pool,
            inventory,
        }
    }
}
