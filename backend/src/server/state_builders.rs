//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use product_api::domain::{ConnectivityService, ProductDomainService, ProductUseCaseService};
use product_api::inbound::http::state::HttpState;
use product_api::outbound::persistence::DieselProductRepository;

use super::ServerConfig;

/// Build handler state over the Diesel repository and the inventory probe.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let repository = Arc::new(DieselProductRepository::new(config.db_pool.clone()));
    let products = ProductUseCaseService::new(ProductDomainService::new(repository));
    let connectivity = ConnectivityService::new(Arc::clone(&config.inventory), Arc::clone(&clock));
    HttpState::new(Arc::new(products), connectivity, clock)
}
