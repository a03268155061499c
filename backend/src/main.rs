//! Product API entry-point: loads settings, connects adapters and serves
//! HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use product_api::domain::ports::InventoryConnectivity;
use product_api::inbound::http::health::HealthState;
use product_api::outbound::inventory::InventoryHttpClient;
use product_api::outbound::persistence::DbPool;
use product_api::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let api_key = settings.api_key_digest()?;
    let bind_addr = settings.bind_addr()?;

    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("failed to create database pool")?;
    let inventory = InventoryHttpClient::new(
        settings.inventory_base_url(),
        settings.inventory_health_endpoint(),
        settings.inventory_timeout(),
    )?;
    info!(
        api_key = %api_key.fingerprint(),
        inventory = %inventory.target_url(),
        "configuration loaded"
    );

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(api_key, bind_addr, pool, Arc::new(inventory));
    create_server(health_state, config)?
        .await
        .wrap_err("HTTP server failed")?;
    Ok(())
}
