//! Dependency connectivity endpoints.
//!
//! ```text
//! GET /api/connectivity/inventory  200 when the inventory answers, else 503
//! GET /api/connectivity/status     200 with an overall UP/DEGRADED verdict
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};

use crate::domain::{ConnectivityOverview, InventoryReport};
use crate::inbound::http::api_key::AuthenticatedClient;
use crate::inbound::http::json_api::{ErrorDocument, json_api_response};
use crate::inbound::http::state::HttpState;

/// Probe the inventory service once.
#[utoipa::path(
    get,
    path = "/api/connectivity/inventory",
    responses(
        (status = 200, description = "Inventory reachable", body = InventoryReport),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
        (status = 503, description = "Inventory unreachable", body = InventoryReport)
    ),
    tags = ["connectivity"],
    operation_id = "inventoryConnectivity"
)]
#[get("/inventory")]
pub async fn inventory(_client: AuthenticatedClient, state: web::Data<HttpState>) -> HttpResponse {
    let report = state.connectivity.inventory_report().await;
    let code = if report.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    json_api_response(code, &report)
}

/// Summarise this service and its dependencies.
#[utoipa::path(
    get,
    path = "/api/connectivity/status",
    responses(
        (status = 200, description = "Connectivity overview", body = ConnectivityOverview),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument)
    ),
    tags = ["connectivity"],
    operation_id = "connectivityStatus"
)]
#[get("/status")]
pub async fn status(_client: AuthenticatedClient, state: web::Data<HttpState>) -> HttpResponse {
    json_api_response(StatusCode::OK, &state.connectivity.overview().await)
}

/// Register the connectivity scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/connectivity")
            .service(inventory)
            .service(status),
    );
}
