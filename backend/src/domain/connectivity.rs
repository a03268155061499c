//! Connectivity reporting for this service and its inventory dependency.

use std::sync::Arc;

use mockable::Clock;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::InventoryConnectivity;

const INVENTORY_SERVICE: &str = "inventory-api";
const PRODUCT_SERVICE: &str = "product-api";

/// Reachability of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceStatus {
    Up,
    Down,
}

/// Aggregate status across this service and its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallStatus {
    Up,
    Degraded,
}

/// Outcome of probing the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InventoryReport {
    pub service: String,
    pub status: ServiceStatus,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
}

impl InventoryReport {
    /// Whether the inventory answered successfully.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.status == ServiceStatus::Up
    }
}

/// Self-report for this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductServiceReport {
    pub service: String,
    pub status: ServiceStatus,
    pub message: String,
}

/// Combined connectivity overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConnectivityOverview {
    #[serde(rename = "product-api")]
    pub product_api: ProductServiceReport,
    #[serde(rename = "inventory-api")]
    pub inventory_api: InventoryReport,
    #[serde(rename = "overall-status")]
    pub overall_status: OverallStatus,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Builds connectivity reports from an [`InventoryConnectivity`] probe.
#[derive(Clone)]
pub struct ConnectivityService {
    inventory: Arc<dyn InventoryConnectivity>,
    clock: Arc<dyn Clock>,
}

impl ConnectivityService {
    /// Create a service over the given probe and clock.
    pub fn new(inventory: Arc<dyn InventoryConnectivity>, clock: Arc<dyn Clock>) -> Self {
        Self { inventory, clock }
    }

    /// Probe the inventory service once.
    pub async fn inventory_report(&self) -> InventoryReport {
        let url = self.inventory.target_url();
        match self.inventory.probe().await {
            Ok(body) => InventoryReport {
                service: INVENTORY_SERVICE.to_owned(),
                status: ServiceStatus::Up,
                url,
                response: Some(body),
                error: None,
                message: "Successfully connected to Inventory service".to_owned(),
            },
            Err(error) => {
                warn!(%url, %error, "inventory connectivity check failed");
                InventoryReport {
                    service: INVENTORY_SERVICE.to_owned(),
                    status: ServiceStatus::Down,
                    url,
                    response: None,
                    error: Some(error.to_string()),
                    message: "Failed to connect to Inventory service".to_owned(),
                }
            }
        }
    }

    /// Report this service as up alongside a fresh inventory probe.
    pub async fn overview(&self) -> ConnectivityOverview {
        let inventory_api = self.inventory_report().await;
        let overall_status = if inventory_api.is_up() {
            OverallStatus::Up
        } else {
            OverallStatus::Degraded
        };
        ConnectivityOverview {
            product_api: ProductServiceReport {
                service: PRODUCT_SERVICE.to_owned(),
                status: ServiceStatus::Up,
                message: "Product API is running".to_owned(),
            },
            inventory_api,
            overall_status,
            timestamp: self.clock.utc().timestamp_millis(),
        }
    }
}
