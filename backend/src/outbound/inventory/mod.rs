//! Inventory service outbound adapter.
//!
//! Implements the `InventoryConnectivity` port over HTTP.

mod http_client;

pub use http_client::{InventoryClientBuildError, InventoryHttpClient};
