//! Domain primitives, services, and ports.
//!
//! Purpose: hold the product model and the rules that guard it, independent
//! of HTTP and storage. Adapters reach the domain only through the traits in
//! [`ports`].
//!
//! Public surface:
//! - `Product`, `ProductId`, `ProductDraft`: the aggregate and its inputs.
//! - `ProductDomainService`, `ProductUseCaseService`: lifecycle orchestration.
//! - `ConnectivityService`: reachability reports for the inventory service.
//! - `Error`, `ErrorCode`: transport-agnostic failures.

pub mod connectivity;
pub mod error;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod product_use_case;
mod trace_id;

pub use self::connectivity::{
    ConnectivityOverview, ConnectivityService, InventoryReport, OverallStatus,
    ProductServiceReport, ServiceStatus,
};
pub use self::error::{Error, ErrorCode};
pub use self::product::{Product, ProductDraft, ProductId, ProductValidationError};
pub use self::product_service::ProductDomainService;
pub use self::product_use_case::ProductUseCaseService;
pub use self::trace_id::TraceId;
