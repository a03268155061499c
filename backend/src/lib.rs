//! Product catalogue service library.
//!
//! Layout follows ports and adapters: [`domain`] owns the product model and
//! its ports, [`inbound`] exposes them over HTTP, [`outbound`] implements the
//! ports against PostgreSQL and the inventory service.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
