//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! domain ports and remain testable without I/O.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;

use crate::domain::ConnectivityService;
use crate::domain::ports::ProductUseCase;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: Arc<dyn ProductUseCase>,
    pub connectivity: ConnectivityService,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Bundle the product use case, connectivity reporting and clock.
    pub fn new(
        products: Arc<dyn ProductUseCase>,
        connectivity: ConnectivityService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            connectivity,
            clock,
        }
    }

    /// Current time.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Current time as RFC 3339 with millisecond precision, e.g.
    /// `2024-01-15T09:00:00.000Z`.
    pub fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
