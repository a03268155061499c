//! Test utilities for the product API.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled only for tests or with the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{
    InventoryConnectivity, InventoryConnectivityError, ProductRepository, ProductRepositoryError,
};
use crate::domain::{
    ConnectivityService, Product, ProductDomainService, ProductId, ProductUseCaseService,
};
use crate::inbound::http::AppDependencies;
use crate::inbound::http::api_key::ApiKeyDigest;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;

/// Key accepted by [`app_dependencies`].
pub const TEST_API_KEY: &str = "test-api-key";

/// Instant reported by [`FixedClock::default`]: 2024-01-15T09:00:00Z.
pub const FIXED_EPOCH_MILLIS: i64 = 1_705_309_200_000;

#[derive(Debug, Default)]
struct Rows {
    products: BTreeMap<ProductId, Product>,
    last_id: i64,
}

/// Thread-safe in-memory [`ProductRepository`].
///
/// Ids are assigned from 1 upwards and never reused, matching a `BIGSERIAL`
/// column. A repository built with [`InMemoryProductRepository::failing`]
/// answers every call with the given error.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: Mutex<Rows>,
    failure: Option<ProductRepositoryError>,
}

impl InMemoryProductRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every operation fails with `error`.
    #[must_use]
    pub fn failing(error: ProductRepositoryError) -> Self {
        Self {
            rows: Mutex::default(),
            failure: Some(error),
        }
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.rows().map(|rows| rows.products.len()).unwrap_or_default()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> Result<MutexGuard<'_, Rows>, ProductRepositoryError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.rows
            .lock()
            .map_err(|_| ProductRepositoryError::query("in-memory store poisoned"))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<Product, ProductRepositoryError> {
        let mut rows = self.rows()?;
        let id = match product.id() {
            Some(id) => {
                rows.last_id = rows.last_id.max(id.get());
                id
            }
            None => {
                rows.last_id += 1;
                ProductId::new(rows.last_id)
            }
        };
        let stored = product.clone().with_id(id);
        rows.products.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.rows()?.products.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.rows()?.products.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        self.rows()?.products.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ProductRepositoryError> {
        Ok(self.rows()?.products.contains_key(&id))
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.timestamp_millis_opt(FIXED_EPOCH_MILLIS)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Inventory probe with a canned outcome.
#[derive(Debug, Clone)]
pub struct StubInventory {
    url: String,
    outcome: Result<String, InventoryConnectivityError>,
}

impl StubInventory {
    /// Probe that succeeds with `body`.
    pub fn up(body: impl Into<String>) -> Self {
        Self {
            url: "http://inventory.test/actuator/health".to_owned(),
            outcome: Ok(body.into()),
        }
    }

    /// Probe that fails with `error`.
    #[must_use]
    pub fn down(error: InventoryConnectivityError) -> Self {
        Self {
            url: "http://inventory.test/actuator/health".to_owned(),
            outcome: Err(error),
        }
    }
}

#[async_trait]
impl InventoryConnectivity for StubInventory {
    fn target_url(&self) -> String {
        self.url.clone()
    }

    async fn probe(&self) -> Result<String, InventoryConnectivityError> {
        self.outcome.clone()
    }
}

/// Handler state over `repository` and `inventory` with a [`FixedClock`].
pub fn http_state(
    repository: Arc<InMemoryProductRepository>,
    inventory: Arc<dyn InventoryConnectivity>,
) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::default());
    let products = ProductUseCaseService::new(ProductDomainService::new(repository));
    HttpState::new(
        Arc::new(products),
        ConnectivityService::new(inventory, Arc::clone(&clock)),
        clock,
    )
}

/// Ready-to-serve dependencies accepting [`TEST_API_KEY`].
pub fn app_dependencies(state: HttpState) -> AppDependencies {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    AppDependencies {
        health,
        state: web::Data::new(state),
        api_key: ApiKeyDigest::from_secret(&Zeroizing::new(TEST_API_KEY.to_owned())),
    }
}

/// Dependencies over an empty repository and a healthy inventory.
///
/// Returns the repository too so tests can inspect what was stored.
pub fn default_app_dependencies() -> (AppDependencies, Arc<InMemoryProductRepository>) {
    let repository = Arc::new(InMemoryProductRepository::new());
    let state = http_state(
        Arc::clone(&repository),
        Arc::new(StubInventory::up(r#"{"status":"UP"}"#)),
    );
    (app_dependencies(state), repository)
}
