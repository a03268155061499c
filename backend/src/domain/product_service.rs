//! Product domain service.
//!
//! Orchestrates validation and repository calls for the product lifecycle.
//! Missing products are reported as `None`/`false`; repository failures are
//! mapped onto domain error codes.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Error, Product, ProductId, ProductValidationError};

fn map_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("product repository error: {message}"))
        }
    }
}

/// Convert an entity validation failure into an `InvalidRequest` error that
/// names the offending attribute.
pub fn map_validation_error(error: ProductValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_field(error.field())
}

/// Product lifecycle service backed by a [`ProductRepository`].
#[derive(Clone)]
pub struct ProductDomainService<R> {
    repository: Arc<R>,
}

impl<R> ProductDomainService<R> {
    /// Create a service over the given repository.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ProductDomainService<R>
where
    R: ProductRepository,
{
    /// Validate and persist a new product.
    pub async fn create_product(&self, product: Product) -> Result<Product, Error> {
        product.validate().map_err(map_validation_error)?;
        let saved = self
            .repository
            .save(&product)
            .await
            .map_err(map_repository_error)?;
        debug!(product_id = ?saved.id(), "product created");
        Ok(saved)
    }

    /// Look up a product by id.
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    /// Snapshot of all products.
    pub async fn get_all_products(&self) -> Result<Vec<Product>, Error> {
        self.repository.find_all().await.map_err(map_repository_error)
    }

    /// Replace the product stored under `id`; `None` when it does not exist.
    pub async fn update_product(
        &self,
        id: ProductId,
        product: Product,
    ) -> Result<Option<Product>, Error> {
        if !self
            .repository
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(None);
        }

        product.validate().map_err(map_validation_error)?;
        let saved = self
            .repository
            .save(&product.with_id(id))
            .await
            .map_err(map_repository_error)?;
        debug!(product_id = %id, "product updated");
        Ok(Some(saved))
    }

    /// Delete the product stored under `id`, reporting whether it existed.
    pub async fn delete_product(&self, id: ProductId) -> Result<bool, Error> {
        if !self
            .repository
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(false);
        }

        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        debug!(product_id = %id, "product deleted");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
