//! Port for product persistence.

use async_trait::async_trait;

use crate::domain::{Product, ProductId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "product repository query failed: {message}",
    }
}

/// Port for reading and writing products.
///
/// `save` inserts when the product has no id and replaces the stored row when
/// it does, returning the persisted state either way.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or replace a product.
    async fn save(&self, product: &Product) -> Result<Product, ProductRepositoryError>;

    /// Find a product by id.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Load every stored product ordered by id.
    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Remove a product; removing a missing id is not an error.
    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductRepositoryError>;

    /// Whether a product with `id` exists.
    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ProductRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn connection_error_formats_message() {
        let err = ProductRepositoryError::connection("pool timed out");
        assert_eq!(
            err.to_string(),
            "product repository connection failed: pool timed out"
        );
    }

    #[rstest]
    fn query_error_keeps_detail() {
        let err = ProductRepositoryError::query("relation \"products\" does not exist");
        assert!(matches!(err, ProductRepositoryError::Query { .. }));
        assert!(err.to_string().contains("does not exist"));
    }
}
