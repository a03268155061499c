//! PostgreSQL-backed `ProductRepository` implementation using Diesel.
//!
//! Each operation checks out one pooled connection and issues a single
//! statement. Rows are converted through the validated domain constructor.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductDraft, ProductId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProductRow, ProductRow, ProductUpdate, ProductWithIdRow};
use super::pool::DbPool;
use super::schema::products;

/// Diesel-backed implementation of the product repository port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: ProductRow) -> Result<Product, ProductRepositoryError> {
    let ProductRow { id, name, price } = row;
    Product::try_from(ProductDraft {
        id: Some(ProductId::new(id)),
        name: Some(name),
        price: Some(price),
    })
    .map_err(|err| ProductRepositoryError::query(format!("stored product {id} is invalid: {err}")))
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn save(&self, product: &Product) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = match product.id() {
            None => {
                diesel::insert_into(products::table)
                    .values(&NewProductRow {
                        name: product.name(),
                        price: product.price(),
                    })
                    .returning(ProductRow::as_returning())
                    .get_result::<ProductRow>(&mut conn)
                    .await
            }
            Some(id) => {
                diesel::insert_into(products::table)
                    .values(&ProductWithIdRow {
                        id: id.get(),
                        name: product.name(),
                        price: product.price(),
                    })
                    .on_conflict(products::id)
                    .do_update()
                    .set(&ProductUpdate {
                        name: product.name(),
                        price: product.price(),
                    })
                    .returning(ProductRow::as_returning())
                    .get_result::<ProductRow>(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        row_to_product(row)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = products::table
            .filter(products::id.eq(id.get()))
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_product).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductRow> = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_product).collect()
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(products::table.filter(products::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            products::table.filter(products::id.eq(id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion edge cases.

    use std::str::FromStr;

    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;

    fn row(name: &str, price: &str) -> ProductRow {
        ProductRow {
            id: 12,
            name: name.to_owned(),
            price: Decimal::from_str(price).expect("decimal literal"),
        }
    }

    #[rstest]
    fn valid_row_converts_with_id() {
        let product = row_to_product(row("Widget", "99.99")).expect("valid row");

        assert_eq!(product.id(), Some(ProductId::new(12)));
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.price().to_string(), "99.99");
    }

    #[rstest]
    #[case::blank_name(" ", "1.00")]
    #[case::negative_price("Widget", "-1.00")]
    fn invalid_rows_map_to_query_errors(#[case] name: &str, #[case] price: &str) {
        let err = row_to_product(row(name, price)).expect_err("invalid row");

        assert!(matches!(err, ProductRepositoryError::Query { .. }));
        assert!(err.to_string().contains("stored product 12 is invalid"));
    }
}
