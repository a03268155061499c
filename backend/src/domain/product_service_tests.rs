//! Tests for the product domain service.

use std::str::FromStr;
use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;
use rust_decimal::Decimal;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockProductRepository;

fn widget() -> Product {
    Product::new("Widget", Decimal::from_str("9.99").expect("decimal")).expect("valid product")
}

fn service(repo: MockProductRepository) -> ProductDomainService<MockProductRepository> {
    ProductDomainService::new(Arc::new(repo))
}

#[tokio::test]
async fn create_product_persists_and_returns_saved_entity() {
    let mut repo = MockProductRepository::new();
    repo.expect_save()
        .times(1)
        .returning(|product| Ok(product.clone().with_id(ProductId::new(1))));

    let saved = service(repo)
        .create_product(widget())
        .await
        .expect("create succeeds");

    assert_eq!(saved.id(), Some(ProductId::new(1)));
    assert_eq!(saved.name(), "Widget");
    assert_eq!(saved.price().to_string(), "9.99");
}

#[rstest]
#[case::connection(
    ProductRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case::query(ProductRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn create_product_maps_repository_failures(
    #[case] failure: ProductRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockProductRepository::new();
    repo.expect_save()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = service(repo)
        .create_product(widget())
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn get_product_by_id_returns_none_when_missing() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id()
        .with(eq(ProductId::new(999)))
        .times(1)
        .return_once(|_| Ok(None));

    let found = service(repo)
        .get_product_by_id(ProductId::new(999))
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[tokio::test]
async fn get_all_products_returns_repository_snapshot() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_all().times(1).return_once(|| {
        Ok(vec![
            widget().with_id(ProductId::new(1)),
            widget().with_id(ProductId::new(2)),
        ])
    });

    let products = service(repo).get_all_products().await.expect("list succeeds");

    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn update_product_skips_save_when_missing() {
    let mut repo = MockProductRepository::new();
    repo.expect_exists_by_id().times(1).return_once(|_| Ok(false));
    repo.expect_save().times(0);

    let updated = service(repo)
        .update_product(ProductId::new(5), widget())
        .await
        .expect("update succeeds");

    assert!(updated.is_none());
}

#[tokio::test]
async fn update_product_forces_path_id() {
    let mut repo = MockProductRepository::new();
    repo.expect_exists_by_id().times(1).return_once(|_| Ok(true));
    repo.expect_save()
        .withf(|product| product.id() == Some(ProductId::new(5)))
        .times(1)
        .returning(|product| Ok(product.clone()));

    let updated = service(repo)
        .update_product(ProductId::new(5), widget().with_id(ProductId::new(77)))
        .await
        .expect("update succeeds")
        .expect("product exists");

    assert_eq!(updated.id(), Some(ProductId::new(5)));
}

#[tokio::test]
async fn delete_product_reports_missing_ids() {
    let mut repo = MockProductRepository::new();
    repo.expect_exists_by_id().times(1).return_once(|_| Ok(false));
    repo.expect_delete_by_id().times(0);

    let deleted = service(repo)
        .delete_product(ProductId::new(3))
        .await
        .expect("delete succeeds");

    assert!(!deleted);
}

#[tokio::test]
async fn delete_product_removes_existing_ids() {
    let mut repo = MockProductRepository::new();
    repo.expect_exists_by_id().times(1).return_once(|_| Ok(true));
    repo.expect_delete_by_id()
        .with(eq(ProductId::new(3)))
        .times(1)
        .return_once(|_| Ok(()));

    let deleted = service(repo)
        .delete_product(ProductId::new(3))
        .await
        .expect("delete succeeds");

    assert!(deleted);
}

#[tokio::test]
async fn delete_product_maps_connection_errors() {
    let mut repo = MockProductRepository::new();
    repo.expect_exists_by_id()
        .times(1)
        .return_once(|_| Err(ProductRepositoryError::connection("pool exhausted")));

    let error = service(repo)
        .delete_product(ProductId::new(3))
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
fn validation_errors_name_their_field() {
    let error = map_validation_error(ProductValidationError::NegativePrice);
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.field(), Some("price"));
    assert_eq!(error.message(), "Product price cannot be negative");
}
