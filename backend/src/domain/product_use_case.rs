//! Application use case translating product resource objects to and from the
//! domain.

use async_trait::async_trait;

use crate::domain::ports::{
    PRODUCT_RESOURCE_TYPE, ProductAttributes, ProductDto, ProductRepository, ProductUseCase,
};
use crate::domain::product_service::{ProductDomainService, map_validation_error};
use crate::domain::{Error, Product, ProductDraft, ProductId};

fn require_attributes(product: Option<ProductDto>) -> Result<ProductAttributes, Error> {
    let product = product.ok_or_else(|| Error::invalid_request("Product data cannot be null"))?;
    product
        .attributes
        .ok_or_else(|| Error::invalid_request("Product attributes cannot be null"))
}

/// Map a resource object onto a validated product. Any client-supplied id is
/// ignored; identity comes from storage or the request path.
fn to_product(product: Option<ProductDto>) -> Result<Product, Error> {
    let ProductAttributes { name, price } = require_attributes(product)?;
    Product::try_from(ProductDraft {
        id: None,
        name,
        price,
    })
    .map_err(map_validation_error)
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().map(|id| id.to_string()),
            resource_type: PRODUCT_RESOURCE_TYPE.to_owned(),
            attributes: Some(ProductAttributes {
                name: Some(product.name().to_owned()),
                price: Some(product.price()),
            }),
        }
    }
}

/// [`ProductUseCase`] implementation delegating to [`ProductDomainService`].
#[derive(Clone)]
pub struct ProductUseCaseService<R> {
    domain: ProductDomainService<R>,
}

impl<R> ProductUseCaseService<R> {
    /// Wrap a domain service.
    pub const fn new(domain: ProductDomainService<R>) -> Self {
        Self { domain }
    }
}

#[async_trait]
impl<R> ProductUseCase for ProductUseCaseService<R>
where
    R: ProductRepository,
{
    async fn create_product(&self, product: Option<ProductDto>) -> Result<ProductDto, Error> {
        let product = to_product(product)?;
        let saved = self.domain.create_product(product).await?;
        Ok(ProductDto::from(&saved))
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<ProductDto>, Error> {
        let found = self.domain.get_product_by_id(id).await?;
        Ok(found.as_ref().map(ProductDto::from))
    }

    async fn get_all_products(&self) -> Result<Vec<ProductDto>, Error> {
        let products = self.domain.get_all_products().await?;
        Ok(products.iter().map(ProductDto::from).collect())
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: Option<ProductDto>,
    ) -> Result<Option<ProductDto>, Error> {
        let product = to_product(product)?;
        let updated = self.domain.update_product(id, product).await?;
        Ok(updated.as_ref().map(ProductDto::from))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, Error> {
        self.domain.delete_product(id).await
    }
}

#[cfg(test)]
mod tests {
    //! Mapping and rejection behaviour of the product use case.

    use std::str::FromStr;
    use std::sync::Arc;

    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockProductRepository;

    fn decimal(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("decimal literal")
    }

    fn use_case(repo: MockProductRepository) -> ProductUseCaseService<MockProductRepository> {
        ProductUseCaseService::new(ProductDomainService::new(Arc::new(repo)))
    }

    fn saving_repo() -> MockProductRepository {
        let mut repo = MockProductRepository::new();
        repo.expect_save()
            .times(1)
            .returning(|product| Ok(product.clone().with_id(ProductId::new(42))));
        repo
    }

    #[tokio::test]
    async fn create_returns_dto_with_id_and_same_attributes() {
        let input = ProductDto::new("Widget", decimal("9.99"));

        let created = use_case(saving_repo())
            .create_product(Some(input.clone()))
            .await
            .expect("create succeeds");

        assert_eq!(created.id.as_deref(), Some("42"));
        assert_eq!(created.resource_type, "products");
        assert_eq!(created.attributes, input.attributes);
    }

    #[rstest]
    #[case::absent_dto(None, "Product data cannot be null", None)]
    #[case::absent_attributes(
        Some(ProductDto { attributes: None, ..ProductDto::new("x", Decimal::ONE) }),
        "Product attributes cannot be null",
        None
    )]
    #[case::blank_name(
        Some(ProductDto::new("   ", Decimal::ONE)),
        "Product name cannot be null or empty",
        Some("name")
    )]
    #[case::negative_price(
        Some(ProductDto::new("Widget", Decimal::new(-1, 2))),
        "Product price cannot be negative",
        Some("price")
    )]
    #[case::missing_price(
        Some(ProductDto {
            attributes: Some(ProductAttributes { name: Some("Widget".to_owned()), price: None }),
            ..ProductDto::new("x", Decimal::ONE)
        }),
        "Product price cannot be null",
        Some("price")
    )]
    #[case::missing_name(
        Some(ProductDto {
            attributes: Some(ProductAttributes { name: None, price: Some(Decimal::ONE) }),
            ..ProductDto::new("x", Decimal::ONE)
        }),
        "Product name cannot be null or empty",
        Some("name")
    )]
    #[tokio::test]
    async fn invalid_input_never_reaches_storage(
        #[case] input: Option<ProductDto>,
        #[case] message: &str,
        #[case] field: Option<&str>,
    ) {
        let mut repo = MockProductRepository::new();
        repo.expect_save().times(0);

        let error = use_case(repo)
            .create_product(input)
            .await
            .expect_err("validation failure");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), message);
        assert_eq!(error.field(), field);
    }

    #[tokio::test]
    async fn zero_price_is_accepted() {
        let created = use_case(saving_repo())
            .create_product(Some(ProductDto::new("Freebie", decimal("0"))))
            .await
            .expect("zero price is valid");

        assert_eq!(created.price(), Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn update_rejects_invalid_input_before_lookup() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_id().times(0);
        repo.expect_save().times(0);

        let error = use_case(repo)
            .update_product(ProductId::new(1), Some(ProductDto::new("", Decimal::ONE)))
            .await
            .expect_err("validation failure");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn round_trip_preserves_name_and_price() {
        let dto = ProductDto::new("Widget", decimal("99.99"));
        let product = to_product(Some(dto.clone())).expect("valid dto");

        let back = ProductDto::from(&product);

        assert_eq!(back.name(), dto.name());
        assert_eq!(back.price().map(|p| p.to_string()).as_deref(), Some("99.99"));
    }

    #[rstest]
    fn client_supplied_id_is_ignored() {
        let mut dto = ProductDto::new("Widget", Decimal::ONE);
        dto.id = Some("123".to_owned());

        let product = to_product(Some(dto)).expect("valid dto");

        assert!(product.id().is_none());
    }
}
