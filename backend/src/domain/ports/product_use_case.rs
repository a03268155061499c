//! Driving port for product use cases and its wire-facing resource types.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProductId};

/// JSON:API resource type for products.
pub const PRODUCT_RESOURCE_TYPE: &str = "products";

fn product_resource_type() -> String {
    PRODUCT_RESOURCE_TYPE.to_owned()
}

/// Product attributes as carried in a resource object.
///
/// Both members are optional on the wire so that missing values surface as
/// validation errors rather than deserialisation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Widget")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    #[schema(value_type = Option<f64>, example = 9.99)]
    pub price: Option<Decimal>,
}

/// Product resource object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    /// Stringified storage id, absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "1")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "product_resource_type")]
    #[schema(example = "products")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<ProductAttributes>,
}

impl ProductDto {
    /// Build a resource object for a new product.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            resource_type: product_resource_type(),
            attributes: Some(ProductAttributes {
                name: Some(name.into()),
                price: Some(price),
            }),
        }
    }

    /// Name attribute, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attributes.as_ref()?.name.as_deref()
    }

    /// Price attribute, if present.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        self.attributes.as_ref()?.price
    }
}

/// Driving port consumed by the HTTP controllers.
///
/// `None` inputs model an absent `data` member; they are rejected before any
/// domain logic runs. Lookups of unknown ids return `Ok(None)` / `Ok(false)`
/// so each API version can render "not found" its own way.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductUseCase: Send + Sync {
    /// Validate and store a new product.
    async fn create_product(&self, product: Option<ProductDto>) -> Result<ProductDto, Error>;

    /// Fetch one product.
    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<ProductDto>, Error>;

    /// Fetch every product.
    async fn get_all_products(&self) -> Result<Vec<ProductDto>, Error>;

    /// Replace an existing product.
    async fn update_product(
        &self,
        id: ProductId,
        product: Option<ProductDto>,
    ) -> Result<Option<ProductDto>, Error>;

    /// Delete a product, reporting whether it existed.
    async fn delete_product(&self, id: ProductId) -> Result<bool, Error>;
}
