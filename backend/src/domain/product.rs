//! Product aggregate.
//!
//! A product always carries a non-blank name and a non-negative price. Both
//! fit the storage columns: at most 255 characters of name and a price below
//! 10^8 with no more than two decimal places. Every constructor and setter
//! runs the same checks, so an invalid product cannot be observed anywhere in
//! the system.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Longest name the `products.name` column holds.
pub const MAX_NAME_CHARS: usize = 255;
/// Decimal places kept by the `products.price` column.
pub const PRICE_SCALE: u32 = 2;
/// Exclusive upper bound of the `products.price` column.
const PRICE_LIMIT: i64 = 100_000_000;

/// Validation errors raised when building or mutating a [`Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductValidationError {
    BlankName,
    NameTooLong,
    MissingPrice,
    NegativePrice,
    PriceTooPrecise,
    PriceTooLarge,
}

impl ProductValidationError {
    /// Attribute the error refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::BlankName | Self::NameTooLong => "name",
            Self::MissingPrice
            | Self::NegativePrice
            | Self::PriceTooPrecise
            | Self::PriceTooLarge => "price",
        }
    }
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "Product name cannot be null or empty"),
            Self::NameTooLong => write!(
                f,
                "Product name cannot exceed {MAX_NAME_CHARS} characters"
            ),
            Self::MissingPrice => write!(f, "Product price cannot be null"),
            Self::NegativePrice => write!(f, "Product price cannot be negative"),
            Self::PriceTooPrecise => write!(
                f,
                "Product price cannot have more than {PRICE_SCALE} decimal places"
            ),
            Self::PriceTooLarge => write!(f, "Product price must be less than {PRICE_LIMIT}"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Storage-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn check_name(name: Option<&str>) -> Result<(), ProductValidationError> {
    match name {
        Some(name) if name.trim().is_empty() => Err(ProductValidationError::BlankName),
        Some(name) if name.chars().count() > MAX_NAME_CHARS => {
            Err(ProductValidationError::NameTooLong)
        }
        Some(_) => Ok(()),
        None => Err(ProductValidationError::BlankName),
    }
}

fn check_price(price: Option<Decimal>) -> Result<Decimal, ProductValidationError> {
    let price = price.ok_or(ProductValidationError::MissingPrice)?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductValidationError::NegativePrice);
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ProductValidationError::PriceTooPrecise);
    }
    if price >= Decimal::from(PRICE_LIMIT) {
        return Err(ProductValidationError::PriceTooLarge);
    }
    Ok(price)
}

/// Unvalidated input for [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// A catalogue product.
///
/// # Examples
/// ```
/// use product_api::domain::Product;
/// use rust_decimal::Decimal;
///
/// let product = Product::new("Widget", Decimal::new(999, 2)).expect("valid product");
/// assert_eq!(product.name(), "Widget");
/// assert!(product.id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Option<ProductId>,
    name: String,
    price: Decimal,
}

impl Product {
    /// Build an unsaved product.
    pub fn new(name: impl Into<String>, price: Decimal) -> Result<Self, ProductValidationError> {
        Self::try_from(ProductDraft {
            id: None,
            name: Some(name.into()),
            price: Some(price),
        })
    }

    /// Return the product with `id` assigned.
    #[must_use]
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Storage identifier, absent until persisted.
    #[must_use]
    pub const fn id(&self) -> Option<ProductId> {
        self.id
    }

    /// Product name as supplied by the client.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Replace the name, rejecting blank values.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ProductValidationError> {
        let name = name.into();
        check_name(Some(&name))?;
        self.name = name;
        Ok(())
    }

    /// Replace the price, rejecting negative values.
    pub fn set_price(&mut self, price: Decimal) -> Result<(), ProductValidationError> {
        self.price = check_price(Some(price))?;
        Ok(())
    }

    /// Re-run the invariant checks on the current state.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        check_name(Some(&self.name))?;
        check_price(Some(self.price)).map(|_| ())
    }
}

impl TryFrom<ProductDraft> for Product {
    type Error = ProductValidationError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let ProductDraft { id, name, price } = draft;
        check_name(name.as_deref())?;
        let price = check_price(price)?;
        let name = name.ok_or(ProductValidationError::BlankName)?;
        Ok(Self { id, name, price })
    }
}

#[cfg(test)]
mod tests {
    //! Boundary coverage for product validation.

    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    fn price(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("decimal literal")
    }

    #[rstest]
    #[case::zero("0")]
    #[case::cents("0.01")]
    #[case::typical("99.99")]
    fn accepts_non_negative_prices(#[case] raw: &str) {
        let product = Product::new("Widget", price(raw)).expect("valid product");
        assert_eq!(product.price().to_string(), raw);
    }

    #[rstest]
    fn negative_zero_is_treated_as_zero() {
        let product = Product::new("Widget", price("-0.00")).expect("zero is valid");
        assert!(product.price().is_zero());
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tab("\t")]
    fn rejects_blank_names(#[case] name: &str) {
        let err = Product::new(name, price("1")).expect_err("blank name");
        assert_eq!(err, ProductValidationError::BlankName);
        assert_eq!(err.to_string(), "Product name cannot be null or empty");
        assert_eq!(err.field(), "name");
    }

    #[rstest]
    fn rejects_negative_price() {
        let err = Product::new("Widget", price("-0.01")).expect_err("negative price");
        assert_eq!(err, ProductValidationError::NegativePrice);
        assert_eq!(err.field(), "price");
    }

    #[rstest]
    #[case::at_limit(MAX_NAME_CHARS, true)]
    #[case::past_limit(MAX_NAME_CHARS + 1, false)]
    fn name_length_is_bounded_by_storage(#[case] chars: usize, #[case] accepted: bool) {
        let name = "é".repeat(chars);
        let result = Product::new(name, price("1"));
        if accepted {
            assert!(result.is_ok());
        } else {
            let err = result.expect_err("name too long");
            assert_eq!(err, ProductValidationError::NameTooLong);
            assert_eq!(err.field(), "name");
            assert_eq!(err.to_string(), "Product name cannot exceed 255 characters");
        }
    }

    #[rstest]
    #[case::largest("99999999.99")]
    #[case::trailing_zero("9.990")]
    fn accepts_prices_that_fit_storage(#[case] raw: &str) {
        let product = Product::new("Widget", price(raw)).expect("fits the column");
        assert_eq!(product.price().to_string(), raw);
    }

    #[rstest]
    #[case::three_places("9.999", ProductValidationError::PriceTooPrecise)]
    #[case::tiny("0.001", ProductValidationError::PriceTooPrecise)]
    #[case::limit("100000000", ProductValidationError::PriceTooLarge)]
    #[case::far_past_limit("12345678901.50", ProductValidationError::PriceTooLarge)]
    fn rejects_prices_storage_cannot_hold(
        #[case] raw: &str,
        #[case] expected: ProductValidationError,
    ) {
        let err = Product::new("Widget", price(raw)).expect_err("out of column range");
        assert_eq!(err, expected);
        assert_eq!(err.field(), "price");
    }

    #[rstest]
    fn setters_reject_prices_storage_cannot_hold() {
        let mut product = Product::new("Widget", price("1")).expect("valid product");
        assert_eq!(
            product.set_price(price("1.005")),
            Err(ProductValidationError::PriceTooPrecise)
        );
        assert_eq!(product.price().to_string(), "1");
    }

    #[rstest]
    fn draft_without_name_is_rejected() {
        let draft = ProductDraft {
            price: Some(price("1")),
            ..ProductDraft::default()
        };
        assert_eq!(
            Product::try_from(draft),
            Err(ProductValidationError::BlankName)
        );
    }

    #[rstest]
    fn draft_without_price_is_rejected() {
        let draft = ProductDraft {
            name: Some("Widget".to_owned()),
            ..ProductDraft::default()
        };
        let err = Product::try_from(draft).expect_err("missing price");
        assert_eq!(err.to_string(), "Product price cannot be null");
    }

    #[rstest]
    fn name_is_kept_as_supplied() {
        let product = Product::new("  Widget ", price("1")).expect("valid product");
        assert_eq!(product.name(), "  Widget ");
    }

    #[rstest]
    fn setters_enforce_invariants() {
        let mut product = Product::new("Widget", price("1")).expect("valid product");

        assert_eq!(
            product.set_name(" "),
            Err(ProductValidationError::BlankName)
        );
        assert_eq!(
            product.set_price(price("-5")),
            Err(ProductValidationError::NegativePrice)
        );
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.price().to_string(), "1");

        product.set_name("Gadget").expect("valid name");
        product.set_price(price("0")).expect("zero price");
        assert_eq!(product.name(), "Gadget");
        assert!(product.validate().is_ok());
    }

    #[rstest]
    fn with_id_assigns_identifier() {
        let product = Product::new("Widget", price("1"))
            .expect("valid product")
            .with_id(ProductId::new(7));
        assert_eq!(product.id(), Some(ProductId::new(7)));
        assert_eq!(product.id().map(ProductId::get), Some(7));
    }
}
