//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into validated domain products.

use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::products;

/// Row read from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

/// Insertable row for products that have not been assigned an id yet.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub name: &'a str,
    pub price: Decimal,
}

/// Insertable row carrying an explicit id, used for full replacement.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct ProductWithIdRow<'a> {
    pub id: i64,
    pub name: &'a str,
    pub price: Decimal,
}

/// Changeset applied when replacing an existing product.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductUpdate<'a> {
    pub name: &'a str,
    pub price: Decimal,
}
