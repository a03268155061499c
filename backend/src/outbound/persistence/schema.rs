//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations/*/up.sql`. Regenerate with
//! `diesel print-schema` when the DDL changes.

diesel::table! {
    /// Product catalogue.
    products (id) {
        /// Storage-assigned identifier (`BIGSERIAL`).
        id -> Int8,
        /// Display name, at most 255 characters.
        name -> Varchar,
        /// Unit price, `NUMERIC(10, 2)`.
        price -> Numeric,
    }
}
