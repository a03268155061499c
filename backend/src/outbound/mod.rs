//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed product repository using Diesel.
//! - **inventory**: HTTP probe for the inventory service health endpoint.
//!
//! Adapters convert between domain types and infrastructure representations
//! and contain no business logic.

pub mod inventory;
pub mod persistence;
