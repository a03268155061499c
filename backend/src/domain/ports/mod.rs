//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`ProductRepository`, `InventoryConnectivity`) are
//! implemented by outbound adapters; the driving port (`ProductUseCase`) is
//! consumed by the HTTP controllers.

mod macros;
pub(crate) use macros::define_port_error;

mod inventory_connectivity;
mod product_repository;
mod product_use_case;

#[cfg(test)]
pub use inventory_connectivity::MockInventoryConnectivity;
pub use inventory_connectivity::{InventoryConnectivity, InventoryConnectivityError};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use product_use_case::MockProductUseCase;
pub use product_use_case::{
    PRODUCT_RESOURCE_TYPE, ProductAttributes, ProductDto, ProductUseCase,
};
