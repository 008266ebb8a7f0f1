//! Storefront services.

pub mod cart;
pub mod catalog;

pub use cart::{CartError, CartStore};
pub use catalog::{Catalog, CatalogError, Product};
