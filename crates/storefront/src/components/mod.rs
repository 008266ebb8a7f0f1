//! Reusable view components shared by storefront templates.

pub mod quantity;

pub use quantity::QuantityControl;
