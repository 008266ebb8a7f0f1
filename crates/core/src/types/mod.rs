//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for the shop's domain concepts.

pub mod cart;
pub mod id;
pub mod notification;
pub mod order;
pub mod price;
pub mod status;

pub use cart::{CartItem, LOW_STOCK_THRESHOLD};
pub use id::*;
pub use notification::{Toast, ToastVariant};
pub use order::Order;
pub use price::{CurrencyCode, Price};
pub use status::{OrderStatus, ParseStatusError};
