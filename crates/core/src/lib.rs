//! Bazaar Core - Shared types library.
//!
//! This crate provides the domain types used by both Bazaar binaries:
//! - `storefront` - Public-facing shop (cart page and cart item cards)
//! - `admin` - Internal orders management panel
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no templates. Rendering concerns live in the binaries.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, order status, orders, cart items, toasts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
