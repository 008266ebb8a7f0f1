//! Bazaar Admin library.
//!
//! This crate provides the admin orders panel as a library, allowing it to
//! be tested and reused.
//!
//! # Security
//!
//! The admin panel can cancel orders through the order service. Bind it to
//! a private interface only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
