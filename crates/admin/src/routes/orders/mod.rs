//! Orders management route handlers.
//!
//! This module contains handlers for the orders table, the order detail page,
//! and the per-row status and refund actions.

mod actions;
mod detail;
mod list;
pub mod types;

pub use types::{OrderRowView, StatusForm, StatusOptionView};

pub use list::{OrdersIndexTemplate, index};

pub use detail::{OrderShowTemplate, show};

pub use actions::{OrderRowTemplate, refund, update_status};
