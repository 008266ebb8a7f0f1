//! Admin state models.

pub mod orders_board;

pub use orders_board::{OrderEntry, OrdersBoard, RefundGuard, RefundRejection, RefundState};
