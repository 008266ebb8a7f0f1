//! Services the admin panel talks to.

pub mod order_status;

pub use order_status::{OrderServiceClient, OrderServiceError, OrderStatusService};
