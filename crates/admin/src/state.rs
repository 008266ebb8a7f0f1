//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::models::OrdersBoard;
use crate::services::{OrderServiceClient, OrderStatusService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    orders: Arc<OrdersBoard>,
    order_service: Arc<dyn OrderStatusService>,
}

impl AppState {
    /// Create state backed by the HTTP order service.
    ///
    /// Seeds the orders board from the service. A failed fetch is logged
    /// and the board starts empty.
    pub async fn new(config: &AdminConfig) -> Self {
        let service = Arc::new(OrderServiceClient::new(&config.order_service));
        Self::seeded(service).await
    }

    /// Create state from any order service, seeding the board from it.
    pub async fn seeded(order_service: Arc<dyn OrderStatusService>) -> Self {
        let orders = match order_service.list_orders().await {
            Ok(orders) => {
                tracing::info!(count = orders.len(), "Loaded orders");
                orders
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load orders");
                Vec::new()
            }
        };

        Self::with_board(OrdersBoard::new(orders), order_service)
    }

    /// Create state from an existing board.
    #[must_use]
    pub fn with_board(board: OrdersBoard, order_service: Arc<dyn OrderStatusService>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                orders: Arc::new(board),
                order_service,
            }),
        }
    }

    /// The orders currently shown in the table.
    #[must_use]
    pub fn orders(&self) -> &Arc<OrdersBoard> {
        &self.inner.orders
    }

    /// The remote order service.
    #[must_use]
    pub fn order_service(&self) -> &Arc<dyn OrderStatusService> {
        &self.inner.order_service
    }
}
