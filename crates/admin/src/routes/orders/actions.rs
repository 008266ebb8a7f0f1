//! Single order action handlers (HTMX).
//!
//! Both actions answer with the re-rendered table row, which HTMX swaps in
//! place of the old one.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use bazaar_core::{OrderId, OrderStatus, Toast};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::OrderEntry;
use crate::state::AppState;

use super::types::{OrderRowView, StatusForm};

/// Single table row fragment.
#[derive(Template, WebTemplate)]
#[template(path = "orders/_row.html")]
pub struct OrderRowTemplate {
    pub row: OrderRowView,
}

impl From<&OrderEntry> for OrderRowTemplate {
    fn from(entry: &OrderEntry) -> Self {
        Self {
            row: OrderRowView::from(entry),
        }
    }
}

/// Apply a status picked in the row's selector.
///
/// Optimistic: the board is updated immediately; persisting the change is
/// the selector's concern, not this handler's.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<OrderRowTemplate> {
    let status: OrderStatus = form
        .status
        .parse()
        .map_err(|e: bazaar_core::ParseStatusError| AppError::BadRequest(e.to_string()))?;
    let id = OrderId::new(id);

    let entry = state
        .orders()
        .set_status(&id, status)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    tracing::info!(order_id = %id, %status, "Order status changed");
    Ok(OrderRowTemplate::from(&entry))
}

/// Refund an order by cancelling it through the order service.
///
/// The local row changes only after the service confirms. Failures are
/// logged and reported with a toast; they never alter the row.
///
/// The service call runs on its own task, so a client that disconnects
/// mid-refund cannot drop the confirmation.
#[instrument(skip(state))]
pub async fn refund(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let id = OrderId::new(id);
    let guard = state.orders().begin_refund(&id)?;
    let service = Arc::clone(state.order_service());

    let task = tokio::spawn(async move {
        let outcome = service
            .update_order_status(guard.order_id(), OrderStatus::Cancelled)
            .await;
        if outcome.is_ok() {
            guard.confirm(OrderStatus::Cancelled);
        }
        // Dropping the guard clears the in-flight flag before the row renders.
        outcome
    });

    let toast = match task
        .await
        .map_err(|e| AppError::Internal(format!("refund task failed: {e}")))?
    {
        Ok(()) => {
            tracing::info!(order_id = %id, "Order refunded");
            Toast::new(
                "Order Refunded (Status Updated)",
                format!("Order {id} status has been changed to 'cancelled'."),
            )
        }
        Err(e) => {
            tracing::error!(order_id = %id, error = %e, "Failed to refund order (update status)");
            Toast::destructive(
                "Refund Failed",
                "Could not update order status to cancelled. Please try again.",
            )
        }
    };

    let entry = state
        .orders()
        .entry(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    let trigger = toast
        .hx_trigger_value()
        .map_err(|e| AppError::Internal(format!("toast serialization failed: {e}")))?;

    Ok(([("HX-Trigger", trigger)], OrderRowTemplate::from(&entry)).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{CurrencyCode, Order, Price};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::RefundState;

    fn render(status: OrderStatus, refund: RefundState) -> String {
        let entry = OrderEntry {
            order: Order {
                id: OrderId::new("abc12345-0000-4000-8000-000000000001"),
                billing_first_name: "Sana".to_string(),
                billing_last_name: "Malik".to_string(),
                billing_email: "sana@example.com".to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
                order_total: Price::new(Decimal::new(450_000, 2), CurrencyCode::PKR),
                order_status: status,
            },
            refund,
        };
        OrderRowTemplate::from(&entry).render().unwrap()
    }

    #[test]
    fn test_refund_button_enabled_for_open_orders() {
        let html = render(OrderStatus::Processing, RefundState::Idle);
        assert!(html.contains("Refund Order"));
        assert!(html.contains("hx-disabled-elt=\"this\">"));
        assert!(html.contains("data-status=\"processing\""));
    }

    #[test]
    fn test_refund_button_disabled_for_closed_orders() {
        for status in [OrderStatus::Cancelled, OrderStatus::Delivered] {
            let html = render(status, RefundState::Idle);
            assert!(html.contains("hx-disabled-elt=\"this\" disabled>"), "{status}");
        }
    }

    #[test]
    fn test_in_flight_row_shows_spinner_and_no_menu() {
        let html = render(OrderStatus::Processing, RefundState::InProgress);
        assert!(html.contains("aria-busy=\"true\""));
        assert!(html.contains("spinner"));
        assert!(!html.contains("data-refund"));
    }

    #[test]
    fn test_selector_posts_to_status_endpoint() {
        let html = render(OrderStatus::Shipped, RefundState::Idle);
        assert!(html.contains(
            "hx-post=\"/orders/abc12345-0000-4000-8000-000000000001/status\""
        ));
        assert!(html.contains("<option value=\"shipped\" selected>Shipped</option>"));
    }
}
