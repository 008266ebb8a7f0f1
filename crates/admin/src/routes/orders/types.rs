//! View types for the orders table.

use bazaar_core::OrderStatus;
use serde::Deserialize;

use crate::models::OrderEntry;

/// Date format used in the orders table (`Mar 4, 2025`).
const DATE_FORMAT: &str = "%b %-d, %Y";

/// Form body for the status selector.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// One option of the status selector.
#[derive(Debug, Clone)]
pub struct StatusOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One row of the orders table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    /// `abc12345` for `abc12345-...`.
    pub short_id: String,
    pub detail_href: String,
    pub status_href: String,
    pub refund_href: String,
    pub customer_name: String,
    pub customer_email: String,
    pub created_at: String,
    pub created_at_iso: String,
    pub total: String,
    pub status_value: &'static str,
    pub status_label: &'static str,
    pub badge_class: &'static str,
    pub status_options: Vec<StatusOptionView>,
    pub is_refunding: bool,
    pub can_refund: bool,
}

impl From<&OrderEntry> for OrderRowView {
    fn from(entry: &OrderEntry) -> Self {
        let order = &entry.order;
        let status = order.order_status;
        let base = format!("/orders/{}", urlencoding::encode(order.id.as_str()));

        Self {
            id: order.id.to_string(),
            short_id: order.id.short().to_string(),
            status_href: format!("{base}/status"),
            refund_href: format!("{base}/refund"),
            detail_href: base,
            customer_name: order.customer_name(),
            customer_email: order.billing_email.clone(),
            created_at: order.created_at.format(DATE_FORMAT).to_string(),
            created_at_iso: order.created_at.to_rfc3339(),
            total: order.order_total.to_string(),
            status_value: status.as_str(),
            status_label: status.label(),
            badge_class: badge_class(status),
            status_options: OrderStatus::ALL
                .into_iter()
                .map(|option| StatusOptionView {
                    value: option.as_str(),
                    label: option.label(),
                    selected: option == status,
                })
                .collect(),
            is_refunding: entry.is_refunding(),
            can_refund: entry.can_refund(),
        }
    }
}

/// Badge colour for a status.
#[must_use]
pub const fn badge_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::Processing => "badge badge-info",
        OrderStatus::Shipped => "badge badge-primary",
        OrderStatus::Delivered => "badge badge-success",
        OrderStatus::Cancelled => "badge badge-danger",
    }
}
