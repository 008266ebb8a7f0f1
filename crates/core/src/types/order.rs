//! Customer order record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus, Price};

/// A customer purchase record.
///
/// Orders are created by the checkout process and owned by the order
/// service. The admin panel only ever changes `order_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub billing_first_name: String,
    pub billing_last_name: String,
    pub billing_email: String,
    pub created_at: DateTime<Utc>,
    pub order_total: Price,
    pub order_status: OrderStatus,
}

impl Order {
    /// Billing name as shown to admins (`"First Last"`).
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.billing_first_name, self.billing_last_name)
            .trim()
            .to_string()
    }
}
