//! Integration tests for Bazaar.
//!
//! Both binaries are driven in-process through their routers with
//! `tower::ServiceExt::oneshot`; no sockets or external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! This library holds the shared fixtures: a scriptable order service, order
//! and catalog builders, and response helpers.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use bazaar_admin::services::{OrderServiceError, OrderStatusService};
use bazaar_core::{CurrencyCode, Order, OrderId, OrderStatus, Price};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::sync::Notify;

/// Upper bound on response bodies read by the helpers.
const BODY_LIMIT: usize = 1024 * 1024;

/// An order with fixed customer details.
#[must_use]
pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        billing_first_name: "Ayesha".to_string(),
        billing_last_name: "Khan".to_string(),
        billing_email: "ayesha@example.com".to_string(),
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 4, 10, 30, 0)
            .single()
            .unwrap_or_default(),
        order_total: Price::new(Decimal::new(129_900, 2), CurrencyCode::PKR),
        order_status: status,
    }
}

/// Lets a test hold an order-status update open until it decides to finish.
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Wait until the gated call has started.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the gated call finish.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// In-memory [`OrderStatusService`] with scripted outcomes.
#[derive(Default)]
pub struct FakeOrderService {
    orders: Vec<Order>,
    fail_list: bool,
    fail_updates: bool,
    gate: Option<(OrderId, Gate)>,
    updates: Mutex<Vec<(OrderId, OrderStatus)>>,
}

impl FakeOrderService {
    /// A service that lists `orders` and accepts every update.
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    /// Make listing orders fail.
    #[must_use]
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Make every status update fail.
    #[must_use]
    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Hold updates for `order_id` until the returned gate is released.
    #[must_use]
    pub fn gated_on(mut self, order_id: &str) -> (Self, Gate) {
        let gate = Gate::default();
        self.gate = Some((OrderId::new(order_id), gate.clone()));
        (self, gate)
    }

    /// Every update the service received, in order.
    #[must_use]
    pub fn updates(&self) -> Vec<(OrderId, OrderStatus)> {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn unavailable() -> OrderServiceError {
        OrderServiceError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "order service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl OrderStatusService for FakeOrderService {
    async fn list_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        if self.fail_list {
            return Err(Self::unavailable());
        }
        Ok(self.orders.clone())
    }

    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderServiceError> {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((order_id.clone(), status));

        if let Some((gated_id, gate)) = &self.gate
            && gated_id == order_id
        {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if self.fail_updates {
            return Err(Self::unavailable());
        }
        Ok(())
    }
}

/// A bodiless request.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
#[allow(clippy::expect_used)]
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// A form-encoded POST request, optionally carrying a session cookie.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
#[allow(clippy::expect_used)]
pub fn form_post(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).expect("valid request")
}

/// A GET request carrying a session cookie.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
#[allow(clippy::expect_used)]
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("valid request")
}

/// Read a response body as UTF-8 text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
#[allow(clippy::expect_used)]
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// The parsed `HX-Trigger` header, if present.
///
/// # Panics
///
/// Panics if the header is present but not valid JSON.
#[must_use]
#[allow(clippy::expect_used)]
pub fn hx_trigger(response: &Response) -> Option<serde_json::Value> {
    let value = response.headers().get("HX-Trigger")?;
    let text = value.to_str().expect("ASCII header");
    Some(serde_json::from_str(text).expect("JSON HX-Trigger"))
}

/// The `name=value` pair of the first `Set-Cookie` header.
#[must_use]
pub fn session_cookie(response: &Response) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    set_cookie
        .split(';')
        .next()
        .map(|pair| pair.trim().to_string())
}
