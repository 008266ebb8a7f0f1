//! Order service client.
//!
//! The order service owns order records. The admin panel reads the order
//! list from it at startup and asks it to change an order's status when an
//! admin issues a refund.
//!
//! # Endpoints
//!
//! ```text
//! GET   {base}/orders              -> [Order]
//! PATCH {base}/orders/{id}/status  <- {"status": "cancelled"}
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use bazaar_core::{Order, OrderId, OrderStatus};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::OrderServiceConfig;

/// The remote update failed.
///
/// Callers treat every variant the same way ("an error occurred"); the
/// variants only exist so logs say what went wrong.
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("order service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request URL could not be built.
    #[error("invalid order service URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Remote operations on orders.
#[async_trait]
pub trait OrderStatusService: Send + Sync {
    /// Fetch all orders, newest first as returned by the service.
    async fn list_orders(&self) -> Result<Vec<Order>, OrderServiceError>;

    /// Set the status of one order.
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderServiceError>;
}

#[derive(Serialize)]
struct StatusUpdateBody {
    status: OrderStatus,
}

/// HTTP implementation of [`OrderStatusService`].
#[derive(Clone)]
pub struct OrderServiceClient {
    inner: Arc<OrderServiceClientInner>,
}

struct OrderServiceClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
}

impl OrderServiceClient {
    /// Create a new client.
    ///
    /// No request timeout is configured: an in-flight status update runs
    /// until the service answers or the connection drops.
    #[must_use]
    pub fn new(config: &OrderServiceConfig) -> Self {
        Self {
            inner: Arc::new(OrderServiceClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.clone(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, OrderServiceError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, OrderServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(OrderServiceError::Status { status, body })
    }
}

#[async_trait]
impl OrderStatusService for OrderServiceClient {
    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        let url = self.endpoint("orders")?;
        let response = self.authorize(self.inner.client.get(url)).send().await?;
        let orders = Self::check(response).await?.json::<Vec<Order>>().await?;
        tracing::debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self, order_id), fields(order_id = %order_id))]
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderServiceError> {
        let id = urlencoding::encode(order_id.as_str());
        let url = self.endpoint(&format!("orders/{id}/status"))?;
        let response = self
            .authorize(self.inner.client.patch(url))
            .json(&StatusUpdateBody { status })
            .send()
            .await?;
        Self::check(response).await?;
        tracing::info!(%status, "Order status updated");
        Ok(())
    }
}
