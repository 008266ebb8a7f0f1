//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bazaar_core::Toast;
use thiserror::Error;

use crate::models::RefundRejection;
use crate::services::OrderServiceError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Order service call failed.
    #[error("Order service error: {0}")]
    OrderService(#[from] OrderServiceError),

    /// A refund could not be started.
    #[error("Refund rejected: {0}")]
    Refund(#[from] RefundRejection),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::OrderService(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::OrderService(_) => StatusCode::BAD_GATEWAY,
            Self::Refund(RefundRejection::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Refund(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::OrderService(_) => "External service error".to_string(),
            Self::Refund(rejection) => rejection.to_string(),
            _ => self.to_string(),
        };

        // Rejected refunds still tell the admin why through a toast
        if let Self::Refund(RefundRejection::NotRefundable { .. } | RefundRejection::InFlight(_)) =
            &self
        {
            let toast = Toast::destructive("Refund Unavailable", message.clone());
            if let Ok(value) = toast.hx_trigger_value() {
                return (status, [("HX-Trigger", value)], message).into_response();
            }
        }

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
