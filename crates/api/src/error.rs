//! API error types with HTTP response mapping.
//!
//! The endpoint is the sole translation point from domain error kind to
//! status code and problem payload. Conflict and validation detail is
//! surfaced verbatim; storage internals are logged and replaced with a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::OrderError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Domain rejection or storage failure.
    Order(OrderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(detail = %msg, "resource not found");
                (StatusCode::NOT_FOUND, "Not Found", msg)
            }
            ApiError::Order(err) => order_error_to_response(err),
        };

        if status.is_client_error() {
            metrics::counter!("orders_rejected_total").increment(1);
        }

        let body = serde_json::json!({
            "title": title,
            "detail": detail,
            "status": status.as_u16(),
        });
        (status, axum::Json(body)).into_response()
    }
}

fn order_error_to_response(err: OrderError) -> (StatusCode, &'static str, String) {
    match &err {
        OrderError::AlreadyExists(_) => {
            tracing::warn!(detail = %err, "order conflict");
            (StatusCode::CONFLICT, "Order Conflict", err.to_string())
        }
        OrderError::NoItems | OrderError::DuplicateProducts(_) | OrderError::Validation(_) => {
            tracing::warn!(detail = %err, "order request rejected");
            (StatusCode::BAD_REQUEST, "Validation Error", err.to_string())
        }
        OrderError::Store(store_err) => {
            // The internal detail stays in the logs only
            tracing::error!(error = %store_err, "storage failure while handling order request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An unexpected error occurred while processing your request".to_string(),
            )
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}
