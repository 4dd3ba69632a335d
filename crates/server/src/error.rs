//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::services::{CartError, CheckoutError, DirectoryError};

/// Application-level error type for the HTTP surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart persistence failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout submission failed.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order directory operation failed.
    #[error("order error: {0}")]
    Directory(#[from] DirectoryError),

    /// Catalog gateway failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// No valid bearer token on the request.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// JSON error body returned to clients.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart
                | CheckoutError::MissingField(_)
                | CheckoutError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                // remote boundary failures: the submission must be retried
                CheckoutError::OrderCreate(_) | CheckoutError::PartialWrite { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                CheckoutError::Cart(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Directory(err) => match err {
                DirectoryError::AccessDenied => StatusCode::FORBIDDEN,
                DirectoryError::OrderNotFound(_) => StatusCode::NOT_FOUND,
                DirectoryError::TerminalStatus { .. } => StatusCode::CONFLICT,
                DirectoryError::Repository(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Cart(_) | Self::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server-side failures to Sentry before responding
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't leak backend details on internal failures
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CheckoutError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::MissingField("phone"))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_authorization_maps_to_forbidden() {
        assert_eq!(
            status_of(AppError::Directory(DirectoryError::AccessDenied)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_of(AppError::Unauthenticated), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_terminal_transition_maps_to_conflict() {
        use quitanda_core::OrderStatus;
        assert_eq!(
            status_of(AppError::Directory(DirectoryError::TerminalStatus {
                from: OrderStatus::Delivered,
                requested: OrderStatus::Pending,
            })),
            StatusCode::CONFLICT
        );
    }
}
