//! Unified error handling for the admin API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::email::EmailError;
use crate::services::inventory::InventoryError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Stock adjustment failed.
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Email delivery failed.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

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

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::NotFound)
            | Self::Inventory(
                InventoryError::ProductNotFound(_) | InventoryError::FreebieNotFound(_),
            )
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Inventory(InventoryError::InvalidProductId { .. }) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Email(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_)
            | Self::Inventory(InventoryError::Store(_))
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else if status == StatusCode::BAD_GATEWAY {
            "Email delivery failed".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use meridian_core::ProductId;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order 42".to_string());
        assert_eq!(err.to_string(), "Not found: order 42");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "dup".to_string()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_inventory_errors_map_to_client_statuses() {
        let missing = AppError::Inventory(InventoryError::ProductNotFound(ProductId::new(
            Uuid::nil(),
        )));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = AppError::Inventory(InventoryError::InvalidProductId {
            raw: "garbage".to_string(),
            source: "garbage".parse::<Uuid>().expect_err("must fail"),
        });
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
