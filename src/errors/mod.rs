//! Unified error handling with a consistent JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// Message returned on every route while the database is unreachable.
pub const DATABASE_DOWN_MESSAGE: &str = "Database is down, Sorry :-(";

/// Error detail in the API response body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            error: ApiError {
                code: code.to_string(),
                message: message.to_string(),
            },
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    #[error("Upstream unavailable: {0}")]
    Upstream(#[from] StoreError),

    #[error("Database is down")]
    DatabaseDown,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error came from the document store.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::NotAcceptable(msg) => {
                (StatusCode::NOT_ACCEPTABLE, "NOT_ACCEPTABLE", msg.clone())
            }
            AppError::Upstream(e) => {
                tracing::error!(error = %e, "Document store error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UPSTREAM_UNAVAILABLE",
                    "The document store is unavailable".to_string(),
                )
            }
            AppError::DatabaseDown => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_DOWN",
                DATABASE_DOWN_MESSAGE.to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, ErrorResponse::new(code, &message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_shape() {
        let response = ErrorResponse::new("NOT_FOUND", "Drama not found");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Drama not found");
    }

    #[test]
    fn app_error_is_not_found() {
        let err = AppError::NotFound("drama".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_upstream());
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("All fields are required".to_string());
        assert_eq!(err.to_string(), "Validation error: All fields are required");
    }

    #[test]
    fn app_error_from_store() {
        let store_err = StoreError::Database(sqlx::Error::PoolTimedOut);
        let err: AppError = store_err.into();
        assert!(err.is_upstream());
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::Upstream(StoreError::Database(sqlx::Error::PoolClosed))
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::DatabaseDown.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::NotAcceptable("json only".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_ACCEPTABLE
        );
    }
}
