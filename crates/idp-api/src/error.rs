//! Service error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use idp_storage::StorageError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while serving an identity API request.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage layer error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal service error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(err) => match err {
                StorageError::NotFound { .. } | StorageError::NotFoundByName { .. } => {
                    StatusCode::NOT_FOUND
                }
                StorageError::Duplicate { .. } => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(err) => match err {
                StorageError::NotFound { .. } | StorageError::NotFoundByName { .. } => {
                    "not_found"
                }
                StorageError::Duplicate { .. } => "conflict",
                _ => "storage_error",
            },
            Self::Internal(_) => "internal_error",
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error: String,
    /// Human-readable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.error_code().to_string(),
            error_description: Some(self.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for identity API handlers.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_maps_to_404() {
        let err = ServiceError::from(StorageError::not_found("User", Uuid::nil()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "not_found");
    }

    #[test]
    fn missing_role_maps_to_404() {
        let err = ServiceError::from(StorageError::not_found_by_name("Role", "ADMIN"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_maps_to_409() {
        let err = ServiceError::from(StorageError::duplicate("User", "normalized_user_name", "A"));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "conflict");
    }

    #[test]
    fn query_error_maps_to_500() {
        let err = ServiceError::from(StorageError::Query("syntax".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
