//! API client error types.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// API client error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a status outside {200, 404}.
    ///
    /// Carries the full request and response context for diagnostics.
    #[error("{method} {url} returned {status}: {response_body}")]
    Status {
        /// Request method.
        method: Method,
        /// Request URL.
        url: String,
        /// Serialized request body, if the request had one.
        request_body: Option<String>,
        /// Response status code.
        status: StatusCode,
        /// Response headers.
        response_headers: HeaderMap,
        /// Response body text; empty if it could not be read.
        response_body: String,
    },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// The response status, if this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            Self::Json(_) => None,
        }
    }
}

/// Result type for API client operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_names_the_request() {
        let err = ApiError::Status {
            method: Method::GET,
            url: "http://localhost/api/identity/user/1".to_string(),
            request_body: None,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            response_headers: HeaderMap::new(),
            response_body: "boom".to_string(),
        };

        let text = err.to_string();
        assert!(text.contains("GET"));
        assert!(text.contains("/api/identity/user/1"));
        assert!(text.contains("500"));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
