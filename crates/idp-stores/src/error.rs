//! Store adapter error types.

use idp_api_client::ApiError;
use idp_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller's cancellation token was already cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// A required string argument was empty or whitespace.
    #[error("invalid argument: {0} must not be blank")]
    InvalidArgument(&'static str),

    /// A user id was not a valid UUID.
    #[error("invalid user id: '{0}'")]
    InvalidUserId(String),

    /// A role id was not a valid UUID.
    #[error("invalid role id: '{0}'")]
    InvalidRoleId(String),

    /// SQL backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// HTTP backend failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for store adapter operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_the_parameter() {
        let err = StoreError::InvalidArgument("normalized_role_name");
        assert!(err.to_string().contains("normalized_role_name"));
    }

    #[test]
    fn storage_error_passes_through() {
        let err = StoreError::from(StorageError::Query("boom".to_string()));
        assert!(err.to_string().contains("boom"));
    }
}
