//! SQL storage error conversion.

use idp_storage::StorageError;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Converts a `SQLx` error to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::RowNotFound => {
            // Callers handle specific not-found cases; reaching this arm
            // means a fetch_one was issued where fetch_optional belonged.
            StorageError::Internal("row not found".to_string())
        }
        SqlxError::Database(db_err) => {
            // 23505: unique constraint violation, 23503: FK violation
            if db_err.code().is_some_and(|c| c == "23505") {
                StorageError::Duplicate {
                    entity_type: "record",
                    field: "unique key",
                    value: db_err.constraint().unwrap_or_default().to_string(),
                }
            } else if db_err.code().is_some_and(|c| c == "23503") {
                StorageError::Query(format!("reference violation: {}", db_err.message()))
            } else {
                StorageError::Query(db_err.to_string())
            }
        }
        SqlxError::PoolTimedOut => StorageError::Connection("connection pool timeout".to_string()),
        SqlxError::PoolClosed => StorageError::Connection("connection pool closed".to_string()),
        _ => StorageError::Internal(err.to_string()),
    }
}

/// Creates a not-found error for the given entity type and id.
pub const fn not_found(entity_type: &'static str, id: Uuid) -> StorageError {
    StorageError::not_found(entity_type, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_internal() {
        let err = from_sqlx_error(SqlxError::RowNotFound);
        assert!(matches!(err, StorageError::Internal(_)));
    }

    #[test]
    fn pool_timeout_is_connection() {
        let err = from_sqlx_error(SqlxError::PoolTimedOut);
        assert!(matches!(err, StorageError::Connection(_)));
    }

    #[test]
    fn pool_closed_is_connection() {
        let err = from_sqlx_error(SqlxError::PoolClosed);
        assert!(matches!(err, StorageError::Connection(_)));
    }
}
