//! Shared service state.

use idp_storage_sql::SqlUnitOfWork;
use sqlx::PgPool;

use crate::error::ServiceResult;

/// State shared by all identity API handlers.
#[derive(Clone)]
pub struct ServiceState {
    pool: PgPool,
}

impl ServiceState {
    /// Creates service state over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begins a unit of work for the current request.
    ///
    /// # Errors
    ///
    /// Propagates the storage error if a transaction cannot be started.
    pub async fn uow(&self) -> ServiceResult<SqlUnitOfWork> {
        Ok(SqlUnitOfWork::begin(&self.pool).await?)
    }
}
