//! Transactional unit of work.

use idp_storage::StorageResult;
use sqlx::{PgPool, Postgres, Transaction};

use crate::claim::{SqlRoleClaimRepository, SqlUserClaimRepository};
use crate::error::from_sqlx_error;
use crate::login::SqlUserLoginRepository;
use crate::role::SqlRoleRepository;
use crate::token::SqlUserTokenRepository;
use crate::user::SqlUserRepository;

/// Groups repository operations under one database transaction.
///
/// A unit of work exclusively owns its transaction and is scoped to one
/// logical request; it is not safe to share across concurrent operations.
/// Repository adapters are constructed per access and borrow the active
/// transaction, so after [`commit`](Self::commit) every subsequent access
/// runs on the fresh transaction. Dropping the unit of work rolls back
/// whatever the active transaction has not committed.
pub struct SqlUnitOfWork {
    pool: PgPool,
    tx: Transaction<'static, Postgres>,
}

impl SqlUnitOfWork {
    /// Begins a unit of work on a transaction drawn from the pool.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection`/`Query` if the transaction
    /// cannot be started.
    pub async fn begin(pool: &PgPool) -> StorageResult<Self> {
        let tx = pool.begin().await.map_err(from_sqlx_error)?;
        Ok(Self {
            pool: pool.clone(),
            tx,
        })
    }

    /// The user repository, bound to the active transaction.
    pub fn users(&mut self) -> SqlUserRepository<'_> {
        SqlUserRepository::new(&mut self.tx)
    }

    /// The role repository, bound to the active transaction.
    pub fn roles(&mut self) -> SqlRoleRepository<'_> {
        SqlRoleRepository::new(&mut self.tx)
    }

    /// The user-claim repository, bound to the active transaction.
    pub fn user_claims(&mut self) -> SqlUserClaimRepository<'_> {
        SqlUserClaimRepository::new(&mut self.tx)
    }

    /// The role-claim repository, bound to the active transaction.
    pub fn role_claims(&mut self) -> SqlRoleClaimRepository<'_> {
        SqlRoleClaimRepository::new(&mut self.tx)
    }

    /// The login repository, bound to the active transaction.
    pub fn user_logins(&mut self) -> SqlUserLoginRepository<'_> {
        SqlUserLoginRepository::new(&mut self.tx)
    }

    /// The token repository, bound to the active transaction.
    pub fn user_tokens(&mut self) -> SqlUserTokenRepository<'_> {
        SqlUserTokenRepository::new(&mut self.tx)
    }

    /// Commits the active transaction and starts a fresh one, so the next
    /// operation starts clean.
    ///
    /// The replacement transaction is acquired before the outgoing one
    /// commits, keeping the unit of work usable whatever the outcome. A
    /// failed commit leaves the outgoing transaction rolled back when its
    /// connection is released.
    ///
    /// # Errors
    ///
    /// Propagates the commit failure, or the failure to start the
    /// replacement transaction.
    pub async fn commit(&mut self) -> StorageResult<()> {
        let fresh = self.pool.begin().await.map_err(from_sqlx_error)?;
        let outgoing = std::mem::replace(&mut self.tx, fresh);
        outgoing.commit().await.map_err(from_sqlx_error)
    }

    /// Rolls back the active transaction and starts a fresh one.
    ///
    /// # Errors
    ///
    /// Propagates the rollback failure, or the failure to start the
    /// replacement transaction.
    pub async fn rollback(&mut self) -> StorageResult<()> {
        let fresh = self.pool.begin().await.map_err(from_sqlx_error)?;
        let outgoing = std::mem::replace(&mut self.tx, fresh);
        outgoing.rollback().await.map_err(from_sqlx_error)
    }
}
