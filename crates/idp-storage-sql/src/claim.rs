//! `PostgreSQL` implementation of the claim repositories.
//!
//! Each mutation touches two tables: the shared `claims` table and the
//! owning join table (`user_claims` or `role_claims`).

use async_trait::async_trait;
use idp_model::{RoleClaim, UserClaim};
use idp_storage::error::StorageResult;
use idp_storage::{RoleClaimRepository, UserClaimRepository};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{RoleClaimRow, UserClaimRow};
use crate::error::from_sqlx_error;

/// `PostgreSQL` user-claim repository, bound to the unit of work's
/// transaction.
pub struct SqlUserClaimRepository<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
}

impl<'t> SqlUserClaimRepository<'t> {
    /// Creates a repository adapter over the given transaction.
    #[must_use]
    pub fn new(tx: &'t mut Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl UserClaimRepository for SqlUserClaimRepository<'_> {
    async fn list(&mut self) -> StorageResult<Vec<UserClaim>> {
        let rows: Vec<UserClaimRow> = sqlx::query_as(
            r"SELECT c.id, c.claim_type, c.claim_value, uc.user_id
            FROM claims c
            JOIN user_claims uc ON uc.id = c.id",
        )
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(UserClaim::from).collect())
    }

    async fn get_by_id(&mut self, id: i64) -> StorageResult<Option<UserClaim>> {
        let row: Option<UserClaimRow> = sqlx::query_as(
            r"SELECT c.id, c.claim_type, c.claim_value, uc.user_id
            FROM claims c
            JOIN user_claims uc ON uc.id = c.id
            WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(row.map(UserClaim::from))
    }

    async fn get_by_user(&mut self, user_id: Uuid) -> StorageResult<Vec<UserClaim>> {
        let rows: Vec<UserClaimRow> = sqlx::query_as(
            r"SELECT c.id, c.claim_type, c.claim_value, uc.user_id
            FROM claims c
            JOIN user_claims uc ON uc.id = c.id
            WHERE uc.user_id = $1
            ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(UserClaim::from).collect())
    }

    async fn add(&mut self, claim: &UserClaim) -> StorageResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO claims (claim_type, claim_value) VALUES ($1, $2) RETURNING id",
        )
        .bind(&claim.claim_type)
        .bind(&claim.claim_value)
        .fetch_one(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        sqlx::query("INSERT INTO user_claims (id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(claim.user_id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(id)
    }

    async fn update(&mut self, claim: &UserClaim) -> StorageResult<()> {
        sqlx::query("UPDATE claims SET claim_type = $2, claim_value = $3 WHERE id = $1")
            .bind(claim.id)
            .bind(&claim.claim_type)
            .bind(&claim.claim_value)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        sqlx::query("UPDATE user_claims SET user_id = $2 WHERE id = $1")
            .bind(claim.id)
            .bind(claim.user_id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn delete(&mut self, id: i64) -> StorageResult<()> {
        sqlx::query("DELETE FROM user_claims WHERE id = $1")
            .bind(id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        sqlx::query("DELETE FROM claims WHERE id = $1")
            .bind(id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(())
    }
}

/// `PostgreSQL` role-claim repository, bound to the unit of work's
/// transaction.
pub struct SqlRoleClaimRepository<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
}

impl<'t> SqlRoleClaimRepository<'t> {
    /// Creates a repository adapter over the given transaction.
    #[must_use]
    pub fn new(tx: &'t mut Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl RoleClaimRepository for SqlRoleClaimRepository<'_> {
    async fn list(&mut self) -> StorageResult<Vec<RoleClaim>> {
        let rows: Vec<RoleClaimRow> = sqlx::query_as(
            r"SELECT c.id, c.claim_type, c.claim_value, rc.role_id
            FROM claims c
            JOIN role_claims rc ON rc.id = c.id",
        )
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(RoleClaim::from).collect())
    }

    async fn get_by_id(&mut self, id: i64) -> StorageResult<Option<RoleClaim>> {
        let row: Option<RoleClaimRow> = sqlx::query_as(
            r"SELECT c.id, c.claim_type, c.claim_value, rc.role_id
            FROM claims c
            JOIN role_claims rc ON rc.id = c.id
            WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(row.map(RoleClaim::from))
    }

    async fn get_by_role(&mut self, role_id: Uuid) -> StorageResult<Vec<RoleClaim>> {
        let rows: Vec<RoleClaimRow> = sqlx::query_as(
            r"SELECT c.id, c.claim_type, c.claim_value, rc.role_id
            FROM claims c
            JOIN role_claims rc ON rc.id = c.id
            WHERE rc.role_id = $1
            ORDER BY c.id",
        )
        .bind(role_id)
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(RoleClaim::from).collect())
    }

    async fn add(&mut self, claim: &RoleClaim) -> StorageResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO claims (claim_type, claim_value) VALUES ($1, $2) RETURNING id",
        )
        .bind(&claim.claim_type)
        .bind(&claim.claim_value)
        .fetch_one(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        sqlx::query("INSERT INTO role_claims (id, role_id) VALUES ($1, $2)")
            .bind(id)
            .bind(claim.role_id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(id)
    }

    async fn update(&mut self, claim: &RoleClaim) -> StorageResult<()> {
        sqlx::query("UPDATE claims SET claim_type = $2, claim_value = $3 WHERE id = $1")
            .bind(claim.id)
            .bind(&claim.claim_type)
            .bind(&claim.claim_value)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        sqlx::query("UPDATE role_claims SET role_id = $2 WHERE id = $1")
            .bind(claim.id)
            .bind(claim.role_id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn delete(&mut self, id: i64) -> StorageResult<()> {
        sqlx::query("DELETE FROM role_claims WHERE id = $1")
            .bind(id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        sqlx::query("DELETE FROM claims WHERE id = $1")
            .bind(id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(())
    }
}
