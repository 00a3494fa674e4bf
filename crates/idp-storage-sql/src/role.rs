//! `PostgreSQL` implementation of the role repository.

use async_trait::async_trait;
use idp_model::Role;
use idp_storage::error::StorageResult;
use idp_storage::RoleRepository;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::entities::RoleRow;
use crate::error::{from_sqlx_error, not_found};

/// `PostgreSQL` role repository, bound to the unit of work's transaction.
pub struct SqlRoleRepository<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
}

impl<'t> SqlRoleRepository<'t> {
    /// Creates a repository adapter over the given transaction.
    #[must_use]
    pub fn new(tx: &'t mut Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl RoleRepository for SqlRoleRepository<'_> {
    async fn list(&mut self) -> StorageResult<Vec<Role>> {
        let rows: Vec<RoleRow> = sqlx::query_as("SELECT * FROM roles ORDER BY name")
            .fetch_all(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn get_by_id(&mut self, id: Uuid) -> StorageResult<Option<Role>> {
        let row: Option<RoleRow> = sqlx::query_as("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(Role::from))
    }

    async fn get_by_normalized_name(
        &mut self,
        normalized_name: &str,
    ) -> StorageResult<Option<Role>> {
        let row: Option<RoleRow> =
            sqlx::query_as("SELECT * FROM roles WHERE normalized_name = $1")
                .bind(normalized_name)
                .fetch_optional(&mut **self.tx)
                .await
                .map_err(from_sqlx_error)?;

        Ok(row.map(Role::from))
    }

    async fn names_for_user(&mut self, user_id: Uuid) -> StorageResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r"SELECT r.name FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn add(&mut self, role: &Role) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO roles (id, name, normalized_name, concurrency_stamp)
            VALUES ($1, $2, $3, $4)",
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.normalized_name)
        .bind(&role.concurrency_stamp)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn update(&mut self, role: &Role) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE roles SET
                name = $2, normalized_name = $3, concurrency_stamp = $4
            WHERE id = $1",
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.normalized_name)
        .bind(&role.concurrency_stamp)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Role", role.id));
        }

        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> StorageResult<()> {
        // Role claims and memberships cascade.
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Role", id));
        }

        Ok(())
    }
}
