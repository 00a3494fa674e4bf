//! `PostgreSQL` implementation of the user repository.

use async_trait::async_trait;
use idp_model::{User, UserLoginKey};
use idp_storage::error::StorageResult;
use idp_storage::{StorageError, UserRepository};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::entities::UserRow;
use crate::error::{from_sqlx_error, not_found};

/// `PostgreSQL` user repository, bound to the unit of work's transaction.
pub struct SqlUserRepository<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
}

impl<'t> SqlUserRepository<'t> {
    /// Creates a repository adapter over the given transaction.
    #[must_use]
    pub fn new(tx: &'t mut Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository<'_> {
    async fn list(&mut self) -> StorageResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY user_name")
            .fetch_all(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&mut self, id: Uuid) -> StorageResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(User::from))
    }

    async fn get_by_normalized_user_name(
        &mut self,
        normalized_user_name: &str,
    ) -> StorageResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT * FROM users WHERE normalized_user_name = $1")
                .bind(normalized_user_name)
                .fetch_optional(&mut **self.tx)
                .await
                .map_err(from_sqlx_error)?;

        Ok(row.map(User::from))
    }

    async fn get_by_normalized_email(
        &mut self,
        normalized_email: &str,
    ) -> StorageResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT * FROM users WHERE normalized_email = $1")
                .bind(normalized_email)
                .fetch_optional(&mut **self.tx)
                .await
                .map_err(from_sqlx_error)?;

        Ok(row.map(User::from))
    }

    async fn get_by_login(&mut self, key: &UserLoginKey) -> StorageResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r"SELECT u.* FROM users u
            JOIN user_logins ul ON ul.user_id = u.id
            WHERE ul.login_provider = $1 AND ul.provider_key = $2",
        )
        .bind(&key.login_provider)
        .bind(&key.provider_key)
        .fetch_optional(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(row.map(User::from))
    }

    async fn get_by_claim(
        &mut self,
        claim_type: &str,
        claim_value: &str,
    ) -> StorageResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"SELECT u.* FROM users u
            JOIN user_claims uc ON uc.user_id = u.id
            JOIN claims c ON c.id = uc.id
            WHERE c.claim_type = $1 AND c.claim_value = $2
            ORDER BY u.user_name",
        )
        .bind(claim_type)
        .bind(claim_value)
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_normalized_role_name(
        &mut self,
        normalized_role_name: &str,
    ) -> StorageResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"SELECT u.* FROM users u
            JOIN user_roles ur ON ur.user_id = u.id
            JOIN roles r ON r.id = ur.role_id
            WHERE r.normalized_name = $1
            ORDER BY u.user_name",
        )
        .bind(normalized_role_name)
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn add(&mut self, user: &User) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO users (
                id, user_name, normalized_user_name, email, normalized_email,
                email_confirmed, password_hash, security_stamp, concurrency_stamp,
                phone_number, phone_number_confirmed, two_factor_enabled,
                lockout_end, lockout_enabled, access_failed_count
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(user.id)
        .bind(&user.user_name)
        .bind(&user.normalized_user_name)
        .bind(&user.email)
        .bind(&user.normalized_email)
        .bind(user.email_confirmed)
        .bind(&user.password_hash)
        .bind(&user.security_stamp)
        .bind(&user.concurrency_stamp)
        .bind(&user.phone_number)
        .bind(user.phone_number_confirmed)
        .bind(user.two_factor_enabled)
        .bind(user.lockout_end)
        .bind(user.lockout_enabled)
        .bind(user.access_failed_count)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn update(&mut self, user: &User) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE users SET
                user_name = $2, normalized_user_name = $3, email = $4,
                normalized_email = $5, email_confirmed = $6, password_hash = $7,
                security_stamp = $8, concurrency_stamp = $9, phone_number = $10,
                phone_number_confirmed = $11, two_factor_enabled = $12,
                lockout_end = $13, lockout_enabled = $14, access_failed_count = $15
            WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.user_name)
        .bind(&user.normalized_user_name)
        .bind(&user.email)
        .bind(&user.normalized_email)
        .bind(user.email_confirmed)
        .bind(&user.password_hash)
        .bind(&user.security_stamp)
        .bind(&user.concurrency_stamp)
        .bind(&user.phone_number)
        .bind(user.phone_number_confirmed)
        .bind(user.two_factor_enabled)
        .bind(user.lockout_end)
        .bind(user.lockout_enabled)
        .bind(user.access_failed_count)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("User", user.id));
        }

        Ok(())
    }

    async fn delete(&mut self, id: Uuid) -> StorageResult<()> {
        // Claims, logins, tokens and role memberships cascade.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found("User", id));
        }

        Ok(())
    }

    async fn add_to_role(
        &mut self,
        user_id: Uuid,
        normalized_role_name: &str,
    ) -> StorageResult<()> {
        let role_id: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM roles WHERE normalized_name = $1")
                .bind(normalized_role_name)
                .fetch_optional(&mut **self.tx)
                .await
                .map_err(from_sqlx_error)?;

        let Some((role_id,)) = role_id else {
            return Err(StorageError::not_found_by_name(
                "Role",
                normalized_role_name,
            ));
        };

        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn remove_from_role(
        &mut self,
        user_id: Uuid,
        normalized_role_name: &str,
    ) -> StorageResult<()> {
        sqlx::query(
            r"DELETE FROM user_roles ur
            USING roles r
            WHERE ur.role_id = r.id AND ur.user_id = $1 AND r.normalized_name = $2",
        )
        .bind(user_id)
        .bind(normalized_role_name)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }
}
