//! `PostgreSQL` implementation of the login repository.

use async_trait::async_trait;
use idp_model::{UserLogin, UserLoginKey};
use idp_storage::error::StorageResult;
use idp_storage::UserLoginRepository;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::entities::UserLoginRow;
use crate::error::from_sqlx_error;

/// `PostgreSQL` login repository, bound to the unit of work's transaction.
pub struct SqlUserLoginRepository<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
}

impl<'t> SqlUserLoginRepository<'t> {
    /// Creates a repository adapter over the given transaction.
    #[must_use]
    pub fn new(tx: &'t mut Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl UserLoginRepository for SqlUserLoginRepository<'_> {
    async fn list(&mut self) -> StorageResult<Vec<UserLogin>> {
        let rows: Vec<UserLoginRow> = sqlx::query_as("SELECT * FROM user_logins")
            .fetch_all(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(UserLogin::from).collect())
    }

    async fn get_by_user(&mut self, user_id: Uuid) -> StorageResult<Vec<UserLogin>> {
        let rows: Vec<UserLoginRow> = sqlx::query_as(
            "SELECT * FROM user_logins WHERE user_id = $1 ORDER BY login_provider",
        )
        .bind(user_id)
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(UserLogin::from).collect())
    }

    async fn get_by_key(&mut self, key: &UserLoginKey) -> StorageResult<Option<UserLogin>> {
        let row: Option<UserLoginRow> = sqlx::query_as(
            "SELECT * FROM user_logins WHERE login_provider = $1 AND provider_key = $2",
        )
        .bind(&key.login_provider)
        .bind(&key.provider_key)
        .fetch_optional(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(row.map(UserLogin::from))
    }

    async fn add(&mut self, login: &UserLogin) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO user_logins (login_provider, provider_key, provider_display_name, user_id)
            VALUES ($1, $2, $3, $4)",
        )
        .bind(&login.login_provider)
        .bind(&login.provider_key)
        .bind(&login.provider_display_name)
        .bind(login.user_id)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn update(&mut self, login: &UserLogin) -> StorageResult<()> {
        sqlx::query(
            r"UPDATE user_logins SET provider_display_name = $3, user_id = $4
            WHERE login_provider = $1 AND provider_key = $2",
        )
        .bind(&login.login_provider)
        .bind(&login.provider_key)
        .bind(&login.provider_display_name)
        .bind(login.user_id)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn delete(&mut self, key: &UserLoginKey) -> StorageResult<()> {
        sqlx::query("DELETE FROM user_logins WHERE login_provider = $1 AND provider_key = $2")
            .bind(&key.login_provider)
            .bind(&key.provider_key)
            .execute(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(())
    }
}
