//! `PostgreSQL` implementation of the token repository.

use async_trait::async_trait;
use idp_model::{UserToken, UserTokenKey};
use idp_storage::error::StorageResult;
use idp_storage::UserTokenRepository;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::entities::UserTokenRow;
use crate::error::from_sqlx_error;

/// `PostgreSQL` token repository, bound to the unit of work's transaction.
pub struct SqlUserTokenRepository<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
}

impl<'t> SqlUserTokenRepository<'t> {
    /// Creates a repository adapter over the given transaction.
    #[must_use]
    pub fn new(tx: &'t mut Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl UserTokenRepository for SqlUserTokenRepository<'_> {
    async fn list(&mut self) -> StorageResult<Vec<UserToken>> {
        let rows: Vec<UserTokenRow> = sqlx::query_as("SELECT * FROM user_tokens")
            .fetch_all(&mut **self.tx)
            .await
            .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(UserToken::from).collect())
    }

    async fn get_by_user(&mut self, user_id: Uuid) -> StorageResult<Vec<UserToken>> {
        let rows: Vec<UserTokenRow> = sqlx::query_as(
            "SELECT * FROM user_tokens WHERE user_id = $1 ORDER BY login_provider, name",
        )
        .bind(user_id)
        .fetch_all(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(UserToken::from).collect())
    }

    async fn get_by_key(&mut self, key: &UserTokenKey) -> StorageResult<Option<UserToken>> {
        let row: Option<UserTokenRow> = sqlx::query_as(
            r"SELECT * FROM user_tokens
            WHERE user_id = $1 AND login_provider = $2 AND name = $3",
        )
        .bind(key.user_id)
        .bind(&key.login_provider)
        .bind(&key.name)
        .fetch_optional(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(row.map(UserToken::from))
    }

    async fn add(&mut self, token: &UserToken) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO user_tokens (user_id, login_provider, name, value)
            VALUES ($1, $2, $3, $4)",
        )
        .bind(token.user_id)
        .bind(&token.login_provider)
        .bind(&token.name)
        .bind(&token.value)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn update(&mut self, token: &UserToken) -> StorageResult<()> {
        sqlx::query(
            r"UPDATE user_tokens SET value = $4
            WHERE user_id = $1 AND login_provider = $2 AND name = $3",
        )
        .bind(token.user_id)
        .bind(&token.login_provider)
        .bind(&token.name)
        .bind(&token.value)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn delete(&mut self, key: &UserTokenKey) -> StorageResult<()> {
        sqlx::query(
            r"DELETE FROM user_tokens
            WHERE user_id = $1 AND login_provider = $2 AND name = $3",
        )
        .bind(key.user_id)
        .bind(&key.login_provider)
        .bind(&key.name)
        .execute(&mut **self.tx)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }
}
