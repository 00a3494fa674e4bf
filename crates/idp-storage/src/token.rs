//! Token repository trait.

use async_trait::async_trait;
use idp_model::{UserToken, UserTokenKey};
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence operations for user tokens.
#[async_trait]
pub trait UserTokenRepository {
    /// Lists all tokens.
    async fn list(&mut self) -> StorageResult<Vec<UserToken>>;

    /// Gets all tokens for the given user.
    async fn get_by_user(&mut self, user_id: Uuid) -> StorageResult<Vec<UserToken>>;

    /// Gets a token by its composite key.
    async fn get_by_key(&mut self, key: &UserTokenKey) -> StorageResult<Option<UserToken>>;

    /// Inserts a new token.
    async fn add(&mut self, token: &UserToken) -> StorageResult<()>;

    /// Updates a token's value.
    async fn update(&mut self, token: &UserToken) -> StorageResult<()>;

    /// Deletes a token by its composite key.
    async fn delete(&mut self, key: &UserTokenKey) -> StorageResult<()>;
}
