//! Login repository trait.

use async_trait::async_trait;
use idp_model::{UserLogin, UserLoginKey};
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence operations for external logins.
#[async_trait]
pub trait UserLoginRepository {
    /// Lists all logins.
    async fn list(&mut self) -> StorageResult<Vec<UserLogin>>;

    /// Gets all logins for the given user.
    async fn get_by_user(&mut self, user_id: Uuid) -> StorageResult<Vec<UserLogin>>;

    /// Gets a login by its composite key.
    async fn get_by_key(&mut self, key: &UserLoginKey) -> StorageResult<Option<UserLogin>>;

    /// Inserts a new login.
    async fn add(&mut self, login: &UserLogin) -> StorageResult<()>;

    /// Updates a login's display name and owner.
    async fn update(&mut self, login: &UserLogin) -> StorageResult<()>;

    /// Deletes a login by its composite key.
    async fn delete(&mut self, key: &UserLoginKey) -> StorageResult<()>;
}
