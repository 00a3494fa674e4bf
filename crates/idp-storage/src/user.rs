//! User repository trait.

use async_trait::async_trait;
use idp_model::{User, UserLoginKey};
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence operations for users, including role membership.
#[async_trait]
pub trait UserRepository {
    /// Lists all users.
    async fn list(&mut self) -> StorageResult<Vec<User>>;

    /// Gets a user by id.
    async fn get_by_id(&mut self, id: Uuid) -> StorageResult<Option<User>>;

    /// Gets a user by normalized user name.
    async fn get_by_normalized_user_name(
        &mut self,
        normalized_user_name: &str,
    ) -> StorageResult<Option<User>>;

    /// Gets a user by normalized email.
    async fn get_by_normalized_email(
        &mut self,
        normalized_email: &str,
    ) -> StorageResult<Option<User>>;

    /// Gets the user linked to an external login.
    async fn get_by_login(&mut self, key: &UserLoginKey) -> StorageResult<Option<User>>;

    /// Gets all users holding the given claim.
    async fn get_by_claim(
        &mut self,
        claim_type: &str,
        claim_value: &str,
    ) -> StorageResult<Vec<User>>;

    /// Gets all users in the named role.
    async fn get_by_normalized_role_name(
        &mut self,
        normalized_role_name: &str,
    ) -> StorageResult<Vec<User>>;

    /// Inserts a new user.
    async fn add(&mut self, user: &User) -> StorageResult<()>;

    /// Updates an existing user.
    async fn update(&mut self, user: &User) -> StorageResult<()>;

    /// Deletes a user by id. Owned claims, logins, tokens and role
    /// memberships go with it.
    async fn delete(&mut self, id: Uuid) -> StorageResult<()>;

    /// Adds the user to the named role.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFoundByName` if no such role exists.
    async fn add_to_role(
        &mut self,
        user_id: Uuid,
        normalized_role_name: &str,
    ) -> StorageResult<()>;

    /// Removes the user from the named role.
    async fn remove_from_role(
        &mut self,
        user_id: Uuid,
        normalized_role_name: &str,
    ) -> StorageResult<()>;
}
