//! Role repository trait.

use async_trait::async_trait;
use idp_model::Role;
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence operations for roles.
#[async_trait]
pub trait RoleRepository {
    /// Lists all roles.
    async fn list(&mut self) -> StorageResult<Vec<Role>>;

    /// Gets a role by id.
    async fn get_by_id(&mut self, id: Uuid) -> StorageResult<Option<Role>>;

    /// Gets a role by normalized name.
    async fn get_by_normalized_name(
        &mut self,
        normalized_name: &str,
    ) -> StorageResult<Option<Role>>;

    /// Gets the names of all roles the user belongs to.
    async fn names_for_user(&mut self, user_id: Uuid) -> StorageResult<Vec<String>>;

    /// Inserts a new role.
    async fn add(&mut self, role: &Role) -> StorageResult<()>;

    /// Updates an existing role.
    async fn update(&mut self, role: &Role) -> StorageResult<()>;

    /// Deletes a role by id.
    async fn delete(&mut self, id: Uuid) -> StorageResult<()>;
}
