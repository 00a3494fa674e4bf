//! Claim repository traits.
//!
//! Claim rows live in a shared table; the user/role link lives in a join
//! table, so every mutation here is a pair of statements.

use async_trait::async_trait;
use idp_model::{RoleClaim, UserClaim};
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence operations for user claims.
#[async_trait]
pub trait UserClaimRepository {
    /// Lists all user claims.
    async fn list(&mut self) -> StorageResult<Vec<UserClaim>>;

    /// Gets a claim by its database-assigned id.
    async fn get_by_id(&mut self, id: i64) -> StorageResult<Option<UserClaim>>;

    /// Gets all claims attached to the given user.
    async fn get_by_user(&mut self, user_id: Uuid) -> StorageResult<Vec<UserClaim>>;

    /// Inserts a claim and returns its database-assigned id.
    async fn add(&mut self, claim: &UserClaim) -> StorageResult<i64>;

    /// Updates a claim's type, value and owner.
    async fn update(&mut self, claim: &UserClaim) -> StorageResult<()>;

    /// Deletes a claim by id, removing both the claim row and its link.
    async fn delete(&mut self, id: i64) -> StorageResult<()>;
}

/// Persistence operations for role claims.
#[async_trait]
pub trait RoleClaimRepository {
    /// Lists all role claims.
    async fn list(&mut self) -> StorageResult<Vec<RoleClaim>>;

    /// Gets a claim by its database-assigned id.
    async fn get_by_id(&mut self, id: i64) -> StorageResult<Option<RoleClaim>>;

    /// Gets all claims attached to the given role.
    async fn get_by_role(&mut self, role_id: Uuid) -> StorageResult<Vec<RoleClaim>>;

    /// Inserts a claim and returns its database-assigned id.
    async fn add(&mut self, claim: &RoleClaim) -> StorageResult<i64>;

    /// Updates a claim's type, value and owner.
    async fn update(&mut self, claim: &RoleClaim) -> StorageResult<()>;

    /// Deletes a claim by id, removing both the claim row and its link.
    async fn delete(&mut self, id: i64) -> StorageResult<()>;
}
