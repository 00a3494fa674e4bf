//! Role store capability traits.

use async_trait::async_trait;
use idp_api_types::ClaimModel;
use tokio_util::sync::CancellationToken;

use crate::error::StoreResult;
use crate::identity::IdentityRole;

/// Core role persistence.
#[async_trait]
pub trait RoleStore {
    /// Persists a new role.
    async fn create(&mut self, role: &IdentityRole, token: &CancellationToken)
        -> StoreResult<()>;

    /// Persists the role's current state, rotating its concurrency stamp.
    async fn update(
        &mut self,
        role: &mut IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Deletes the role.
    async fn delete(&mut self, role: &IdentityRole, token: &CancellationToken)
        -> StoreResult<()>;

    /// Finds a role by its string id; `None` if no such role exists.
    async fn find_by_id(
        &mut self,
        role_id: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityRole>>;

    /// Finds a role by normalized name; `None` if no such role exists.
    async fn find_by_name(
        &mut self,
        normalized_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityRole>>;
}

/// Role claim management.
#[async_trait]
pub trait RoleClaimStore {
    /// Lists the role's claims.
    async fn get_claims(
        &mut self,
        role: &IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<Vec<ClaimModel>>;

    /// Attaches a claim to the role.
    async fn add_claim(
        &mut self,
        role: &IdentityRole,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Removes a claim from the role.
    async fn remove_claim(
        &mut self,
        role: &IdentityRole,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()>;
}
