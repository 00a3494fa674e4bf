//! Role operations against the identity API.

use idp_api_types::{ClaimModel, RoleModel};
use urlencoding::encode;
use uuid::Uuid;

use crate::client::IdentityApiClient;
use crate::error::ApiResult;

impl IdentityApiClient {
    /// Creates a role.
    pub async fn create_role(&self, role: &RoleModel) -> ApiResult<()> {
        self.post_unit("/api/identity/role", role).await
    }

    /// Updates a role.
    pub async fn update_role(&self, role: &RoleModel) -> ApiResult<()> {
        self.put_unit("/api/identity/role", role).await
    }

    /// Deletes a role.
    pub async fn delete_role(&self, role_id: Uuid) -> ApiResult<()> {
        self.delete_unit(&format!("/api/identity/role/{role_id}"))
            .await
    }

    /// Finds a role by id; `None` if no such role exists.
    pub async fn find_role_by_id(&self, role_id: Uuid) -> ApiResult<Option<RoleModel>> {
        self.get_json(&format!("/api/identity/role/{role_id}")).await
    }

    /// Finds a role by normalized name; `None` if no such role exists.
    pub async fn find_role_by_name(
        &self,
        normalized_name: &str,
    ) -> ApiResult<Option<RoleModel>> {
        self.get_json(&format!(
            "/api/identity/role/name?normalizedName={}",
            encode(normalized_name)
        ))
        .await
    }

    /// Attaches a claim to a role.
    pub async fn add_role_claim(
        &self,
        role_id: Uuid,
        claim_type: &str,
        claim_value: &str,
    ) -> ApiResult<()> {
        let body = ClaimModel::new(claim_type, claim_value);
        self.post_unit(&format!("/api/identity/role/{role_id}/claim"), &body)
            .await
    }

    /// Removes a claim from a role.
    pub async fn remove_role_claim(
        &self,
        role_id: Uuid,
        claim_type: &str,
        claim_value: &str,
    ) -> ApiResult<()> {
        self.delete_unit(&format!(
            "/api/identity/role/{role_id}/claim?claimType={}&claimValue={}",
            encode(claim_type),
            encode(claim_value)
        ))
        .await
    }

    /// Lists a role's claims.
    pub async fn get_role_claims(&self, role_id: Uuid) -> ApiResult<Vec<ClaimModel>> {
        self.get_json(&format!("/api/identity/role/{role_id}/claims"))
            .await
    }
}
