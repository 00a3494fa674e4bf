//! User operations against the identity API.

use idp_api_types::{
    AddRoleModel, ClaimModel, LoginModel, ReplaceUserClaimModel, TokenModel, UserModel,
};
use urlencoding::encode;
use uuid::Uuid;

use crate::client::IdentityApiClient;
use crate::error::ApiResult;

impl IdentityApiClient {
    /// Creates a user.
    pub async fn create_user(&self, user: &UserModel) -> ApiResult<()> {
        self.post_unit("/api/identity/user", user).await
    }

    /// Updates a user.
    pub async fn update_user(&self, user: &UserModel) -> ApiResult<()> {
        self.put_unit("/api/identity/user", user).await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, user_id: Uuid) -> ApiResult<()> {
        self.delete_unit(&format!("/api/identity/user/{user_id}"))
            .await
    }

    /// Finds a user by id; `None` if no such user exists.
    pub async fn find_user_by_id(&self, user_id: Uuid) -> ApiResult<Option<UserModel>> {
        self.get_json(&format!("/api/identity/user/{user_id}")).await
    }

    /// Finds a user by normalized email; `None` if no such user exists.
    pub async fn find_user_by_email(
        &self,
        normalized_email: &str,
    ) -> ApiResult<Option<UserModel>> {
        self.get_json(&format!(
            "/api/identity/user/email?normalizedEmail={}",
            encode(normalized_email)
        ))
        .await
    }

    /// Finds a user by normalized user name; `None` if no such user exists.
    pub async fn find_user_by_name(
        &self,
        normalized_user_name: &str,
    ) -> ApiResult<Option<UserModel>> {
        self.get_json(&format!(
            "/api/identity/user/name?normalizedUserName={}",
            encode(normalized_user_name)
        ))
        .await
    }

    /// Finds the user linked to an external login; `None` if none is.
    pub async fn find_user_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
    ) -> ApiResult<Option<UserModel>> {
        self.get_json(&format!(
            "/api/identity/user/login?loginProvider={}&providerKey={}",
            encode(login_provider),
            encode(provider_key)
        ))
        .await
    }

    /// Attaches a claim to a user.
    pub async fn add_user_claim(
        &self,
        user_id: Uuid,
        claim_type: &str,
        claim_value: &str,
    ) -> ApiResult<()> {
        let body = ClaimModel::new(claim_type, claim_value);
        self.post_unit(&format!("/api/identity/user/{user_id}/claim"), &body)
            .await
    }

    /// Removes a claim from a user.
    pub async fn remove_user_claim(
        &self,
        user_id: Uuid,
        claim_type: &str,
        claim_value: &str,
    ) -> ApiResult<()> {
        self.delete_unit(&format!(
            "/api/identity/user/{user_id}/claim?claimType={}&claimValue={}",
            encode(claim_type),
            encode(claim_value)
        ))
        .await
    }

    /// Replaces one of a user's claims with another.
    pub async fn replace_user_claim(
        &self,
        user_id: Uuid,
        claim: ClaimModel,
        new_claim: ClaimModel,
    ) -> ApiResult<()> {
        let body = ReplaceUserClaimModel { claim, new_claim };
        self.put_unit(&format!("/api/identity/user/{user_id}/claim"), &body)
            .await
    }

    /// Lists a user's claims.
    pub async fn get_user_claims(&self, user_id: Uuid) -> ApiResult<Vec<ClaimModel>> {
        self.get_json(&format!("/api/identity/user/{user_id}/claims"))
            .await
    }

    /// Lists the users holding the given claim.
    pub async fn get_users_for_claim(
        &self,
        claim_type: &str,
        claim_value: &str,
    ) -> ApiResult<Vec<UserModel>> {
        self.get_json(&format!(
            "/api/identity/user/claim?claimType={}&claimValue={}",
            encode(claim_type),
            encode(claim_value)
        ))
        .await
    }

    /// Links an external login to a user.
    pub async fn add_user_login(
        &self,
        user_id: Uuid,
        login_provider: &str,
        provider_key: &str,
        provider_display_name: Option<&str>,
    ) -> ApiResult<()> {
        let body = LoginModel {
            login_provider: login_provider.to_string(),
            provider_key: provider_key.to_string(),
            provider_display_name: provider_display_name.map(str::to_string),
        };
        self.post_unit(&format!("/api/identity/user/{user_id}/login"), &body)
            .await
    }

    /// Removes an external login from a user.
    pub async fn remove_user_login(
        &self,
        user_id: Uuid,
        login_provider: &str,
        provider_key: &str,
    ) -> ApiResult<()> {
        self.delete_unit(&format!(
            "/api/identity/user/{user_id}/login?loginProvider={}&providerKey={}",
            encode(login_provider),
            encode(provider_key)
        ))
        .await
    }

    /// Lists a user's external logins.
    pub async fn get_user_logins(&self, user_id: Uuid) -> ApiResult<Vec<LoginModel>> {
        self.get_json(&format!("/api/identity/user/{user_id}/logins"))
            .await
    }

    /// Adds a user to the named role.
    pub async fn add_user_to_role(&self, user_id: Uuid, role_name: &str) -> ApiResult<()> {
        let body = AddRoleModel {
            role_name: role_name.to_string(),
        };
        self.post_unit(&format!("/api/identity/user/{user_id}/role"), &body)
            .await
    }

    /// Removes a user from the named role.
    pub async fn remove_user_from_role(&self, user_id: Uuid, role_name: &str) -> ApiResult<()> {
        self.delete_unit(&format!(
            "/api/identity/user/{user_id}/role?roleName={}",
            encode(role_name)
        ))
        .await
    }

    /// Lists the names of the roles a user belongs to.
    pub async fn get_user_roles(&self, user_id: Uuid) -> ApiResult<Vec<String>> {
        self.get_json(&format!("/api/identity/user/{user_id}/roles"))
            .await
    }

    /// Lists the users in the named role.
    pub async fn get_users_in_role(&self, role_name: &str) -> ApiResult<Vec<UserModel>> {
        self.get_json(&format!(
            "/api/identity/user/role?roleName={}",
            encode(role_name)
        ))
        .await
    }

    /// Checks whether a user belongs to the named role
    /// (case-insensitively).
    pub async fn is_user_in_role(&self, user_id: Uuid, role_name: &str) -> ApiResult<bool> {
        let roles = self.get_user_roles(user_id).await?;
        Ok(roles.iter().any(|r| r.eq_ignore_ascii_case(role_name)))
    }

    /// Sets (creates or overwrites) a named token for a user.
    pub async fn set_user_token(
        &self,
        user_id: Uuid,
        login_provider: &str,
        name: &str,
        value: &str,
    ) -> ApiResult<()> {
        let body = TokenModel {
            login_provider: login_provider.to_string(),
            name: name.to_string(),
            value: Some(value.to_string()),
        };
        self.post_unit(&format!("/api/identity/user/{user_id}/token"), &body)
            .await
    }

    /// Removes a named token from a user.
    pub async fn remove_user_token(
        &self,
        user_id: Uuid,
        login_provider: &str,
        name: &str,
    ) -> ApiResult<()> {
        self.delete_unit(&format!(
            "/api/identity/user/{user_id}/token?loginProvider={}&name={}",
            encode(login_provider),
            encode(name)
        ))
        .await
    }

    /// Lists a user's tokens.
    pub async fn get_user_tokens(&self, user_id: Uuid) -> ApiResult<Vec<TokenModel>> {
        self.get_json(&format!("/api/identity/user/{user_id}/tokens"))
            .await
    }
}
