//! Store adapters over the identity API client.
//!
//! Each method maps to one HTTP call; there is no cross-call atomicity on
//! this backend. The client is shared, so several adapters can point at
//! the same service.

use std::sync::Arc;

use async_trait::async_trait;
use idp_api_client::IdentityApiClient;
use idp_api_types::{ClaimModel, LoginModel, RoleModel, UserModel};
use tokio_util::sync::CancellationToken;

use crate::error::StoreResult;
use crate::guard::{ensure_not_blank, ensure_not_cancelled, parse_role_id, parse_user_id};
use crate::identity::{IdentityRole, IdentityUser};
use crate::role::{RoleClaimStore, RoleStore};
use crate::user::{
    UserClaimStore, UserEmailStore, UserLoginStore, UserRoleStore, UserStore, UserTokenStore,
};

fn user_from_model(model: UserModel) -> IdentityUser {
    IdentityUser::from(model.into_user())
}

fn role_from_model(model: RoleModel) -> IdentityRole {
    IdentityRole::from(model.into_role())
}

/// User store backed by the identity API service.
pub struct ApiUserStore {
    client: Arc<IdentityApiClient>,
}

impl ApiUserStore {
    /// Creates a store over the given client.
    #[must_use]
    pub fn new(client: Arc<IdentityApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserStore for ApiUserStore {
    async fn create(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let model = UserModel::from(user.to_user()?);
        tracing::debug!(user_id = %model.id, "creating user via api");

        self.client.create_user(&model).await?;
        Ok(())
    }

    async fn update(
        &mut self,
        user: &mut IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        user.touch_concurrency_stamp();
        let model = UserModel::from(user.to_user()?);

        self.client.update_user(&model).await?;
        Ok(())
    }

    async fn delete(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let user_id = user.uuid()?;
        tracing::debug!(%user_id, "deleting user via api");

        self.client.delete_user(user_id).await?;
        Ok(())
    }

    async fn find_by_id(
        &mut self,
        user_id: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>> {
        ensure_not_cancelled(token)?;
        let user_id = parse_user_id(user_id)?;

        let model = self.client.find_user_by_id(user_id).await?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_name(
        &mut self,
        normalized_user_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_user_name, "normalized_user_name")?;

        let model = self.client.find_user_by_name(normalized_user_name).await?;
        Ok(model.map(user_from_model))
    }
}

#[async_trait]
impl UserEmailStore for ApiUserStore {
    async fn find_by_email(
        &mut self,
        normalized_email: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_email, "normalized_email")?;

        let model = self.client.find_user_by_email(normalized_email).await?;
        Ok(model.map(user_from_model))
    }
}

#[async_trait]
impl UserLoginStore for ApiUserStore {
    async fn add_login(
        &mut self,
        user: &IdentityUser,
        login: &LoginModel,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(&login.login_provider, "login_provider")?;
        ensure_not_blank(&login.provider_key, "provider_key")?;

        self.client
            .add_user_login(
                user.uuid()?,
                &login.login_provider,
                &login.provider_key,
                login.provider_display_name.as_deref(),
            )
            .await?;
        Ok(())
    }

    async fn remove_login(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        provider_key: &str,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(login_provider, "login_provider")?;
        ensure_not_blank(provider_key, "provider_key")?;

        self.client
            .remove_user_login(user.uuid()?, login_provider, provider_key)
            .await?;
        Ok(())
    }

    async fn get_logins(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<LoginModel>> {
        ensure_not_cancelled(token)?;

        Ok(self.client.get_user_logins(user.uuid()?).await?)
    }

    async fn find_by_login(
        &mut self,
        login_provider: &str,
        provider_key: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(login_provider, "login_provider")?;
        ensure_not_blank(provider_key, "provider_key")?;

        let model = self
            .client
            .find_user_by_login(login_provider, provider_key)
            .await?;
        Ok(model.map(user_from_model))
    }
}

#[async_trait]
impl UserRoleStore for ApiUserStore {
    async fn add_to_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_role_name, "normalized_role_name")?;

        self.client
            .add_user_to_role(user.uuid()?, normalized_role_name)
            .await?;
        Ok(())
    }

    async fn remove_from_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_role_name, "normalized_role_name")?;

        self.client
            .remove_user_from_role(user.uuid()?, normalized_role_name)
            .await?;
        Ok(())
    }

    async fn get_roles(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<String>> {
        ensure_not_cancelled(token)?;

        Ok(self.client.get_user_roles(user.uuid()?).await?)
    }

    async fn is_in_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<bool> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_role_name, "normalized_role_name")?;

        Ok(self
            .client
            .is_user_in_role(user.uuid()?, normalized_role_name)
            .await?)
    }

    async fn get_users_in_role(
        &mut self,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Vec<IdentityUser>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_role_name, "normalized_role_name")?;

        let models = self.client.get_users_in_role(normalized_role_name).await?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

#[async_trait]
impl UserClaimStore for ApiUserStore {
    async fn get_claims(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<ClaimModel>> {
        ensure_not_cancelled(token)?;

        Ok(self.client.get_user_claims(user.uuid()?).await?)
    }

    async fn add_claims(
        &mut self,
        user: &IdentityUser,
        claims: &[ClaimModel],
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let user_id = user.uuid()?;

        for claim in claims {
            self.client
                .add_user_claim(user_id, &claim.claim_type, &claim.claim_value)
                .await?;
        }
        Ok(())
    }

    async fn replace_claim(
        &mut self,
        user: &IdentityUser,
        claim: &ClaimModel,
        new_claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;

        self.client
            .replace_user_claim(user.uuid()?, claim.clone(), new_claim.clone())
            .await?;
        Ok(())
    }

    async fn remove_claims(
        &mut self,
        user: &IdentityUser,
        claims: &[ClaimModel],
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let user_id = user.uuid()?;

        for claim in claims {
            self.client
                .remove_user_claim(user_id, &claim.claim_type, &claim.claim_value)
                .await?;
        }
        Ok(())
    }

    async fn get_users_for_claim(
        &mut self,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<Vec<IdentityUser>> {
        ensure_not_cancelled(token)?;

        let models = self
            .client
            .get_users_for_claim(&claim.claim_type, &claim.claim_value)
            .await?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

#[async_trait]
impl UserTokenStore for ApiUserStore {
    async fn set_token(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        name: &str,
        value: &str,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(login_provider, "login_provider")?;
        ensure_not_blank(name, "name")?;

        self.client
            .set_user_token(user.uuid()?, login_provider, name, value)
            .await?;
        Ok(())
    }

    async fn remove_token(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        name: &str,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(login_provider, "login_provider")?;
        ensure_not_blank(name, "name")?;

        self.client
            .remove_user_token(user.uuid()?, login_provider, name)
            .await?;
        Ok(())
    }

    async fn get_token(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<String>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(login_provider, "login_provider")?;
        ensure_not_blank(name, "name")?;

        // The service exposes the token collection, not single-token reads.
        let tokens = self.client.get_user_tokens(user.uuid()?).await?;
        Ok(tokens
            .into_iter()
            .find(|t| t.login_provider == login_provider && t.name == name)
            .and_then(|t| t.value))
    }
}

/// Role store backed by the identity API service.
pub struct ApiRoleStore {
    client: Arc<IdentityApiClient>,
}

impl ApiRoleStore {
    /// Creates a store over the given client.
    #[must_use]
    pub fn new(client: Arc<IdentityApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleStore for ApiRoleStore {
    async fn create(
        &mut self,
        role: &IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let model = RoleModel::from(role.to_role()?);
        tracing::debug!(role_id = %model.id, "creating role via api");

        self.client.create_role(&model).await?;
        Ok(())
    }

    async fn update(
        &mut self,
        role: &mut IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        role.touch_concurrency_stamp();
        let model = RoleModel::from(role.to_role()?);

        self.client.update_role(&model).await?;
        Ok(())
    }

    async fn delete(
        &mut self,
        role: &IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;

        self.client.delete_role(role.uuid()?).await?;
        Ok(())
    }

    async fn find_by_id(
        &mut self,
        role_id: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityRole>> {
        ensure_not_cancelled(token)?;
        let role_id = parse_role_id(role_id)?;

        let model = self.client.find_role_by_id(role_id).await?;
        Ok(model.map(role_from_model))
    }

    async fn find_by_name(
        &mut self,
        normalized_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityRole>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_name, "normalized_name")?;

        let model = self.client.find_role_by_name(normalized_name).await?;
        Ok(model.map(role_from_model))
    }
}

#[async_trait]
impl RoleClaimStore for ApiRoleStore {
    async fn get_claims(
        &mut self,
        role: &IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<Vec<ClaimModel>> {
        ensure_not_cancelled(token)?;

        Ok(self.client.get_role_claims(role.uuid()?).await?)
    }

    async fn add_claim(
        &mut self,
        role: &IdentityRole,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;

        self.client
            .add_role_claim(role.uuid()?, &claim.claim_type, &claim.claim_value)
            .await?;
        Ok(())
    }

    async fn remove_claim(
        &mut self,
        role: &IdentityRole,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;

        self.client
            .remove_role_claim(role.uuid()?, &claim.claim_type, &claim.claim_value)
            .await?;
        Ok(())
    }
}
