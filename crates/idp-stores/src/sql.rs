//! Store adapters over the `PostgreSQL` unit of work.
//!
//! Each adapter owns a [`SqlUnitOfWork`] constructed at request scope;
//! every write commits the unit of work so the next operation starts
//! clean. Dropping the adapter releases the backend.

use async_trait::async_trait;
use idp_api_types::{ClaimModel, LoginModel};
use idp_model::{UserLoginKey, UserToken, UserTokenKey};
use idp_storage::{
    RoleClaimRepository, RoleRepository, UserClaimRepository, UserLoginRepository,
    UserRepository, UserTokenRepository,
};
use idp_storage_sql::SqlUnitOfWork;
use tokio_util::sync::CancellationToken;

use crate::error::StoreResult;
use crate::guard::{ensure_not_blank, ensure_not_cancelled, parse_role_id, parse_user_id};
use crate::identity::{IdentityRole, IdentityUser};
use crate::role::{RoleClaimStore, RoleStore};
use crate::user::{
    UserClaimStore, UserEmailStore, UserLoginStore, UserRoleStore, UserStore, UserTokenStore,
};

/// User store backed by the `PostgreSQL` unit of work.
pub struct SqlUserStore {
    uow: SqlUnitOfWork,
}

impl SqlUserStore {
    /// Creates a store over an already-begun unit of work.
    #[must_use]
    pub fn new(uow: SqlUnitOfWork) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn create(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let entity = user.to_user()?;
        tracing::debug!(user_id = %entity.id, "creating user");

        self.uow.users().add(&entity).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn update(
        &mut self,
        user: &mut IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        user.touch_concurrency_stamp();
        let entity = user.to_user()?;

        self.uow.users().update(&entity).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn delete(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let user_id = user.uuid()?;
        tracing::debug!(%user_id, "deleting user");

        self.uow.users().delete(user_id).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn find_by_id(
        &mut self,
        user_id: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>> {
        ensure_not_cancelled(token)?;
        let user_id = parse_user_id(user_id)?;

        let user = self.uow.users().get_by_id(user_id).await?;
        Ok(user.map(IdentityUser::from))
    }

    async fn find_by_name(
        &mut self,
        normalized_user_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_user_name, "normalized_user_name")?;

        let user = self
            .uow
            .users()
            .get_by_normalized_user_name(normalized_user_name)
            .await?;
        Ok(user.map(IdentityUser::from))
    }
}

#[async_trait]
impl UserEmailStore for SqlUserStore {
    async fn find_by_email(
        &mut self,
        normalized_email: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_email, "normalized_email")?;

        let user = self
            .uow
            .users()
            .get_by_normalized_email(normalized_email)
            .await?;
        Ok(user.map(IdentityUser::from))
    }
}

#[async_trait]
impl UserLoginStore for SqlUserStore {
    async fn add_login(
        &mut self,
        user: &IdentityUser,
        login: &LoginModel,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(&login.login_provider, "login_provider")?;
        ensure_not_blank(&login.provider_key, "provider_key")?;
        let entity = login.clone().into_user_login(user.uuid()?);

        self.uow.user_logins().add(&entity).await?;
        self.uow.commit().await?;
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
        user.uuid()?;
        let key = UserLoginKey::new(login_provider, provider_key);

        self.uow.user_logins().delete(&key).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn get_logins(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<LoginModel>> {
        ensure_not_cancelled(token)?;
        let user_id = user.uuid()?;

        let logins = self.uow.user_logins().get_by_user(user_id).await?;
        Ok(logins.into_iter().map(LoginModel::from).collect())
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
        let key = UserLoginKey::new(login_provider, provider_key);

        let user = self.uow.users().get_by_login(&key).await?;
        Ok(user.map(IdentityUser::from))
    }
}

#[async_trait]
impl UserRoleStore for SqlUserStore {
    async fn add_to_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_role_name, "normalized_role_name")?;
        let user_id = user.uuid()?;

        self.uow
            .users()
            .add_to_role(user_id, normalized_role_name)
            .await?;
        self.uow.commit().await?;
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
        let user_id = user.uuid()?;

        self.uow
            .users()
            .remove_from_role(user_id, normalized_role_name)
            .await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn get_roles(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<String>> {
        ensure_not_cancelled(token)?;
        let user_id = user.uuid()?;

        Ok(self.uow.roles().names_for_user(user_id).await?)
    }

    async fn is_in_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<bool> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_role_name, "normalized_role_name")?;
        let user_id = user.uuid()?;

        let roles = self.uow.roles().names_for_user(user_id).await?;
        Ok(roles
            .iter()
            .any(|r| r.eq_ignore_ascii_case(normalized_role_name)))
    }

    async fn get_users_in_role(
        &mut self,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Vec<IdentityUser>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_role_name, "normalized_role_name")?;

        let users = self
            .uow
            .users()
            .get_by_normalized_role_name(normalized_role_name)
            .await?;
        Ok(users.into_iter().map(IdentityUser::from).collect())
    }
}

#[async_trait]
impl UserClaimStore for SqlUserStore {
    async fn get_claims(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<ClaimModel>> {
        ensure_not_cancelled(token)?;
        let user_id = user.uuid()?;

        let claims = self.uow.user_claims().get_by_user(user_id).await?;
        Ok(claims.into_iter().map(ClaimModel::from).collect())
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
            let entity = claim.clone().into_user_claim(user_id);
            self.uow.user_claims().add(&entity).await?;
        }
        self.uow.commit().await?;
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
        let user_id = user.uuid()?;

        let existing = self.uow.user_claims().get_by_user(user_id).await?;
        for mut entity in existing {
            if entity.matches(&claim.claim_type, &claim.claim_value) {
                entity.claim_type = new_claim.claim_type.clone();
                entity.claim_value = new_claim.claim_value.clone();
                self.uow.user_claims().update(&entity).await?;
            }
        }
        self.uow.commit().await?;
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

        let existing = self.uow.user_claims().get_by_user(user_id).await?;
        for claim in claims {
            for entity in existing
                .iter()
                .filter(|e| e.matches(&claim.claim_type, &claim.claim_value))
            {
                self.uow.user_claims().delete(entity.id).await?;
            }
        }
        self.uow.commit().await?;
        Ok(())
    }

    async fn get_users_for_claim(
        &mut self,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<Vec<IdentityUser>> {
        ensure_not_cancelled(token)?;

        let users = self
            .uow
            .users()
            .get_by_claim(&claim.claim_type, &claim.claim_value)
            .await?;
        Ok(users.into_iter().map(IdentityUser::from).collect())
    }
}

#[async_trait]
impl UserTokenStore for SqlUserStore {
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
        let user_id = user.uuid()?;
        let entity = UserToken::new(user_id, login_provider, name, value);

        let existing = self.uow.user_tokens().get_by_key(&entity.key()).await?;
        if existing.is_some() {
            self.uow.user_tokens().update(&entity).await?;
        } else {
            self.uow.user_tokens().add(&entity).await?;
        }
        self.uow.commit().await?;
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
        let key = UserTokenKey::new(user.uuid()?, login_provider, name);

        self.uow.user_tokens().delete(&key).await?;
        self.uow.commit().await?;
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
        let key = UserTokenKey::new(user.uuid()?, login_provider, name);

        let found = self.uow.user_tokens().get_by_key(&key).await?;
        Ok(found.and_then(|t| t.value))
    }
}

/// Role store backed by the `PostgreSQL` unit of work.
pub struct SqlRoleStore {
    uow: SqlUnitOfWork,
}

impl SqlRoleStore {
    /// Creates a store over an already-begun unit of work.
    #[must_use]
    pub fn new(uow: SqlUnitOfWork) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl RoleStore for SqlRoleStore {
    async fn create(
        &mut self,
        role: &IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let entity = role.to_role()?;
        tracing::debug!(role_id = %entity.id, "creating role");

        self.uow.roles().add(&entity).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn update(
        &mut self,
        role: &mut IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        role.touch_concurrency_stamp();
        let entity = role.to_role()?;

        self.uow.roles().update(&entity).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn delete(
        &mut self,
        role: &IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let role_id = role.uuid()?;

        self.uow.roles().delete(role_id).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn find_by_id(
        &mut self,
        role_id: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityRole>> {
        ensure_not_cancelled(token)?;
        let role_id = parse_role_id(role_id)?;

        let role = self.uow.roles().get_by_id(role_id).await?;
        Ok(role.map(IdentityRole::from))
    }

    async fn find_by_name(
        &mut self,
        normalized_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityRole>> {
        ensure_not_cancelled(token)?;
        ensure_not_blank(normalized_name, "normalized_name")?;

        let role = self.uow.roles().get_by_normalized_name(normalized_name).await?;
        Ok(role.map(IdentityRole::from))
    }
}

#[async_trait]
impl RoleClaimStore for SqlRoleStore {
    async fn get_claims(
        &mut self,
        role: &IdentityRole,
        token: &CancellationToken,
    ) -> StoreResult<Vec<ClaimModel>> {
        ensure_not_cancelled(token)?;
        let role_id = role.uuid()?;

        let claims = self.uow.role_claims().get_by_role(role_id).await?;
        Ok(claims.into_iter().map(ClaimModel::from).collect())
    }

    async fn add_claim(
        &mut self,
        role: &IdentityRole,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let entity = claim.clone().into_role_claim(role.uuid()?);

        self.uow.role_claims().add(&entity).await?;
        self.uow.commit().await?;
        Ok(())
    }

    async fn remove_claim(
        &mut self,
        role: &IdentityRole,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()> {
        ensure_not_cancelled(token)?;
        let role_id = role.uuid()?;

        let existing = self.uow.role_claims().get_by_role(role_id).await?;
        for entity in existing
            .iter()
            .filter(|e| e.matches(&claim.claim_type, &claim.claim_value))
        {
            self.uow.role_claims().delete(entity.id).await?;
        }
        self.uow.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use uuid::Uuid;

    #[test]
    fn malformed_ids_are_rejected_before_io() {
        assert!(matches!(
            parse_user_id("not-a-uuid"),
            Err(StoreError::InvalidUserId(_))
        ));
        assert!(matches!(
            parse_role_id(""),
            Err(StoreError::InvalidRoleId(_))
        ));
        assert!(parse_user_id(&Uuid::now_v7().to_string()).is_ok());
    }
}
