//! User store capability traits.
//!
//! One narrow trait per backend-touching capability, composed by the
//! caller as needed. Pure per-record state (password hash, stamps,
//! lockout, phone, two-factor) lives on [`IdentityUser`] and is persisted
//! as a whole through [`UserStore::update`].
//!
//! Every method checks its cancellation token first and fails fast; it
//! does not propagate cancellation into in-flight I/O.

use async_trait::async_trait;
use idp_api_types::{ClaimModel, LoginModel};
use tokio_util::sync::CancellationToken;

use crate::error::StoreResult;
use crate::identity::IdentityUser;

/// Core user persistence.
#[async_trait]
pub trait UserStore {
    /// Persists a new user.
    async fn create(&mut self, user: &IdentityUser, token: &CancellationToken)
        -> StoreResult<()>;

    /// Persists the user's current state, rotating its concurrency stamp.
    async fn update(
        &mut self,
        user: &mut IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Deletes the user.
    async fn delete(&mut self, user: &IdentityUser, token: &CancellationToken)
        -> StoreResult<()>;

    /// Finds a user by its string id; `None` if no such user exists.
    async fn find_by_id(
        &mut self,
        user_id: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>>;

    /// Finds a user by normalized user name; `None` if no such user exists.
    async fn find_by_name(
        &mut self,
        normalized_user_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>>;
}

/// Email-based lookup.
#[async_trait]
pub trait UserEmailStore {
    /// Finds a user by normalized email; `None` if no such user exists.
    async fn find_by_email(
        &mut self,
        normalized_email: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>>;
}

/// External login management.
#[async_trait]
pub trait UserLoginStore {
    /// Links an external login to the user.
    async fn add_login(
        &mut self,
        user: &IdentityUser,
        login: &LoginModel,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Removes an external login from the user.
    async fn remove_login(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        provider_key: &str,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Lists the user's external logins.
    async fn get_logins(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<LoginModel>>;

    /// Finds the user linked to an external login; `None` if none is.
    async fn find_by_login(
        &mut self,
        login_provider: &str,
        provider_key: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<IdentityUser>>;
}

/// Role membership management.
#[async_trait]
pub trait UserRoleStore {
    /// Adds the user to the named role.
    ///
    /// ## Errors
    ///
    /// Fails if the role does not exist.
    async fn add_to_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Removes the user from the named role.
    async fn remove_from_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Lists the names of the roles the user belongs to.
    async fn get_roles(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<String>>;

    /// Checks membership in the named role (case-insensitively).
    async fn is_in_role(
        &mut self,
        user: &IdentityUser,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<bool>;

    /// Lists the users in the named role.
    async fn get_users_in_role(
        &mut self,
        normalized_role_name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Vec<IdentityUser>>;
}

/// Claim management.
#[async_trait]
pub trait UserClaimStore {
    /// Lists the user's claims.
    async fn get_claims(
        &mut self,
        user: &IdentityUser,
        token: &CancellationToken,
    ) -> StoreResult<Vec<ClaimModel>>;

    /// Attaches the given claims to the user.
    async fn add_claims(
        &mut self,
        user: &IdentityUser,
        claims: &[ClaimModel],
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Replaces every claim matching `claim` with `new_claim`.
    async fn replace_claim(
        &mut self,
        user: &IdentityUser,
        claim: &ClaimModel,
        new_claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Removes the given claims from the user.
    async fn remove_claims(
        &mut self,
        user: &IdentityUser,
        claims: &[ClaimModel],
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Lists the users holding the given claim.
    async fn get_users_for_claim(
        &mut self,
        claim: &ClaimModel,
        token: &CancellationToken,
    ) -> StoreResult<Vec<IdentityUser>>;
}

/// Named token management.
#[async_trait]
pub trait UserTokenStore {
    /// Sets (creates or overwrites) a named token for the user.
    async fn set_token(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        name: &str,
        value: &str,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Removes a named token from the user.
    async fn remove_token(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        name: &str,
        token: &CancellationToken,
    ) -> StoreResult<()>;

    /// Gets a named token's value; `None` if the token does not exist.
    async fn get_token(
        &mut self,
        user: &IdentityUser,
        login_provider: &str,
        name: &str,
        token: &CancellationToken,
    ) -> StoreResult<Option<String>>;
}
