//! Identity API router configuration.

use axum::routing::{get, post};
use axum::Router;

use crate::state::ServiceState;
use crate::{role, user};

/// Creates the `/api/identity` router.
///
/// # Example
///
/// ```ignore
/// let state = ServiceState::new(pool);
/// let app = identity_router().with_state(state);
/// ```
#[must_use]
pub fn identity_router() -> Router<ServiceState> {
    Router::new()
        // User endpoints
        .route(
            "/api/identity/user",
            post(user::create_user).put(user::update_user),
        )
        .route("/api/identity/user/email", get(user::find_user_by_email))
        .route("/api/identity/user/name", get(user::find_user_by_name))
        .route("/api/identity/user/login", get(user::find_user_by_login))
        .route("/api/identity/user/claim", get(user::get_users_for_claim))
        .route("/api/identity/user/role", get(user::get_users_in_role))
        .route(
            "/api/identity/user/{userId}",
            get(user::find_user_by_id).delete(user::delete_user),
        )
        .route(
            "/api/identity/user/{userId}/claim",
            post(user::add_user_claim)
                .put(user::replace_user_claim)
                .delete(user::remove_user_claim),
        )
        .route(
            "/api/identity/user/{userId}/claims",
            get(user::get_user_claims),
        )
        .route(
            "/api/identity/user/{userId}/login",
            post(user::add_user_login).delete(user::remove_user_login),
        )
        .route(
            "/api/identity/user/{userId}/logins",
            get(user::get_user_logins),
        )
        .route(
            "/api/identity/user/{userId}/role",
            post(user::add_user_to_role).delete(user::remove_user_from_role),
        )
        .route(
            "/api/identity/user/{userId}/roles",
            get(user::get_user_roles),
        )
        .route(
            "/api/identity/user/{userId}/token",
            post(user::set_user_token).delete(user::remove_user_token),
        )
        .route(
            "/api/identity/user/{userId}/tokens",
            get(user::get_user_tokens),
        )
        // Role endpoints
        .route(
            "/api/identity/role",
            post(role::create_role).put(role::update_role),
        )
        .route("/api/identity/role/name", get(role::find_role_by_name))
        .route(
            "/api/identity/role/{roleId}",
            get(role::find_role_by_id).delete(role::delete_role),
        )
        .route(
            "/api/identity/role/{roleId}/claim",
            post(role::add_role_claim).delete(role::remove_role_claim),
        )
        .route(
            "/api/identity/role/{roleId}/claims",
            get(role::get_role_claims),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_builds() {
        // Route registration panics on malformed or conflicting paths.
        let _router = identity_router();
    }
}
