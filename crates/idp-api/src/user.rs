//! User handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use idp_api_types::{
    AddRoleModel, ClaimModel, LoginModel, ReplaceUserClaimModel, TokenModel, UserModel,
};
use idp_model::{UserLoginKey, UserToken, UserTokenKey};
use idp_storage::{
    RoleRepository, UserClaimRepository, UserLoginRepository, UserRepository,
    UserTokenRepository,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::state::ServiceState;

/// Query parameters for email lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailQuery {
    normalized_email: String,
}

/// Query parameters for user-name lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNameQuery {
    normalized_user_name: String,
}

/// Query parameters identifying an external login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginQuery {
    login_provider: String,
    provider_key: String,
}

/// Query parameters identifying a claim.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimQuery {
    pub(crate) claim_type: String,
    pub(crate) claim_value: String,
}

/// Query parameters identifying a role by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleNameQuery {
    role_name: String,
}

/// Query parameters identifying a token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    login_provider: String,
    name: String,
}

/// POST /api/identity/user
pub async fn create_user(
    State(state): State<ServiceState>,
    Json(model): Json<UserModel>,
) -> ServiceResult<StatusCode> {
    let user = model.into_user();
    tracing::debug!(user_id = %user.id, "creating user");

    let mut uow = state.uow().await?;
    uow.users().add(&user).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// PUT /api/identity/user
pub async fn update_user(
    State(state): State<ServiceState>,
    Json(model): Json<UserModel>,
) -> ServiceResult<StatusCode> {
    let user = model.into_user();

    let mut uow = state.uow().await?;
    uow.users().update(&user).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/identity/user/{userId}
pub async fn delete_user(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
) -> ServiceResult<StatusCode> {
    tracing::debug!(%user_id, "deleting user");

    let mut uow = state.uow().await?;
    uow.users().delete(user_id).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// GET /api/identity/user/{userId}
pub async fn find_user_by_id(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
) -> ServiceResult<Json<Option<UserModel>>> {
    let mut uow = state.uow().await?;
    let user = uow.users().get_by_id(user_id).await?;
    Ok(Json(user.map(UserModel::from)))
}

/// GET /api/identity/user/email?normalizedEmail=
pub async fn find_user_by_email(
    State(state): State<ServiceState>,
    Query(query): Query<EmailQuery>,
) -> ServiceResult<Json<Option<UserModel>>> {
    let mut uow = state.uow().await?;
    let user = uow
        .users()
        .get_by_normalized_email(&query.normalized_email)
        .await?;
    Ok(Json(user.map(UserModel::from)))
}

/// GET /api/identity/user/name?normalizedUserName=
pub async fn find_user_by_name(
    State(state): State<ServiceState>,
    Query(query): Query<UserNameQuery>,
) -> ServiceResult<Json<Option<UserModel>>> {
    let mut uow = state.uow().await?;
    let user = uow
        .users()
        .get_by_normalized_user_name(&query.normalized_user_name)
        .await?;
    Ok(Json(user.map(UserModel::from)))
}

/// GET /api/identity/user/login?loginProvider=&providerKey=
pub async fn find_user_by_login(
    State(state): State<ServiceState>,
    Query(query): Query<LoginQuery>,
) -> ServiceResult<Json<Option<UserModel>>> {
    let key = UserLoginKey::new(query.login_provider, query.provider_key);

    let mut uow = state.uow().await?;
    let user = uow.users().get_by_login(&key).await?;
    Ok(Json(user.map(UserModel::from)))
}

/// POST /api/identity/user/{userId}/claim
pub async fn add_user_claim(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Json(model): Json<ClaimModel>,
) -> ServiceResult<StatusCode> {
    let claim = model.into_user_claim(user_id);

    let mut uow = state.uow().await?;
    uow.user_claims().add(&claim).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/identity/user/{userId}/claim?claimType=&claimValue=
pub async fn remove_user_claim(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ClaimQuery>,
) -> ServiceResult<StatusCode> {
    let mut uow = state.uow().await?;
    let claims = uow.user_claims().get_by_user(user_id).await?;
    for claim in claims
        .iter()
        .filter(|c| c.matches(&query.claim_type, &query.claim_value))
    {
        uow.user_claims().delete(claim.id).await?;
    }
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// PUT /api/identity/user/{userId}/claim
pub async fn replace_user_claim(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Json(model): Json<ReplaceUserClaimModel>,
) -> ServiceResult<StatusCode> {
    let mut uow = state.uow().await?;
    let claims = uow.user_claims().get_by_user(user_id).await?;
    for mut claim in claims {
        if claim.matches(&model.claim.claim_type, &model.claim.claim_value) {
            claim.claim_type = model.new_claim.claim_type.clone();
            claim.claim_value = model.new_claim.claim_value.clone();
            uow.user_claims().update(&claim).await?;
        }
    }
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// GET /api/identity/user/{userId}/claims
pub async fn get_user_claims(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
) -> ServiceResult<Json<Vec<ClaimModel>>> {
    let mut uow = state.uow().await?;
    let claims = uow.user_claims().get_by_user(user_id).await?;
    Ok(Json(claims.into_iter().map(ClaimModel::from).collect()))
}

/// GET /api/identity/user/claim?claimType=&claimValue=
pub async fn get_users_for_claim(
    State(state): State<ServiceState>,
    Query(query): Query<ClaimQuery>,
) -> ServiceResult<Json<Vec<UserModel>>> {
    let mut uow = state.uow().await?;
    let users = uow
        .users()
        .get_by_claim(&query.claim_type, &query.claim_value)
        .await?;
    Ok(Json(users.into_iter().map(UserModel::from).collect()))
}

/// POST /api/identity/user/{userId}/login
pub async fn add_user_login(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Json(model): Json<LoginModel>,
) -> ServiceResult<StatusCode> {
    let login = model.into_user_login(user_id);

    let mut uow = state.uow().await?;
    uow.user_logins().add(&login).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/identity/user/{userId}/login?loginProvider=&providerKey=
pub async fn remove_user_login(
    State(state): State<ServiceState>,
    Path(_user_id): Path<Uuid>,
    Query(query): Query<LoginQuery>,
) -> ServiceResult<StatusCode> {
    let key = UserLoginKey::new(query.login_provider, query.provider_key);

    let mut uow = state.uow().await?;
    uow.user_logins().delete(&key).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// GET /api/identity/user/{userId}/logins
pub async fn get_user_logins(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
) -> ServiceResult<Json<Vec<LoginModel>>> {
    let mut uow = state.uow().await?;
    let logins = uow.user_logins().get_by_user(user_id).await?;
    Ok(Json(logins.into_iter().map(LoginModel::from).collect()))
}

/// POST /api/identity/user/{userId}/role
pub async fn add_user_to_role(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Json(model): Json<AddRoleModel>,
) -> ServiceResult<StatusCode> {
    tracing::debug!(%user_id, role = %model.role_name, "adding user to role");

    let mut uow = state.uow().await?;
    uow.users().add_to_role(user_id, &model.role_name).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/identity/user/{userId}/role?roleName=
pub async fn remove_user_from_role(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<RoleNameQuery>,
) -> ServiceResult<StatusCode> {
    let mut uow = state.uow().await?;
    uow.users()
        .remove_from_role(user_id, &query.role_name)
        .await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// GET /api/identity/user/{userId}/roles
pub async fn get_user_roles(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
) -> ServiceResult<Json<Vec<String>>> {
    let mut uow = state.uow().await?;
    let names = uow.roles().names_for_user(user_id).await?;
    Ok(Json(names))
}

/// GET /api/identity/user/role?roleName=
pub async fn get_users_in_role(
    State(state): State<ServiceState>,
    Query(query): Query<RoleNameQuery>,
) -> ServiceResult<Json<Vec<UserModel>>> {
    let mut uow = state.uow().await?;
    let users = uow
        .users()
        .get_by_normalized_role_name(&query.role_name)
        .await?;
    Ok(Json(users.into_iter().map(UserModel::from).collect()))
}

/// POST /api/identity/user/{userId}/token
///
/// Creates the token or overwrites its value if the key already exists.
pub async fn set_user_token(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Json(model): Json<TokenModel>,
) -> ServiceResult<StatusCode> {
    let token: UserToken = model.into_user_token(user_id);

    let mut uow = state.uow().await?;
    let existing = uow.user_tokens().get_by_key(&token.key()).await?;
    if existing.is_some() {
        uow.user_tokens().update(&token).await?;
    } else {
        uow.user_tokens().add(&token).await?;
    }
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/identity/user/{userId}/token?loginProvider=&name=
pub async fn remove_user_token(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<TokenQuery>,
) -> ServiceResult<StatusCode> {
    let key = UserTokenKey::new(user_id, query.login_provider, query.name);

    let mut uow = state.uow().await?;
    uow.user_tokens().delete(&key).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// GET /api/identity/user/{userId}/tokens
pub async fn get_user_tokens(
    State(state): State<ServiceState>,
    Path(user_id): Path<Uuid>,
) -> ServiceResult<Json<Vec<TokenModel>>> {
    let mut uow = state.uow().await?;
    let tokens = uow.user_tokens().get_by_user(user_id).await?;
    Ok(Json(tokens.into_iter().map(TokenModel::from).collect()))
}
