//! Role handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use idp_api_types::{ClaimModel, RoleModel};
use idp_storage::{RoleClaimRepository, RoleRepository};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::state::ServiceState;
use crate::user::ClaimQuery;

/// Query parameters for normalized-name lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedNameQuery {
    normalized_name: String,
}

/// POST /api/identity/role
pub async fn create_role(
    State(state): State<ServiceState>,
    Json(model): Json<RoleModel>,
) -> ServiceResult<StatusCode> {
    let role = model.into_role();
    tracing::debug!(role_id = %role.id, "creating role");

    let mut uow = state.uow().await?;
    uow.roles().add(&role).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// PUT /api/identity/role
pub async fn update_role(
    State(state): State<ServiceState>,
    Json(model): Json<RoleModel>,
) -> ServiceResult<StatusCode> {
    let role = model.into_role();

    let mut uow = state.uow().await?;
    uow.roles().update(&role).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/identity/role/{roleId}
pub async fn delete_role(
    State(state): State<ServiceState>,
    Path(role_id): Path<Uuid>,
) -> ServiceResult<StatusCode> {
    tracing::debug!(%role_id, "deleting role");

    let mut uow = state.uow().await?;
    uow.roles().delete(role_id).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// GET /api/identity/role/{roleId}
pub async fn find_role_by_id(
    State(state): State<ServiceState>,
    Path(role_id): Path<Uuid>,
) -> ServiceResult<Json<Option<RoleModel>>> {
    let mut uow = state.uow().await?;
    let role = uow.roles().get_by_id(role_id).await?;
    Ok(Json(role.map(RoleModel::from)))
}

/// GET /api/identity/role/name?normalizedName=
pub async fn find_role_by_name(
    State(state): State<ServiceState>,
    Query(query): Query<NormalizedNameQuery>,
) -> ServiceResult<Json<Option<RoleModel>>> {
    let mut uow = state.uow().await?;
    let role = uow
        .roles()
        .get_by_normalized_name(&query.normalized_name)
        .await?;
    Ok(Json(role.map(RoleModel::from)))
}

/// POST /api/identity/role/{roleId}/claim
pub async fn add_role_claim(
    State(state): State<ServiceState>,
    Path(role_id): Path<Uuid>,
    Json(model): Json<ClaimModel>,
) -> ServiceResult<StatusCode> {
    let claim = model.into_role_claim(role_id);

    let mut uow = state.uow().await?;
    uow.role_claims().add(&claim).await?;
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/identity/role/{roleId}/claim?claimType=&claimValue=
pub async fn remove_role_claim(
    State(state): State<ServiceState>,
    Path(role_id): Path<Uuid>,
    Query(query): Query<ClaimQuery>,
) -> ServiceResult<StatusCode> {
    let mut uow = state.uow().await?;
    let claims = uow.role_claims().get_by_role(role_id).await?;
    for claim in claims
        .iter()
        .filter(|c| c.matches(&query.claim_type, &query.claim_value))
    {
        uow.role_claims().delete(claim.id).await?;
    }
    uow.commit().await?;
    Ok(StatusCode::OK)
}

/// GET /api/identity/role/{roleId}/claims
pub async fn get_role_claims(
    State(state): State<ServiceState>,
    Path(role_id): Path<Uuid>,
) -> ServiceResult<Json<Vec<ClaimModel>>> {
    let mut uow = state.uow().await?;
    let claims = uow.role_claims().get_by_role(role_id).await?;
    Ok(Json(claims.into_iter().map(ClaimModel::from).collect()))
}
