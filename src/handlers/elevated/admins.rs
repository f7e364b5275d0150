use axum::extract::{Path, State};

use crate::database::models::admin::AdminInput;
use crate::database::models::super_admin::SuperAdminInput;
use crate::database::models::{AdminProfile, SuperAdminProfile};
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::services::admin_service::SystemStats;
use crate::state::AppState;

/// GET /api/superadmin/admins
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<AdminProfile>> {
    Ok(ApiResponse::success(state.admins().list_admins().await?))
}

/// POST /api/superadmin/admins
pub async fn create(State(state): State<AppState>, JsonBody(input): JsonBody<AdminInput>) -> ApiResult<AdminProfile> {
    Ok(ApiResponse::created(state.admins().create_admin(input).await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<AdminProfile> {
    Ok(ApiResponse::success(state.admins().get_admin(&id).await?))
}

/// DELETE /api/superadmin/admins/:id - accounts are deactivated, never removed
pub async fn deactivate(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<AdminProfile> {
    Ok(ApiResponse::success(state.admins().deactivate_admin(&id).await?))
}

/// POST /api/superadmin/superadmins
pub async fn create_super_admin(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SuperAdminInput>,
) -> ApiResult<SuperAdminProfile> {
    Ok(ApiResponse::created(state.admins().create_super_admin(input).await?))
}

/// GET /api/superadmin/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<SystemStats> {
    Ok(ApiResponse::success(state.admins().stats().await?))
}
