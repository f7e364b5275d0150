use axum::{
    extract::{Path, Query, State},
    Extension,
};

use super::SearchQuery;
use crate::database::models::user::UserInput;
use crate::database::models::{DocumentRequest, User};
use crate::handlers::Deleted;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::services::document_service::DashboardStats;
use crate::state::AppState;
use crate::visibility::VisibilityQuery;

/// GET /api/admin/employees?location=&department=&status=
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.users().list(&user.viewer(), &query).await?))
}

/// GET /api/admin/employees/pending
pub async fn pending(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.users().pending(&user.viewer()).await?))
}

/// GET /api/admin/employees/search?term=
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.users().search(&user.viewer(), &query.term).await?))
}

/// POST /api/admin/employees
pub async fn create(State(state): State<AppState>, JsonBody(input): JsonBody<UserInput>) -> ApiResult<User> {
    Ok(ApiResponse::created(state.users().create(input).await?))
}

/// GET /api/admin/employees/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<User> {
    Ok(ApiResponse::success(state.users().get(&user.viewer(), &id).await?))
}

/// PUT /api/admin/employees/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UserInput>,
) -> ApiResult<User> {
    Ok(ApiResponse::success(state.users().update(&user.viewer(), &id, input).await?))
}

/// DELETE /api/admin/employees/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    state.users().delete(&user.viewer(), &id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}

/// POST /api/admin/employees/:id/approve
pub async fn approve(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<User> {
    Ok(ApiResponse::success(state.users().approve(&user.viewer(), &id).await?))
}

/// DELETE /api/admin/employees/:id/reject
pub async fn reject(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    state.users().reject(&user.viewer(), &id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}

/// GET /api/admin/employees/:id/documents
pub async fn documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Vec<DocumentRequest>> {
    Ok(ApiResponse::success(state.users().documents(&user.viewer(), &id).await?))
}

/// GET /api/admin/dashboard/stats
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<DashboardStats> {
    Ok(ApiResponse::success(state.documents().dashboard(&user.viewer()).await?))
}
