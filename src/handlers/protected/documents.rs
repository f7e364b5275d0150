use axum::{
    extract::{Path, Query, State},
    Extension,
};

use super::SearchQuery;
use crate::database::models::document_request::StatusUpdate;
use crate::database::models::DocumentRequest;
use crate::handlers::Deleted;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::services::document_service::DocumentStats;
use crate::state::AppState;

/// GET /api/admin/documents
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<DocumentRequest>> {
    Ok(ApiResponse::success(state.documents().list(&user.viewer()).await?))
}

/// GET /api/admin/documents/stats
pub async fn stats(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<DocumentStats> {
    Ok(ApiResponse::success(state.documents().stats(&user.viewer()).await?))
}

/// GET /api/admin/documents/search?term=
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<DocumentRequest>> {
    Ok(ApiResponse::success(state.documents().search(&user.viewer(), &query.term).await?))
}

/// GET /api/admin/documents/status/:status
pub async fn by_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(status): Path<String>,
) -> ApiResult<Vec<DocumentRequest>> {
    Ok(ApiResponse::success(state.documents().by_status(&user.viewer(), &status).await?))
}

/// GET /api/admin/documents/type/:document_type
pub async fn by_type(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(document_type): Path<String>,
) -> ApiResult<Vec<DocumentRequest>> {
    Ok(ApiResponse::success(state.documents().by_type(&user.viewer(), &document_type).await?))
}

/// GET /api/admin/documents/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<DocumentRequest> {
    Ok(ApiResponse::success(state.documents().get(&user.viewer(), &id).await?))
}

/// PUT /api/admin/documents/:id/status {newStatus, comment?}
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> ApiResult<DocumentRequest> {
    let request = state.documents().update_status(&user.viewer(), &id, update).await?;
    Ok(ApiResponse::success(request))
}

/// DELETE /api/admin/documents/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    state.documents().delete(&user.viewer(), &id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
