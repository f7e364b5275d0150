use axum::extract::{Path, State};

use crate::database::models::document_type::DocumentTypeInput;
use crate::database::models::DocumentType;
use crate::handlers::Deleted;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<DocumentType>> {
    Ok(ApiResponse::success(state.document_types().list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DocumentTypeInput>,
) -> ApiResult<DocumentType> {
    Ok(ApiResponse::created(state.document_types().create(input).await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DocumentType> {
    Ok(ApiResponse::success(state.document_types().get(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<DocumentTypeInput>,
) -> ApiResult<DocumentType> {
    Ok(ApiResponse::success(state.document_types().update(&id, input).await?))
}

/// PUT /api/admin/document-types/:id/toggle-status
pub async fn toggle_status(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DocumentType> {
    Ok(ApiResponse::success(state.document_types().toggle_active(&id).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    state.document_types().delete(&id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
