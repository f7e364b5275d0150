use axum::extract::{Path, State};

use crate::database::models::department::DepartmentInput;
use crate::database::models::Department;
use crate::handlers::Deleted;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

/// POST /api/departments
pub async fn create(State(state): State<AppState>, JsonBody(input): JsonBody<DepartmentInput>) -> ApiResult<Department> {
    Ok(ApiResponse::created(state.departments().create(input).await?))
}

/// PUT /api/departments/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<DepartmentInput>,
) -> ApiResult<Department> {
    Ok(ApiResponse::success(state.departments().update(&id, input).await?))
}

/// DELETE /api/departments/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    state.departments().delete(&id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
