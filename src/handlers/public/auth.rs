use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::services::auth_service::{LoginRequest, LoginResponse};
use crate::state::AppState;

/// POST /api/auth/login - exchange credentials for a JWT
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let response = state.auth().login(request).await?;
    Ok(ApiResponse::success(response))
}
