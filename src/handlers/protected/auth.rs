use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/me - the identity carried by the token
pub async fn me(Extension(user): Extension<AuthUser>) -> ApiResult<AuthUser> {
    Ok(ApiResponse::success(user))
}
