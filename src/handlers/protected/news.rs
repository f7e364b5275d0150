use axum::{
    extract::{Path, Query, State},
    Extension,
};

use crate::database::models::news::NewsInput;
use crate::database::models::News;
use crate::handlers::Deleted;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::services::news_service::Author;
use crate::state::AppState;
use crate::visibility::VisibilityQuery;

/// GET /api/news?location=&department=&status=
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Vec<News>> {
    Ok(ApiResponse::success(state.news().list(&user.viewer(), &query).await?))
}

/// POST /api/news - new draft
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(input): JsonBody<NewsInput>,
) -> ApiResult<News> {
    let viewer = user.viewer();
    let author = Author {
        id: &user.id,
        name: &user.username,
        viewer: &viewer,
    };
    Ok(ApiResponse::created(state.news().create(author, input).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<News> {
    Ok(ApiResponse::success(state.news().get(&user.viewer(), &id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<NewsInput>,
) -> ApiResult<News> {
    Ok(ApiResponse::success(state.news().update(&user.viewer(), &id, input).await?))
}

/// POST /api/news/:id/publish
pub async fn publish(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<News> {
    Ok(ApiResponse::success(state.news().publish(&user.viewer(), &id).await?))
}

/// POST /api/news/:id/archive
pub async fn archive(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<News> {
    Ok(ApiResponse::success(state.news().archive(&user.viewer(), &id).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    state.news().delete(&user.viewer(), &id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
