// Read-only reference data: departments, active document types, published news.
use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};

use crate::database::models::{Department, DocumentType, News};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::news_service::PublicNewsQuery;
use crate::state::AppState;

/// GET /api/departments
pub async fn departments(State(state): State<AppState>) -> ApiResult<Vec<Department>> {
    Ok(ApiResponse::success(state.departments().list().await?))
}

/// GET /api/departments/locations
pub async fn locations(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    Ok(ApiResponse::success(state.departments().locations().await?))
}

/// GET /api/departments/structure
pub async fn structure(State(state): State<AppState>) -> ApiResult<BTreeMap<String, Vec<Department>>> {
    Ok(ApiResponse::success(state.departments().structure().await?))
}

/// GET /api/departments/by-location/:location
pub async fn departments_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> ApiResult<Vec<Department>> {
    Ok(ApiResponse::success(state.departments().by_location(&location).await?))
}

/// GET /api/document-types/active
pub async fn active_document_types(State(state): State<AppState>) -> ApiResult<Vec<DocumentType>> {
    Ok(ApiResponse::success(state.document_types().list_active().await?))
}

/// GET /api/news/public?location=&department=&category=&priority=
pub async fn public_news(State(state): State<AppState>, Query(query): Query<PublicNewsQuery>) -> ApiResult<Vec<News>> {
    Ok(ApiResponse::success(state.news().public(&query).await?))
}
