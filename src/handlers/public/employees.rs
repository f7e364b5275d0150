// Employee self-service: registration and document requests.
use axum::extract::{Path, State};

use crate::database::models::document_request::DocumentRequestInput;
use crate::database::models::user::UserInput;
use crate::database::models::{DocumentRequest, User};
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

/// POST /api/users - register an employee (starts pending)
pub async fn register(State(state): State<AppState>, JsonBody(input): JsonBody<UserInput>) -> ApiResult<User> {
    let user = state.users().create(input).await?;
    Ok(ApiResponse::created(user))
}

/// POST /api/documents - submit a document request
pub async fn submit_document(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DocumentRequestInput>,
) -> ApiResult<DocumentRequest> {
    let request = state.documents().create(input).await?;
    Ok(ApiResponse::created(request))
}

/// GET /api/documents/user/:user_id
pub async fn user_documents(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<DocumentRequest>> {
    let requests = state.documents().by_user(&user_id).await?;
    Ok(ApiResponse::success(requests))
}
