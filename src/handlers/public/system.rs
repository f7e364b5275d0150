use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "HR Portal API",
            "version": version,
            "description": "HR admin portal backend: employees, document requests, departments and news",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/auth/login (public), /api/auth/me (protected)",
                "employees": "/api/users (public registration), /api/admin/employees/* (protected)",
                "documents": "/api/documents (public submission), /api/admin/documents/* (protected)",
                "document_types": "/api/document-types/active (public), /api/admin/document-types/* (protected)",
                "departments": "/api/departments/* (public reads, super-admin writes)",
                "news": "/api/news/public (public), /api/news/* (protected)",
                "superadmin": "/api/superadmin/* (super-admin)"
            }
        }
    }))
}

/// GET /health - liveness plus store reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
