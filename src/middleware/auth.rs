use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::Role;
use crate::visibility::Viewer;

/// Authenticated caller extracted from the JWT
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub location: Option<String>,
    pub department: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
            location: claims.location,
            department: claims.department,
        }
    }
}

impl AuthUser {
    pub fn viewer(&self) -> Viewer {
        Viewer {
            role: self.role,
            location: self.location.clone(),
            department: self.department.clone(),
        }
    }

    pub fn require_super_admin(&self) -> Result<(), ApiError> {
        match self.role {
            Role::SuperAdmin => Ok(()),
            Role::Admin => Err(ApiError::forbidden("Super-admin access required")),
        }
    }
}

/// JWT authentication middleware that validates tokens and injects `AuthUser`.
/// The account behind the token must still exist and be active.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(&token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::unauthorized(e.to_string())
    })?;

    if !state.auth().is_active(&claims).await? {
        tracing::debug!("Token for inactive account {} rejected", claims.sub);
        return Err(ApiError::unauthorized("Account is no longer active"));
    }

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Layered after `jwt_auth_middleware` on super-admin-only routes.
pub async fn super_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;
    user.require_super_admin()?;
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_required() {
        let mut headers = HeaderMap::new();
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn admin_is_not_super_admin() {
        let admin = AuthUser {
            id: "a1".into(),
            username: "karim".into(),
            role: Role::Admin,
            location: Some("Mateur".into()),
            department: None,
        };
        assert_eq!(admin.require_super_admin().unwrap_err().status_code(), 403);
        assert_eq!(admin.viewer().location.as_deref(), Some("Mateur"));
    }
}
