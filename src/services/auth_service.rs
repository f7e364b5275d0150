use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ServiceError;
use crate::auth::{generate_jwt, verify_password, Claims};
use crate::config;
use crate::database::models::{Admin, SuperAdmin};
use crate::database::{Repository, SharedStore};
use crate::types::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub id: String,
    pub username: String,
    pub role: Role,
    pub location: Option<String>,
    pub department: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    admins: Repository<Admin>,
    super_admins: Repository<SuperAdmin>,
}

impl AuthService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            admins: Repository::new(store.clone()),
            super_admins: Repository::new(store),
        }
    }

    /// Super-admins are tried first, then active admins.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ServiceError> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(ServiceError::Validation("username and password are required".into()));
        }

        if let Some(mut account) = self.active_super_admin(username).await? {
            if verify_password(&request.password, &account.password_hash) {
                account.last_login = Some(Utc::now());
                self.super_admins.update(&account).await?;
                info!("Super-admin {} logged in", account.username);
                return issue(Claims::new(account.id, account.username, Role::SuperAdmin, None, None));
            }
        }

        if let Some(mut admin) = self.active_admin(username).await? {
            if verify_password(&request.password, &admin.password_hash) {
                admin.last_login = Some(Utc::now());
                self.admins.update(&admin).await?;
                info!("Admin {} logged in", admin.username);
                return issue(Claims::new(admin.id, admin.username, Role::Admin, admin.location, admin.department));
            }
        }

        warn!("Failed login attempt for {}", username);
        Err(ServiceError::Unauthorized("Invalid username or password".into()))
    }

    /// Token for an existing active account, without a password check.
    pub async fn issue_for(&self, username: &str) -> Result<LoginResponse, ServiceError> {
        if let Some(account) = self.active_super_admin(username).await? {
            return issue(Claims::new(account.id, account.username, Role::SuperAdmin, None, None));
        }
        if let Some(admin) = self.active_admin(username).await? {
            return issue(Claims::new(admin.id, admin.username, Role::Admin, admin.location, admin.department));
        }
        Err(ServiceError::NotFound(format!("No active account named {}", username)))
    }

    /// Whether the account a token was issued for still exists and is active.
    pub async fn is_active(&self, claims: &Claims) -> Result<bool, ServiceError> {
        let active = match claims.role {
            Role::SuperAdmin => self.super_admins.select_one(&claims.sub).await?.map(|a| a.active),
            Role::Admin => self.admins.select_one(&claims.sub).await?.map(|a| a.active),
        };
        Ok(active.unwrap_or(false))
    }

    async fn active_super_admin(&self, username: &str) -> Result<Option<SuperAdmin>, ServiceError> {
        Ok(self
            .super_admins
            .find_by("username", username)
            .await?
            .into_iter()
            .find(|a| a.active))
    }

    async fn active_admin(&self, username: &str) -> Result<Option<Admin>, ServiceError> {
        Ok(self.admins.find_by("username", username).await?.into_iter().find(|a| a.active))
    }
}

fn issue(claims: Claims) -> Result<LoginResponse, ServiceError> {
    let token = generate_jwt(&claims).map_err(|e| ServiceError::Internal(e.to_string()))?;
    Ok(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: config::config().security.jwt_expiry_hours * 3600,
        id: claims.sub,
        username: claims.username,
        role: claims.role,
        location: claims.location,
        department: claims.department,
    })
}
