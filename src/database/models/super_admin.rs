use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Document};
use crate::types::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdmin {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl SuperAdmin {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            username: username.into(),
            password_hash: password_hash.into(),
            email,
            first_name: None,
            last_name: None,
            role: Role::SuperAdmin,
            active: true,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }
}

impl Document for SuperAdmin {
    const COLLECTION: &'static str = "super_admins";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminProfile {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<SuperAdmin> for SuperAdminProfile {
    fn from(account: SuperAdmin) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.role,
            active: account.active,
            created_at: account.created_at,
            last_login: account.last_login,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
