use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Document};
use crate::types::Role;

/// A location/department scoped administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl Admin {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        location: Option<String>,
        department: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            username: username.into(),
            password_hash: password_hash.into(),
            location,
            department,
            role: Role::Admin,
            active: true,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }
}

impl Document for Admin {
    const COLLECTION: &'static str = "admins";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Admin as returned over the API, without credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: String,
    pub username: String,
    pub location: Option<String>,
    pub department: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            location: admin.location,
            department: admin.department,
            role: admin.role,
            active: admin.active,
            created_at: admin.created_at,
            last_login: admin.last_login,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminInput {
    pub username: String,
    pub password: String,
    pub location: Option<String>,
    pub department: Option<String>,
}
