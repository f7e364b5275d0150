use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Document};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Department {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            location: location.into(),
            created_at: Utc::now(),
        }
    }

    /// Name and location both compared case-insensitively.
    pub fn same_slot(&self, name: &str, location: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
            && self.location.to_lowercase() == location.trim().to_lowercase()
    }
}

impl Document for Department {
    const COLLECTION: &'static str = "departments";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
    pub location: String,
}
