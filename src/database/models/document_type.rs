use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Document};

fn active_by_default() -> bool {
    true
}

/// A kind of paperwork employees can request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentType {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for DocumentType {
    const COLLECTION: &'static str = "document_types";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentTypeInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub active: Option<bool>,
}
