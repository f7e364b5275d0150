use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Document};
use crate::workflow::StatusTrack;

/// An employee's request for one or more documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub id: String,
    pub user_id: String,
    pub document_types: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub status: StatusTrack,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentRequest {
    pub fn submit(user_id: impl Into<String>, document_types: Vec<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            user_id: user_id.into(),
            document_types,
            description: description.into(),
            status: StatusTrack::new(now),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_type(&self, document_type: &str) -> bool {
        self.document_types.iter().any(|t| t.eq_ignore_ascii_case(document_type))
    }
}

impl Document for DocumentRequest {
    const COLLECTION: &'static str = "document_requests";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequestInput {
    pub user_id: String,
    #[serde(default)]
    pub document_types: Vec<String>,
    /// Single-type form still sent by older clients.
    pub document_type: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl DocumentRequestInput {
    pub fn types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .document_types
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if let Some(single) = self.document_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            if !types.iter().any(|t| t == single) {
                types.push(single.to_string());
            }
        }
        types
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub new_status: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::DocumentStatus;
    use serde_json::json;

    #[test]
    fn submitted_request_is_pending() {
        let request = DocumentRequest::submit("u1", vec!["Tax Documents".into()], "for the bank");
        assert_eq!(request.status.current, DocumentStatus::Pending);
        assert!(request.has_type("tax documents"));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["status"]["current"], "en attente");
        assert_eq!(value["userId"], "u1");
    }

    #[test]
    fn legacy_single_type_is_merged() {
        let input: DocumentRequestInput = serde_json::from_value(json!({
            "userId": "u1",
            "documentTypes": ["Identity Card", " "],
            "documentType": "Medical Certificate"
        }))
        .unwrap();
        assert_eq!(input.types(), vec!["Identity Card", "Medical Certificate"]);
    }
}
