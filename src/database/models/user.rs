use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Department, Document};
use crate::types::UserStatus;
use crate::visibility::Scoped;

pub const DEFAULT_POSITION: &str = "Non spécifié";

fn default_position() -> String {
    DEFAULT_POSITION.to_string()
}

/// An employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub parental_email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub parental_phone_number: Option<String>,
    pub employee_id: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub document_request_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Apply the referenced department's location and name when it resolves
    /// to a department with a location; otherwise keep the record's own.
    pub fn with_effective_placement(mut self, departments: &[Department]) -> Self {
        let referenced = self
            .department_id
            .as_deref()
            .and_then(|id| departments.iter().find(|d| d.id == id))
            .filter(|d| !d.location.trim().is_empty());

        if let Some(department) = referenced {
            self.location = Some(department.location.clone());
            self.department = Some(department.name.clone());
        }
        self
    }

    pub fn matches_name(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.first_name.to_lowercase().contains(&term) || self.last_name.to_lowercase().contains(&term)
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Scoped for User {
    fn scope_location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn scope_department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    fn scope_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// Payload for creating or updating an employee.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub parental_email: Option<String>,
    pub phone_number: Option<String>,
    pub parental_phone_number: Option<String>,
    #[serde(default)]
    pub employee_id: String,
    pub department: Option<String>,
    pub department_id: Option<String>,
    pub location: Option<String>,
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({
            "id": "u1",
            "firstName": "Amira",
            "lastName": "Ben Salah",
            "email": "amira@leoni.tn",
            "employeeId": "E-100",
            "department": "Finance",
            "departmentId": "d1",
            "location": "Messadine",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn defaults_apply_on_deserialize() {
        let user = user();
        assert_eq!(user.position, DEFAULT_POSITION);
        assert_eq!(user.status, UserStatus::Pending);
        assert!(user.document_request_ids.is_empty());
    }

    #[test]
    fn referenced_department_wins() {
        let departments = vec![Department::new("Production", "Mateur")];
        let mut user = user();
        user.department_id = Some(departments[0].id.clone());
        let placed = user.with_effective_placement(&departments);
        assert_eq!(placed.location.as_deref(), Some("Mateur"));
        assert_eq!(placed.department.as_deref(), Some("Production"));
    }

    #[test]
    fn unresolved_department_keeps_own_fields() {
        let mut blank = Department::new("Production", " ");
        blank.id = "d1".into();
        let placed = user().with_effective_placement(&[blank]);
        assert_eq!(placed.location.as_deref(), Some("Messadine"));
        assert_eq!(placed.department.as_deref(), Some("Finance"));
    }

    #[test]
    fn name_search_is_case_insensitive() {
        assert!(user().matches_name("SALAH"));
        assert!(user().matches_name("ami"));
        assert!(!user().matches_name("karim"));
    }
}
