pub mod admin_service;
pub mod auth_service;
pub mod department_service;
pub mod document_service;
pub mod document_type_service;
pub mod news_service;
pub mod seed;
pub mod user_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use department_service::DepartmentService;
pub use document_service::DocumentService;
pub use document_type_service::DocumentTypeService;
pub use news_service::NewsService;
pub use user_service::UserService;

use crate::database::DatabaseError;
use crate::workflow::WorkflowError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("An entry with {field} '{value}' already exists")]
    DuplicateEntity { field: &'static str, value: String },

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Store error: {0}")]
    Database(DatabaseError),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        ServiceError::NotFound(format!("{} not found with id: {}", entity, id))
    }

    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        ServiceError::DuplicateEntity { field, value: value.into() }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Database(other),
        }
    }
}

/// Trimmed value of a mandatory text field.
pub(crate) fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Blank strings collapse to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
