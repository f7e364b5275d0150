use serde::{de::DeserializeOwned, Serialize};

pub mod admin;
pub mod department;
pub mod document_request;
pub mod document_type;
pub mod news;
pub mod super_admin;
pub mod user;

pub use admin::{Admin, AdminProfile};
pub use department::Department;
pub use document_request::DocumentRequest;
pub use document_type::DocumentType;
pub use news::{News, NewsVisibility};
pub use super_admin::{SuperAdmin, SuperAdminProfile};
pub use user::User;

/// A record persisted as one JSON document in a named collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Fresh document id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
