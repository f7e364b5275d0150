// handlers/protected - any authenticated admin or super-admin.
// Every handler receives the caller as `Extension<AuthUser>`.
pub mod auth;
pub mod document_types;
pub mod documents;
pub mod employees;
pub mod news;

use serde::Deserialize;

/// `?term=` on search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
}
