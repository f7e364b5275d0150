// Handler tiers:
// public (no auth) -> protected (any admin JWT) -> elevated (super-admin JWT)
pub mod elevated;
pub mod protected;
pub mod public;

use serde::Serialize;

/// Body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), deleted: true }
    }
}
