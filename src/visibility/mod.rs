//! Role-based visibility of employees and news.
//!
//! A super-admin sees everything, narrowed only by the filters it supplies.
//! An admin sees the records of its own location and department; its own
//! location/department filters are ignored, its status filter still applies.

use serde::Deserialize;

use crate::types::Role;

/// The caller as seen by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub role: Role,
    pub location: Option<String>,
    pub department: Option<String>,
}

impl Viewer {
    pub fn super_admin() -> Self {
        Self { role: Role::SuperAdmin, location: None, department: None }
    }

    pub fn admin(location: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            location: Some(location.into()),
            department: Some(department.into()),
        }
    }
}

/// Optional filters supplied on a list request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisibilityQuery {
    pub location: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

impl VisibilityQuery {
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A record that carries a location, department and status.
pub trait Scoped {
    fn scope_location(&self) -> Option<&str>;
    fn scope_department(&self) -> Option<&str>;
    fn scope_status(&self) -> Option<&str>;
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn same(expected: &str, actual: Option<&str>) -> bool {
    // Full Unicode case folding; names may carry accents.
    actual.is_some_and(|actual| actual.trim().to_lowercase() == expected.to_lowercase())
}

pub fn is_visible<T: Scoped + ?Sized>(viewer: &Viewer, query: &VisibilityQuery, record: &T) -> bool {
    let status_ok = supplied(&query.status).map_or(true, |s| same(s, record.scope_status()));

    match viewer.role {
        Role::SuperAdmin => {
            status_ok
                && supplied(&query.location).map_or(true, |l| same(l, record.scope_location()))
                && supplied(&query.department).map_or(true, |d| same(d, record.scope_department()))
        }
        Role::Admin => {
            let Some(location) = supplied(&viewer.location) else {
                return false;
            };
            // An admin without a department is scoped to the whole location.
            let department_ok = supplied(&viewer.department).map_or(true, |d| same(d, record.scope_department()));

            status_ok && same(location, record.scope_location()) && department_ok
        }
    }
}

pub fn filter_visible<T: Scoped>(viewer: &Viewer, query: &VisibilityQuery, records: Vec<T>) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| is_visible(viewer, query, record))
        .collect()
}
