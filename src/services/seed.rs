//! Startup data: document types, departments and the first super-admin.
//! Each step only runs against an empty collection.

use serde::Serialize;
use tracing::info;

use super::{AdminService, ServiceError};
use crate::config::SeedConfig;
use crate::database::models::super_admin::SuperAdminInput;
use crate::database::models::{Department, DocumentType};
use crate::database::{Repository, SharedStore};

pub const DEFAULT_DOCUMENT_TYPES: [(&str, &str); 8] = [
    ("Identity Card", "National identity card or passport"),
    ("Employment Contract", "Work contract and employment documents"),
    ("Medical Certificate", "Health and medical clearance documents"),
    ("Educational Certificate", "Diplomas, degrees, and educational qualifications"),
    ("Background Check", "Criminal background and security clearance"),
    ("Tax Documents", "Tax identification and related financial documents"),
    ("Insurance Forms", "Health, life, and work insurance documentation"),
    ("Emergency Contact", "Emergency contact information and forms"),
];

pub const LOCATIONS: [&str; 3] = ["Messadine", "Mateur", "Manzel Hayet (Monastir)"];

pub const DEPARTMENTS: [&str; 12] = [
    "Production",
    "Quality Control",
    "Engineering",
    "Supply Chain / Logistics",
    "Human Resources",
    "Finance",
    "IT",
    "Sales / Customer Service",
    "R&D (Research and Development)",
    "Maintenance",
    "Health and Safety",
    "Administration",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub document_types: usize,
    pub departments: usize,
    pub super_admin: Option<String>,
}

pub async fn seed(store: SharedStore, config: &SeedConfig) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    let types = Repository::<DocumentType>::new(store.clone());
    if types.count().await? == 0 {
        for (name, description) in DEFAULT_DOCUMENT_TYPES {
            types.insert(&DocumentType::new(name, description)).await?;
        }
        report.document_types = DEFAULT_DOCUMENT_TYPES.len();
    }

    let departments = Repository::<Department>::new(store.clone());
    if departments.count().await? == 0 {
        for location in LOCATIONS {
            for name in DEPARTMENTS {
                departments.insert(&Department::new(name, location)).await?;
            }
        }
        report.departments = LOCATIONS.len() * DEPARTMENTS.len();
    }

    let admins = AdminService::new(store);
    if !admins.has_super_admin().await? && !config.superadmin_password.is_empty() {
        let created = admins
            .create_super_admin(SuperAdminInput {
                username: config.superadmin_username.clone(),
                password: config.superadmin_password.clone(),
                email: Some(config.superadmin_email.clone()),
                first_name: Some("Super".into()),
                last_name: Some("Admin".into()),
            })
            .await?;
        report.super_admin = Some(created.username);
    }

    info!(
        "Seeded {} document types, {} departments, super-admin: {}",
        report.document_types,
        report.departments,
        report.super_admin.as_deref().unwrap_or("unchanged")
    );
    Ok(report)
}
