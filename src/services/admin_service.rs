use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::{optional, required, ServiceError};
use crate::auth::hash_password;
use crate::database::models::admin::AdminInput;
use crate::database::models::super_admin::SuperAdminInput;
use crate::database::models::{Admin, AdminProfile, DocumentRequest, SuperAdmin, SuperAdminProfile, User};
use crate::database::{Repository, SharedStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub employees: i64,
    pub admins: i64,
    pub active_admins: usize,
    pub super_admins: i64,
    pub documents: i64,
}

fn hashed(password: &str) -> Result<String, ServiceError> {
    hash_password(password).map_err(|e| ServiceError::Internal(format!("password hashing failed: {}", e)))
}

/// Account management reserved to super-admins.
#[derive(Clone)]
pub struct AdminService {
    admins: Repository<Admin>,
    super_admins: Repository<SuperAdmin>,
    users: Repository<User>,
    requests: Repository<DocumentRequest>,
}

impl AdminService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            admins: Repository::new(store.clone()),
            super_admins: Repository::new(store.clone()),
            users: Repository::new(store.clone()),
            requests: Repository::new(store),
        }
    }

    pub async fn list_admins(&self) -> Result<Vec<AdminProfile>, ServiceError> {
        Ok(self.admins.select_all().await?.into_iter().map(AdminProfile::from).collect())
    }

    pub async fn get_admin(&self, id: &str) -> Result<AdminProfile, ServiceError> {
        self.admins
            .select_one(id)
            .await?
            .map(AdminProfile::from)
            .ok_or_else(|| ServiceError::not_found("Admin", id))
    }

    pub async fn create_admin(&self, input: AdminInput) -> Result<AdminProfile, ServiceError> {
        let username = required("username", &input.username)?;
        let password = required("password", &input.password)?;
        self.ensure_username_free(&username).await?;

        let location = optional(input.location);
        if location.is_none() {
            warn!("Admin {} created without a location; it will see no records", username);
        }
        let admin = Admin::new(username, hashed(&password)?, location, optional(input.department));
        self.admins.insert(&admin).await?;
        info!("Created admin {}", admin.username);
        Ok(admin.into())
    }

    /// Admins are deactivated rather than removed.
    pub async fn deactivate_admin(&self, id: &str) -> Result<AdminProfile, ServiceError> {
        let mut admin = self
            .admins
            .select_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Admin", id))?;
        admin.active = false;
        admin.updated_at = Utc::now();
        self.admins.update(&admin).await?;
        info!("Deactivated admin {}", admin.username);
        Ok(admin.into())
    }

    pub async fn create_super_admin(&self, input: SuperAdminInput) -> Result<SuperAdminProfile, ServiceError> {
        let username = required("username", &input.username)?;
        let password = required("password", &input.password)?;
        self.ensure_username_free(&username).await?;

        let mut account = SuperAdmin::new(username, hashed(&password)?, optional(input.email));
        account.first_name = optional(input.first_name);
        account.last_name = optional(input.last_name);
        self.super_admins.insert(&account).await?;
        info!("Created super-admin {}", account.username);
        Ok(account.into())
    }

    pub async fn has_super_admin(&self) -> Result<bool, ServiceError> {
        Ok(self.super_admins.count().await? > 0)
    }

    pub async fn stats(&self) -> Result<SystemStats, ServiceError> {
        let admins = self.admins.select_all().await?;
        Ok(SystemStats {
            employees: self.users.count().await?,
            admins: admins.len() as i64,
            active_admins: admins.iter().filter(|a| a.active).count(),
            super_admins: self.super_admins.count().await?,
            documents: self.requests.count().await?,
        })
    }

    /// Usernames are unique across both account tiers.
    async fn ensure_username_free(&self, username: &str) -> Result<(), ServiceError> {
        if !self.admins.find_by("username", username).await?.is_empty()
            || !self.super_admins.find_by("username", username).await?.is_empty()
        {
            return Err(ServiceError::duplicate("username", username));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::store;

    fn admin(username: &str) -> AdminInput {
        AdminInput {
            username: username.into(),
            password: "pw".into(),
            location: Some("Mateur".into()),
            department: Some("Production".into()),
        }
    }

    #[tokio::test]
    async fn usernames_are_unique_across_tiers() {
        let service = AdminService::new(store());
        service.create_admin(admin("karim")).await.unwrap();
        assert!(matches!(
            service.create_admin(admin("karim")).await,
            Err(ServiceError::DuplicateEntity { field: "username", .. })
        ));

        let err = service
            .create_super_admin(SuperAdminInput {
                username: "karim".into(),
                password: "pw".into(),
                email: None,
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEntity { .. }));
        assert_eq!(service.list_admins().await.unwrap().len(), 1);
        assert!(!service.has_super_admin().await.unwrap());
    }

    #[tokio::test]
    async fn deactivate_keeps_the_record() {
        let service = AdminService::new(store());
        let created = service.create_admin(admin("leila")).await.unwrap();
        let deactivated = service.deactivate_admin(&created.id).await.unwrap();
        assert!(!deactivated.active);

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.admins, 1);
        assert_eq!(stats.active_admins, 0);
    }

    #[tokio::test]
    async fn profiles_never_carry_password_hashes() {
        let service = AdminService::new(store());
        let created = service.create_admin(admin("leila")).await.unwrap();
        let json = serde_json::to_value(created).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "ADMIN");
    }
}
