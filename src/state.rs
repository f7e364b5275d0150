use std::sync::Arc;

use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::{DatabaseError, DatabaseManager, MemoryDocumentStore, PgDocumentStore, SharedStore};
use crate::services::{
    AdminService, AuthService, DepartmentService, DocumentService, DocumentTypeService, NewsService, UserService,
};

/// Shared handler state: the document store behind every service.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }

    /// Opens the configured backend; Postgres is migrated on connect.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory document store");
                Ok(Self::in_memory())
            }
            StoreBackend::Postgres => {
                let pool = DatabaseManager::connect(config).await?;
                DatabaseManager::migrate(&pool).await?;
                Ok(Self::new(Arc::new(PgDocumentStore::new(pool))))
            }
        }
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.store.clone())
    }

    pub fn documents(&self) -> DocumentService {
        DocumentService::new(self.store.clone())
    }

    pub fn departments(&self) -> DepartmentService {
        DepartmentService::new(self.store.clone())
    }

    pub fn document_types(&self) -> DocumentTypeService {
        DocumentTypeService::new(self.store.clone())
    }

    pub fn news(&self) -> NewsService {
        NewsService::new(self.store.clone())
    }

    pub fn admins(&self) -> AdminService {
        AdminService::new(self.store.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store.clone())
    }
}
