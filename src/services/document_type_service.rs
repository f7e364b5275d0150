use chrono::Utc;
use tracing::info;

use super::{required, ServiceError};
use crate::database::models::document_type::DocumentTypeInput;
use crate::database::models::DocumentType;
use crate::database::{Repository, SharedStore};

#[derive(Clone)]
pub struct DocumentTypeService {
    types: Repository<DocumentType>,
}

impl DocumentTypeService {
    pub fn new(store: SharedStore) -> Self {
        Self { types: Repository::new(store) }
    }

    pub async fn list(&self) -> Result<Vec<DocumentType>, ServiceError> {
        Ok(self.types.select_all().await?)
    }

    pub async fn list_active(&self) -> Result<Vec<DocumentType>, ServiceError> {
        Ok(self.list().await?.into_iter().filter(|t| t.active).collect())
    }

    pub async fn get(&self, id: &str) -> Result<DocumentType, ServiceError> {
        self.types
            .select_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Document type", id))
    }

    pub async fn create(&self, input: DocumentTypeInput) -> Result<DocumentType, ServiceError> {
        let name = required("name", &input.name)?;
        self.ensure_unique(&name, None).await?;

        let mut document_type = DocumentType::new(name, input.description.trim());
        document_type.active = input.active.unwrap_or(true);
        self.types.insert(&document_type).await?;
        info!("Created document type {}", document_type.name);
        Ok(document_type)
    }

    pub async fn update(&self, id: &str, input: DocumentTypeInput) -> Result<DocumentType, ServiceError> {
        let mut document_type = self.get(id).await?;
        let name = required("name", &input.name)?;
        self.ensure_unique(&name, Some(id)).await?;

        document_type.name = name;
        document_type.description = input.description.trim().to_string();
        if let Some(active) = input.active {
            document_type.active = active;
        }
        document_type.updated_at = Utc::now();
        self.types.update(&document_type).await?;
        Ok(document_type)
    }

    pub async fn toggle_active(&self, id: &str) -> Result<DocumentType, ServiceError> {
        let mut document_type = self.get(id).await?;
        document_type.active = !document_type.active;
        document_type.updated_at = Utc::now();
        self.types.update(&document_type).await?;
        Ok(document_type)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.types.delete(id).await? {
            return Err(ServiceError::not_found("Document type", id));
        }
        Ok(())
    }

    async fn ensure_unique(&self, name: &str, except: Option<&str>) -> Result<(), ServiceError> {
        let name_lower = name.to_lowercase();
        let clash = self
            .list()
            .await?
            .into_iter()
            .any(|t| Some(t.id.as_str()) != except && t.name.to_lowercase() == name_lower);
        if clash {
            return Err(ServiceError::duplicate("name", name));
        }
        Ok(())
    }
}
