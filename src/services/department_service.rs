use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use super::{required, ServiceError};
use crate::database::models::department::DepartmentInput;
use crate::database::models::Department;
use crate::database::{Repository, SharedStore};

#[derive(Clone)]
pub struct DepartmentService {
    departments: Repository<Department>,
}

impl DepartmentService {
    pub fn new(store: SharedStore) -> Self {
        Self { departments: Repository::new(store) }
    }

    pub async fn list(&self) -> Result<Vec<Department>, ServiceError> {
        Ok(self.departments.select_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Department, ServiceError> {
        self.departments
            .select_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Department", id))
    }

    pub async fn by_location(&self, location: &str) -> Result<Vec<Department>, ServiceError> {
        let location = location.trim().to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|d| d.location.to_lowercase() == location)
            .collect())
    }

    /// Distinct locations, sorted.
    pub async fn locations(&self) -> Result<Vec<String>, ServiceError> {
        let locations: BTreeSet<String> = self
            .list()
            .await?
            .into_iter()
            .map(|d| d.location)
            .filter(|l| !l.trim().is_empty())
            .collect();
        Ok(locations.into_iter().collect())
    }

    pub async fn structure(&self) -> Result<BTreeMap<String, Vec<Department>>, ServiceError> {
        let mut structure: BTreeMap<String, Vec<Department>> = BTreeMap::new();
        for department in self.list().await? {
            structure.entry(department.location.clone()).or_default().push(department);
        }
        Ok(structure)
    }

    pub async fn create(&self, input: DepartmentInput) -> Result<Department, ServiceError> {
        let name = required("name", &input.name)?;
        let location = required("location", &input.location)?;
        self.ensure_unique(&name, &location, None).await?;

        let department = Department::new(name, location);
        self.departments.insert(&department).await?;
        info!("Created department {} at {}", department.name, department.location);
        Ok(department)
    }

    pub async fn update(&self, id: &str, input: DepartmentInput) -> Result<Department, ServiceError> {
        let mut department = self.get(id).await?;
        let name = required("name", &input.name)?;
        let location = required("location", &input.location)?;
        self.ensure_unique(&name, &location, Some(id)).await?;

        department.name = name;
        department.location = location;
        self.departments.update(&department).await?;
        Ok(department)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.departments.delete(id).await? {
            return Err(ServiceError::not_found("Department", id));
        }
        info!("Deleted department {}", id);
        Ok(())
    }

    async fn ensure_unique(&self, name: &str, location: &str, except: Option<&str>) -> Result<(), ServiceError> {
        let clash = self
            .list()
            .await?
            .into_iter()
            .any(|d| Some(d.id.as_str()) != except && d.same_slot(name, location));
        if clash {
            return Err(ServiceError::duplicate("name", format!("{} ({})", name, location)));
        }
        Ok(())
    }
}
