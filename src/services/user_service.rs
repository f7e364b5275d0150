use chrono::Utc;
use tracing::info;

use super::{optional, required, ServiceError};
use crate::database::models::user::{UserInput, DEFAULT_POSITION};
use crate::database::models::{new_id, Department, DocumentRequest, User};
use crate::database::{Repository, SharedStore};
use crate::types::UserStatus;
use crate::visibility::{filter_visible, is_visible, Viewer, VisibilityQuery};

#[derive(Clone)]
pub struct UserService {
    users: Repository<User>,
    departments: Repository<Department>,
    requests: Repository<DocumentRequest>,
}

impl UserService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            users: Repository::new(store.clone()),
            departments: Repository::new(store.clone()),
            requests: Repository::new(store),
        }
    }

    /// Every employee with its effective location and department.
    async fn placed(&self) -> Result<Vec<User>, ServiceError> {
        let departments = self.departments.select_all().await?;
        Ok(self
            .users
            .select_all()
            .await?
            .into_iter()
            .map(|u| u.with_effective_placement(&departments))
            .collect())
    }

    pub async fn list(&self, viewer: &Viewer, query: &VisibilityQuery) -> Result<Vec<User>, ServiceError> {
        Ok(filter_visible(viewer, query, self.placed().await?))
    }

    /// Single employee, reported missing when outside the viewer's scope.
    pub async fn get(&self, viewer: &Viewer, id: &str) -> Result<User, ServiceError> {
        let user = self
            .users
            .select_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee", id))?;
        let departments = self.departments.select_all().await?;
        let user = user.with_effective_placement(&departments);

        if !is_visible(viewer, &VisibilityQuery::default(), &user) {
            return Err(ServiceError::not_found("Employee", id));
        }
        Ok(user)
    }

    pub async fn exists(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.users.select_one(id).await?.is_some())
    }

    pub async fn search(&self, viewer: &Viewer, term: &str) -> Result<Vec<User>, ServiceError> {
        let term = term.trim();
        Ok(self
            .list(viewer, &VisibilityQuery::default())
            .await?
            .into_iter()
            .filter(|u| term.is_empty() || u.matches_name(term))
            .collect())
    }

    pub async fn pending(&self, viewer: &Viewer) -> Result<Vec<User>, ServiceError> {
        let query = VisibilityQuery::default().status(UserStatus::Pending.as_str());
        self.list(viewer, &query).await
    }

    /// Registers a new employee in the `pending` state.
    pub async fn create(&self, input: UserInput) -> Result<User, ServiceError> {
        let first_name = required("firstName", &input.first_name)?;
        let last_name = required("lastName", &input.last_name)?;
        let email = required("email", &input.email)?;
        let employee_id = required("employeeId", &input.employee_id)?;
        self.ensure_unique(&email, &employee_id, None).await?;

        let now = Utc::now();
        let user = User {
            id: new_id(),
            first_name,
            last_name,
            email,
            parental_email: optional(input.parental_email),
            phone_number: optional(input.phone_number),
            parental_phone_number: optional(input.parental_phone_number),
            employee_id,
            department: optional(input.department),
            department_id: optional(input.department_id),
            location: optional(input.location),
            position: optional(input.position).unwrap_or_else(|| DEFAULT_POSITION.to_string()),
            status: UserStatus::Pending,
            document_request_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.users.insert(&user).await?;
        info!("Registered employee {} ({})", user.full_name(), user.employee_id);
        Ok(user)
    }

    pub async fn update(&self, viewer: &Viewer, id: &str, input: UserInput) -> Result<User, ServiceError> {
        self.get(viewer, id).await?;
        let mut user = self.users.select_404(id).await?;

        let first_name = required("firstName", &input.first_name)?;
        let last_name = required("lastName", &input.last_name)?;
        let email = required("email", &input.email)?;
        let employee_id = required("employeeId", &input.employee_id)?;
        self.ensure_unique(&email, &employee_id, Some(id)).await?;

        user.first_name = first_name;
        user.last_name = last_name;
        user.email = email;
        user.employee_id = employee_id;
        user.parental_email = optional(input.parental_email);
        user.phone_number = optional(input.phone_number);
        user.parental_phone_number = optional(input.parental_phone_number);
        user.department = optional(input.department);
        user.department_id = optional(input.department_id);
        user.location = optional(input.location);
        if let Some(position) = optional(input.position) {
            user.position = position;
        }
        user.updated_at = Utc::now();

        self.users.update(&user).await?;
        Ok(user)
    }

    pub async fn delete(&self, viewer: &Viewer, id: &str) -> Result<(), ServiceError> {
        self.get(viewer, id).await?;
        self.users.delete(id).await?;
        info!("Deleted employee {}", id);
        Ok(())
    }

    pub async fn approve(&self, viewer: &Viewer, id: &str) -> Result<User, ServiceError> {
        self.get(viewer, id).await?;
        let mut user = self.users.select_404(id).await?;
        if user.status != UserStatus::Pending {
            return Err(ServiceError::Validation(format!("Employee {} is not pending approval", id)));
        }

        user.status = UserStatus::Approved;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        info!("Approved employee {}", id);
        Ok(user)
    }

    /// Rejecting a pending registration removes it.
    pub async fn reject(&self, viewer: &Viewer, id: &str) -> Result<(), ServiceError> {
        let user = self.get(viewer, id).await?;
        if user.status != UserStatus::Pending {
            return Err(ServiceError::Validation(format!("Employee {} is not pending approval", id)));
        }
        self.users.delete(id).await?;
        info!("Rejected employee registration {}", id);
        Ok(())
    }

    pub async fn documents(&self, viewer: &Viewer, id: &str) -> Result<Vec<DocumentRequest>, ServiceError> {
        self.get(viewer, id).await?;
        let mut requests = self.requests.find_by("userId", id).await?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    pub(crate) async fn attach_request(&self, user_id: &str, request_id: &str) -> Result<(), ServiceError> {
        let mut user = self.users.select_404(user_id).await?;
        user.document_request_ids.push(request_id.to_string());
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        Ok(())
    }

    pub(crate) async fn detach_request(&self, user_id: &str, request_id: &str) -> Result<(), ServiceError> {
        // Owner may already be gone.
        let Some(mut user) = self.users.select_one(user_id).await? else {
            return Ok(());
        };
        user.document_request_ids.retain(|id| id != request_id);
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        Ok(())
    }

    async fn ensure_unique(&self, email: &str, employee_id: &str, except: Option<&str>) -> Result<(), ServiceError> {
        let others = |users: Vec<User>| users.into_iter().any(|u| Some(u.id.as_str()) != except);

        if others(self.users.find_by("email", email).await?) {
            return Err(ServiceError::duplicate("email", email));
        }
        if others(self.users.find_by("employeeId", employee_id).await?) {
            return Err(ServiceError::duplicate("employeeId", employee_id));
        }
        Ok(())
    }
}
