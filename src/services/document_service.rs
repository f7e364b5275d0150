use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::{ServiceError, UserService};
use crate::database::models::document_request::{DocumentRequestInput, StatusUpdate};
use crate::database::models::DocumentRequest;
use crate::database::{Repository, SharedStore};
use crate::types::Role;
use crate::visibility::{Viewer, VisibilityQuery};
use crate::workflow::DocumentStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total: usize,
    /// Keyed by wire status name; every status is present.
    pub by_status: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: usize,
    pub pending_employees: usize,
    pub documents: DocumentStats,
}

#[derive(Clone)]
pub struct DocumentService {
    requests: Repository<DocumentRequest>,
    users: UserService,
}

impl DocumentService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            requests: Repository::new(store.clone()),
            users: UserService::new(store),
        }
    }

    /// Requests the viewer may see, newest first. Admins only see requests
    /// of employees inside their scope.
    pub async fn list(&self, viewer: &Viewer) -> Result<Vec<DocumentRequest>, ServiceError> {
        let mut requests = self.requests.select_all().await?;

        if viewer.role == Role::Admin {
            let owners: HashSet<String> = self
                .users
                .list(viewer, &VisibilityQuery::default())
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect();
            requests.retain(|r| owners.contains(&r.user_id));
        }

        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    pub async fn get(&self, viewer: &Viewer, id: &str) -> Result<DocumentRequest, ServiceError> {
        let request = self
            .requests
            .select_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Document request", id))?;

        if viewer.role == Role::Admin && self.users.get(viewer, &request.user_id).await.is_err() {
            return Err(ServiceError::not_found("Document request", id));
        }
        Ok(request)
    }

    /// An employee's own requests, newest first.
    pub async fn by_user(&self, user_id: &str) -> Result<Vec<DocumentRequest>, ServiceError> {
        if !self.users.exists(user_id).await? {
            return Err(ServiceError::not_found("Employee", user_id));
        }
        let mut requests = self.requests.find_by("userId", user_id).await?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    pub async fn by_status(&self, viewer: &Viewer, status: &str) -> Result<Vec<DocumentRequest>, ServiceError> {
        let status = DocumentStatus::parse(status)?;
        Ok(self
            .list(viewer)
            .await?
            .into_iter()
            .filter(|r| r.status.current == status)
            .collect())
    }

    pub async fn by_type(&self, viewer: &Viewer, document_type: &str) -> Result<Vec<DocumentRequest>, ServiceError> {
        Ok(self
            .list(viewer)
            .await?
            .into_iter()
            .filter(|r| r.has_type(document_type))
            .collect())
    }

    pub async fn search(&self, viewer: &Viewer, term: &str) -> Result<Vec<DocumentRequest>, ServiceError> {
        let term = term.trim().to_lowercase();
        Ok(self
            .list(viewer)
            .await?
            .into_iter()
            .filter(|r| r.description.to_lowercase().contains(&term))
            .collect())
    }

    pub async fn create(&self, input: DocumentRequestInput) -> Result<DocumentRequest, ServiceError> {
        let types = input.types();
        if types.is_empty() {
            return Err(ServiceError::Validation("At least one document type is required".into()));
        }
        let user_id = input.user_id.trim();
        if !self.users.exists(user_id).await? {
            return Err(ServiceError::not_found("Employee", user_id));
        }

        let request = DocumentRequest::submit(user_id, types, input.description.trim());
        self.requests.insert(&request).await?;
        if let Err(err) = self.users.attach_request(user_id, &request.id).await {
            // Drop the orphan so the owner's list and the collection agree.
            warn!("Linking request {} to {} failed, rolling back: {}", request.id, user_id, err);
            self.requests.delete(&request.id).await?;
            return Err(err);
        }

        info!("Document request {} submitted by {}", request.id, user_id);
        Ok(request)
    }

    /// Moves a request to `update.new_status` if the workflow allows it.
    pub async fn update_status(
        &self,
        viewer: &Viewer,
        id: &str,
        update: StatusUpdate,
    ) -> Result<DocumentRequest, ServiceError> {
        let mut request = self.get(viewer, id).await?;
        let previous = request.status.current;

        let now = Utc::now();
        let next = request.status.transition(&update.new_status, now)?;
        request.updated_at = now;
        self.requests.update(&request).await?;

        match update.comment.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(comment) => info!("Request {}: {} -> {} ({})", id, previous, next, comment),
            None => info!("Request {}: {} -> {}", id, previous, next),
        }
        Ok(request)
    }

    pub async fn delete(&self, viewer: &Viewer, id: &str) -> Result<(), ServiceError> {
        let request = self.get(viewer, id).await?;
        self.requests.delete(id).await?;
        self.users.detach_request(&request.user_id, id).await?;
        info!("Deleted document request {}", id);
        Ok(())
    }

    pub async fn stats(&self, viewer: &Viewer) -> Result<DocumentStats, ServiceError> {
        let requests = self.list(viewer).await?;
        let mut by_status: BTreeMap<&'static str, usize> =
            DocumentStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
        for request in &requests {
            *by_status.entry(request.status.current.as_str()).or_default() += 1;
        }
        Ok(DocumentStats { total: requests.len(), by_status })
    }

    pub async fn dashboard(&self, viewer: &Viewer) -> Result<DashboardStats, ServiceError> {
        let employees = self.users.list(viewer, &VisibilityQuery::default()).await?;
        let pending_employees = employees
            .iter()
            .filter(|u| u.status == crate::types::UserStatus::Pending)
            .count();

        Ok(DashboardStats {
            total_employees: employees.len(),
            pending_employees,
            documents: self.stats(viewer).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::user::UserInput;
    use crate::database::models::User;
    use std::sync::Arc;

    use crate::database::{DocumentStore, MemoryDocumentStore};
    use crate::services::testing::{store, FrozenCollection};
    use crate::workflow::WorkflowError;

    async fn setup() -> (DocumentService, UserService, User) {
        let store = store();
        let users = UserService::new(store.clone());
        let user = users
            .create(UserInput {
                first_name: "Nour".into(),
                last_name: "Jlassi".into(),
                email: "nour@leoni.tn".into(),
                employee_id: "E7".into(),
                location: Some("Mateur".into()),
                department: Some("Production".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        (DocumentService::new(store), users, user)
    }

    fn submit(user: &User, description: &str) -> DocumentRequestInput {
        DocumentRequestInput {
            user_id: user.id.clone(),
            document_types: vec!["Tax Documents".into()],
            document_type: None,
            description: description.into(),
        }
    }

    fn status(new_status: &str) -> StatusUpdate {
        StatusUpdate { new_status: new_status.into(), comment: None }
    }

    #[tokio::test]
    async fn create_links_request_to_owner() {
        let (service, users, user) = setup().await;
        let request = service.create(submit(&user, "attestation")).await.unwrap();

        let owner = users.get(&Viewer::super_admin(), &user.id).await.unwrap();
        assert_eq!(owner.document_request_ids, vec![request.id.clone()]);
        assert_eq!(service.by_user(&user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_not_found() {
        let (service, _, user) = setup().await;
        let mut input = submit(&user, "x");
        input.user_id = "ghost".into();
        assert!(matches!(service.create(input).await, Err(ServiceError::NotFound(_))));
        assert!(service.list(&Viewer::super_admin()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_owner_link_removes_the_request() {
        let store: SharedStore = Arc::new(FrozenCollection {
            inner: MemoryDocumentStore::new(),
            collection: "users",
        });
        let user = UserService::new(store.clone())
            .create(UserInput {
                first_name: "Amel".into(),
                last_name: "Trabelsi".into(),
                email: "amel@leoni.tn".into(),
                employee_id: "E9".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let service = DocumentService::new(store.clone());

        assert!(service.create(submit(&user, "x")).await.is_err());
        assert_eq!(store.count("document_requests").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn status_follows_workflow() {
        let (service, _, user) = setup().await;
        let root = Viewer::super_admin();
        let request = service.create(submit(&user, "x")).await.unwrap();

        let err = service.update_status(&root, &request.id, status("accepté")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Workflow(WorkflowError::InvalidTransition { .. })));

        service.update_status(&root, &request.id, status("en cours")).await.unwrap();
        let done = service.update_status(&root, &request.id, status("accepté")).await.unwrap();
        assert_eq!(done.status.current, DocumentStatus::Accepted);
        assert!(done.status.step(DocumentStatus::InProgress).unwrap().completed);

        let err = service.update_status(&root, &request.id, status("refusé")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Workflow(WorkflowError::InvalidTransition { .. })));
        let stored = service.get(&root, &request.id).await.unwrap();
        assert_eq!(stored.status.current, DocumentStatus::Accepted);
    }

    #[tokio::test]
    async fn unknown_status_is_rejected_before_transition() {
        let (service, _, user) = setup().await;
        let request = service.create(submit(&user, "x")).await.unwrap();
        let err = service
            .update_status(&Viewer::super_admin(), &request.id, status("archived"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Workflow(WorkflowError::UnknownStatus(_))));
    }

    #[tokio::test]
    async fn delete_unlinks_owner() {
        let (service, users, user) = setup().await;
        let root = Viewer::super_admin();
        let keep = service.create(submit(&user, "keep")).await.unwrap();
        let dropped = service.create(submit(&user, "drop")).await.unwrap();

        service.delete(&root, &dropped.id).await.unwrap();
        let owner = users.get(&root, &user.id).await.unwrap();
        assert_eq!(owner.document_request_ids, vec![keep.id]);
        assert!(matches!(service.get(&root, &dropped.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn admins_see_requests_of_their_employees_only() {
        let (service, _, user) = setup().await;
        let request = service.create(submit(&user, "Attestation de travail")).await.unwrap();

        let inside = Viewer::admin("Mateur", "Production");
        let outside = Viewer::admin("Messadine", "Production");
        assert_eq!(service.list(&inside).await.unwrap().len(), 1);
        assert!(service.list(&outside).await.unwrap().is_empty());
        assert!(matches!(service.get(&outside, &request.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(service.search(&inside, "TRAVAIL").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stats_count_every_status() {
        let (service, _, user) = setup().await;
        let root = Viewer::super_admin();
        let a = service.create(submit(&user, "a")).await.unwrap();
        service.create(submit(&user, "b")).await.unwrap();
        service.update_status(&root, &a.id, status("refusé")).await.unwrap();

        let stats = service.stats(&root).await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_status["en attente"], 1);
        assert_eq!(stats.by_status["refusé"], 1);
        assert_eq!(stats.by_status["en cours"], 0);
        assert_eq!(service.by_status(&root, "refusé").await.unwrap().len(), 1);
        assert_eq!(service.by_type(&root, "tax documents").await.unwrap().len(), 2);

        let dashboard = service.dashboard(&root).await.unwrap();
        assert_eq!(dashboard.total_employees, 1);
        assert_eq!(dashboard.pending_employees, 1);
    }
}
