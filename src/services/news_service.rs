use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::{optional, required, ServiceError};
use crate::database::models::news::NewsInput;
use crate::database::models::{Admin, News};
use crate::database::{Repository, SharedStore};
use crate::types::{NewsPriority, NewsStatus, Role};
use crate::visibility::{filter_visible, is_visible, Viewer, VisibilityQuery};

/// Filters of the employee-facing news feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicNewsQuery {
    pub location: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub priority: Option<NewsPriority>,
}

/// Who is writing: account id and display name.
#[derive(Debug, Clone)]
pub struct Author<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub viewer: &'a Viewer,
}

#[derive(Clone)]
pub struct NewsService {
    news: Repository<News>,
    admins: Repository<Admin>,
}

fn newest_first(items: &mut [News]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn same_text(a: &str, b: Option<&str>) -> bool {
    b.is_some_and(|b| b.trim().to_lowercase() == a.trim().to_lowercase())
}

impl NewsService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            news: Repository::new(store.clone()),
            admins: Repository::new(store),
        }
    }

    pub async fn create(&self, author: Author<'_>, input: NewsInput) -> Result<News, ServiceError> {
        let title = required("title", &input.title)?;
        let content = required("content", &input.content)?;

        let mut news = News::draft(input, author.id, author.name);
        news.title = title;
        news.content = content;
        news.summary = optional(news.summary);
        news.category = optional(news.category);

        match author.viewer.role {
            Role::Admin => {
                // Admin news always targets the author's own scope.
                let profile = self.admins.select_one(author.id).await?;
                let (location, department) = match profile {
                    Some(admin) => (admin.location, admin.department),
                    None => (author.viewer.location.clone(), author.viewer.department.clone()),
                };
                news.target_location = location;
                news.target_department = department;
            }
            Role::SuperAdmin => {
                news.target_location = optional(news.target_location);
                news.target_department = optional(news.target_department);
            }
        }

        self.news.insert(&news).await?;
        info!("News {} drafted by {}", news.id, author.name);
        Ok(news)
    }

    /// `query.status` filters on the publication state.
    pub async fn list(&self, viewer: &Viewer, query: &VisibilityQuery) -> Result<Vec<News>, ServiceError> {
        let mut items = filter_visible(viewer, query, self.news.select_all().await?);
        newest_first(&mut items);
        Ok(items)
    }

    /// Published news for an exact location and department.
    pub async fn public(&self, query: &PublicNewsQuery) -> Result<Vec<News>, ServiceError> {
        let location = required("location", query.location.as_deref().unwrap_or_default())?;
        let department = required("department", query.department.as_deref().unwrap_or_default())?;
        let category = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty());

        let mut items: Vec<News> = self
            .news
            .select_all()
            .await?
            .into_iter()
            .filter(|n| n.is_published())
            .filter(|n| same_text(&location, n.target_location.as_deref()))
            .filter(|n| same_text(&department, n.target_department.as_deref()))
            .filter(|n| category.map_or(true, |c| same_text(c, n.category.as_deref())))
            .filter(|n| query.priority.map_or(true, |p| n.priority == p))
            .collect();
        newest_first(&mut items);
        Ok(items)
    }

    pub async fn get(&self, viewer: &Viewer, id: &str) -> Result<News, ServiceError> {
        let news = self
            .news
            .select_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("News", id))?;
        if !is_visible(viewer, &VisibilityQuery::default(), &news) {
            return Err(ServiceError::not_found("News", id));
        }
        Ok(news)
    }

    pub async fn update(&self, viewer: &Viewer, id: &str, input: NewsInput) -> Result<News, ServiceError> {
        let mut news = self.get(viewer, id).await?;
        news.title = required("title", &input.title)?;
        news.content = required("content", &input.content)?;
        news.summary = optional(input.summary);
        news.category = optional(input.category);
        if let Some(priority) = input.priority {
            news.priority = priority;
        }
        if input.image_url.is_some() {
            news.image_url = optional(input.image_url);
            news.image_name = optional(input.image_name);
        }
        if viewer.role == Role::SuperAdmin {
            news.target_location = optional(input.target_location);
            news.target_department = optional(input.target_department);
        }
        news.updated_at = Utc::now();

        self.news.update(&news).await?;
        Ok(news)
    }

    pub async fn publish(&self, viewer: &Viewer, id: &str) -> Result<News, ServiceError> {
        self.set_status(viewer, id, NewsStatus::Published).await
    }

    pub async fn archive(&self, viewer: &Viewer, id: &str) -> Result<News, ServiceError> {
        self.set_status(viewer, id, NewsStatus::Archived).await
    }

    pub async fn delete(&self, viewer: &Viewer, id: &str) -> Result<(), ServiceError> {
        self.get(viewer, id).await?;
        self.news.delete(id).await?;
        info!("Deleted news {}", id);
        Ok(())
    }

    async fn set_status(&self, viewer: &Viewer, id: &str, status: NewsStatus) -> Result<News, ServiceError> {
        let mut news = self.get(viewer, id).await?;
        let now = Utc::now();
        news.visibility.status = status;
        if status == NewsStatus::Published {
            news.published_at = Some(now);
        }
        news.updated_at = now;

        self.news.update(&news).await?;
        info!("News {} is now {}", id, status.as_str());
        Ok(news)
    }
}
