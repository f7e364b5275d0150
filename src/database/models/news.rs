use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Document};
use crate::types::{NewsPriority, NewsStatus};
use crate::visibility::Scoped;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NewsVisibility {
    #[serde(default)]
    pub status: NewsStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: NewsPriority,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub visibility: NewsVisibility,
    pub author_ref: String,
    pub author_name: String,
    #[serde(default)]
    pub target_location: Option<String>,
    #[serde(default)]
    pub target_department: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl News {
    pub fn draft(input: NewsInput, author_ref: impl Into<String>, author_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            title: input.title,
            content: input.content,
            summary: input.summary,
            category: input.category,
            priority: input.priority.unwrap_or_default(),
            image_url: input.image_url,
            image_name: input.image_name,
            visibility: NewsVisibility::default(),
            author_ref: author_ref.into(),
            author_name: author_name.into(),
            target_location: input.target_location,
            target_department: input.target_department,
            created_at: now,
            published_at: None,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.visibility.status == NewsStatus::Published
    }
}

impl Document for News {
    const COLLECTION: &'static str = "news";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Scoped for News {
    fn scope_location(&self) -> Option<&str> {
        self.target_location.as_deref()
    }

    fn scope_department(&self) -> Option<&str> {
        self.target_department.as_deref()
    }

    fn scope_status(&self) -> Option<&str> {
        Some(self.visibility.status.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub priority: Option<NewsPriority>,
    pub image_url: Option<String>,
    pub image_name: Option<String>,
    pub target_location: Option<String>,
    pub target_department: Option<String>,
}
