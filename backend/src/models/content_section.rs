//! Editable content blocks rendered on a company's careers page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ContentSection {
    pub id: String,
    pub company_id: String,
    /// Section kind: about, culture, benefits, values, team, or video.
    pub kind: String,
    pub title: String,
    pub content: String,
    /// Render order on the page, ascending.
    pub position: i32,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateContentSection {
    #[validate(length(min = 1, message = "kind is required"))]
    pub kind: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateContentSection {
    pub kind: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: Option<i32>,
    pub is_visible: Option<bool>,
}

fn default_visible() -> bool {
    true
}

impl ContentSection {
    pub fn new(company_id: String, payload: CreateContentSection) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            kind: payload.kind,
            title: payload.title,
            content: payload.content,
            position: payload.position,
            is_visible: payload.is_visible,
            created_at: now,
            updated_at: now,
        }
    }
}
