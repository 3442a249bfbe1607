//! Company records backing each branded careers page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::validate_slug;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: String,
    pub name: String,
    /// URL segment of the public careers page, unique.
    pub slug: String,
    pub status: CompanyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum CompanyStatus {
    Active,
    #[default]
    Draft,
    Archived,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Active => "active",
            CompanyStatus::Draft => "draft",
            CompanyStatus::Archived => "archived",
        }
    }
}

impl Serialize for CompanyStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CompanyStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(CompanyStatus::Active),
            "draft" => Ok(CompanyStatus::Draft),
            "archived" => Ok(CompanyStatus::Archived),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["active", "draft", "archived"],
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompany {
    #[validate(length(min = 1, message = "company name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[serde(default)]
    pub status: CompanyStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub status: Option<CompanyStatus>,
}

impl Company {
    pub fn new(name: String, slug: String, status: CompanyStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}
