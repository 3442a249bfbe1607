//! Per-company branding applied to the public careers page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::rules::validate_hex_color;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BrandSettings {
    pub company_id: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBrandSettings {
    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub secondary_color: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
}

impl BrandSettings {
    /// Defaults used when a company has no saved branding yet.
    pub fn defaults(company_id: String) -> Self {
        Self {
            company_id,
            primary_color: "#000000".into(),
            secondary_color: "#ffffff".into(),
            logo_url: None,
            banner_url: None,
            tagline: None,
            description: None,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn update_rejects_malformed_color() {
        let payload = UpdateBrandSettings {
            primary_color: Some("red".into()),
            secondary_color: None,
            logo_url: None,
            banner_url: None,
            tagline: None,
            description: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_accepts_hex_color() {
        let payload = UpdateBrandSettings {
            primary_color: Some("#1a2b3c".into()),
            secondary_color: Some("#FFFFFF".into()),
            logo_url: None,
            banner_url: None,
            tagline: None,
            description: None,
        };
        assert!(payload.validate().is_ok());
    }
}
