//! Queries for careers-page content sections and brand settings.

use sqlx::PgPool;

use crate::models::{
    brand_settings::BrandSettings,
    content_section::ContentSection,
};

const SECTION_COLUMNS: &str =
    "id, company_id, kind, title, content, position, is_visible, created_at, updated_at";

pub async fn list_sections_for_company(
    pool: &PgPool,
    company_id: &str,
    visible_only: bool,
) -> Result<Vec<ContentSection>, sqlx::Error> {
    if visible_only {
        sqlx::query_as::<_, ContentSection>(&format!(
            "SELECT {SECTION_COLUMNS} FROM content_sections \
             WHERE company_id = $1 AND is_visible = TRUE ORDER BY position"
        ))
        .bind(company_id)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, ContentSection>(&format!(
            "SELECT {SECTION_COLUMNS} FROM content_sections WHERE company_id = $1 \
             ORDER BY position"
        ))
        .bind(company_id)
        .fetch_all(pool)
        .await
    }
}

pub async fn find_section(
    pool: &PgPool,
    company_id: &str,
    section_id: &str,
) -> Result<Option<ContentSection>, sqlx::Error> {
    sqlx::query_as::<_, ContentSection>(&format!(
        "SELECT {SECTION_COLUMNS} FROM content_sections WHERE id = $1 AND company_id = $2"
    ))
    .bind(section_id)
    .bind(company_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_section(pool: &PgPool, section: &ContentSection) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO content_sections (id, company_id, kind, title, content, position, \
         is_visible, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&section.id)
    .bind(&section.company_id)
    .bind(&section.kind)
    .bind(&section.title)
    .bind(&section.content)
    .bind(section.position)
    .bind(section.is_visible)
    .bind(section.created_at)
    .bind(section.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn update_section(pool: &PgPool, section: &ContentSection) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE content_sections SET kind = $2, title = $3, content = $4, position = $5, \
         is_visible = $6, updated_at = $7 WHERE id = $1",
    )
    .bind(&section.id)
    .bind(&section.kind)
    .bind(&section.title)
    .bind(&section.content)
    .bind(section.position)
    .bind(section.is_visible)
    .bind(section.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn delete_section(
    pool: &PgPool,
    company_id: &str,
    section_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM content_sections WHERE id = $1 AND company_id = $2")
        .bind(section_id)
        .bind(company_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn find_brand_settings(
    pool: &PgPool,
    company_id: &str,
) -> Result<Option<BrandSettings>, sqlx::Error> {
    sqlx::query_as::<_, BrandSettings>(
        "SELECT company_id, primary_color, secondary_color, logo_url, banner_url, tagline, \
         description, updated_at FROM brand_settings WHERE company_id = $1",
    )
    .bind(company_id)
    .fetch_optional(pool)
    .await
}

pub async fn upsert_brand_settings(
    pool: &PgPool,
    settings: &BrandSettings,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO brand_settings (company_id, primary_color, secondary_color, logo_url, \
         banner_url, tagline, description, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (company_id) DO UPDATE SET primary_color = $2, secondary_color = $3, \
         logo_url = $4, banner_url = $5, tagline = $6, description = $7, updated_at = $8",
    )
    .bind(&settings.company_id)
    .bind(&settings.primary_color)
    .bind(&settings.secondary_color)
    .bind(&settings.logo_url)
    .bind(&settings.banner_url)
    .bind(&settings.tagline)
    .bind(&settings.description)
    .bind(settings.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}
