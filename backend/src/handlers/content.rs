//! Careers-page content sections and brand settings. Reads are public with
//! visibility filtering; mutations are limited to admins and the owning
//! company's recruiters.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::companies::resolve_company,
    middleware::{
        auth::{AuthUser, MaybeUser},
        rbac,
    },
    models::{
        brand_settings::{BrandSettings, UpdateBrandSettings},
        content_section::{ContentSection, CreateContentSection, UpdateContentSection},
    },
    repositories::content as content_repo,
    state::AppState,
};

pub async fn list_sections(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(MaybeUser(principal)): Extension<MaybeUser>,
) -> Result<Json<Vec<ContentSection>>, AppError> {
    let company = resolve_company(&state, &slug).await?;

    let include_hidden = match &principal {
        Some(user) => rbac::ensure_company_access(&state.pool, user, &company)
            .await
            .is_ok(),
        None => false,
    };

    let sections =
        content_repo::list_sections_for_company(&state.pool, &company.id, !include_hidden).await?;
    Ok(Json(sections))
}

pub async fn create_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<CreateContentSection>,
) -> Result<impl IntoResponse, AppError> {
    let company = resolve_company(&state, &slug).await?;
    rbac::ensure_company_access(&state.pool, &principal, &company).await?;
    payload.validate()?;

    let section = ContentSection::new(company.id.clone(), payload);
    content_repo::insert_section(&state.pool, &section).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

pub async fn update_section(
    State(state): State<AppState>,
    Path((slug, section_id)): Path<(String, String)>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<UpdateContentSection>,
) -> Result<Json<ContentSection>, AppError> {
    let company = resolve_company(&state, &slug).await?;
    rbac::ensure_company_access(&state.pool, &principal, &company).await?;

    let mut section = content_repo::find_section(&state.pool, &company.id, &section_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Content section not found".to_string()))?;

    if let Some(kind) = payload.kind {
        section.kind = kind;
    }
    if let Some(title) = payload.title {
        section.title = title;
    }
    if let Some(content) = payload.content {
        section.content = content;
    }
    if let Some(position) = payload.position {
        section.position = position;
    }
    if let Some(is_visible) = payload.is_visible {
        section.is_visible = is_visible;
    }
    section.updated_at = Utc::now();

    content_repo::update_section(&state.pool, &section).await?;
    Ok(Json(section))
}

pub async fn delete_section(
    State(state): State<AppState>,
    Path((slug, section_id)): Path<(String, String)>,
    Extension(principal): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let company = resolve_company(&state, &slug).await?;
    rbac::ensure_company_access(&state.pool, &principal, &company).await?;

    let deleted = content_repo::delete_section(&state.pool, &company.id, &section_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Content section not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Section deleted" })))
}

/// Public read; answers with defaults when the company has saved no branding.
pub async fn get_brand_settings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BrandSettings>, AppError> {
    let company = resolve_company(&state, &slug).await?;

    let settings = content_repo::find_brand_settings(&state.pool, &company.id)
        .await?
        .unwrap_or_else(|| BrandSettings::defaults(company.id.clone()));
    Ok(Json(settings))
}

pub async fn update_brand_settings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<UpdateBrandSettings>,
) -> Result<Json<BrandSettings>, AppError> {
    let company = resolve_company(&state, &slug).await?;
    rbac::ensure_company_access(&state.pool, &principal, &company).await?;
    payload.validate()?;

    let mut settings = content_repo::find_brand_settings(&state.pool, &company.id)
        .await?
        .unwrap_or_else(|| BrandSettings::defaults(company.id.clone()));

    if let Some(primary_color) = payload.primary_color {
        settings.primary_color = primary_color;
    }
    if let Some(secondary_color) = payload.secondary_color {
        settings.secondary_color = secondary_color;
    }
    if let Some(logo_url) = payload.logo_url {
        settings.logo_url = Some(logo_url);
    }
    if let Some(banner_url) = payload.banner_url {
        settings.banner_url = Some(banner_url);
    }
    if let Some(tagline) = payload.tagline {
        settings.tagline = Some(tagline);
    }
    if let Some(description) = payload.description {
        settings.description = Some(description);
    }
    settings.updated_at = Utc::now();

    content_repo::upsert_brand_settings(&state.pool, &settings).await?;
    Ok(Json(settings))
}
