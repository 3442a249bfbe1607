//! Company management (admin) and the public company lookup behind each
//! branded careers page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::company::{Company, CompanyStatus, CreateCompany, UpdateCompany},
    repositories::companies as companies_repo,
    state::AppState,
    validation::rules::validate_slug,
};

pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = companies_repo::list_companies(&state.pool).await?;
    Ok(Json(companies))
}

pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompany>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if companies_repo::slug_taken(&state.pool, &payload.slug, None).await? {
        return Err(AppError::Conflict(
            "Company slug already in use".to_string(),
        ));
    }

    let company = Company::new(payload.name, payload.slug, payload.status);
    companies_repo::insert_company(&state.pool, &company).await?;
    tracing::info!(company_id = %company.id, slug = %company.slug, "Company created");

    Ok((StatusCode::CREATED, Json(company)))
}

/// Public lookup backing the careers page. Archived companies are hidden.
pub async fn get_company_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Company>, AppError> {
    let company = companies_repo::find_company_by_slug(&state.pool, &slug)
        .await?
        .filter(|company| company.status != CompanyStatus::Archived)
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateCompany>,
) -> Result<Json<Company>, AppError> {
    let mut company = resolve_company(&state, &slug).await?;

    if let Some(name) = payload.name {
        company.name = name;
    }
    if let Some(new_slug) = payload.slug {
        validate_slug(&new_slug)
            .map_err(|_| AppError::BadRequest("Invalid company slug".to_string()))?;
        if new_slug != company.slug
            && companies_repo::slug_taken(&state.pool, &new_slug, Some(&company.id)).await?
        {
            return Err(AppError::Conflict(
                "Company slug already in use".to_string(),
            ));
        }
        company.slug = new_slug;
    }
    if let Some(status) = payload.status {
        company.status = status;
    }
    company.updated_at = Utc::now();

    companies_repo::update_company(&state.pool, &company).await?;
    Ok(Json(company))
}

pub async fn delete_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let company = resolve_company(&state, &slug).await?;
    companies_repo::delete_company(&state.pool, &company.id).await?;
    tracing::info!(company_id = %company.id, "Company deleted");
    Ok(Json(serde_json::json!({ "message": "Company deleted" })))
}

/// Slug-addressed lookup shared by the company-scoped handlers; no status
/// filter, staff keep working with draft and archived companies.
pub async fn resolve_company(state: &AppState, slug: &str) -> Result<Company, AppError> {
    companies_repo::find_company_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}
