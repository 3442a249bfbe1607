//! Job postings. The public listing varies by caller: anonymous visitors and
//! out-of-company users see active jobs only, while admins and the owning
//! company's recruiters also see drafts, closed, and archived postings.

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
    models::job::{CreateJob, Job, JobListResponse, UpdateJob},
    repositories::jobs as jobs_repo,
    state::AppState,
};

pub async fn list_company_jobs(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(MaybeUser(principal)): Extension<MaybeUser>,
) -> Result<Json<JobListResponse>, AppError> {
    let company = resolve_company(&state, &slug).await?;

    let include_nonpublic = match &principal {
        Some(user) => rbac::ensure_company_access(&state.pool, user, &company)
            .await
            .is_ok(),
        None => false,
    };

    let jobs =
        jobs_repo::list_jobs_for_company(&state.pool, &company.id, include_nonpublic).await?;
    Ok(Json(JobListResponse { jobs }))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path((slug, job_id)): Path<(String, String)>,
) -> Result<Json<Job>, AppError> {
    let company = resolve_company(&state, &slug).await?;
    let job = jobs_repo::find_job(&state.pool, &company.id, &job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    Ok(Json(job))
}

pub async fn create_job(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<CreateJob>,
) -> Result<impl IntoResponse, AppError> {
    let company = resolve_company(&state, &slug).await?;
    rbac::ensure_company_access(&state.pool, &principal, &company).await?;
    payload.validate()?;

    if jobs_repo::slug_taken_for_company(&state.pool, &company.id, &payload.slug).await? {
        return Err(AppError::Conflict(
            "Job slug already in use for this company".to_string(),
        ));
    }

    let job = Job::new(company.id.clone(), payload);
    jobs_repo::insert_job(&state.pool, &job).await?;
    tracing::info!(job_id = %job.id, company_id = %company.id, "Job created");

    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update_job(
    State(state): State<AppState>,
    Path((slug, job_id)): Path<(String, String)>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<UpdateJob>,
) -> Result<Json<Job>, AppError> {
    let company = resolve_company(&state, &slug).await?;
    rbac::ensure_company_access(&state.pool, &principal, &company).await?;

    let mut job = jobs_repo::find_job(&state.pool, &company.id, &job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if let Some(title) = payload.title {
        job.title = title;
    }
    if let Some(description) = payload.description {
        job.description = description;
    }
    if let Some(location) = payload.location {
        job.location = location;
    }
    if let Some(department) = payload.department {
        job.department = department;
    }
    if let Some(employment_type) = payload.employment_type {
        job.employment_type = employment_type;
    }
    if let Some(status) = payload.status {
        job.status = status;
    }
    job.updated_at = Utc::now();

    jobs_repo::update_job(&state.pool, &job).await?;
    Ok(Json(job))
}

pub async fn delete_job(
    State(state): State<AppState>,
    Path((slug, job_id)): Path<(String, String)>,
    Extension(principal): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let company = resolve_company(&state, &slug).await?;
    rbac::ensure_company_access(&state.pool, &principal, &company).await?;

    let deleted = jobs_repo::delete_job(&state.pool, &company.id, &job_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Job not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Job deleted" })))
}
