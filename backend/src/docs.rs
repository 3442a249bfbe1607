#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::models::{
    brand_settings::{BrandSettings, UpdateBrandSettings},
    company::{Company, CompanyStatus, CreateCompany, UpdateCompany},
    content_section::{ContentSection, CreateContentSection, UpdateContentSection},
    job::{CreateJob, Job, JobListResponse, JobStatus, UpdateJob},
    user::{
        AuthResponse, LoginRequest, MeResponse, RegisterRequest, SafeUser, UpdateProfile,
        UpdateUser, UserRole,
    },
};
use axum::Json;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        register_doc,
        login_doc,
        refresh_doc,
        logout_doc,
        me_doc,
        list_companies_doc,
        create_company_doc,
        get_company_doc,
        update_company_doc,
        delete_company_doc,
        list_jobs_doc,
        get_job_doc,
        create_job_doc,
        update_job_doc,
        delete_job_doc,
        list_sections_doc,
        create_section_doc,
        update_section_doc,
        delete_section_doc,
        get_brand_doc,
        update_brand_doc,
        list_users_doc,
        create_user_doc,
        update_user_doc,
        delete_user_doc,
        update_profile_doc
    ),
    components(
        schemas(
            // auth
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            MeResponse,
            SafeUser,
            UserRole,
            // users
            UpdateUser,
            UpdateProfile,
            // companies
            Company,
            CompanyStatus,
            CreateCompany,
            UpdateCompany,
            // jobs
            Job,
            JobStatus,
            CreateJob,
            UpdateJob,
            JobListResponse,
            // content & branding
            ContentSection,
            CreateContentSection,
            UpdateContentSection,
            BrandSettings,
            UpdateBrandSettings
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Auth", description = "Registration, login, token refresh, logout"),
        (name = "Companies", description = "Company management and public careers-page lookup"),
        (name = "Jobs", description = "Job postings per company"),
        (name = "Content", description = "Careers-page content sections and brand settings"),
        (name = "Users", description = "Admin user management and profiles")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

/// Serves the generated document; the interactive UI is expected to be
/// hosted externally (e.g. an editor plugin or a standalone viewer).
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, session started", body = AuthResponse),
        (status = 409, description = "Email or username already registered")
    ),
    tag = "Auth",
    security(())
)]
fn register_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "Auth",
    security(())
)]
fn login_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "New access token issued", body = AuthResponse),
        (status = 401, description = "Missing, invalid, or expired refresh cookie")
    ),
    tag = "Auth",
    security(())
)]
fn refresh_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session ended, cookie cleared")),
    tag = "Auth"
)]
fn logout_doc() {}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 404, description = "Account deleted after token issuance")
    ),
    tag = "Auth"
)]
fn me_doc() {}

#[utoipa::path(
    get,
    path = "/api/companies",
    responses((status = 200, body = [Company])),
    tag = "Companies"
)]
fn list_companies_doc() {}

#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompany,
    responses(
        (status = 201, body = Company),
        (status = 409, description = "Slug already in use")
    ),
    tag = "Companies"
)]
fn create_company_doc() {}

#[utoipa::path(
    get,
    path = "/api/companies/{slug}",
    params(("slug" = String, Path, description = "Company slug")),
    responses(
        (status = 200, body = Company),
        (status = 404, description = "Missing or archived")
    ),
    tag = "Companies",
    security(())
)]
fn get_company_doc() {}

#[utoipa::path(
    put,
    path = "/api/companies/{slug}",
    params(("slug" = String, Path, description = "Company slug")),
    request_body = UpdateCompany,
    responses((status = 200, body = Company)),
    tag = "Companies"
)]
fn update_company_doc() {}

#[utoipa::path(
    delete,
    path = "/api/companies/{slug}",
    params(("slug" = String, Path, description = "Company slug")),
    responses((status = 200, description = "Company deleted")),
    tag = "Companies"
)]
fn delete_company_doc() {}

#[utoipa::path(
    get,
    path = "/api/companies/{slug}/jobs",
    params(("slug" = String, Path, description = "Company slug")),
    responses((status = 200, body = JobListResponse)),
    tag = "Jobs",
    security(())
)]
fn list_jobs_doc() {}

#[utoipa::path(
    get,
    path = "/api/companies/{slug}/jobs/{job_id}",
    params(
        ("slug" = String, Path, description = "Company slug"),
        ("job_id" = String, Path, description = "Job id")
    ),
    responses((status = 200, body = Job)),
    tag = "Jobs",
    security(())
)]
fn get_job_doc() {}

#[utoipa::path(
    post,
    path = "/api/companies/{slug}/jobs",
    params(("slug" = String, Path, description = "Company slug")),
    request_body = CreateJob,
    responses((status = 201, body = Job)),
    tag = "Jobs"
)]
fn create_job_doc() {}

#[utoipa::path(
    put,
    path = "/api/companies/{slug}/jobs/{job_id}",
    params(
        ("slug" = String, Path, description = "Company slug"),
        ("job_id" = String, Path, description = "Job id")
    ),
    request_body = UpdateJob,
    responses((status = 200, body = Job)),
    tag = "Jobs"
)]
fn update_job_doc() {}

#[utoipa::path(
    delete,
    path = "/api/companies/{slug}/jobs/{job_id}",
    params(
        ("slug" = String, Path, description = "Company slug"),
        ("job_id" = String, Path, description = "Job id")
    ),
    responses((status = 200, description = "Job deleted")),
    tag = "Jobs"
)]
fn delete_job_doc() {}

#[utoipa::path(
    get,
    path = "/api/companies/{slug}/sections",
    params(("slug" = String, Path, description = "Company slug")),
    responses((status = 200, body = [ContentSection])),
    tag = "Content",
    security(())
)]
fn list_sections_doc() {}

#[utoipa::path(
    post,
    path = "/api/companies/{slug}/sections",
    params(("slug" = String, Path, description = "Company slug")),
    request_body = CreateContentSection,
    responses((status = 201, body = ContentSection)),
    tag = "Content"
)]
fn create_section_doc() {}

#[utoipa::path(
    put,
    path = "/api/companies/{slug}/sections/{section_id}",
    params(
        ("slug" = String, Path, description = "Company slug"),
        ("section_id" = String, Path, description = "Section id")
    ),
    request_body = UpdateContentSection,
    responses((status = 200, body = ContentSection)),
    tag = "Content"
)]
fn update_section_doc() {}

#[utoipa::path(
    delete,
    path = "/api/companies/{slug}/sections/{section_id}",
    params(
        ("slug" = String, Path, description = "Company slug"),
        ("section_id" = String, Path, description = "Section id")
    ),
    responses((status = 200, description = "Section deleted")),
    tag = "Content"
)]
fn delete_section_doc() {}

#[utoipa::path(
    get,
    path = "/api/companies/{slug}/brand",
    params(("slug" = String, Path, description = "Company slug")),
    responses((status = 200, body = BrandSettings)),
    tag = "Content",
    security(())
)]
fn get_brand_doc() {}

#[utoipa::path(
    put,
    path = "/api/companies/{slug}/brand",
    params(("slug" = String, Path, description = "Company slug")),
    request_body = UpdateBrandSettings,
    responses((status = 200, body = BrandSettings)),
    tag = "Content"
)]
fn update_brand_doc() {}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, body = [SafeUser])),
    tag = "Users"
)]
fn list_users_doc() {}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses((status = 201, body = SafeUser)),
    tag = "Users"
)]
fn create_user_doc() {}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUser,
    responses((status = 200, body = SafeUser)),
    tag = "Users"
)]
fn update_user_doc() {}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "User deleted")),
    tag = "Users"
)]
fn delete_user_doc() {}

#[utoipa::path(
    put,
    path = "/api/users/{id}/profile",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateProfile,
    responses((status = 200, body = SafeUser)),
    tag = "Users"
)]
fn update_profile_doc() {}
