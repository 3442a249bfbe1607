use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use talentgate_backend::{
    models::{
        company::CompanyStatus,
        job::{CreateJob, Job, JobStatus},
        user::UserRole,
    },
    repositories::jobs as jobs_repo,
    routes::build_router,
};
use tower::ServiceExt;
use uuid::Uuid;

mod support;

async fn integration_guard() -> tokio::sync::MutexGuard<'static, ()> {
    static GUARD: std::sync::OnceLock<tokio::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD
        .get_or_init(|| tokio::sync::Mutex::new(()))
        .lock()
        .await
}

fn app(pool: PgPool) -> Router {
    build_router(support::test_state(pool))
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json body")
}

async fn seed_job(pool: &PgPool, company_id: &str, status: JobStatus) -> Job {
    let payload = CreateJob {
        title: "Backend Engineer".into(),
        slug: format!("job-{}", Uuid::new_v4().simple()),
        description: "Build things".into(),
        location: "Remote".into(),
        department: "Engineering".into(),
        employment_type: "Full-time".into(),
        status,
    };
    let mut job = Job::new(company_id.to_string(), payload);
    job.status = status;
    jobs_repo::insert_job(pool, &job).await.expect("insert job");
    job
}

#[tokio::test]
async fn admin_route_answers_401_for_anonymous_and_403_for_wrong_role() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let anonymous = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let company = support::seed_company(&pool, CompanyStatus::Active).await;
    let recruiter = support::seed_user(
        &pool,
        UserRole::Recruiter,
        Some(company.id.clone()),
        "Password123!",
    )
    .await;

    // Authenticated but under-privileged: must be 403, never 401.
    let forbidden = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users")
                .header(header::AUTHORIZATION, support::bearer(&recruiter))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn candidate_cannot_reach_staff_routes() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let company = support::seed_company(&pool, CompanyStatus::Active).await;
    let candidate = support::seed_user(&pool, UserRole::Candidate, None, "Password123!").await;

    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/companies/{}/jobs", company.slug))
                .header(header::AUTHORIZATION, support::bearer(&candidate))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "title": "Job",
                        "slug": "job",
                        "location": "Remote"
                    })
                    .to_string(),
                ))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn recruiter_cannot_mutate_another_companys_jobs() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let own_company = support::seed_company(&pool, CompanyStatus::Active).await;
    let other_company = support::seed_company(&pool, CompanyStatus::Active).await;
    let recruiter = support::seed_user(
        &pool,
        UserRole::Recruiter,
        Some(own_company.id.clone()),
        "Password123!",
    )
    .await;

    // Passes the staff role gate, fails the company-scope policy.
    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/companies/{}/jobs", other_company.slug))
                .header(header::AUTHORIZATION, support::bearer(&recruiter))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "title": "Job",
                        "slug": "job",
                        "location": "Remote"
                    })
                    .to_string(),
                ))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let own = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/companies/{}/jobs", own_company.slug))
                .header(header::AUTHORIZATION, support::bearer(&recruiter))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "title": "Job",
                        "slug": format!("job-{}", Uuid::new_v4().simple()),
                        "location": "Remote"
                    })
                    .to_string(),
                ))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(own.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn company_scope_reflects_reassignment_immediately() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let company_a = support::seed_company(&pool, CompanyStatus::Active).await;
    let company_b = support::seed_company(&pool, CompanyStatus::Active).await;
    let recruiter = support::seed_user(
        &pool,
        UserRole::Recruiter,
        Some(company_a.id.clone()),
        "Password123!",
    )
    .await;
    let token = support::bearer(&recruiter);

    // Reassign in the database; the held access token still names company A
    // claims but the policy re-reads the row.
    sqlx::query("UPDATE users SET company_id = $2 WHERE id = $1")
        .bind(&recruiter.id)
        .bind(&company_b.id)
        .execute(&pool)
        .await
        .expect("reassign recruiter");

    let old_company = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/companies/{}/brand", company_a.slug))
                .header(header::AUTHORIZATION, token.clone())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "primary_color": "#112233" }).to_string()))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(old_company.status(), StatusCode::FORBIDDEN);

    let new_company = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/companies/{}/brand", company_b.slug))
                .header(header::AUTHORIZATION, token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "primary_color": "#112233" }).to_string()))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(new_company.status(), StatusCode::OK);
}

#[tokio::test]
async fn job_listing_visibility_varies_by_caller() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let company = support::seed_company(&pool, CompanyStatus::Active).await;
    seed_job(&pool, &company.id, JobStatus::Active).await;
    seed_job(&pool, &company.id, JobStatus::Draft).await;
    seed_job(&pool, &company.id, JobStatus::Archived).await;

    let uri = format!("/api/companies/{}/jobs", company.slug);

    let anonymous = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(anonymous.status(), StatusCode::OK);
    let body = response_json(anonymous).await;
    assert_eq!(body["jobs"].as_array().expect("jobs array").len(), 1);

    let candidate = support::seed_user(&pool, UserRole::Candidate, None, "Password123!").await;
    let candidate_view = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .header(header::AUTHORIZATION, support::bearer(&candidate))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    let body = response_json(candidate_view).await;
    assert_eq!(body["jobs"].as_array().expect("jobs array").len(), 1);

    let recruiter = support::seed_user(
        &pool,
        UserRole::Recruiter,
        Some(company.id.clone()),
        "Password123!",
    )
    .await;
    let staff_view = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .header(header::AUTHORIZATION, support::bearer(&recruiter))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    let body = response_json(staff_view).await;
    assert_eq!(body["jobs"].as_array().expect("jobs array").len(), 3);

    let admin = support::seed_user(&pool, UserRole::Admin, None, "Password123!").await;
    let admin_view = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .header(header::AUTHORIZATION, support::bearer(&admin))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    let body = response_json(admin_view).await;
    assert_eq!(body["jobs"].as_array().expect("jobs array").len(), 3);
}

#[tokio::test]
async fn expired_access_token_is_unauthorized_not_forbidden() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let admin = support::seed_user(&pool, UserRole::Admin, None, "Password123!").await;
    let config = support::test_config();
    let expired = talentgate_backend::utils::jwt::create_access_token(
        &admin.id,
        &admin.email,
        admin.role,
        &config.access_token_secret,
        -1,
    )
    .expect("create expired token");

    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users")
                .header(header::AUTHORIZATION, format!("Bearer {expired}"))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
