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
        content_section::{ContentSection, CreateContentSection},
        user::UserRole,
    },
    repositories::content as content_repo,
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

async fn seed_section(pool: &PgPool, company_id: &str, visible: bool) -> ContentSection {
    let section = ContentSection::new(
        company_id.to_string(),
        CreateContentSection {
            kind: "culture".into(),
            title: "Our culture".into(),
            content: "We ship.".into(),
            position: 0,
            is_visible: visible,
        },
    );
    content_repo::insert_section(pool, &section)
        .await
        .expect("insert section");
    section
}

#[tokio::test]
async fn public_company_lookup_hides_archived_companies() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let active = support::seed_company(&pool, CompanyStatus::Active).await;
    let archived = support::seed_company(&pool, CompanyStatus::Archived).await;

    let found = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/companies/{}", active.slug))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(found.status(), StatusCode::OK);
    let body = response_json(found).await;
    assert_eq!(body["slug"], active.slug.as_str());

    let hidden = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/companies/{}", archived.slug))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_creates_company_and_duplicate_slug_conflicts() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let admin = support::seed_user(&pool, UserRole::Admin, None, "Password123!").await;
    let slug = format!("acme-{}", Uuid::new_v4().simple());

    let created = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/companies")
                .header(header::AUTHORIZATION, support::bearer(&admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Acme", "slug": slug }).to_string(),
                ))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = response_json(created).await;
    assert_eq!(body["status"], "draft");

    let duplicate = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/companies")
                .header(header::AUTHORIZATION, support::bearer(&admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Acme Again", "slug": slug }).to_string(),
                ))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_company_rejects_malformed_slug() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let admin = support::seed_user(&pool, UserRole::Admin, None, "Password123!").await;

    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/companies")
                .header(header::AUTHORIZATION, support::bearer(&admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Acme", "slug": "Not A Slug" }).to_string(),
                ))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn hidden_sections_are_visible_only_to_company_staff() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let company = support::seed_company(&pool, CompanyStatus::Active).await;
    seed_section(&pool, &company.id, true).await;
    seed_section(&pool, &company.id, false).await;

    let uri = format!("/api/companies/{}/sections", company.slug);

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
    assert_eq!(body.as_array().expect("sections").len(), 1);

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
    assert_eq!(body.as_array().expect("sections").len(), 2);
}

#[tokio::test]
async fn brand_settings_default_then_persist_updates() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let company = support::seed_company(&pool, CompanyStatus::Active).await;
    let uri = format!("/api/companies/{}/brand", company.slug);

    let defaults = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(defaults.status(), StatusCode::OK);
    let body = response_json(defaults).await;
    assert_eq!(body["primary_color"], "#000000");

    let recruiter = support::seed_user(
        &pool,
        UserRole::Recruiter,
        Some(company.id.clone()),
        "Password123!",
    )
    .await;
    let updated = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(&uri)
                .header(header::AUTHORIZATION, support::bearer(&recruiter))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "primary_color": "#336699", "tagline": "Join us" }).to_string(),
                ))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(updated.status(), StatusCode::OK);

    let after = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    let body = response_json(after).await;
    assert_eq!(body["primary_color"], "#336699");
    assert_eq!(body["tagline"], "Join us");
}

#[tokio::test]
async fn brand_update_rejects_malformed_color() {
    let _guard = integration_guard().await;
    let pool = support::test_pool().await;
    support::migrate_db(&pool).await;

    let company = support::seed_company(&pool, CompanyStatus::Active).await;
    let admin = support::seed_user(&pool, UserRole::Admin, None, "Password123!").await;

    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/companies/{}/brand", company.slug))
                .header(header::AUTHORIZATION, support::bearer(&admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "primary_color": "red" }).to_string()))
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
