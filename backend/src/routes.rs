//! Route table. Routers are grouped by their auth requirement and merged;
//! per-group middleware is attached with `route_layer` so unmatched paths
//! still produce a plain 404 instead of a 401.

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};

use crate::{
    docs, handlers,
    middleware::{auth as auth_mw, logging, rbac, request_id},
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route(
            "/api/companies/{slug}",
            get(handlers::companies::get_company_by_slug),
        )
        .route(
            "/api/companies/{slug}/jobs/{job_id}",
            get(handlers::jobs::get_job),
        )
        .route(
            "/api/companies/{slug}/brand",
            get(handlers::content::get_brand_settings),
        )
        .route("/api/docs/openapi.json", get(docs::openapi_json));

    // Read endpoints whose visibility varies by caller.
    let optional_auth_routes = Router::new()
        .route(
            "/api/companies/{slug}/jobs",
            get(handlers::jobs::list_company_jobs),
        )
        .route(
            "/api/companies/{slug}/sections",
            get(handlers::content::list_sections),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_mw::optional_auth,
        ));

    let authed_routes = Router::new()
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/users/{id}/profile",
            put(handlers::users::update_profile),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_mw::require_auth,
        ));

    // Admin or recruiter; handlers additionally run ensure_company_access
    // against the addressed company.
    let staff_routes = Router::new()
        .route(
            "/api/companies/{slug}/jobs",
            post(handlers::jobs::create_job),
        )
        .route(
            "/api/companies/{slug}/jobs/{job_id}",
            put(handlers::jobs::update_job).delete(handlers::jobs::delete_job),
        )
        .route(
            "/api/companies/{slug}/sections",
            post(handlers::content::create_section),
        )
        .route(
            "/api/companies/{slug}/sections/{section_id}",
            put(handlers::content::update_section).delete(handlers::content::delete_section),
        )
        .route(
            "/api/companies/{slug}/brand",
            put(handlers::content::update_brand_settings),
        )
        .route_layer(axum_middleware::from_fn(rbac::require_staff))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_mw::require_auth,
        ));

    let admin_routes = Router::new()
        .route(
            "/api/companies",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/api/companies/{slug}",
            put(handlers::companies::update_company).delete(handlers::companies::delete_company),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/users/{id}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .route_layer(axum_middleware::from_fn(rbac::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_mw::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(optional_auth_routes)
        .merge(authed_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(logging::log_error_responses))
        .layer(axum_middleware::from_fn(request_id::request_id))
        .with_state(state)
}
