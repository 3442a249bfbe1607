//! Registration, login, token refresh, logout, and the current-user probe.
//!
//! The refresh token is a signed JWT that doubles as the database lookup key:
//! it travels only in an httpOnly cookie scoped to `/api/auth`, and a session
//! stays alive until its row is deleted (logout) or expires. Refresh does not
//! rotate the token; it only mints a new short-lived access token.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use std::time::Duration;
use validator::Validate;

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::{
        refresh_token::RefreshTokenRow,
        user::{AuthResponse, LoginRequest, MeResponse, RegisterRequest, User},
    },
    repositories::{auth as auth_repo, users as users_repo},
    state::AppState,
    utils::{
        cookies::{
            build_clear_refresh_cookie, build_refresh_cookie, extract_cookie_value,
            REFRESH_COOKIE_NAME,
        },
        jwt, password,
    },
    validation::rules::validate_recruiter_company,
};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    validate_recruiter_company(payload.role, payload.company_id.as_deref()).map_err(|_| {
        AppError::BadRequest("A recruiter must be assigned to a company".to_string())
    })?;

    if users_repo::email_or_username_exists(&state.pool, &payload.email, &payload.username).await? {
        return Err(AppError::Conflict(
            "Email or username already registered".to_string(),
        ));
    }

    let password_hash = password::hash_password_async(payload.password).await?;
    let user = User::new(
        payload.email,
        payload.username,
        password_hash,
        payload.name,
        payload.role,
        payload.company_id,
    );
    users_repo::insert_user(&state.pool, &user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    let (cookie, body) = issue_session(&state, user).await?;
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(body),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth_repo::find_user_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = password::verify_password_async(payload.password, user.password_hash.clone()).await?;
    if !valid {
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = %user.id, "User logged in");
    let (cookie, body) = issue_session(&state, user).await?;
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

/// Cookie-only: the refresh token is never accepted from a body or header.
/// Expired rows encountered here are purged before the lookup (lazy GC).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, AppError> {
    let token = refresh_cookie_value(&headers)
        .ok_or_else(|| AppError::Unauthorized("Refresh token required".to_string()))?;

    let now = Utc::now();
    let purged = auth_repo::delete_expired_refresh_tokens(&state.pool, now).await?;
    if purged > 0 {
        tracing::debug!(purged, "Purged expired refresh tokens");
    }

    let row = auth_repo::find_refresh_token(&state.pool, &token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if row.is_expired(now) {
        auth_repo::delete_refresh_token(&state.pool, &token).await?;
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    jwt::verify_refresh_token(&token, &state.config.refresh_token_secret)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let user = auth_repo::find_user_by_id(&state.pool, &row.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    let access_token = jwt::create_access_token(
        &user.id,
        &user.email,
        user.role,
        &state.config.access_token_secret,
        state.config.access_token_expiry_minutes,
    )?;
    let company_slug = auth_repo::company_slug_for_user(&state.pool, &user).await?;

    Ok(Json(AuthResponse {
        user: user.into_safe(company_slug),
        access_token,
    }))
}

/// Idempotent: clearing the cookie succeeds whether or not a session row
/// still exists.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = refresh_cookie_value(&headers) {
        auth_repo::delete_refresh_token(&state.pool, &token).await?;
    }

    let cookie = build_clear_refresh_cookie(state.config.cookie_secure);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Logged out" })),
    ))
}

/// Re-reads the user row so role or company changes since token issuance are
/// reflected immediately; 404 when the account was deleted.
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
) -> Result<Json<MeResponse>, AppError> {
    let user = auth_repo::find_user_by_id(&state.pool, &principal.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let company_slug = auth_repo::company_slug_for_user(&state.pool, &user).await?;
    Ok(Json(MeResponse {
        user: user.into_safe(company_slug),
    }))
}

async fn issue_session(state: &AppState, user: User) -> Result<(String, AuthResponse), AppError> {
    let access_token = jwt::create_access_token(
        &user.id,
        &user.email,
        user.role,
        &state.config.access_token_secret,
        state.config.access_token_expiry_minutes,
    )?;
    let refresh_token = jwt::create_refresh_token(
        &user.id,
        &user.email,
        user.role,
        &state.config.refresh_token_secret,
        state.config.refresh_token_expiry_days,
    )?;

    let row = RefreshTokenRow::new(
        user.id.clone(),
        refresh_token.clone(),
        state.config.refresh_token_expiry_days,
    );
    auth_repo::insert_refresh_token(&state.pool, &row).await?;

    let max_age = Duration::from_secs(state.config.refresh_token_expiry_days as u64 * 24 * 60 * 60);
    let cookie = build_refresh_cookie(&refresh_token, max_age, state.config.cookie_secure);

    let company_slug = auth_repo::company_slug_for_user(&state.pool, &user).await?;
    Ok((
        cookie,
        AuthResponse {
            user: user.into_safe(company_slug),
            access_token,
        },
    ))
}

fn refresh_cookie_value(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, REFRESH_COOKIE_NAME))
}

fn invalid_credentials() -> AppError {
    // Deliberately identical for unknown email and wrong password.
    AppError::Unauthorized("Invalid email or password".to_string())
}
