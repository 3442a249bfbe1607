//! Admin user management plus self-service profile updates.

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
    middleware::{auth::AuthUser, rbac},
    models::user::{RegisterRequest, SafeUser, UpdateProfile, UpdateUser, User},
    repositories::{auth as auth_repo, users as users_repo},
    state::AppState,
    utils::password,
    validation::rules::validate_recruiter_company,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<SafeUser>>, AppError> {
    let users = users_repo::list_users(&state.pool).await?;

    let mut safe = Vec::with_capacity(users.len());
    for user in users {
        let company_slug = auth_repo::company_slug_for_user(&state.pool, &user).await?;
        safe.push(user.into_safe(company_slug));
    }
    Ok(Json(safe))
}

/// Admin user creation shares the registration payload but never issues a
/// session for the created account.
pub async fn create_user(
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
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User created by admin");

    let company_slug = auth_repo::company_slug_for_user(&state.pool, &user).await?;
    Ok((StatusCode::CREATED, Json(user.into_safe(company_slug))))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<SafeUser>, AppError> {
    let mut user = auth_repo::find_user_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(role) = payload.role {
        user.role = role;
    }
    if let Some(company_id) = payload.company_id {
        user.company_id = if company_id.is_empty() {
            None
        } else {
            Some(company_id)
        };
    }

    // Role and company may change independently; re-check the pairing on the
    // final state, not the payload.
    validate_recruiter_company(user.role, user.company_id.as_deref()).map_err(|_| {
        AppError::BadRequest("A recruiter must be assigned to a company".to_string())
    })?;

    user.updated_at = Utc::now();
    users_repo::update_user(&state.pool, &user).await?;

    let company_slug = auth_repo::company_slug_for_user(&state.pool, &user).await?;
    Ok(Json(user.into_safe(company_slug)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(principal): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    if principal.id == user_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    let deleted = users_repo::delete_user(&state.pool, &user_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    tracing::info!(%user_id, "User deleted");
    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}

/// Owner-or-admin: users edit their own profile, admins anyone's.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<UpdateProfile>,
) -> Result<Json<SafeUser>, AppError> {
    rbac::ensure_owner_or_admin(&principal, &user_id)?;

    let mut user = auth_repo::find_user_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = payload.name {
        if name.is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }
        user.name = name;
    }
    if let Some(email) = payload.email {
        if users_repo::email_taken_by_other(&state.pool, &email, &user.id).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        user.email = email;
    }
    user.updated_at = Utc::now();

    users_repo::update_user(&state.pool, &user).await?;

    let company_slug = auth_repo::company_slug_for_user(&state.pool, &user).await?;
    Ok(Json(user.into_safe(company_slug)))
}
