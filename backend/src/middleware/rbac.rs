//! Role-based access control as small composable policy functions, with thin
//! middleware wrappers for route-level gating. Authorization failures for an
//! authenticated principal are always 403, never 401.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::{
    db::connection::DbPool,
    error::AppError,
    middleware::auth::AuthUser,
    models::{company::Company, user::UserRole},
    repositories,
};

pub fn check_role(user: &AuthUser, allowed: &[UserRole]) -> bool {
    allowed.contains(&user.role)
}

pub fn ensure_role(user: &AuthUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if check_role(user, allowed) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Insufficient permissions".to_string(),
        ))
    }
}

/// Resource-ownership policy: the principal may act when it owns the resource
/// or is an admin.
pub fn ensure_owner_or_admin(user: &AuthUser, owner_id: &str) -> Result<(), AppError> {
    if user.role == UserRole::Admin || user.id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Insufficient permissions".to_string(),
        ))
    }
}

/// Company-scoped policy: admins may touch any company; a recruiter only the
/// company their user row is attached to. The attachment lives in the
/// database, not the token, so membership is re-read on every check and
/// reflects reassignments immediately.
pub async fn ensure_company_access(
    pool: &DbPool,
    user: &AuthUser,
    company: &Company,
) -> Result<(), AppError> {
    if user.role == UserRole::Admin {
        return Ok(());
    }

    let row = repositories::auth::find_user_by_id(pool, &user.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    if row.role == UserRole::Recruiter && row.company_id.as_deref() == Some(company.id.as_str()) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have access to this company".to_string(),
        ))
    }
}

/// Route-level gate: admin only. Layer after [`super::auth::require_auth`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = principal(&request)?;
    ensure_role(user, &[UserRole::Admin])?;
    Ok(next.run(request).await)
}

/// Route-level gate: admin or recruiter. Layer after
/// [`super::auth::require_auth`].
pub async fn require_staff(request: Request, next: Next) -> Result<Response, AppError> {
    let user = principal(&request)?;
    ensure_role(user, &[UserRole::Admin, UserRole::Recruiter])?;
    Ok(next.run(request).await)
}

fn principal(request: &Request) -> Result<&AuthUser, AppError> {
    request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))
}
