use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, models::user::UserRole, state::AppState, utils::jwt};

/// Principal extracted from a verified access token. Carries only what the
/// token claims carry; handlers that need the full user row re-read it from
/// the database.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

/// Inserted by [`optional_auth`] on every request, holding `Some` when valid
/// credentials were presented and `None` otherwise.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<AuthUser>);

/// Rejects the request with 401 unless a valid bearer access token is
/// presented. Inserts [`AuthUser`] into request extensions on success.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), &state)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Never rejects. Attaches [`MaybeUser`] so handlers can vary visibility by
/// authentication state (e.g. draft job listings for company staff).
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = authenticate(request.headers(), &state).ok();
    request.extensions_mut().insert(MaybeUser(user));
    next.run(request).await
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<AuthUser, AppError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    let token = parse_bearer_token(header)
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    let claims = jwt::verify_access_token(token, &state.config.access_token_secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired access token".to_string()))?;

    Ok(AuthUser {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}
