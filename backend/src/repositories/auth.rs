//! Queries backing login, refresh, and logout.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{refresh_token::RefreshTokenRow, user::User};

const USER_COLUMNS: &str =
    "id, email, username, password_hash, name, role, company_id, created_at, updated_at";

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_refresh_token(
    pool: &PgPool,
    row: &RefreshTokenRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO refresh_tokens (id, user_id, token, expires_at, created_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&row.id)
    .bind(&row.user_id)
    .bind(&row.token)
    .bind(row.expires_at)
    .bind(row.created_at)
    .execute(pool)
    .await
    .map(|_| ())
}

/// Looks up a session by the verbatim token string presented in the cookie.
pub async fn find_refresh_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<RefreshTokenRow>, sqlx::Error> {
    sqlx::query_as::<_, RefreshTokenRow>(
        "SELECT id, user_id, token, expires_at, created_at FROM refresh_tokens WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

pub async fn delete_refresh_token(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await
        .map(|_| ())
}

/// Lazy garbage collection run opportunistically during refresh.
pub async fn delete_expired_refresh_tokens(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Resolves the slug of the company a user is attached to, if any.
pub async fn company_slug_for_user(
    pool: &PgPool,
    user: &User,
) -> Result<Option<String>, sqlx::Error> {
    let Some(company_id) = user.company_id.as_deref() else {
        return Ok(None);
    };
    sqlx::query_scalar::<_, String>("SELECT slug FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(pool)
        .await
}
