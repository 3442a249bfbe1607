//! Models for user accounts, credentials, and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::validate_username;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
/// Database representation of a user account.
pub struct User {
    pub id: String,
    /// Login identity, unique across the platform.
    pub email: String,
    /// Public handle, also unique.
    pub username: String,
    /// Argon2 hash of the user's password. Never serialized to API callers;
    /// responses go through [`SafeUser`].
    pub password_hash: String,
    /// Display name.
    pub name: String,
    pub role: UserRole,
    /// Owning company. Semantically required for recruiters, ignored for
    /// every other role.
    pub company_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Platform operator; manages companies and users.
    Admin,
    /// Manages jobs, content, and branding for one company.
    Recruiter,
    /// Default public role.
    #[default]
    Candidate,
}

impl UserRole {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Recruiter => "recruiter",
            UserRole::Candidate => "candidate",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "recruiter" => Ok(UserRole::Recruiter),
            "candidate" => Ok(UserRole::Candidate),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::unknown_variant(&s, &["admin", "recruiter", "candidate"])
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Payload for self-service registration and admin user creation.
pub struct RegisterRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    /// Required when `role` is `recruiter`; checked by the cross-field
    /// validator in `validation::rules`, not by handler discipline.
    #[serde(default)]
    pub company_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Credentials submitted on login.
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Partial update applied by admins to an existing user.
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub company_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Profile fields a user may change about themselves.
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Public-facing representation of a user. The password hash never leaves
/// the server; `company_slug` is resolved at response time so role or
/// company changes are reflected immediately.
pub struct SafeUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Body returned by register, login, and refresh. The refresh token itself
/// travels only in the httpOnly cookie, never in this body.
pub struct AuthResponse {
    pub user: SafeUser,
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: SafeUser,
}

impl User {
    /// Constructs a new user with a freshly generated identifier.
    pub fn new(
        email: String,
        username: String,
        password_hash: String,
        name: String,
        role: UserRole,
        company_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            username,
            password_hash,
            name,
            role,
            company_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    pub fn is_recruiter(&self) -> bool {
        matches!(self.role, UserRole::Recruiter)
    }

    /// Strips the credential material and attaches the resolved company slug.
    pub fn into_safe(self, company_slug: Option<String>) -> SafeUser {
        SafeUser {
            id: self.id,
            email: self.email,
            username: self.username,
            name: self.name,
            role: self.role,
            company_id: self.company_id,
            company_slug,
            created_at: self.created_at,
        }
    }
}
