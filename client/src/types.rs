//! Wire types mirroring the backend API payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Recruiter,
    Candidate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SafeUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub company_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body returned by register, login, and refresh. The refresh token never
/// appears here; it lives in the httpOnly cookie managed by the cookie store.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: SafeUser,
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: SafeUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: String,
    pub department: String,
    pub employment_type: String,
    pub status: String,
    pub posted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct CreateJob {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub department: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub employment_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentSection {
    pub id: String,
    pub company_id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandSettings {
    pub company_id: String,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}
