//! Token service: pure functions turning a user principal into signed
//! tokens and back. Access and refresh tokens carry the same claim shape
//! but are signed with distinct secrets.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn new(user_id: &str, email: &str, role: UserRole, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn create_access_token(
    user_id: &str,
    email: &str,
    role: UserRole,
    secret: &str,
    expiry_minutes: i64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, email, role, Duration::minutes(expiry_minutes));
    sign(&claims, secret)
}

pub fn create_refresh_token(
    user_id: &str,
    email: &str,
    role: UserRole,
    secret: &str,
    expiry_days: i64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, email, role, Duration::days(expiry_days));
    sign(&claims, secret)
}

pub fn verify_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    verify(token, secret)
}

pub fn verify_refresh_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    verify(token, secret)
}

fn sign(claims: &Claims, secret: &str) -> anyhow::Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

fn verify(token: &str, secret: &str) -> anyhow::Result<Claims> {
    // Expiry is wall-clock based with no grace window.
    let mut validation = Validation::default();
    validation.leeway = 0;
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;
    Ok(token_data.claims)
}
