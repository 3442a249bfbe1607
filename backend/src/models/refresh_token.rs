//! Persisted refresh-token rows, one per login session.

use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored refresh token. The `token` column holds the verbatim signed
/// token string and is the lookup key on refresh and logout. Rows are not
/// rotated on use; a session ends when its row is deleted or expires.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRow {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRow {
    pub fn new(user_id: String, token: String, expiry_days: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            token,
            expires_at: now + Duration::days(expiry_days),
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_checked_against_wall_clock() {
        let row = RefreshTokenRow::new("user-1".into(), "token".into(), 7);
        assert!(!row.is_expired(Utc::now()));
        assert!(row.is_expired(Utc::now() + Duration::days(8)));
    }
}
