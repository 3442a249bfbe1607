//! Common validation rules shared across request payloads.

use validator::ValidationError;

use crate::models::user::UserRole;

/// Validates username format.
///
/// Requirements:
/// - Only alphanumeric characters and underscores
/// - 3-50 characters in length
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.len() < 3 || username.len() > 50 {
        return Err(ValidationError::new("username_invalid_length"));
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("username_invalid_characters"));
    }

    Ok(())
}

/// Validates URL slug format: lowercase letters, digits, and hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() || slug.len() > 100 {
        return Err(ValidationError::new("slug_invalid_length"));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::new("slug_invalid_characters"));
    }

    Ok(())
}

/// Validates a `#rrggbb` hex color.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let rest = color
        .strip_prefix('#')
        .ok_or_else(|| ValidationError::new("color_invalid_format"))?;
    if rest.len() != 6 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::new("color_invalid_format"));
    }
    Ok(())
}

/// Cross-field rule for user creation and role updates: a recruiter must be
/// attached to a company, which the data layer cannot express on its own.
pub fn validate_recruiter_company(
    role: UserRole,
    company_id: Option<&str>,
) -> Result<(), ValidationError> {
    if role == UserRole::Recruiter && company_id.map_or(true, str::is_empty) {
        return Err(ValidationError::new("recruiter_requires_company"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_too_short() {
        assert!(validate_username("ab").is_err());
    }

    #[test]
    fn username_rejects_special_chars() {
        assert!(validate_username("user@name").is_err());
    }

    #[test]
    fn username_accepts_valid() {
        assert!(validate_username("valid_user123").is_ok());
    }

    #[test]
    fn slug_rejects_uppercase_and_spaces() {
        assert!(validate_slug("Acme Corp").is_err());
        assert!(validate_slug("acme_corp").is_err());
    }

    #[test]
    fn slug_accepts_valid() {
        assert!(validate_slug("acme-corp-2").is_ok());
    }

    #[test]
    fn hex_color_requires_hash_and_six_digits() {
        assert!(validate_hex_color("#1a2b3c").is_ok());
        assert!(validate_hex_color("1a2b3c").is_err());
        assert!(validate_hex_color("#1a2b3").is_err());
        assert!(validate_hex_color("#1a2b3g").is_err());
    }

    #[test]
    fn recruiter_requires_company_id() {
        assert!(validate_recruiter_company(UserRole::Recruiter, None).is_err());
        assert!(validate_recruiter_company(UserRole::Recruiter, Some("")).is_err());
        assert!(validate_recruiter_company(UserRole::Recruiter, Some("company-1")).is_ok());
        assert!(validate_recruiter_company(UserRole::Candidate, None).is_ok());
        assert!(validate_recruiter_company(UserRole::Admin, None).is_ok());
    }
}
