//! Refresh-token cookie construction and parsing. The refresh token travels
//! only in this httpOnly cookie, never in a response body or header.

use std::time::Duration;

pub const REFRESH_COOKIE_NAME: &str = "refreshToken";
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

pub fn build_refresh_cookie(value: &str, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path={}; Max-Age={}; HttpOnly; SameSite=Strict",
        REFRESH_COOKIE_NAME,
        value,
        REFRESH_COOKIE_PATH,
        max_age.as_secs(),
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn build_clear_refresh_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path={}; Max-Age=0; HttpOnly; SameSite=Strict",
        REFRESH_COOKIE_NAME, REFRESH_COOKIE_PATH,
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn extract_cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_cookie_includes_security_attributes() {
        let cookie =
            build_refresh_cookie("abc", Duration::from_secs(7 * 24 * 60 * 60), true);
        assert!(cookie.contains("refreshToken=abc"));
        assert!(cookie.contains("Path=/api/auth"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn clear_cookie_sets_max_age_zero_and_omits_secure_in_dev() {
        let cookie = build_clear_refresh_cookie(false);
        assert!(cookie.contains("refreshToken="));
        assert!(cookie.contains("Max-Age=0"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn extract_cookie_value_finds_matching_name() {
        let header = "a=1; refreshToken=token-value; b=2";
        assert_eq!(
            extract_cookie_value(header, "refreshToken").as_deref(),
            Some("token-value")
        );
        assert!(extract_cookie_value(header, "missing").is_none());
    }
}
