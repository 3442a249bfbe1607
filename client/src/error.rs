//! Error type shared by the HTTP client and the session manager.

use serde::Deserialize;

/// Error body produced by the backend for every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    /// Present on validation failures only, as `{"errors": [...]}`.
    #[serde(default)]
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetails {
    pub errors: Vec<String>,
}

/// Failure modes of an API call.
///
/// The type is `Clone` so one refresh outcome can be fanned out to every
/// request that was parked behind the in-flight refresh.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure; the request may never have reached the server.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("api error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        /// Per-field messages from a validation failure.
        details: Option<Vec<String>>,
    },

    /// A 2xx body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The refresh token is gone or rejected; the caller must log in again.
    #[error("session expired")]
    SessionExpired,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest::Error is not Clone, so only its rendered form is kept.
        ApiError::Network(err.to_string())
    }
}
