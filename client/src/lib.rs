//! API client for the careers-page backend.
//!
//! Holds the access token in memory only; the refresh token stays in an
//! httpOnly cookie managed by the underlying cookie store. A 401 triggers a
//! single-flight refresh shared by all concurrent requests, then one retry.

pub mod auth;
pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use auth::{AuthContext, AuthState};
pub use client::{ApiClient, SKIP_INTERCEPTOR_HEADER};
pub use error::ApiError;
pub use session::Session;
