//! HTTP client with transparent access-token refresh.
//!
//! Every authenticated request carries the in-memory access token as a
//! bearer header. On a 401 the client refreshes through the session's
//! single-flight gate and retries the original request exactly once; a
//! second 401 is surfaced as-is. The refresh call itself, and any caller
//! that sets [`SKIP_INTERCEPTOR_HEADER`], bypasses that machinery so a
//! failing refresh can never recurse.

use std::sync::{Arc, Mutex};

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    error::{ApiError, ErrorBody},
    session::{RefreshRole, Session},
    types::{
        AuthResponse, BrandSettings, Company, ContentSection, CreateJob, Job, JobListResponse,
        LoginRequest, MeResponse, RegisterRequest, SafeUser,
    },
};

/// Requests carrying this header are never retried on 401.
pub const SKIP_INTERCEPTOR_HEADER: &str = "x-skip-interceptor";

type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    on_session_expired: Mutex<Option<SessionExpiredHook>>,
}

impl ApiClient {
    /// Builds a client for the given backend origin, e.g.
    /// `http://localhost:3000`. The cookie store plays the browser's role:
    /// it holds the httpOnly refresh cookie and replays it to `/api/auth`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ApiError::from)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Session::new(),
            on_session_expired: Mutex::new(None),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Registers a callback fired once per failed refresh, after the token
    /// is cleared and all parked requests are rejected. UI shells hang their
    /// redirect-to-login here.
    pub fn on_session_expired(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.on_session_expired.lock() {
            *slot = Some(Arc::new(hook));
        }
    }

    // --- auth ---

    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let body: AuthResponse = self
            .request_json(Method::POST, "/api/auth/register", Some(payload))
            .await?;
        self.session.set_token(body.access_token.clone());
        Ok(body)
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let body: AuthResponse = self
            .request_json(Method::POST, "/api/auth/login", Some(payload))
            .await?;
        self.session.set_token(body.access_token.clone());
        Ok(body)
    }

    /// Ends the server-side session and drops the local token. The token is
    /// cleared even when the request fails; the cookie is the server's to
    /// revoke, the access token is ours.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .request_json::<serde_json::Value, ()>(Method::POST, "/api/auth/logout", None)
            .await;
        self.session.clear_token();
        result.map(|_| ())
    }

    pub async fn me(&self) -> Result<SafeUser, ApiError> {
        let body: MeResponse = self
            .request_json::<_, ()>(Method::GET, "/api/auth/me", None)
            .await?;
        Ok(body.user)
    }

    /// Asks the server for a new access token using only the refresh cookie.
    /// This is the mount-time probe: a 401 means "not logged in", which
    /// deliberately skips the retry interceptor and the expiry hook.
    pub async fn try_resume_session(&self) -> Result<Option<AuthResponse>, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/refresh"))
            .header(SKIP_INTERCEPTOR_HEADER, "1")
            .send()
            .await
            .map_err(ApiError::from)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let body: AuthResponse = Self::decode(response).await?;
        self.session.set_token(body.access_token.clone());
        Ok(Some(body))
    }

    // --- careers surface ---

    pub async fn company(&self, slug: &str) -> Result<Company, ApiError> {
        self.request_json::<_, ()>(Method::GET, &format!("/api/companies/{slug}"), None)
            .await
    }

    pub async fn jobs(&self, slug: &str) -> Result<JobListResponse, ApiError> {
        self.request_json::<_, ()>(Method::GET, &format!("/api/companies/{slug}/jobs"), None)
            .await
    }

    pub async fn job(&self, slug: &str, job_id: &str) -> Result<Job, ApiError> {
        self.request_json::<_, ()>(
            Method::GET,
            &format!("/api/companies/{slug}/jobs/{job_id}"),
            None,
        )
        .await
    }

    pub async fn sections(&self, slug: &str) -> Result<Vec<ContentSection>, ApiError> {
        self.request_json::<_, ()>(Method::GET, &format!("/api/companies/{slug}/sections"), None)
            .await
    }

    pub async fn brand(&self, slug: &str) -> Result<BrandSettings, ApiError> {
        self.request_json::<_, ()>(Method::GET, &format!("/api/companies/{slug}/brand"), None)
            .await
    }

    pub async fn create_job(&self, slug: &str, payload: &CreateJob) -> Result<Job, ApiError> {
        self.request_json(
            Method::POST,
            &format!("/api/companies/{slug}/jobs"),
            Some(payload),
        )
        .await
    }

    // --- plumbing ---

    /// Sends a request, refreshing and retrying once on 401.
    pub async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let sent_token = self.session.token();
        let response = self
            .send_once(method.clone(), path, body, sent_token.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::decode(response).await;
        }

        // First 401: refresh (or join the refresh in flight), retry once.
        // If another task already swapped the token while this request was
        // in flight, the new token is used directly.
        let token = match self.session.token() {
            Some(current) if Some(current.as_str()) != sent_token.as_deref() => current,
            _ => self.refresh_access_token().await?,
        };
        let retried = self.send_once(method, path, body, Some(&token)).await?;
        Self::decode(retried).await
    }

    async fn send_once<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(ApiError::from)
    }

    /// Joins the single-flight refresh and returns the new access token.
    async fn refresh_access_token(&self) -> Result<String, ApiError> {
        match self.session.begin_refresh() {
            RefreshRole::Follower(rx) => rx
                .await
                .map_err(|_| ApiError::Network("refresh abandoned".to_string()))?,
            RefreshRole::Leader => {
                let outcome = self.perform_refresh().await;
                self.session.complete_refresh(&outcome);
                if outcome.is_err() {
                    log::warn!("session refresh failed; signalling expiry");
                    self.fire_session_expired();
                }
                outcome
            }
        }
    }

    async fn perform_refresh(&self) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/refresh"))
            .header(SKIP_INTERCEPTOR_HEADER, "1")
            .send()
            .await
            .map_err(ApiError::from)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::SessionExpired);
        }
        let body: AuthResponse = Self::decode(response).await?;
        Ok(body.access_token)
    }

    fn fire_session_expired(&self) {
        let hook = match self.on_session_expired.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        if let Some(hook) = hook {
            hook();
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| ApiError::Decode(err.to_string()));
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => {
                return Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body.message,
                    code: body.code,
                    details: body.details.map(|d| d.errors),
                })
            }
            Err(err) => err.to_string(),
        };
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
            code: None,
            details: None,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
