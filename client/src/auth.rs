//! Application-level auth state layered on top of [`ApiClient`].

use std::sync::{Arc, Mutex};

use crate::{
    client::ApiClient,
    error::ApiError,
    types::{LoginRequest, RegisterRequest, SafeUser},
};

/// Snapshot of the current auth state, cheap to clone into UI code.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<SafeUser>,
    pub is_authenticated: bool,
    /// True between construction and the first resolution of the mount probe.
    pub is_loading: bool,
}

pub struct AuthContext {
    client: Arc<ApiClient>,
    state: Mutex<AuthState>,
}

impl AuthContext {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: Mutex::new(AuthState {
                user: None,
                is_authenticated: false,
                is_loading: true,
            }),
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn state(&self) -> AuthState {
        self.lock_state().clone()
    }

    /// Mount-time probe: tries to resume the session from the refresh
    /// cookie. "Not logged in" is a normal outcome, not an error; only
    /// transport or server failures propagate.
    pub async fn initialize(&self) -> Result<AuthState, ApiError> {
        let result = self.client.try_resume_session().await;
        let mut state = self.lock_state();
        state.is_loading = false;
        match result {
            Ok(Some(auth)) => {
                state.user = Some(auth.user);
                state.is_authenticated = true;
            }
            Ok(None) => {
                state.user = None;
                state.is_authenticated = false;
            }
            Err(err) => {
                state.user = None;
                state.is_authenticated = false;
                return Err(err);
            }
        }
        Ok(state.clone())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthState, ApiError> {
        let auth = self
            .client
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        Ok(self.set_authenticated(auth.user))
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthState, ApiError> {
        let auth = self.client.register(payload).await?;
        Ok(self.set_authenticated(auth.user))
    }

    /// Logs out locally even when the server call fails; the session row is
    /// dead weight at worst.
    pub async fn logout(&self) -> AuthState {
        if let Err(err) = self.client.logout().await {
            log::debug!("logout request failed: {err}");
        }
        self.clear()
    }

    /// Drops local auth state without a server round trip. Wired to the
    /// client's session-expired hook by the embedding application.
    pub fn clear(&self) -> AuthState {
        let mut state = self.lock_state();
        state.user = None;
        state.is_authenticated = false;
        state.is_loading = false;
        state.clone()
    }

    fn set_authenticated(&self, user: SafeUser) -> AuthState {
        let mut state = self.lock_state();
        state.user = Some(user);
        state.is_authenticated = true;
        state.is_loading = false;
        state.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AuthState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
