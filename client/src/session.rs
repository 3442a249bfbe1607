//! In-memory access-token store with single-flight refresh coordination.
//!
//! The access token lives only here, never in persistent storage. When a
//! request hits a 401, exactly one caller performs the refresh; everyone
//! else parks on a oneshot channel and receives the same outcome.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::error::ApiError;

/// Outcome delivered to each parked waiter.
pub type RefreshOutcome = Result<String, ApiError>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

#[derive(Default)]
struct SessionInner {
    token: Mutex<Option<String>>,
    refresh: Mutex<RefreshState>,
}

/// Shared session handle; clones point at the same token and refresh state.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<SessionInner>,
}

/// Role a caller was assigned when it asked for a refresh.
pub enum RefreshRole {
    /// This caller must perform the refresh request and then call
    /// [`Session::complete_refresh`].
    Leader,
    /// A refresh is already running; await the receiver for its outcome.
    Follower(oneshot::Receiver<RefreshOutcome>),
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current access token, if any.
    pub fn token(&self) -> Option<String> {
        self.lock_token().clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.lock_token() = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.lock_token() = None;
    }

    /// Joins the refresh. The first caller while none is in flight becomes
    /// the leader; later callers are enqueued in arrival order.
    pub(crate) fn begin_refresh(&self) -> RefreshRole {
        let mut state = self.lock_refresh();
        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            RefreshRole::Follower(rx)
        } else {
            state.in_flight = true;
            RefreshRole::Leader
        }
    }

    /// Publishes the leader's outcome: stores or clears the token, then
    /// resolves every waiter in enqueue order with a clone of the result.
    pub(crate) fn complete_refresh(&self, outcome: &RefreshOutcome) {
        match outcome {
            Ok(token) => self.set_token(token.clone()),
            Err(_) => self.clear_token(),
        }

        let waiters = {
            let mut state = self.lock_refresh();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            // A dropped receiver means that request was cancelled; fine.
            let _ = waiter.send(outcome.clone());
        }
    }

    fn lock_token(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        match self.inner.token.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_refresh(&self) -> std::sync::MutexGuard<'_, RefreshState> {
        match self.inner.refresh.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_caller_leads_and_later_callers_follow() {
        let session = Session::new();
        assert!(matches!(session.begin_refresh(), RefreshRole::Leader));
        assert!(matches!(session.begin_refresh(), RefreshRole::Follower(_)));
        assert!(matches!(session.begin_refresh(), RefreshRole::Follower(_)));
    }

    #[test]
    fn success_resolves_waiters_in_order_with_the_same_token() {
        let session = Session::new();
        let RefreshRole::Leader = session.begin_refresh() else {
            panic!("expected leader");
        };
        let mut receivers = Vec::new();
        for _ in 0..3 {
            match session.begin_refresh() {
                RefreshRole::Follower(rx) => receivers.push(rx),
                RefreshRole::Leader => panic!("second leader while in flight"),
            }
        }

        session.complete_refresh(&Ok("fresh".into()));

        assert_eq!(session.token().as_deref(), Some("fresh"));
        for mut rx in receivers {
            let outcome = rx.try_recv().unwrap();
            assert_eq!(outcome.unwrap(), "fresh");
        }
        // The flight is over, so the next caller leads again.
        assert!(matches!(session.begin_refresh(), RefreshRole::Leader));
    }

    #[test]
    fn failure_clears_the_token_and_rejects_waiters() {
        let session = Session::new();
        session.set_token("stale");
        let RefreshRole::Leader = session.begin_refresh() else {
            panic!("expected leader");
        };
        let RefreshRole::Follower(mut rx) = session.begin_refresh() else {
            panic!("expected follower");
        };

        session.complete_refresh(&Err(ApiError::SessionExpired));

        assert!(session.token().is_none());
        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(ApiError::SessionExpired)
        ));
    }

    #[test]
    fn dropped_waiter_does_not_block_completion() {
        let session = Session::new();
        let RefreshRole::Leader = session.begin_refresh() else {
            panic!("expected leader");
        };
        match session.begin_refresh() {
            RefreshRole::Follower(rx) => drop(rx),
            RefreshRole::Leader => panic!("second leader while in flight"),
        }
        session.complete_refresh(&Ok("fresh".into()));
        assert_eq!(session.token().as_deref(), Some("fresh"));
    }
}
