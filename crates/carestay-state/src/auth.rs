//! # Authentication State
//!
//! ```text
//! Anonymous --login/register--> Authenticating --ok--> Authenticated
//!     ^                              |                      |
//!     +------------failure-----------+                      |
//!     +------------------------logout-----------------------+
//! ```
//!
//! A successful login persists the token and user, attaches the token to the
//! HTTP client, and yields the path to navigate to next.

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;

use carestay_api::{ApiResult, AuthApi};
use carestay_types::{AuthSession, LoginRequest, RegisterRequest, User};

use crate::error::Result;
use crate::session::{self, SessionStorage};

/// Message recorded when `/auth/me` rejects the stored token.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Where the auth state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No session.
    Anonymous,
    /// A login or registration request is in flight.
    Authenticating,
    /// Token and user are present.
    Authenticated,
}

/// Snapshot of the auth store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// Bearer token.
    pub token: Option<String>,
    /// Authenticated user.
    pub user: Option<User>,
    /// True while login or registration is in flight.
    pub is_loading: bool,
    /// Message describing the last failure.
    pub error: Option<String>,
    /// Path to go to after the next successful login.
    pub redirect_target: Option<String>,
}

impl AuthState {
    /// Current phase.
    pub fn phase(&self) -> AuthPhase {
        if self.is_loading {
            AuthPhase::Authenticating
        } else if self.token.is_some() && self.user.is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }

    /// Returns true once a session is established.
    pub fn is_authenticated(&self) -> bool {
        self.phase() == AuthPhase::Authenticated
    }
}

/// Authentication store.
pub struct AuthStore<A: AuthApi> {
    api: A,
    storage: Arc<dyn SessionStorage>,
    state: RwLock<AuthState>,
}

impl<A: AuthApi> std::fmt::Debug for AuthStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("AuthStore")
            .field("phase", &state.phase())
            .field("user", &state.user.as_ref().map(|u| u.id))
            .finish()
    }
}

impl<A: AuthApi> AuthStore<A> {
    /// Creates an anonymous store. Call [`AuthStore::restore`] to pick up a
    /// persisted session.
    pub fn new(api: A, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            state: RwLock::new(AuthState::default()),
        }
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> AuthState {
        self.state.read().clone()
    }

    /// Current phase.
    pub fn phase(&self) -> AuthPhase {
        self.state.read().phase()
    }

    /// Returns true once a session is established.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// Authenticated user.
    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    /// Last error message.
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Re-enters the persisted session without a network call.
    ///
    /// Returns true if a session was restored. An unreadable session is
    /// discarded.
    pub fn restore(&self) -> bool {
        match session::load_session(self.storage.as_ref()) {
            Ok(Some(AuthSession { token, user })) => {
                tracing::info!(user_id = user.id, role = %user.role, "Restored session");
                self.api.set_token(Some(token.clone()));
                let mut state = self.state.write();
                state.token = Some(token);
                state.user = Some(user);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                if let Err(e) = session::clear_session(self.storage.as_ref()) {
                    tracing::warn!(error = %e, "Failed to clear session");
                }
                false
            }
        }
    }

    /// Logs in and returns the path to navigate to.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<String> {
        tracing::debug!(email = %credentials.email, "Logging in");
        self.authenticate("Login failed", self.api.login(credentials))
            .await
    }

    /// Registers an account, logs in as it, and returns the path to navigate to.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<String> {
        tracing::debug!(email = %payload.email, role = %payload.role, "Registering");
        self.authenticate("Registration failed", self.api.register(payload))
            .await
    }

    async fn authenticate(
        &self,
        fallback: &str,
        request: impl Future<Output = ApiResult<AuthSession>>,
    ) -> Result<String> {
        {
            let mut state = self.state.write();
            state.is_loading = true;
            state.error = None;
        }

        let session = match request.await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "{fallback}");
                self.fail(e.user_message().unwrap_or(fallback));
                return Err(e.into());
            }
        };

        if let Err(e) = session::save_session(self.storage.as_ref(), &session) {
            tracing::warn!(error = %e, "Failed to persist session");
            self.fail("Failed to save session");
            return Err(e.into());
        }
        self.api.set_token(Some(session.token.clone()));

        let mut state = self.state.write();
        let target = state
            .redirect_target
            .take()
            .unwrap_or_else(|| session.user.role.dashboard_path().to_string());
        tracing::info!(user_id = session.user.id, role = %session.user.role, "Authenticated");
        state.token = Some(session.token);
        state.user = Some(session.user);
        state.is_loading = false;
        Ok(target)
    }

    fn fail(&self, message: &str) {
        let mut state = self.state.write();
        state.is_loading = false;
        state.error = Some(message.to_string());
    }

    /// Ends the session.
    ///
    /// The server call is best effort: local state and the persisted session
    /// are cleared even if it fails.
    pub async fn logout(&self) {
        if self.state.read().token.is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!(error = %e, "Server logout failed, clearing local session anyway");
            }
        }
        self.clear_local();
        tracing::info!("Logged out");
    }

    fn clear_local(&self) {
        self.api.set_token(None);
        if let Err(e) = session::clear_session(self.storage.as_ref()) {
            tracing::warn!(error = %e, "Failed to clear session");
        }
        *self.state.write() = AuthState::default();
    }

    /// Re-fetches the authenticated user and persists it.
    ///
    /// A 401 means the token is no longer valid; the session is then cleared.
    pub async fn refresh_user(&self) -> Result<User> {
        match self.api.current_user().await {
            Ok(user) => {
                if let Err(e) = session::save_user(self.storage.as_ref(), &user) {
                    tracing::warn!(error = %e, "Failed to persist refreshed user");
                }
                self.state.write().user = Some(user.clone());
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Stored token rejected, clearing session");
                self.clear_local();
                self.state.write().error = Some(SESSION_EXPIRED.to_string());
                Err(e.into())
            }
            Err(e) => {
                self.state.write().error =
                    Some(e.user_message().unwrap_or("Failed to fetch user").to_string());
                Err(e.into())
            }
        }
    }

    /// Remembers where to go after the next successful login.
    pub fn set_redirect_target(&self, path: impl Into<String>) {
        self.state.write().redirect_target = Some(path.into());
    }

    /// Clears the error message.
    pub fn clear_error(&self) {
        self.state.write().error = None;
    }
}
