//! Session state machine and its operations.
//!
//! The session is process-wide shared state with a single writer path: the
//! [`SessionManager`] operations and the dispatcher's teardown. Status
//! transitions are published over a watch channel so the presentation layer
//! can react to a teardown (for example by returning to the login screen)
//! without the core knowing anything about navigation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::instrument;

use flyercraft_core::{AuthToken, UserProfile};

use crate::api::ApiClient;
use crate::error::OperationError;
use crate::store::{CredentialStore, PersistedCredential};

/// Where the session currently stands.
///
/// `Uninitialized -> Loading -> {Authenticated | Anonymous}`, with
/// `Authenticated -> Anonymous` via logout or dispatcher teardown. No
/// transition leads back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Process start; `initialize` has not run yet.
    Uninitialized,
    /// `initialize` is reading storage / verifying the token.
    Loading,
    /// A user and token are present and not known to be invalid.
    Authenticated,
    /// No valid credential.
    Anonymous,
}

/// In-memory session state. `status == Authenticated` iff both fields are
/// present.
#[derive(Debug, Default)]
struct SessionState {
    user: Option<UserProfile>,
    token: Option<AuthToken>,
}

struct SessionShared {
    state: Mutex<SessionState>,
    status_tx: watch::Sender<SessionStatus>,
    store: Arc<dyn CredentialStore>,
}

/// Shared handle to the session state.
///
/// Held by the [`SessionManager`] and by the dispatcher (for bearer lookup
/// and teardown). Cloning is cheap.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionShared>,
}

impl SessionHandle {
    pub(crate) fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Uninitialized);
        Self {
            inner: Arc::new(SessionShared {
                state: Mutex::new(SessionState::default()),
                status_tx,
                store,
            }),
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        *self.inner.status_tx.borrow()
    }

    /// Subscribe to status transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status_tx.subscribe()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.lock().user.clone()
    }

    /// The bearer token, if any. Read by the dispatcher only.
    #[must_use]
    pub(crate) fn token(&self) -> Option<AuthToken> {
        self.lock().token.clone()
    }

    pub(crate) fn load_persisted(&self) -> Option<PersistedCredential> {
        self.inner.store.load()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // The session mutex is never held across an await point, so a
        // poisoned lock can only mean a panic mid-update; propagating the
        // inner state is still sound.
        match self.inner.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn publish(&self, status: SessionStatus) {
        self.inner.status_tx.send_replace(status);
    }

    pub(crate) fn set_loading(&self) {
        self.publish(SessionStatus::Loading);
    }

    /// Authenticate: mirror to storage and memory in the same step.
    pub(crate) fn set_authenticated(&self, token: AuthToken, user: UserProfile) {
        self.inner.store.save(&token, &user);
        {
            let mut state = self.lock();
            state.token = Some(token);
            state.user = Some(user);
        }
        self.publish(SessionStatus::Authenticated);
    }

    /// Replace the cached user wholesale, in memory and storage.
    pub(crate) fn replace_user(&self, user: UserProfile) {
        let mut state = self.lock();
        if let Some(token) = state.token.clone() {
            self.inner.store.save(&token, &user);
        }
        state.user = Some(user);
    }

    /// Tear the session down: clear storage and memory, go `Anonymous`.
    ///
    /// Unconditional and idempotent; this is the only path that clears the
    /// session, shared by logout, startup fallback and the dispatcher's
    /// authorization-failure handling.
    pub(crate) fn teardown(&self) {
        self.inner.store.clear();
        {
            let mut state = self.lock();
            state.token = None;
            state.user = None;
        }
        self.publish(SessionStatus::Anonymous);
    }
}

/// Outcome of a successful `register` call.
///
/// The backend may omit the token when account verification is required;
/// that is a valid terminal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// Token present: the session is now authenticated.
    SignedIn(UserProfile),
    /// No token: the account exists but the session stays unauthenticated.
    VerificationPending(UserProfile),
}

/// Fields accepted by the profile update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: String,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: AuthToken,
    user: UserProfile,
}

#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    token: Option<AuthToken>,
    user: UserProfile,
}

#[derive(Deserialize)]
struct ProfileResponse {
    user: UserProfile,
}

/// Owns the session lifecycle: startup rehydration, login, register,
/// logout and profile refresh.
pub struct SessionManager {
    api: ApiClient,
    initialized: AtomicBool,
}

impl SessionManager {
    /// Create a manager over a dispatcher. The dispatcher's session handle
    /// is the one this manager drives.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            initialized: AtomicBool::new(false),
        }
    }

    /// The shared session handle.
    #[must_use]
    pub fn session(&self) -> &SessionHandle {
        self.api.session()
    }

    /// Current session status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.session().status()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session().current_user()
    }

    /// Rehydrate the session from storage, once per process.
    ///
    /// A persisted credential is applied optimistically so consumers are
    /// not blocked, then verified against the profile endpoint; any
    /// verification failure clears both storage and session. Subsequent
    /// calls are no-ops.
    #[instrument(skip(self))]
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("initialize called more than once; ignoring");
            return;
        }

        let session = self.session().clone();
        session.set_loading();

        let Some(credential) = session.load_persisted() else {
            session.teardown();
            return;
        };

        session.set_authenticated(credential.token, credential.user);

        match self.api.get::<ProfileResponse>("/api/auth/profile").await {
            Ok(profile) => session.replace_user(profile.user),
            Err(e) => {
                tracing::warn!(error = %e, "startup token verification failed");
                // An authorization failure already tore the session down in
                // the dispatcher; anything else clears it here.
                if !e.is_authorization_expired() {
                    session.teardown();
                }
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the credential is persisted and the session becomes
    /// `Authenticated`. On failure the session is untouched.
    ///
    /// # Errors
    ///
    /// Returns the server's message, or "Login failed" when it has none.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, OperationError> {
        let response: LoginResponse = self
            .api
            .post("/api/auth/login", &LoginRequest { email, password })
            .await
            .map_err(|e| OperationError::new(e, "Login failed"))?;

        self.session()
            .set_authenticated(response.token, response.user.clone());
        Ok(response.user)
    }

    /// Create an account.
    ///
    /// The name parts are joined for the backend, which accepts a single
    /// display name. When the response carries a token the session is
    /// authenticated immediately; without one it stays as it was.
    ///
    /// # Errors
    ///
    /// Returns the server's message, or "Registration failed" when it has
    /// none.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterOutcome, OperationError> {
        let name = format!("{first_name} {last_name}").trim().to_owned();
        let response: RegisterResponse = self
            .api
            .post(
                "/api/auth/register",
                &RegisterRequest {
                    name,
                    email,
                    password,
                },
            )
            .await
            .map_err(|e| OperationError::new(e, "Registration failed"))?;

        match response.token {
            Some(token) => {
                self.session()
                    .set_authenticated(token, response.user.clone());
                Ok(RegisterOutcome::SignedIn(response.user))
            }
            None => Ok(RegisterOutcome::VerificationPending(response.user)),
        }
    }

    /// Sign out: clear storage and session. Never fails.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.session().teardown();
    }

    /// Update the profile and replace the cached user with the backend's
    /// returned record - never a local merge, since the backend may
    /// normalize or reject fields.
    ///
    /// # Errors
    ///
    /// Returns the server's message, or "Profile update failed" when it has
    /// none.
    #[instrument(skip(self, draft))]
    pub async fn update_profile(&self, draft: &ProfileDraft) -> Result<UserProfile, OperationError> {
        let response: ProfileResponse = self
            .api
            .put("/api/auth/profile", draft)
            .await
            .map_err(|e| OperationError::new(e, "Profile update failed"))?;

        self.session().replace_user(response.user.clone());
        Ok(response.user)
    }
}
