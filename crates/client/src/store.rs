//! Durable credential storage.
//!
//! The store mirrors the in-memory session under two fixed keys: the raw
//! bearer token and the serialized user profile. Operations are synchronous,
//! idempotent and total - storage failures are logged and treated as
//! "absent" rather than surfaced to callers.

use std::path::PathBuf;
use std::sync::Mutex;

use flyercraft_core::{AuthToken, UserProfile};

/// File name of the persisted token.
pub const TOKEN_KEY: &str = "token";

/// File name of the persisted user record.
pub const USER_KEY: &str = "user.json";

/// The durable mirror of the in-memory session.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedCredential {
    pub token: AuthToken,
    pub user: UserProfile,
}

/// Key/value storage for the session credential.
///
/// All operations are total: implementations swallow underlying storage
/// errors and report them only via logging. `load` after `clear` yields
/// `None`; `load` after `save` yields the saved pair.
pub trait CredentialStore: Send + Sync {
    /// Persist the token and user, replacing any previous pair.
    fn save(&self, token: &AuthToken, user: &UserProfile);

    /// Read back the persisted pair, or `None` when either key is missing
    /// or the user record does not deserialize. A corrupted record is
    /// discarded (both keys cleared) and never surfaced.
    fn load(&self) -> Option<PersistedCredential>;

    /// Remove both keys. After this returns, neither key exists.
    fn clear(&self);
}

/// File-backed credential store: two fixed file names inside a state
/// directory.
#[derive(Debug)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first save.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_KEY)
    }

    fn remove(&self, key: &str) {
        let path = self.dir.join(key);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key, error = %e, "failed to remove credential key");
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &AuthToken, user: &UserProfile) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!(error = %e, "failed to create credential directory");
            return;
        }

        // Write the user record first so a token never exists without one.
        match serde_json::to_vec(user) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(self.user_path(), bytes) {
                    tracing::warn!(error = %e, "failed to persist user record");
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize user record");
                return;
            }
        }

        if let Err(e) = std::fs::write(self.token_path(), token.expose()) {
            tracing::warn!(error = %e, "failed to persist token");
            self.remove(USER_KEY);
        }
    }

    fn load(&self) -> Option<PersistedCredential> {
        let token = std::fs::read_to_string(self.token_path()).ok();
        let user_bytes = std::fs::read(self.user_path()).ok();

        let (Some(token), Some(user_bytes)) = (token, user_bytes) else {
            // One key without the other is an inconsistent leftover.
            self.clear();
            return None;
        };

        match serde_json::from_slice::<UserProfile>(&user_bytes) {
            Ok(user) => Some(PersistedCredential {
                token: AuthToken::new(token),
                user,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "discarding corrupted persisted user record");
                self.clear();
                None
            }
        }
    }

    fn clear(&self) {
        self.remove(TOKEN_KEY);
        self.remove(USER_KEY);
    }
}

/// In-memory credential store for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<PersistedCredential>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, token: &AuthToken, user: &UserProfile) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(PersistedCredential {
                token: token.clone(),
                user: user.clone(),
            });
        }
    }

    fn load(&self) -> Option<PersistedCredential> {
        self.inner.lock().ok().and_then(|slot| slot.clone())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = None;
        }
    }
}
