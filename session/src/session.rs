//! Session store.
//!
//! Two persisted records back the session: the login flag under
//! [`keys::IS_LOGGED_IN`] and the username under [`keys::USERNAME`]. Both are
//! written as JSON strings. Older clients wrote them unencoded (`true` and
//! `ash`), and those legacy values are still read back, but nothing else
//! counts as logged in.

use crate::error::Result;
use crate::providers::Authenticator;
use crate::validation::Credentials;
use cardvault_storage::{KeyValueBackend, Persistence, keys};

/// Canonical login flag value.
const LOGGED_IN_TOKEN: &str = "true";

/// Whether, and as whom, the user is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No session.
    #[default]
    LoggedOut,
    /// Authenticated session.
    LoggedIn {
        /// Username recorded at login
        username: String,
    },
}

impl SessionState {
    /// Whether a session is active.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// Username of the active session.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { username } => Some(username),
            Self::LoggedOut => None,
        }
    }
}

/// Owner of the persisted session.
///
/// Storage failures never surface from here: they are logged and the
/// in-memory state stays authoritative for the rest of the process.
#[derive(Debug)]
pub struct SessionStore<B> {
    storage: Persistence<B>,
    state: SessionState,
}

impl<B: KeyValueBackend> SessionStore<B> {
    /// Store starting logged out, without reading storage.
    #[must_use]
    pub const fn new(storage: Persistence<B>) -> Self {
        Self {
            storage,
            state: SessionState::LoggedOut,
        }
    }

    /// Store recovering any persisted session.
    #[must_use]
    pub fn restore(storage: Persistence<B>) -> Self {
        let mut store = Self::new(storage);
        store.check_session();
        store
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.state.is_logged_in()
    }

    /// Username of the active session.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.state.username()
    }

    /// Reload the session from storage.
    ///
    /// Logged in only if the flag holds the true-token and a non-blank
    /// username is stored; every other combination is logged out.
    pub fn check_session(&mut self) -> &SessionState {
        let flag = self.storage.get_raw(keys::IS_LOGGED_IN);
        let username = self
            .storage
            .get_raw(keys::USERNAME)
            .map(|raw| decode_username(&raw))
            .filter(|name| !name.trim().is_empty());

        self.state = match (flag.as_deref().is_some_and(is_true_token), username) {
            (true, Some(username)) => SessionState::LoggedIn { username },
            _ => SessionState::LoggedOut,
        };

        tracing::debug!(logged_in = self.state.is_logged_in(), "Session checked");
        &self.state
    }

    /// Validate, authenticate and persist a login.
    ///
    /// Invalid credentials are rejected before `authenticator` is called. On
    /// failure the state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns the validation or authentication failure.
    pub async fn login<A: Authenticator>(
        &mut self,
        authenticator: &A,
        credentials: &Credentials,
    ) -> Result<String> {
        credentials.validate()?;

        let username = authenticator.authenticate(credentials).await?;

        let persisted = self
            .storage
            .set(keys::IS_LOGGED_IN, LOGGED_IN_TOKEN)
            .and_then(|()| self.storage.set(keys::USERNAME, &username));
        if persisted.is_err() {
            tracing::warn!("Session not persisted, it will not survive a restart");
        }

        tracing::info!(%username, "Logged in");
        self.state = SessionState::LoggedIn {
            username: username.clone(),
        };
        Ok(username)
    }

    /// Forget the session, in storage and in memory.
    pub fn logout(&mut self) {
        // Both removals are attempted even if the first fails.
        let flag = self.storage.remove(keys::IS_LOGGED_IN);
        let name = self.storage.remove(keys::USERNAME);
        if flag.is_err() || name.is_err() {
            tracing::warn!("Session records could not be removed from storage");
        }

        if let Some(username) = self.state.username() {
            tracing::info!(%username, "Logged out");
        }
        self.state = SessionState::LoggedOut;
    }
}

// `"true"` is canonical; bare `true` is what older clients wrote.
fn is_true_token(raw: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(flag)) => flag == LOGGED_IN_TOKEN,
        _ => raw == LOGGED_IN_TOKEN,
    }
}

fn decode_username(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::error::{AuthError, ValidationError};
    use crate::mocks::RecordingAuthenticator;
    use cardvault_storage::MemoryBackend;
    use cardvault_testing::FailingBackend;

    fn store_with(flag: Option<&str>, username: Option<&str>) -> SessionStore<MemoryBackend> {
        let backend = MemoryBackend::new();
        if let Some(flag) = flag {
            backend.set_item(keys::IS_LOGGED_IN, flag).unwrap();
        }
        if let Some(username) = username {
            backend.set_item(keys::USERNAME, username).unwrap();
        }
        SessionStore::restore(Persistence::new(backend))
    }

    #[test]
    fn canonical_and_legacy_flags_restore_session() {
        let canonical = store_with(Some("\"true\""), Some("\"ash\""));
        assert_eq!(canonical.username(), Some("ash"));

        let legacy = store_with(Some("true"), Some("ash"));
        assert_eq!(legacy.username(), Some("ash"));
    }

    #[test]
    fn anything_else_is_logged_out() {
        for (flag, username) in [
            (None, Some("\"ash\"")),
            (Some("\"true\""), None),
            (Some("\"true\""), Some("\"  \"")),
            (Some("\"false\""), Some("\"ash\"")),
            (Some("false"), Some("ash")),
            (Some("\"TRUE\""), Some("\"ash\"")),
            (Some("1"), Some("\"ash\"")),
            (Some("{not json"), Some("\"ash\"")),
        ] {
            let store = store_with(flag, username);
            assert!(!store.is_logged_in(), "flag={flag:?} username={username:?}");
        }
    }

    #[tokio::test]
    async fn login_persists_canonical_records() {
        let backend = MemoryBackend::new();
        let mut store = SessionStore::new(Persistence::new(backend.clone()));

        let username = store
            .login(&RecordingAuthenticator::accepting(), &Credentials::new(" ash ", "secret"))
            .await
            .unwrap();

        assert_eq!(username, "ash");
        assert_eq!(store.state(), &SessionState::LoggedIn { username: "ash".to_string() });
        assert_eq!(backend.get_item(keys::IS_LOGGED_IN).unwrap().as_deref(), Some("\"true\""));
        assert_eq!(backend.get_item(keys::USERNAME).unwrap().as_deref(), Some("\"ash\""));
    }

    #[tokio::test]
    async fn invalid_credentials_never_reach_authenticator() {
        let authenticator = RecordingAuthenticator::accepting();
        let mut store = SessionStore::new(Persistence::new(MemoryBackend::new()));

        let error = store
            .login(&authenticator, &Credentials::new("as", "secret"))
            .await
            .unwrap_err();

        assert_eq!(error, AuthError::Validation(ValidationError::UsernameTooShort));
        assert_eq!(authenticator.calls(), 0);
        assert!(!store.is_logged_in());
    }

    #[tokio::test]
    async fn rejected_login_leaves_state_untouched() {
        let backend = MemoryBackend::new();
        let mut store = SessionStore::new(Persistence::new(backend.clone()));

        let error = store
            .login(
                &RecordingAuthenticator::failing(AuthError::InvalidCredentials),
                &Credentials::new("ash", "wrong"),
            )
            .await
            .unwrap_err();

        assert_eq!(error, AuthError::InvalidCredentials);
        assert!(!store.is_logged_in());
        assert!(backend.is_empty().unwrap());
    }

    #[tokio::test]
    async fn storage_failure_degrades_to_memory_only() {
        let backend = FailingBackend::read_only();
        let mut store = SessionStore::new(Persistence::new(backend.clone()));

        store
            .login(&RecordingAuthenticator::accepting(), &Credentials::new("ash", "secret"))
            .await
            .unwrap();
        assert_eq!(store.username(), Some("ash"));

        store.logout();
        assert!(!store.is_logged_in());
    }

    #[test]
    fn logout_removes_both_records() {
        let backend = MemoryBackend::new();
        backend.set_item(keys::IS_LOGGED_IN, "\"true\"").unwrap();
        backend.set_item(keys::USERNAME, "\"ash\"").unwrap();
        backend.set_item("unrelated", "1").unwrap();
        let mut store = SessionStore::restore(Persistence::new(backend.clone()));
        assert!(store.is_logged_in());

        store.logout();

        assert_eq!(store.state(), &SessionState::LoggedOut);
        assert_eq!(backend.get_item(keys::IS_LOGGED_IN).unwrap(), None);
        assert_eq!(backend.get_item(keys::USERNAME).unwrap(), None);
        assert_eq!(backend.get_item("unrelated").unwrap().as_deref(), Some("1"));
    }
}
