//! Session and favorites bound together.
//!
//! Favorites belong to the session that starred them. The vault keeps
//! that true across login, logout and restart: no favorites survive in
//! storage without a session, and logging in as someone else starts from an
//! empty list.

use crate::error::{AuthError, Result};
use crate::favorites::FavoritesStore;
use crate::providers::Authenticator;
use crate::session::{SessionState, SessionStore};
use crate::validation::Credentials;
use cardvault_catalog::CardId;
use cardvault_storage::{KeyValueBackend, Persistence};

/// Session store and favorites store sharing one storage namespace.
#[derive(Debug)]
pub struct Vault<B> {
    session: SessionStore<B>,
    favorites: FavoritesStore<B>,
}

impl<B: KeyValueBackend> Vault<B> {
    /// Open the vault over `backend`, restoring any persisted session.
    ///
    /// Favorites left behind without a session are deleted.
    #[must_use]
    pub fn open(backend: B) -> Self {
        Self::from_persistence(&Persistence::new(backend))
    }

    /// Open the vault over an existing persistence handle.
    #[must_use]
    pub fn from_persistence(storage: &Persistence<B>) -> Self {
        let session = SessionStore::restore(storage.clone());
        let mut favorites = FavoritesStore::load(storage.clone());

        if !session.is_logged_in() && !favorites.is_empty() {
            tracing::warn!(count = favorites.count(), "Removing favorites left without a session");
            favorites.clear();
        }

        Self { session, favorites }
    }

    /// Session state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        self.session.state()
    }

    /// Session store.
    #[must_use]
    pub const fn session(&self) -> &SessionStore<B> {
        &self.session
    }

    /// Favorites store.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore<B> {
        &self.favorites
    }

    /// Log in. A different user than the current one starts with no favorites.
    ///
    /// # Errors
    ///
    /// Returns the validation or authentication failure; nothing changes.
    pub async fn login<A: Authenticator>(
        &mut self,
        authenticator: &A,
        credentials: &Credentials,
    ) -> Result<String> {
        let previous = self.session.username().map(str::to_string);
        let username = self.session.login(authenticator, credentials).await?;

        if previous.as_deref() != Some(username.as_str()) && !self.favorites.is_empty() {
            tracing::debug!("New user, clearing favorites");
            self.favorites.clear();
        }
        Ok(username)
    }

    /// Log out and delete the session's favorites.
    pub fn logout(&mut self) {
        self.session.logout();
        self.favorites.clear();
    }

    /// Flip a favorite, returning whether it is now starred.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] without a session.
    pub fn toggle_favorite(&mut self, id: CardId) -> Result<bool> {
        self.require_session()?;
        Ok(self.favorites.toggle(id))
    }

    /// Star a card. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] without a session.
    pub fn add_favorite(&mut self, id: CardId) -> Result<bool> {
        self.require_session()?;
        Ok(self.favorites.add(id))
    }

    /// Unstar a card. Returns `false` if it was not starred.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] without a session.
    pub fn remove_favorite(&mut self, id: &CardId) -> Result<bool> {
        self.require_session()?;
        Ok(self.favorites.remove(id))
    }

    fn require_session(&self) -> Result<()> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(AuthError::NotLoggedIn)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::mocks::RecordingAuthenticator;
    use cardvault_storage::{MemoryBackend, keys};

    #[test]
    fn favorites_require_a_session() {
        let mut vault = Vault::open(MemoryBackend::new());
        assert_eq!(
            vault.toggle_favorite(CardId::new("base1-4")),
            Err(AuthError::NotLoggedIn)
        );
        assert_eq!(vault.favorites().count(), 0);
    }

    #[test]
    fn orphaned_favorites_are_removed_on_open() {
        let backend = MemoryBackend::new();
        backend.set_item(keys::FAVORITES, r#"["base1-4"]"#).unwrap();

        let vault = Vault::open(backend.clone());

        assert_eq!(vault.favorites().count(), 0);
        assert_eq!(backend.get_item(keys::FAVORITES).unwrap(), None);
    }

    #[tokio::test]
    async fn switching_user_starts_empty() {
        let backend = MemoryBackend::new();
        let mut vault = Vault::open(backend);

        vault
            .login(&RecordingAuthenticator::accepting(), &Credentials::new("ash", "secret"))
            .await
            .unwrap();
        vault.toggle_favorite(CardId::new("base1-4")).unwrap();

        vault
            .login(&RecordingAuthenticator::accepting(), &Credentials::new("ash", "secret"))
            .await
            .unwrap();
        assert_eq!(vault.favorites().count(), 1);

        vault
            .login(&RecordingAuthenticator::accepting(), &Credentials::new("misty", "secret"))
            .await
            .unwrap();
        assert_eq!(vault.favorites().count(), 0);
        assert_eq!(vault.state().username(), Some("misty"));
    }
}
