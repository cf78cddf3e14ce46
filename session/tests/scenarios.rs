//! End-to-end session and favorites behaviour.

#![allow(clippy::unwrap_used)] // Test code

use cardvault_catalog::CardId;
use cardvault_session::{
    AuthError, Credentials, FavoritesStore, FixedPasswordAuthenticator, SessionState,
    SessionStore, ValidationError, Vault, mocks::RecordingAuthenticator,
};
use cardvault_storage::{KeyValueBackend, MemoryBackend, Persistence, keys};
use cardvault_testing::{init_tracing, properties};
use proptest::prelude::*;

#[tokio::test]
async fn ash_stars_charizard_then_logs_out() {
    init_tracing();
    let backend = MemoryBackend::new();
    let authenticator = FixedPasswordAuthenticator::new("pikachu");
    let mut vault = Vault::open(backend.clone());

    vault
        .login(&authenticator, &Credentials::new("ash", "pikachu"))
        .await
        .unwrap();
    assert_eq!(
        vault.state(),
        &SessionState::LoggedIn {
            username: "ash".to_string()
        }
    );

    assert!(vault.toggle_favorite(CardId::new("base1-4")).unwrap());
    assert_eq!(vault.favorites().ids(), vec![CardId::new("base1-4")]);
    assert_eq!(vault.favorites().count(), 1);

    vault.logout();

    assert_eq!(vault.state(), &SessionState::LoggedOut);
    assert_eq!(vault.favorites().count(), 0);
    for key in [keys::IS_LOGGED_IN, keys::USERNAME, keys::FAVORITES] {
        assert_eq!(backend.get_item(key).unwrap(), None, "{key} should be gone");
    }
}

#[tokio::test]
async fn session_and_favorites_survive_restart() {
    let backend = MemoryBackend::new();
    {
        let mut vault = Vault::open(backend.clone());
        vault
            .login(&RecordingAuthenticator::accepting(), &Credentials::new("ash", "pikachu"))
            .await
            .unwrap();
        vault.toggle_favorite(CardId::new("base1-4")).unwrap();
        vault.toggle_favorite(CardId::new("xy7-54")).unwrap();
    }

    let vault = Vault::open(backend);
    assert_eq!(vault.state().username(), Some("ash"));
    assert_eq!(
        vault.favorites().ids(),
        vec![CardId::new("base1-4"), CardId::new("xy7-54")]
    );
}

#[tokio::test]
async fn legacy_session_records_are_honoured() {
    let backend = MemoryBackend::new();
    backend.set_item(keys::IS_LOGGED_IN, "true").unwrap();
    backend.set_item(keys::USERNAME, "ash").unwrap();
    backend.set_item(keys::FAVORITES, r#"["base1-4"]"#).unwrap();

    let vault = Vault::open(backend);

    assert_eq!(vault.state().username(), Some("ash"));
    assert!(vault.favorites().contains(&CardId::new("base1-4")));
}

#[tokio::test]
async fn credential_length_boundary() {
    let authenticator = RecordingAuthenticator::accepting();
    let mut session = SessionStore::new(Persistence::new(MemoryBackend::new()));

    let short = session
        .login(&authenticator, &Credentials::new("as", "pikachu"))
        .await;
    assert_eq!(
        short,
        Err(AuthError::Validation(ValidationError::UsernameTooShort))
    );
    assert_eq!(authenticator.calls(), 0);

    let ok = session
        .login(&authenticator, &Credentials::new("ash", "pikachu"))
        .await;
    assert_eq!(ok, Ok("ash".to_string()));
    assert_eq!(authenticator.calls(), 1);
}

#[tokio::test]
async fn wrong_password_keeps_user_logged_out() {
    let mut vault = Vault::open(MemoryBackend::new());

    let error = vault
        .login(
            &FixedPasswordAuthenticator::new("pikachu"),
            &Credentials::new("ash", "raichu"),
        )
        .await
        .unwrap_err();

    assert_eq!(error, AuthError::InvalidCredentials);
    assert_eq!(error.user_message(), "Incorrect password");
    assert_eq!(vault.state(), &SessionState::LoggedOut);
}

fn favorites_with(ids: &[String]) -> (FavoritesStore<MemoryBackend>, MemoryBackend) {
    let backend = MemoryBackend::new();
    let mut favorites = FavoritesStore::load(Persistence::new(backend.clone()));
    for id in ids {
        favorites.add(CardId::new(id.as_str()));
    }
    (favorites, backend)
}

proptest! {
    #[test]
    fn toggle_twice_is_identity(
        ids in prop::collection::vec(properties::card_id(), 0..12),
        x in properties::card_id(),
    ) {
        let (mut favorites, _) = favorites_with(&ids);
        let mut before = favorites.ids();
        before.sort();

        favorites.toggle(CardId::new(x.as_str()));
        favorites.toggle(CardId::new(x.as_str()));

        let mut after = favorites.ids();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn saved_favorites_load_back(ids in prop::collection::vec(properties::card_id(), 0..20)) {
        let (favorites, backend) = favorites_with(&ids);
        let reloaded = FavoritesStore::load(Persistence::new(backend));

        prop_assert_eq!(reloaded.ids(), favorites.ids());
        prop_assert_eq!(reloaded.count(), reloaded.iter().count());
    }

    #[test]
    fn session_restores_only_for_true_token_and_username(
        flag in prop::option::of(prop_oneof![
            Just("\"true\"".to_string()),
            Just("true".to_string()),
            Just("\"false\"".to_string()),
            "[a-z\"]{0,6}",
        ]),
        username in prop::option::of(properties::valid_username()),
    ) {
        let backend = MemoryBackend::new();
        if let Some(flag) = &flag {
            backend.set_item(keys::IS_LOGGED_IN, flag).unwrap();
        }
        if let Some(username) = &username {
            backend.set_item(keys::USERNAME, &serde_json::to_string(username).unwrap()).unwrap();
        }

        let session = SessionStore::restore(Persistence::new(backend));

        let truthy = matches!(flag.as_deref(), Some("\"true\"" | "true"));
        prop_assert_eq!(session.is_logged_in(), truthy && username.is_some());
        if session.is_logged_in() {
            prop_assert_eq!(session.username(), username.as_deref());
        }
    }
}
