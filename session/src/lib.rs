//! # CardVault Session
//!
//! Login gate, session persistence and favorites for CardVault.
//!
//! ## Architecture
//!
//! ```text
//! Credentials ──validate──▶ Authenticator ──username──▶ SessionStore ─┐
//!                                                                      ├─▶ Persistence
//!                             toggle / add / remove ──▶ FavoritesStore ┘
//! ```
//!
//! [`Vault`] owns both stores and enforces the cross-store rules: favorites
//! need a session, and logout deletes them together with the session.
//!
//! ## Example
//!
//! ```
//! use cardvault_catalog::CardId;
//! use cardvault_session::{Credentials, FixedPasswordAuthenticator, Vault};
//! use cardvault_storage::MemoryBackend;
//!
//! # tokio_test::block_on(async {
//! let authenticator = FixedPasswordAuthenticator::new("pikachu");
//! let mut vault = Vault::open(MemoryBackend::new());
//!
//! vault.login(&authenticator, &Credentials::new("ash", "pikachu")).await?;
//! vault.toggle_favorite(CardId::new("base1-4"))?;
//! assert_eq!(vault.favorites().count(), 1);
//!
//! vault.logout();
//! assert_eq!(vault.favorites().count(), 0);
//! # Ok::<(), cardvault_session::AuthError>(())
//! # }).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod favorites;
pub mod providers;
pub mod session;
pub mod validation;
pub mod vault;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use config::AuthConfig;
pub use error::{AuthError, Result, ValidationError};
pub use favorites::FavoritesStore;
pub use providers::{
    Authenticator, FixedPasswordAuthenticator, HttpAuthenticator, LoginRequest, LoginResponse,
};
pub use session::{SessionState, SessionStore};
pub use validation::{Credentials, validate_login_credentials};
pub use vault::Vault;
