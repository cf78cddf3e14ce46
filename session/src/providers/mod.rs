//! Credential verifiers.
//!
//! The session store never checks passwords itself. It hands validated
//! [`Credentials`] to an [`Authenticator`] and trusts the username that
//! comes back.
//!
//! Both bundled authenticators speak the login endpoint's wire contract:
//! `POST {username, password}` answered by `{success, message, username?}`
//! with status 200, 400, 401 or 500.

use crate::error::{AuthError, Result, ValidationError};
use crate::validation::Credentials;
use serde::{Deserialize, Serialize};
use std::future::Future;

pub mod fixed;
pub mod http;

pub use fixed::FixedPasswordAuthenticator;
pub use http::HttpAuthenticator;

/// Verifies credentials.
pub trait Authenticator: Send + Sync {
    /// Verify `credentials`, returning the username to record in the session.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The credentials are rejected ([`AuthError::InvalidCredentials`],
    ///   [`AuthError::Validation`])
    /// - The verifier has no secret configured ([`AuthError::ServerMisconfigured`])
    /// - The verifier cannot be reached ([`AuthError::ServerUnavailable`])
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Login request body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username as typed.
    pub username: String,
    /// Password as typed.
    pub password: String,
}

impl From<&Credentials> for LoginRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Login response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether the login succeeded.
    pub success: bool,
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
    /// Trimmed username, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl LoginResponse {
    /// Failed outcome with `message`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            username: None,
        }
    }
}

/// Map a login endpoint answer to a session outcome.
///
/// `body` is `None` when the response could not be decoded.
pub(crate) fn interpret(
    status: u16,
    body: Option<LoginResponse>,
    credentials: &Credentials,
) -> Result<String> {
    match (status, body) {
        (200, Some(body)) if body.success => Ok(body
            .username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| credentials.username.trim().to_string())),
        (200 | 401, _) => Err(AuthError::InvalidCredentials),
        (400, body) => Err(ValidationError::Rejected(
            body.map(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Invalid login request".to_string()),
        )
        .into()),
        (500, _) => Err(AuthError::ServerMisconfigured),
        (status, _) => Err(AuthError::ServerUnavailable(format!(
            "unexpected status {status}"
        ))),
    }
}
