//! In-process fixed-password verifier.

use super::{Authenticator, LoginRequest, LoginResponse, interpret};
use crate::config::PASSWORD_ENV;
use crate::error::Result;
use crate::validation::{Credentials, MIN_CREDENTIAL_LEN};
use constant_time_eq::constant_time_eq;
use std::future::Future;

/// Verifier comparing every password against one configured secret.
///
/// Makes the same decisions as the login endpoint, without the network:
/// [`verify`](Self::verify) returns the status code and body the endpoint
/// would send.
#[derive(Clone, Default)]
pub struct FixedPasswordAuthenticator {
    secret: Option<String>,
}

impl FixedPasswordAuthenticator {
    /// Verifier for `secret`. An empty secret counts as unconfigured.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        let secret: String = secret.into();
        Self {
            secret: (!secret.is_empty()).then_some(secret),
        }
    }

    /// Verifier reading the secret from `AUTH_PASSWORD`.
    ///
    /// A missing variable is not an error here: every login then fails with
    /// status 500, matching an endpoint deployed without its secret.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(PASSWORD_ENV).map_or_else(|_| Self::default(), Self::new)
    }

    /// Whether a secret is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Decide a login request the way the endpoint does.
    #[must_use]
    pub fn verify(&self, request: &LoginRequest) -> (u16, LoginResponse) {
        if request.username.is_empty() || request.password.is_empty() {
            return (400, LoginResponse::failure("Username and password are required"));
        }

        if request.username.trim().chars().count() < MIN_CREDENTIAL_LEN {
            return (400, LoginResponse::failure("Username must be at least 3 characters"));
        }

        if request.password.chars().count() < MIN_CREDENTIAL_LEN {
            return (400, LoginResponse::failure("Password must be at least 3 characters"));
        }

        let Some(secret) = &self.secret else {
            tracing::error!("{PASSWORD_ENV} is not configured");
            return (500, LoginResponse::failure("Server configuration error"));
        };

        if !constant_time_eq(request.password.as_bytes(), secret.as_bytes()) {
            return (401, LoginResponse::failure("Incorrect password"));
        }

        (
            200,
            LoginResponse {
                success: true,
                message: "Login successful".to_string(),
                username: Some(request.username.trim().to_string()),
            },
        )
    }
}

impl std::fmt::Debug for FixedPasswordAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedPasswordAuthenticator")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl Authenticator for FixedPasswordAuthenticator {
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<String>> + Send {
        let (status, body) = self.verify(&LoginRequest::from(credentials));
        let outcome = interpret(status, Some(body), credentials);
        async move { outcome }
    }
}
