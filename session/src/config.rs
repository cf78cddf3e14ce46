//! Login endpoint configuration.

use std::time::Duration;

/// Login endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/auth";

/// Environment variable overriding [`AuthConfig::endpoint`].
pub const ENDPOINT_ENV: &str = "CARDVAULT_AUTH_URL";

/// Environment variable holding the shared login secret.
pub const PASSWORD_ENV: &str = "AUTH_PASSWORD";

/// Configuration for [`HttpAuthenticator`](crate::providers::HttpAuthenticator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Full URL of the login endpoint.
    pub endpoint: String,

    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl AuthConfig {
    /// Configuration for `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Defaults, with the endpoint taken from `CARDVAULT_AUTH_URL` when set.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::new(endpoint.trim()),
            _ => Self::default(),
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
