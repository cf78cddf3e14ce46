//! Remote login endpoint.

use super::{Authenticator, LoginRequest, LoginResponse, interpret};
use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::validation::Credentials;
use reqwest::Client;
use std::future::Future;

/// Authenticator posting credentials to the login endpoint.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: Client,
    endpoint: String,
}

impl HttpAuthenticator {
    /// Create an authenticator for `config.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ServerUnavailable`] if the HTTP client cannot be built.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AuthError::ServerUnavailable(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    /// Endpoint credentials are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[tracing::instrument(
        skip(self, credentials),
        fields(username = %credentials.username.trim()),
        name = "http_authenticate"
    )]
    async fn post(&self, credentials: &Credentials) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&LoginRequest::from(credentials))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Login request failed");
                AuthError::ServerUnavailable(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = match response.json::<LoginResponse>().await {
            Ok(body) => Some(body),
            Err(error) => {
                tracing::debug!(status, %error, "Login response body unreadable");
                None
            },
        };

        let outcome = interpret(status, body, credentials);
        if let Err(error) = &outcome {
            tracing::debug!(status, %error, "Login rejected");
        }
        outcome
    }
}

impl Authenticator for HttpAuthenticator {
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<String>> + Send {
        self.post(credentials)
    }
}
