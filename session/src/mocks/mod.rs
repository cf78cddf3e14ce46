//! Mock authenticators for testing.

use crate::error::Result;
use crate::providers::Authenticator;
use crate::validation::Credentials;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Authenticator returning a scripted outcome and counting calls.
///
/// Clones share the call counter.
#[derive(Debug, Clone)]
pub struct RecordingAuthenticator {
    outcome: Result<Option<String>>,
    calls: Arc<AtomicUsize>,
}

impl RecordingAuthenticator {
    /// Accept everyone, echoing the trimmed typed username.
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            outcome: Ok(None),
            calls: Arc::default(),
        }
    }

    /// Accept everyone as `username`.
    #[must_use]
    pub fn accepting_as(username: impl Into<String>) -> Self {
        Self {
            outcome: Ok(Some(username.into())),
            calls: Arc::default(),
        }
    }

    /// Reject everyone with `error`.
    #[must_use]
    pub fn failing(error: crate::error::AuthError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::default(),
        }
    }

    /// Number of `authenticate` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for RecordingAuthenticator {
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<String>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone().map(|username| {
            username.unwrap_or_else(|| credentials.username.trim().to_string())
        });
        async move { outcome }
    }
}
