//! Error types for the card catalog client.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur when talking to the card catalog.
///
/// Every variant keeps the underlying cause so it can be logged; display to
/// users goes through [`CatalogError::category`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Request failed: {0}")]
    Network(String),

    /// The catalog answered a listing request with a non-success status.
    #[error("Catalog error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// A single-card lookup did not succeed.
    #[error("Card not found: {id} (status {status})")]
    CardNotFound {
        /// Requested card id
        id: String,
        /// HTTP status code returned
        status: u16,
    },

    /// The response body is JSON but not a card listing.
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    /// The response body could not be decoded.
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    /// The HTTP client could not be built.
    #[error("Invalid catalog client configuration: {0}")]
    Configuration(String),
}

/// User-facing classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The requested card or listing does not exist.
    NotFound,
    /// The catalog failed (5xx).
    ServerError,
    /// The catalog could not be reached.
    NetworkUnavailable,
    /// Anything else.
    Unknown,
}

impl ErrorCategory {
    /// Message suitable for showing to the user.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::NotFound => "Card not found",
            Self::ServerError => "Server error. Please try again later.",
            Self::NetworkUnavailable => "Connection error. Check your internet connection.",
            Self::Unknown => "Unexpected error while loading cards",
        }
    }
}

impl CatalogError {
    /// Classify this error for display. Total: every error maps to exactly one category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::NetworkUnavailable,
            Self::CardNotFound { .. } | Self::Status { status: 404, .. } => ErrorCategory::NotFound,
            Self::Status { status: 500..=599, .. } => ErrorCategory::ServerError,
            Self::Status { .. }
            | Self::InvalidResponse(_)
            | Self::Decode(_)
            | Self::Configuration(_) => ErrorCategory::Unknown,
        }
    }

    /// Shorthand for `self.category().user_message()`.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        self.category().user_message()
    }
}
