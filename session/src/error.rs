//! Error types for login and session operations.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Credentials rejected before or by the login endpoint's input checks.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Both fields are blank.
    #[error("Please fill in all fields")]
    MissingFields,

    /// Username is blank.
    #[error("Please enter your username")]
    MissingUsername,

    /// Password is blank.
    #[error("Please enter your password")]
    MissingPassword,

    /// Trimmed username is shorter than the minimum.
    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    /// Password is shorter than the minimum.
    #[error("Password must be at least 3 characters")]
    PasswordTooShort,

    /// The login endpoint rejected the input (HTTP 400).
    #[error("{0}")]
    Rejected(String),
}

/// Login and session failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Input Errors (never reach the network when detected locally)
    // ═══════════════════════════════════════════════════════════

    /// Credentials failed validation.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════

    /// Wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The operation needs a logged-in session.
    #[error("Not logged in")]
    NotLoggedIn,

    // ═══════════════════════════════════════════════════════════
    // Server Errors
    // ═══════════════════════════════════════════════════════════

    /// The login endpoint has no secret configured.
    #[error("Authentication server is misconfigured")]
    ServerMisconfigured,

    /// The login endpoint could not be reached or answered unexpectedly.
    #[error("Authentication server unavailable: {0}")]
    ServerUnavailable(String),
}

impl AuthError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::InvalidCredentials => "Incorrect password".to_string(),
            Self::NotLoggedIn => "Please log in first".to_string(),
            Self::ServerMisconfigured => "Server configuration error".to_string(),
            Self::ServerUnavailable(_) => {
                "Could not connect to the server. Please try again.".to_string()
            },
        }
    }

    /// Whether the failure was caught before contacting the authenticator.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
