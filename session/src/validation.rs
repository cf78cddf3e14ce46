//! Local credential checks.

use crate::error::ValidationError;
use std::fmt;

/// Minimum length of the trimmed username and of the password.
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// Username and password as typed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username as typed (may carry surrounding whitespace).
    pub username: String,
    /// Password as typed.
    pub password: String,
}

impl Credentials {
    /// Bundle a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Run [`validate_login_credentials`] on these credentials.
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_login_credentials(&self.username, &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check credentials before they are sent anywhere.
///
/// Checks run in order: both blank, username blank, password blank,
/// trimmed username too short, password too short. The password is
/// measured untrimmed.
///
/// # Errors
///
/// Returns the first failed check.
pub fn validate_login_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    match (is_blank(username), is_blank(password)) {
        (true, true) => return Err(ValidationError::MissingFields),
        (true, false) => return Err(ValidationError::MissingUsername),
        (false, true) => return Err(ValidationError::MissingPassword),
        (false, false) => {}
    }

    if username.trim().chars().count() < MIN_CREDENTIAL_LEN {
        return Err(ValidationError::UsernameTooShort);
    }

    if password.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields() {
        assert_eq!(validate_login_credentials("", " "), Err(ValidationError::MissingFields));
        assert_eq!(
            validate_login_credentials(" ", "pikachu"),
            Err(ValidationError::MissingUsername)
        );
        assert_eq!(validate_login_credentials("ash", ""), Err(ValidationError::MissingPassword));
    }

    #[test]
    fn length_boundary() {
        assert_eq!(
            validate_login_credentials("as", "secret"),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(
            validate_login_credentials("  as  ", "secret"),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(validate_login_credentials("ash", "secret"), Ok(()));
        assert_eq!(validate_login_credentials("ash", "pw"), Err(ValidationError::PasswordTooShort));
        assert_eq!(validate_login_credentials("ash", "pw "), Ok(()));
    }

    #[test]
    fn debug_redacts_password() {
        let credentials = Credentials::new("ash", "pikachu");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("ash"));
        assert!(!debug.contains("pikachu"));
    }
}
