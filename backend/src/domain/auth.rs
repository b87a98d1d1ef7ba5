//! Authentication primitives: login credentials, registration input, and
//! the per-attempt authentication outcome.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, User, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or not a valid address.
    InvalidEmail(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Display name failed validation.
    InvalidName(UserValidationError),
    /// Email was missing or not a valid address.
    InvalidEmail(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "{err}"),
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised by [`EmailAddress`] so lookups match the store's
///   uniqueness constraint.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Alice@X.com", "secret1").unwrap();
/// assert_eq!(creds.email().as_ref(), "alice@x.com");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for user lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration input.
///
/// The password stays plaintext here; the registration service hashes it
/// before anything touches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw name/email/password inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = DisplayName::new(name).map_err(RegistrationValidationError::InvalidName)?;
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Normalised login email for the new account.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Why a login attempt was turned away.
///
/// Rejections are normal control flow, distinct from store or hasher
/// failures; the messages surface to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// No account exists for the supplied email.
    UserNotFound,
    /// The account exists but the password did not verify.
    IncorrectPassword,
}

impl RejectionReason {
    /// User-facing message for the rejection.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::UserNotFound => "User not found",
            Self::IncorrectPassword => "Incorrect password",
        }
    }
}

/// Terminal outcome of a single authentication attempt.
///
/// Store and hasher failures are not outcomes; they propagate as
/// [`crate::domain::Error`] so adapters can never present them as a wrong
/// password.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Credentials verified; carries the full user record.
    Accepted(User),
    /// Credentials declined for the given reason.
    Rejected(RejectionReason),
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("not-an-email", "pw")]
    fn invalid_login_emails(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert!(matches!(err, LoginValidationError::InvalidEmail(_)));
    }

    #[test]
    fn empty_login_password_is_rejected() {
        let err = LoginCredentials::try_from_parts("alice@x.com", "")
            .expect_err("empty password must fail");
        assert_eq!(err, LoginValidationError::EmptyPassword);
    }

    #[test]
    fn login_email_is_normalised_but_password_preserved() {
        let creds = LoginCredentials::try_from_parts("  Alice@X.com ", "  spaced  ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), "alice@x.com");
        assert_eq!(creds.password(), "  spaced  ");
    }

    #[rstest]
    #[case("Al", "alice@x.com", "pw")]
    #[case("Alice", "nope", "pw")]
    #[case("Alice", "alice@x.com", "")]
    fn invalid_registrations(#[case] name: &str, #[case] email: &str, #[case] password: &str) {
        Registration::try_from_parts(name, email, password)
            .expect_err("invalid inputs must fail");
    }

    #[rstest]
    #[case(RejectionReason::UserNotFound, "User not found")]
    #[case(RejectionReason::IncorrectPassword, "Incorrect password")]
    fn rejection_messages_are_stable(#[case] reason: RejectionReason, #[case] expected: &str) {
        assert_eq!(reason.message(), expected);
    }
}
