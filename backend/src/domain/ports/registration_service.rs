//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password and persist the account, returning the stored user.
    ///
    /// A duplicate email yields [`crate::domain::ErrorCode::Conflict`]; this
    /// is a user-facing rejection, not a transient fault, and is never
    /// retried.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
