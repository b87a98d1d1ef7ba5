//! Password-based authentication strategy over the credential store and
//! password hasher ports.
//!
//! Each attempt resolves to exactly one of three terminal outcomes: accepted,
//! rejected (unknown email or wrong password), or an error from the backing
//! store/hasher. Rejections carry their user-facing message; errors propagate
//! and must never be presented as a wrong password.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AuthenticationService, CredentialStore, PasswordHasher};
use crate::domain::{AuthOutcome, Error, LoginCredentials, RejectionReason};

/// Authentication strategy backed by a credential store and password hasher.
///
/// No timing equalisation is attempted between the "user not found" and
/// "wrong password" branches; the constant-time comparison inside the verify
/// step is the only guarantee, a known and accepted limitation.
#[derive(Clone)]
pub struct PasswordAuthenticationService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl PasswordAuthenticationService {
    /// Create a new strategy over the given ports.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl AuthenticationService for PasswordAuthenticationService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthOutcome, Error> {
        // A store failure is an error, never a "not found" rejection.
        let Some(user) = self.store.find_by_email(credentials.email()).await? else {
            return Ok(AuthOutcome::Rejected(RejectionReason::UserNotFound));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await?;

        if verified {
            Ok(AuthOutcome::Accepted(user))
        } else {
            Ok(AuthOutcome::Rejected(RejectionReason::IncorrectPassword))
        }
    }
}
