//! Account registration service: hash first, then insert.
//!
//! The plaintext password never reaches the store; insertion happens only
//! after the hash computation succeeds.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CredentialStore, PasswordHasher, RegistrationService};
use crate::domain::{Error, NewUser, Registration, User};

/// Registration service backed by a credential store and password hasher.
#[derive(Clone)]
pub struct RegistrationServiceImpl {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegistrationServiceImpl {
    /// Create a new service over the given ports.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl RegistrationService for RegistrationServiceImpl {
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self.hasher.hash(registration.password()).await?;
        let new_user = NewUser::new(
            registration.name().clone(),
            registration.email().clone(),
            password_hash,
        );
        let user = self.store.insert(&new_user).await?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}
