//! Domain ports and supporting types for the hexagonal boundary.

mod authentication_service;
mod credential_store;
mod identity_resolver;
mod password_hasher;
mod registration_service;

pub use authentication_service::AuthenticationService;
pub use credential_store::{CredentialStore, CredentialStoreError, InMemoryCredentialStore};
pub use identity_resolver::IdentityResolver;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use registration_service::RegistrationService;
