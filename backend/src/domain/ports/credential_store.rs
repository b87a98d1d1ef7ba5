//! Port abstraction for credential persistence adapters and their errors.
//!
//! The store holds the single `users` table this service reads and writes:
//! two single-row lookups (by email, by id) and one insert. "Not found" is a
//! normal outcome on both lookups, never an error.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::error;

use crate::domain::{Error, NewUser, User, UserId};

use super::super::user::EmailAddress;

/// Persistence errors raised by credential store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialStoreError {
    /// Store connection could not be established.
    #[error("credential store connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("credential store query failed: {message}")]
    Query { message: String },

    /// Insert violated the unique constraint on email.
    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },
}

impl CredentialStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-email error for the given address.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

impl From<CredentialStoreError> for Error {
    /// Map store failures to domain errors.
    ///
    /// Connection and query failures are logged with full detail here and
    /// surfaced with generic messages; duplicate email keeps its specific,
    /// user-correctable message.
    fn from(value: CredentialStoreError) -> Self {
        match value {
            CredentialStoreError::Connection { message } => {
                error!(detail = %message, "credential store connection failed");
                Error::service_unavailable("credential store unavailable")
            }
            CredentialStoreError::Query { message } => {
                error!(detail = %message, "credential store query failed");
                Error::internal("credential store query failed")
            }
            CredentialStoreError::DuplicateEmail { .. } => {
                Error::conflict("email already registered")
            }
        }
    }
}

/// Driven port over the `users` table.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch a user by normalised email. `None` is the expected outcome for
    /// an unknown address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, CredentialStoreError>;

    /// Fetch a user by identifier. Same contract as the email lookup.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError>;

    /// Insert a new account and return it with its store-assigned id.
    ///
    /// Fails with [`CredentialStoreError::DuplicateEmail`] when the email is
    /// already registered.
    async fn insert(&self, new_user: &NewUser) -> Result<User, CredentialStoreError>;
}

/// In-memory credential store used by tests and pool-less development runs.
///
/// Holds its lock only for the duration of each synchronous operation and
/// never across an await point.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given users.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Remove a user, returning whether a record was deleted.
    ///
    /// Only exercised by tests simulating accounts deleted while a session
    /// still references them.
    pub fn remove(&self, id: &UserId) -> bool {
        let mut users = match self.users.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = users.len();
        users.retain(|user| user.id() != id);
        users.len() != before
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<User>> {
        match self.users.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, CredentialStoreError> {
        Ok(self.read().iter().find(|user| user.email() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        Ok(self.read().iter().find(|user| user.id() == id).cloned())
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, CredentialStoreError> {
        let mut users = match self.users.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if users.iter().any(|user| user.email() == new_user.email()) {
            return Err(CredentialStoreError::duplicate_email(
                new_user.email().as_ref(),
            ));
        }
        let user = new_user.clone().into_user(UserId::random());
        users.push(user.clone());
        Ok(user)
    }
}
