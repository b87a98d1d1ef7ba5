//! Session identity resolution over the credential store.
//!
//! The session stores only the user id; every session-bearing request
//! reconstitutes the full record through this resolver. A missing record is a
//! normal outcome (account deleted since login) and resolves the request to
//! an unauthenticated state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CredentialStore, IdentityResolver};
use crate::domain::{Error, User, UserId};

/// Identity resolver backed by the credential store's id lookup.
#[derive(Clone)]
pub struct StoreIdentityResolver {
    store: Arc<dyn CredentialStore>,
}

impl StoreIdentityResolver {
    /// Create a resolver over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityResolver for StoreIdentityResolver {
    fn serialize(&self, user: &User) -> UserId {
        user.id().clone()
    }

    async fn deserialize(&self, id: &UserId) -> Result<Option<User>, Error> {
        let user = self.store.find_by_id(id).await?;
        Ok(user)
    }
}
