//! Driving port mapping users to and from their session identity.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Converts a user to the minimal identity stored in a session and back.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Project a user onto the identity persisted in the session.
    ///
    /// Pure projection: no I/O and no failure mode for valid input.
    fn serialize(&self, user: &User) -> UserId;

    /// Reconstitute the full user record from a session identity.
    ///
    /// `Ok(None)` means the account no longer exists (deleted or expired);
    /// callers must treat that as an unauthenticated state rather than a
    /// failure. Store errors surface distinctly on the `Err` side.
    async fn deserialize(&self, id: &UserId) -> Result<Option<User>, Error>;
}
