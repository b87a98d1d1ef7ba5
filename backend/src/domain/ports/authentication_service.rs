//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. This makes HTTP handler tests deterministic because they
//! can substitute a test double instead of wiring persistence and hashing.

use async_trait::async_trait;

use crate::domain::{AuthOutcome, Error, LoginCredentials};

/// Domain use-case port for authentication.
///
/// The `Ok` side carries both terminal user-facing outcomes (accepted and
/// rejected); only store or hasher failures land on the `Err` side, so
/// callers cannot accidentally conflate an infrastructure fault with a wrong
/// password.
#[async_trait]
pub trait AuthenticationService: Send + Sync {
    /// Run a single authentication attempt for the given credentials.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthOutcome, Error>;
}
