//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthenticationService, IdentityResolver, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthenticationService>,
    pub registration: Arc<dyn RegistrationService>,
    pub identity: Arc<dyn IdentityResolver>,
}

impl HttpState {
    /// Construct state from the three authentication-related ports.
    pub fn new(
        auth: Arc<dyn AuthenticationService>,
        registration: Arc<dyn RegistrationService>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            auth,
            registration,
            identity,
        }
    }
}
