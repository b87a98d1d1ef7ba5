//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::InMemoryCredentialStore;
use crate::domain::{PasswordAuthenticationService, RegistrationServiceImpl, StoreIdentityResolver};
use crate::inbound::http::state::HttpState;
use crate::outbound::password::Argon2PasswordHasher;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over an in-memory store and a low-cost hasher.
///
/// Returns the store alongside the state so tests can mutate accounts behind
/// the handlers' backs, e.g. deleting a user that still has a live session.
pub fn test_http_state() -> (HttpState, Arc<InMemoryCredentialStore>) {
    let store = Arc::new(InMemoryCredentialStore::new());
    // Reduced memory cost keeps handler suites fast.
    let hasher = Arc::new(
        Argon2PasswordHasher::with_params(1024, 1, 1).expect("valid test parameters"),
    );
    let state = HttpState::new(
        Arc::new(PasswordAuthenticationService::new(
            store.clone(),
            hasher.clone(),
        )),
        Arc::new(RegistrationServiceImpl::new(store.clone(), hasher)),
        Arc::new(StoreIdentityResolver::new(store.clone())),
    );
    (state, store)
}
