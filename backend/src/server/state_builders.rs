//! Builders selecting port implementations for the HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{CredentialStore, InMemoryCredentialStore};
use backend::domain::{
    PasswordAuthenticationService, RegistrationServiceImpl, StoreIdentityResolver,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::password::Argon2PasswordHasher;
use backend::outbound::persistence::DieselCredentialStore;

use super::ServerConfig;

fn build_credential_store(config: &ServerConfig) -> Arc<dyn CredentialStore> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselCredentialStore::new(pool.clone())),
        None => {
            tracing::warn!("no database configured; accounts are held in memory");
            Arc::new(InMemoryCredentialStore::new())
        }
    }
}

/// Build the shared HTTP state from the configured credential store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = build_credential_store(config);
    let hasher = Arc::new(Argon2PasswordHasher::new());

    web::Data::new(HttpState::new(
        Arc::new(PasswordAuthenticationService::new(
            store.clone(),
            hasher.clone(),
        )),
        Arc::new(RegistrationServiceImpl::new(store.clone(), hasher)),
        Arc::new(StoreIdentityResolver::new(store)),
    ))
}
