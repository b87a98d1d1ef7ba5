//! PostgreSQL persistence adapters for the credential store.

mod diesel_credential_store;
pub(crate) mod models;
mod pool;
pub mod schema;

pub use diesel_credential_store::DieselCredentialStore;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply any pending migrations against the given database.
///
/// Diesel's migration harness is synchronous, so the work runs on the
/// blocking pool before the async connection pool is built.
///
/// # Errors
///
/// Returns [`PoolError::Build`] when the connection or a migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), PoolError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = diesel::PgConnection::establish(&url)
            .map_err(|err| PoolError::build(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| PoolError::build(err.to_string()))
    })
    .await
    .map_err(|err| PoolError::build(format!("migration task failed: {err}")))?
}
