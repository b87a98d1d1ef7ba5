//! Backend entry-point: wires REST endpoints, session storage, and OpenAPI docs.

mod server;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use std::env;
use std::net::SocketAddr;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Minimum key material accepted for the session cookie key.
///
/// `Key::derive_from` panics below this; reject short files up front so a
/// truncated secret surfaces as a startup error instead.
const MIN_SESSION_KEY_BYTES: usize = 32;

fn key_from_bytes(bytes: &[u8], key_path: &str) -> std::io::Result<Key> {
    if bytes.len() < MIN_SESSION_KEY_BYTES {
        return Err(std::io::Error::other(format!(
            "session key at {key_path} must hold at least {MIN_SESSION_KEY_BYTES} bytes, found {}",
            bytes.len()
        )));
    }
    Ok(Key::derive_from(bytes))
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => key_from_bytes(&bytes, &key_path),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn bind_addr() -> std::io::Result<SocketAddr> {
    let raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    raw.parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR {raw}: {e}")))
}

/// Decide where accounts live based on environment configuration.
///
/// Returns the database URL when one is configured. Running without a
/// database keeps accounts in process memory, where they vanish on restart;
/// that is allowed only in debug builds or behind an explicit opt-in so a
/// missing or typoed `DATABASE_URL` cannot silently downgrade a production
/// deployment.
fn resolve_database_url(
    database_url: Option<String>,
    allow_in_memory: bool,
    debug_build: bool,
) -> std::io::Result<Option<String>> {
    match database_url {
        Some(url) => Ok(Some(url)),
        None if debug_build || allow_in_memory => {
            warn!("DATABASE_URL not set; accounts are held in memory (dev only)");
            Ok(None)
        }
        None => Err(std::io::Error::other(
            "DATABASE_URL must be set; set DATABASE_ALLOW_IN_MEMORY=1 to serve accounts from process memory",
        )),
    }
}

async fn build_db_pool() -> std::io::Result<Option<DbPool>> {
    let allow_in_memory = env::var("DATABASE_ALLOW_IN_MEMORY").ok().as_deref() == Some("1");
    let Some(database_url) = resolve_database_url(
        env::var("DATABASE_URL").ok(),
        allow_in_memory,
        cfg!(debug_assertions),
    )?
    else {
        return Ok(None);
    };

    run_pending_migrations(&database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr()?);
    if let Some(pool) = build_db_pool().await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

#[cfg(test)]
mod tests {
    //! Regression coverage for startup configuration decisions.
    use super::*;
    use rstest::rstest;

    #[test]
    fn short_session_key_files_are_rejected_not_panicked() {
        let short = [0_u8; MIN_SESSION_KEY_BYTES - 1];
        let err = key_from_bytes(&short, "/tmp/session_key")
            .map(|_| ())
            .expect_err("short keys must fail");
        assert!(err.to_string().contains("at least 32 bytes"));
    }

    #[test]
    fn full_length_session_key_files_are_accepted() {
        let bytes = [7_u8; MIN_SESSION_KEY_BYTES];
        key_from_bytes(&bytes, "/tmp/session_key").expect("32 bytes of key material suffice");
    }

    #[rstest]
    #[case(Some("postgres://localhost/accounts".to_owned()), false, false)]
    #[case(Some("postgres://localhost/accounts".to_owned()), true, true)]
    fn configured_database_url_is_passed_through(
        #[case] url: Option<String>,
        #[case] allow_in_memory: bool,
        #[case] debug_build: bool,
    ) {
        let resolved = resolve_database_url(url.clone(), allow_in_memory, debug_build)
            .expect("configured url always resolves");
        assert_eq!(resolved, url);
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)]
    #[case(true, true)]
    fn missing_database_url_is_tolerated_only_when_permitted(
        #[case] allow_in_memory: bool,
        #[case] debug_build: bool,
    ) {
        let resolved = resolve_database_url(None, allow_in_memory, debug_build)
            .expect("in-memory fallback is permitted here");
        assert_eq!(resolved, None);
    }

    #[test]
    fn release_startup_without_database_url_is_a_hard_error() {
        let err = resolve_database_url(None, false, false)
            .expect_err("release builds must not fall back to process memory");
        assert!(err.to_string().contains("DATABASE_URL must be set"));
    }
}
