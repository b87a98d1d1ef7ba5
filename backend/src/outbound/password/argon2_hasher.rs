//! Argon2id adapter for the `PasswordHasher` port.
//!
//! Hashing and verification are CPU-bound, so both run on Tokio's blocking
//! pool; request tasks only await the result. Output is a self-describing
//! PHC string, so verification reads the algorithm, parameters, and salt from
//! the stored value and needs no side storage.

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use password_hash::{PasswordHash as PhcHash, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id password hasher with configurable cost parameters.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Create a hasher with the crate defaults (interactive-login latency).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// `m_cost` is in KiB; `t_cost` is the iteration count; `p_cost` the
    /// parallelism degree. Tests use a reduced `m_cost` to keep suites fast.
    pub fn with_params(
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
    ) -> Result<Self, PasswordHasherError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn hash_blocking(argon2: &Argon2<'static>, plaintext: &str) -> Result<String, PasswordHasherError> {
    let mut salt_bytes = [0_u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;

    argon2::PasswordHasher::hash_password(argon2, plaintext.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|err| PasswordHasherError::hash(err.to_string()))
}

fn verify_blocking(plaintext: &str, encoded: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcHash::new(encoded).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;

    // Parameters come from the PHC string, so a default instance suffices.
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHasherError> {
        let argon2 = self.argon2();
        let plaintext = Zeroizing::new(plaintext.to_owned());

        let encoded = tokio::task::spawn_blocking(move || hash_blocking(&argon2, &plaintext))
            .await
            .map_err(|err| PasswordHasherError::hash(format!("hashing task failed: {err}")))??;

        PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        plaintext: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let encoded = hash.as_str().to_owned();

        tokio::task::spawn_blocking(move || verify_blocking(&plaintext, &encoded))
            .await
            .map_err(|err| PasswordHasherError::hash(format!("verify task failed: {err}")))?
    }
}
