//! Port abstraction for one-way password hashing adapters.

use async_trait::async_trait;
use tracing::error;

use crate::domain::{Error, PasswordHash};

/// Failures raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHasherError {
    /// Hash computation failed (parameter or salt generation fault).
    #[error("password hashing failed: {message}")]
    Hash { message: String },

    /// The stored hash could not be parsed. This is a data-integrity fault:
    /// the stored credential is corrupted, not merely mismatched.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash { message: String },
}

impl PasswordHasherError {
    /// Create a hash-computation error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Create a malformed-hash error with the given message.
    pub fn malformed_hash(message: impl Into<String>) -> Self {
        Self::MalformedHash {
            message: message.into(),
        }
    }
}

impl From<PasswordHasherError> for Error {
    /// Map hasher failures to domain errors.
    ///
    /// Both variants are fatal to the request; full detail is logged here and
    /// the client sees a generic internal error.
    fn from(value: PasswordHasherError) -> Self {
        match value {
            PasswordHasherError::Hash { message } => {
                error!(detail = %message, "password hashing failed");
                Error::internal("password hashing failed")
            }
            PasswordHasherError::MalformedHash { message } => {
                error!(detail = %message, "stored password hash is malformed");
                Error::internal("stored credential is corrupted")
            }
        }
    }
}

/// Driven port wrapping a salted, computationally expensive one-way hash.
///
/// Both operations are async so adapters can offload the CPU-bound work to a
/// blocking pool; request tasks must never stall behind a hash computation.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string with a
    /// fresh random salt.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Verify a plaintext candidate against a stored hash.
    ///
    /// A mismatch yields `Ok(false)`, never an error; only a malformed stored
    /// hash fails.
    async fn verify(
        &self,
        plaintext: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn hasher_errors_map_to_redactable_internal_errors() {
        let hash_err: Error = PasswordHasherError::hash("salt generation failed").into();
        assert_eq!(hash_err.code(), ErrorCode::InternalError);

        let malformed: Error = PasswordHasherError::malformed_hash("bad PHC prefix").into();
        assert_eq!(malformed.code(), ErrorCode::InternalError);
        assert_eq!(malformed.message(), "stored credential is corrupted");
    }
}
