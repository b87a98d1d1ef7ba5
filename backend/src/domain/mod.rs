//! Domain primitives, ports, and services for account authentication.
//!
//! Purpose: define strongly typed entities and the hexagonal boundary used by
//! the HTTP adapter and the persistence/hashing adapters. Types are immutable
//! and document their invariants and serde contracts in their own Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `User`, `UserId`, `DisplayName`, `EmailAddress`, `PasswordHash` — the
//!   persisted account aggregate and its validated field types.
//! - `LoginCredentials`, `Registration`, `AuthOutcome` — login and
//!   registration inputs and the per-attempt authentication outcome.
//! - `ports` — traits crossed by inbound and outbound adapters.

pub mod auth;
pub mod authentication;
pub mod error;
pub mod ports;
pub mod registration;
pub mod session_identity;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthOutcome, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
    RejectionReason,
};
pub use self::authentication::PasswordAuthenticationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::registration::RegistrationServiceImpl;
pub use self::session_identity::StoreIdentityResolver;
pub use self::trace_id::{TraceId, TRACE_ID_HEADER};
pub use self::user::{
    DisplayName, EmailAddress, NewUser, PasswordHash, User, UserId, UserValidationError,
};
