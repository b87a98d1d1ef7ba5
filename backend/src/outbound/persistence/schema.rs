//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand to match.

diesel::table! {
    /// User accounts table.
    ///
    /// One row per registered user; `email` carries a unique index on the
    /// normalised (lowercased) form, making it the login key.
    users (id) {
        /// Primary key: UUID v4 identifier assigned at insertion.
        id -> Uuid,
        /// Human-readable display name (max 32 characters).
        name -> Varchar,
        /// Normalised login email, unique across the table.
        email -> Varchar,
        /// PHC-encoded one-way password hash; never the plaintext.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
