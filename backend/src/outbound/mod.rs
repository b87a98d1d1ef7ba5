//! Driven adapters: persistence and password hashing.

pub mod password;
pub mod persistence;
