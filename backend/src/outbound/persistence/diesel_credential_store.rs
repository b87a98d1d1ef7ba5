//! PostgreSQL-backed `CredentialStore` implementation using Diesel.
//!
//! Three parameterised queries against the `users` table: lookup by email,
//! lookup by id, and insert. A unique-constraint violation on insert is
//! mapped to the store's duplicate-email error so the domain can surface it
//! as a user-correctable conflict rather than a generic failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{EmailAddress, NewUser, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `CredentialStore` port.
#[derive(Clone)]
pub struct DieselCredentialStore {
    pool: DbPool,
}

impl DieselCredentialStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to credential store errors.
fn map_pool_error(error: PoolError) -> CredentialStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CredentialStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to credential store errors.
///
/// `email` is the address being inserted, used to tag the duplicate-email
/// variant; lookups pass `None` since they cannot violate the constraint.
fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> CredentialStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => match email {
            Some(email) => CredentialStoreError::duplicate_email(email),
            None => CredentialStoreError::query("unexpected unique violation"),
        },
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CredentialStoreError::connection("database connection error")
        }
        _ => CredentialStoreError::query("database error"),
    }
}

/// Convert a database row to a domain user.
///
/// Rows were validated on the way in, so a validation failure here indicates
/// a corrupted record and surfaces as a query error.
fn row_to_user(row: UserRow) -> Result<User, CredentialStoreError> {
    User::try_from_strings(
        &row.id.to_string(),
        &row.name,
        &row.email,
        &row.password_hash,
    )
    .map_err(|err| {
        tracing::warn!(user_id = %row.id, error = %err, "stored user record failed validation");
        CredentialStoreError::query("stored user record failed validation")
    })
}

#[async_trait]
impl CredentialStore for DieselCredentialStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = Uuid::new_v4();
        let row = NewUserRow {
            id,
            name: new_user.name().as_ref(),
            email: new_user.email().as_ref(),
            password_hash: new_user.password_hash().as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(new_user.email().as_ref())))?;

        Ok(new_user.clone().into_user(UserId::from_uuid(id)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping; query behaviour is exercised by
    //! integration suites against a live database.
    use super::*;

    fn unique_violation() -> diesel::result::Error {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        )
    }

    #[test]
    fn unique_violation_on_insert_maps_to_duplicate_email() {
        let err = map_diesel_error(unique_violation(), Some("alice@x.com"));
        assert_eq!(err, CredentialStoreError::duplicate_email("alice@x.com"));
    }

    #[test]
    fn unique_violation_without_email_context_is_a_query_error() {
        let err = map_diesel_error(unique_violation(), None);
        assert!(matches!(err, CredentialStoreError::Query { .. }));
    }

    #[test]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, CredentialStoreError::Connection { .. }));
    }

    #[test]
    fn corrupted_rows_fail_validation_as_query_errors() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Alice".to_owned(),
            email: "alice@x.com".to_owned(),
            password_hash: "not-a-phc-string".to_owned(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let err = row_to_user(row).expect_err("corrupted hash must fail validation");
        assert!(matches!(err, CredentialStoreError::Query { .. }));
    }
}
