//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, PasswordHash, User, UserFlags, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, email: &EmailAddress) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation => UserPersistenceError::duplicate(email.as_ref()),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation => UserPersistenceError::query("unexpected unique violation"),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        warn!(user_id = row.id, "stored email failed validation");
        UserPersistenceError::query(format!("invalid stored email: {err}"))
    })?;
    let password_hash = PasswordHash::from_stored(row.password_hash).map_err(|err| {
        warn!(user_id = row.id, "stored password hash failed validation");
        UserPersistenceError::query(format!("invalid stored password hash: {err}"))
    })?;
    let flags = UserFlags {
        is_active: row.is_active,
        is_staff: row.is_staff,
        is_superuser: row.is_superuser,
    };
    Ok(User::new(UserId::new(row.id), email, password_hash, flags))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let flags = user.flags();
        let row = NewUserRow {
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_ref(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
        };

        let id: i64 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, user.email()))?;

        Ok(user.clone().into_user(UserId::new(id)))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_i64()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.
    use super::*;
    use crate::domain::Password;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn hash() -> String {
        let password = Password::new("password").expect("password");
        PasswordHash::generate(&password)
            .expect("hash")
            .as_ref()
            .to_owned()
    }

    #[rstest]
    fn rows_convert_to_users() {
        let row = UserRow {
            id: 3,
            email: "ada@example.com".to_owned(),
            password_hash: hash(),
            is_active: true,
            is_staff: true,
            is_superuser: false,
        };
        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.id(), UserId::new(3));
        assert!(user.is_staff());
        assert!(!user.is_superuser());
        assert!(user.check_password("password"));
    }

    #[rstest]
    fn corrupt_hash_is_a_query_error() {
        let row = UserRow {
            id: 3,
            email: "ada@example.com".to_owned(),
            password_hash: "not-a-phc-string".to_owned(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        };
        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate() {
        let email = EmailAddress::new("ada@example.com").expect("email");
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("users_email_key")),
        );
        assert_eq!(
            map_diesel_error(err, &email),
            UserPersistenceError::duplicate("ada@example.com")
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }
}
