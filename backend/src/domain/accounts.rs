//! Account domain services.
//!
//! [`AccountService`] creates accounts for administrative tooling and
//! implements the login and profile driving ports over a [`UserRepository`].
//! Hashing goes through a [`CredentialHasher`], which defaults to
//! [`Argon2CredentialHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, LoginService, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{
    Argon2CredentialHasher, EmailAddress, Error, LoginCredentials, NewUser, Password,
    PasswordValidationError, User, UserFlags, UserId, UserValidationError, field_error,
};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { email } => {
            Error::conflict(format!("a user with email {email} already exists")).with_details(
                serde_json::json!({ "field": "email", "code": "duplicate_email" }),
            )
        }
    }
}

fn map_email_error(error: UserValidationError) -> Error {
    let code = match error {
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::EmailTooLong { .. } => "email_too_long",
    };
    field_error("email", code, error.to_string())
}

fn map_password_error(error: PasswordValidationError) -> Error {
    match error {
        PasswordValidationError::EmptyPassword => {
            field_error("password", "empty_password", error.to_string())
        }
        other => Error::internal(format!("password hashing failed: {other}")),
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Account service implementing account creation, login and profile reads.
#[derive(Clone)]
pub struct AccountService<R, H = Argon2CredentialHasher> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R> AccountService<R> {
    /// Create a new service over the user repository, hashing with Argon2id.
    pub fn new(users: Arc<R>) -> Self {
        Self::with_hasher(users, Arc::new(Argon2CredentialHasher))
    }
}

impl<R, H> AccountService<R, H> {
    /// Create a service with an explicit password hasher.
    pub fn with_hasher(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> AccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    /// Create a regular account.
    ///
    /// The email is trimmed and lower-cased before storage. An absent or
    /// blank email fails with `invalid_request`; an email already in use
    /// fails with `conflict`.
    pub async fn create_user(&self, email: Option<&str>, password: &str) -> Result<User, Error> {
        self.create(email, password, UserFlags::regular()).await
    }

    /// Create an account with staff and superuser rights.
    pub async fn create_superuser(
        &self,
        email: Option<&str>,
        password: &str,
    ) -> Result<User, Error> {
        self.create(email, password, UserFlags::superuser()).await
    }

    async fn create(
        &self,
        email: Option<&str>,
        password: &str,
        flags: UserFlags,
    ) -> Result<User, Error> {
        let email = EmailAddress::parse(email).map_err(map_email_error)?;
        let password = Password::new(password).map_err(map_password_error)?;
        let hash = self
            .hasher
            .hash(password)
            .await
            .map_err(map_hasher_error)?;

        let user = self
            .users
            .insert(&NewUser::new(email, hash, flags))
            .await
            .map_err(map_repository_error)?;
        info!(
            user_id = %user.id(),
            is_superuser = user.is_superuser(),
            "user account created"
        );
        Ok(user)
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let found = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?;
        let matches = self
            .hasher
            .verify(
                found.as_ref().map(|user| user.password_hash().clone()),
                credentials.secret().clone(),
            )
            .await
            .map_err(map_hasher_error)?;

        let Some(user) = found else {
            debug!("login rejected: unknown email");
            return Err(invalid_credentials());
        };
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(invalid_credentials());
        }
        if !user.is_active() {
            debug!(user_id = %user.id(), "login rejected: inactive account");
            return Err(invalid_credentials());
        }
        Ok(user.id())
    }
}

#[async_trait]
impl<R, H> UserProfileQuery for AccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(*user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
