//! Password primitives: caller-supplied plaintext and its stored hash.
//!
//! Plaintext never outlives the request that carried it: [`Password`] zeroes
//! its buffer on drop. Only the salted Argon2id PHC string in
//! [`PasswordHash`] is ever persisted.

use std::fmt;
use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcString, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Validation errors raised for password input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    /// Password was empty.
    EmptyPassword,
    /// The stored hash is not a valid PHC string.
    MalformedHash,
    /// The hashing backend rejected the input.
    HashingFailed {
        /// Backend error text.
        message: String,
    },
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::MalformedHash => write!(f, "stored password hash is malformed"),
            Self::HashingFailed { message } => write!(f, "password hashing failed: {message}"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// Plaintext password supplied by a caller.
///
/// Whitespace is preserved so that credential comparisons are never
/// surprising.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and wrap a plaintext password.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.is_empty() {
            return Err(PasswordValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the plaintext.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Salted one-way hash of a password, stored as an Argon2id PHC string.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a freshly generated salt.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::{Password, PasswordHash};
    ///
    /// let password = Password::new("password").unwrap();
    /// let hash = PasswordHash::generate(&password).unwrap();
    /// assert!(hash.verify("password"));
    /// assert!(!hash.as_ref().contains("password"));
    /// ```
    pub fn generate(password: &Password) -> Result<Self, PasswordValidationError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordValidationError::HashingFailed {
                message: err.to_string(),
            })?;
        Ok(Self(phc.to_string()))
    }

    /// Rehydrate a hash read back from storage.
    pub fn from_stored(phc: impl Into<String>) -> Result<Self, PasswordValidationError> {
        let phc = phc.into();
        PhcString::new(&phc).map_err(|_| PasswordValidationError::MalformedHash)?;
        Ok(Self(phc))
    }

    /// Check `candidate` against this hash. Malformed hashes never verify.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PhcString::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(**redacted**)")
    }
}

/// Hash verified in place of a missing account's stored hash.
static DECOY_HASH: LazyLock<Option<PasswordHash>> = LazyLock::new(|| {
    Password::new("decoy-credential")
        .and_then(|password| PasswordHash::generate(&password))
        .ok()
});

/// [`CredentialHasher`] running Argon2id on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    async fn run_blocking<T, F>(job: F) -> Result<T, CredentialHasherError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        task::spawn_blocking(job)
            .await
            .map_err(|err| CredentialHasherError::worker(err.to_string()))
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, CredentialHasherError> {
        Self::run_blocking(move || PasswordHash::generate(&password))
            .await?
            .map_err(|err| CredentialHasherError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        stored: Option<PasswordHash>,
        candidate: Password,
    ) -> Result<bool, CredentialHasherError> {
        Self::run_blocking(move || match stored {
            Some(hash) => hash.verify(candidate.expose()),
            None => {
                if let Some(decoy) = DECOY_HASH.as_ref() {
                    decoy.verify(candidate.expose());
                }
                false
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hash() -> PasswordHash {
        let password = Password::new("correct horse").expect("valid password");
        PasswordHash::generate(&password).expect("hashing succeeds")
    }

    #[rstest]
    fn empty_password_is_rejected() {
        assert_eq!(
            Password::new("").expect_err("empty must fail"),
            PasswordValidationError::EmptyPassword
        );
    }

    #[rstest]
    fn hash_verifies_original_plaintext_only(hash: PasswordHash) {
        assert!(hash.verify("correct horse"));
        assert!(!hash.verify("correct horse "));
        assert!(!hash.verify("wrong"));
    }

    #[rstest]
    fn hash_is_argon2id_phc_without_plaintext(hash: PasswordHash) {
        assert!(hash.as_ref().starts_with("$argon2id$"));
        assert!(!hash.as_ref().contains("correct horse"));
    }

    #[rstest]
    fn same_password_hashes_with_distinct_salts(hash: PasswordHash) {
        let password = Password::new("correct horse").expect("valid password");
        let second = PasswordHash::generate(&password).expect("hashing succeeds");
        assert_ne!(hash, second);
    }

    #[rstest]
    fn stored_hash_round_trips(hash: PasswordHash) {
        let restored = PasswordHash::from_stored(hash.as_ref()).expect("valid PHC string");
        assert!(restored.verify("correct horse"));
    }

    #[rstest]
    #[case("")]
    #[case("plaintext")]
    fn malformed_stored_hash_is_rejected(#[case] raw: &str) {
        assert_eq!(
            PasswordHash::from_stored(raw).expect_err("malformed hash"),
            PasswordValidationError::MalformedHash
        );
    }

    #[rstest]
    #[tokio::test]
    async fn argon2_hasher_round_trips_off_the_executor() {
        let hasher = Argon2CredentialHasher;
        let password = Password::new("correct horse").expect("valid password");
        let hash = hasher.hash(password.clone()).await.expect("hashing succeeds");

        assert!(hash.as_ref().starts_with("$argon2id$"));
        assert!(
            hasher
                .verify(Some(hash.clone()), password)
                .await
                .expect("verify runs")
        );
        let wrong = Password::new("wrong").expect("valid password");
        assert!(!hasher.verify(Some(hash), wrong).await.expect("verify runs"));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_hash_is_checked_against_decoy_and_rejected() {
        let hasher = Argon2CredentialHasher;
        let candidate = Password::new("decoy-credential").expect("valid password");

        assert!(DECOY_HASH.is_some());
        assert!(!hasher.verify(None, candidate).await.expect("verify runs"));
    }

    #[rstest]
    fn debug_output_is_redacted(hash: PasswordHash) {
        let password = Password::new("secret").expect("valid password");
        assert!(!format!("{password:?}").contains("secret"));
        assert!(!format!("{hash:?}").contains("argon2"));
    }
}
