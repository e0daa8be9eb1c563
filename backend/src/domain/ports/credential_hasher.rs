//! Port for the CPU-heavy password hashing used by account services.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Password, PasswordHash};

define_port_error! {
    /// Errors raised while hashing or verifying a password.
    pub enum CredentialHasherError {
        /// The hashing backend rejected the input.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The worker running the hash did not complete.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Hashes new passwords and verifies login attempts.
///
/// Implementations keep the hashing work off the async executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted hash of `password` for storage.
    async fn hash(&self, password: Password) -> Result<PasswordHash, CredentialHasherError>;

    /// Check `candidate` against `stored`.
    ///
    /// When `stored` is `None` the candidate is still run through the hasher
    /// against a decoy hash and the result is always `false`, so unknown
    /// accounts cost the same as wrong passwords.
    async fn verify(
        &self,
        stored: Option<PasswordHash>,
        candidate: Password,
    ) -> Result<bool, CredentialHasherError>;
}
