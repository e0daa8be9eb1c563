//! User account model.

#![deny(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PasswordHash;

/// Maximum stored length of an email address.
pub const EMAIL_MAX: usize = 255;

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Email was absent or blank once trimmed.
    EmptyEmail,
    /// Normalised email exceeded the stored length.
    EmailTooLong {
        /// Maximum length in characters.
        max: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "users must have an email address"),
            Self::EmailTooLong { max } => {
                write!(f, "email address must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised email address used as the login identity.
///
/// ## Invariants
/// - Leading/trailing whitespace is removed.
/// - The whole address is lower-cased, which makes uniqueness
///   case-insensitive.
/// - Never empty and at most [`EMAIL_MAX`] characters after lower-casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("test@EXAMPLE.COM").unwrap();
    /// assert_eq!(email.as_ref(), "test@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::parse(Some(raw.as_ref()))
    }

    /// Like [`EmailAddress::new`] but treats an absent value as empty.
    pub fn parse(raw: Option<&str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let lowered = trimmed.to_lowercase();
        if lowered.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(Self(lowered))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Permission flags carried by every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFlags {
    /// Inactive accounts cannot log in or use a session.
    pub is_active: bool,
    /// Staff may use administrative tooling.
    pub is_staff: bool,
    /// Superusers hold every permission.
    pub is_superuser: bool,
}

impl UserFlags {
    /// Active account without administrative rights.
    pub const fn regular() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Active account with staff and superuser rights.
    pub const fn superuser() -> Self {
        Self {
            is_active: true,
            is_staff: true,
            is_superuser: true,
        }
    }
}

/// Account data ready to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: EmailAddress,
    password_hash: PasswordHash,
    flags: UserFlags,
}

impl NewUser {
    /// Bundle validated account fields.
    pub fn new(email: EmailAddress, password_hash: PasswordHash, flags: UserFlags) -> Self {
        Self {
            email,
            password_hash,
            flags,
        }
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Hash to persist alongside the account.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Permission flags for the new account.
    pub fn flags(&self) -> UserFlags {
        self.flags
    }

    /// Attach the store-assigned identifier.
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.email, self.password_hash, self.flags)
    }
}

/// Application user.
///
/// The password hash is deliberately not serialisable; inbound adapters
/// expose users through their own response DTOs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    password_hash: PasswordHash,
    flags: UserFlags,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        email: EmailAddress,
        password_hash: PasswordHash,
        flags: UserFlags,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            flags,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored Argon2id hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Whether the account may log in.
    pub fn is_active(&self) -> bool {
        self.flags.is_active
    }

    /// Whether the account has staff rights.
    pub fn is_staff(&self) -> bool {
        self.flags.is_staff
    }

    /// Whether the account has every permission.
    pub fn is_superuser(&self) -> bool {
        self.flags.is_superuser
    }

    /// Verify a plaintext candidate against the stored hash.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password_hash.verify(candidate)
    }
}

#[cfg(test)]
mod tests;
