//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Tag, Recipe: owned records and their validated fields.
//! - AccountService, RecipeService, TagService: use-cases behind the
//!   driving ports in [`ports`].

pub mod accounts;
pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod readiness;
pub mod recipe;
pub mod recipes;
pub mod tag;
pub mod tags;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::password::{
    Argon2CredentialHasher, Password, PasswordHash, PasswordValidationError,
};
pub use self::readiness::{RetryPolicy, wait_for_database};
pub use self::recipe::{
    NewRecipe, Price, Recipe, RecipeFields, RecipeId, RecipeLink, RecipeTitle,
    RecipeValidationError,
};
pub use self::recipes::RecipeService;
pub use self::tag::{NewTag, Tag, TagId, TagName, TagValidationError};
pub use self::tags::TagService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, NewUser, User, UserFlags, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

/// Build an `invalid_request` error carrying `{"field", "code"}` details.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(serde_json::json!({
        "field": field,
        "code": code,
    }))
}
