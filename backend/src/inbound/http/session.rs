//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps Actix sessions so handlers only deal with domain-friendly operations
//! such as persisting, reading or forgetting the authenticated user id.
//! Protected handlers go through [`SessionContext::require_active_user`], which
//! re-reads the account on every request.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::UserProfileQuery;
use crate::domain::{Error, ErrorCode, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// The session is renewed first so a pre-login cookie is never reused.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_i64())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A value that does not decode as an id is treated as no session.
    pub fn user_id(&self) -> Option<UserId> {
        match self.0.get::<i64>(USER_ID_KEY) {
            Ok(id) => id.map(UserId::new),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                None
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized("authentication credentials were not provided"))
    }

    /// Resolve the session to an account that still exists and is active.
    ///
    /// A session whose account was deleted or deactivated is cleared and
    /// answered with `401 Unauthorized`.
    pub async fn require_active_user(&self, profile: &dyn UserProfileQuery) -> Result<User, Error> {
        let user_id = self.require_user_id()?;
        match profile.fetch_profile(&user_id).await {
            Ok(user) if user.is_active() => Ok(user),
            Ok(_) => Err(self.revoke(user_id, "inactive account")),
            Err(err) if err.code() == ErrorCode::NotFound => {
                Err(self.revoke(user_id, "account no longer exists"))
            }
            Err(err) => Err(err),
        }
    }

    fn revoke(&self, user_id: UserId, reason: &'static str) -> Error {
        tracing::info!(user_id = %user_id, reason, "session revoked");
        self.clear();
        Error::unauthorized("session is no longer valid")
    }

    /// Drop all session state and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
