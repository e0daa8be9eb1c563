//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;

use crate::domain::{AccountService, User};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state backed by a fresh in-memory store.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::from_repositories(store.clone(), store.clone(), store.clone());
    (state, store)
}

/// Create a regular account directly in `store`.
pub async fn seed_user(store: &Arc<InMemoryStore>, email: &str, password: &str) -> User {
    AccountService::new(store.clone())
        .create_user(Some(email), password)
        .await
        .expect("seed user")
}

/// Log in through `POST /api/v1/login` and return the session cookie.
pub async fn login_cookie<S>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(serde_json::json!({ "email": email, "password": password }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}
