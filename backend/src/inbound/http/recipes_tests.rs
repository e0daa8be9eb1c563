//! Tests for the recipe handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockRecipesCommand, MockRecipesQuery, MockTagsCommand, MockTagsQuery, MockUserProfileQuery,
};
use crate::domain::{AccountService, Error, User, UserFlags, UserId};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{
    in_memory_state, login_cookie, seed_user, test_session_middleware,
};
use crate::inbound::http::users::login;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(list_recipes)
                .service(create_recipe)
                .service(get_recipe)
                .service(delete_recipe),
        )
}

fn sample_recipe() -> Value {
    json!({ "title": "Sample recipe", "timeMinutes": 22, "price": "5.25" })
}

#[rstest]
#[case("/api/v1/recipes")]
#[case("/api/v1/recipes/1")]
#[actix_web::test]
async fn reads_require_authentication(#[case] uri: &str) {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "unauthorized");
    assert!(value.get("title").is_none());
}

#[actix_web::test]
async fn unauthenticated_requests_never_reach_the_ports() {
    let mut command = MockRecipesCommand::new();
    command.expect_create_recipe().never();
    command.expect_delete_recipe().never();
    let mut query = MockRecipesQuery::new();
    query.expect_list_recipes().never();
    let store = Arc::new(crate::outbound::memory::InMemoryStore::new());
    let accounts = Arc::new(AccountService::new(store));
    let state = HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        profile: accounts,
        recipes: Arc::new(command),
        recipes_query: Arc::new(query),
        tags: Arc::new(MockTagsCommand::new()),
        tags_query: Arc::new(MockTagsQuery::new()),
    });
    let app = actix_test::init_service(test_app(state)).await;

    for request in [
        actix_test::TestRequest::get().uri("/api/v1/recipes").to_request(),
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .set_json(sample_recipe())
            .to_request(),
        actix_test::TestRequest::delete()
            .uri("/api/v1/recipes/3")
            .to_request(),
    ] {
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn create_then_list_returns_owned_recipe() {
    let (state, store) = in_memory_state();
    let user = seed_user(&store, "cook@example.com", "password").await;
    let tag = state
        .tags
        .create_tag(user.id(), "Vegan")
        .await
        .expect("tag created");
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "cook@example.com", "password").await;

    let mut body = sample_recipe();
    body["tags"] = json!([tag.id().as_i64(), tag.id().as_i64()]);
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(created).await;
    assert_eq!(created["price"], "5.25");
    assert_eq!(created["link"], "");
    assert_eq!(created["tags"], json!([tag.id().as_i64()]));

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: Value = actix_test::read_body_json(listed).await;
    assert_eq!(listed, json!([created]));
}

#[rstest]
#[case(json!({ "title": "", "timeMinutes": 5, "price": "1.00" }), "title")]
#[case(json!({ "title": "Soup", "timeMinutes": 5, "price": "-1.00" }), "price")]
#[case(json!({ "title": "Soup", "timeMinutes": 5, "price": "1.005" }), "price")]
#[case(json!({ "title": "Soup", "timeMinutes": 5, "price": "1.00", "tags": [999] }), "tags")]
#[actix_web::test]
async fn invalid_recipes_are_rejected(#[case] body: Value, #[case] field: &str) {
    let (state, store) = in_memory_state();
    seed_user(&store, "cook@example.com", "password").await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "cook@example.com", "password").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["field"], field);
}

#[actix_web::test]
async fn foreign_recipes_are_not_found() {
    let (state, store) = in_memory_state();
    let owner = seed_user(&store, "owner@example.com", "password").await;
    seed_user(&store, "other@example.com", "password").await;
    let recipe = state
        .recipes
        .create_recipe(
            owner.id(),
            RecipeFields {
                title: "Private".into(),
                time_minutes: 5,
                price: Decimal::new(100, 2),
                link: String::new(),
                tags: Vec::new(),
            },
        )
        .await
        .expect("recipe created");
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "other@example.com", "password").await;
    let uri = format!("/api/v1/recipes/{}", recipe.id());

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_removes_recipe() {
    let (state, store) = in_memory_state();
    let owner = seed_user(&store, "owner@example.com", "password").await;
    let recipe = state
        .recipes
        .create_recipe(
            owner.id(),
            RecipeFields {
                title: "Short-lived".into(),
                time_minutes: 1,
                price: Decimal::new(5, 0),
                link: String::new(),
                tags: Vec::new(),
            },
        )
        .await
        .expect("recipe created");
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "owner@example.com", "password").await;
    let uri = format!("/api/v1/recipes/{}", recipe.id());

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn port_failures_surface_as_service_unavailable() {
    let mut query = MockRecipesQuery::new();
    query
        .expect_list_recipes()
        .withf(|owner| *owner == UserId::new(1))
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("recipe repository unavailable")));
    let (base, store) = in_memory_state();
    seed_user(&store, "cook@example.com", "password").await;
    let state = HttpState {
        recipes_query: Arc::new(query),
        ..base
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "cook@example.com", "password").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

enum AccountChange {
    Deactivated,
    Deleted,
}

#[rstest]
#[case(AccountChange::Deactivated)]
#[case(AccountChange::Deleted)]
#[actix_web::test]
async fn sessions_of_revoked_accounts_are_rejected(#[case] change: AccountChange) {
    let (base, store) = in_memory_state();
    let user = seed_user(&store, "cook@example.com", "password").await;
    let user_id = user.id();
    let mut profile = MockUserProfileQuery::new();
    profile
        .expect_fetch_profile()
        .withf(move |id| *id == user_id)
        .times(1)
        .return_once(move |_| match change {
            AccountChange::Deactivated => Ok(User::new(
                user.id(),
                user.email().clone(),
                user.password_hash().clone(),
                UserFlags {
                    is_active: false,
                    ..UserFlags::regular()
                },
            )),
            AccountChange::Deleted => Err(Error::not_found("user not found")),
        });
    let mut query = MockRecipesQuery::new();
    query.expect_list_recipes().never();
    let state = HttpState {
        profile: Arc::new(profile),
        recipes_query: Arc::new(query),
        ..base
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "cook@example.com", "password").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let removal = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie");
    assert!(removal.value().is_empty());
}
