//! Tag API handlers.
//!
//! ```text
//! GET /api/v1/tags
//! POST /api/v1/tags {"name":"Vegan"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::Tag;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/tags`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateTagRequest {
    #[schema(example = "Vegan")]
    pub name: String,
}

/// Tag representation returned by the tag endpoints.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Vegan")]
    pub name: String,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().as_i64(),
            name: tag.to_string(),
        }
    }
}

/// List the caller's tags ordered by name, descending.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "Tags owned by the caller", body = [TagResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let owner = session.require_active_user(state.profile.as_ref()).await?.id();
    let tags = state.tags_query.list_tags(owner).await?;
    let body: Vec<TagResponse> = tags.iter().map(TagResponse::from).collect();
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(body))
}

/// Create a tag owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTagRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_active_user(state.profile.as_ref()).await?.id();
    let tag = state.tags.create_tag(owner, &payload.name).await?;
    Ok(HttpResponse::Created().json(TagResponse::from(&tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{
        in_memory_state, login_cookie, seed_user, test_session_middleware,
    };
    use crate::inbound::http::users::login;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

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
                    .service(list_tags)
                    .service(create_tag),
            )
    }

    #[actix_web::test]
    async fn list_requires_authentication() {
        let (state, _) = in_memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/tags").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tags_are_listed_by_name_descending_and_scoped_to_owner() {
        let (state, store) = in_memory_state();
        seed_user(&store, "cook@example.com", "password").await;
        let other = seed_user(&store, "other@example.com", "password").await;
        state
            .tags
            .create_tag(other.id(), "Fruity")
            .await
            .expect("foreign tag");
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = login_cookie(&app, "cook@example.com", "password").await;

        for name in ["Dessert", "Vegan", "  Breakfast "] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/tags")
                    .cookie(cookie.clone())
                    .set_json(json!({ "name": name }))
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/tags")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        let names: Vec<&str> = value
            .as_array()
            .expect("array body")
            .iter()
            .filter_map(|tag| tag["name"].as_str())
            .collect();
        assert_eq!(names, ["Vegan", "Dessert", "Breakfast"]);
    }

    #[rstest]
    #[case("", "empty_name")]
    #[case("   ", "empty_name")]
    #[actix_web::test]
    async fn blank_names_are_rejected(#[case] name: &str, #[case] code: &str) {
        let (state, store) = in_memory_state();
        seed_user(&store, "cook@example.com", "password").await;
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = login_cookie(&app, "cook@example.com", "password").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/tags")
                .cookie(cookie)
                .set_json(json!({ "name": name }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"], json!({ "field": "name", "code": code }));
    }
}
