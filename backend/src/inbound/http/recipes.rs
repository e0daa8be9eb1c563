//! Recipe API handlers.
//!
//! ```text
//! GET /api/v1/recipes
//! POST /api/v1/recipes {"title":"Soup","timeMinutes":10,"price":"5.50","tags":[1]}
//! GET /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Every route requires a session and only ever exposes the caller's recipes.

use actix_web::{HttpResponse, delete, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Recipe, RecipeFields, RecipeId, TagId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/recipes`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    #[schema(example = "Sample recipe")]
    pub title: String,
    #[schema(example = 22)]
    pub time_minutes: u32,
    /// Price with at most two decimal places.
    #[schema(value_type = String, example = "5.25")]
    pub price: Decimal,
    #[serde(default)]
    #[schema(example = "https://example.com/recipe.pdf")]
    pub link: String,
    /// Ids of tags owned by the caller.
    #[serde(default)]
    pub tags: Vec<i64>,
}

impl From<CreateRecipeRequest> for RecipeFields {
    fn from(value: CreateRecipeRequest) -> Self {
        Self {
            title: value.title,
            time_minutes: value.time_minutes,
            price: value.price,
            link: value.link,
            tags: value.tags.into_iter().map(TagId::new).collect(),
        }
    }
}

/// Recipe representation returned by the recipe endpoints.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Sample recipe")]
    pub title: String,
    #[schema(example = 22)]
    pub time_minutes: u32,
    #[schema(value_type = String, example = "5.25")]
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<i64>,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id().as_i64(),
            title: recipe.title().as_ref().to_owned(),
            time_minutes: recipe.time_minutes(),
            price: recipe.price().amount(),
            link: recipe.link().as_ref().to_owned(),
            tags: recipe.tags().iter().map(|tag| tag.as_i64()).collect(),
        }
    }
}

/// List the caller's recipes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "Recipes owned by the caller", body = [RecipeResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let owner = session.require_active_user(state.profile.as_ref()).await?.id();
    let recipes = state.recipes_query.list_recipes(owner).await?;
    let body: Vec<RecipeResponse> = recipes.iter().map(RecipeResponse::from).collect();
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(body))
}

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_active_user(state.profile.as_ref()).await?.id();
    let recipe = state
        .recipes
        .create_recipe(owner, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(&recipe)))
}

/// Fetch one of the caller's recipes.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such recipe for the caller", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_active_user(state.profile.as_ref()).await?.id();
    let recipe = state
        .recipes_query
        .get_recipe(owner, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(RecipeResponse::from(&recipe)))
}

/// Delete one of the caller's recipes.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such recipe for the caller", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_active_user(state.profile.as_ref()).await?.id();
    state
        .recipes
        .delete_recipe(owner, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
