//! Recipe domain service.
//!
//! Every operation takes the caller's [`UserId`] and passes it down to the
//! repositories, so another owner's recipes are indistinguishable from
//! missing ones.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    RecipePersistenceError, RecipeRepository, RecipesCommand, RecipesQuery, TagRepository,
};
use crate::domain::tags::map_tag_repository_error;
use crate::domain::{
    Error, NewRecipe, Recipe, RecipeFields, RecipeId, RecipeValidationError, UserId, field_error,
};

fn map_repository_error(error: RecipePersistenceError) -> Error {
    match error {
        RecipePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipePersistenceError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

fn map_validation_error(error: RecipeValidationError) -> Error {
    field_error(error.field(), error.code(), error.to_string())
}

fn recipe_not_found(id: RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

/// Recipe service implementing the recipe driving ports.
#[derive(Clone)]
pub struct RecipeService<R, T> {
    recipes: Arc<R>,
    tags: Arc<T>,
}

impl<R, T> RecipeService<R, T> {
    /// Create a new service over the recipe and tag repositories.
    pub fn new(recipes: Arc<R>, tags: Arc<T>) -> Self {
        Self { recipes, tags }
    }
}

impl<R, T> RecipeService<R, T>
where
    T: TagRepository,
{
    async fn ensure_tags_owned(&self, recipe: &NewRecipe) -> Result<(), Error> {
        if recipe.tags().is_empty() {
            return Ok(());
        }
        let owned = self
            .tags
            .find_by_ids(recipe.owner(), recipe.tags())
            .await
            .map_err(map_tag_repository_error)?;
        let unknown: Vec<i64> = recipe
            .tags()
            .iter()
            .filter(|id| !owned.iter().any(|tag| tag.id() == **id))
            .map(|id| id.as_i64())
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_request("unknown tag").with_details(serde_json::json!({
                "field": "tags",
                "code": "unknown_tag",
                "ids": unknown,
            })))
        }
    }
}

#[async_trait]
impl<R, T> RecipesCommand for RecipeService<R, T>
where
    R: RecipeRepository,
    T: TagRepository,
{
    async fn create_recipe(&self, owner: UserId, fields: RecipeFields) -> Result<Recipe, Error> {
        let recipe = NewRecipe::try_new(owner, fields).map_err(map_validation_error)?;
        self.ensure_tags_owned(&recipe).await?;
        let created = self
            .recipes
            .insert(&recipe)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %owner, recipe_id = %created.id(), "recipe created");
        Ok(created)
    }

    async fn delete_recipe(&self, owner: UserId, id: RecipeId) -> Result<(), Error> {
        let removed = self
            .recipes
            .delete(owner, id)
            .await
            .map_err(map_repository_error)?;
        if removed {
            info!(user_id = %owner, recipe_id = %id, "recipe deleted");
            Ok(())
        } else {
            Err(recipe_not_found(id))
        }
    }
}

#[async_trait]
impl<R, T> RecipesQuery for RecipeService<R, T>
where
    R: RecipeRepository,
    T: TagRepository,
{
    async fn list_recipes(&self, owner: UserId) -> Result<Vec<Recipe>, Error> {
        self.recipes
            .find_by_owner(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn get_recipe(&self, owner: UserId, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(owner, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| recipe_not_found(id))
    }
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
