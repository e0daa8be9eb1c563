//! Driving port for recipe mutations.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeFields, RecipeId, UserId};

/// Domain use-case port for creating and deleting recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Validate and persist a recipe for `owner`.
    async fn create_recipe(&self, owner: UserId, fields: RecipeFields) -> Result<Recipe, Error>;

    /// Remove a recipe of `owner`; `not_found` for missing or foreign ids.
    async fn delete_recipe(&self, owner: UserId, id: RecipeId) -> Result<(), Error>;
}
