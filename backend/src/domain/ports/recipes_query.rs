//! Driving port for reading the caller's recipes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId, UserId};

/// Domain use-case port for recipe reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Recipes owned by `owner`, ordered by descending id.
    async fn list_recipes(&self, owner: UserId) -> Result<Vec<Recipe>, Error>;

    /// One recipe owned by `owner`; `not_found` for missing or foreign ids.
    async fn get_recipe(&self, owner: UserId, id: RecipeId) -> Result<Recipe, Error>;
}
