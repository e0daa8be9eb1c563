//! Port for recipe persistence.

use async_trait::async_trait;

use crate::domain::{NewRecipe, Recipe, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Port for owner-scoped recipe storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe together with its tag links.
    async fn insert(&self, recipe: &NewRecipe) -> Result<Recipe, RecipePersistenceError>;

    /// Recipes of `owner`, newest first.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RecipePersistenceError>;

    /// A single recipe, or `None` when missing or owned by someone else.
    async fn find_by_id(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipePersistenceError>;

    /// Delete a recipe of `owner`; returns whether a row was removed.
    async fn delete(&self, owner: UserId, id: RecipeId) -> Result<bool, RecipePersistenceError>;
}
