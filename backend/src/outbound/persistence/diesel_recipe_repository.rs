//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Every query filters on `recipes.user_id`, so rows owned by other users are
//! never loaded. Tag links live in `recipe_tags` and are written in the same
//! transaction as the recipe row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{NewRecipe, Recipe, RecipeFields, RecipeId, TagId, UserId};

use super::diesel_error_mapping::map_basic_diesel_error;
use super::models::{NewRecipeRow, RecipeRow, RecipeTagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{recipe_tags, recipes};

/// Diesel-backed implementation of the [`RecipeRepository`] port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    RecipePersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> RecipePersistenceError {
    map_basic_diesel_error(
        error,
        RecipePersistenceError::query,
        RecipePersistenceError::connection,
    )
}

fn row_to_recipe(row: RecipeRow, links: Vec<RecipeTagRow>) -> Result<Recipe, RecipePersistenceError> {
    let time_minutes = u32::try_from(row.time_minutes).map_err(|_| {
        RecipePersistenceError::query(format!("negative time_minutes on recipe {}", row.id))
    })?;
    let fields = RecipeFields {
        title: row.title,
        time_minutes,
        price: row.price,
        link: row.link,
        tags: links.into_iter().map(|link| TagId::new(link.tag_id)).collect(),
    };
    NewRecipe::try_new(UserId::new(row.user_id), fields)
        .map(|recipe| recipe.into_recipe(RecipeId::new(row.id)))
        .map_err(|err| RecipePersistenceError::query(format!("invalid stored recipe: {err}")))
}

fn rows_to_recipes(
    rows: Vec<RecipeRow>,
    links: Vec<RecipeTagRow>,
) -> Result<Vec<Recipe>, RecipePersistenceError> {
    let grouped = links.grouped_by(&rows);
    rows.into_iter()
        .zip(grouped)
        .map(|(row, links)| row_to_recipe(row, links))
        .collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert(&self, recipe: &NewRecipe) -> Result<Recipe, RecipePersistenceError> {
        let time_minutes = i32::try_from(recipe.time_minutes())
            .map_err(|_| RecipePersistenceError::query("time_minutes out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = conn
            .transaction(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(recipes::table)
                        .values(&NewRecipeRow {
                            user_id: recipe.owner().as_i64(),
                            title: recipe.title().as_ref(),
                            time_minutes,
                            price: recipe.price().amount(),
                            link: recipe.link().as_ref(),
                        })
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;

                    let links: Vec<RecipeTagRow> = recipe
                        .tags()
                        .iter()
                        .map(|tag| RecipeTagRow {
                            recipe_id: id,
                            tag_id: tag.as_i64(),
                        })
                        .collect();
                    if !links.is_empty() {
                        diesel::insert_into(recipe_tags::table)
                            .values(&links)
                            .execute(conn)
                            .await?;
                    }
                    Ok::<_, diesel::result::Error>(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut created = recipe.clone();
        created.sort_tags();
        Ok(created.into_recipe(RecipeId::new(id)))
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(owner.as_i64()))
            .order(recipes::id.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let links: Vec<RecipeTagRow> = RecipeTagRow::belonging_to(&rows)
            .order(recipe_tags::tag_id.asc())
            .select(RecipeTagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_recipes(rows, links)
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id.as_i64()))
            .filter(recipes::user_id.eq(owner.as_i64()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let links: Vec<RecipeTagRow> = RecipeTagRow::belonging_to(&row)
            .order(recipe_tags::tag_id.asc())
            .select(RecipeTagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_recipe(row, links).map(Some)
    }

    async fn delete(&self, owner: UserId, id: RecipeId) -> Result<bool, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            recipes::table
                .filter(recipes::id.eq(id.as_i64()))
                .filter(recipes::user_id.eq(owner.as_i64())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
