//! In-memory adapters for the repository ports.
//!
//! Used when no database URL is configured and by integration tests. All
//! tables sit behind one mutex; ids come from per-table counters starting at
//! 1, so they increase in creation order just like PostgreSQL sequences.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    RecipePersistenceError, RecipeRepository, TagPersistenceError, TagRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, NewRecipe, NewTag, NewUser, Recipe, RecipeId, Tag, TagId, User, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tags: BTreeMap<i64, Tag>,
    recipes: BTreeMap<i64, Recipe>,
    next_user_id: i64,
    next_tag_id: i64,
    next_recipe_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Process-local store implementing every repository port.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.tables();
        if tables.users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate(user.email().as_ref()));
        }
        let id = next_id(&mut tables.next_user_id);
        let created = user.clone().into_user(UserId::new(id));
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables().users.get(&id.as_i64()).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn insert(&self, tag: &NewTag) -> Result<Tag, TagPersistenceError> {
        let mut tables = self.tables();
        let id = next_id(&mut tables.next_tag_id);
        let created = tag.clone().into_tag(TagId::new(id));
        tables.tags.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Tag>, TagPersistenceError> {
        let mut tags: Vec<Tag> = self
            .tables()
            .tags
            .values()
            .filter(|tag| tag.owner() == owner)
            .cloned()
            .collect();
        tags.sort_by(Tag::listing_order);
        Ok(tags)
    }

    async fn find_by_ids(
        &self,
        owner: UserId,
        ids: &[TagId],
    ) -> Result<Vec<Tag>, TagPersistenceError> {
        Ok(self
            .tables()
            .tags
            .values()
            .filter(|tag| tag.owner() == owner && ids.contains(&tag.id()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn insert(&self, recipe: &NewRecipe) -> Result<Recipe, RecipePersistenceError> {
        let mut tables = self.tables();
        let id = next_id(&mut tables.next_recipe_id);
        let mut stored = recipe.clone();
        stored.sort_tags();
        let created = stored.into_recipe(RecipeId::new(id));
        tables.recipes.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        Ok(self
            .tables()
            .recipes
            .values()
            .rev()
            .filter(|recipe| recipe.owner() == owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipePersistenceError> {
        Ok(self
            .tables()
            .recipes
            .get(&id.as_i64())
            .filter(|recipe| recipe.owner() == owner)
            .cloned())
    }

    async fn delete(&self, owner: UserId, id: RecipeId) -> Result<bool, RecipePersistenceError> {
        let mut tables = self.tables();
        let owned = tables
            .recipes
            .get(&id.as_i64())
            .is_some_and(|recipe| recipe.owner() == owner);
        if owned {
            tables.recipes.remove(&id.as_i64());
        }
        Ok(owned)
    }
}
