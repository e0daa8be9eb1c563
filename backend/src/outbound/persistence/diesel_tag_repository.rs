//! PostgreSQL-backed `TagRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TagPersistenceError, TagRepository};
use crate::domain::{NewTag, Tag, TagId, TagName, UserId};

use super::diesel_error_mapping::map_basic_diesel_error;
use super::models::{NewTagRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::tags;

/// Diesel-backed implementation of the [`TagRepository`] port.
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TagPersistenceError {
    TagPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> TagPersistenceError {
    map_basic_diesel_error(
        error,
        TagPersistenceError::query,
        TagPersistenceError::connection,
    )
}

/// Case-folded name compared by code point, matching [`Tag::listing_order`].
fn listing_name_key() -> SqlLiteral<Text> {
    sql::<Text>(r#"lower(tags.name) COLLATE "C""#)
}

fn row_to_tag(row: TagRow) -> Result<Tag, TagPersistenceError> {
    let name = TagName::new(&row.name)
        .map_err(|err| TagPersistenceError::query(format!("invalid stored tag name: {err}")))?;
    Ok(Tag::new(TagId::new(row.id), UserId::new(row.user_id), name))
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn insert(&self, tag: &NewTag) -> Result<Tag, TagPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i64 = diesel::insert_into(tags::table)
            .values(&NewTagRow {
                user_id: tag.owner.as_i64(),
                name: tag.name.as_ref(),
            })
            .returning(tags::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(tag.clone().into_tag(TagId::new(id)))
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Tag>, TagPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .filter(tags::user_id.eq(owner.as_i64()))
            .order((listing_name_key().desc(), tags::id.desc()))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_tag).collect()
    }

    async fn find_by_ids(
        &self,
        owner: UserId,
        ids: &[TagId],
    ) -> Result<Vec<Tag>, TagPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .filter(tags::user_id.eq(owner.as_i64()))
            .filter(tags::id.eq_any(raw_ids))
            .order(tags::id.asc())
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_tag).collect()
    }
}
