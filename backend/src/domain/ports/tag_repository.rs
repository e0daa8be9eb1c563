//! Port for tag persistence.

use async_trait::async_trait;

use crate::domain::{NewTag, Tag, TagId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tag repository adapters.
    pub enum TagPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "tag repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "tag repository query failed: {message}",
    }
}

/// Port for owner-scoped tag storage.
///
/// Every read takes the owner so adapters never return another user's tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Insert a tag and return it with its store-assigned id.
    async fn insert(&self, tag: &NewTag) -> Result<Tag, TagPersistenceError>;

    /// All tags of `owner`, ordered by name descending.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Tag>, TagPersistenceError>;

    /// Tags of `owner` among `ids`; unknown or foreign ids are omitted.
    async fn find_by_ids(
        &self,
        owner: UserId,
        ids: &[TagId],
    ) -> Result<Vec<Tag>, TagPersistenceError>;
}
