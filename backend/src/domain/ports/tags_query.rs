//! Driving port for reading the caller's tags.

use async_trait::async_trait;

use crate::domain::{Error, Tag, UserId};

/// Domain use-case port for tag reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagsQuery: Send + Sync {
    /// Tags owned by `owner`, ordered by name descending.
    async fn list_tags(&self, owner: UserId) -> Result<Vec<Tag>, Error>;
}
