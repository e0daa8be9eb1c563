//! Driving port for tag creation.

use async_trait::async_trait;

use crate::domain::{Error, Tag, UserId};

/// Domain use-case port for creating tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagsCommand: Send + Sync {
    /// Validate `name` and persist a tag for `owner`.
    async fn create_tag(&self, owner: UserId, name: &str) -> Result<Tag, Error>;
}
