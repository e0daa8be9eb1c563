//! Tag domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{TagPersistenceError, TagRepository, TagsCommand, TagsQuery};
use crate::domain::{Error, NewTag, Tag, TagName, TagValidationError, UserId, field_error};

pub(crate) fn map_tag_repository_error(error: TagPersistenceError) -> Error {
    match error {
        TagPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("tag repository unavailable: {message}"))
        }
        TagPersistenceError::Query { message } => {
            Error::internal(format!("tag repository error: {message}"))
        }
    }
}

fn map_name_error(error: TagValidationError) -> Error {
    let code = match error {
        TagValidationError::EmptyName => "empty_name",
        TagValidationError::NameTooLong { .. } => "name_too_long",
    };
    field_error("name", code, error.to_string())
}

/// Tag service implementing the tag driving ports.
#[derive(Clone)]
pub struct TagService<R> {
    tags: Arc<R>,
}

impl<R> TagService<R> {
    /// Create a new service over the tag repository.
    pub fn new(tags: Arc<R>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl<R> TagsCommand for TagService<R>
where
    R: TagRepository,
{
    async fn create_tag(&self, owner: UserId, name: &str) -> Result<Tag, Error> {
        let name = TagName::new(name).map_err(map_name_error)?;
        self.tags
            .insert(&NewTag { owner, name })
            .await
            .map_err(map_tag_repository_error)
    }
}

#[async_trait]
impl<R> TagsQuery for TagService<R>
where
    R: TagRepository,
{
    async fn list_tags(&self, owner: UserId) -> Result<Vec<Tag>, Error> {
        self.tags
            .find_by_owner(owner)
            .await
            .map_err(map_tag_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, TagId};
    use crate::domain::ports::MockTagRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn create_tag_trims_and_scopes_to_owner() {
        let mut repo = MockTagRepository::new();
        repo.expect_insert()
            .withf(|tag| tag.owner == UserId::new(2) && tag.name.as_ref() == "Vegan")
            .times(1)
            .returning(|tag| Ok(tag.clone().into_tag(TagId::new(1))));
        let service = TagService::new(Arc::new(repo));

        let tag = service
            .create_tag(UserId::new(2), "  Vegan ")
            .await
            .expect("tag created");
        assert_eq!(tag.to_string(), "Vegan");
    }

    #[tokio::test]
    async fn blank_tag_name_is_rejected() {
        let mut repo = MockTagRepository::new();
        repo.expect_insert().never();
        let service = TagService::new(Arc::new(repo));

        let err = service
            .create_tag(UserId::new(2), " ")
            .await
            .expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&serde_json::json!({ "field": "name", "code": "empty_name" }))
        );
    }

    #[tokio::test]
    async fn list_tags_reads_only_the_owner() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_owner()
            .with(eq(UserId::new(3)))
            .times(1)
            .return_once(|_| Err(TagPersistenceError::connection("down")));
        let service = TagService::new(Arc::new(repo));

        let err = service
            .list_tags(UserId::new(3))
            .await
            .expect_err("repository down");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
