//! Tags owned by a single user and attachable to that user's recipes.

#![deny(missing_docs)]

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum tag name length.
pub const TAG_NAME_MAX: usize = 255;

/// Validation errors returned by tag constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Name was blank once trimmed.
    EmptyName,
    /// Name exceeded `max` characters.
    NameTooLong {
        /// Maximum length in characters.
        max: usize,
    },
}

impl fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "tag name must not be empty"),
            Self::NameTooLong { max } => write!(f, "tag name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for TagValidationError {}

/// Store-assigned tag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(i64);

impl TagId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty tag label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    /// Trim and validate a tag name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TagValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TagValidationError::EmptyName);
        }
        if trimmed.chars().count() > TAG_NAME_MAX {
            return Err(TagValidationError::NameTooLong { max: TAG_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Lower-cased name used as the listing sort key.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Tag data ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    /// User the tag belongs to.
    pub owner: UserId,
    /// Validated label.
    pub name: TagName,
}

impl NewTag {
    /// Attach the store-assigned identifier.
    pub fn into_tag(self, id: TagId) -> Tag {
        Tag {
            id,
            owner: self.owner,
            name: self.name,
        }
    }
}

/// A persisted tag.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{NewTag, TagId, TagName, UserId};
///
/// let tag = NewTag { owner: UserId::new(1), name: TagName::new("Vegan").unwrap() }
///     .into_tag(TagId::new(3));
/// assert_eq!(tag.to_string(), "Vegan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: TagId,
    owner: UserId,
    name: TagName,
}

impl Tag {
    /// Build a [`Tag`] from validated components.
    pub fn new(id: TagId, owner: UserId, name: TagName) -> Self {
        Self { id, owner, name }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> TagId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Validated label.
    pub fn name(&self) -> &TagName {
        &self.name
    }

    /// Listing order: case-folded name descending, then newest first.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        other
            .name
            .folded()
            .cmp(&self.name.folded())
            .then(other.id.cmp(&self.id))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Tag")]
    #[case("Vegan dishes")]
    fn display_equals_name(#[case] name: &str) {
        let tag = Tag::new(
            TagId::new(1),
            UserId::new(1),
            TagName::new(name).expect("valid name"),
        );
        assert_eq!(tag.to_string(), tag.name().as_ref());
        assert_eq!(tag.to_string(), name);
    }

    #[rstest]
    #[case("", TagValidationError::EmptyName)]
    #[case("  ", TagValidationError::EmptyName)]
    fn blank_names_are_rejected(#[case] raw: &str, #[case] expected: TagValidationError) {
        assert_eq!(TagName::new(raw).expect_err("blank name"), expected);
    }

    #[rstest]
    fn long_names_are_rejected() {
        let raw = "t".repeat(TAG_NAME_MAX + 1);
        assert_eq!(
            TagName::new(raw).expect_err("long name"),
            TagValidationError::NameTooLong { max: TAG_NAME_MAX }
        );
    }

    #[rstest]
    fn names_are_trimmed() {
        assert_eq!(TagName::new("  Dessert ").expect("valid").as_ref(), "Dessert");
    }

    #[rstest]
    fn listing_order_ignores_case() {
        let tag = |id, name| {
            Tag::new(
                TagId::new(id),
                UserId::new(1),
                TagName::new(name).expect("valid name"),
            )
        };
        let mut tags = vec![tag(1, "apple"), tag(2, "Banana"), tag(3, "cherry"), tag(4, "Apple")];
        tags.sort_by(Tag::listing_order);

        let ids: Vec<i64> = tags.iter().map(|t| t.id().as_i64()).collect();
        assert_eq!(ids, [3, 2, 4, 1]);
    }
}
