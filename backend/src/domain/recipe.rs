//! Recipes owned by a single user.

#![deny(missing_docs)]

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{TagId, UserId};

/// Maximum recipe title length.
pub const RECIPE_TITLE_MAX: usize = 255;
/// Maximum recipe link length.
pub const RECIPE_LINK_MAX: usize = 255;
/// Prices are stored as `NUMERIC(5, 2)`.
pub const PRICE_SCALE: u32 = 2;
/// Upper bound matching the `INTEGER` column.
pub const TIME_MINUTES_MAX: u32 = i32::MAX as u32;

fn price_max() -> Decimal {
    Decimal::new(99_999, PRICE_SCALE)
}

/// Validation errors returned by recipe constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// Title was blank once trimmed.
    EmptyTitle,
    /// Title exceeded `max` characters.
    TitleTooLong {
        /// Maximum length in characters.
        max: usize,
    },
    /// Preparation time does not fit the stored column.
    TimeTooLong {
        /// Largest accepted value.
        max: u32,
    },
    /// Price was below zero.
    NegativePrice,
    /// Price carried more than `scale` decimal places.
    PriceTooPrecise {
        /// Allowed decimal places.
        scale: u32,
    },
    /// Price exceeded `max`.
    PriceTooLarge {
        /// Largest accepted price.
        max: Decimal,
    },
    /// Link exceeded `max` characters.
    LinkTooLong {
        /// Maximum length in characters.
        max: usize,
    },
}

impl RecipeValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::TimeTooLong { .. } => "timeMinutes",
            Self::NegativePrice | Self::PriceTooPrecise { .. } | Self::PriceTooLarge { .. } => {
                "price"
            }
            Self::LinkTooLong { .. } => "link",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::TimeTooLong { .. } => "time_too_long",
            Self::NegativePrice => "negative_price",
            Self::PriceTooPrecise { .. } => "price_too_precise",
            Self::PriceTooLarge { .. } => "price_too_large",
            Self::LinkTooLong { .. } => "link_too_long",
        }
    }
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "recipe title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "recipe title must be at most {max} characters")
            }
            Self::TimeTooLong { max } => write!(f, "time in minutes must be at most {max}"),
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::PriceTooPrecise { scale } => {
                write!(f, "price must have at most {scale} decimal places")
            }
            Self::PriceTooLarge { max } => write!(f, "price must be at most {max}"),
            Self::LinkTooLong { max } => write!(f, "link must be at most {max} characters"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Store-assigned recipe identifier; larger ids were created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty recipe title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    /// Trim and validate a title.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > RECIPE_TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong {
                max: RECIPE_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Non-negative price with exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Validate a price and normalise it to two decimal places.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::Price;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Price::new(Decimal::new(5, 0)).unwrap();
    /// assert_eq!(price.amount().to_string(), "5.00");
    /// ```
    pub fn new(amount: Decimal) -> Result<Self, RecipeValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(RecipeValidationError::NegativePrice);
        }
        let mut normalised = amount.normalize();
        if normalised.scale() > PRICE_SCALE {
            return Err(RecipeValidationError::PriceTooPrecise { scale: PRICE_SCALE });
        }
        if normalised > price_max() {
            return Err(RecipeValidationError::PriceTooLarge { max: price_max() });
        }
        normalised.set_sign_positive(true);
        normalised.rescale(PRICE_SCALE);
        Ok(Self(normalised))
    }

    /// Amount rescaled to two decimal places.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Optional source link; empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeLink(String);

impl RecipeLink {
    /// Trim and validate a link; blank input yields an empty link.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > RECIPE_LINK_MAX {
            return Err(RecipeValidationError::LinkTooLong {
                max: RECIPE_LINK_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw recipe fields as supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFields {
    /// Untrimmed title.
    pub title: String,
    /// Preparation time in minutes.
    pub time_minutes: u32,
    /// Price as sent.
    pub price: Decimal,
    /// Source link, possibly blank.
    pub link: String,
    /// Tag ids to attach, possibly repeated.
    pub tags: Vec<TagId>,
}

/// Recipe data ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    owner: UserId,
    title: RecipeTitle,
    time_minutes: u32,
    price: Price,
    link: RecipeLink,
    tags: Vec<TagId>,
}

impl NewRecipe {
    /// Validate caller-supplied fields for `owner`.
    ///
    /// Tag ids are deduplicated while keeping their first-seen order; whether
    /// they belong to `owner` is checked by the recipe service.
    pub fn try_new(owner: UserId, fields: RecipeFields) -> Result<Self, RecipeValidationError> {
        let RecipeFields {
            title,
            time_minutes,
            price,
            link,
            tags,
        } = fields;
        if time_minutes > TIME_MINUTES_MAX {
            return Err(RecipeValidationError::TimeTooLong {
                max: TIME_MINUTES_MAX,
            });
        }
        let mut unique_tags = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique_tags.contains(&tag) {
                unique_tags.push(tag);
            }
        }
        Ok(Self {
            owner,
            title: RecipeTitle::new(title)?,
            time_minutes,
            price: Price::new(price)?,
            link: RecipeLink::new(link)?,
            tags: unique_tags,
        })
    }

    /// Owning user.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Validated title.
    pub fn title(&self) -> &RecipeTitle {
        &self.title
    }

    /// Preparation time in minutes.
    pub fn time_minutes(&self) -> u32 {
        self.time_minutes
    }

    /// Price with two decimal places.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Source link, empty when absent.
    pub fn link(&self) -> &RecipeLink {
        &self.link
    }

    /// Attached tag ids.
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    /// Order tag ids ascending, as stores return them.
    pub fn sort_tags(&mut self) {
        self.tags.sort_unstable();
    }

    /// Attach the store-assigned identifier.
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe { id, draft: self }
    }
}

/// A persisted recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    draft: NewRecipe,
}

impl Recipe {
    /// Store-assigned identifier.
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> UserId {
        self.draft.owner
    }

    /// Validated title.
    pub fn title(&self) -> &RecipeTitle {
        &self.draft.title
    }

    /// Preparation time in minutes.
    pub fn time_minutes(&self) -> u32 {
        self.draft.time_minutes
    }

    /// Price with two decimal places.
    pub fn price(&self) -> Price {
        self.draft.price
    }

    /// Source link, empty when absent.
    pub fn link(&self) -> &RecipeLink {
        &self.draft.link
    }

    /// Attached tag ids.
    pub fn tags(&self) -> &[TagId] {
        &self.draft.tags
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for recipe field validation.
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn fields() -> RecipeFields {
        RecipeFields {
            title: "Recipe".to_owned(),
            time_minutes: 10,
            price: dec!(5.00),
            link: String::new(),
            tags: Vec::new(),
        }
    }

    #[rstest]
    fn valid_fields_build_a_recipe(fields: RecipeFields) {
        let recipe = NewRecipe::try_new(UserId::new(1), fields)
            .expect("valid fields")
            .into_recipe(RecipeId::new(9));

        assert_eq!(recipe.id(), RecipeId::new(9));
        assert_eq!(recipe.owner(), UserId::new(1));
        assert_eq!(recipe.title().as_ref(), "Recipe");
        assert_eq!(recipe.time_minutes(), 10);
        assert_eq!(recipe.price().amount().to_string(), "5.00");
        assert!(recipe.link().as_ref().is_empty());
    }

    #[rstest]
    #[case(dec!(5), "5.00")]
    #[case(dec!(5.5), "5.50")]
    #[case(dec!(0), "0.00")]
    #[case(dec!(999.99), "999.99")]
    #[case(dec!(12.500), "12.50")]
    fn prices_normalise_to_two_places(#[case] amount: Decimal, #[case] expected: &str) {
        let price = Price::new(amount).expect("valid price");
        assert_eq!(price.amount().to_string(), expected);
    }

    #[rstest]
    #[case(dec!(-0.01), RecipeValidationError::NegativePrice)]
    #[case(dec!(1.005), RecipeValidationError::PriceTooPrecise { scale: PRICE_SCALE })]
    #[case(dec!(1000), RecipeValidationError::PriceTooLarge { max: dec!(999.99) })]
    fn invalid_prices_are_rejected(
        #[case] amount: Decimal,
        #[case] expected: RecipeValidationError,
    ) {
        assert_eq!(Price::new(amount).expect_err("invalid price"), expected);
    }

    #[rstest]
    fn blank_title_is_rejected(mut fields: RecipeFields) {
        fields.title = "   ".to_owned();
        let err = NewRecipe::try_new(UserId::new(1), fields).expect_err("blank title");
        assert_eq!(err, RecipeValidationError::EmptyTitle);
        assert_eq!(err.field(), "title");
        assert_eq!(err.code(), "empty_title");
    }

    #[rstest]
    fn oversized_time_is_rejected(mut fields: RecipeFields) {
        fields.time_minutes = u32::MAX;
        let err = NewRecipe::try_new(UserId::new(1), fields).expect_err("time too long");
        assert_eq!(err.field(), "timeMinutes");
    }

    #[rstest]
    fn long_link_is_rejected(mut fields: RecipeFields) {
        fields.link = format!("https://example.com/{}", "a".repeat(RECIPE_LINK_MAX));
        let err = NewRecipe::try_new(UserId::new(1), fields).expect_err("link too long");
        assert_eq!(err.code(), "link_too_long");
    }

    #[rstest]
    fn duplicate_tags_are_collapsed(mut fields: RecipeFields) {
        fields.tags = vec![TagId::new(3), TagId::new(1), TagId::new(3)];
        let recipe = NewRecipe::try_new(UserId::new(1), fields).expect("valid fields");
        assert_eq!(recipe.tags(), &[TagId::new(3), TagId::new(1)]);
    }
}
