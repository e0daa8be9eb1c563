//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`DatabaseProbe`], [`CredentialHasher`])
//! describe how the domain talks to storage and hashing. Each exposes a strongly typed error so adapters map
//! their failures into predictable variants. Driving ports (`*Query`,
//! `*Command`, [`LoginService`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_hasher;
mod database_probe;
mod login_service;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod tag_repository;
mod tags_command;
mod tags_query;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use database_probe::MockDatabaseProbe;
pub use database_probe::{DatabaseProbe, DatabaseProbeError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipePersistenceError, RecipeRepository};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::RecipesCommand;
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::{TagPersistenceError, TagRepository};
#[cfg(test)]
pub use tags_command::MockTagsCommand;
pub use tags_command::TagsCommand;
#[cfg(test)]
pub use tags_query::MockTagsQuery;
pub use tags_query::TagsQuery;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
