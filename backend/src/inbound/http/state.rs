//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, RecipeRepository, RecipesCommand, RecipesQuery, TagRepository, TagsCommand,
    TagsQuery, UserProfileQuery, UserRepository,
};
use crate::domain::{AccountService, RecipeService, TagService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
    pub tags: Arc<dyn TagsCommand>,
    pub tags_query: Arc<dyn TagsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
    pub tags: Arc<dyn TagsCommand>,
    pub tags_query: Arc<dyn TagsQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            profile,
            recipes,
            recipes_query,
            tags,
            tags_query,
        } = ports;
        Self {
            login,
            profile,
            recipes,
            recipes_query,
            tags,
            tags_query,
        }
    }

    /// Wire the domain services over a set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_backend::inbound::http::state::HttpState;
    /// use recipe_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(store.clone(), store.clone(), store);
    /// let _login = state.login.clone();
    /// ```
    pub fn from_repositories<U, R, T>(users: Arc<U>, recipes: Arc<R>, tags: Arc<T>) -> Self
    where
        U: UserRepository + 'static,
        R: RecipeRepository + 'static,
        T: TagRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(users));
        let recipe_service = Arc::new(RecipeService::new(recipes, tags.clone()));
        let tag_service = Arc::new(TagService::new(tags));
        Self::new(HttpStatePorts {
            login: accounts.clone(),
            profile: accounts,
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
            tags: tag_service.clone(),
            tags_query: tag_service,
        })
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
