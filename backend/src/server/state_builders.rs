//! Wire HTTP state onto PostgreSQL or the in-memory store.

use std::sync::Arc;

use tracing::{info, warn};

use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::memory::InMemoryStore;
use recipe_backend::outbound::persistence::{
    DbPool, DieselRecipeRepository, DieselTagRepository, DieselUserRepository, PoolConfig,
    run_migrations,
};

use super::AppSettings;

/// Build handler state from settings.
///
/// With a database URL, pending migrations are applied before the pool is
/// created; otherwise the process keeps all data in memory.
///
/// # Errors
/// Returns [`std::io::Error`] when migrations or pool construction fail.
pub(crate) async fn build_http_state(settings: &AppSettings) -> std::io::Result<HttpState> {
    let Some(database_url) = settings.database_url.as_deref() else {
        warn!("no database configured; data will not survive a restart");
        return Ok(build_in_memory_state());
    };

    let applied = run_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations applied");

    let mut config = PoolConfig::new(database_url);
    if let Some(max) = settings.db_max_connections {
        config = config.with_max_size(max);
    }
    let pool = DbPool::new(config).await.map_err(std::io::Error::other)?;
    Ok(build_diesel_state(&pool))
}

fn build_diesel_state(pool: &DbPool) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselRecipeRepository::new(pool.clone())),
        Arc::new(DieselTagRepository::new(pool.clone())),
    )
}

fn build_in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_repositories(store.clone(), store.clone(), store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_backend::domain::UserId;

    #[actix_web::test]
    async fn missing_database_url_selects_in_memory_store() {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            db_max_connections: None,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: None,
            cookie_same_site: None,
        };

        let state = build_http_state(&settings).await.expect("state");
        let recipes = state
            .recipes_query
            .list_recipes(UserId::new(1))
            .await
            .expect("in-memory list");
        assert!(recipes.is_empty());
    }
}
