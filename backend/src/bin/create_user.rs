//! Create an account from the command line.
//!
//! Applies pending migrations first so it can run against a fresh database.

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use recipe_backend::domain::AccountService;
use recipe_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_migrations,
};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `create-user` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "create-user", about = "Create a user account", version)]
struct CliArgs {
    /// Email address; stored lower-cased.
    #[arg(long, value_name = "email")]
    email: String,
    /// Plaintext password to hash and store.
    #[arg(long, value_name = "password")]
    password: String,
    /// Grant staff and superuser rights.
    #[arg(long)]
    superuser: bool,
    /// Database connection URL.
    #[arg(long = "database-url", env = "DATABASE_URL", value_name = "url")]
    database_url: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    run_migrations(&args.database_url)
        .await
        .wrap_err("failed to apply migrations")?;
    let pool = DbPool::new(PoolConfig::new(&args.database_url).with_max_size(1))
        .await
        .wrap_err("failed to create database pool")?;
    let accounts = AccountService::new(Arc::new(DieselUserRepository::new(pool)));

    let created = if args.superuser {
        accounts
            .create_superuser(Some(&args.email), &args.password)
            .await
    } else {
        accounts.create_user(Some(&args.email), &args.password).await
    };
    let user = created.map_err(|err| eyre!("failed to create user: {err}"))?;
    info!(user_id = %user.id(), email = %user.email(), "account ready");
    Ok(())
}
