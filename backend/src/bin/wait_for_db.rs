//! Block until PostgreSQL accepts connections.
//!
//! Exits 0 once `SELECT 1` succeeds on a pooled connection, or non-zero when
//! `--max-attempts` probes have failed. Each attempt waits at most one retry
//! interval for a connection.

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use recipe_backend::domain::{RetryPolicy, wait_for_database};
use recipe_backend::outbound::persistence::{DbPool, DieselDatabaseProbe, PoolConfig};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `wait-for-db` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wait-for-db",
    about = "Wait until the database accepts connections",
    version
)]
struct CliArgs {
    /// Database connection URL.
    #[arg(long = "database-url", env = "DATABASE_URL", value_name = "url")]
    database_url: String,
    /// Seconds to sleep between failed probes.
    #[arg(long = "interval-secs", default_value_t = 1, value_name = "seconds")]
    interval_secs: u64,
    /// Give up after this many probes. Retries forever when omitted.
    #[arg(long = "max-attempts", value_name = "count")]
    max_attempts: Option<u32>,
}

/// bb8 rejects a zero checkout timeout.
const MIN_CHECKOUT_TIMEOUT: Duration = Duration::from_millis(100);

impl CliArgs {
    fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_secs(self.interval_secs),
            max_attempts: self.max_attempts,
        }
    }
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
    wait_until_ready(&args.database_url, args.policy()).await?;
    Ok(())
}

async fn wait_until_ready(database_url: &str, policy: RetryPolicy) -> Result<u32> {
    let config = PoolConfig::new(database_url)
        .with_max_size(1)
        .with_connection_timeout(policy.interval.max(MIN_CHECKOUT_TIMEOUT));
    let pool = DbPool::new(config)
        .await
        .wrap_err("failed to create database pool")?;
    let probe = DieselDatabaseProbe::new(pool);
    wait_for_database(&probe, policy)
        .await
        .wrap_err("database did not become available")
}
