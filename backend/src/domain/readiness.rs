//! Waiting for the database to accept connections.
//!
//! Used by the `wait-for-db` command before the server or migrations run.

use std::time::Duration;

use tracing::{info, warn};

use crate::domain::ports::{DatabaseProbe, DatabaseProbeError};

/// How often and how many times the database is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between failed probes.
    pub interval: Duration,
    /// Total number of probes; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: None,
        }
    }
}

/// Probe until the database answers, sleeping between failures.
///
/// Returns the number of probes issued. Fails with the last probe error
/// once `max_attempts` probes have failed.
pub async fn wait_for_database<P>(probe: &P, policy: RetryPolicy) -> Result<u32, DatabaseProbeError>
where
    P: DatabaseProbe + ?Sized,
{
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        match probe.check().await {
            Ok(()) => {
                info!(attempts, "database available");
                return Ok(attempts);
            }
            Err(err) => {
                if policy.max_attempts.is_some_and(|max| attempts >= max) {
                    warn!(attempts, error = %err, "database still unavailable, giving up");
                    return Err(err);
                }
                warn!(attempts, error = %err, "database unavailable, waiting");
                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
