//! Port used by the readiness command to check database connectivity.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while probing the database.
    pub enum DatabaseProbeError {
        /// The database did not accept a connection or query.
        Unavailable { message: String } => "database unavailable: {message}",
    }
}

/// Issues a trivial round trip against the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Succeeds once the database answers a query.
    async fn check(&self) -> Result<(), DatabaseProbeError>;
}
