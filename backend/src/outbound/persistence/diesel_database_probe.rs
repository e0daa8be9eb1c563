//! Connectivity probe issuing `SELECT 1` on a pooled connection.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DatabaseProbe, DatabaseProbeError};

use super::pool::DbPool;

/// Diesel-backed implementation of the [`DatabaseProbe`] port.
#[derive(Clone)]
pub struct DieselDatabaseProbe {
    pool: DbPool,
}

impl DieselDatabaseProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseProbe for DieselDatabaseProbe {
    async fn check(&self) -> Result<(), DatabaseProbeError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DatabaseProbeError::unavailable(err.into_message()))?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|err| DatabaseProbeError::unavailable(err.to_string()))?;
        Ok(())
    }
}
