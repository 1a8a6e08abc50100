//! Daily retention purge: withdrawn products whose expiry lies more than the
//! grace period in the past are permanently deleted, and lapsed invites are
//! dropped so their codes free up.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::constants::RETENTION_GRACE_DAYS;
use crate::database;

use super::scheduler::{Job, JobFrequency};

/// Run one purge. Returns the number of deleted product rows.
pub async fn run(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let now = Utc::now();
    let cutoff = now - Duration::days(RETENTION_GRACE_DAYS);

    let purged = database::products::purge_withdrawn(pool, cutoff).await?;
    let lapsed_invites = database::invites::delete_expired(pool, now).await?;

    tracing::info!(target: "jobs.retention_purge", purged, lapsed_invites, "purge finished");
    Ok(purged)
}

pub struct RetentionPurgeJob {
    pool: PgPool,
}

impl RetentionPurgeJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for RetentionPurgeJob {
    fn name(&self) -> &'static str {
        "retention_purge"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        run(&self.pool).await.map(|_| ()).map_err(|e| e.to_string())
    }
}
