//! Daily expiry notification sweep: every member of every family holding an
//! active, already-expired product gets a one-line reminder.

use chrono::Utc;
use sqlx::PgPool;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::database;

use super::scheduler::{Job, JobFrequency};

const REMINDER: &str =
    "Some products in your family inventory are past their expiry date. Review them with /listexpired";

/// Run one sweep. Delivery is best-effort: a failure for one recipient is
/// logged and the sweep moves on. Returns the number of delivered reminders.
pub async fn run(pool: &PgPool, bot: &Bot) -> Result<u64, sqlx::Error> {
    let now = Utc::now();
    let families = database::products::families_with_expired(pool, now).await?;
    if families.is_empty() {
        return Ok(0);
    }

    let members = database::users::members_of_families(pool, &families).await?;
    let mut delivered = 0u64;
    for user_id in members {
        match bot.send_message(ChatId(user_id), REMINDER).await {
            Ok(_) => delivered += 1,
            Err(err) => {
                tracing::warn!(target: "jobs.expiry_sweep", user = user_id, error = %err, "reminder delivery failed; continuing");
            }
        }
    }

    tracing::info!(target: "jobs.expiry_sweep", families = families.len(), delivered, "sweep finished");
    Ok(delivered)
}

pub struct ExpirySweepJob {
    pool: PgPool,
    bot: Bot,
}

impl ExpirySweepJob {
    pub fn new(pool: PgPool, bot: Bot) -> Self {
        Self { pool, bot }
    }
}

#[async_trait::async_trait]
impl Job for ExpirySweepJob {
    fn name(&self) -> &'static str {
        "expiry_sweep"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        run(&self.pool, &self.bot)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
