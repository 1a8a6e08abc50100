//! Invite rows: short-lived, single-use, globally unique numeric tokens.

use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::{PgPool, Postgres, Transaction};

use crate::constants::{INVITE_CODE_MAX, INVITE_CODE_MIN};

use super::models::Invite;

/// Allocate a globally unique 6-digit invite code by rejection sampling.
///
/// Each draw locks the clashing row (if any) so a concurrent redemption
/// cannot delete it mid-decision; the primary key backstops two concurrent
/// allocators drawing the same free code.
pub async fn allocate_code(tx: &mut Transaction<'_, Postgres>) -> Result<i32, sqlx::Error> {
    loop {
        let candidate = rand::thread_rng().gen_range(INVITE_CODE_MIN..=INVITE_CODE_MAX);
        let clash =
            sqlx::query_scalar::<_, i32>("SELECT code FROM invites WHERE code = $1 FOR UPDATE")
                .bind(candidate)
                .fetch_optional(&mut **tx)
                .await?;
        if clash.is_none() {
            return Ok(candidate);
        }
    }
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    code: i32,
    family: i64,
    expires: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO invites (code, family, expires) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(family)
        .bind(expires)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Look up an invite by code, locking the row so redemption is exactly-once.
pub async fn find(
    tx: &mut Transaction<'_, Postgres>,
    code: i32,
) -> Result<Option<Invite>, sqlx::Error> {
    sqlx::query_as::<_, Invite>(
        "SELECT code, family, expires FROM invites WHERE code = $1 FOR UPDATE",
    )
    .bind(code)
    .fetch_optional(&mut **tx)
    .await
}

/// Consume a redeemed invite.
pub async fn delete(tx: &mut Transaction<'_, Postgres>, code: i32) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM invites WHERE code = $1")
        .bind(code)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Drop invites whose TTL has lapsed; dead codes would otherwise occupy the
/// 6-digit space forever. Run by the retention job.
pub async fn delete_expired(pool: &PgPool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM invites WHERE expires < $1")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
