//! Product rows: family-scoped queries, code allocation, withdrawal, and the
//! batch queries used by the notification/retention jobs.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::{PgPool, Postgres, Transaction};

use crate::constants::{LIST_LIMIT, PRODUCT_CODE_MAX, PRODUCT_CODE_MIN};

use super::models::Product;

/// Active products of a family, soonest expiry first, capped at the list
/// limit. `only_expired` additionally filters to `expires < now`.
pub async fn list_active(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
    only_expired: bool,
    now: DateTime<Utc>,
) -> Result<Vec<Product>, sqlx::Error> {
    if only_expired {
        sqlx::query_as::<_, Product>(
            "SELECT code, family, name, expires, withdrawn FROM products \
             WHERE family = $1 AND withdrawn IS NULL AND expires < $2 \
             ORDER BY expires ASC LIMIT $3",
        )
        .bind(family)
        .bind(now)
        .bind(LIST_LIMIT)
        .fetch_all(&mut **tx)
        .await
    } else {
        sqlx::query_as::<_, Product>(
            "SELECT code, family, name, expires, withdrawn FROM products \
             WHERE family = $1 AND withdrawn IS NULL \
             ORDER BY expires ASC LIMIT $2",
        )
        .bind(family)
        .bind(LIST_LIMIT)
        .fetch_all(&mut **tx)
        .await
    }
}

/// Every active product of a family, uncapped. The inventory audit must see
/// the whole shelf, not just the first list page.
pub async fn all_active(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT code, family, name, expires, withdrawn FROM products \
         WHERE family = $1 AND withdrawn IS NULL ORDER BY expires ASC",
    )
    .bind(family)
    .fetch_all(&mut **tx)
    .await
}

/// Number of active products in the family.
pub async fn count_active(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM products WHERE family = $1 AND withdrawn IS NULL",
    )
    .bind(family)
    .fetch_one(&mut **tx)
    .await
}

/// Number of active products in the family that are already past expiry.
/// Gates `/new`: a household with spoiled stock reviews it before adding more.
pub async fn count_expired_active(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
    now: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM products WHERE family = $1 AND withdrawn IS NULL AND expires < $2",
    )
    .bind(family)
    .bind(now)
    .fetch_one(&mut **tx)
    .await
}

/// Look up a product by code within a family, locking the row. The caller
/// decides what an absent or already-withdrawn row means.
pub async fn find_by_code(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
    code: i32,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT code, family, name, expires, withdrawn FROM products \
         WHERE family = $1 AND code = $2 FOR UPDATE",
    )
    .bind(family)
    .bind(code)
    .fetch_optional(&mut **tx)
    .await
}

/// Allocate a product code unique within the family.
///
/// Reads every existing code of the family under `FOR UPDATE`, which both
/// serializes concurrent allocations for the same family and provides the
/// collision set for rejection sampling. The composite primary key backstops
/// the empty-family case where there is no row to lock.
pub async fn allocate_code(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
) -> Result<i32, sqlx::Error> {
    let taken: HashSet<i32> =
        sqlx::query_scalar::<_, i32>("SELECT code FROM products WHERE family = $1 FOR UPDATE")
            .bind(family)
            .fetch_all(&mut **tx)
            .await?
            .into_iter()
            .collect();

    loop {
        let candidate = rand::thread_rng().gen_range(PRODUCT_CODE_MIN..=PRODUCT_CODE_MAX);
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
    }
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
    code: i32,
    name: &str,
    expires: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO products (code, family, name, expires) VALUES ($1, $2, $3, $4)")
        .bind(code)
        .bind(family)
        .bind(name)
        .bind(expires)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Mark a product withdrawn. Returns false when the row was already
/// withdrawn by a concurrent event between lookup and update.
pub async fn withdraw(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
    code: i32,
    now: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE products SET withdrawn = $3 \
         WHERE family = $1 AND code = $2 AND withdrawn IS NULL",
    )
    .bind(family)
    .bind(code)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Distinct families that currently hold an active, already-expired product.
pub async fn families_with_expired(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT DISTINCT family FROM products WHERE withdrawn IS NULL AND expires < $1",
    )
    .bind(now)
    .fetch_all(pool)
    .await
}

/// Delete withdrawn products whose expiry lies before `cutoff`. Active rows
/// are never touched, regardless of age.
pub async fn purge_withdrawn(pool: &PgPool, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM products WHERE withdrawn IS NOT NULL AND expires < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}
