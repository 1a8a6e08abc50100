//! User rows: identity resolution, pending-action updates, family membership.

use sqlx::{PgPool, Postgres, Transaction};

use super::models::{decode_current_action, encode_current_action, CurrentAction, User};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    family: i64,
    current_action: Option<String>,
}

impl UserRow {
    fn decode(self) -> User {
        User {
            id: self.id,
            family: self.family,
            current_action: decode_current_action(self.current_action.as_deref()),
        }
    }
}

/// Resolve the sender to a user row, creating one (family = own id, no
/// pending action) on first contact, and lock it for the rest of the event.
///
/// The insert-then-locked-select pair is safe under concurrent first contact:
/// the second transaction's insert is a no-op and its select blocks on the
/// first one's row lock.
pub async fn get_or_create(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<User, sqlx::Error> {
    sqlx::query("INSERT INTO users (id, family) VALUES ($1, $1) ON CONFLICT (id) DO NOTHING")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, family, current_action FROM users WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row.decode())
}

/// Persist a new pending action (or clear it with `None`).
pub async fn set_current_action(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
    action: Option<&CurrentAction>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET current_action = $2 WHERE id = $1")
        .bind(id)
        .bind(encode_current_action(action))
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Move a user into another family, clearing any pending action in the same
/// statement (invite redemption always ends the flow).
pub async fn move_to_family(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
    family: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET family = $2, current_action = NULL WHERE id = $1")
        .bind(id)
        .bind(family)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Number of users in `family` other than `user_id`.
pub async fn count_other_members(
    tx: &mut Transaction<'_, Postgres>,
    family: i64,
    user_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE family = $1 AND id <> $2")
        .bind(family)
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
}

/// All user ids belonging to any of the given families. Used by the expiry
/// sweep outside any per-event transaction.
pub async fn members_of_families(pool: &PgPool, families: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE family = ANY($1) ORDER BY id")
        .bind(families)
        .fetch_all(pool)
        .await
}
