//! `/inventory`: a one-shot shelf audit. The user sends every code they can
//! physically find, one per line; the reply lists the active products whose
//! codes were NOT claimed, i.e. the ones gone missing.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use crate::database;
use crate::database::models::{CurrentAction, User};
use crate::ui::{self, Reply};

pub async fn start(tx: &mut Transaction<'_, Postgres>, user: &User) -> Result<Reply, sqlx::Error> {
    database::users::set_current_action(tx, user.id, Some(&CurrentAction::InventoryAudit)).await?;
    Ok(Reply::text(
        "Send the code of every product you can find, one per line. \
         I will reply with the ones that are missing.",
    ))
}

/// Codes the user claims to have found: one integer per line, anything else
/// on a line is ignored.
pub fn parse_claimed_codes(text: &str) -> HashSet<i32> {
    text.lines()
        .filter_map(|line| line.trim().parse::<i32>().ok())
        .collect()
}

pub async fn audit(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Reply, sqlx::Error> {
    let claimed = parse_claimed_codes(text);
    let products = database::products::all_active(tx, user.family).await?;
    database::users::set_current_action(tx, user.id, None).await?;

    let missing: Vec<_> = products
        .into_iter()
        .filter(|product| !claimed.contains(&product.code))
        .collect();

    if missing.is_empty() {
        return Ok(Reply::text("Every active product was accounted for."));
    }

    Ok(Reply::text(format!(
        "Missing from the shelf:\n{}",
        ui::product_list(&missing, now)
    )))
}
