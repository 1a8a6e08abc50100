//! Handles the "Withdraw" button attached to product detail replies.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use crate::database;
use crate::database::models::User;
use crate::ui::Reply;

/// Mark the product consumed/discarded. The lookup locks the row, so two
/// members pressing the button at once resolve to one withdrawal and one
/// "already withdrawn" reply.
pub async fn handle(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    code: i32,
    now: DateTime<Utc>,
) -> Result<Reply, sqlx::Error> {
    let product = match database::products::find_by_code(tx, user.family, code).await? {
        None => return Ok(Reply::text("No product with that code was found")),
        Some(product) => product,
    };
    if product.withdrawn.is_some() {
        return Ok(Reply::text("The product with that code has already been withdrawn"));
    }

    database::products::withdraw(tx, user.family, code, now).await?;
    tracing::info!(target: "interactions.withdraw", family = user.family, code, "product withdrawn");
    Ok(Reply::text("Product withdrawn, thank you :)"))
}
