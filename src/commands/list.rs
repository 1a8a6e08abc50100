//! `/list` and `/listexpired`: read-only views over the family's active
//! products, soonest expiry first.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use crate::database;
use crate::database::models::User;
use crate::ui::{self, Reply};

pub async fn run(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    only_expired: bool,
    now: DateTime<Utc>,
) -> Result<Reply, sqlx::Error> {
    let products = database::products::list_active(tx, user.family, only_expired, now).await?;

    if products.is_empty() {
        let text = if only_expired {
            "No expired products. Well done!"
        } else {
            "No active products"
        };
        return Ok(Reply::text(text));
    }

    Ok(Reply::text(ui::product_list(&products, now)))
}
