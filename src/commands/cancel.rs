//! `/cancel`: unconditionally clear the pending action. Idempotent.

use sqlx::{Postgres, Transaction};

use crate::database;
use crate::database::models::User;
use crate::ui::Reply;

pub async fn run(tx: &mut Transaction<'_, Postgres>, user: &User) -> Result<Reply, sqlx::Error> {
    database::users::set_current_action(tx, user.id, None).await?;
    Ok(Reply::text("Current action cancelled"))
}
