//! State transitions for the `/new` flow. Each step runs inside the event's
//! transaction owned by `handler.rs`.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use crate::constants::PRODUCT_NAME_MAX_CHARS;
use crate::database;
use crate::database::models::{CurrentAction, User};
use crate::ui::Reply;

use super::dates;
use super::ui;

/// `/new`: refuse while expired actives linger, otherwise start the flow.
pub async fn start(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    now: DateTime<Utc>,
) -> Result<Reply, sqlx::Error> {
    let expired = database::products::count_expired_active(tx, user.family, now).await?;
    if expired > 0 {
        return Ok(ui::blocked_by_expired());
    }

    database::users::set_current_action(tx, user.id, Some(&CurrentAction::RequestName)).await?;
    Ok(ui::prompt_name())
}

/// Free text while awaiting the name: capture it and ask for the date.
pub async fn handle_name(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    text: &str,
) -> Result<Reply, sqlx::Error> {
    let name: String = text.trim().chars().take(PRODUCT_NAME_MAX_CHARS).collect();
    if name.is_empty() {
        return Ok(ui::prompt_name());
    }

    database::users::set_current_action(tx, user.id, Some(&CurrentAction::RequestDate { name }))
        .await?;
    Ok(ui::prompt_date())
}

/// Free text while awaiting the date: parse the expression, allocate a code
/// and create the product. Grammar errors leave the pending state untouched
/// so the user can simply resend.
pub async fn handle_date(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    name: &str,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Reply, sqlx::Error> {
    let expires = match dates::parse_expiry(text, now) {
        Ok(expires) => expires,
        Err(error) => return Ok(ui::date_error(error)),
    };

    let code = database::products::allocate_code(tx, user.family).await?;
    database::products::insert(tx, user.family, code, name, expires).await?;
    database::users::set_current_action(tx, user.id, None).await?;

    tracing::info!(target: "commands.new_product", family = user.family, code, "product registered");
    Ok(ui::created(code, expires))
}
