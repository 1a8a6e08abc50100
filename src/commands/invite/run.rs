//! `/invite`, `/acceptinvite` and the redemption step of the accept flow.

use chrono::{DateTime, Duration, Utc};
use sqlx::{Postgres, Transaction};

use crate::constants::INVITE_TTL_SECS;
use crate::database;
use crate::database::models::{CurrentAction, User};
use crate::ui::Reply;

use super::logic::{self, RedeemRejection};

/// `/invite`: allocate a fresh code for the caller's family, valid one hour.
pub async fn issue(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    now: DateTime<Utc>,
) -> Result<Reply, sqlx::Error> {
    let code = database::invites::allocate_code(tx).await?;
    let expires = now + Duration::seconds(INVITE_TTL_SECS);
    database::invites::insert(tx, code, user.family, expires).await?;

    tracing::info!(target: "commands.invite", family = user.family, code, "invite issued");
    Ok(Reply::text(format!(
        "New invite code: <b>{code}</b>\nIt can be redeemed within one hour."
    )))
}

/// `/acceptinvite`: arm the accept flow.
pub async fn start_accept(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
) -> Result<Reply, sqlx::Error> {
    database::users::set_current_action(tx, user.id, Some(&CurrentAction::AcceptInvite)).await?;
    Ok(Reply::text("Enter the invite code. Use /cancel to abort."))
}

/// Free text while awaiting an invite code. Every outcome, success or
/// rejection, ends the flow; there is no retry loop.
pub async fn redeem(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Reply, sqlx::Error> {
    database::users::set_current_action(tx, user.id, None).await?;

    let Ok(code) = text.trim().parse::<i32>() else {
        return Ok(Reply::text("That does not look like an invite code"));
    };

    let invite = database::invites::find(tx, code).await?;
    let active_products = database::products::count_active(tx, user.family).await?;
    let other_members = database::users::count_other_members(tx, user.family, user.id).await?;

    match logic::check_redemption(invite.as_ref(), now, user.family, active_products, other_members)
    {
        Ok(target_family) => {
            database::users::move_to_family(tx, user.id, target_family).await?;
            database::invites::delete(tx, code).await?;
            tracing::info!(target: "commands.invite", user = user.id, family = target_family, "family switched");
            Ok(Reply::text("You have joined the other family."))
        }
        Err(RedeemRejection::NotFound) => {
            Ok(Reply::text("That invite code does not exist or has expired"))
        }
        Err(RedeemRejection::SameFamily) => {
            Ok(Reply::text("That invite code belongs to your current family"))
        }
        Err(RedeemRejection::OwnActiveProducts) => Ok(Reply::text(
            "You still have active products. Withdraw them before switching families.",
        )),
        Err(RedeemRejection::SharedActiveProducts) => Ok(Reply::text(
            "Your shared family still has active products. Switching is not possible.",
        )),
    }
}
