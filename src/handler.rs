//! Entry points for inbound Telegram updates.
//!
//! Every update runs as exactly one database transaction: begin, resolve and
//! lock the sender's user row, dispatch (command or free-text continuation of
//! the pending action), commit, then send the reply. Any storage error
//! aborts the event and rolls the transaction back; no handler path leaves a
//! transaction open.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

use crate::commands;
use crate::database;
use crate::database::models::{CurrentAction, User};
use crate::interactions::{ids, withdraw_handler};
use crate::jobs;
use crate::model::AppState;
use crate::ui::Reply;

/// Recognized command tokens. Commands always override any pending action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    List,
    ListExpired,
    Inventory,
    Invite,
    AcceptInvite,
    Cancel,
    /// Privileged trigger for the expiry notification sweep.
    NotifyExpired(String),
    /// Privileged trigger for the retention purge.
    PurgeWithdrawn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BareCommand {
    New,
    List,
    ListExpired,
    Inventory,
    Invite,
    AcceptInvite,
    Cancel,
    NotifyExpired,
    PurgeWithdrawn,
}

impl FromStr for BareCommand {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(BareCommand::New),
            "list" => Ok(BareCommand::List),
            "listexpired" => Ok(BareCommand::ListExpired),
            "inventory" => Ok(BareCommand::Inventory),
            "invite" => Ok(BareCommand::Invite),
            "acceptinvite" => Ok(BareCommand::AcceptInvite),
            "cancel" => Ok(BareCommand::Cancel),
            "notifyexpired" => Ok(BareCommand::NotifyExpired),
            "purgewithdrawn" => Ok(BareCommand::PurgeWithdrawn),
            _ => Err(()),
        }
    }
}

impl Command {
    /// Parse a command from the first whitespace-separated token of the
    /// message. A `/name@BotName` mention parses like `/name`; anything not
    /// recognized falls through to free-text dispatch.
    pub fn parse(text: &str) -> Option<Command> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;
        let name = match head.split_once('@') {
            Some((name, _)) => name,
            None => head,
        };
        let arg = tokens.next().unwrap_or("").to_string();

        match name.parse::<BareCommand>().ok()? {
            BareCommand::New => Some(Command::New),
            BareCommand::List => Some(Command::List),
            BareCommand::ListExpired => Some(Command::ListExpired),
            BareCommand::Inventory => Some(Command::Inventory),
            BareCommand::Invite => Some(Command::Invite),
            BareCommand::AcceptInvite => Some(Command::AcceptInvite),
            BareCommand::Cancel => Some(Command::Cancel),
            BareCommand::NotifyExpired => Some(Command::NotifyExpired(arg)),
            BareCommand::PurgeWithdrawn => Some(Command::PurgeWithdrawn(arg)),
        }
    }
}

/// A maintenance operation to run after the triggering event commits, as its
/// own unit of work.
#[derive(Debug, Clone, Copy)]
enum Followup {
    ExpirySweep,
    RetentionPurge,
}

struct Outcome {
    reply: Option<Reply>,
    followup: Option<Followup>,
}

impl Outcome {
    fn reply(reply: Option<Reply>) -> Self {
        Self {
            reply,
            followup: None,
        }
    }

    fn silent() -> Self {
        Self {
            reply: None,
            followup: None,
        }
    }
}

/// Text message endpoint.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = from.id.0 as i64;

    let outcome = match dispatch_message(&state, user_id, text).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(target: "handler", user = user_id, error = %err, "event failed; transaction rolled back");
            return Ok(());
        }
    };

    if let Some(reply) = outcome.reply {
        send_reply(&bot, msg.chat.id, reply).await?;
    }
    if let Some(followup) = outcome.followup {
        run_followup(&bot, &state, followup).await;
    }
    Ok(())
}

/// Callback query endpoint (inline "Withdraw" buttons).
pub async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(code) = query.data.as_deref().and_then(ids::parse_withdraw_id) else {
        return Ok(());
    };
    let user_id = query.from.id.0 as i64;

    match dispatch_withdraw(&state, user_id, code).await {
        Ok(reply) => {
            // Buttons only ever appear in private chats, where the chat id
            // equals the user id.
            send_reply(&bot, ChatId(user_id), reply).await?;
        }
        Err(err) => {
            tracing::error!(target: "handler", user = user_id, code, error = %err, "withdraw failed; transaction rolled back");
        }
    }
    Ok(())
}

async fn dispatch_message(
    state: &AppState,
    user_id: i64,
    text: &str,
) -> Result<Outcome, sqlx::Error> {
    let mut tx = state.db.begin().await?;
    let user = database::users::get_or_create(&mut tx, user_id).await?;
    let now = Utc::now();

    let outcome = match Command::parse(text) {
        Some(command) => run_command(state, &mut tx, &user, command, now).await?,
        None => Outcome::reply(run_free_text(&mut tx, &user, text, now).await?),
    };

    tx.commit().await?;
    Ok(outcome)
}

async fn dispatch_withdraw(
    state: &AppState,
    user_id: i64,
    code: i32,
) -> Result<Reply, sqlx::Error> {
    let mut tx = state.db.begin().await?;
    let user = database::users::get_or_create(&mut tx, user_id).await?;
    let reply = withdraw_handler::handle(&mut tx, &user, code, Utc::now()).await?;
    tx.commit().await?;
    Ok(reply)
}

async fn run_command(
    state: &AppState,
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    command: Command,
    now: DateTime<Utc>,
) -> Result<Outcome, sqlx::Error> {
    let outcome = match command {
        Command::New => Outcome::reply(Some(commands::new_product::run::start(tx, user, now).await?)),
        Command::List => Outcome::reply(Some(commands::list::run(tx, user, false, now).await?)),
        Command::ListExpired => Outcome::reply(Some(commands::list::run(tx, user, true, now).await?)),
        Command::Inventory => Outcome::reply(Some(commands::inventory::start(tx, user).await?)),
        Command::Invite => Outcome::reply(Some(commands::invite::run::issue(tx, user, now).await?)),
        Command::AcceptInvite => {
            Outcome::reply(Some(commands::invite::run::start_accept(tx, user).await?))
        }
        Command::Cancel => Outcome::reply(Some(commands::cancel::run(tx, user).await?)),
        Command::NotifyExpired(secret) => authorize(state, user, &secret, Followup::ExpirySweep),
        Command::PurgeWithdrawn(secret) => authorize(state, user, &secret, Followup::RetentionPurge),
    };
    Ok(outcome)
}

/// Free-text dispatch, branching on the pending action.
async fn run_free_text(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Option<Reply>, sqlx::Error> {
    match &user.current_action {
        Some(CurrentAction::RequestName) => {
            Ok(Some(commands::new_product::run::handle_name(tx, user, text).await?))
        }
        Some(CurrentAction::RequestDate { name }) => {
            Ok(Some(commands::new_product::run::handle_date(tx, user, name, text, now).await?))
        }
        Some(CurrentAction::AcceptInvite) => {
            Ok(Some(commands::invite::run::redeem(tx, user, text, now).await?))
        }
        Some(CurrentAction::InventoryAudit) => {
            Ok(Some(commands::inventory::audit(tx, user, text, now).await?))
        }
        None => commands::lookup::run(tx, user, text).await,
    }
}

/// Exact-match check of the maintenance secret. A mismatch is a silent no-op
/// so the commands stay indistinguishable from unknown input.
fn authorize(state: &AppState, user: &User, supplied: &str, followup: Followup) -> Outcome {
    if supplied == state.maintenance_secret {
        Outcome {
            reply: None,
            followup: Some(followup),
        }
    } else {
        tracing::warn!(target: "handler", user = user.id, ?followup, "maintenance trigger with bad secret ignored");
        Outcome::silent()
    }
}

async fn run_followup(bot: &Bot, state: &AppState, followup: Followup) {
    let result = match followup {
        Followup::ExpirySweep => jobs::expiry_sweep::run(&state.db, bot).await,
        Followup::RetentionPurge => jobs::retention_purge::run(&state.db).await,
    };
    if let Err(err) = result {
        tracing::error!(target: "handler", ?followup, error = %err, "manually triggered job failed");
    }
}

async fn send_reply(bot: &Bot, chat: ChatId, reply: Reply) -> ResponseResult<()> {
    let mut request = bot
        .send_message(chat, reply.text)
        .parse_mode(ParseMode::Html);
    if let Some(markup) = reply.markup {
        request = request.reply_markup(markup);
    }
    request.await?;
    Ok(())
}
